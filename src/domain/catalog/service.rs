//! Catalog service.
//!
//! Admin mutations (create, reprice, restock, delete) plus the read paths the
//! rest of the system uses. The Order Engine is the only other writer of
//! product stock, and it goes through its own transaction.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        errors::CatalogServiceError,
        models::{Category, NewCategory, NewProduct, Product, ProductUuid},
        repository::CatalogRepository,
    },
};

#[derive(Debug, Clone)]
pub struct MemCatalogService {
    db: Db,
    repository: CatalogRepository,
}

impl MemCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: CatalogRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for MemCatalogService {
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CatalogServiceError> {
        let mut tx = self.db.begin().await;

        let created = self.repository.insert_category(&mut tx, category);

        tx.commit();

        Ok(created)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await;

        if self.repository.find_by_name(&tx, &product.name).is_some() {
            return Err(CatalogServiceError::AlreadyExists);
        }

        if !self.repository.category_exists(&tx, product.category_uuid) {
            return Err(CatalogServiceError::CategoryNotFound);
        }

        let created = self.repository.insert_product(&mut tx, product);

        tx.commit();

        Ok(created)
    }

    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError> {
        let store = self.db.read().await;

        self.repository
            .get_product(&store, product)
            .ok_or(CatalogServiceError::NotFound)
    }

    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError> {
        let store = self.db.read().await;

        Ok(self.repository.list_products(&store))
    }

    async fn set_price(
        &self,
        product: ProductUuid,
        price: u64,
    ) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await;

        let updated = self
            .repository
            .set_price(&mut tx, product, price)
            .ok_or(CatalogServiceError::NotFound)?;

        tx.commit();

        Ok(updated)
    }

    async fn set_stock(
        &self,
        product: ProductUuid,
        stock: u32,
    ) -> Result<Product, CatalogServiceError> {
        let mut tx = self.db.begin().await;

        let updated = self
            .repository
            .set_stock(&mut tx, product, stock)
            .ok_or(CatalogServiceError::NotFound)?;

        tx.commit();

        Ok(updated)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await;

        let rows_affected = self.repository.delete_product(&mut tx, product);

        if rows_affected == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit();

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Create a category.
    async fn create_category(&self, category: NewCategory)
    -> Result<Category, CatalogServiceError>;

    /// Create a product; product names are unique.
    async fn create_product(&self, product: NewProduct) -> Result<Product, CatalogServiceError>;

    /// Retrieve a single product.
    async fn get_product(&self, product: ProductUuid) -> Result<Product, CatalogServiceError>;

    /// List all products.
    async fn list_products(&self) -> Result<Vec<Product>, CatalogServiceError>;

    /// Change a product's price. Existing order line items keep the price
    /// they were sold at.
    async fn set_price(&self, product: ProductUuid, price: u64)
    -> Result<Product, CatalogServiceError>;

    /// Overwrite a product's stock quantity.
    async fn set_stock(&self, product: ProductUuid, stock: u32)
    -> Result<Product, CatalogServiceError>;

    /// Delete a product.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError>;
}
