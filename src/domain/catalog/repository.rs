//! Catalog Repository

use jiff::Timestamp;

use crate::{
    database::{Store, Tx},
    domain::catalog::models::{Category, CategoryUuid, NewCategory, NewProduct, Product, ProductUuid},
};

#[derive(Debug, Clone, Default)]
pub(crate) struct CatalogRepository;

impl CatalogRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn insert_category(&self, tx: &mut Tx, category: NewCategory) -> Category {
        let row = Category {
            uuid: category.uuid,
            name: category.name,
            created_at: Timestamp::now(),
        };

        tx.categories.insert(row.uuid, row.clone());

        row
    }

    pub(crate) fn category_exists(&self, store: &Store, category: CategoryUuid) -> bool {
        store.categories.contains_key(&category)
    }

    pub(crate) fn get_product(&self, store: &Store, product: ProductUuid) -> Option<Product> {
        store.products.get(&product).cloned()
    }

    pub(crate) fn find_by_name(&self, store: &Store, name: &str) -> Option<Product> {
        store.products.values().find(|p| p.name == name).cloned()
    }

    pub(crate) fn list_products(&self, store: &Store) -> Vec<Product> {
        let mut products: Vec<Product> = store.products.values().cloned().collect();
        products.sort_by(|a, b| (a.created_at, a.uuid).cmp(&(b.created_at, b.uuid)));

        products
    }

    pub(crate) fn insert_product(&self, tx: &mut Tx, product: NewProduct) -> Product {
        let now = Timestamp::now();
        let row = Product {
            uuid: product.uuid,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            category_uuid: product.category_uuid,
            created_at: now,
            updated_at: now,
        };

        tx.products.insert(row.uuid, row.clone());

        row
    }

    pub(crate) fn set_price(&self, tx: &mut Tx, product: ProductUuid, price: u64) -> Option<Product> {
        let row = tx.products.get_mut(&product)?;
        row.price = price;
        row.updated_at = Timestamp::now();

        Some(row.clone())
    }

    pub(crate) fn set_stock(&self, tx: &mut Tx, product: ProductUuid, stock: u32) -> Option<Product> {
        let row = tx.products.get_mut(&product)?;
        row.stock = stock;
        row.updated_at = Timestamp::now();

        Some(row.clone())
    }

    /// Decrement stock by `quantity`, refusing to go below zero.
    ///
    /// Returns `false` when the product is missing or short on stock; the
    /// caller decides what that means for its transaction.
    pub(crate) fn decrement_stock(
        &self,
        tx: &mut Tx,
        product: ProductUuid,
        quantity: u32,
    ) -> bool {
        let Some(row) = tx.products.get_mut(&product) else {
            return false;
        };

        let Some(remaining) = row.stock.checked_sub(quantity) else {
            return false;
        };

        row.stock = remaining;
        row.updated_at = Timestamp::now();

        true
    }

    pub(crate) fn delete_product(&self, tx: &mut Tx, product: ProductUuid) -> u64 {
        u64::from(tx.products.remove(&product).is_some())
    }
}
