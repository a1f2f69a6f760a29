//! Carts service.
//!
//! The Cart Store holds desire, not reservation: quantities are not checked
//! against stock here. Stock is validated exactly once, at checkout, inside
//! the Order Engine's transaction.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::{
        carts::{
            errors::CartsServiceError,
            models::{CartLine, CartLineUuid, CartLineView, NewCartLine, ProductSnapshot},
            repository::CartsRepository,
        },
        catalog::{models::ProductUuid, repository::CatalogRepository},
        users::{models::UserUuid, repository::UsersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct MemCartsService {
    db: Db,
    repository: CartsRepository,
    catalog_repository: CatalogRepository,
    users_repository: UsersRepository,
}

impl MemCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: CartsRepository::new(),
            catalog_repository: CatalogRepository::new(),
            users_repository: UsersRepository::new(),
        }
    }
}

#[async_trait]
impl CartsService for MemCartsService {
    async fn add_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLine, CartsServiceError> {
        if line.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let mut tx = self.db.begin().await;

        if self
            .catalog_repository
            .get_product(&tx, line.product_uuid)
            .is_none()
        {
            return Err(CartsServiceError::ProductNotFound);
        }

        if self.users_repository.get_user(&tx, user).is_none() {
            return Err(CartsServiceError::UserNotFound);
        }

        if self
            .repository
            .find_line(&tx, user, line.product_uuid)
            .is_some()
        {
            return Err(CartsServiceError::AlreadyInCart);
        }

        let created = self.repository.insert_line(&mut tx, user, line);

        tx.commit();

        Ok(created)
    }

    async fn set_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartLine, CartsServiceError> {
        let mut tx = self.db.begin().await;

        let existing = self
            .repository
            .get_line(&tx, line)
            .filter(|l| l.user_uuid == user && l.product_uuid == product)
            .ok_or(CartsServiceError::NotFound)?;

        if quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        let updated = self
            .repository
            .update_quantity(&mut tx, existing.uuid, quantity)
            .ok_or(CartsServiceError::NotFound)?;

        tx.commit();

        Ok(updated)
    }

    async fn remove_line(
        &self,
        user: UserUuid,
        line: CartLineUuid,
    ) -> Result<(), CartsServiceError> {
        let mut tx = self.db.begin().await;

        let owned = self
            .repository
            .get_line(&tx, line)
            .is_some_and(|l| l.user_uuid == user);

        if !owned {
            return Err(CartsServiceError::NotFound);
        }

        self.repository.delete_line(&mut tx, line);

        tx.commit();

        Ok(())
    }

    async fn list_for_user(&self, user: UserUuid) -> Result<Vec<CartLineView>, CartsServiceError> {
        let store = self.db.read().await;

        let views = self
            .repository
            .list_for_user(&store, user)
            .into_iter()
            .map(|line| {
                let product = self
                    .catalog_repository
                    .get_product(&store, line.product_uuid)
                    .map(|p| ProductSnapshot {
                        name: p.name,
                        price: p.price,
                        stock: p.stock,
                    });

                CartLineView { line, product }
            })
            .collect();

        Ok(views)
    }
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Add a product to the user's cart. Each product appears at most once;
    /// re-adding fails rather than merging quantities.
    async fn add_line(
        &self,
        user: UserUuid,
        line: NewCartLine,
    ) -> Result<CartLine, CartsServiceError>;

    /// Change the quantity on an existing line, addressed by (line, product).
    async fn set_quantity(
        &self,
        user: UserUuid,
        line: CartLineUuid,
        product: ProductUuid,
        quantity: u32,
    ) -> Result<CartLine, CartsServiceError>;

    /// Remove a line from the user's cart.
    async fn remove_line(&self, user: UserUuid, line: CartLineUuid)
    -> Result<(), CartsServiceError>;

    /// All of the user's lines, enriched with the current product snapshot.
    async fn list_for_user(&self, user: UserUuid) -> Result<Vec<CartLineView>, CartsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{domain::catalog::CatalogService, test::TestContext};

    use super::*;

    #[tokio::test]
    async fn add_line_returns_row() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;
        let uuid = CartLineUuid::now_v7();

        let line = ctx
            .carts
            .add_line(
                ctx.user,
                NewCartLine {
                    uuid,
                    product_uuid: product.uuid,
                    quantity: 2,
                },
            )
            .await?;

        assert_eq!(line.uuid, uuid);
        assert_eq!(line.user_uuid, ctx.user);
        assert_eq!(line.quantity, 2);

        Ok(())
    }

    #[tokio::test]
    async fn re_adding_same_product_returns_already_in_cart() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;

        ctx.add_to_cart(product.uuid, 1).await?;

        let result = ctx
            .carts
            .add_line(
                ctx.user,
                NewCartLine {
                    uuid: CartLineUuid::now_v7(),
                    product_uuid: product.uuid,
                    quantity: 3,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::AlreadyInCart)),
            "expected AlreadyInCart, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_line_unknown_product_returns_product_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .carts
            .add_line(
                ctx.user,
                NewCartLine {
                    uuid: CartLineUuid::now_v7(),
                    product_uuid: ProductUuid::now_v7(),
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::ProductNotFound)),
            "expected ProductNotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn add_line_unknown_user_returns_user_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;

        let result = ctx
            .carts
            .add_line(
                UserUuid::now_v7(),
                NewCartLine {
                    uuid: CartLineUuid::now_v7(),
                    product_uuid: product.uuid,
                    quantity: 1,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::UserNotFound)),
            "expected UserNotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn add_line_zero_quantity_returns_invalid_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;

        let result = ctx
            .carts
            .add_line(
                ctx.user,
                NewCartLine {
                    uuid: CartLineUuid::now_v7(),
                    product_uuid: product.uuid,
                    quantity: 0,
                },
            )
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_updates_the_line() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;
        let line = ctx.add_to_cart(product.uuid, 1).await?;

        let updated = ctx
            .carts
            .set_quantity(ctx.user, line.uuid, product.uuid, 5)
            .await?;

        assert_eq!(updated.quantity, 5);

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_is_not_stock_checked() -> TestResult {
        // Stock validation is deferred to checkout.
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 2).await?;
        let line = ctx.add_to_cart(product.uuid, 1).await?;

        let updated = ctx
            .carts
            .set_quantity(ctx.user, line.uuid, product.uuid, 100)
            .await?;

        assert_eq!(updated.quantity, 100);

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_zero_returns_invalid_quantity() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;
        let line = ctx.add_to_cart(product.uuid, 1).await?;

        let result = ctx
            .carts
            .set_quantity(ctx.user, line.uuid, product.uuid, 0)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::InvalidQuantity)),
            "expected InvalidQuantity, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn set_quantity_unknown_line_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;

        let result = ctx
            .carts
            .set_quantity(ctx.user, CartLineUuid::now_v7(), product.uuid, 2)
            .await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn remove_line_deletes_it() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;
        let line = ctx.add_to_cart(product.uuid, 1).await?;

        ctx.carts.remove_line(ctx.user, line.uuid).await?;

        let lines = ctx.carts.list_for_user(ctx.user).await?;

        assert!(lines.is_empty(), "cart should be empty after removal");

        Ok(())
    }

    #[tokio::test]
    async fn remove_line_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;
        let line = ctx.add_to_cart(product.uuid, 1).await?;

        ctx.carts.remove_line(ctx.user, line.uuid).await?;
        let result = ctx.carts.remove_line(ctx.user, line.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound on second removal, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn another_users_line_is_not_removable() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;
        let line = ctx.add_to_cart(product.uuid, 1).await?;

        let other = ctx.create_user("Mallory", "mallory@example.com").await?;

        let result = ctx.carts.remove_line(other, line.uuid).await;

        assert!(
            matches!(result, Err(CartsServiceError::NotFound)),
            "expected NotFound for non-owner removal, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_reflects_current_catalog_price() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;
        ctx.add_to_cart(product.uuid, 1).await?;

        ctx.catalog.set_price(product.uuid, 30_00).await?;

        let lines = ctx.carts.list_for_user(ctx.user).await?;
        let snapshot = lines[0].product.as_ref().expect("missing product snapshot");

        assert_eq!(snapshot.price, 30_00);

        Ok(())
    }

    #[tokio::test]
    async fn list_marks_deleted_products() -> TestResult {
        let ctx = TestContext::new().await;
        let product = ctx.create_product("Teapot", 25_00, 4).await?;
        ctx.add_to_cart(product.uuid, 1).await?;

        ctx.catalog.delete_product(product.uuid).await?;

        let lines = ctx.carts.list_for_user(ctx.user).await?;

        assert_eq!(lines.len(), 1, "line itself should survive");
        assert!(lines[0].product.is_none(), "snapshot should be gone");

        Ok(())
    }
}
