//! Orders service: checkout and order history.
//!
//! Checkout turns a cart into a durable order with prices frozen at checkout
//! time, decrementing stock per line, or leaves every table exactly as it
//! was. The whole sequence runs inside one [`crate::database::Tx`]; any
//! early return drops the transaction and rolls everything back, including
//! the already-inserted order header.

use async_trait::async_trait;
use mockall::automock;
use tracing::{Span, info, warn};

use crate::{
    database::Db,
    domain::{
        carts::repository::CartsRepository,
        catalog::{models::ProductUuid, repository::CatalogRepository},
        orders::{
            errors::OrdersServiceError,
            models::{CartSource, Order, OrderStatus, OrderUuid, OrderWithItems, PlaceOrder},
            repository::OrdersRepository,
        },
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone)]
pub struct MemOrdersService {
    db: Db,
    repository: OrdersRepository,
    carts_repository: CartsRepository,
    catalog_repository: CatalogRepository,
}

impl MemOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: OrdersRepository::new(),
            carts_repository: CartsRepository::new(),
            catalog_repository: CatalogRepository::new(),
        }
    }
}

#[async_trait]
impl OrdersService for MemOrdersService {
    #[tracing::instrument(
        skip(self, request),
        fields(
            order_uuid = tracing::field::Empty,
            total_amount = tracing::field::Empty,
            line_count = tracing::field::Empty,
        )
    )]
    async fn place_order(
        &self,
        user: UserUuid,
        source: CartSource,
        request: PlaceOrder,
    ) -> Result<Order, OrdersServiceError> {
        let span = Span::current();

        let mut tx = self.db.begin().await;

        // Resolve the cart. For a snapshot the quantities come straight from
        // the caller and must be validated here; stored lines were validated
        // on the way in.
        let lines: Vec<(ProductUuid, u32)> = match &source {
            CartSource::Stored => self
                .carts_repository
                .list_for_user(&tx, user)
                .into_iter()
                .map(|line| (line.product_uuid, line.quantity))
                .collect(),
            CartSource::Snapshot(snapshot) => {
                if snapshot.iter().any(|line| line.quantity == 0) {
                    return Err(OrdersServiceError::InvalidQuantity);
                }

                snapshot
                    .iter()
                    .map(|line| (line.product_uuid, line.quantity))
                    .collect()
            }
        };

        if lines.is_empty() {
            return Err(OrdersServiceError::EmptyCart);
        }

        span.record("line_count", lines.len());

        // Freeze prices: last-observed-at-checkout wins over whatever the
        // user saw earlier in the session. A product already gone from the
        // catalog prices at zero and is rejected by the stock check below.
        let mut priced = Vec::with_capacity(lines.len());
        let mut total_amount: u64 = 0;

        for (product, quantity) in lines {
            let unit_price = self
                .catalog_repository
                .get_product(&tx, product)
                .map_or(0, |p| p.price);

            total_amount = unit_price
                .checked_mul(u64::from(quantity))
                .and_then(|line_total| total_amount.checked_add(line_total))
                .ok_or(OrdersServiceError::TotalOverflow)?;

            priced.push((product, quantity, unit_price));
        }

        let order = self
            .repository
            .insert_order(&mut tx, user, &request, total_amount);

        span.record("order_uuid", tracing::field::display(order.uuid));
        span.record("total_amount", total_amount);

        // Per line: re-read live stock inside this transaction, then write
        // the line item and decrement stock together. A shortfall aborts the
        // whole checkout; the dropped transaction undoes the header and any
        // lines already written.
        for (product, quantity, unit_price) in priced {
            let in_stock = self
                .catalog_repository
                .get_product(&tx, product)
                .is_some_and(|p| p.stock >= quantity);

            if !in_stock {
                warn!(%product, quantity, "checkout aborted: insufficient stock");
                return Err(OrdersServiceError::InsufficientStock { product });
            }

            self.repository
                .insert_line_item(&mut tx, order.uuid, product, quantity, unit_price);

            if !self.catalog_repository.decrement_stock(&mut tx, product, quantity) {
                warn!(%product, quantity, "checkout aborted: insufficient stock");
                return Err(OrdersServiceError::InsufficientStock { product });
            }
        }

        // Full clear: no partial checkout of a subset of lines exists, so a
        // successful checkout always empties the stored cart.
        if source == CartSource::Stored {
            self.carts_repository.delete_for_user(&mut tx, user);
        }

        tx.commit();

        info!(order_uuid = %order.uuid, total_amount, "order placed");

        Ok(order)
    }

    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderWithItems, OrdersServiceError> {
        let store = self.db.read().await;

        let order = self
            .repository
            .get_order(&store, order)
            .filter(|o| o.user_uuid == user)
            .ok_or(OrdersServiceError::NotFound)?;

        let items = self.repository.items_for_order(&store, order.uuid);

        Ok(OrderWithItems { order, items })
    }

    async fn list_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderWithItems>, OrdersServiceError> {
        let store = self.db.read().await;

        let orders = self
            .repository
            .list_for_user(&store, user)
            .into_iter()
            .map(|order| {
                let items = self.repository.items_for_order(&store, order.uuid);
                OrderWithItems { order, items }
            })
            .collect();

        Ok(orders)
    }

    async fn list_all(&self) -> Result<Vec<OrderWithItems>, OrdersServiceError> {
        let store = self.db.read().await;

        let orders = self
            .repository
            .list_all(&store)
            .into_iter()
            .map(|order| {
                let items = self.repository.items_for_order(&store, order.uuid);
                OrderWithItems { order, items }
            })
            .collect();

        Ok(orders)
    }

    async fn set_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError> {
        let mut tx = self.db.begin().await;

        let updated = self
            .repository
            .set_status(&mut tx, order, status)
            .ok_or(OrdersServiceError::NotFound)?;

        tx.commit();

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Convert a cart into an order, atomically.
    ///
    /// On success the order is `pending`, line-item prices are frozen,
    /// product stock is decremented per line, and a stored cart is cleared.
    /// On any failure the store is left exactly as it was before the call.
    async fn place_order(
        &self,
        user: UserUuid,
        source: CartSource,
        request: PlaceOrder,
    ) -> Result<Order, OrdersServiceError>;

    /// One of the user's orders, with its line items.
    async fn get_order(
        &self,
        user: UserUuid,
        order: OrderUuid,
    ) -> Result<OrderWithItems, OrdersServiceError>;

    /// All of the user's orders, oldest first.
    async fn list_for_user(
        &self,
        user: UserUuid,
    ) -> Result<Vec<OrderWithItems>, OrdersServiceError>;

    /// Admin: every order across all users, oldest first, with line items.
    async fn list_all(&self) -> Result<Vec<OrderWithItems>, OrdersServiceError>;

    /// Admin: overwrite an order's fulfilment status.
    async fn set_status(
        &self,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<Order, OrdersServiceError>;
}
