//! Orders Repository

use jiff::Timestamp;

use crate::{
    database::{Store, Tx},
    domain::{
        catalog::models::ProductUuid,
        orders::models::{
            Order, OrderLineItem, OrderLineItemUuid, OrderStatus, OrderUuid, PlaceOrder,
        },
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone, Default)]
pub(crate) struct OrdersRepository;

impl OrdersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn insert_order(
        &self,
        tx: &mut Tx,
        user: UserUuid,
        request: &PlaceOrder,
        total_amount: u64,
    ) -> Order {
        let row = Order {
            uuid: OrderUuid::now_v7(),
            user_uuid: user,
            address: request.address().to_string(),
            payment_method: request.payment_method(),
            total_amount,
            status: OrderStatus::Pending,
            created_at: Timestamp::now(),
        };

        tx.orders.insert(row.uuid, row.clone());

        row
    }

    pub(crate) fn insert_line_item(
        &self,
        tx: &mut Tx,
        order: OrderUuid,
        product: ProductUuid,
        quantity: u32,
        unit_price: u64,
    ) -> OrderLineItem {
        let row = OrderLineItem {
            uuid: OrderLineItemUuid::now_v7(),
            order_uuid: order,
            product_uuid: product,
            quantity,
            unit_price,
        };

        tx.order_line_items.insert(row.uuid, row.clone());

        row
    }

    pub(crate) fn get_order(&self, store: &Store, order: OrderUuid) -> Option<Order> {
        store.orders.get(&order).cloned()
    }

    /// Every order, across all users, oldest first.
    pub(crate) fn list_all(&self, store: &Store) -> Vec<Order> {
        let mut orders: Vec<Order> = store.orders.values().cloned().collect();
        orders.sort_by(|a, b| (a.created_at, a.uuid).cmp(&(b.created_at, b.uuid)));

        orders
    }

    pub(crate) fn list_for_user(&self, store: &Store, user: UserUuid) -> Vec<Order> {
        let mut orders: Vec<Order> = store
            .orders
            .values()
            .filter(|o| o.user_uuid == user)
            .cloned()
            .collect();
        orders.sort_by(|a, b| (a.created_at, a.uuid).cmp(&(b.created_at, b.uuid)));

        orders
    }

    pub(crate) fn items_for_order(&self, store: &Store, order: OrderUuid) -> Vec<OrderLineItem> {
        let mut items: Vec<OrderLineItem> = store
            .order_line_items
            .values()
            .filter(|i| i.order_uuid == order)
            .cloned()
            .collect();
        items.sort_by_key(|i| i.uuid);

        items
    }

    pub(crate) fn set_status(
        &self,
        tx: &mut Tx,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Option<Order> {
        let row = tx.orders.get_mut(&order)?;
        row.status = status;

        Some(row.clone())
    }

    /// Proof of purchase: does any of the user's orders, regardless of
    /// status, contain a line item for this product?
    pub(crate) fn user_has_purchased(
        &self,
        store: &Store,
        user: UserUuid,
        product: ProductUuid,
    ) -> bool {
        store.order_line_items.values().any(|item| {
            item.product_uuid == product
                && store
                    .orders
                    .get(&item.order_uuid)
                    .is_some_and(|o| o.user_uuid == user)
        })
    }
}
