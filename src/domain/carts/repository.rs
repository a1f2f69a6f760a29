//! Carts Repository

use jiff::Timestamp;

use crate::{
    database::{Store, Tx},
    domain::{
        carts::models::{CartLine, CartLineUuid, NewCartLine},
        catalog::models::ProductUuid,
        users::models::UserUuid,
    },
};

#[derive(Debug, Clone, Default)]
pub(crate) struct CartsRepository;

impl CartsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) fn get_line(&self, store: &Store, line: CartLineUuid) -> Option<CartLine> {
        store.cart_lines.get(&line).cloned()
    }

    /// The unique line for a (user, product) pair, if any.
    pub(crate) fn find_line(
        &self,
        store: &Store,
        user: UserUuid,
        product: ProductUuid,
    ) -> Option<CartLine> {
        store
            .cart_lines
            .values()
            .find(|l| l.user_uuid == user && l.product_uuid == product)
            .cloned()
    }

    pub(crate) fn list_for_user(&self, store: &Store, user: UserUuid) -> Vec<CartLine> {
        let mut lines: Vec<CartLine> = store
            .cart_lines
            .values()
            .filter(|l| l.user_uuid == user)
            .cloned()
            .collect();
        lines.sort_by(|a, b| (a.created_at, a.uuid).cmp(&(b.created_at, b.uuid)));

        lines
    }

    pub(crate) fn insert_line(&self, tx: &mut Tx, user: UserUuid, line: NewCartLine) -> CartLine {
        let now = Timestamp::now();
        let row = CartLine {
            uuid: line.uuid,
            user_uuid: user,
            product_uuid: line.product_uuid,
            quantity: line.quantity,
            created_at: now,
            updated_at: now,
        };

        tx.cart_lines.insert(row.uuid, row.clone());

        row
    }

    pub(crate) fn update_quantity(
        &self,
        tx: &mut Tx,
        line: CartLineUuid,
        quantity: u32,
    ) -> Option<CartLine> {
        let row = tx.cart_lines.get_mut(&line)?;
        row.quantity = quantity;
        row.updated_at = Timestamp::now();

        Some(row.clone())
    }

    pub(crate) fn delete_line(&self, tx: &mut Tx, line: CartLineUuid) -> u64 {
        u64::from(tx.cart_lines.remove(&line).is_some())
    }

    /// Bulk-clear a user's cart. Returns the number of lines removed.
    pub(crate) fn delete_for_user(&self, tx: &mut Tx, user: UserUuid) -> u64 {
        let doomed: Vec<CartLineUuid> = tx
            .cart_lines
            .values()
            .filter(|l| l.user_uuid == user)
            .map(|l| l.uuid)
            .collect();

        for uuid in &doomed {
            tx.cart_lines.remove(uuid);
        }

        doomed.len() as u64
    }
}
