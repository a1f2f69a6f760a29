//! Storage engine.
//!
//! An in-process store with explicit transactions. Every mutating repository
//! call takes a [`Tx`], so the atomicity contract around checkout is
//! structural rather than incidental: a transaction that is dropped without
//! [`Tx::commit`] restores the store to the exact state it had when the
//! transaction began.

use std::{
    ops::{Deref, DerefMut},
    sync::Arc,
};

use rustc_hash::FxHashMap;
use tokio::sync::{OwnedRwLockReadGuard, OwnedRwLockWriteGuard, RwLock};

use crate::domain::{
    carts::models::{CartLine, CartLineUuid},
    catalog::models::{Category, CategoryUuid, Product, ProductUuid},
    orders::models::{Order, OrderLineItem, OrderLineItemUuid, OrderUuid},
    reviews::models::{Rating, RatingUuid},
    users::models::{User, UserUuid},
};

/// The full persisted state: one typed table per entity.
#[derive(Debug, Clone, Default)]
pub struct Store {
    pub(crate) users: FxHashMap<UserUuid, User>,
    pub(crate) categories: FxHashMap<CategoryUuid, Category>,
    pub(crate) products: FxHashMap<ProductUuid, Product>,
    pub(crate) cart_lines: FxHashMap<CartLineUuid, CartLine>,
    pub(crate) orders: FxHashMap<OrderUuid, Order>,
    pub(crate) order_line_items: FxHashMap<OrderLineItemUuid, OrderLineItem>,
    pub(crate) ratings: FxHashMap<RatingUuid, Rating>,
}

/// Cloneable handle to a shared [`Store`].
#[derive(Debug, Clone, Default)]
pub struct Db {
    store: Arc<RwLock<Store>>,
}

impl Db {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a write transaction.
    ///
    /// The transaction holds the store's write lock for its whole lifetime,
    /// so transactions serialize: a concurrent checkout cannot observe stock
    /// this transaction is about to consume.
    pub async fn begin(&self) -> Tx {
        let guard = Arc::clone(&self.store).write_owned().await;
        let snapshot = guard.clone();

        Tx {
            guard,
            snapshot: Some(snapshot),
        }
    }

    /// Shared read access for query paths that mutate nothing.
    pub async fn read(&self) -> OwnedRwLockReadGuard<Store> {
        Arc::clone(&self.store).read_owned().await
    }
}

/// A unit of work against the [`Store`].
///
/// Writes are applied in place under the write lock. [`Tx::commit`] keeps
/// them; dropping an uncommitted transaction rolls every write back by
/// restoring the snapshot taken at [`Db::begin`].
#[derive(Debug)]
pub struct Tx {
    guard: OwnedRwLockWriteGuard<Store>,
    snapshot: Option<Store>,
}

impl Tx {
    /// Keep all writes made through this transaction.
    pub fn commit(mut self) {
        self.snapshot = None;
    }
}

impl Deref for Tx {
    type Target = Store;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl DerefMut for Tx {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}

impl Drop for Tx {
    fn drop(&mut self) {
        if let Some(snapshot) = self.snapshot.take() {
            *self.guard = snapshot;
        }
    }
}
