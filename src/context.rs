//! App Context

use std::{fmt, sync::Arc};

use crate::{
    database::Db,
    domain::{
        carts::{CartsService, MemCartsService},
        catalog::{CatalogService, MemCatalogService},
        orders::{MemOrdersService, OrdersService},
        reviews::{MemReviewsService, ReviewsService},
        users::{MemUsersService, UsersService},
    },
};

/// Every service, wired over one shared store. This is what a transport
/// layer holds.
#[derive(Clone)]
pub struct AppContext {
    pub users: Arc<dyn UsersService>,
    pub catalog: Arc<dyn CatalogService>,
    pub carts: Arc<dyn CartsService>,
    pub orders: Arc<dyn OrdersService>,
    pub reviews: Arc<dyn ReviewsService>,
}

impl AppContext {
    /// Build the full service graph over a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_db(Db::new())
    }

    /// Build the service graph over an existing store handle.
    #[must_use]
    pub fn with_db(db: Db) -> Self {
        Self {
            users: Arc::new(MemUsersService::new(db.clone())),
            catalog: Arc::new(MemCatalogService::new(db.clone())),
            carts: Arc::new(MemCartsService::new(db.clone())),
            orders: Arc::new(MemOrdersService::new(db.clone())),
            reviews: Arc::new(MemReviewsService::new(db)),
        }
    }
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext").finish_non_exhaustive()
    }
}
