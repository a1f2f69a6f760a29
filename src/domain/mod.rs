//! Storefront domain concerns.

pub mod carts;
pub mod catalog;
pub mod orders;
pub mod reviews;
pub mod users;
