//! Storefront core.
//!
//! The library behind a retail storefront: a product catalog, per-user carts,
//! atomic order placement with stock decrement, and purchase-gated product
//! reviews. Transport (HTTP / CLI) is deliberately absent; this crate exposes
//! the services such a layer would call.

pub mod context;
pub mod database;
pub mod domain;
pub mod errors;

#[cfg(test)]
mod test;

mod uuids;
