//! Cart Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{catalog::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Cart Line UUID
pub type CartLineUuid = TypedUuid<CartLine>;

/// Cart Line Model
///
/// One (user, product) pair pending purchase; unique per user and product.
#[derive(Debug, Clone, Serialize)]
pub struct CartLine {
    pub uuid: CartLineUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Cart Line payload.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NewCartLine {
    pub uuid: CartLineUuid,
    pub product_uuid: ProductUuid,
    pub quantity: u32,
}

/// The current catalog view of a product, joined onto a cart line at read
/// time. Prices here float with the catalog until checkout freezes them.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub price: u64,
    pub stock: u32,
}

/// A cart line enriched for display. `product` is `None` when the product
/// was deleted from the catalog after the line was added.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub line: CartLine,
    pub product: Option<ProductSnapshot>,
}
