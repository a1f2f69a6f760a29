//! Review Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{catalog::models::ProductUuid, users::models::UserUuid},
    uuids::TypedUuid,
};

/// Rating UUID
pub type RatingUuid = TypedUuid<Rating>;

/// Rating Model
///
/// One per (user, product), gated on proof of purchase.
#[derive(Debug, Clone, Serialize)]
pub struct Rating {
    pub uuid: RatingUuid,
    pub user_uuid: UserUuid,
    pub product_uuid: ProductUuid,
    /// 1 to 5 inclusive.
    pub value: u8,
    pub feedback: String,
    pub created_at: Timestamp,
}

/// Rating submission payload. Field checks happen in the service so the
/// failure order matches the contract (value, then feedback, then
/// uniqueness, then the purchase gate).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmitRating {
    pub product_uuid: ProductUuid,
    pub value: u8,
    pub feedback: String,
}

/// Aggregate over a product's ratings. `average` is 0.0 when `count` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatingSummary {
    pub average: f64,
    pub count: u64,
}
