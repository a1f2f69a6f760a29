//! Catalog Models

use jiff::Timestamp;
use serde::Serialize;

use crate::uuids::TypedUuid;

/// Category UUID
pub type CategoryUuid = TypedUuid<Category>;

/// Category Model
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub uuid: CategoryUuid,
    pub name: String,
    pub created_at: Timestamp,
}

/// New Category Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    pub uuid: CategoryUuid,
    pub name: String,
}

/// Product UUID
pub type ProductUuid = TypedUuid<Product>;

/// Product Model
///
/// `price` is in minor units (pence/cents). `stock` is the purchasable
/// quantity; an unsigned type keeps the never-negative invariant structural.
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub stock: u32,
    pub category_uuid: CategoryUuid,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// New Product Model
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub stock: u32,
    pub category_uuid: CategoryUuid,
}
