//! Orders service errors.

use thiserror::Error;

use crate::{
    domain::catalog::models::ProductUuid,
    errors::{ErrorClass, ErrorClassified},
};

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    #[error("Cart is empty. Add items before placing an order.")]
    EmptyCart,

    /// Live stock fell short at checkout, or the product vanished from the
    /// catalog (treated as zero stock). Always names the product.
    #[error("Insufficient stock for product: {product}")]
    InsufficientStock { product: ProductUuid },

    #[error("Delivery address must not be blank")]
    InvalidAddress,

    #[error("Quantity must be greater than zero")]
    InvalidQuantity,

    /// Σ(unit price × quantity) does not fit in a `u64`. The catalog accepts
    /// arbitrary prices, so the engine has to refuse rather than wrap.
    #[error("Order total exceeds the maximum representable amount")]
    TotalOverflow,

    #[error("Order not found")]
    NotFound,
}

impl ErrorClassified for OrdersServiceError {
    fn class(&self) -> ErrorClass {
        match self {
            Self::EmptyCart | Self::InvalidAddress | Self::InvalidQuantity | Self::TotalOverflow => {
                ErrorClass::Validation
            }
            Self::InsufficientStock { .. } => ErrorClass::InsufficientStock,
            Self::NotFound => ErrorClass::NotFound,
        }
    }
}
