//! Carts service errors.

use thiserror::Error;

use crate::errors::{ErrorClass, ErrorClassified};

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("This product is already in your cart")]
    AlreadyInCart,

    #[error("Product not found")]
    ProductNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Cart item not found")]
    NotFound,

    #[error("Quantity must be greater than zero")]
    InvalidQuantity,
}

impl ErrorClassified for CartsServiceError {
    fn class(&self) -> ErrorClass {
        match self {
            Self::AlreadyInCart => ErrorClass::Conflict,
            Self::ProductNotFound | Self::UserNotFound | Self::NotFound => ErrorClass::NotFound,
            Self::InvalidQuantity => ErrorClass::Validation,
        }
    }
}
