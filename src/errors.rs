//! Error taxonomy.
//!
//! Every domain keeps its own `thiserror` enum; this module classifies those
//! errors into the transport-facing taxonomy so an HTTP layer can map any
//! service failure to a status code without matching on domain variants.

use std::fmt::Display;

use serde_json::{Value, json};

/// Transport-facing classification of a service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed or missing input; the caller's fault.
    Validation,
    /// A referenced entity is absent.
    NotFound,
    /// A uniqueness rule was violated (duplicate cart line, duplicate rating).
    Conflict,
    /// Checkout-time stock shortage or race; the message names the product.
    InsufficientStock,
    /// Missing, expired, or invalid credential.
    Authorization,
    /// Unexpected failure.
    Internal,
}

impl ErrorClass {
    /// The HTTP status a transport layer should answer with.
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::Validation | Self::InsufficientStock => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Authorization => 403,
            Self::Internal => 500,
        }
    }
}

/// Implemented by every domain service error.
pub trait ErrorClassified {
    fn class(&self) -> ErrorClass;
}

/// The `{"message": ...}` body the transport layer returns for an error.
pub fn error_body<E: ErrorClassified + Display>(error: &E) -> Value {
    json!({ "message": error.to_string() })
}

#[cfg(test)]
mod tests {
    use crate::domain::{carts::CartsServiceError, orders::OrdersServiceError};

    use super::*;

    #[test]
    fn error_body_wraps_the_display_message() {
        let error = CartsServiceError::AlreadyInCart;

        assert_eq!(
            error_body(&error),
            json!({ "message": "This product is already in your cart" })
        );
    }

    #[test]
    fn domain_errors_classify_themselves() {
        assert_eq!(
            CartsServiceError::AlreadyInCart.class(),
            ErrorClass::Conflict
        );
        assert_eq!(
            OrdersServiceError::EmptyCart.class(),
            ErrorClass::Validation
        );
    }

    #[test]
    fn status_codes_follow_the_taxonomy() {
        assert_eq!(ErrorClass::Validation.http_status(), 400);
        assert_eq!(ErrorClass::NotFound.http_status(), 404);
        assert_eq!(ErrorClass::Conflict.http_status(), 409);
        assert_eq!(ErrorClass::InsufficientStock.http_status(), 400);
        assert_eq!(ErrorClass::Authorization.http_status(), 403);
        assert_eq!(ErrorClass::Internal.http_status(), 500);
    }
}
