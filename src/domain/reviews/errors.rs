//! Reviews service errors.

use thiserror::Error;

use crate::errors::{ErrorClass, ErrorClassified};

#[derive(Debug, Error)]
pub enum ReviewsServiceError {
    #[error("Rating must be between 1 and 5")]
    InvalidRating,

    #[error("Feedback must be 2 to 500 characters and not purely numeric")]
    InvalidFeedback,

    #[error("You have already given a rating for this product")]
    DuplicateRating,

    #[error("No purchase of this product found for this user")]
    PurchaseNotVerified,

    #[error("Rating not found for this user and product")]
    NotFound,
}

impl ErrorClassified for ReviewsServiceError {
    fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidRating | Self::InvalidFeedback => ErrorClass::Validation,
            Self::DuplicateRating => ErrorClass::Conflict,
            Self::PurchaseNotVerified => ErrorClass::Authorization,
            Self::NotFound => ErrorClass::NotFound,
        }
    }
}
