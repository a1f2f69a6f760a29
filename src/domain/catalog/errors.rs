//! Catalog service errors.

use thiserror::Error;

use crate::errors::{ErrorClass, ErrorClassified};

#[derive(Debug, Error)]
pub enum CatalogServiceError {
    #[error("Product already exists")]
    AlreadyExists,

    #[error("Product not found")]
    NotFound,

    #[error("Category not found")]
    CategoryNotFound,
}

impl ErrorClassified for CatalogServiceError {
    fn class(&self) -> ErrorClass {
        match self {
            Self::AlreadyExists => ErrorClass::Conflict,
            Self::NotFound | Self::CategoryNotFound => ErrorClass::NotFound,
        }
    }
}
