//! Users service errors.

use thiserror::Error;

use crate::errors::{ErrorClass, ErrorClassified};

#[derive(Debug, Error)]
pub enum UsersServiceError {
    #[error("a user with this email already exists")]
    AlreadyExists,

    #[error("User not found")]
    NotFound,
}

impl ErrorClassified for UsersServiceError {
    fn class(&self) -> ErrorClass {
        match self {
            Self::AlreadyExists => ErrorClass::Conflict,
            Self::NotFound => ErrorClass::NotFound,
        }
    }
}
