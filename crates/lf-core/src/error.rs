//! # AppError
//!
//! Centralized error handling for the lost & found portal.
//! Only two things can actually fail here: a submission missing a required
//! field, and the host refusing to persist the slot.

use thiserror::Error;

use crate::models::RequiredField;

/// The primary error type for all lf-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required form field was blank; names the first one in form order.
    #[error("validation error: please provide {0}")]
    ValidationError(RequiredField),

    /// The store slot could not be written.
    #[error("storage error: {0}")]
    Storage(String),

    /// Anything else an adapter reports.
    #[error("internal service error: {0}")]
    Internal(String),
}

impl AppError {
    /// The offending field for validation failures.
    pub fn field(&self) -> Option<RequiredField> {
        match self {
            AppError::ValidationError(field) => Some(*field),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

/// A specialized Result type for portal logic.
pub type Result<T> = std::result::Result<T, AppError>;
