//! The module contains the error the engine can throw.
//!
//! The errors are:
//!
//! - [`UserNotFound`] thrown when a cost or report references an unknown user.
//! - [`InvalidCost`] thrown when a cost would break the stored invariants.
//! - [`Database`] wraps whatever the store client reports.
//!
//!  [`UserNotFound`]: EngineError::UserNotFound
//!  [`InvalidCost`]: EngineError::InvalidCost
//!  [`Database`]: EngineError::Database
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("User not found")]
    UserNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Invalid cost: {0}")]
    InvalidCost(String),
    #[error("Invalid category: {0}")]
    InvalidCategory(String),
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserNotFound(a), Self::UserNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidUser(a), Self::InvalidUser(b)) => a == b,
            (Self::InvalidCost(a), Self::InvalidCost(b)) => a == b,
            (Self::InvalidCategory(a), Self::InvalidCategory(b)) => a == b,
            (Self::InvalidPeriod(a), Self::InvalidPeriod(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
