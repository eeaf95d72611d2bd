//! The module contains the errors the engine can return.
//!
//! The errors are:
//!
//! - [`InvalidRange`] returned when a date range is malformed or inverted.
//! - [`UnmappedPartner`] returned when a partner has no contribution/withdrawal
//!   categories configured.
//! - [`KeyNotFound`] returned when a referenced item is absent.
//!
//!  [`InvalidRange`]: EngineError::InvalidRange
//!  [`UnmappedPartner`]: EngineError::UnmappedPartner
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid range: {0}")]
    InvalidRange(String),
    #[error("Partner \"{0}\" has no capital account mapping")]
    UnmappedPartner(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("\"{0}\" already present!")]
    ExistingKey(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidRange(a), Self::InvalidRange(b)) => a == b,
            (Self::UnmappedPartner(a), Self::UnmappedPartner(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::ExistingKey(a), Self::ExistingKey(b)) => a == b,
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidEntry(a), Self::InvalidEntry(b)) => a == b,
            (Self::InvalidName(a), Self::InvalidName(b)) => a == b,
            (Self::InvalidSeed(a), Self::InvalidSeed(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
