//! The module contains the error the engine can throw.
//!
//! Validation failures ([`InvalidAmount`], [`InvalidKind`], [`MissingField`])
//! are detected before any persistence attempt. [`KeyNotFound`] covers both
//! unknown ids and rows owned by another user.
//!
//!  [`InvalidAmount`]: EngineError::InvalidAmount
//!  [`InvalidKind`]: EngineError::InvalidKind
//!  [`MissingField`]: EngineError::MissingField
//!  [`KeyNotFound`]: EngineError::KeyNotFound
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid transaction type: {0}")]
    InvalidKind(String),
    #[error("Missing field: {0}")]
    MissingField(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("serialization failed: {0}")]
    Serialization(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::InvalidAmount(a), Self::InvalidAmount(b)) => a == b,
            (Self::InvalidKind(a), Self::InvalidKind(b)) => a == b,
            (Self::MissingField(a), Self::MissingField(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::Serialization(a), Self::Serialization(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
