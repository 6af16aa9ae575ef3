//! Domain errors

use thiserror::Error;

/// Domain result type
pub type Result<T> = std::result::Result<T, DomainError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A raw phone number could not be parsed, or is not a valid number for the region
    #[error("Invalid phone number: {raw}")]
    InvalidNumber { raw: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid_number(raw: impl Into<String>) -> Self {
        DomainError::InvalidNumber { raw: raw.into() }
    }
}
