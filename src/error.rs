//! Error types for Gatehouse.

use thiserror::Error;

/// Common error type for Gatehouse startup and plumbing.
///
/// Request-level failures use [`crate::auth::AuthError`]; this type covers
/// everything around it (opening the database, reading config, binding).
#[derive(Error, Debug)]
pub enum GatehouseError {
    /// Database error.
    ///
    /// Database errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Validation error for configuration or input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for GatehouseError {
    fn from(e: sqlx::Error) -> Self {
        GatehouseError::Database(e.to_string())
    }
}

/// Result type alias for Gatehouse operations.
pub type Result<T> = std::result::Result<T, GatehouseError>;
