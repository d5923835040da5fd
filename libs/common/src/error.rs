//! Custom error types for the common library
//!
//! This module defines store-level error types that can be used
//! throughout the application.

use thiserror::Error;

/// Custom error type for store operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// A seed record failed validation and was not inserted
    #[error("Invalid seed record: {0}")]
    InvalidSeed(String),

    /// A write referenced a row that does not exist
    #[error("Missing row: {0}")]
    MissingRow(String),

    /// A write violated a uniqueness constraint
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unexpected internal store fault
    #[error("Store fault: {0}")]
    Internal(String),
}

/// Type alias for Result with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
