//! Error types for the bookstore data layer
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! The taxonomy separates addressing failures (the caller asked for a resource
//! the routing table does not know), input failures (the caller supplied values
//! that break a validation rule), and storage-level failures.
//!
//! Note that a failed row insert is *not* represented here: the provider
//! reports it as an absent id so callers can distinguish "not saved" from a
//! validation rejection (see `BookProvider::insert`).

use thiserror::Error;

/// Result type alias using our StoreError type
pub type Result<T> = std::result::Result<T, StoreError>;

/// Main error type for bookstore-core
#[derive(Error, Debug)]
pub enum StoreError {
    // ===== Addressing Errors =====

    /// Address does not resolve to any known resource shape
    #[error("Cannot resolve unknown address {0}")]
    InvalidAddress(String),

    /// Address resolved, but the operation is not supported for it
    /// (e.g. insert against an item address)
    #[error("{operation} is not supported for {address}")]
    InvalidArgument {
        operation: &'static str,
        address: String,
    },

    // ===== Validation Errors =====

    /// Required field missing or a field fails a validation rule.
    /// Raised before any storage mutation; storage is untouched.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ===== Storage Errors =====

    /// Generic database error
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Database schema migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// File I/O error (database directory creation, etc.)
    #[error("File I/O error: {0}")]
    FileIoError(String),

    // ===== External Library Errors =====

    /// Database driver error from sqlx
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<std::num::ParseIntError> for StoreError {
    fn from(err: std::num::ParseIntError) -> Self {
        StoreError::InvalidInput(format!("Failed to parse integer: {}", err))
    }
}

impl From<std::num::ParseFloatError> for StoreError {
    fn from(err: std::num::ParseFloatError) -> Self {
        StoreError::InvalidInput(format!("Failed to parse float: {}", err))
    }
}

impl StoreError {
    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        StoreError::InvalidInput(message.into())
    }

    /// Create an InvalidAddress error for an address string
    pub fn invalid_address<S: Into<String>>(address: S) -> Self {
        StoreError::InvalidAddress(address.into())
    }

    /// Create an InvalidArgument error for an unsupported operation/address pair
    pub fn unsupported<S: Into<String>>(operation: &'static str, address: S) -> Self {
        StoreError::InvalidArgument {
            operation,
            address: address.into(),
        }
    }

    /// Check if error is a caller-side validation error (bad input won't
    /// improve on retry; the UI layer should surface it to the user)
    pub fn is_validation_error(&self) -> bool {
        matches!(self, StoreError::InvalidInput(_))
    }

    /// Check if error is an addressing error
    pub fn is_address_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidAddress(_) | StoreError::InvalidArgument { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_categories() {
        let err = StoreError::invalid_input("book requires a name");
        assert!(err.is_validation_error());
        assert!(!err.is_address_error());

        let err = StoreError::invalid_address("content://nope/books");
        assert!(err.is_address_error());

        let err = StoreError::unsupported("Insertion", "content://com.example.bookstore/books/3");
        assert!(err.is_address_error());
        assert_eq!(
            err.to_string(),
            "Insertion is not supported for content://com.example.bookstore/books/3"
        );
    }

    #[test]
    fn test_parse_errors_map_to_invalid_input() {
        let parse_err = "abc".parse::<i64>().unwrap_err();
        let err: StoreError = parse_err.into();
        assert!(err.is_validation_error());
    }
}
