//! Custom error types for tripsplit
//!
//! This module defines the error hierarchy for the application using thiserror.
//! The settlement computation itself never fails on bad data (it reports
//! warnings instead); these errors cover the CRUD, storage and CLI layers.

use thiserror::Error;

use crate::models::currency::NormalizeError;

/// The main error type for tripsplit operations
#[derive(Error, Debug)]
pub enum TripError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Duplicate entity errors
    #[error("{entity_type} already exists: {identifier}")]
    Duplicate {
        entity_type: &'static str,
        identifier: String,
    },

    /// Member still referenced by an unsettled expense
    #[error("Member '{member}' is still part of {count} unsettled expense(s)")]
    MemberInUse { member: String, count: usize },

    /// Currency conversion errors
    #[error("Currency error: {0}")]
    Currency(#[from] NormalizeError),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl TripError {
    /// Create a "not found" error for members
    pub fn member_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Member",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for TripError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for TripError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for tripsplit operations
pub type TripResult<T> = Result<T, TripError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = TripError::Config("bad rate".into());
        assert_eq!(err.to_string(), "Configuration error: bad rate");
    }

    #[test]
    fn test_not_found_error() {
        let err = TripError::member_not_found("mina");
        assert_eq!(err.to_string(), "Member not found: mina");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_member_in_use_error() {
        let err = TripError::MemberInUse {
            member: "Mina".into(),
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Member 'Mina' is still part of 2 unsettled expense(s)"
        );
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let trip_err: TripError = io_err.into();
        assert!(matches!(trip_err, TripError::Io(_)));
    }

    #[test]
    fn test_from_normalize_error() {
        let err: TripError = NormalizeError::UnrecognizedCurrency("JPY".into()).into();
        assert_eq!(err.to_string(), "Currency error: unrecognized currency tag 'JPY'");
    }
}
