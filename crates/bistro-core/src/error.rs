//! # Error Types
//!
//! Domain-specific error types for bistro-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bistro-core errors (this file)                                        │
//! │  ├── ValidationError  - Schema constraint violations                   │
//! │  └── AmountOverflow   - A total exceeds the i64 cent range             │
//! │                                                                         │
//! │  bistro-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                         (wraps ValidationError)                        │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → caller (API layer)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Input validation errors.
///
/// Raised before anything touches the database, when a create or update
/// body does not satisfy the order schema.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., invalid UUID, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

/// A money calculation left the range of `i64` cents.
///
/// Quantities are not bounded by the schema, so a line total or a sales
/// total can exceed what `Money` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount exceeds the representable range of cents")]
pub struct AmountOverflow;

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("phone");
        assert_eq!(err.to_string(), "phone is required");

        let err = ValidationError::invalid_format("start_date", "expected YYYY-MM-DD");
        assert_eq!(
            err.to_string(),
            "start_date has invalid format: expected YYYY-MM-DD"
        );

        let err = ValidationError::NotAllowed {
            field: "status".to_string(),
            allowed: vec!["pending".to_string(), "confirmed".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "status must be one of: [\"pending\", \"confirmed\"]"
        );
    }

    #[test]
    fn test_amount_overflow_message() {
        assert_eq!(
            AmountOverflow.to_string(),
            "amount exceeds the representable range of cents"
        );
    }
}
