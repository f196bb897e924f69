//! # Validation Module
//!
//! Schema validation for order bodies.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Field types, status enum, quantity present                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── name / address / phone must not be blank                          │
//! │  └── ids must be UUIDs                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK on status                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here goes beyond the schema: quantities are not range-checked and
//! referenced menu items are not required to exist.
//!
//! ## Usage
//! ```rust
//! use bistro_core::validation::validate_new_order;
//! use bistro_core::NewOrder;
//!
//! let body = NewOrder::new("Ada", "1 Main St", "555-0100");
//! assert!(validate_new_order(&body).is_ok());
//!
//! let blank = NewOrder::new("Ada", "", "555-0100");
//! assert!(validate_new_order(&blank).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{NewOrder, Order, OrderLine};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejects empty or whitespace-only values of a required string field.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(())
}

/// Validates a UUID string.
///
/// ## Example
/// ```rust
/// use bistro_core::validation::validate_uuid;
///
/// assert!(validate_uuid("id", "550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_uuid("id", "not-a-uuid").is_err());
/// ```
pub fn validate_uuid(field: &str, id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::required(field));
    }

    uuid::Uuid::parse_str(id)
        .map_err(|_| ValidationError::invalid_format(field, "must be a valid UUID"))?;

    Ok(())
}

fn validate_lines(lines: &[OrderLine]) -> ValidationResult<()> {
    for line in lines {
        validate_uuid("items.item", &line.item)?;
    }

    Ok(())
}

/// Validates a create body against the order schema.
pub fn validate_new_order(order: &NewOrder) -> ValidationResult<()> {
    validate_required("name", &order.name)?;
    validate_required("address", &order.address)?;
    validate_required("phone", &order.phone)?;
    validate_lines(&order.items)
}

/// Validates a full order, e.g. after an update was applied.
pub fn validate_order(order: &Order) -> ValidationResult<()> {
    validate_required("name", &order.name)?;
    validate_required("address", &order.address)?;
    validate_required("phone", &order.phone)?;
    validate_lines(&order.items)
}
