//! # bistro-core: Pure Domain Logic for Bistro Orders
//!
//! Domain types and pure functions for the order-management feature. No
//! database, network or file access happens here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Orders Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          Callers (HTTP API, routing) - outside this workspace   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bistro-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌────────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ date_range │  │ validation│  │   │
//! │  │   │   Order   │  │   Money   │  │ DateRange  │  │  schema   │  │   │
//! │  │   │ MenuItem  │  │           │  │  Filter    │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └────────────┘  └───────────┘  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    bistro-db (Database Layer)                   │   │
//! │  │            SQLite queries, migrations, OrderRepository          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, MenuItem, OrderStatus, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`date_range`] - `created_at` filter fragments for reports
//! - [`validation`] - Schema validation
//! - [`error`] - Validation error type
//!
//! ## Example Usage
//!
//! ```rust
//! use bistro_core::{DateRangeFilter, Money, Order, PricedLine};
//!
//! let total = Order::calc_total(&[PricedLine::new(Money::from_cents(1150), 2)]).unwrap();
//! assert_eq!(total.to_string(), "$23.00");
//!
//! let filter = DateRangeFilter::parse(Some("2024-01-01"), None).unwrap();
//! assert!(!filter.is_empty());
//! ```

pub mod date_range;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use date_range::{CreatedAtBounds, DateRangeFilter};
pub use error::{AmountOverflow, ValidationError};
pub use money::Money;
pub use types::*;
