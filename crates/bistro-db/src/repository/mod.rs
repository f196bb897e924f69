//! # Repository Module
//!
//! Database repository implementations for Bistro orders.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  Caller                                                                │
//! │       │  db.orders().get_total_sales(&filter)                          │
//! │       ▼                                                                 │
//! │  OrderRepository ───── resolves items via ─────► dyn MenuItemLookup    │
//! │  ├── get_all / get_one                            (MenuItemRepository  │
//! │  ├── get_status / get_by_status                    by default)         │
//! │  ├── get_total_sales                                                   │
//! │  └── create / update / remove                                          │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`OrderRepository`](order::OrderRepository) - Order CRUD and reports
//! - [`MenuItemRepository`](menu_item::MenuItemRepository) - Menu item storage

use async_trait::async_trait;
use bistro_core::MenuItem;

use crate::error::DbResult;

pub mod menu_item;
pub mod order;

/// Resolves menu items by id.
///
/// The order store depends on this capability instead of joining the menu
/// table itself; whoever owns the menu supplies the implementation.
#[async_trait]
pub trait MenuItemLookup: Send + Sync {
    /// Returns the menu items among `ids` that exist, in any order.
    /// Unknown ids are skipped, not reported as errors.
    async fn find_by_ids(&self, ids: &[String]) -> DbResult<Vec<MenuItem>>;
}
