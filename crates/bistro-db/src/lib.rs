//! # bistro-db: Order Store for Bistro
//!
//! Data access for restaurant orders: CRUD, status and date range queries,
//! and the total sales report. SQLite storage through sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bistro Data Flow                                 │
//! │                                                                         │
//! │  Host (HTTP handler, CLI, job)                                         │
//! │       │  DateRangeFilter::parse(start, end)                            │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     bistro-db                                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ OrderRepo     │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ MenuItemRepo  │    │ 001_initial  │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite (BISTRO_DB_PATH, default ./bistro.db)                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Configuration, connection pool, repository access
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Order and menu item repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bistro_core::{DateRangeFilter, NewOrder, OrderStatus};
//! use bistro_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::from_env()).await?;
//!
//! let order = db
//!     .orders()
//!     .create(NewOrder::new("Ada", "12 Main St", "555-0100").item(&pizza_id, 2))
//!     .await?;
//!
//! let january = DateRangeFilter::parse(Some("2024-01-01"), Some("2024-01-31"))?;
//! let sales = db.orders().get_total_sales(&january).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::menu_item::MenuItemRepository;
pub use repository::order::OrderRepository;
pub use repository::MenuItemLookup;
