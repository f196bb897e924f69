//! # Menu Item Repository
//!
//! Storage for the menu items that orders refer to.
//!
//! Menu management (editing, retiring dishes) belongs to another part of
//! the application. This repository provides what the order store needs:
//! inserting items and resolving them by id through [`MenuItemLookup`].

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use crate::repository::MenuItemLookup;
use bistro_core::validation::validate_required;
use bistro_core::{MenuItem, Money};

const MENU_ITEM_COLUMNS: &str = "id, name, price_cents, created_at";

/// Repository for menu item database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.menu_items();
///
/// let pizza = repo.create("Margherita", Money::from_cents(1150)).await?;
/// let found = repo.get_by_id(&pizza.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct MenuItemRepository {
    pool: SqlitePool,
}

impl MenuItemRepository {
    /// Creates a new MenuItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuItemRepository { pool }
    }

    /// Gets a menu item by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<MenuItem>> {
        let item = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Lists all menu items by name.
    pub async fn list(&self) -> DbResult<Vec<MenuItem>> {
        let items = sqlx::query_as::<_, MenuItem>(&format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items ORDER BY name, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts menu items.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM menu_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Inserts a menu item as given (id and timestamp included).
    pub async fn insert(&self, item: &MenuItem) -> DbResult<MenuItem> {
        debug!(id = %item.id, name = %item.name, "Inserting menu item");

        validate_required("name", &item.name)?;

        sqlx::query(
            r#"
            INSERT INTO menu_items (id, name, price_cents, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&item.id)
        .bind(&item.name)
        .bind(item.price_cents)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(item.clone())
    }

    /// Creates a menu item with a generated ID.
    pub async fn create(&self, name: &str, price: Money) -> DbResult<MenuItem> {
        let item = MenuItem {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            price_cents: price.cents(),
            created_at: Utc::now(),
        };

        self.insert(&item).await
    }

    /// Fetches every menu item whose id is in `ids`.
    pub async fn find_by_ids(&self, ids: &[String]) -> DbResult<Vec<MenuItem>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id IN ("
        ));
        let mut separated = query.separated(", ");
        for id in ids {
            separated.push_bind(id.as_str());
        }
        separated.push_unseparated(")");

        let items = query
            .build_query_as::<MenuItem>()
            .fetch_all(&self.pool)
            .await?;

        debug!(requested = ids.len(), found = items.len(), "Resolved menu items");
        Ok(items)
    }
}

#[async_trait]
impl MenuItemLookup for MenuItemRepository {
    async fn find_by_ids(&self, ids: &[String]) -> DbResult<Vec<MenuItem>> {
        MenuItemRepository::find_by_ids(self, ids).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
