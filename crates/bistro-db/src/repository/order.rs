//! # Order Repository
//!
//! Database operations for orders and their lines, plus the reporting
//! queries built on them.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── create(NewOrder) → Order { status: Pending }                   │
//! │         (order row + order_items rows in one transaction)              │
//! │                                                                         │
//! │  2. READ                                                               │
//! │     └── get_all / get_one / get_status / get_by_status → OrderDetail   │
//! │         (menu items resolved through MenuItemLookup)                   │
//! │                                                                         │
//! │  3. UPDATE                                                             │
//! │     └── update(id, OrderPatch) → Order (post-update state)             │
//! │                                                                         │
//! │  4. REMOVE                                                             │
//! │     └── remove(id) → id  (order_items cascade)                         │
//! │                                                                         │
//! │  REPORT: get_total_sales(range) → Σ menu price × quantity              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::{Executor, QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::MenuItemLookup;
use bistro_core::validation::{validate_new_order, validate_order};
use bistro_core::{
    DateRangeFilter, MenuItem, Money, NewOrder, Order, OrderDetail, OrderLine, OrderPatch,
    OrderStatus, PricedLine,
};

const ORDER_COLUMNS: &str = "id, name, address, phone, status, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: String,
    name: String,
    address: String,
    phone: String,
    status: OrderStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self, items: Vec<OrderLine>) -> Order {
        Order {
            id: self.id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            items,
            status: self.status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct OrderLineRow {
    order_id: String,
    menu_item_id: String,
    quantity: i64,
}

/// Repository for order database operations.
///
/// Holds the pool and the menu item lookup it resolves lines with.
#[derive(Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
    menu: Arc<dyn MenuItemLookup>,
}

impl std::fmt::Debug for OrderRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderRepository")
            .field("pool", &self.pool)
            .finish_non_exhaustive()
    }
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool, menu: Arc<dyn MenuItemLookup>) -> Self {
        OrderRepository { pool, menu }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns every order with its menu items resolved, oldest first.
    pub async fn get_all(&self) -> DbResult<Vec<OrderDetail>> {
        debug!("Fetching all orders");

        let orders = self.load_orders(None, &DateRangeFilter::all()).await?;
        self.resolve(orders).await
    }

    /// Returns orders with exactly `status` created within `range`.
    pub async fn get_status(
        &self,
        status: OrderStatus,
        range: &DateRangeFilter,
    ) -> DbResult<Vec<OrderDetail>> {
        debug!(
            status = %status,
            start = ?range.start(),
            end = ?range.end(),
            "Fetching orders by status and date range"
        );

        let orders = self.load_orders(Some(status), range).await?;
        self.resolve(orders).await
    }

    /// Returns orders with exactly `status`, regardless of when they were
    /// created.
    pub async fn get_by_status(&self, status: OrderStatus) -> DbResult<Vec<OrderDetail>> {
        debug!(status = %status, "Fetching orders by status");

        let orders = self
            .load_orders(Some(status), &DateRangeFilter::all())
            .await?;
        self.resolve(orders).await
    }

    /// Gets an order by ID with its menu items resolved.
    ///
    /// ## Returns
    /// * `Ok(None)` - No order with that ID
    pub async fn get_one(&self, id: &str) -> DbResult<Option<OrderDetail>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            debug!(id = %id, "Order not found");
            return Ok(None);
        };

        let items = fetch_lines(&self.pool, &[row.id.clone()])
            .await?
            .remove(&row.id)
            .unwrap_or_default();

        let mut details = self.resolve(vec![row.into_order(items)]).await?;
        Ok(details.pop())
    }

    /// Counts orders.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Total sales of all orders created within `range`, whatever their
    /// status.
    ///
    /// Each line is priced at its menu item's current price. Lines whose
    /// menu item no longer exists add nothing. Zero when nothing matches.
    ///
    /// ## Returns
    /// * `Err(DbError::AmountOverflow)` - The total doesn't fit in `Money`
    pub async fn get_total_sales(&self, range: &DateRangeFilter) -> DbResult<Money> {
        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT oi.order_id, oi.menu_item_id, oi.quantity \
             FROM order_items oi \
             INNER JOIN orders o ON o.id = oi.order_id \
             WHERE 1 = 1",
        );
        push_created_at_bounds(&mut query, "o.created_at", range);

        let lines: Vec<OrderLineRow> = query.build_query_as().fetch_all(&self.pool).await?;

        let mut ids: Vec<String> = lines.iter().map(|l| l.menu_item_id.clone()).collect();
        ids.sort();
        ids.dedup();
        let menu = self.menu_by_id(&ids).await?;

        let priced: Vec<PricedLine> = lines
            .iter()
            .filter_map(|line| {
                menu.get(&line.menu_item_id)
                    .map(|item| PricedLine::new(item.price(), line.quantity))
            })
            .collect();

        let total = Order::calc_total(&priced)?;

        debug!(
            start = ?range.start(),
            end = ?range.end(),
            lines = lines.len(),
            total = %total,
            "Computed total sales"
        );
        Ok(total)
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Validates and stores a new order.
    ///
    /// ## Returns
    /// The stored order with its generated ID and defaults applied.
    pub async fn create(&self, new_order: NewOrder) -> DbResult<Order> {
        validate_new_order(&new_order)?;

        let order = new_order.into_order(Uuid::new_v4().to_string(), Utc::now());

        debug!(id = %order.id, lines = order.items.len(), "Creating order");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, name, address, phone, status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&order.id)
        .bind(&order.name)
        .bind(&order.address)
        .bind(&order.phone)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        insert_lines(&mut tx, &order.id, &order.items).await?;

        tx.commit().await?;

        Ok(order)
    }

    /// Applies a partial update.
    ///
    /// ## Returns
    /// * `Ok(Order)` - The order after the update
    /// * `Err(DbError::NotFound)` - Order doesn't exist
    /// * `Err(DbError::Validation)` - The result would break the schema
    pub async fn update(&self, id: &str, patch: OrderPatch) -> DbResult<Order> {
        debug!(id = %id, "Updating order");

        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Order", id))?;

        let items = fetch_lines(&mut *tx, &[row.id.clone()])
            .await?
            .remove(&row.id)
            .unwrap_or_default();
        let mut order = row.into_order(items);

        let replaces_items = patch.items.is_some();
        patch.apply(&mut order, Utc::now());
        validate_order(&order)?;

        sqlx::query(
            r#"
            UPDATE orders SET
                name = ?2,
                address = ?3,
                phone = ?4,
                status = ?5,
                updated_at = ?6
            WHERE id = ?1
            "#,
        )
        .bind(&order.id)
        .bind(&order.name)
        .bind(&order.address)
        .bind(&order.phone)
        .bind(order.status)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        if replaces_items {
            sqlx::query("DELETE FROM order_items WHERE order_id = ?1")
                .bind(&order.id)
                .execute(&mut *tx)
                .await?;
            insert_lines(&mut tx, &order.id, &order.items).await?;
        }

        tx.commit().await?;

        Ok(order)
    }

    /// Deletes an order and its lines.
    ///
    /// ## Returns
    /// * `Ok(id)` - ID of the deleted order
    /// * `Err(DbError::NotFound)` - Order doesn't exist
    pub async fn remove(&self, id: &str) -> DbResult<String> {
        debug!(id = %id, "Removing order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(id.to_string())
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    async fn load_orders(
        &self,
        status: Option<OrderStatus>,
        range: &DateRangeFilter,
    ) -> DbResult<Vec<Order>> {
        let mut query = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE 1 = 1"
        ));
        if let Some(status) = status {
            query.push(" AND status = ").push_bind(status);
        }
        push_created_at_bounds(&mut query, "created_at", range);
        query.push(" ORDER BY created_at, rowid");

        let rows: Vec<OrderRow> = query.build_query_as().fetch_all(&self.pool).await?;

        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let mut lines = fetch_lines(&self.pool, &ids).await?;

        let orders: Vec<Order> = rows
            .into_iter()
            .map(|row| {
                let items = lines.remove(&row.id).unwrap_or_default();
                row.into_order(items)
            })
            .collect();

        debug!(count = orders.len(), "Loaded orders");
        Ok(orders)
    }

    async fn menu_by_id(&self, ids: &[String]) -> DbResult<HashMap<String, MenuItem>> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let items = self.menu.find_by_ids(ids).await?;
        Ok(items.into_iter().map(|item| (item.id.clone(), item)).collect())
    }

    async fn resolve(&self, orders: Vec<Order>) -> DbResult<Vec<OrderDetail>> {
        let mut ids: Vec<String> = orders.iter().flat_map(Order::menu_item_ids).collect();
        ids.sort();
        ids.dedup();

        let menu = self.menu_by_id(&ids).await?;

        Ok(orders
            .into_iter()
            .map(|order| OrderDetail::resolve(order, &menu))
            .collect())
    }
}

/// Appends inclusive `created_at` bounds to a query that already has a
/// `WHERE` clause.
fn push_created_at_bounds(
    query: &mut QueryBuilder<'_, Sqlite>,
    column: &str,
    range: &DateRangeFilter,
) {
    if let Some(start) = range.start() {
        query.push(format!(" AND {column} >= ")).push_bind(start);
    }
    if let Some(end) = range.end() {
        query.push(format!(" AND {column} <= ")).push_bind(end);
    }
}

/// Loads the lines of the given orders, grouped by order id, each group in
/// the order the lines were added.
async fn fetch_lines<'e, E>(
    executor: E,
    order_ids: &[String],
) -> DbResult<HashMap<String, Vec<OrderLine>>>
where
    E: Executor<'e, Database = Sqlite>,
{
    if order_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let mut query = QueryBuilder::<Sqlite>::new(
        "SELECT order_id, menu_item_id, quantity FROM order_items WHERE order_id IN (",
    );
    let mut separated = query.separated(", ");
    for id in order_ids {
        separated.push_bind(id.as_str());
    }
    separated.push_unseparated(") ORDER BY order_id, position");

    let rows: Vec<OrderLineRow> = query.build_query_as().fetch_all(executor).await?;

    let mut grouped: HashMap<String, Vec<OrderLine>> = HashMap::new();
    for row in rows {
        grouped
            .entry(row.order_id)
            .or_default()
            .push(OrderLine::new(row.menu_item_id, row.quantity));
    }

    Ok(grouped)
}

async fn insert_lines(
    conn: &mut SqliteConnection,
    order_id: &str,
    lines: &[OrderLine],
) -> DbResult<()> {
    for (position, line) in lines.iter().enumerate() {
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, position, menu_item_id, quantity)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(order_id)
        .bind(position as i64)
        .bind(&line.item)
        .bind(line.quantity)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use async_trait::async_trait;
    use chrono::TimeZone;

    async fn setup() -> (Database, OrderRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let orders = db.orders();
        (db, orders)
    }

    async fn dish(db: &Database, name: &str, cents: i64) -> MenuItem {
        db.menu_items()
            .create(name, Money::from_cents(cents))
            .await
            .unwrap()
    }

    fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    fn customer() -> NewOrder {
        NewOrder::new("Ada Lovelace", "12 St James's Square", "555-0100")
    }

    #[tokio::test]
    async fn test_create_then_get_one_roundtrip() {
        let (db, orders) = setup().await;
        let pizza = dish(&db, "Margherita", 1150).await;
        let wine = dish(&db, "House Red", 800).await;

        let body = customer()
            .item(&pizza.id, 2)
            .item(&wine.id, 1)
            .status(OrderStatus::Confirmed);
        let created = orders.create(body.clone()).await.unwrap();

        let fetched = orders.get_one(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.name, body.name);
        assert_eq!(fetched.address, body.address);
        assert_eq!(fetched.phone, body.phone);
        assert_eq!(fetched.status, OrderStatus::Confirmed);
        assert_eq!(fetched.created_at, created.created_at);
        assert_eq!(fetched.updated_at, created.updated_at);
        assert_eq!(fetched.items.len(), 2);
        assert_eq!(fetched.items[0].item, Some(pizza));
        assert_eq!(fetched.items[0].quantity, 2);
        assert_eq!(fetched.items[1].item, Some(wine));
        assert_eq!(fetched.items[1].quantity, 1);
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let (_db, orders) = setup().await;

        let created = orders.create(customer()).await.unwrap();

        assert!(Uuid::parse_str(&created.id).is_ok());
        assert_eq!(created.status, OrderStatus::Pending);
        assert_eq!(created.created_at, created.updated_at);
        assert!(created.items.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_blank_fields() {
        let (_db, orders) = setup().await;

        let err = orders
            .create(NewOrder::new("Ada", "  ", "555-0100"))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Validation(_)));
        assert_eq!(orders.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_get_one_missing_is_none() {
        let (_db, orders) = setup().await;
        let missing = Uuid::new_v4().to_string();
        assert!(orders.get_one(&missing).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_all_resolves_items_oldest_first() {
        let (db, orders) = setup().await;
        let soup = dish(&db, "Minestrone", 650).await;
        let retired = Uuid::new_v4().to_string();

        orders
            .create(customer().item(&soup.id, 1).created_at(at(2024, 2, 1)))
            .await
            .unwrap();
        orders
            .create(
                NewOrder::new("Charles Babbage", "1 Dorset St", "555-0199")
                    .item(&retired, 4)
                    .created_at(at(2024, 1, 1)),
            )
            .await
            .unwrap();

        let all = orders.get_all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Charles Babbage");
        assert_eq!(all[0].items[0].item, None);
        assert_eq!(all[0].items[0].quantity, 4);
        assert_eq!(all[1].items[0].item, Some(soup));
    }

    #[tokio::test]
    async fn test_get_by_status_matches_exactly() {
        let (_db, orders) = setup().await;
        orders.create(customer()).await.unwrap();
        orders
            .create(customer().status(OrderStatus::Delivered))
            .await
            .unwrap();
        orders
            .create(customer().status(OrderStatus::Delivered))
            .await
            .unwrap();

        let delivered = orders.get_by_status(OrderStatus::Delivered).await.unwrap();
        assert_eq!(delivered.len(), 2);
        assert!(delivered.iter().all(|o| o.status == OrderStatus::Delivered));

        let cancelled = orders.get_by_status(OrderStatus::Cancelled).await.unwrap();
        assert!(cancelled.is_empty());
    }

    #[tokio::test]
    async fn test_get_status_applies_inclusive_date_range() {
        let (_db, orders) = setup().await;
        for day in [1, 15, 31] {
            orders
                .create(customer().created_at(Utc.with_ymd_and_hms(2024, 1, day, 0, 0, 0).unwrap()))
                .await
                .unwrap();
        }
        orders
            .create(customer().created_at(at(2024, 2, 10)))
            .await
            .unwrap();
        orders
            .create(
                customer()
                    .status(OrderStatus::Cancelled)
                    .created_at(at(2024, 1, 10)),
            )
            .await
            .unwrap();

        let january = DateRangeFilter::parse(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        let pending = orders
            .get_status(OrderStatus::Pending, &january)
            .await
            .unwrap();
        assert_eq!(pending.len(), 3);
        assert!(pending.iter().all(|o| o.status == OrderStatus::Pending));

        let from_mid = DateRangeFilter::parse(Some("2024-01-15"), None).unwrap();
        let later = orders
            .get_status(OrderStatus::Pending, &from_mid)
            .await
            .unwrap();
        assert_eq!(later.len(), 3);

        let unbounded = orders
            .get_status(OrderStatus::Pending, &DateRangeFilter::all())
            .await
            .unwrap();
        assert_eq!(unbounded.len(), 4);

        let cancelled = orders
            .get_status(OrderStatus::Cancelled, &january)
            .await
            .unwrap();
        assert_eq!(cancelled.len(), 1);
    }

    #[tokio::test]
    async fn test_total_sales_with_no_orders_is_zero() {
        let (_db, orders) = setup().await;
        let total = orders
            .get_total_sales(&DateRangeFilter::all())
            .await
            .unwrap();
        assert_eq!(total, Money::zero());
    }

    #[tokio::test]
    async fn test_total_sales_single_line() {
        let (db, orders) = setup().await;
        let bread = dish(&db, "Focaccia", 10).await;
        orders.create(customer().item(&bread.id, 2)).await.unwrap();

        let total = orders
            .get_total_sales(&DateRangeFilter::all())
            .await
            .unwrap();
        assert_eq!(total.cents(), 20);
    }

    #[tokio::test]
    async fn test_total_sales_filters_by_date_not_status() {
        let (db, orders) = setup().await;
        let pasta = dish(&db, "Carbonara", 1400).await;
        let salad = dish(&db, "Caprese", 900).await;

        orders
            .create(
                customer()
                    .item(&pasta.id, 1)
                    .item(&salad.id, 2)
                    .created_at(at(2024, 1, 5)),
            )
            .await
            .unwrap();
        orders
            .create(
                customer()
                    .item(&pasta.id, 3)
                    .status(OrderStatus::Cancelled)
                    .created_at(at(2024, 1, 20)),
            )
            .await
            .unwrap();
        orders
            .create(customer().item(&salad.id, 10).created_at(at(2024, 3, 1)))
            .await
            .unwrap();

        let january = DateRangeFilter::parse(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        let total = orders.get_total_sales(&january).await.unwrap();
        assert_eq!(total.cents(), 1400 + 2 * 900 + 3 * 1400);

        let nothing = DateRangeFilter::parse(Some("2030-01-01"), None).unwrap();
        assert!(orders.get_total_sales(&nothing).await.unwrap().is_zero());
    }

    #[tokio::test]
    async fn test_total_sales_skips_missing_menu_items() {
        let (db, orders) = setup().await;
        let coffee = dish(&db, "Espresso", 250).await;
        orders
            .create(
                customer()
                    .item(&coffee.id, 2)
                    .item(Uuid::new_v4().to_string(), 7),
            )
            .await
            .unwrap();

        let total = orders
            .get_total_sales(&DateRangeFilter::all())
            .await
            .unwrap();
        assert_eq!(total.cents(), 500);
    }

    #[tokio::test]
    async fn test_total_sales_overflow_is_an_error() {
        let (db, orders) = setup().await;
        let pizza = dish(&db, "Margherita", 1150).await;
        let created = orders
            .create(customer().item(&pizza.id, i64::MAX / 100))
            .await
            .unwrap();

        let err = orders
            .get_total_sales(&DateRangeFilter::all())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::AmountOverflow(_)));

        let detail = orders.get_one(&created.id).await.unwrap().unwrap();
        assert!(detail.total().is_err());
    }

    #[tokio::test]
    async fn test_total_sales_overflow_across_orders_is_an_error() {
        let (db, orders) = setup().await;
        let coffee = dish(&db, "Espresso", 250).await;
        for _ in 0..2 {
            orders
                .create(customer().item(&coffee.id, i64::MAX / 250 - 1))
                .await
                .unwrap();
        }

        let err = orders
            .get_total_sales(&DateRangeFilter::all())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::AmountOverflow(_)));
    }

    #[tokio::test]
    async fn test_update_is_partial_and_returns_new_state() {
        let (db, orders) = setup().await;
        let pizza = dish(&db, "Diavola", 1300).await;
        let created = orders
            .create(customer().item(&pizza.id, 1).created_at(at(2024, 1, 1)))
            .await
            .unwrap();

        let updated = orders
            .update(&created.id, OrderPatch::status(OrderStatus::Confirmed))
            .await
            .unwrap();

        assert_eq!(updated.status, OrderStatus::Confirmed);
        assert_eq!(updated.name, created.name);
        assert_eq!(updated.items, created.items);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);

        let fetched = orders.get_one(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.status, OrderStatus::Confirmed);
        assert_eq!(fetched.updated_at, updated.updated_at);
        assert_eq!(fetched.items.len(), 1);
    }

    #[tokio::test]
    async fn test_update_replaces_items() {
        let (db, orders) = setup().await;
        let pizza = dish(&db, "Quattro Formaggi", 1350).await;
        let beer = dish(&db, "Peroni", 500).await;
        let created = orders
            .create(customer().item(&pizza.id, 1))
            .await
            .unwrap();

        let patch = OrderPatch {
            phone: Some("555-0123".to_string()),
            items: Some(vec![OrderLine::new(&beer.id, 6)]),
            ..OrderPatch::default()
        };
        let updated = orders.update(&created.id, patch).await.unwrap();

        assert_eq!(updated.phone, "555-0123");
        assert_eq!(updated.items, vec![OrderLine::new(&beer.id, 6)]);

        let fetched = orders.get_one(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.items.len(), 1);
        assert_eq!(fetched.items[0].item, Some(beer));
        assert_eq!(fetched.total().unwrap().cents(), 3000);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_db, orders) = setup().await;
        let err = orders
            .update(&Uuid::new_v4().to_string(), OrderPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_rejects_blank_name_and_keeps_row() {
        let (_db, orders) = setup().await;
        let created = orders.create(customer()).await.unwrap();

        let patch = OrderPatch {
            name: Some(String::new()),
            ..OrderPatch::default()
        };
        let err = orders.update(&created.id, patch).await.unwrap_err();
        assert!(matches!(err, DbError::Validation(_)));

        let fetched = orders.get_one(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, created.name);
    }

    #[tokio::test]
    async fn test_remove_deletes_order_and_lines() {
        let (db, orders) = setup().await;
        let pizza = dish(&db, "Marinara", 900).await;
        let created = orders
            .create(customer().item(&pizza.id, 2))
            .await
            .unwrap();

        let removed = orders.remove(&created.id).await.unwrap();
        assert_eq!(removed, created.id);
        assert!(orders.get_one(&created.id).await.unwrap().is_none());

        let lines: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(lines, 0);
        assert_eq!(db.menu_items().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_is_not_found() {
        let (_db, orders) = setup().await;
        let err = orders
            .remove(&Uuid::new_v4().to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Order"));
    }

    /// Menu served from memory, standing in for an external menu service.
    struct FixedMenu(Vec<MenuItem>);

    #[async_trait]
    impl MenuItemLookup for FixedMenu {
        async fn find_by_ids(&self, ids: &[String]) -> DbResult<Vec<MenuItem>> {
            Ok(self
                .0
                .iter()
                .filter(|item| ids.contains(&item.id))
                .cloned()
                .collect())
        }
    }

    #[tokio::test]
    async fn test_resolves_through_injected_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let gelato = MenuItem {
            id: Uuid::new_v4().to_string(),
            name: "Gelato".to_string(),
            price_cents: 450,
            created_at: Utc::now(),
        };
        let orders = db.orders_with_lookup(Arc::new(FixedMenu(vec![gelato.clone()])));

        let created = orders
            .create(customer().item(&gelato.id, 3))
            .await
            .unwrap();

        let fetched = orders.get_one(&created.id).await.unwrap().unwrap();
        assert_eq!(fetched.items[0].item, Some(gelato));

        let total = orders
            .get_total_sales(&DateRangeFilter::all())
            .await
            .unwrap();
        assert_eq!(total.cents(), 1350);
    }
}
