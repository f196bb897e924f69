//! # Domain Types
//!
//! Core domain types for Bistro orders.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                         │
//! │  │     Order       │ owns   │   OrderLine     │  refers   ┌──────────┐  │
//! │  │  ─────────────  │───────►│  ─────────────  │──────────►│ MenuItem │  │
//! │  │  id (UUID)      │  0..n  │  item (id)      │ (by id)   │ external │  │
//! │  │  name/address   │        │  quantity       │           └──────────┘  │
//! │  │  status         │        └─────────────────┘                         │
//! │  └─────────────────┘                                                    │
//! │                                                                         │
//! │  Read model: OrderDetail = Order with every line's MenuItem resolved   │
//! │  Write models: NewOrder (create body), OrderPatch (update body)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{AmountOverflow, ValidationError};
use crate::money::Money;

// =============================================================================
// Order Status
// =============================================================================

/// Where an order is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed, not yet accepted by the kitchen.
    Pending,
    /// Accepted by the kitchen.
    Confirmed,
    /// Handed to the customer.
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    /// The lowercase name used in storage and JSON.
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses the status names accepted by the schema (exact, lowercase).
impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OrderStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: OrderStatus::ALL
                    .iter()
                    .map(|status| status.as_str().to_string())
                    .collect(),
            })
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish or drink on the menu.
///
/// Menu items are owned by the menu side of the application; orders only
/// hold their ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MenuItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    pub name: String,

    /// Price in cents.
    pub price_cents: i64,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// One entry of an order: a menu item reference and how many were ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLine {
    /// Id of the referenced MenuItem.
    pub item: String,
    pub quantity: i64,
}

impl OrderLine {
    pub fn new(item: impl Into<String>, quantity: i64) -> Self {
        OrderLine {
            item: item.into(),
            quantity,
        }
    }
}

/// A price and a quantity, the input of [`Order::calc_total`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricedLine {
    pub price: Money,
    pub quantity: i64,
}

impl PricedLine {
    pub fn new(price: Money, quantity: i64) -> Self {
        PricedLine { price, quantity }
    }
}

/// A customer order as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Order {
    /// Unique identifier (UUID v4), assigned by the store.
    pub id: String,

    /// Customer name.
    pub name: String,

    /// Delivery address.
    pub address: String,

    pub phone: String,

    /// Ordered lines, in the order the customer added them.
    pub items: Vec<OrderLine>,

    pub status: OrderStatus,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Sums `price × quantity` over the given lines.
    ///
    /// Pure helper, independent of storage. Fails instead of wrapping when
    /// a line or the running total leaves the `i64` cent range.
    ///
    /// ## Example
    /// ```rust
    /// use bistro_core::{Money, Order, PricedLine};
    ///
    /// let total = Order::calc_total(&[
    ///     PricedLine::new(Money::from_cents(10), 2),
    ///     PricedLine::new(Money::from_cents(5), 3),
    /// ])?;
    /// assert_eq!(total.cents(), 35);
    /// assert!(Order::calc_total(&[])?.is_zero());
    /// # Ok::<(), bistro_core::AmountOverflow>(())
    /// ```
    pub fn calc_total(lines: &[PricedLine]) -> Result<Money, AmountOverflow> {
        lines.iter().try_fold(Money::zero(), |total, line| {
            line.price
                .checked_multiply_quantity(line.quantity)
                .and_then(|amount| total.checked_add(amount))
                .ok_or(AmountOverflow)
        })
    }

    /// Distinct menu item ids referenced by this order, first-seen order.
    pub fn menu_item_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = Vec::with_capacity(self.items.len());
        for line in &self.items {
            if !ids.contains(&line.item) {
                ids.push(line.item.clone());
            }
        }
        ids
    }
}

// =============================================================================
// Order Detail (read model)
// =============================================================================

/// An order line with its menu item resolved.
///
/// `item` is `None` when the referenced menu item no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderLineDetail {
    pub item: Option<MenuItem>,
    pub quantity: i64,
}

/// An order with every line's menu item resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderDetail {
    pub id: String,
    pub name: String,
    pub address: String,
    pub phone: String,
    pub items: Vec<OrderLineDetail>,
    pub status: OrderStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl OrderDetail {
    /// Joins an order with the menu items it references.
    pub fn resolve(order: Order, menu: &HashMap<String, MenuItem>) -> Self {
        let items = order
            .items
            .into_iter()
            .map(|line| OrderLineDetail {
                item: menu.get(&line.item).cloned(),
                quantity: line.quantity,
            })
            .collect();

        OrderDetail {
            id: order.id,
            name: order.name,
            address: order.address,
            phone: order.phone,
            items,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        }
    }

    /// Order total at current menu prices. Unresolved lines count as zero.
    pub fn total(&self) -> Result<Money, AmountOverflow> {
        let lines: Vec<PricedLine> = self
            .items
            .iter()
            .filter_map(|line| {
                line.item
                    .as_ref()
                    .map(|item| PricedLine::new(item.price(), line.quantity))
            })
            .collect();

        Order::calc_total(&lines)
    }
}

// =============================================================================
// Write Models
// =============================================================================

/// Body of a create request.
///
/// `status` defaults to pending and `created_at` to the time of insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOrder {
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewOrder {
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        NewOrder {
            name: name.into(),
            address: address.into(),
            phone: phone.into(),
            items: Vec::new(),
            status: None,
            created_at: None,
        }
    }

    /// Appends a line.
    pub fn item(mut self, menu_item_id: impl Into<String>, quantity: i64) -> Self {
        self.items.push(OrderLine::new(menu_item_id, quantity));
        self
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self
    }

    /// Builds the order to store, applying schema defaults.
    pub fn into_order(self, id: String, now: DateTime<Utc>) -> Order {
        let created_at = self.created_at.unwrap_or(now);
        Order {
            id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            items: self.items,
            status: self.status.unwrap_or_default(),
            created_at,
            updated_at: created_at,
        }
    }
}

/// Body of an update request. Absent fields are left untouched; `items`
/// replaces the whole list when present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub items: Option<Vec<OrderLine>>,
    #[serde(default)]
    pub status: Option<OrderStatus>,
}

impl OrderPatch {
    pub fn status(status: OrderStatus) -> Self {
        OrderPatch {
            status: Some(status),
            ..OrderPatch::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.address.is_none()
            && self.phone.is_none()
            && self.items.is_none()
            && self.status.is_none()
    }

    /// Applies the patch and stamps `updated_at`.
    pub fn apply(self, order: &mut Order, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            order.name = name;
        }
        if let Some(address) = self.address {
            order.address = address;
        }
        if let Some(phone) = self.phone {
            order.phone = phone;
        }
        if let Some(items) = self.items {
            order.items = items;
        }
        if let Some(status) = self.status {
            order.status = status;
        }
        order.updated_at = now;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
