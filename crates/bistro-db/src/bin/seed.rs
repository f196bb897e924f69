//! # Seed Data Generator
//!
//! Populates the database with a menu and a spread of orders for
//! development, then logs a sales report over them.
//!
//! ## Usage
//! ```bash
//! # Seed 200 orders (default) into $BISTRO_DB_PATH or ./bistro.db
//! cargo run -p bistro-db --bin seed
//!
//! # Custom amount and database
//! cargo run -p bistro-db --bin seed -- --orders 1000 --db ./data/bistro.db
//! ```
//!
//! ## Generated Orders
//! - Spread over the last 90 days
//! - 1 to 4 lines each, quantities 1 to 3
//! - Status cycles through pending, confirmed, delivered, cancelled

use chrono::{Duration, Utc};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bistro_core::{DateRangeFilter, Money, NewOrder, OrderStatus};
use bistro_db::{Database, DbConfig};

/// Menu seeded before any orders: (name, price in cents).
const MENU: &[(&str, i64)] = &[
    ("Margherita", 1150),
    ("Diavola", 1300),
    ("Quattro Formaggi", 1350),
    ("Carbonara", 1400),
    ("Lasagne", 1450),
    ("Minestrone", 650),
    ("Caprese", 900),
    ("Bruschetta", 700),
    ("Tiramisu", 650),
    ("Panna Cotta", 600),
    ("Espresso", 250),
    ("House Red", 800),
];

const CUSTOMERS: &[(&str, &str)] = &[
    ("Ada Lovelace", "12 St James's Square"),
    ("Charles Babbage", "1 Dorset Street"),
    ("Grace Hopper", "1200 Navy Pentagon"),
    ("Alan Turing", "78 High Street"),
    ("Edsger Dijkstra", "27 Prinsengracht"),
];

const DEFAULT_ORDER_COUNT: usize = 200;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut config = DbConfig::from_env();
    let mut count = DEFAULT_ORDER_COUNT;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--orders" | "-n" => {
                if let Some(raw) = args.get(i + 1) {
                    count = raw.parse().unwrap_or_else(|_| {
                        warn!(value = %raw, "Invalid --orders, using default");
                        DEFAULT_ORDER_COUNT
                    });
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if let Some(path) = args.get(i + 1) {
                    config.database_path = path.into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bistro Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -n, --orders <N>   Number of orders to generate (default: 200)");
                println!("  -d, --db <PATH>    Database file path (default: $BISTRO_DB_PATH or ./bistro.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => warn!(arg = %other, "Ignoring unknown argument"),
        }
        i += 1;
    }

    let db = Database::new(config).await?;

    let existing = db.orders().count().await?;
    if existing > 0 {
        warn!(
            existing,
            "Database already has orders, skipping seed. Delete the database file to regenerate."
        );
        db.close().await;
        return Ok(());
    }

    let mut menu = Vec::with_capacity(MENU.len());
    for (name, cents) in MENU {
        menu.push(db.menu_items().create(name, Money::from_cents(*cents)).await?);
    }
    info!(items = menu.len(), "Seeded menu");

    let orders = db.orders();
    let now = Utc::now();
    let start = std::time::Instant::now();
    let mut generated = 0;

    for seed in 0..count {
        let (name, address) = CUSTOMERS[seed % CUSTOMERS.len()];
        let mut order = NewOrder::new(name, address, format!("555-{:04}", seed % 10_000))
            .status(OrderStatus::ALL[seed % OrderStatus::ALL.len()])
            .created_at(now - Duration::hours(((seed * 37) % (90 * 24)) as i64));

        for line in 0..=(seed % 4) {
            let item = &menu[(seed * 7 + line * 3) % menu.len()];
            order = order.item(&item.id, 1 + ((seed + line) % 3) as i64);
        }

        if let Err(e) = orders.create(order).await {
            warn!(error = %e, "Failed to insert order");
            continue;
        }
        generated += 1;

        if generated % 100 == 0 {
            info!(generated, "Generating orders");
        }
    }

    info!(generated, elapsed = ?start.elapsed(), "Seeded orders");

    let last_week = DateRangeFilter::new(Some(now - Duration::days(7)), Some(now));
    let week_sales = orders.get_total_sales(&last_week).await?;
    let all_sales = orders.get_total_sales(&DateRangeFilter::all()).await?;
    info!(last_7_days = %week_sales, all_time = %all_sales, "Sales report");

    for status in OrderStatus::ALL {
        let matching = orders.get_by_status(status).await?;
        info!(status = %status, count = matching.len(), "Orders by status");
    }

    db.close().await;
    Ok(())
}

/// Initializes the tracing subscriber.
///
/// `RUST_LOG` overrides the default filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bistro=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
