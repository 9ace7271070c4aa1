//! # Seed Data Generator
//!
//! Populates the database with the default admin user and the sample
//! inventory, skipping anything already present.
//!
//! ## Usage
//! ```bash
//! cargo run -p bodega-server --bin seed
//!
//! # Specify database path
//! DATABASE_PATH=./data/bodega.db cargo run -p bodega-server --bin seed
//! ```

use std::env;

use anyhow::Result;

use bodega_core::Role;
use bodega_db::{Database, DbConfig, DbError, NewProduct};
use bodega_server::auth::hash_password;

/// (name, barcode, price_cents, stock, category)
const SAMPLE_PRODUCTS: &[(&str, &str, i64, i64, &str)] = &[
    ("Rice (1kg)", "7901234567890", 5500, 50, "Staples"),
    ("Instant Noodles", "7901234567891", 1200, 100, "Food"),
    ("Coca Cola 350ml", "7901234567892", 2500, 30, "Beverages"),
    ("Shampoo Sachet", "7901234567893", 850, 200, "Personal Care"),
    ("Bread Loaf", "7901234567894", 4500, 15, "Food"),
    ("Cooking Oil 1L", "7901234567895", 8500, 25, "Cooking"),
    ("Sugar 1kg", "7901234567896", 6000, 30, "Staples"),
    ("Coffee 3-in-1", "7901234567897", 700, 150, "Beverages"),
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().init();

    let path = env::var("DATABASE_PATH").unwrap_or_else(|_| "./bodega.db".to_string());
    let db = Database::new(DbConfig::new(&path)).await?;

    if db.users().find_by_username("admin").await?.is_none() {
        let password_hash = hash_password("admin123")?;
        db.users()
            .create("admin", &password_hash, Role::Admin)
            .await?;
        println!("Created default admin user (username: admin, password: admin123)");
    } else {
        println!("Admin user already exists, skipping");
    }

    let mut inserted = 0;
    for (name, barcode, price_cents, stock, category) in SAMPLE_PRODUCTS {
        let product = NewProduct {
            name: (*name).to_string(),
            barcode: Some((*barcode).to_string()),
            price_cents: *price_cents,
            stock: *stock,
            category: Some((*category).to_string()),
            description: None,
        };

        match db.products().create(&product).await {
            Ok(_) => inserted += 1,
            // Already seeded on a previous run
            Err(DbError::UniqueViolation { .. }) => {}
            Err(e) => return Err(e.into()),
        }
    }
    println!("Seeded {} sample products", inserted);

    db.close().await;
    Ok(())
}
