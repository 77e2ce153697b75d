//! # Seed Data Generator
//!
//! Populates a database with the demo customers, products, stock and
//! pending orders.
//!
//! ## Usage
//! ```bash
//! cargo run -p orderdesk-db --bin seed
//!
//! # Specify database path
//! cargo run -p orderdesk-db --bin seed -- --db ./data/orders.db
//! ```

use std::env;

use orderdesk_db::{seed_demo_data, Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./orderdesk_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if let Some(path) = args.get(i + 1) {
                    db_path = path.clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Order Desk Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./orderdesk_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Order Desk Seed Data Generator");
    println!("=================================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    match seed_demo_data(&db).await? {
        Some(summary) => {
            println!();
            println!("✓ Customers: {}", summary.customers);
            println!("✓ Products:  {}", summary.products);
            println!("✓ Orders:    {}", summary.orders);
        }
        None => {
            println!("⚠ Database already has customers");
            println!("  Skipping seed to avoid duplicates.");
            println!("  Delete the database file to regenerate.");
        }
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
