//! # Seed Data Generator
//!
//! Populates the database with sample reviews for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p bistro-db --bin seed
//!
//! # Specify database path
//! cargo run -p bistro-db --bin seed -- --db ./data/bistro.db
//! ```
//!
//! Generated reviews cover each sample menu item with a spread of ratings so
//! the menu page's rating sort and per-item summaries have something to show,
//! plus one delivered order so the tracking and history pages aren't empty.

use std::env;

use chrono::Utc;

use bistro_core::cart::{Cart, LineItem};
use bistro_core::checkout::DeliveryDetails;
use bistro_core::pricing::PricingConfig;
use bistro_core::review::Review;
use bistro_core::types::{OrderRecord, OrderStatus, OrderType, PaymentMethod, PaymentSummary};
use bistro_db::{order_key, Database, DbConfig};

/// (item_id, author, rating, comment) per sample review.
const SAMPLE_REVIEWS: &[(&str, &str, i64, &str)] = &[
    ("margherita", "Mario", 5, "Best Margherita outside Naples."),
    ("margherita", "Luigi", 4, "Great crust, could use more basil."),
    ("margherita", "Peach", 5, "Simple and perfect."),
    ("carbonara", "Toad", 5, "Properly made, no cream in sight."),
    ("carbonara", "Daisy", 4, "Generous guanciale."),
    ("insalata", "Rosalina", 3, "Fresh but a bit plain."),
    ("tiramisu", "Wario", 5, "Dangerously good."),
    ("tiramisu", "Waluigi", 2, "Too much coffee for my taste."),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bistro_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Bistro Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bistro_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Bistro Seed Data Generator");
    println!("=============================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.reviews().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} reviews", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Inserting sample reviews...");

    let mut inserted = 0;
    for (item_id, author, rating, comment) in SAMPLE_REVIEWS {
        let review = Review::new(*item_id, *author, *rating, *comment)?;
        db.reviews().insert(&review).await?;
        inserted += 1;
    }

    println!("✓ Inserted {} reviews", inserted);

    let order = sample_order();
    db.storage()
        .put_json(&order_key(&order.order_number), &order)
        .await?;
    println!("✓ Inserted sample order {}", order.order_number);

    Ok(())
}

/// A delivered order from a regular.
fn sample_order() -> OrderRecord {
    let mut cart = Cart::new();
    cart.add(LineItem::new("margherita", "Pizza Margherita", 1500).with_quantity(2));
    cart.add(LineItem::new("tiramisu", "Tiramisu", 650));

    OrderRecord {
        order_number: format!("ORD{}", Utc::now().timestamp_millis()),
        items: cart.items.clone(),
        delivery: DeliveryDetails {
            order_type: OrderType::Delivery,
            first_name: "Mario".to_string(),
            last_name: "Rossi".to_string(),
            email: "mario@example.com".to_string(),
            phone: "0123456789".to_string(),
            address: "Via Roma 1".to_string(),
            city: "Milano".to_string(),
            postal_code: "20121".to_string(),
            country: "IT".to_string(),
            delivery_time: "asap".to_string(),
            instructions: "Ring twice.".to_string(),
        },
        payment: PaymentSummary::for_method(PaymentMethod::Cash),
        totals: cart.totals(&PricingConfig::default()),
        status: OrderStatus::Delivered,
        created_at: Utc::now(),
    }
}
