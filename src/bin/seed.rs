//! Seed script for development — writes a small sample catalog and rating log.
//!
//! Usage: `cargo run --bin seed [target_dir]` (defaults to `data/`).

use std::path::{Path, PathBuf};

use product_insight::models::product::ProductRecord;
use product_insight::models::rating::RatingRecord;

const PRODUCTS: &[(&str, &str, &str, f64)] = &[
    ("1001", "Electric Kettle 1.7L Stainless Steel", "Kitchen Appliances", 349_000.0),
    ("1002", "Ceramic Coffee Mug 350ml", "Kitchenware", 59_000.0),
    ("1003", "LED Desk Lamp with USB Charging Port", "Lighting", 289_000.0),
    ("1004", "Cotton Bath Towel Set", "Bath", 199_000.0),
    ("1005", "Non-stick Frying Pan 26cm", "Kitchenware", 259_000.0),
    ("1006", "Smart Wi-Fi Plug", "Electronics", 149_000.0),
];

const RATINGS: &[(&str, &str, i64)] = &[
    ("u01", "1001", 5),
    ("u01", "1002", 4),
    ("u01", "1005", 5),
    ("u02", "1001", 5),
    ("u02", "1003", 3),
    ("u03", "1001", 4),
    ("u03", "1004", 5),
    ("u04", "1002", 2),
    ("u04", "1006", 1),
    ("u05", "1005", 5),
];

fn main() -> anyhow::Result<()> {
    let target: PathBuf = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "data".to_string())
        .into();
    std::fs::create_dir_all(&target)?;

    println!("=== Product Insight Seed Script ===");

    seed_products(&target.join("products.csv"))?;
    seed_ratings(&target.join("ratings.csv"))?;

    println!("\n=== Seed complete! ===");
    println!("PRODUCTS_PATH={}", target.join("products.csv").display());
    println!("RATINGS_PATH={}", target.join("ratings.csv").display());

    Ok(())
}

fn seed_products(path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for &(id, name, category, price) in PRODUCTS {
        writer.serialize(ProductRecord::new(id, name, category, price))?;
    }
    writer.flush()?;
    println!("[done] Wrote {} products to {}", PRODUCTS.len(), path.display());
    Ok(())
}

fn seed_ratings(path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for &(user, product, rating) in RATINGS {
        writer.serialize(RatingRecord::new(user, product, rating))?;
    }
    writer.flush()?;
    println!("[done] Wrote {} ratings to {}", RATINGS.len(), path.display());
    Ok(())
}
