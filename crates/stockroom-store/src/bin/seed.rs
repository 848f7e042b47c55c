//! # Demo Data Seeder
//!
//! Fills a data directory with categories, items and a little history so the
//! shell has something to show.
//!
//! ## Usage
//! ```bash
//! # Seed ./stockroom_data (default)
//! cargo run -p stockroom-store --bin seed
//!
//! # Specify the data directory
//! cargo run -p stockroom-store --bin seed -- --dir ./data
//!
//! # Only the first N items per category
//! cargo run -p stockroom-store --bin seed -- --per-category 3
//! ```
//!
//! Every item gets an ideal level of 10-40 and a threshold of a quarter of
//! that. Some items start below their threshold so the low-stock counter is
//! not zero, and a few stock movements are applied to populate the history.

use std::env;

use stockroom_core::{ItemUpdate, NewCategory, NewItem};
use stockroom_store::{FileStorage, InventoryStore};

/// Categories with their items, in both languages the UI ships with.
const CATALOG: &[(&str, &[&str])] = &[
    (
        "ציוד בטיחות",
        &[
            "כפפות ניטריל",
            "משקפי מגן",
            "Ear plugs",
            "Hard hat",
            "Hi-vis vest",
            "First aid kit",
        ],
    ),
    (
        "Electrical",
        &[
            "Fuse 10A",
            "Cable ties",
            "Electrical tape",
            "Wago connectors",
            "Extension cord",
            "AA batteries",
        ],
    ),
    (
        "כלי עבודה",
        &[
            "מברג פיליפס",
            "Adjustable wrench",
            "Utility knife blades",
            "Drill bits 6mm",
            "Measuring tape",
        ],
    ),
    (
        "Consumables",
        &[
            "WD-40",
            "Paper towels",
            "Duct tape",
            "Zip bags",
            "Marker pens",
            "Cleaning wipes",
        ],
    ),
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut dir = String::from("./stockroom_data");
    let mut per_category: usize = usize::MAX;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" | "-d" => {
                if i + 1 < args.len() {
                    dir = args[i + 1].clone();
                    i += 1;
                }
            }
            "--per-category" | "-n" => {
                if i + 1 < args.len() {
                    per_category = args[i + 1].parse().unwrap_or(usize::MAX);
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Stockroom Demo Data Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --dir <PATH>          Data directory (default: ./stockroom_data)");
                println!("  -n, --per-category <N>    Items per category (default: all)");
                println!("  -h, --help                Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("Stockroom Demo Data Seeder");
    println!("==========================");
    println!("Data directory: {}", dir);
    println!();

    let storage = FileStorage::open(&dir)?;
    let mut store = InventoryStore::load(storage)?;

    if store.total_items() > 0 || store.category_count() > 0 {
        println!("⚠ Data directory already has {} items", store.total_items());
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the directory to regenerate.");
        return Ok(());
    }

    store.set_actor("seed");

    let mut seeded = 0usize;
    for (category_idx, (category_name, names)) in CATALOG.iter().enumerate() {
        let category = store.add_category(NewCategory::named(*category_name))?;
        println!("✓ Category {}", category.name);

        for (item_idx, name) in names.iter().take(per_category).enumerate() {
            let seed = category_idx * 10 + item_idx;
            let item = store.add_item(demo_item(name, &category.id, seed))?;
            seeded += 1;

            // a few movements so the history view is not empty
            if seed % 3 == 0 {
                store.adjust_stock(&item.id, 5)?;
            }
            if seed % 4 == 0 {
                store.adjust_stock(&item.id, -2)?;
            }
            if seed % 5 == 0 {
                store.update_item(
                    &item.id,
                    ItemUpdate {
                        name: Some(format!("{} *", item.name)),
                        ..Default::default()
                    },
                )?;
            }
        }
    }

    let stats = store.stats();
    println!();
    println!("✓ Seeded {} items in {} categories", seeded, stats.category_count);
    println!("  Low stock: {}", stats.low_stock_count);
    println!("  History entries: {}", store.history().len());
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds an item with deterministic, varied levels.
fn demo_item(name: &str, category: &str, seed: usize) -> NewItem {
    let ideal = 10 + ((seed * 7) % 31) as i64;
    let threshold = ideal / 4;
    // every third item starts at or under its threshold
    let current = if seed % 3 == 1 {
        threshold
    } else {
        threshold + 1 + ((seed * 13) as i64 % (ideal - threshold))
    };

    NewItem {
        name: Some(name.to_string()),
        category: Some(category.to_string()),
        current_stock: Some(current.min(ideal)),
        ideal_stock: Some(ideal),
        threshold: Some(threshold),
    }
}
