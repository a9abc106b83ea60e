//! Fixture database shared by the unit tests.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

const SCHEMA: &str = r#"
CREATE TABLE restaurants (
    id INTEGER PRIMARY KEY,
    name TEXT,
    cuisine TEXT,
    isVeg TEXT,
    rating REAL,
    priceForTwo INTEGER,
    location TEXT,
    hasOutdoorSeating TEXT,
    isLuxury TEXT
);
CREATE TABLE dishes (
    id INTEGER PRIMARY KEY,
    name TEXT,
    price INTEGER,
    rating REAL,
    isVeg TEXT
);
"#;

const SEED: &str = r#"
INSERT INTO restaurants (id, name, cuisine, isVeg, rating, priceForTwo, location, hasOutdoorSeating, isLuxury) VALUES
    (1, 'Spice Kitchen', 'Indian', 'true', 4.5, 1500, 'MG Road', 'true', 'false'),
    (2, 'Olive Bistro', 'Italian', 'false', 4.1, 2000, 'Jubilee Hills', 'false', 'true'),
    (3, 'Green Leaf', 'Indian', 'true', 4.8, 800, 'Koramangala', 'false', 'false'),
    (4, 'Sushi Bay', 'Japanese', 'false', 3.9, 2500, 'Bandra', 'true', 'true');
INSERT INTO dishes (id, name, price, rating, isVeg) VALUES
    (1, 'Paneer Butter Masala', 300, 4.5, 'true'),
    (2, 'Chicken Tikka', 400, 4.7, 'false'),
    (3, 'Veggie Burger', 150, 4.0, 'true'),
    (4, 'Butter Chicken', 350, 4.6, 'false');
"#;

/// A single-connection in-memory database with the schema only.
pub async fn empty_pool() -> SqlitePool {
    // Each in-memory connection is its own database, so keep exactly one alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("open in-memory sqlite");

    sqlx::raw_sql(SCHEMA)
        .execute(&pool)
        .await
        .expect("create fixture schema");
    pool
}

/// [`empty_pool`] seeded with four restaurants and four dishes.
pub async fn fixture_pool() -> SqlitePool {
    let pool = empty_pool().await;
    sqlx::raw_sql(SEED)
        .execute(&pool)
        .await
        .expect("seed fixture rows");
    pool
}
