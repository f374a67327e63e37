//! Database test fixtures and utilities
//!
//! Every fixture is a private in-memory SQLite store with the migrations
//! applied, so tests never share state.

use sqlx::SqlitePool;

use eventure::backend::seed::seed_demo_data;
use eventure::backend::server::config::load_database;
use eventure::shared::Event;

/// Cheapest bcrypt cost, so credential checks stay fast in tests
pub const TEST_BCRYPT_COST: u32 = 4;

/// Create a migrated in-memory pool
pub async fn create_test_pool() -> SqlitePool {
    load_database("sqlite::memory:")
        .await
        .expect("Failed to create test database pool")
}

/// Test database fixture
pub struct TestDatabase {
    pool: SqlitePool,
}

impl TestDatabase {
    /// Empty, migrated store
    pub async fn new() -> Self {
        Self {
            pool: create_test_pool().await,
        }
    }

    /// Store holding the demo users and events
    pub async fn seeded() -> Self {
        let db = Self::new().await;
        seed_demo_data(&db.pool, TEST_BCRYPT_COST)
            .await
            .expect("Failed to seed test database");
        db
    }

    /// Get the database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Find a seeded event by name
    pub async fn event_named(&self, name: &str) -> Event {
        eventure::backend::events::db::list_events(&self.pool)
            .await
            .expect("Failed to list events")
            .into_iter()
            .find(|event| event.name == name)
            .unwrap_or_else(|| panic!("No event named {}", name))
    }
}
