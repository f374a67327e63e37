/**
 * Demo Data
 *
 * Resets the store to two users and three upcoming events:
 *
 * | Event | Location | Starts | Attendees |
 * |-------|----------|--------|-----------|
 * | Eventure Launch Party | Virtual Auditorium | +1 day | Alice |
 * | Community Meetup | Local Cafe | +2 days | Bob |
 * | GraphQL Deep Dive | Online Webinar | +3 days | none |
 *
 * Both users log in with `password123`.
 */

use bcrypt::hash;
use chrono::{Duration, Utc};
use sqlx::SqlitePool;

use crate::backend::auth::users::{count_users, create_user};
use crate::backend::error::BackendError;
use crate::backend::events::db::{add_attendee, count_events, delete_all, insert_event};

/// Password shared by the demo users
pub const DEMO_PASSWORD: &str = "password123";

/// Demo users as `(id, name, email)`
pub const DEMO_USERS: [(&str, &str, &str); 2] = [
    ("user1", "Alice", "alice@example.com"),
    ("user2", "Bob", "bob@example.com"),
];

/// Summary of what `seed_demo_data` wrote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub events: usize,
    pub attendees: usize,
}

/// Clear the store and write the demo users and events
///
/// Runs in one transaction: on any failure the previous contents survive.
///
/// # Arguments
/// * `pool` - Database connection pool
/// * `password_cost` - bcrypt cost for the demo password
pub async fn seed_demo_data(
    pool: &SqlitePool,
    password_cost: u32,
) -> Result<SeedSummary, BackendError> {
    let password_hash = hash(DEMO_PASSWORD, password_cost)?;

    let mut tx = pool.begin().await?;
    delete_all(&mut *tx).await?;
    tracing::debug!("Cleared existing events and users");

    for (id, name, email) in DEMO_USERS {
        create_user(&mut *tx, id, name, email, &password_hash).await?;
    }

    let now = Utc::now();
    let events = [
        ("Eventure Launch Party", "Virtual Auditorium", 1, Some("user1")),
        ("Community Meetup", "Local Cafe", 2, Some("user2")),
        ("GraphQL Deep Dive", "Online Webinar", 3, None),
    ];

    let mut attendees = 0;
    for (name, location, days, attendee) in events {
        let id = uuid::Uuid::new_v4().to_string();
        insert_event(&mut *tx, &id, name, location, now + Duration::days(days)).await?;
        if let Some(user_id) = attendee {
            if add_attendee(&mut *tx, &id, user_id).await? {
                attendees += 1;
            }
        }
    }

    tx.commit().await?;

    let summary = SeedSummary {
        users: DEMO_USERS.len(),
        events: events.len(),
        attendees,
    };
    tracing::info!(
        "Seeded {} users, {} events, {} attendees",
        summary.users,
        summary.events,
        summary.attendees
    );

    Ok(summary)
}

/// Seed only when the store holds no users and no events
///
/// # Returns
/// `true` if demo data was written
pub async fn seed_if_empty(pool: &SqlitePool, password_cost: u32) -> Result<bool, BackendError> {
    if count_users(pool).await? > 0 || count_events(pool).await? > 0 {
        tracing::debug!("Store already has data, skipping seed");
        return Ok(false);
    }

    seed_demo_data(pool, password_cost).await?;
    Ok(true)
}
