/**
 * Database Operations for Events and Attendance
 *
 * This module provides database operations for events and the attendee
 * relation in SQLite.
 *
 * # Ordering
 *
 * - Events are listed by start time, earliest first
 * - Attendees are listed in the order they joined
 *
 * Start times are stored as fixed-width RFC 3339 UTC strings so that text
 * ordering in SQL matches chronological ordering.
 */

use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::{SqliteConnection, SqliteExecutor, SqlitePool};

use crate::shared::{Event, User};

#[derive(sqlx::FromRow)]
struct EventRow {
    id: String,
    name: String,
    location: String,
    start_time: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct AttendeeRow {
    event_id: String,
    id: String,
    name: String,
    email: String,
}

impl EventRow {
    fn into_event(self, attendees: Vec<User>) -> Event {
        Event {
            id: self.id,
            name: self.name,
            location: self.location,
            start_time: self.start_time,
            attendees,
        }
    }
}

/// Fixed-width UTC timestamp used for every stored time column
///
/// Nanosecond precision, so distinct start times never share a sort key.
pub(crate) fn store_time(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn group_attendees(rows: Vec<AttendeeRow>) -> HashMap<String, Vec<User>> {
    let mut grouped: HashMap<String, Vec<User>> = HashMap::new();
    for row in rows {
        grouped.entry(row.event_id).or_default().push(User {
            id: row.id,
            name: row.name,
            email: row.email,
        });
    }
    grouped
}

fn attach_attendees(rows: Vec<EventRow>, mut attendees: HashMap<String, Vec<User>>) -> Vec<Event> {
    rows.into_iter()
        .map(|row| {
            let list = attendees.remove(&row.id).unwrap_or_default();
            row.into_event(list)
        })
        .collect()
}

/// Load all events with their attendees
///
/// # Returns
/// Events ordered by start time ascending
pub async fn list_events(pool: &SqlitePool) -> Result<Vec<Event>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EventRow>(
        r#"
        SELECT id, name, location, start_time
        FROM events
        ORDER BY start_time ASC, created_at ASC, id ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    let attendees = sqlx::query_as::<_, AttendeeRow>(
        r#"
        SELECT ea.event_id, u.id, u.name, u.email
        FROM event_attendees ea
        JOIN users u ON u.id = ea.user_id
        ORDER BY ea.rowid ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(attach_attendees(rows, group_attendees(attendees)))
}

/// Load a single event with its attendees
///
/// # Returns
/// Event or None if not found
pub async fn get_event(pool: &SqlitePool, event_id: &str) -> Result<Option<Event>, sqlx::Error> {
    let row = sqlx::query_as::<_, EventRow>(
        r#"
        SELECT id, name, location, start_time
        FROM events
        WHERE id = ?1
        "#,
    )
    .bind(event_id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(row) => {
            let attendees = attendees_for(pool, event_id).await?;
            Ok(Some(row.into_event(attendees)))
        }
        None => Ok(None),
    }
}

/// Insert a new event with no attendees
///
/// # Arguments
/// * `executor` - Pool, connection or open transaction
/// * `id` - Event ID
/// * `name` - Event name
/// * `location` - Where it takes place
/// * `start_time` - When it starts
pub async fn insert_event<'e>(
    executor: impl SqliteExecutor<'e>,
    id: &str,
    name: &str,
    location: &str,
    start_time: DateTime<Utc>,
) -> Result<Event, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO events (id, name, location, start_time, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(location)
    .bind(store_time(&start_time))
    .bind(store_time(&Utc::now()))
    .execute(executor)
    .await?;

    Ok(Event {
        id: id.to_string(),
        name: name.to_string(),
        location: location.to_string(),
        start_time,
        attendees: Vec::new(),
    })
}

/// Record a user as an attendee of an event
///
/// # Returns
/// `true` if the user was added, `false` if they were already attending
pub async fn add_attendee<'e>(
    executor: impl SqliteExecutor<'e>,
    event_id: &str,
    user_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO event_attendees (event_id, user_id, joined_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (event_id, user_id) DO NOTHING
        "#,
    )
    .bind(event_id)
    .bind(user_id)
    .bind(store_time(&Utc::now()))
    .execute(executor)
    .await?;

    Ok(result.rows_affected() == 1)
}

/// Attendees of an event in join order
pub async fn attendees_for(pool: &SqlitePool, event_id: &str) -> Result<Vec<User>, sqlx::Error> {
    let rows = sqlx::query_as::<_, AttendeeRow>(
        r#"
        SELECT ea.event_id, u.id, u.name, u.email
        FROM event_attendees ea
        JOIN users u ON u.id = ea.user_id
        WHERE ea.event_id = ?1
        ORDER BY ea.rowid ASC
        "#,
    )
    .bind(event_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| User {
            id: row.id,
            name: row.name,
            email: row.email,
        })
        .collect())
}

/// Events a user is attending, with their full attendee lists
pub async fn events_for_user(pool: &SqlitePool, user_id: &str) -> Result<Vec<Event>, sqlx::Error> {
    let rows = sqlx::query_as::<_, EventRow>(
        r#"
        SELECT e.id, e.name, e.location, e.start_time
        FROM events e
        JOIN event_attendees ea ON ea.event_id = e.id
        WHERE ea.user_id = ?1
        ORDER BY e.start_time ASC, e.created_at ASC, e.id ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    let attendees = sqlx::query_as::<_, AttendeeRow>(
        r#"
        SELECT ea.event_id, u.id, u.name, u.email
        FROM event_attendees ea
        JOIN users u ON u.id = ea.user_id
        WHERE ea.event_id IN (SELECT event_id FROM event_attendees WHERE user_id = ?1)
        ORDER BY ea.rowid ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(attach_attendees(rows, group_attendees(attendees)))
}

/// Number of stored events
pub async fn count_events(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM events")
        .fetch_one(pool)
        .await
}

/// Remove all events, attendance and users
pub async fn clear_all(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    let mut tx = pool.begin().await?;
    delete_all(&mut *tx).await?;
    tx.commit().await
}

/// Delete every row on an open connection, usually inside a caller's transaction
pub async fn delete_all(conn: &mut SqliteConnection) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM event_attendees").execute(&mut *conn).await?;
    sqlx::query("DELETE FROM events").execute(&mut *conn).await?;
    sqlx::query("DELETE FROM users").execute(&mut *conn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::create_user;
    use crate::backend::server::config::load_database;
    use chrono::Duration;
    use pretty_assertions::assert_eq;

    async fn setup() -> SqlitePool {
        let pool = load_database("sqlite::memory:").await.unwrap();
        create_user(&pool, "user1", "Alice", "alice@example.com", "hash").await.unwrap();
        create_user(&pool, "user2", "Bob", "bob@example.com", "hash").await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_events_ordered_by_start_time() {
        let pool = setup().await;
        let now = Utc::now();
        insert_event(&pool, "late", "Late", "Here", now + Duration::days(3)).await.unwrap();
        insert_event(&pool, "early", "Early", "Here", now + Duration::hours(1)).await.unwrap();
        insert_event(&pool, "middle", "Middle", "Here", now + Duration::days(1)).await.unwrap();

        let ids: Vec<String> = list_events(&pool).await.unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["early", "middle", "late"]);
    }

    #[tokio::test]
    async fn test_add_attendee_is_idempotent() {
        let pool = setup().await;
        insert_event(&pool, "e1", "Meetup", "Cafe", Utc::now()).await.unwrap();

        assert!(add_attendee(&pool, "e1", "user1").await.unwrap());
        assert!(!add_attendee(&pool, "e1", "user1").await.unwrap());

        let attendees = attendees_for(&pool, "e1").await.unwrap();
        assert_eq!(attendees.len(), 1);
    }

    #[tokio::test]
    async fn test_attendees_keep_join_order() {
        let pool = setup().await;
        insert_event(&pool, "e1", "Meetup", "Cafe", Utc::now()).await.unwrap();
        add_attendee(&pool, "e1", "user2").await.unwrap();
        add_attendee(&pool, "e1", "user1").await.unwrap();

        let event = get_event(&pool, "e1").await.unwrap().unwrap();
        assert_eq!(event.attendee_names(), vec!["Bob".to_string(), "Alice".to_string()]);
    }

    #[tokio::test]
    async fn test_get_missing_event() {
        let pool = setup().await;
        assert!(get_event(&pool, "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_events_for_user() {
        let pool = setup().await;
        insert_event(&pool, "e1", "One", "A", Utc::now()).await.unwrap();
        insert_event(&pool, "e2", "Two", "B", Utc::now() + Duration::days(1)).await.unwrap();
        add_attendee(&pool, "e1", "user2").await.unwrap();
        add_attendee(&pool, "e2", "user1").await.unwrap();
        add_attendee(&pool, "e2", "user2").await.unwrap();

        let bobs = events_for_user(&pool, "user2").await.unwrap();
        assert_eq!(bobs.len(), 2);
        assert_eq!(bobs[1].attendees.len(), 2);

        let alices = events_for_user(&pool, "user1").await.unwrap();
        assert_eq!(alices.len(), 1);
        assert_eq!(alices[0].id, "e2");
    }

    #[tokio::test]
    async fn test_clear_all() {
        let pool = setup().await;
        insert_event(&pool, "e1", "One", "A", Utc::now()).await.unwrap();
        add_attendee(&pool, "e1", "user1").await.unwrap();

        clear_all(&pool).await.unwrap();
        assert_eq!(count_events(&pool).await.unwrap(), 0);
    }

    #[test]
    fn test_store_time_is_fixed_width() {
        let a = "2030-01-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let b = "2030-01-01T10:00:00.5Z".parse::<DateTime<Utc>>().unwrap();
        assert_eq!(store_time(&a).len(), store_time(&b).len());
        assert!(store_time(&a) < store_time(&b));
        assert_eq!(store_time(&a), "2030-01-01T10:00:00.000000000Z");
    }

    #[tokio::test]
    async fn test_sub_millisecond_start_times_keep_order() {
        let pool = setup().await;
        let later = "2030-01-01T10:00:00.0009Z".parse::<DateTime<Utc>>().unwrap();
        let earlier = "2030-01-01T10:00:00.0001Z".parse::<DateTime<Utc>>().unwrap();
        insert_event(&pool, "a", "Later", "Here", later).await.unwrap();
        insert_event(&pool, "b", "Earlier", "Here", earlier).await.unwrap();

        let events = list_events(&pool).await.unwrap();
        let ids: Vec<_> = events.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);

        let stored = get_event(&pool, "b").await.unwrap().unwrap();
        assert_eq!(stored.start_time, earlier);
    }
}
