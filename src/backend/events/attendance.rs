/**
 * Attendance and Event Publishing
 *
 * The two event mutations. Both are transport-agnostic: the GraphQL layer
 * resolves the viewer and hands in the shared registry and feed.
 *
 * # joinEvent
 *
 * 1. Reject anonymous callers before touching the store
 * 2. Look up the event (NotFound if absent)
 * 3. Return it unchanged if the caller already attends
 * 4. Otherwise insert the attendee edge; if that changed state, reload the
 *    event and publish `attendeeUpdate` to the membership feed and the
 *    event's room
 *
 * # createEvent
 *
 * Authenticated callers publish a new event; every connected socket is told
 * with `eventCreated`.
 */

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::backend::error::BackendError;
use crate::backend::events::db;
use crate::backend::middleware::auth::AuthenticatedUser;
use crate::backend::realtime::{publish_attendee_update, AttendeeUpdate, MembershipFeed, RoomRegistry};
use crate::shared::{Event, ServerMessage};

/// Fields of a new event
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
}

/// Record the viewer as an attendee of an event
///
/// Calling this twice is safe: the second call returns the same event and
/// publishes nothing.
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `rooms` - Room registry, for the room-scoped `attendeeUpdate`
/// * `feed` - Membership feed
/// * `viewer` - Caller, `None` if anonymous
/// * `event_id` - Event to join
///
/// # Returns
///
/// The event with its current attendee list
///
/// # Errors
///
/// * `Unauthorized` - If there is no viewer, for any event id
/// * `NotFound` - If the event does not exist
pub async fn join_event(
    pool: &SqlitePool,
    rooms: &RoomRegistry,
    feed: &MembershipFeed,
    viewer: Option<&AuthenticatedUser>,
    event_id: &str,
) -> Result<Event, BackendError> {
    let viewer = viewer.ok_or_else(|| {
        tracing::warn!("Anonymous joinEvent attempt for {}", event_id);
        BackendError::unauthorized("You must be logged in to join an event")
    })?;

    let event = db::get_event(pool, event_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Event", event_id))?;

    if event.has_attendee(&viewer.user_id) {
        tracing::debug!("{} already attends {}", viewer.email, event_id);
        return Ok(event);
    }

    let added = db::add_attendee(pool, event_id, &viewer.user_id).await?;

    let event = db::get_event(pool, event_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Event", event_id))?;

    if added {
        tracing::info!("{} joined event {} ({})", viewer.email, event.name, event.id);

        let update = AttendeeUpdate {
            event_id: event.id.clone(),
            attendees: event.attendees.clone(),
        };
        rooms.broadcast(&event.id, update.to_message()).await;
        publish_attendee_update(feed, update);
    }

    Ok(event)
}

/// Check the fields of a new event
pub fn validate_new_event(input: &NewEvent) -> Result<(), BackendError> {
    if input.name.trim().is_empty() {
        return Err(BackendError::validation("name", "Event name must not be empty"));
    }
    if input.location.trim().is_empty() {
        return Err(BackendError::validation("location", "Location must not be empty"));
    }
    Ok(())
}

/// Publish a new event
///
/// # Errors
///
/// * `Unauthorized` - If there is no viewer
/// * `Validation` - If name or location is blank
pub async fn create_event(
    pool: &SqlitePool,
    rooms: &RoomRegistry,
    viewer: Option<&AuthenticatedUser>,
    input: NewEvent,
) -> Result<Event, BackendError> {
    let viewer = viewer.ok_or_else(|| BackendError::unauthorized("You must be logged in to create an event"))?;
    validate_new_event(&input)?;

    let id = uuid::Uuid::new_v4().to_string();
    let event = db::insert_event(
        pool,
        &id,
        input.name.trim(),
        input.location.trim(),
        input.start_time,
    )
    .await?;

    tracing::info!("{} created event {} ({})", viewer.email, event.name, event.id);

    let notified = rooms
        .broadcast_all(ServerMessage::EventCreated {
            event: event.clone(),
        })
        .await;
    tracing::debug!("eventCreated sent to {} connections", notified);

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::users::create_user;
    use crate::backend::realtime::membership_feed;
    use crate::backend::server::config::load_database;
    use assert_matches::assert_matches;

    async fn setup() -> (SqlitePool, AuthenticatedUser) {
        let pool = load_database("sqlite::memory:").await.unwrap();
        create_user(&pool, "user1", "Alice", "alice@example.com", "hash")
            .await
            .unwrap();
        db::insert_event(&pool, "e1", "GraphQL Deep Dive", "Online Webinar", Utc::now())
            .await
            .unwrap();
        let alice = AuthenticatedUser {
            user_id: "user1".to_string(),
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
        };
        (pool, alice)
    }

    #[tokio::test]
    async fn test_join_requires_viewer() {
        let (pool, _) = setup().await;
        let rooms = RoomRegistry::new();
        let feed = membership_feed();

        let existing = join_event(&pool, &rooms, &feed, None, "e1").await;
        let missing = join_event(&pool, &rooms, &feed, None, "nope").await;

        assert_matches!(existing, Err(BackendError::Unauthorized { .. }));
        assert_matches!(missing, Err(BackendError::Unauthorized { .. }));
    }

    #[tokio::test]
    async fn test_join_missing_event() {
        let (pool, alice) = setup().await;
        let result = join_event(&pool, &RoomRegistry::new(), &membership_feed(), Some(&alice), "nope").await;
        assert_matches!(result, Err(BackendError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_join_is_idempotent_and_publishes_once() {
        let (pool, alice) = setup().await;
        let rooms = RoomRegistry::new();
        let feed = membership_feed();
        let mut feed_rx = feed.subscribe();
        let (watcher, mut watcher_rx) = rooms.connect().await;
        rooms.join(watcher, "e1", Some("Watcher")).await.unwrap();
        watcher_rx.try_recv().unwrap();

        let first = join_event(&pool, &rooms, &feed, Some(&alice), "e1").await.unwrap();
        let second = join_event(&pool, &rooms, &feed, Some(&alice), "e1").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.attendee_names(), vec!["Alice".to_string()]);

        let update = feed_rx.try_recv().unwrap();
        assert_eq!(update.attendees.len(), 1);
        assert!(feed_rx.try_recv().is_err());

        assert_matches!(watcher_rx.try_recv(), Ok(ServerMessage::AttendeeUpdate { .. }));
        assert!(watcher_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_create_event_broadcasts_to_everyone() {
        let (pool, alice) = setup().await;
        let rooms = RoomRegistry::new();
        let (_conn, mut rx) = rooms.connect().await;

        let event = create_event(
            &pool,
            &rooms,
            Some(&alice),
            NewEvent {
                name: "Rust Night".to_string(),
                location: "Hackerspace".to_string(),
                start_time: Utc::now(),
            },
        )
        .await
        .unwrap();

        assert!(event.attendees.is_empty());
        assert_matches!(rx.try_recv(), Ok(ServerMessage::EventCreated { event: e }) if e.id == event.id);
    }

    #[tokio::test]
    async fn test_create_event_validation() {
        let (pool, alice) = setup().await;
        let input = NewEvent {
            name: " ".to_string(),
            location: "Somewhere".to_string(),
            start_time: Utc::now(),
        };

        let anonymous = create_event(&pool, &RoomRegistry::new(), None, input.clone()).await;
        let blank = create_event(&pool, &RoomRegistry::new(), Some(&alice), input).await;

        assert_matches!(anonymous, Err(BackendError::Unauthorized { .. }));
        assert_matches!(blank, Err(BackendError::Validation { .. }));
    }
}
