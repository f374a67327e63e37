/**
 * Membership Feed Subscription Handler
 *
 * This module implements the Server-Sent Events (SSE) handler for the
 * `/realtime` endpoint. It streams the durable `attendeeUpdate`
 * notifications of a single event.
 *
 * # Connection Management
 *
 * - Connections are kept alive using the SSE keep-alive mechanism
 * - Lagged updates are logged but don't cause connection drops
 * - The stream ends when the server's shutdown signal fires, or if the
 *   feed itself closes
 */

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures_util::{stream, Stream};
use serde::Deserialize;
use tokio::sync::broadcast::error::RecvError;

use crate::backend::error::BackendError;
use crate::backend::events::db::get_event;
use crate::backend::server::state::AppState;

/// Query string of `GET /realtime`
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    #[serde(rename = "eventId")]
    pub event_id: String,
}

/// Handle membership feed subscription (GET /realtime?eventId=...)
///
/// # Returns
///
/// Server-Sent Events stream of `attendeeUpdate` events for the event
///
/// # Errors
///
/// * `400 Bad Request` - If `eventId` is missing or blank
/// * `404 Not Found` - If the event does not exist
///
/// # Example Response
///
/// ```http
/// HTTP/1.1 200 OK
/// Content-Type: text/event-stream
///
/// event: attendeeUpdate
/// data: {"eventId":"...","attendees":[{"id":"user1","name":"Alice","email":"alice@example.com"}]}
/// ```
pub async fn handle_membership_feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, BackendError> {
    let event_id = query.event_id.trim().to_string();
    if event_id.is_empty() {
        return Err(BackendError::validation("eventId", "eventId must not be empty"));
    }
    if get_event(&state.db, &event_id).await?.is_none() {
        return Err(BackendError::not_found("Event", event_id));
    }

    tracing::info!("[Realtime] Feed subscription active for event {}", event_id);

    let rx = state.membership_feed.subscribe();
    let shutdown = state.shutdown.clone();

    // Keep-alive comments hold the connection open between updates, so the
    // stream only yields when there is an update for this event.
    let stream = stream::unfold((rx, event_id, shutdown), |(mut rx, event_id, shutdown)| async move {
        loop {
            let received = tokio::select! {
                received = rx.recv() => received,
                _ = shutdown.wait() => {
                    tracing::debug!("[Realtime] Server shutting down, ending feed for {}", event_id);
                    return None;
                }
            };

            match received {
                Ok(update) => {
                    if update.event_id != event_id {
                        continue;
                    }

                    let data = match serde_json::to_string(&update) {
                        Ok(data) => data,
                        Err(e) => {
                            tracing::error!("[Realtime] Failed to serialize update: {:?}", e);
                            continue;
                        }
                    };

                    let sse_event = Event::default().event("attendeeUpdate").data(data);
                    return Some((Ok(sse_event), (rx, event_id, shutdown)));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("[Realtime] Feed subscriber lagged, skipped {} updates", skipped);
                    continue;
                }
                Err(RecvError::Closed) => {
                    tracing::debug!("[Realtime] Membership feed closed, ending stream");
                    return None;
                }
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
