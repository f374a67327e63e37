/**
 * Membership Feed Broadcasting
 *
 * The membership feed carries durable `attendeeUpdate` notifications: one
 * per state-changing `joinEvent`. It is a `tokio::sync::broadcast` channel,
 * so every SSE subscriber receives a copy of each update.
 *
 * This path is separate from room presence. Presence (`eventUsersUpdate`)
 * reflects which sockets are connected right now; the membership feed
 * reflects what has been persisted.
 */

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::shared::{ServerMessage, User};

/// Capacity of the membership feed
pub const FEED_CAPACITY: usize = 1000;

/// Persisted attendee list of an event after a join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeUpdate {
    pub event_id: String,
    pub attendees: Vec<User>,
}

impl AttendeeUpdate {
    /// Socket frame carrying this update
    pub fn to_message(&self) -> ServerMessage {
        ServerMessage::AttendeeUpdate {
            event_id: self.event_id.clone(),
            attendees: self.attendees.clone(),
        }
    }
}

/// Broadcast channel for durable membership changes
///
/// It can be cloned and shared across handlers; subscribers call
/// `subscribe()` on it.
pub type MembershipFeed = broadcast::Sender<AttendeeUpdate>;

/// Create an empty membership feed
pub fn membership_feed() -> MembershipFeed {
    let (tx, _) = broadcast::channel(FEED_CAPACITY);
    tx
}

/// Publish an attendee update to every feed subscriber
///
/// # Arguments
///
/// * `feed` - The membership feed
/// * `update` - The update to publish
///
/// # Returns
///
/// Number of active subscribers that received the update (0 if no subscribers)
pub fn publish_attendee_update(feed: &MembershipFeed, update: AttendeeUpdate) -> usize {
    let event_id = update.event_id.clone();
    match feed.send(update) {
        Ok(subscriber_count) => {
            tracing::info!(
                "[Realtime] Attendee update for {} sent to {} feed subscribers",
                event_id,
                subscriber_count
            );
            subscriber_count
        }
        Err(_) => {
            // No subscribers, that's okay
            tracing::debug!("[Realtime] No feed subscribers for attendee update of {}", event_id);
            0
        }
    }
}
