/**
 * Realtime Wire Protocol
 *
 * This module defines the JSON text frames exchanged over the realtime
 * socket. Every frame is an object tagged by a `type` field; payload fields
 * are camelCase.
 *
 * # Client → Server
 *
 * - `joinEventRoom { eventId, name? }` - enter an event's presence room
 * - `leaveEventRoom { eventId }` - leave it again
 * - `ping` - liveness probe, answered with `pong`
 *
 * # Server → Client
 *
 * - `eventUsersUpdate { eventId, users }` - ephemeral presence list of a room
 * - `attendeeUpdate { eventId, attendees }` - durable attendee list after a join
 * - `eventCreated { event }` - a new event was published
 * - `pong`
 * - `error { message }` - only ever sent to the socket that caused it
 *
 * `eventUsersUpdate` and `attendeeUpdate` are deliberately different shapes:
 * the first mirrors who is connected right now, the second mirrors what the
 * store has persisted.
 */
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;
use crate::shared::model::{Event, User};

/// Frames sent by a client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Enter the presence room of an event
    JoinEventRoom {
        event_id: String,
        /// Display name; the server substitutes "Anonymous" when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Leave the presence room of an event
    LeaveEventRoom { event_id: String },
    Ping,
}

/// Frames sent by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Presence list of a room after someone joined or left
    EventUsersUpdate { event_id: String, users: Vec<String> },
    /// Persisted attendee list after a successful `joinEvent`
    AttendeeUpdate { event_id: String, attendees: Vec<User> },
    /// A new event was created
    EventCreated { event: Event },
    Pong,
    Error { message: String },
}

impl ClientMessage {
    /// Parse a client frame
    pub fn from_json(text: &str) -> Result<Self, SharedError> {
        decode(text)
    }

    pub fn to_json(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl ServerMessage {
    /// Parse a server frame
    pub fn from_json(text: &str) -> Result<Self, SharedError> {
        decode(text)
    }

    pub fn to_json(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Event id the message is scoped to, if any
    pub fn event_id(&self) -> Option<&str> {
        match self {
            Self::EventUsersUpdate { event_id, .. } | Self::AttendeeUpdate { event_id, .. } => {
                Some(event_id)
            }
            Self::EventCreated { event } => Some(&event.id),
            Self::Pong | Self::Error { .. } => None,
        }
    }
}

/// Distinguish "not JSON" from "JSON, but not one of our frames"
fn decode<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, SharedError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    serde_json::from_value(value).map_err(|e| SharedError::protocol(e.to_string()))
}
