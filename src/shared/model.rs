/**
 * Domain Model
 *
 * Public shapes of users and events as they travel over the wire: GraphQL
 * responses decoded by the client, and `attendeeUpdate` / `eventCreated`
 * realtime payloads. Credentials never appear here; the server keeps the
 * password hash in its own store row type.
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered user, without credentials
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Stable user identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address used to log in
    pub email: String,
}

/// An event and its current attendees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub name: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    /// Attendees in the order they joined
    #[serde(default)]
    pub attendees: Vec<User>,
}

impl Event {
    /// Whether the given user is already an attendee
    pub fn has_attendee(&self, user_id: &str) -> bool {
        self.attendees.iter().any(|attendee| attendee.id == user_id)
    }

    /// Display names of the attendees, in join order
    pub fn attendee_names(&self) -> Vec<String> {
        self.attendees.iter().map(|a| a.name.clone()).collect()
    }
}
