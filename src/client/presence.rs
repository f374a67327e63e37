/**
 * Presence View
 *
 * Client-side state for the event detail screen. Navigating to an event
 * yields the frames that move the socket from the previous room into the
 * new one; frames received afterwards are applied only if they belong to
 * the event currently on screen.
 *
 * ```text
 *            navigate_to(A)                 navigate_to(B)
 * (no event) ─────────────> viewing A ──────────────────────> viewing B
 *     ^        [join A]         │         [leave A, join B]       │
 *     └─────────────────────────┴─────────────────────────────────┘
 *                    navigate_back()  [leave current]
 * ```
 */

use crate::shared::{ClientMessage, ServerMessage, User};

/// Heading printed above the participant list
pub const PARTICIPANTS_HEADING: &str = "Live Participants:";

/// Presence state of the event on screen
#[derive(Debug, Clone, Default)]
pub struct PresenceView {
    display_name: Option<String>,
    current_event: Option<String>,
    participants: Vec<String>,
    attendees: Vec<User>,
}

impl PresenceView {
    /// Create a view that joins rooms under `display_name`
    pub fn new(display_name: Option<String>) -> Self {
        Self {
            display_name,
            ..Self::default()
        }
    }

    pub fn current_event(&self) -> Option<&str> {
        self.current_event.as_deref()
    }

    /// Live participants of the current room, as last broadcast
    pub fn participants(&self) -> &[String] {
        &self.participants
    }

    /// Attendees of the current event, as last broadcast
    pub fn attendees(&self) -> &[User] {
        &self.attendees
    }

    /// Show an event; returns the frames to send
    pub fn navigate_to(&mut self, event_id: &str) -> Vec<ClientMessage> {
        if self.current_event.as_deref() == Some(event_id) {
            return Vec::new();
        }

        let mut frames = self.navigate_back();
        frames.push(ClientMessage::JoinEventRoom {
            event_id: event_id.to_string(),
            name: self.display_name.clone(),
        });
        self.current_event = Some(event_id.to_string());
        frames
    }

    /// Leave the event on screen; returns the frames to send
    pub fn navigate_back(&mut self) -> Vec<ClientMessage> {
        self.participants.clear();
        self.attendees.clear();
        match self.current_event.take() {
            Some(event_id) => vec![ClientMessage::LeaveEventRoom { event_id }],
            None => Vec::new(),
        }
    }

    /// Apply a server frame
    ///
    /// # Returns
    /// `true` if the view changed
    pub fn apply(&mut self, message: &ServerMessage) -> bool {
        let Some(current) = self.current_event.as_deref() else {
            return false;
        };

        match message {
            ServerMessage::EventUsersUpdate { event_id, users } if event_id == current => {
                self.participants = users.clone();
                true
            }
            ServerMessage::AttendeeUpdate {
                event_id,
                attendees,
            } if event_id == current => {
                self.attendees = attendees.clone();
                true
            }
            _ => false,
        }
    }

    /// Text rendering of the participant list
    pub fn render(&self) -> String {
        let mut out = String::from(PARTICIPANTS_HEADING);
        for name in &self.participants {
            out.push_str("\n  ");
            out.push_str(name);
        }
        out
    }
}
