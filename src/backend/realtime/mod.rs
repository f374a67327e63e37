//! Real-time Update Module
//!
//! This module provides the two realtime paths of the server:
//!
//! - **Presence** - ephemeral per-event rooms of connected sockets. Joining or
//!   leaving a room broadcasts `eventUsersUpdate` to everyone in it.
//! - **Membership** - durable `attendeeUpdate` notifications, published when
//!   `joinEvent` changes the stored attendee list. They go to the event's
//!   room and to the SSE membership feed.
//!
//! The two are deliberately kept apart: one reflects connection state, the
//! other persisted state, and they are never reconciled.
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs          - Module exports and documentation
//! ├── rooms.rs        - Room registry (connections, rooms, fan-out)
//! ├── socket.rs       - WebSocket handler for /ws
//! ├── broadcast.rs    - Membership feed (tokio broadcast)
//! └── subscription.rs - SSE handler for /realtime
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use eventure::backend::realtime::RoomRegistry;
//!
//! # async fn example() -> Result<(), eventure::backend::error::BackendError> {
//! let rooms = RoomRegistry::new();
//! let (connection, mut outbound) = rooms.connect().await;
//! let present = rooms.join(connection, "evt-1", Some("Alice")).await?;
//! assert_eq!(present, vec!["Alice".to_string()]);
//! # Ok(())
//! # }
//! ```

/// Room registry
pub mod rooms;

/// WebSocket handler
pub mod socket;

/// Membership feed broadcasting
pub mod broadcast;

/// Server-Sent Events subscription handler
pub mod subscription;

// Re-export commonly used types and functions
pub use broadcast::{membership_feed, publish_attendee_update, AttendeeUpdate, MembershipFeed};
pub use rooms::{ConnectionId, RoomRegistry, ANONYMOUS};
pub use socket::ws_handler;
pub use subscription::handle_membership_feed;
