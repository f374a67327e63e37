//! Events Module
//!
//! Event storage and the attendance mutation.
//!
//! # Module Structure
//!
//! ```text
//! events/
//! ├── mod.rs          - Module exports
//! ├── db.rs           - Event and attendee queries
//! └── attendance.rs   - joinEvent / createEvent
//! ```

/// Event and attendee database operations
pub mod db;

/// Attendance and event publishing
pub mod attendance;

pub use attendance::{create_event, join_event, NewEvent};
