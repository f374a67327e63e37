//! Client Module
//!
//! Headless client for an Eventure server. Only compiled with the `client`
//! feature.
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs       - Module exports and documentation
//! ├── error.rs     - ClientError
//! ├── graphql.rs   - GraphQL client with session token
//! ├── realtime.rs  - WebSocket client for rooms
//! └── presence.rs  - Presence view state
//! ```
//!
//! # Typical Flow
//!
//! 1. `GraphQLClient::login` stores the session token
//! 2. `GraphQLClient::events` lists events
//! 3. `PresenceView::navigate_to` yields the room frames, sent through
//!    `RealtimeClient::send`
//! 4. Frames from `RealtimeClient::recv` go through `PresenceView::apply`

pub mod error;
pub mod graphql;
pub mod presence;
pub mod realtime;

pub use error::ClientError;
pub use graphql::GraphQLClient;
pub use presence::{PresenceView, PARTICIPANTS_HEADING};
pub use realtime::RealtimeClient;
