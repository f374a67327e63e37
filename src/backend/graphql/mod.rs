//! GraphQL API
//!
//! The schema served at `/graphql`.
//!
//! # Operations
//!
//! | Operation | Auth | Result |
//! |-----------|------|--------|
//! | `events` | no | `[Event!]!`, earliest first |
//! | `event(id)` | no | `Event`, `NOT_FOUND` error if absent |
//! | `me` | no | `User` or null |
//! | `login(email, password)` | no | token |
//! | `signup(name, email, password)` | no | token |
//! | `joinEvent(eventId)` | yes | `Event` |
//! | `createEvent(name, location, startTime)` | yes | `Event` |
//!
//! Errors carry an `extensions.code` taken from `BackendError::code`.
//!
//! # Module Structure
//!
//! ```text
//! graphql/
//! ├── mod.rs       - Schema assembly and shared resolver helpers
//! ├── types.rs     - User / Event object types
//! ├── auth.rs      - me, login, signup
//! ├── events.rs    - events, event, joinEvent, createEvent
//! └── handlers.rs  - axum handlers (POST execute, GET GraphiQL)
//! ```

pub mod auth;
pub mod events;
pub mod handlers;
pub mod types;

use async_graphql::{Context, EmptySubscription, MergedObject, Schema};
use sqlx::SqlitePool;

use crate::backend::auth::SessionKeys;
use crate::backend::middleware::auth::{AuthenticatedUser, Viewer};
use crate::backend::realtime::{MembershipFeed, RoomRegistry};

pub use handlers::{graphiql, graphql_handler};

/// Root query object
#[derive(MergedObject, Default)]
pub struct QueryRoot(events::EventQuery, auth::UserQuery);

/// Root mutation object
#[derive(MergedObject, Default)]
pub struct MutationRoot(auth::AuthMutation, events::EventMutation);

/// Application schema
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// bcrypt cost for passwords created through `signup`
#[derive(Debug, Clone, Copy)]
pub struct PasswordCost(pub u32);

/// Build the schema with its shared resources attached
pub fn build_schema(
    db: SqlitePool,
    sessions: SessionKeys,
    rooms: RoomRegistry,
    membership_feed: MembershipFeed,
    password_cost: u32,
) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(db)
        .data(sessions)
        .data(rooms)
        .data(membership_feed)
        .data(PasswordCost(password_cost))
        .finish()
}

/// Caller of the current request, if authenticated
pub(crate) fn viewer<'a>(ctx: &'a Context<'_>) -> Option<&'a AuthenticatedUser> {
    ctx.data_opt::<Viewer>().and_then(|viewer| viewer.0.as_ref())
}
