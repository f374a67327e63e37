//! Backend Module
//!
//! This module contains all server-side code for Eventure: the GraphQL API
//! over the event store, bearer-token authentication, and the realtime room
//! presence system.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Architecture
//!
//! - **`server`** - Configuration, application state, initialization
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`graphql`** - Schema, resolvers and the `/graphql` handlers
//! - **`events`** - Event store queries and the attendance mutation
//! - **`auth`** - Users, password checks, JWT sessions
//! - **`middleware`** - Per-request viewer resolution
//! - **`realtime`** - Room registry, WebSocket handler, membership feed
//! - **`seed`** - Demo data
//! - **`error`** - Backend error type
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - eventure-server binary
//! ├── seed_main.rs    - eventure-seed binary
//! ├── seed.rs         - Demo data
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── graphql/        - GraphQL schema
//! ├── events/         - Events and attendance
//! ├── auth/           - Authentication
//! ├── middleware/     - Request middleware
//! ├── realtime/       - Rooms and broadcasting
//! └── error/          - Error types
//! ```
//!
//! # Realtime Channels
//!
//! Two independent channels carry live updates:
//!
//! - **Rooms** (`/ws`): ephemeral presence. Sockets join an event's room with
//!   a display name and receive `eventUsersUpdate` whenever the room changes.
//! - **Membership feed** (`/realtime`, and the event's room): durable
//!   `attendeeUpdate` notifications emitted when `joinEvent` adds an attendee.
//!
//! Room presence is never reconciled with the attendee list.
//!
//! # Example
//!
//! ```rust,no_run
//! use eventure::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let (app, shutdown) = create_app(&ServerConfig::from_env()).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:4000").await?;
//! axum::serve(listener, app)
//!     .with_graceful_shutdown(async move {
//!         tokio::signal::ctrl_c().await.ok();
//!         shutdown.trigger();
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// GraphQL schema and handlers
#[cfg(feature = "ssr")]
pub mod graphql;

/// Events and attendance
#[cfg(feature = "ssr")]
pub mod events;

/// Real-time rooms and membership feed
#[cfg(feature = "ssr")]
pub mod realtime;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Authentication and user management
#[cfg(feature = "ssr")]
pub mod auth;

/// Middleware for request processing
#[cfg(feature = "ssr")]
pub mod middleware;

/// Demo data
#[cfg(feature = "ssr")]
pub mod seed;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use server::{create_app, AppState, ServerConfig};
#[cfg(feature = "ssr")]
pub use realtime::{AttendeeUpdate, MembershipFeed, RoomRegistry};
#[cfg(feature = "ssr")]
pub use graphql::{build_schema, AppSchema};
#[cfg(feature = "ssr")]
pub use error::BackendError;
