// Increase recursion limit for the async-graphql derive expansions
#![recursion_limit = "256"]

//! Eventure - Main Library
//!
//! Eventure is an event-RSVP application: a GraphQL backend over a SQLite
//! event store, and live per-event presence rooms over WebSocket.
//!
//! # Module Structure
//!
//! The library is organized into three main modules:
//!
//! - **`shared`** - Types shared between client and backend
//!   - `User` and `Event` records
//!   - Realtime wire protocol (`ClientMessage` / `ServerMessage`)
//!   - Client configuration and error types
//!
//! - **`backend`** - Server-side code (only compiled with `ssr` feature)
//!   - Axum HTTP server with the GraphQL endpoint
//!   - JWT sessions and bcrypt credentials
//!   - Room registry, WebSocket handler and membership SSE feed
//!
//! - **`client`** - Headless client (only compiled with `client` feature)
//!   - GraphQL client over `reqwest`
//!   - Realtime socket over `tokio-tungstenite`
//!   - Presence view that follows navigation between events
//!
//! # Feature Flags
//!
//! - **`ssr`** - Enables the backend modules and the server binaries
//! - **`client`** - Enables the client module
//!
//! Both are on by default.
//!
//! # Usage
//!
//! ## Server-Side
//!
//! ```rust,no_run
//! use eventure::backend::server::{create_app, ServerConfig};
//!
//! # async fn example() -> Result<(), eventure::backend::BackendError> {
//! let (app, _shutdown) = create_app(&ServerConfig::from_env()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Client
//!
//! ```rust,no_run
//! use eventure::client::{GraphQLClient, PresenceView, RealtimeClient};
//! use eventure::shared::ClientConfig;
//!
//! # async fn example() -> Result<(), eventure::client::ClientError> {
//! let config = ClientConfig::default();
//! let mut api = GraphQLClient::new(&config);
//! api.login("alice@example.com", "password123").await?;
//!
//! let events = api.events().await?;
//! let mut socket = RealtimeClient::connect(&config).await?;
//! let mut view = PresenceView::new(Some("Alice".to_string()));
//! for message in view.navigate_to(&events[0].id) {
//!     socket.send(&message).await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `shared::SharedError` for wire-format and validation failures
//! - `backend::BackendError` for server failures, mapped to HTTP statuses and
//!   GraphQL error codes
//! - `client::ClientError` for transport and GraphQL errors seen by clients

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;

/// Headless client
#[cfg(feature = "client")]
pub mod client;
