//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//! Routes are organized by functionality into focused submodules.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs              - Module exports and documentation
//! ├── router.rs           - Main router creation and layers
//! ├── api_routes.rs       - GraphQL and health endpoints
//! └── realtime_routes.rs  - WebSocket and SSE endpoints
//! ```

/// Main router creation
pub mod router;

/// GraphQL and health routes
pub mod api_routes;

/// WebSocket and SSE routes
pub mod realtime_routes;

pub use router::create_router;
