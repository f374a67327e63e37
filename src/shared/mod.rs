//! Shared Module
//!
//! This module contains types that are shared between the server and the
//! client library: the public user/event shapes, the realtime wire protocol,
//! shared error types and client configuration. All types are designed for
//! serialization and transmission over HTTP and WebSocket.

/// Users and events as seen on the wire
pub mod model;

/// Realtime socket frames
pub mod protocol;

/// Shared error types
pub mod error;

/// Client configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use model::{Event, User};
pub use protocol::{ClientMessage, ServerMessage};
pub use error::SharedError;
pub use config::{ClientConfig, ClientConfigBuilder, ConfigError};
