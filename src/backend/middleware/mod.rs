//! Middleware Module
//!
//! Request processing shared by all handlers.
//!
//! - **`auth`** - resolves the optional caller (`Viewer`) of a request from
//!   its bearer token

pub mod auth;

pub use auth::{bearer_token, resolve_viewer, AuthenticatedUser, Viewer};
