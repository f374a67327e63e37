/**
 * Client Error Types
 */

use thiserror::Error;

use crate::shared::{ConfigError, SharedError};

/// Errors seen by the Eventure client
#[derive(Error, Debug)]
pub enum ClientError {
    /// HTTP transport failure
    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    /// WebSocket transport failure
    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    /// The server answered with GraphQL errors
    #[error("GraphQL error ({code}): {message}")]
    GraphQL { code: String, message: String },

    /// The response had neither data nor errors in the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Operation needs a session token
    #[error("Not logged in")]
    NotAuthenticated,

    /// The realtime connection was closed
    #[error("Connection closed")]
    Closed,

    #[error(transparent)]
    Shared(#[from] SharedError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// GraphQL error code, if the server sent one
    pub fn code(&self) -> Option<&str> {
        match self {
            ClientError::GraphQL { code, .. } => Some(code),
            _ => None,
        }
    }
}
