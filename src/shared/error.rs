//! Shared Error Types
//!
//! This module defines error types that are shared between the server and the
//! client library. These errors represent failures that can happen on either
//! side of the realtime socket: a frame that does not parse, a field that does
//! not validate.
//!
//! # Error Categories
//!
//! - `SerializationError` - JSON serialization/deserialization failures
//! - `ValidationError` - Data validation failures
//! - `ProtocolError` - Realtime frames that are well-formed JSON but not a known message
//!
//! # Usage
//!
//! ```rust
//! use eventure::shared::error::SharedError;
//!
//! let error = SharedError::validation("eventId", "event id must not be empty");
//! ```
use thiserror::Error;

/// Shared error types that can occur in both the server and the client
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// JSON serialization or deserialization error
    #[error("Serialization error: {message}")]
    SerializationError {
        /// Human-readable error message
        message: String,
    },

    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Realtime protocol error
    #[error("Protocol error: {message}")]
    ProtocolError {
        /// Human-readable error message
        message: String,
    },
}

impl SharedError {
    /// Create a new serialization error
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::SerializationError {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new protocol error
    pub fn protocol(message: impl Into<String>) -> Self {
        Self::ProtocolError {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for SharedError {
    fn from(err: serde_json::Error) -> Self {
        Self::serialization(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("eventId", "must not be empty");
        match error {
            SharedError::ValidationError { field, message } => {
                assert_eq!(field, "eventId");
                assert_eq!(message, "must not be empty");
            }
            _ => panic!("Expected ValidationError"),
        }
    }

    #[test]
    fn test_protocol_error_display() {
        let error = SharedError::protocol("unknown message type");
        let display = format!("{}", error);
        assert!(display.contains("Protocol error"));
        assert!(display.contains("unknown message type"));
    }

    #[test]
    fn test_from_serde_error() {
        let result: Result<serde_json::Value, _> = serde_json::from_str("{ nope }");
        let shared_error: SharedError = result.unwrap_err().into();

        match shared_error {
            SharedError::SerializationError { message } => assert!(message.starts_with("JSON error")),
            _ => panic!("Expected SerializationError from serde error"),
        }
    }
}
