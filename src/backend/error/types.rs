/**
 * Backend Error Types
 *
 * This module defines error types specific to the backend server.
 * These errors are used by GraphQL resolvers, HTTP handlers and the
 * realtime socket, and can be converted to HTTP responses or GraphQL errors.
 *
 * # Error Categories
 *
 * ## Request Errors
 *
 * Caused by the caller and safe to report verbatim:
 * - Missing or invalid session (`Unauthorized`)
 * - Unknown event or user (`NotFound`)
 * - Wrong email/password pair (`InvalidCredentials`)
 * - Malformed input (`Validation`)
 * - Duplicate registration (`Conflict`)
 *
 * ## Infrastructure Errors
 *
 * Store, migration, token signing and password hashing failures. These are
 * logged in full and reported to the caller with a generic message.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::SharedError;

/// Backend-specific error types
///
/// # Usage
///
/// ```rust
/// use eventure::backend::error::BackendError;
///
/// let err = BackendError::not_found("Event", "evt-42");
/// assert_eq!(err.message(), "Event not found");
///
/// let err = BackendError::unauthorized("Authentication required");
/// assert_eq!(err.code(), "UNAUTHENTICATED");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// The caller has no valid session
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Human-readable error message
        message: String,
    },

    /// A referenced entity does not exist
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Kind of entity, e.g. "Event"
        resource: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// Email/password pair did not match a user
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Input failed validation
    #[error("Validation error in field '{field}': {message}")]
    Validation {
        /// The offending input field
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Entity already exists
    #[error("Conflict: {message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// State management error (e.g., a connection that is not registered)
    #[error("State error: {message}")]
    StateError {
        /// Human-readable error message
        message: String,
    },

    /// Store failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure at startup
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Session token could not be signed
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password hashing or verification failure
    #[error("Password error: {0}")]
    Password(#[from] bcrypt::BcryptError),

    /// Shared error (from shared module)
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl BackendError {
    /// Create a new unauthorized error
    ///
    /// # Arguments
    ///
    /// * `message` - Error message
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a new not-found error
    ///
    /// # Arguments
    ///
    /// * `resource` - Kind of entity, e.g. "Event"
    /// * `id` - Identifier that was looked up
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a new state error
    ///
    /// # Example
    ///
    /// ```rust
    /// use eventure::backend::error::BackendError;
    ///
    /// let err = BackendError::state("connection is not registered");
    /// ```
    pub fn state(message: impl Into<String>) -> Self {
        Self::StateError {
            message: message.into(),
        }
    }

    /// Whether the error is caused by the caller rather than the server
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Unauthorized`, `InvalidCredentials` - 401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `Validation` - 400 Bad Request
    /// - `Conflict` - 409 Conflict
    /// - `SharedError` - Depends on the shared error type
    /// - Everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized { .. } | Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::ProtocolError { .. } => StatusCode::BAD_REQUEST,
            },
            Self::StateError { .. }
            | Self::Database(_)
            | Self::Migration(_)
            | Self::Token(_)
            | Self::Password(_)
            | Self::SerializationError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code, reported as the GraphQL `code` extension
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthorized { .. } => "UNAUTHENTICATED",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Validation { .. } | Self::SharedError(_) => "BAD_USER_INPUT",
            Self::Conflict { .. } => "CONFLICT",
            _ => "INTERNAL_SERVER_ERROR",
        }
    }

    /// Get the error message shown to the caller
    ///
    /// Infrastructure errors never leak their details here.
    pub fn message(&self) -> String {
        match self {
            Self::Unauthorized { message } => message.clone(),
            Self::NotFound { resource, .. } => format!("{} not found", resource),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::Validation { message, .. } => message.clone(),
            Self::Conflict { message } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            _ => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_error() {
        let error = BackendError::unauthorized("Authentication required");
        match &error {
            BackendError::Unauthorized { message } => {
                assert_eq!(message, "Authentication required");
            }
            _ => panic!("Expected Unauthorized"),
        }
        assert_eq!(error.code(), "UNAUTHENTICATED");
    }

    #[test]
    fn test_not_found_message_hides_id() {
        let error = BackendError::not_found("Event", "evt-404");
        assert_eq!(error.message(), "Event not found");
        assert!(error.to_string().contains("evt-404"));
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            BackendError::unauthorized("x").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BackendError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BackendError::not_found("Event", "1").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BackendError::validation("name", "required").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            BackendError::conflict("taken").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            BackendError::state("State error").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_infrastructure_errors_are_generic() {
        let error = BackendError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(error.message(), "Internal server error");
        assert_eq!(error.code(), "INTERNAL_SERVER_ERROR");
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_from_shared_error() {
        let shared_error = SharedError::validation("eventId", "must not be empty");
        let backend_error: BackendError = shared_error.into();

        match &backend_error {
            BackendError::SharedError(_) => {}
            _ => panic!("Expected SharedError variant"),
        }
        assert_eq!(backend_error.code(), "BAD_USER_INPUT");
    }
}
