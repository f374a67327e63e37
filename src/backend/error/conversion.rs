/**
 * Error Conversion
 *
 * This module provides conversion implementations for backend errors,
 * allowing them to be converted to HTTP responses and GraphQL errors.
 *
 * # Response Format
 *
 * HTTP error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "Error message",
 *   "status": 400
 * }
 * ```
 *
 * GraphQL errors carry the same message plus a `code` extension, e.g.
 * `{"message": "Event not found", "extensions": {"code": "NOT_FOUND"}}`.
 */

use async_graphql::ErrorExtensions;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    /// Convert a backend error into an HTTP response
    ///
    /// Server-side failures are logged here with their full detail; the
    /// response body only carries `message()`.
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!("Request failed: {}", self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "status": status.as_u16(),
        });

        (status, [(header::CONTENT_TYPE, "application/json")], Json(body)).into_response()
    }
}

impl ErrorExtensions for BackendError {
    fn extend(&self) -> async_graphql::Error {
        if !self.is_client_error() {
            tracing::error!("Resolver failed: {}", self);
        }

        let code = self.code();
        async_graphql::Error::new(self.message()).extend_with(|_, e| e.set("code", code))
    }
}
