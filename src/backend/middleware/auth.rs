/**
 * Viewer Resolution
 *
 * Resolves the caller of a request from its `Authorization: Bearer <token>`
 * header. Resolution never fails the request: a missing header, a malformed
 * or expired token, or a token whose user no longer exists all resolve to
 * an anonymous viewer. Operations that need a caller check for one
 * themselves.
 */

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use sqlx::SqlitePool;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::users::get_user_by_id;
use crate::backend::server::state::AppState;

/// Authenticated user resolved from a session token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
    pub name: String,
}

/// The caller of a request, if any
///
/// Usable as a handler argument; extraction never rejects.
#[derive(Clone, Debug, Default)]
pub struct Viewer(pub Option<AuthenticatedUser>);

/// Extract the bearer token from request headers
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Resolve a bearer token to a user
///
/// # Returns
///
/// The user, or `None` for an invalid token or unknown user
pub async fn resolve_viewer(
    pool: &SqlitePool,
    keys: &SessionKeys,
    token: Option<&str>,
) -> Option<AuthenticatedUser> {
    let token = token?;

    let claims = match keys.verify_token(token) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::debug!("Ignoring invalid token: {:?}", e);
            return None;
        }
    };

    match get_user_by_id(pool, &claims.sub).await {
        Ok(Some(user)) => Some(AuthenticatedUser {
            user_id: user.id,
            email: user.email,
            name: user.name,
        }),
        Ok(None) => {
            tracing::warn!("Token for unknown user {}", claims.sub);
            None
        }
        Err(e) => {
            tracing::error!("Failed to resolve viewer: {:?}", e);
            None
        }
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let user = resolve_viewer(&state.db, &state.sessions, bearer_token(&parts.headers)).await;
        Ok(Viewer(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::auth::sessions::DEFAULT_TOKEN_TTL;
    use crate::backend::auth::users::create_user;
    use crate::backend::server::config::load_database;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[tokio::test]
    async fn test_resolve_viewer() {
        let pool = load_database("sqlite::memory:").await.unwrap();
        create_user(&pool, "user1", "Alice", "alice@example.com", "hash")
            .await
            .unwrap();
        let keys = SessionKeys::new("test-secret", DEFAULT_TOKEN_TTL);
        let token = keys.create_token("user1", "alice@example.com").unwrap();

        let viewer = resolve_viewer(&pool, &keys, Some(&token)).await.unwrap();
        assert_eq!(viewer.user_id, "user1");
        assert_eq!(viewer.name, "Alice");
    }

    #[tokio::test]
    async fn test_resolve_viewer_anonymous_cases() {
        let pool = load_database("sqlite::memory:").await.unwrap();
        let keys = SessionKeys::new("test-secret", DEFAULT_TOKEN_TTL);
        let ghost = keys.create_token("ghost", "ghost@example.com").unwrap();

        assert!(resolve_viewer(&pool, &keys, None).await.is_none());
        assert!(resolve_viewer(&pool, &keys, Some("garbage")).await.is_none());
        assert!(resolve_viewer(&pool, &keys, Some(&ghost)).await.is_none());
    }
}
