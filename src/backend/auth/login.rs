/**
 * Login
 *
 * Exchanges an email/password pair for a session token.
 *
 * # Authentication Process
 *
 * 1. Look up user by email
 * 2. Verify password using bcrypt
 * 3. Generate JWT token
 * 4. Return token and user info
 *
 * # Security
 *
 * - Unknown email and wrong password produce the same `InvalidCredentials`
 *   error, so callers cannot probe which emails are registered
 * - Passwords are never logged or returned
 */

use bcrypt::verify;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::types::{AuthPayload, LoginRequest};
use crate::backend::auth::users::get_user_by_email;
use crate::backend::error::BackendError;

/// Authenticate a user
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `keys` - Session signing keys
/// * `request` - Email and password
///
/// # Returns
///
/// Session token and public user info
///
/// # Errors
///
/// * `InvalidCredentials` - If user is not found or password is incorrect
/// * `Database` / `Password` / `Token` - If the store, bcrypt or signing fails
pub async fn login(
    pool: &SqlitePool,
    keys: &SessionKeys,
    request: LoginRequest,
) -> Result<AuthPayload, BackendError> {
    tracing::info!("Login request for: {}", request.email);

    let user = get_user_by_email(pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("User not found: {}", request.email);
            BackendError::InvalidCredentials
        })?;

    if !verify(&request.password, &user.password_hash)? {
        tracing::warn!("Invalid password for user: {}", request.email);
        return Err(BackendError::InvalidCredentials);
    }

    let token = keys.create_token(&user.id, &user.email)?;

    tracing::info!("User logged in successfully: {} ({})", user.name, user.email);

    Ok(AuthPayload {
        token,
        user: user.to_public(),
    })
}
