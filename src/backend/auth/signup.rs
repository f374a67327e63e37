/**
 * Signup
 *
 * Registers a new user and returns a session token for immediate use.
 *
 * # Validation
 *
 * - Name must not be blank
 * - Email must contain '@' character (basic validation)
 * - Password must be at least 8 characters long
 * - Email must be unique (no existing user with same email)
 */

use bcrypt::hash;
use sqlx::SqlitePool;

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::types::{AuthPayload, SignupRequest};
use crate::backend::auth::users::{create_user, get_user_by_email};
use crate::backend::error::BackendError;

/// Minimum accepted password length
pub const MIN_PASSWORD_LEN: usize = 8;

/// Check a signup request without touching the store
pub fn validate_signup(request: &SignupRequest) -> Result<(), BackendError> {
    if request.name.trim().is_empty() {
        return Err(BackendError::validation("name", "Name must not be empty"));
    }
    if !request.email.contains('@') {
        return Err(BackendError::validation("email", "Invalid email format"));
    }
    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(BackendError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    Ok(())
}

/// Register a user
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `keys` - Session signing keys
/// * `password_cost` - bcrypt cost factor
/// * `request` - Name, email and password
///
/// # Errors
///
/// * `Validation` - If a field is malformed
/// * `Conflict` - If a user with this email already exists
pub async fn signup(
    pool: &SqlitePool,
    keys: &SessionKeys,
    password_cost: u32,
    request: SignupRequest,
) -> Result<AuthPayload, BackendError> {
    tracing::info!("Signup request for email: {}", request.email);

    if let Err(err) = validate_signup(&request) {
        tracing::warn!("Rejected signup for {}: {}", request.email, err);
        return Err(err);
    }

    if get_user_by_email(pool, &request.email).await?.is_some() {
        tracing::warn!("Email already exists: {}", request.email);
        return Err(BackendError::conflict("Email already registered"));
    }

    let password_hash = hash(&request.password, password_cost)?;
    let id = uuid::Uuid::new_v4().to_string();
    let user = create_user(pool, &id, request.name.trim(), &request.email, &password_hash)
        .await
        .map_err(|err| registration_error(err, &request.email))?;

    let token = keys.create_token(&user.id, &user.email)?;

    tracing::info!("User created successfully: {} ({})", user.name, user.email);

    Ok(AuthPayload {
        token,
        user: user.to_public(),
    })
}

/// A concurrent signup can win the race past the lookup above; the unique
/// index on `users.email` then rejects the insert.
fn registration_error(err: sqlx::Error, email: &str) -> BackendError {
    let duplicate = err
        .as_database_error()
        .is_some_and(|db| db.is_unique_violation());
    if duplicate {
        tracing::warn!("Email already exists: {}", email);
        BackendError::conflict("Email already registered")
    } else {
        err.into()
    }
}
