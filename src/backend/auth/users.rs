/**
 * User Model and Database Operations
 *
 * This module handles user rows and their database operations. The stored
 * row carries the bcrypt hash; `to_public()` strips it before anything
 * leaves the server.
 */

use chrono::{DateTime, Utc};
use sqlx::{SqliteExecutor, SqlitePool};

use crate::shared::User;

/// User row as stored in the database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredUser {
    /// Unique user ID
    pub id: String,
    /// Display name
    pub name: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    /// Public view of the user, without credentials
    pub fn to_public(&self) -> User {
        User {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Create a new user
///
/// # Arguments
/// * `executor` - Pool, connection or open transaction
/// * `id` - User ID; callers pass a fresh UUID, seeding passes fixed ids
/// * `name` - Display name
/// * `email` - User email
/// * `password_hash` - Hashed password
///
/// # Returns
/// Created user or error
pub async fn create_user<'e>(
    executor: impl SqliteExecutor<'e>,
    id: &str,
    name: &str,
    email: &str,
    password_hash: &str,
) -> Result<StoredUser, sqlx::Error> {
    let user = sqlx::query_as::<_, StoredUser>(
        r#"
        INSERT INTO users (id, name, email, password_hash, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        RETURNING id, name, email, password_hash, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(password_hash)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(user)
}

/// Get user by email
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_email(
    pool: &SqlitePool,
    email: &str,
) -> Result<Option<StoredUser>, sqlx::Error> {
    let user = sqlx::query_as::<_, StoredUser>(
        r#"
        SELECT id, name, email, password_hash, created_at
        FROM users
        WHERE email = ?1
        "#,
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Get user by ID
///
/// # Returns
/// User or None if not found
pub async fn get_user_by_id(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<StoredUser>, sqlx::Error> {
    let user = sqlx::query_as::<_, StoredUser>(
        r#"
        SELECT id, name, email, password_hash, created_at
        FROM users
        WHERE id = ?1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

/// Number of registered users
pub async fn count_users(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await
}
