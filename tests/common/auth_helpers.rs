//! Authentication test helpers
//!
//! Provides utilities for creating test users, generating tokens,
//! and testing authentication flows.

use sqlx::SqlitePool;
use uuid::Uuid;

use eventure::backend::auth::sessions::{Claims, SessionKeys, DEFAULT_TOKEN_TTL};
use eventure::backend::auth::users::create_user;

use super::database::TEST_BCRYPT_COST;

/// Signing secret shared by test servers and test tokens
pub const TEST_JWT_SECRET: &str = "eventure-test-secret";

/// Password of the seeded demo users
pub const SEED_PASSWORD: &str = "password123";

/// Test user credentials
pub struct TestUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Session keys matching `TEST_JWT_SECRET`
pub fn test_session_keys() -> SessionKeys {
    SessionKeys::new(TEST_JWT_SECRET, DEFAULT_TOKEN_TTL)
}

/// Token signed with the test secret that expired a minute ago
pub fn expired_token(user_id: &str, email: &str) -> String {
    let now = chrono::Utc::now().timestamp() as u64;
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        exp: now - 60,
        iat: now - 3660,
    };
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(TEST_JWT_SECRET.as_bytes()),
    )
    .expect("Failed to encode expired token")
}

/// Create a test user in the database
pub async fn create_test_user(
    pool: &SqlitePool,
    name: &str,
    email: &str,
    password: &str,
) -> Result<TestUser, Box<dyn std::error::Error>> {
    let password_hash = bcrypt::hash(password, TEST_BCRYPT_COST)?;
    let id = Uuid::new_v4().to_string();
    let user = create_user(pool, &id, name, email, &password_hash).await?;

    let token = test_session_keys().create_token(&user.id, &user.email)?;

    Ok(TestUser {
        id: user.id,
        name: user.name,
        email: user.email,
        password: password.to_string(),
        token,
    })
}

/// Create a test user with a unique email
pub async fn create_unique_test_user(
    pool: &SqlitePool,
) -> Result<TestUser, Box<dyn std::error::Error>> {
    let email = format!("test_{}@example.com", Uuid::new_v4());
    create_test_user(pool, "Tester", &email, "test_password_123").await
}

/// Generate a test JWT token
pub fn generate_test_token(user_id: &str, email: &str) -> String {
    test_session_keys()
        .create_token(user_id, email)
        .expect("Failed to generate test token")
}

/// Create authorization header value
pub fn auth_header(token: &str) -> String {
    format!("Bearer {}", token)
}
