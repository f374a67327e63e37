/**
 * Authentication Types
 *
 * Request and result types shared by the login and signup operations. The
 * GraphQL layer maps its arguments onto these.
 */

use serde::{Deserialize, Serialize};

use crate::shared::User;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SignupRequest {
    /// Display name
    pub name: String,
    /// User's email address
    pub email: String,
    /// User's password (will be hashed before storage)
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    /// User's password (will be verified against stored hash)
    pub password: String,
}

/// Result of a successful login or signup
///
/// Contains the session token and user information (without sensitive data).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct AuthPayload {
    /// Signed session token
    pub token: String,
    pub user: User,
}
