//! Authentication Module
//!
//! This module handles user registration, login and session tokens. It is
//! transport-agnostic: the GraphQL resolvers call into it, and the request
//! middleware uses `SessionKeys` to resolve the caller of each request.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── types.rs        - Request/result types
//! ├── users.rs        - User rows and database operations
//! ├── sessions.rs     - JWT token management
//! ├── login.rs        - Email/password authentication
//! └── signup.rs       - User registration
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: name, email and password → User created → token returned
//! 2. **Login**: email and password → Credentials verified → token returned
//! 3. **Request**: `Authorization: Bearer <token>` → Token verified → viewer resolved
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are HMAC-signed JWTs carrying `sub` (user id) and `email`
//! - Tokens expire after the configured lifetime (one hour by default)
//! - Invalid credentials never reveal whether the email exists

/// Request and result types
pub mod types;

/// User data model and database operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Email/password authentication
pub mod login;

/// User registration
pub mod signup;

// Re-export commonly used types
pub use login::login;
pub use sessions::{Claims, SessionKeys};
pub use signup::signup;
pub use types::{AuthPayload, LoginRequest, SignupRequest};
