/**
 * Server Configuration
 *
 * This module handles loading of server configuration from environment
 * variables and opening the SQLite store.
 *
 * # Configuration Sources
 *
 * Configuration is loaded from environment variables (a `.env` file is read
 * by the binaries beforehand), with sensible defaults for local development.
 *
 * | Variable          | Default                        |
 * |-------------------|--------------------------------|
 * | `DATABASE_URL`    | `sqlite://eventure.db?mode=rwc` |
 * | `JWT_SECRET`      | development secret (warned)    |
 * | `SERVER_PORT`     | `4000`                         |
 * | `TOKEN_TTL_SECS`  | `3600`                         |
 * | `BCRYPT_COST`     | `bcrypt::DEFAULT_COST`         |
 * | `SEED_ON_STARTUP` | `false`                        |
 *
 * # Error Handling
 *
 * Unparseable numeric values are logged and replaced by their default. A
 * store that cannot be opened or migrated is a hard startup error.
 */

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::backend::auth::sessions::{SessionKeys, DEFAULT_TOKEN_TTL};
use crate::backend::error::BackendError;

/// Default store location
pub const DEFAULT_DATABASE_URL: &str = "sqlite://eventure.db?mode=rwc";

/// Default listening port
pub const DEFAULT_PORT: u16 = 4000;

/// Signing secret used when `JWT_SECRET` is unset
const DEV_JWT_SECRET: &str = "eventure-dev-secret-change-in-production";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// SQLite connection URL
    pub database_url: String,
    /// HMAC secret for session tokens
    pub jwt_secret: String,
    /// Listening port
    pub port: u16,
    /// Session token lifetime
    pub token_ttl: Duration,
    /// bcrypt cost factor for new passwords
    pub bcrypt_cost: u32,
    /// Seed demo data when the store has no users
    pub seed_on_startup: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            jwt_secret: DEV_JWT_SECRET.to_string(),
            port: DEFAULT_PORT,
            token_ttl: DEFAULT_TOKEN_TTL,
            bcrypt_cost: bcrypt::DEFAULT_COST,
            seed_on_startup: false,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function
    ///
    /// # Arguments
    ///
    /// * `lookup` - Returns the value of a variable, or `None` if unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let jwt_secret = lookup("JWT_SECRET").unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set. Using the development secret.");
            defaults.jwt_secret.clone()
        });

        Self {
            database_url: lookup("DATABASE_URL").unwrap_or(defaults.database_url),
            jwt_secret,
            port: parse_or(&lookup, "SERVER_PORT", defaults.port),
            token_ttl: Duration::from_secs(parse_or(
                &lookup,
                "TOKEN_TTL_SECS",
                defaults.token_ttl.as_secs(),
            )),
            bcrypt_cost: parse_or(&lookup, "BCRYPT_COST", defaults.bcrypt_cost),
            seed_on_startup: parse_or(&lookup, "SEED_ON_STARTUP", defaults.seed_on_startup),
        }
    }

    /// Session keys derived from this configuration
    pub fn session_keys(&self) -> SessionKeys {
        SessionKeys::new(&self.jwt_secret, self.token_ttl)
    }
}

fn parse_or<T: FromStr + Copy>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: {:?}. Using default.", key, raw);
            default
        }),
        None => default,
    }
}

/// Open the SQLite store and run migrations
///
/// In-memory URLs get a single connection that never expires; every
/// connection to `sqlite::memory:` is otherwise a separate, empty database.
///
/// # Arguments
///
/// * `database_url` - e.g. `sqlite://eventure.db?mode=rwc` or `sqlite::memory:`
///
/// # Errors
///
/// `Database` if the URL is invalid or the store cannot be opened,
/// `Migration` if the schema cannot be brought up to date.
///
/// # Example
///
/// ```rust,no_run
/// use eventure::backend::server::config::load_database;
///
/// # async fn example() -> Result<(), eventure::backend::error::BackendError> {
/// let pool = load_database("sqlite::memory:").await?;
/// # Ok(())
/// # }
/// ```
pub async fn load_database(database_url: &str) -> Result<SqlitePool, BackendError> {
    tracing::info!("Connecting to database...");

    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);

    let pool = if database_url.contains(":memory:") || database_url.contains("mode=memory") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}
