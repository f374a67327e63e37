/**
 * Server Initialization
 *
 * This module builds the application from a `ServerConfig`.
 *
 * # Initialization Process
 *
 * 1. Open the store and run migrations
 * 2. Optionally seed demo data into an empty store
 * 3. Create the room registry, membership feed and GraphQL schema
 * 4. Create and configure the router
 *
 * The returned `Shutdown` must be triggered when the server stops, or open
 * SSE feeds and sockets keep graceful shutdown waiting.
 */

use axum::Router;

use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::seed::seed_if_empty;
use crate::backend::server::config::{load_database, ServerConfig};
use crate::backend::server::shutdown::Shutdown;
use crate::backend::server::state::AppState;

/// Create the application state from configuration
///
/// # Errors
///
/// Fails if the store cannot be opened, migrated or seeded.
pub async fn create_state(config: &ServerConfig) -> Result<AppState, BackendError> {
    let db = load_database(&config.database_url).await?;

    if config.seed_on_startup && seed_if_empty(&db, config.bcrypt_cost).await? {
        tracing::info!("Seeded demo data into empty store");
    }

    let state = AppState::new(db, config.session_keys(), config.bcrypt_cost);
    tracing::info!("Room registry and membership feed initialized");

    Ok(state)
}

/// Create and configure the Axum application
///
/// # Returns
///
/// Configured Axum Router ready to serve requests, and the signal that
/// ends its long-lived responses
///
/// # Example
///
/// ```rust,no_run
/// use eventure::backend::server::{config::ServerConfig, init::create_app};
///
/// # async fn example() -> Result<(), eventure::backend::error::BackendError> {
/// let (app, shutdown) = create_app(&ServerConfig::from_env()).await?;
/// # Ok(())
/// # }
/// ```
pub async fn create_app(config: &ServerConfig) -> Result<(Router, Shutdown), BackendError> {
    tracing::info!("Initializing Eventure backend server");

    let state = create_state(config).await?;
    let shutdown = state.shutdown.clone();
    let app = create_router(state);

    tracing::info!("Router configured");
    Ok((app, shutdown))
}
