/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * - CORS allows any origin, as the mobile and web clients are served from
 *   elsewhere
 * - Every request is traced through `tower_http::trace::TraceLayer`
 */

use axum::Router;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::realtime_routes::configure_realtime_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
///
/// # Route Details
///
/// ## API Routes
///
/// - `POST /graphql` - GraphQL endpoint
/// - `GET /graphql` - GraphiQL IDE
/// - `GET /health` - Liveness probe
///
/// ## Realtime Routes
///
/// - `GET /ws` - Realtime WebSocket
/// - `GET /realtime?eventId=` - Membership SSE feed
///
/// ## Fallback
///
/// The fallback handler returns 404 for unknown routes.
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_api_routes(router);
    let router = configure_realtime_routes(router);

    // Fallback handler for 404
    let router = router.fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") });

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
