/**
 * API Routes
 *
 * - `POST /graphql` - Execute a GraphQL request
 * - `GET /graphql` - GraphiQL IDE
 * - `GET /health` - Liveness probe
 */

use axum::{routing::get, Json, Router};

use crate::backend::graphql::{graphiql, graphql_handler};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// # Arguments
///
/// * `router` - The router to add routes to
///
/// # Returns
///
/// Router with API routes configured
pub fn configure_api_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/graphql", get(graphiql).post(graphql_handler))
        .route("/health", get(health))
}

/// Liveness probe (GET /health)
async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
