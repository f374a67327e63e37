/**
 * Realtime Routes
 *
 * - `GET /ws` - WebSocket for room presence, attendee updates and new events
 * - `GET /realtime?eventId=<id>` - SSE stream of one event's attendee updates
 */

use axum::{routing::get, Router};

use crate::backend::realtime::{handle_membership_feed, ws_handler};
use crate::backend::server::state::AppState;

/// Configure realtime routes
pub fn configure_realtime_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/ws", get(ws_handler))
        .route("/realtime", get(handle_membership_feed))
}
