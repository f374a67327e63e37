/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * The `AppState` struct serves as the central state container for the
 * application, holding:
 * - The SQLite connection pool
 * - Session signing keys
 * - The room registry for presence
 * - The membership feed for durable attendee updates
 * - The GraphQL schema, which holds clones of the above
 * - The shutdown signal watched by long-lived responses
 *
 * # Thread Safety
 *
 * Every field is cheap to clone and shares its underlying state:
 * - `SqlitePool` and `broadcast::Sender` are internally reference counted
 * - `RoomRegistry` wraps an `Arc<RwLock<..>>`
 * - `AppSchema` is an `Arc` around the executable schema
 *
 * # State Extraction
 *
 * The `FromRef` implementations allow Axum handlers to extract specific
 * parts of the state without needing the entire `AppState`.
 */

use axum::extract::FromRef;
use sqlx::SqlitePool;

use crate::backend::auth::SessionKeys;
use crate::backend::graphql::{build_schema, AppSchema};
use crate::backend::realtime::{membership_feed, MembershipFeed, RoomRegistry};
use crate::backend::server::shutdown::Shutdown;

/// Application state shared by all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,

    /// Session token keys
    pub sessions: SessionKeys,

    /// Presence rooms of connected sockets
    ///
    /// Owned here and injected into the socket handler and the GraphQL
    /// schema; nothing else holds room state.
    pub rooms: RoomRegistry,

    /// Durable membership change feed
    ///
    /// Every state-changing `joinEvent` publishes here; SSE subscribers of
    /// `/realtime` listen on it.
    pub membership_feed: MembershipFeed,

    /// Executable GraphQL schema
    pub schema: AppSchema,

    /// Fired on server shutdown; ends SSE feeds and sockets
    pub shutdown: Shutdown,
}

impl AppState {
    /// Create state with a fresh room registry and membership feed
    ///
    /// # Arguments
    ///
    /// * `db` - Migrated database pool
    /// * `sessions` - Session signing keys
    /// * `password_cost` - bcrypt cost for new passwords
    pub fn new(db: SqlitePool, sessions: SessionKeys, password_cost: u32) -> Self {
        let rooms = RoomRegistry::new();
        let membership_feed = membership_feed();
        let schema = build_schema(
            db.clone(),
            sessions.clone(),
            rooms.clone(),
            membership_feed.clone(),
            password_cost,
        );

        Self {
            db,
            sessions,
            rooms,
            membership_feed,
            schema,
            shutdown: Shutdown::new(),
        }
    }
}

/// Implement FromRef for the database pool
impl FromRef<AppState> for SqlitePool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db.clone()
    }
}

/// Implement FromRef for RoomRegistry
///
/// This allows the socket handler to extract the registry directly
/// using `State(RoomRegistry)`.
impl FromRef<AppState> for RoomRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.rooms.clone()
    }
}

/// Implement FromRef for the membership feed
impl FromRef<AppState> for MembershipFeed {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.membership_feed.clone()
    }
}

/// Implement FromRef for the shutdown signal
impl FromRef<AppState> for Shutdown {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.shutdown.clone()
    }
}

/// Implement FromRef for the GraphQL schema
impl FromRef<AppState> for AppSchema {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.schema.clone()
    }
}
