/**
 * Event Room Registry
 *
 * Tracks, per event id, which realtime connections are present, and pushes
 * messages to them. The registry is an ordinary value owned by `AppState`
 * and handed to whoever needs it; there is no global instance.
 *
 * # Presence Model
 *
 * A room member is a connection carrying a display name. The same
 * connection appears at most once per room; re-joining only updates its
 * name. Two connections that share a name are two members, so the rendered
 * presence list can contain repeated names.
 *
 * # Consistency
 *
 * All state lives behind one `RwLock`. Every mutating operation performs its
 * broadcast while still holding the write lock, so each `eventUsersUpdate`
 * reflects a consistent snapshot and concurrent joins are serialized.
 * Outbound queues are unbounded, so sending never waits on a slow socket.
 *
 * # Liveness
 *
 * There is no heartbeat. A socket task calls `disconnect` when its transport
 * closes; queues that were dropped without that are pruned lazily the next
 * time their room is broadcast to.
 */

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::{
    mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender},
    RwLock,
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::ServerMessage;

/// Display name used when a client joins without one
pub const ANONYMOUS: &str = "Anonymous";

/// Unique identifier for a realtime connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Room member: a connection and the name it joined with
#[derive(Debug, Clone)]
struct Member {
    connection: ConnectionId,
    name: String,
}

#[derive(Default)]
struct Inner {
    /// connection -> outbound queue
    connections: HashMap<ConnectionId, UnboundedSender<ServerMessage>>,
    /// event id -> members in join order
    rooms: HashMap<String, Vec<Member>>,
}

impl Inner {
    /// Drop members whose queue is gone; drop the room if it ends up empty
    fn prune(&mut self, event_id: &str) {
        let Inner { connections, rooms } = self;
        if let Some(members) = rooms.get_mut(event_id) {
            members.retain(|m| {
                connections
                    .get(&m.connection)
                    .map(|tx| !tx.is_closed())
                    .unwrap_or(false)
            });
            if members.is_empty() {
                rooms.remove(event_id);
            }
        }
    }

    fn names(&self, event_id: &str) -> Vec<String> {
        self.rooms
            .get(event_id)
            .map(|members| members.iter().map(|m| m.name.clone()).collect())
            .unwrap_or_default()
    }

    /// Send to every member of a room, pruning members whose send fails
    fn send_room(&mut self, event_id: &str, message: &ServerMessage) -> usize {
        let Inner { connections, rooms } = self;
        let Some(members) = rooms.get_mut(event_id) else {
            return 0;
        };

        let before = members.len();
        members.retain(|m| {
            connections
                .get(&m.connection)
                .map(|tx| tx.send(message.clone()).is_ok())
                .unwrap_or(false)
        });
        let delivered = members.len();

        if before != delivered {
            tracing::debug!(
                "Broadcast to room {}: {} dead connections cleaned up, {} active",
                event_id,
                before - delivered,
                delivered
            );
        }
        if members.is_empty() {
            rooms.remove(event_id);
        }
        delivered
    }

    /// Broadcast the current presence list of a room to its members
    fn publish_presence(&mut self, event_id: &str) -> Vec<String> {
        self.prune(event_id);
        let users = self.names(event_id);
        if !users.is_empty() {
            let update = ServerMessage::EventUsersUpdate {
                event_id: event_id.to_string(),
                users: users.clone(),
            };
            self.send_room(event_id, &update);
        }
        users
    }
}

/// Registry of realtime connections and the event rooms they are in
#[derive(Default, Clone)]
pub struct RoomRegistry {
    inner: Arc<RwLock<Inner>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new connection
    ///
    /// Returns a tuple of (connection_id, receiver) where:
    /// - connection_id: identifies the connection in later calls
    /// - receiver: queue of messages to write to the socket
    pub async fn connect(&self) -> (ConnectionId, UnboundedReceiver<ServerMessage>) {
        let (tx, rx) = unbounded_channel();
        let id = ConnectionId::new();

        let mut guard = self.inner.write().await;
        guard.connections.insert(id, tx);
        tracing::debug!("Connection {} registered, total: {}", id, guard.connections.len());

        (id, rx)
    }

    /// Add a connection to an event room and broadcast the new presence list
    ///
    /// The list goes to every member of the room, the joiner included.
    ///
    /// # Arguments
    ///
    /// * `connection` - A connection returned by `connect`
    /// * `event_id` - Room to join; must not be blank
    /// * `name` - Display name; blank or absent becomes "Anonymous"
    ///
    /// # Returns
    ///
    /// The presence list after the join, in join order
    ///
    /// # Errors
    ///
    /// * `Validation` - If `event_id` is blank
    /// * `StateError` - If the connection is not registered
    pub async fn join(
        &self,
        connection: ConnectionId,
        event_id: &str,
        name: Option<&str>,
    ) -> Result<Vec<String>, BackendError> {
        let event_id = room_key(event_id);
        if event_id.is_empty() {
            return Err(BackendError::validation("eventId", "eventId must not be empty"));
        }
        let name = display_name(name);

        let mut guard = self.inner.write().await;
        if !guard.connections.contains_key(&connection) {
            return Err(BackendError::state(format!(
                "connection {} is not registered",
                connection
            )));
        }

        let members = guard.rooms.entry(event_id.to_string()).or_default();
        match members.iter_mut().find(|m| m.connection == connection) {
            Some(existing) => existing.name = name.clone(),
            None => members.push(Member {
                connection,
                name: name.clone(),
            }),
        }

        tracing::info!("{} ({}) joined room {}", name, connection, event_id);
        Ok(guard.publish_presence(event_id))
    }

    /// Remove a connection from an event room
    ///
    /// If it was a member, the remaining members receive the updated list.
    ///
    /// # Returns
    ///
    /// Whether the connection was in the room
    pub async fn leave(&self, connection: ConnectionId, event_id: &str) -> bool {
        let event_id = room_key(event_id);
        let mut guard = self.inner.write().await;

        let removed = match guard.rooms.get_mut(event_id) {
            Some(members) => {
                let before = members.len();
                members.retain(|m| m.connection != connection);
                before != members.len()
            }
            None => false,
        };

        if removed {
            tracing::info!("{} left room {}", connection, event_id);
            guard.publish_presence(event_id);
        }
        removed
    }

    /// Forget a connection entirely
    ///
    /// Removes it from every room it was in (each receives an updated
    /// presence list) and drops its queue.
    ///
    /// # Returns
    ///
    /// Event ids of the rooms the connection was removed from
    pub async fn disconnect(&self, connection: ConnectionId) -> Vec<String> {
        let mut guard = self.inner.write().await;
        guard.connections.remove(&connection);

        let mut affected = Vec::new();
        for (event_id, members) in guard.rooms.iter_mut() {
            let before = members.len();
            members.retain(|m| m.connection != connection);
            if before != members.len() {
                affected.push(event_id.clone());
            }
        }

        for event_id in &affected {
            guard.publish_presence(event_id);
        }

        tracing::debug!(
            "Connection {} disconnected from {} rooms, remaining connections: {}",
            connection,
            affected.len(),
            guard.connections.len()
        );
        affected
    }

    /// Deliver a message to every member of an event room
    ///
    /// # Returns
    ///
    /// Number of connections the message was queued for (0 for an empty or
    /// unknown room)
    pub async fn broadcast(&self, event_id: &str, message: ServerMessage) -> usize {
        let mut guard = self.inner.write().await;
        guard.send_room(room_key(event_id), &message)
    }

    /// Deliver a message to every registered connection
    pub async fn broadcast_all(&self, message: ServerMessage) -> usize {
        let mut guard = self.inner.write().await;
        guard
            .connections
            .retain(|_, tx| tx.send(message.clone()).is_ok());
        guard.connections.len()
    }

    /// Deliver a message to one connection
    ///
    /// # Returns
    ///
    /// `false` if the connection is unknown or its queue is closed
    pub async fn send_to(&self, connection: ConnectionId, message: ServerMessage) -> bool {
        let guard = self.inner.read().await;
        guard
            .connections
            .get(&connection)
            .map(|tx| tx.send(message).is_ok())
            .unwrap_or(false)
    }

    /// Current presence list of a room, in join order
    pub async fn participants(&self, event_id: &str) -> Vec<String> {
        self.inner.read().await.names(room_key(event_id))
    }

    /// Number of connections in a room
    pub async fn subscriber_count(&self, event_id: &str) -> usize {
        let guard = self.inner.read().await;
        guard.rooms.get(room_key(event_id)).map(|v| v.len()).unwrap_or(0)
    }

    /// Number of non-empty rooms
    pub async fn room_count(&self) -> usize {
        self.inner.read().await.rooms.len()
    }

    /// Number of registered connections
    pub async fn connection_count(&self) -> usize {
        self.inner.read().await.connections.len()
    }
}

/// Every public entry point maps an event id to its room the same way
fn room_key(event_id: &str) -> &str {
    event_id.trim()
}

fn display_name(name: Option<&str>) -> String {
    match name.map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => ANONYMOUS.to_string(),
    }
}
