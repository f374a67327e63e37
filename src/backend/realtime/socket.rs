/**
 * Realtime Socket Handler
 *
 * This module implements the WebSocket endpoint at `/ws`. Each socket is
 * registered with the `RoomRegistry`, then a single task multiplexes two
 * directions with `tokio::select!`:
 *
 * - queued `ServerMessage`s from the registry are written to the socket
 * - client frames are parsed and applied to the registry
 *
 * The socket is unauthenticated; display names are whatever the client
 * sends. Bad frames and rejected joins are answered with an `error` frame
 * to that socket only and never close it. When either direction ends the
 * connection is disconnected from every room. On server shutdown the
 * socket is sent a close frame and ends the same way.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};

use crate::backend::error::BackendError;
use crate::backend::realtime::rooms::{ConnectionId, RoomRegistry};
use crate::backend::server::shutdown::Shutdown;
use crate::shared::{ClientMessage, ServerMessage};

/// Upgrade handler for GET /ws
pub async fn ws_handler(
    State(rooms): State<RoomRegistry>,
    State(shutdown): State<Shutdown>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(rooms, shutdown, socket))
}

async fn handle_socket(rooms: RoomRegistry, shutdown: Shutdown, socket: WebSocket) {
    let (connection, mut outbound) = rooms.connect().await;
    let (mut sender, mut receiver) = socket.split();

    tracing::info!("[Socket] Connection {} opened", connection);

    loop {
        tokio::select! {
            queued = outbound.recv() => {
                let Some(message) = queued else { break };
                let text = match message.to_json() {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::error!("[Socket] Failed to serialize message for {}: {}", connection, e);
                        continue;
                    }
                };
                if let Err(e) = sender.send(Message::Text(text.into())).await {
                    tracing::debug!("[Socket] Write to {} failed: {}", connection, e);
                    break;
                }
            }
            incoming = receiver.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        handle_client_frame(&rooms, connection, text.as_str()).await;
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => {
                        // Ping/pong frames are answered by the transport; binary is ignored
                    }
                    Some(Err(e)) => {
                        tracing::debug!("[Socket] Read from {} failed: {}", connection, e);
                        break;
                    }
                }
            }
            _ = shutdown.wait() => {
                tracing::debug!("[Socket] Closing {} for shutdown", connection);
                let _ = sender.send(Message::Close(None)).await;
                break;
            }
        }
    }

    rooms.disconnect(connection).await;
    tracing::info!("[Socket] Connection {} closed", connection);
}

/// Apply one client text frame
///
/// Failures are reported back to the sending connection only.
pub async fn handle_client_frame(rooms: &RoomRegistry, connection: ConnectionId, text: &str) {
    if let Err(err) = apply_client_frame(rooms, connection, text).await {
        tracing::warn!("[Socket] Rejected frame from {}: {}", connection, err);
        rooms
            .send_to(
                connection,
                ServerMessage::Error {
                    message: err.message(),
                },
            )
            .await;
    }
}

async fn apply_client_frame(
    rooms: &RoomRegistry,
    connection: ConnectionId,
    text: &str,
) -> Result<(), BackendError> {
    match ClientMessage::from_json(text)? {
        ClientMessage::JoinEventRoom { event_id, name } => {
            rooms.join(connection, &event_id, name.as_deref()).await?;
        }
        ClientMessage::LeaveEventRoom { event_id } => {
            rooms.leave(connection, &event_id).await;
        }
        ClientMessage::Ping => {
            rooms.send_to(connection, ServerMessage::Pong).await;
        }
    }
    Ok(())
}
