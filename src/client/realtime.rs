/**
 * Realtime Socket Client
 *
 * Connects to the server's `/ws` endpoint and exchanges JSON text frames.
 * Control frames are answered by tungstenite itself and skipped here.
 */

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::client::error::ClientError;
use crate::shared::{ClientConfig, ClientMessage, ServerMessage};

/// An open realtime connection
pub struct RealtimeClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl RealtimeClient {
    /// Open a connection to `config.realtime_url`
    pub async fn connect(config: &ClientConfig) -> Result<Self, ClientError> {
        config.validate()?;
        let (stream, _) = connect_async(config.realtime_url.as_str()).await?;
        tracing::debug!("Connected to {}", config.realtime_url);
        Ok(Self { stream })
    }

    /// Send one frame
    pub async fn send(&mut self, message: &ClientMessage) -> Result<(), ClientError> {
        let text = message.to_json()?;
        self.stream.send(WsMessage::text(text)).await?;
        Ok(())
    }

    /// Wait for the next server frame
    ///
    /// # Errors
    ///
    /// `Closed` once the server closes the connection.
    pub async fn recv(&mut self) -> Result<ServerMessage, ClientError> {
        while let Some(frame) = self.stream.next().await {
            match frame? {
                WsMessage::Text(text) => return Ok(ServerMessage::from_json(text.as_str())?),
                WsMessage::Close(_) => return Err(ClientError::Closed),
                _ => {}
            }
        }
        Err(ClientError::Closed)
    }

    /// Wait up to `timeout` for the next server frame
    pub async fn recv_timeout(
        &mut self,
        timeout: Duration,
    ) -> Result<Option<ServerMessage>, ClientError> {
        match tokio::time::timeout(timeout, self.recv()).await {
            Ok(result) => result.map(Some),
            Err(_) => Ok(None),
        }
    }

    /// Enter an event's presence room
    pub async fn join_room(&mut self, event_id: &str, name: Option<&str>) -> Result<(), ClientError> {
        self.send(&ClientMessage::JoinEventRoom {
            event_id: event_id.to_string(),
            name: name.map(str::to_string),
        })
        .await
    }

    /// Leave an event's presence room
    pub async fn leave_room(&mut self, event_id: &str) -> Result<(), ClientError> {
        self.send(&ClientMessage::LeaveEventRoom {
            event_id: event_id.to_string(),
        })
        .await
    }

    pub async fn ping(&mut self) -> Result<(), ClientError> {
        self.send(&ClientMessage::Ping).await
    }

    /// Close the connection; the server drops this client from every room
    pub async fn close(mut self) -> Result<(), ClientError> {
        self.stream.close(None).await?;
        Ok(())
    }
}
