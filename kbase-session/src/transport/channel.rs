//! In-process transport over a pair of tokio mpsc channels.

use kbase_core::errors::SessionError;
use tokio::sync::mpsc;

use super::{Transport, TransportEvent};
use crate::protocol::OutboundFrame;

/// Server half of an in-process connection.
pub struct ChannelTransport {
    inbound: mpsc::Receiver<String>,
    outbound: Option<mpsc::Sender<String>>,
}

/// Client half of an in-process connection.
pub struct ClientEndpoint {
    to_server: Option<mpsc::Sender<String>>,
    from_server: mpsc::Receiver<String>,
}

/// Create a connected transport/client pair. `capacity` bounds each
/// direction.
pub fn channel_pair(capacity: usize) -> (ChannelTransport, ClientEndpoint) {
    let (client_tx, server_rx) = mpsc::channel(capacity);
    let (server_tx, client_rx) = mpsc::channel(capacity);
    (
        ChannelTransport {
            inbound: server_rx,
            outbound: Some(server_tx),
        },
        ClientEndpoint {
            to_server: Some(client_tx),
            from_server: client_rx,
        },
    )
}

impl Transport for ChannelTransport {
    async fn receive(&mut self) -> TransportEvent {
        match self.inbound.recv().await {
            Some(message) => TransportEvent::Message(message),
            None => TransportEvent::Disconnected,
        }
    }

    async fn send(&mut self, frame: String) -> Result<(), SessionError> {
        let Some(tx) = &self.outbound else {
            return Err(SessionError::TransportClosed);
        };
        tx.send(frame).await.map_err(|_| SessionError::TransportClosed)
    }

    async fn close(&mut self) {
        self.outbound = None;
        self.inbound.close();
    }
}

impl ClientEndpoint {
    /// Send a raw frame.
    pub async fn send_raw(&self, raw: impl Into<String>) -> Result<(), SessionError> {
        let Some(tx) = &self.to_server else {
            return Err(SessionError::TransportClosed);
        };
        tx.send(raw.into())
            .await
            .map_err(|_| SessionError::TransportClosed)
    }

    /// Send `{"message": question}`.
    pub async fn ask(&self, question: &str) -> Result<(), SessionError> {
        self.send_raw(serde_json::json!({ "message": question }).to_string())
            .await
    }

    /// Acknowledge a heartbeat.
    pub async fn ack_heartbeat(&self) -> Result<(), SessionError> {
        self.send_raw(r#"{"type":"heartbeat"}"#).await
    }

    /// Next raw frame from the server, or `None` once the session closed.
    pub async fn recv_raw(&mut self) -> Option<String> {
        self.from_server.recv().await
    }

    /// Next frame from the server, decoded. Undecodable frames end the
    /// stream.
    pub async fn recv(&mut self) -> Option<OutboundFrame> {
        let raw = self.recv_raw().await?;
        serde_json::from_str(&raw).ok()
    }

    /// Drop the client → server direction; the session sees `Disconnected`.
    pub fn disconnect(&mut self) {
        self.to_server = None;
    }
}
