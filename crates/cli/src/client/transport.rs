// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Transport abstraction for request/response calls over WebSocket.
//!
//! Provides a trait-based transport layer that enables:
//! - Real WebSocket connections for production
//! - Scripted transports for unit testing

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use replq_core::protocol::{ClientMessage, ServerMessage};

/// Error type for transport operations.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection failed.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// Connection closed unexpectedly.
    #[error("connection closed")]
    ConnectionClosed,

    /// Send failed.
    #[error("send failed: {0}")]
    SendFailed(String),

    /// Receive failed.
    #[error("receive failed: {0}")]
    ReceiveFailed(String),

    /// No response arrived within the request timeout.
    #[error("no response within {0:?}")]
    Timeout(Duration),

    /// Serialization/deserialization failed.
    #[error("serialization error: {0}")]
    SerializationError(String),
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Boxed future returned by transport operations.
pub type TransportFuture<'a, T> = Pin<Box<dyn Future<Output = TransportResult<T>> + Send + 'a>>;

/// A channel that answers every request with exactly one response.
///
/// Implementations must not pipeline: `call` resolves only after the
/// response to its own request has arrived.
pub trait Transport: Send {
    /// Connect to a remote server.
    fn connect(&mut self, url: &str) -> TransportFuture<'_, ()>;

    /// Close the connection. Closing a closed transport is a no-op.
    fn close(&mut self) -> TransportFuture<'_, ()>;

    /// Send a request and wait for its response.
    fn call(&mut self, msg: ClientMessage) -> TransportFuture<'_, ServerMessage>;

    /// Check if connected.
    fn is_connected(&self) -> bool;
}

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

/// WebSocket transport implementation using tokio-tungstenite.
pub struct WebSocketTransport {
    /// The WebSocket connection, if connected.
    ws: Option<WsStream>,
    /// Upper bound on waiting for a single response.
    request_timeout: Duration,
}

impl WebSocketTransport {
    /// Create a new WebSocket transport.
    pub fn new(request_timeout: Duration) -> Self {
        WebSocketTransport {
            ws: None,
            request_timeout,
        }
    }

    async fn read_response(ws: &mut WsStream) -> TransportResult<ServerMessage> {
        use futures_util::StreamExt;
        use tokio_tungstenite::tungstenite::Message;

        loop {
            match ws.next().await {
                Some(Ok(Message::Text(text))) => {
                    return ServerMessage::from_json(&text)
                        .map_err(|e| TransportError::SerializationError(e.to_string()));
                }
                Some(Ok(Message::Close(_))) | None => return Err(TransportError::ConnectionClosed),
                // Ping/pong and binary frames carry no responses
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(TransportError::ReceiveFailed(e.to_string())),
            }
        }
    }
}

impl Transport for WebSocketTransport {
    fn connect(&mut self, url: &str) -> TransportFuture<'_, ()> {
        let url = url.to_string();
        Box::pin(async move {
            let (ws, _) = tokio_tungstenite::connect_async(&url)
                .await
                .map_err(|e| TransportError::ConnectionFailed(format!("{}: {}", url, e)))?;
            self.ws = Some(ws);
            Ok(())
        })
    }

    fn close(&mut self) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            if let Some(mut ws) = self.ws.take() {
                // Peer may already be gone; nothing useful to report
                let _ = ws.close(None).await;
            }
            Ok(())
        })
    }

    fn call(&mut self, msg: ClientMessage) -> TransportFuture<'_, ServerMessage> {
        Box::pin(async move {
            use futures_util::SinkExt;
            use tokio_tungstenite::tungstenite::Message;

            let json = msg
                .to_json()
                .map_err(|e| TransportError::SerializationError(e.to_string()))?;
            let timeout = self.request_timeout;
            let ws = self.ws.as_mut().ok_or(TransportError::ConnectionClosed)?;

            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.ws = None;
                return Err(TransportError::SendFailed(e.to_string()));
            }

            match tokio::time::timeout(timeout, Self::read_response(ws)).await {
                Ok(Ok(response)) => Ok(response),
                Ok(Err(e)) => {
                    self.ws = None;
                    Err(e)
                }
                Err(_) => {
                    // A late response would be read as the answer to the next
                    // request, so the connection cannot be reused
                    self.ws = None;
                    Err(TransportError::Timeout(timeout))
                }
            }
        })
    }

    fn is_connected(&self) -> bool {
        self.ws.is_some()
    }
}
