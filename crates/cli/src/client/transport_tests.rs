// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tests for the transport module.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use super::transport::{Transport, TransportError, TransportFuture, WebSocketTransport};
use replq_core::protocol::{ClientMessage, ServerMessage};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Scripted transport for testing without real sockets.
pub struct MockTransport {
    connected: bool,
    /// Responses returned by call(), in order.
    responses: Arc<Mutex<VecDeque<ServerMessage>>>,
    /// Requests passed to call().
    requests: Arc<Mutex<Vec<ClientMessage>>>,
    /// Whether connect should fail.
    connect_should_fail: bool,
}

impl MockTransport {
    pub fn new() -> Self {
        MockTransport {
            connected: false,
            responses: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            connect_should_fail: false,
        }
    }

    /// Add a response that will be returned by the next unanswered call().
    pub fn queue_response(&self, msg: ServerMessage) {
        self.responses.lock().unwrap().push_back(msg);
    }

    /// Shared handle on the requests sent so far.
    pub fn requests(&self) -> Arc<Mutex<Vec<ClientMessage>>> {
        Arc::clone(&self.requests)
    }

    /// Set whether connect should fail.
    pub fn set_connect_fail(&mut self, fail: bool) {
        self.connect_should_fail = fail;
    }
}

impl Transport for MockTransport {
    fn connect(&mut self, _url: &str) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            if self.connect_should_fail {
                Err(TransportError::ConnectionFailed("mock failure".into()))
            } else {
                self.connected = true;
                Ok(())
            }
        })
    }

    fn close(&mut self) -> TransportFuture<'_, ()> {
        Box::pin(async move {
            self.connected = false;
            Ok(())
        })
    }

    fn call(&mut self, msg: ClientMessage) -> TransportFuture<'_, ServerMessage> {
        Box::pin(async move {
            if !self.connected {
                return Err(TransportError::ConnectionClosed);
            }
            self.requests.lock().unwrap().push(msg);
            // Running out of script looks like the server hanging up
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or(TransportError::ConnectionClosed)
        })
    }

    fn is_connected(&self) -> bool {
        self.connected
    }
}

#[tokio::test]
async fn test_mock_transport_call_answers_in_order() {
    let mut transport = MockTransport::new();
    transport.queue_response(ServerMessage::batch_empty());
    transport.queue_response(ServerMessage::Purged { count: 3 });
    transport.connect("ws://localhost:1234").await.unwrap();

    let first = transport
        .call(ClientMessage::process_batch(10, 15))
        .await
        .unwrap();
    assert_eq!(first, ServerMessage::batch_empty());

    let second = transport
        .call(ClientMessage::purge("ReplicationTxn"))
        .await
        .unwrap();
    assert_eq!(second, ServerMessage::Purged { count: 3 });

    let requests = transport.requests();
    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0], ClientMessage::process_batch(10, 15));
}

#[tokio::test]
async fn test_mock_transport_call_requires_connection() {
    let mut transport = MockTransport::new();
    let err = transport.call(ClientMessage::Logout).await.unwrap_err();
    assert!(matches!(err, TransportError::ConnectionClosed));
}

#[tokio::test]
async fn test_websocket_transport_call_without_connect() {
    let mut transport = WebSocketTransport::new(Duration::from_secs(1));
    assert!(!transport.is_connected());

    let err = transport.call(ClientMessage::Logout).await.unwrap_err();
    assert!(matches!(err, TransportError::ConnectionClosed));

    // Closing an unconnected transport is a no-op
    transport.close().await.unwrap();
}

#[tokio::test]
async fn test_websocket_transport_connect_refused() {
    // Bind then drop to get a port nothing listens on
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut transport = WebSocketTransport::new(Duration::from_secs(1));
    let err = transport
        .connect(&format!("ws://127.0.0.1:{}", port))
        .await
        .unwrap_err();
    assert!(matches!(err, TransportError::ConnectionFailed(_)));
    assert!(!transport.is_connected());
}

#[test]
fn test_transport_error_display() {
    let err = TransportError::Timeout(Duration::from_secs(5));
    assert!(err.to_string().contains("5s"));
    let err = TransportError::ConnectionFailed("refused".into());
    assert!(err.to_string().contains("refused"));
}
