// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Authenticated session with the replication server.
//!
//! A session is bound to one identity for its whole life. Acting as a
//! different user means logging out and opening a new session.

use std::time::Duration;

use sha2::{Digest, Sha256};

use replq_core::protocol::{ClientMessage, QueryFilter, ServerMessage};
use replq_core::record::{EMPTY_RESULT_CODE, VAULT};
use replq_core::{BatchResult, Record, ReplicationTransaction};

use super::remote::{RemoteError, RemoteFuture, RemoteQueueClient, RemoteResult};
use super::transport::{Transport, WebSocketTransport};
use crate::config::{Identity, ServerConfig};

/// Hex-encoded SHA-256 of a password, as sent in the login request.
pub fn password_digest(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// A logged-in connection implementing [`RemoteQueueClient`].
pub struct RemoteSession<T: Transport = WebSocketTransport> {
    /// Transport layer.
    transport: T,
    /// User this session acts as.
    user: String,
}

impl RemoteSession<WebSocketTransport> {
    /// Log in over a new WebSocket connection.
    pub async fn open(server: &ServerConfig, identity: &Identity) -> RemoteResult<Self> {
        let transport = WebSocketTransport::new(Duration::from_secs(server.request_timeout_secs));
        Self::login(server, identity, transport).await
    }
}

impl<T: Transport> RemoteSession<T> {
    /// Connect the transport and log in as `identity`.
    pub async fn login(server: &ServerConfig, identity: &Identity, mut transport: T) -> RemoteResult<Self> {
        tracing::info!(user = %identity.user, url = %server.url, "logging in");

        transport
            .connect(&server.url)
            .await
            .map_err(|source| RemoteError::Transport {
                operation: "login",
                request: format!("login as {}", identity.user),
                source,
            })?;

        let mut session = RemoteSession {
            transport,
            user: identity.user.clone(),
        };

        let request = ClientMessage::login(
            server.database.clone(),
            identity.user.clone(),
            password_digest(&identity.password),
        );
        let described = request.describe();
        let response = match session.request(request).await {
            Ok(response) => response,
            Err(e) => {
                let _ = session.transport.close().await;
                return Err(e);
            }
        };

        match response {
            ServerMessage::LoggedIn { .. } => {
                tracing::info!(user = %session.user, "logged in");
                Ok(session)
            }
            other => {
                let _ = session.transport.close().await;
                Err(unexpected("login", described, &other))
            }
        }
    }

    /// User this session acts as.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// Log out and close the connection.
    ///
    /// The connection is closed even if the logout request fails.
    pub async fn logout(mut self) -> RemoteResult<()> {
        let result = match self.request(ClientMessage::Logout).await {
            Ok(ServerMessage::LoggedOut) => Ok(()),
            Ok(other) => Err(unexpected("logout", "logout".to_string(), &other)),
            Err(e) => Err(e),
        };
        let _ = self.transport.close().await;
        tracing::info!(user = %self.user, "logged out");
        result
    }

    /// Send one request and classify server-reported errors.
    async fn request(&mut self, msg: ClientMessage) -> RemoteResult<ServerMessage> {
        let operation = msg.name();
        let request = msg.describe();
        tracing::debug!(operation, user = %self.user, %request, "request");

        let response = match self.transport.call(msg).await {
            Ok(response) => response,
            Err(source) => {
                return Err(RemoteError::Transport {
                    operation,
                    request,
                    source,
                })
            }
        };

        match response {
            ServerMessage::Error { code, message } if code == EMPTY_RESULT_CODE => {
                Err(RemoteError::EmptyResult {
                    operation,
                    request,
                    message,
                })
            }
            ServerMessage::Error { code, message } => Err(RemoteError::Logic {
                operation,
                request,
                code,
                message,
            }),
            other => Ok(other),
        }
    }

    async fn records(&mut self, msg: ClientMessage) -> RemoteResult<Vec<Record>> {
        let operation = msg.name();
        let request = msg.describe();
        match self.request(msg).await? {
            ServerMessage::Records { records } => Ok(records),
            other => Err(unexpected(operation, request, &other)),
        }
    }
}

impl<T: Transport> RemoteQueueClient for RemoteSession<T> {
    fn process_batch(&mut self, max_batch: u32, max_pending: u32) -> RemoteFuture<'_, BatchResult> {
        Box::pin(async move {
            let msg = ClientMessage::process_batch(max_batch, max_pending);
            let operation = msg.name();
            let request = msg.describe();
            match self.request(msg).await? {
                ServerMessage::BatchReport { item } => BatchResult::from_report(item.as_ref())
                    .map_err(|source| RemoteError::Protocol {
                        operation,
                        request,
                        source,
                    }),
                other => Err(unexpected(operation, request, &other)),
            }
        })
    }

    fn create_transaction(
        &mut self,
        record_id: &str,
        target_id: &str,
    ) -> RemoteFuture<'_, ReplicationTransaction> {
        let record_id = record_id.to_string();
        let target_id = target_id.to_string();
        Box::pin(async move {
            let request = ClientMessage::replicate(record_id.clone(), target_id.clone());
            let described = request.describe();
            match self.request(request).await? {
                ServerMessage::Created { id } => {
                    Ok(ReplicationTransaction::created(id, record_id, target_id))
                }
                other => Err(unexpected("replicate", described, &other)),
            }
        })
    }

    fn query_by_type(&mut self, item_type: &str) -> RemoteFuture<'_, Vec<Record>> {
        let request = ClientMessage::query(item_type);
        Box::pin(async move { self.records(request).await })
    }

    fn find_vault(&mut self, name: &str) -> RemoteFuture<'_, Record> {
        let name = name.to_string();
        Box::pin(async move {
            let request = ClientMessage::query_filtered(VAULT, QueryFilter::Name { name: name.clone() });
            let described = request.describe();
            self.records(request)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| RemoteError::EmptyResult {
                    operation: "query",
                    request: described,
                    message: format!("no vault named '{}'", name),
                })
        })
    }

    fn find_records(&mut self, pattern: &str, vault_id: &str) -> RemoteFuture<'_, Vec<Record>> {
        let request = ClientMessage::query_filtered(
            replq_core::record::FILE,
            QueryFilter::Located {
                pattern: pattern.to_string(),
                vault_id: vault_id.to_string(),
            },
        );
        Box::pin(async move { self.records(request).await })
    }

    fn purge(&mut self, item_type: &str) -> RemoteFuture<'_, u64> {
        let request = ClientMessage::purge(item_type);
        Box::pin(async move {
            let described = request.describe();
            match self.request(request).await? {
                ServerMessage::Purged { count } => Ok(count),
                other => Err(unexpected("purge", described, &other)),
            }
        })
    }
}

fn unexpected(operation: &'static str, request: String, response: &ServerMessage) -> RemoteError {
    RemoteError::Protocol {
        operation,
        request,
        source: replq_core::Error::UnexpectedResponse {
            request: operation,
            response: response.kind().to_string(),
        },
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
