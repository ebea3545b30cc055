// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The remote queue seen from the client.
//!
//! Everything the drainer, reconciler and producer need from the server goes
//! through [`RemoteQueueClient`]. Every call resolves to a tagged result;
//! callers match on [`RemoteError`] instead of inspecting flags on a response.

use std::future::Future;
use std::pin::Pin;

use replq_core::{BatchResult, Record, ReplicationTransaction};

use super::transport::TransportError;

/// Error type for remote queue operations.
///
/// `operation` names the call; `request` describes it with its parameters
/// (item type, caps, record ids) and is what the message shows.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Connectivity or authentication failure.
    #[error("{request}: {source}")]
    Transport {
        operation: &'static str,
        request: String,
        #[source]
        source: TransportError,
    },

    /// The server rejected the request.
    #[error("{request}: server error {code}: {message}")]
    Logic {
        operation: &'static str,
        request: String,
        code: String,
        message: String,
    },

    /// The response violates the documented contract.
    #[error("{request}: protocol error: {source}")]
    Protocol {
        operation: &'static str,
        request: String,
        #[source]
        source: replq_core::Error,
    },

    /// The query matched nothing. Not a failure for most callers.
    #[error("{request}: no items found: {message}")]
    EmptyResult {
        operation: &'static str,
        request: String,
        message: String,
    },
}

impl RemoteError {
    /// Returns true for the "no items found" outcome.
    pub fn is_empty_result(&self) -> bool {
        matches!(self, RemoteError::EmptyResult { .. })
    }

    /// Name of the operation that failed.
    pub fn operation(&self) -> &'static str {
        match self {
            RemoteError::Transport { operation, .. }
            | RemoteError::Logic { operation, .. }
            | RemoteError::Protocol { operation, .. }
            | RemoteError::EmptyResult { operation, .. } => operation,
        }
    }
}

/// Result type for remote queue operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Boxed future returned by remote queue operations.
pub type RemoteFuture<'a, T> = Pin<Box<dyn Future<Output = RemoteResult<T>> + Send + 'a>>;

/// An authenticated channel to the remote replication queue.
///
/// Calls are strictly sequential: `&mut self` keeps a second request from
/// being issued while one is outstanding.
pub trait RemoteQueueClient: Send {
    /// Ask the server to process one bounded batch of pending transactions.
    fn process_batch(&mut self, max_batch: u32, max_pending: u32) -> RemoteFuture<'_, BatchResult>;

    /// Create a replication transaction copying `record_id` to `target_id`.
    fn create_transaction(
        &mut self,
        record_id: &str,
        target_id: &str,
    ) -> RemoteFuture<'_, ReplicationTransaction>;

    /// Fetch every record of an item type.
    ///
    /// A type with no records fails with [`RemoteError::EmptyResult`].
    fn query_by_type(&mut self, item_type: &str) -> RemoteFuture<'_, Vec<Record>>;

    /// Look up a vault by exact name.
    fn find_vault(&mut self, name: &str) -> RemoteFuture<'_, Record>;

    /// Records whose name matches `pattern` (`*` wildcard) located in a vault.
    fn find_records(&mut self, pattern: &str, vault_id: &str) -> RemoteFuture<'_, Vec<Record>>;

    /// Delete every item of a type, returning how many were removed.
    fn purge(&mut self, item_type: &str) -> RemoteFuture<'_, u64>;
}
