// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Administrative removal of replication transactions and logs.
//!
//! Requires a session for a user with delete rights on both item types.

use replq_core::record::{REPLICATION_TXN, REPLICATION_TXN_LOG};

use crate::client::{RemoteQueueClient, RemoteResult};

/// Result of purging one item type.
#[derive(Debug)]
pub struct PurgeOutcome {
    pub item_type: &'static str,
    pub result: RemoteResult<u64>,
}

/// Delete all transactions, then all log entries.
///
/// A failure for one type is reported and does not prevent the other.
/// "No items found" counts as zero deleted.
pub async fn purge_replication_items<C: RemoteQueueClient + ?Sized>(
    client: &mut C,
) -> Vec<PurgeOutcome> {
    let mut outcomes = Vec::with_capacity(2);
    for item_type in [REPLICATION_TXN, REPLICATION_TXN_LOG] {
        let result = match client.purge(item_type).await {
            Err(e) if e.is_empty_result() => Ok(0),
            other => other,
        };
        match &result {
            Ok(count) => tracing::info!(item_type, count, "purged"),
            Err(e) => tracing::warn!(item_type, error = %e, "purge failed"),
        }
        outcomes.push(PurgeOutcome { item_type, result });
    }
    outcomes
}

#[cfg(test)]
#[path = "purge_tests.rs"]
mod tests;
