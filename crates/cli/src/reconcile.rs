// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Status reconciliation for replication transactions and their logs.

use replq_core::record::{REPLICATION_TXN, REPLICATION_TXN_LOG};
use replq_core::{FinalTally, StatusTally};

use crate::client::{RemoteQueueClient, RemoteResult};

/// Aggregates records of a type by replication status.
pub struct StatusReconciler<'a, C: RemoteQueueClient + ?Sized> {
    client: &'a mut C,
}

impl<'a, C: RemoteQueueClient + ?Sized> StatusReconciler<'a, C> {
    pub fn new(client: &'a mut C) -> Self {
        StatusReconciler { client }
    }

    /// Tally every record of `item_type`.
    ///
    /// A type with no records yields an all-zero tally. Any other query
    /// failure is returned unchanged.
    pub async fn tally(&mut self, item_type: &str) -> RemoteResult<StatusTally> {
        match self.client.query_by_type(item_type).await {
            Ok(records) => {
                let tally = StatusTally::from_statuses(records.iter().map(|r| r.status.as_deref()));
                tracing::debug!(item_type, total = tally.total(), "tallied records");
                Ok(tally)
            }
            Err(e) if e.is_empty_result() => {
                tracing::debug!(item_type, "no records found");
                Ok(StatusTally::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Tally transactions, then their log entries.
    pub async fn final_tally(&mut self) -> RemoteResult<FinalTally> {
        let transactions = self.tally(REPLICATION_TXN).await?;
        let logs = self.tally(REPLICATION_TXN_LOG).await?;
        Ok(FinalTally { transactions, logs })
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
