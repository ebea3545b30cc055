// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Creation of replication transactions.
//!
//! Each record gets its own independent request. A failure for one record
//! is recorded against that record and does not stop the rest; nothing is
//! rolled back.

use replq_core::{Record, ReplicationTransaction};

use crate::client::{RemoteQueueClient, RemoteResult};

/// Result of asking the server to replicate one record.
#[derive(Debug)]
pub struct ReplicationOutcome {
    pub record: Record,
    pub result: RemoteResult<ReplicationTransaction>,
}

impl ReplicationOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Counts over a set of outcomes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplicationSummary {
    pub requested: usize,
    pub created: usize,
    pub failed: usize,
}

impl ReplicationSummary {
    pub fn from_outcomes(outcomes: &[ReplicationOutcome]) -> Self {
        let created = outcomes.iter().filter(|o| o.is_ok()).count();
        ReplicationSummary {
            requested: outcomes.len(),
            created,
            failed: outcomes.len() - created,
        }
    }
}

/// Records selected for replication from a source vault.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub source_vault: Record,
    pub records: Vec<Record>,
}

/// Issues replicate requests through a [`RemoteQueueClient`].
pub struct Producer<'a, C: RemoteQueueClient + ?Sized> {
    client: &'a mut C,
}

impl<'a, C: RemoteQueueClient + ?Sized> Producer<'a, C> {
    pub fn new(client: &'a mut C) -> Self {
        Producer { client }
    }

    /// Resolve a vault by name.
    pub async fn resolve_vault(&mut self, name: &str) -> RemoteResult<Record> {
        self.client.find_vault(name).await
    }

    /// Records matching `pattern` in the named source vault.
    ///
    /// A missing vault is an error; a vault with no matching records yields
    /// an empty selection.
    pub async fn select(&mut self, source_vault: &str, pattern: &str) -> RemoteResult<Selection> {
        let vault = self.resolve_vault(source_vault).await?;
        let records = match self.client.find_records(pattern, &vault.id).await {
            Ok(records) => records,
            Err(e) if e.is_empty_result() => Vec::new(),
            Err(e) => return Err(e),
        };
        tracing::info!(vault = %source_vault, pattern, count = records.len(), "selected records");
        Ok(Selection {
            source_vault: vault,
            records,
        })
    }

    /// Request a replication transaction for every record.
    ///
    /// Returns exactly one outcome per input record, in input order.
    pub async fn replicate(
        &mut self,
        records: Vec<Record>,
        target_location_id: &str,
    ) -> Vec<ReplicationOutcome> {
        let mut outcomes = Vec::with_capacity(records.len());
        for record in records {
            let result = self
                .client
                .create_transaction(&record.id, target_location_id)
                .await;
            if let Err(e) = &result {
                tracing::warn!(record = %record.label(), error = %e, "failed to request replication");
            }
            outcomes.push(ReplicationOutcome { record, result });
        }
        outcomes
    }
}

#[cfg(test)]
#[path = "producer_tests.rs"]
mod tests;
