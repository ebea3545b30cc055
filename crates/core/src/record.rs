// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Records returned by server queries and replication transactions.

use serde::{Deserialize, Serialize};

use crate::status::ReplicationStatus;

/// Item type for replication transactions.
pub const REPLICATION_TXN: &str = "ReplicationTxn";
/// Item type for the read-only log of replication attempts.
pub const REPLICATION_TXN_LOG: &str = "ReplicationTxnLog";
/// Item type for stored files.
pub const FILE: &str = "File";
/// Item type for vaults (replication targets).
pub const VAULT: &str = "Vault";

/// Server error code meaning "no items found".
///
/// A query that matches nothing is reported with this code rather than an
/// empty list.
pub const EMPTY_RESULT_CODE: &str = "0";

/// A record returned by a query.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Record {
    /// Server-assigned identifier.
    pub id: String,
    /// Raw replication status, when the item type carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Display name (filename for files, name for vaults).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Record {
    pub fn new(id: impl Into<String>) -> Self {
        Record {
            id: id.into(),
            status: None,
            name: None,
        }
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name if present, otherwise the id.
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// One unit of replication work, owned by the remote queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicationTransaction {
    pub id: String,
    pub source_record_id: String,
    pub target_location_id: String,
    pub status: ReplicationStatus,
}

impl ReplicationTransaction {
    /// A transaction freshly accepted by the server.
    pub fn created(
        id: impl Into<String>,
        source_record_id: impl Into<String>,
        target_location_id: impl Into<String>,
    ) -> Self {
        ReplicationTransaction {
            id: id.into(),
            source_record_id: source_record_id.into(),
            target_location_id: target_location_id.into(),
            status: ReplicationStatus::NotStarted,
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
