// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! WebSocket protocol messages for client-server communication.
//!
//! Every client message is answered by exactly one server message. The
//! client never has more than one request outstanding on a connection.

use serde::{Deserialize, Serialize};

use crate::batch::BatchItem;
use crate::record::{Record, EMPTY_RESULT_CODE};

/// Restricts a query to a subset of items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QueryFilter {
    /// Items with exactly this name.
    Name { name: String },
    /// Items whose name matches a `*` wildcard pattern and that are located
    /// in the given vault.
    Located { pattern: String, vault_id: String },
}

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Open a session for one identity.
    Login {
        database: String,
        user: String,
        /// Hex-encoded SHA-256 of the password.
        password_digest: String,
    },

    /// Close the current session.
    Logout,

    /// Process one bounded batch of the replication queue.
    ProcessBatch {
        /// Upper bound on transactions attempted by this call.
        max_batch: u32,
        /// Upper bound on transactions left in flight at once.
        max_pending: u32,
    },

    /// Create a replication transaction for a record.
    Replicate { record_id: String, target_id: String },

    /// Fetch all items of a type.
    Query {
        item_type: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        filter: Option<QueryFilter>,
    },

    /// Delete every item of a type. Requires administrative rights.
    Purge { item_type: String },
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Login accepted.
    LoggedIn { user: String },

    /// Logout acknowledged.
    LoggedOut,

    /// Response to ProcessBatch.
    ///
    /// `item` is absent when no transactions exist at all.
    BatchReport {
        #[serde(default)]
        item: Option<BatchItem>,
    },

    /// Response to Replicate.
    Created { id: String },

    /// Response to Query.
    Records { records: Vec<Record> },

    /// Response to Purge.
    Purged { count: u64 },

    /// Request failed.
    Error {
        /// Server fault code; [`EMPTY_RESULT_CODE`] means nothing was found.
        code: String,
        /// Human-readable error description.
        message: String,
    },
}

impl ClientMessage {
    /// Creates a Login message.
    pub fn login(
        database: impl Into<String>,
        user: impl Into<String>,
        password_digest: impl Into<String>,
    ) -> Self {
        ClientMessage::Login {
            database: database.into(),
            user: user.into(),
            password_digest: password_digest.into(),
        }
    }

    /// Creates a ProcessBatch message.
    pub fn process_batch(max_batch: u32, max_pending: u32) -> Self {
        ClientMessage::ProcessBatch {
            max_batch,
            max_pending,
        }
    }

    /// Creates a Replicate message.
    pub fn replicate(record_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        ClientMessage::Replicate {
            record_id: record_id.into(),
            target_id: target_id.into(),
        }
    }

    /// Creates an unfiltered Query message.
    pub fn query(item_type: impl Into<String>) -> Self {
        ClientMessage::Query {
            item_type: item_type.into(),
            filter: None,
        }
    }

    /// Creates a filtered Query message.
    pub fn query_filtered(item_type: impl Into<String>, filter: QueryFilter) -> Self {
        ClientMessage::Query {
            item_type: item_type.into(),
            filter: Some(filter),
        }
    }

    /// Creates a Purge message.
    pub fn purge(item_type: impl Into<String>) -> Self {
        ClientMessage::Purge {
            item_type: item_type.into(),
        }
    }

    /// Short name of the request, used in error context.
    pub fn name(&self) -> &'static str {
        match self {
            ClientMessage::Login { .. } => "login",
            ClientMessage::Logout => "logout",
            ClientMessage::ProcessBatch { .. } => "process_batch",
            ClientMessage::Replicate { .. } => "replicate",
            ClientMessage::Query { .. } => "query",
            ClientMessage::Purge { .. } => "purge",
        }
    }

    /// The request with its parameters, for error messages and logs.
    ///
    /// Never includes the password digest.
    pub fn describe(&self) -> String {
        match self {
            ClientMessage::Login { user, .. } => format!("login as {}", user),
            ClientMessage::Logout => "logout".to_string(),
            ClientMessage::ProcessBatch {
                max_batch,
                max_pending,
            } => format!(
                "process_batch (max_batch={}, max_pending={})",
                max_batch, max_pending
            ),
            ClientMessage::Replicate {
                record_id,
                target_id,
            } => format!("replicate {} to {}", record_id, target_id),
            ClientMessage::Query {
                item_type,
                filter: None,
            } => format!("query {}", item_type),
            ClientMessage::Query {
                item_type,
                filter: Some(QueryFilter::Name { name }),
            } => format!("query {} named '{}'", item_type, name),
            ClientMessage::Query {
                item_type,
                filter: Some(QueryFilter::Located { pattern, vault_id }),
            } => format!(
                "query {} matching '{}' in vault {}",
                item_type, pattern, vault_id
            ),
            ClientMessage::Purge { item_type } => format!("purge {}", item_type),
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

impl ServerMessage {
    /// Creates a BatchReport for a queue that still holds work.
    pub fn batch_report(processed: u32, need_processing: u32, locked_by_others: u32) -> Self {
        ServerMessage::BatchReport {
            item: Some(BatchItem::new(processed, need_processing, locked_by_others)),
        }
    }

    /// Creates a BatchReport for an empty queue.
    pub fn batch_empty() -> Self {
        ServerMessage::BatchReport { item: None }
    }

    /// Creates a Records message.
    pub fn records(records: Vec<Record>) -> Self {
        ServerMessage::Records { records }
    }

    /// Creates an Error message.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Creates the "no items found" error.
    pub fn empty_result(message: impl Into<String>) -> Self {
        ServerMessage::error(EMPTY_RESULT_CODE, message)
    }

    /// Variant name, used in error context.
    pub fn kind(&self) -> &'static str {
        match self {
            ServerMessage::LoggedIn { .. } => "logged_in",
            ServerMessage::LoggedOut => "logged_out",
            ServerMessage::BatchReport { .. } => "batch_report",
            ServerMessage::Created { .. } => "created",
            ServerMessage::Records { .. } => "records",
            ServerMessage::Purged { .. } => "purged",
            ServerMessage::Error { .. } => "error",
        }
    }

    /// Serializes the message to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Deserializes the message from JSON.
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
