// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scripted [`RemoteQueueClient`] shared by drain, reconcile, producer and
//! purge tests.

#![allow(clippy::unwrap_used)]

use std::collections::{HashMap, HashSet, VecDeque};

use replq_core::record::{FILE, VAULT};
use replq_core::{BatchResult, ClientMessage, QueryFilter, Record, ReplicationTransaction};

use super::remote::{RemoteError, RemoteFuture, RemoteQueueClient, RemoteResult};
use super::transport::TransportError;

/// Canned answer for a query or purge.
#[derive(Debug, Clone)]
pub enum Scripted<T> {
    Ok(T),
    Empty,
    Fail { code: String, message: String },
}

impl<T: Clone> Scripted<T> {
    pub fn fail(code: &str, message: &str) -> Self {
        Scripted::Fail {
            code: code.to_string(),
            message: message.to_string(),
        }
    }

    fn resolve(&self, msg: &ClientMessage) -> RemoteResult<T> {
        let operation = msg.name();
        match self {
            Scripted::Ok(value) => Ok(value.clone()),
            Scripted::Empty => Err(RemoteError::EmptyResult {
                operation,
                request: msg.describe(),
                message: "no items found".to_string(),
            }),
            Scripted::Fail { code, message } => Err(RemoteError::Logic {
                operation,
                request: msg.describe(),
                code: code.clone(),
                message: message.clone(),
            }),
        }
    }
}

/// A request observed by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ProcessBatch { max_batch: u32, max_pending: u32 },
    Create { record_id: String, target_id: String },
    Query(String),
    FindVault(String),
    FindRecords { pattern: String, vault_id: String },
    Purge(String),
}

/// In-memory stand-in for the remote queue.
#[derive(Default)]
pub struct MockQueueClient {
    batches: VecDeque<Result<BatchResult, String>>,
    queries: HashMap<String, VecDeque<Scripted<Vec<Record>>>>,
    vaults: HashMap<String, Record>,
    files: Vec<Record>,
    purges: HashMap<String, Scripted<u64>>,
    failing_records: HashSet<String>,
    next_txn: u32,
    pub calls: Vec<Call>,
}

impl MockQueueClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful batch outcome.
    pub fn push_batch(&mut self, result: BatchResult) -> &mut Self {
        self.batches.push_back(Ok(result));
        self
    }

    /// Queue a transport failure for the next batch call.
    pub fn push_batch_failure(&mut self, reason: &str) -> &mut Self {
        self.batches.push_back(Err(reason.to_string()));
        self
    }

    /// Queue an answer for a query. The last answer for a type repeats.
    pub fn push_query(&mut self, item_type: &str, answer: Scripted<Vec<Record>>) -> &mut Self {
        self.queries
            .entry(item_type.to_string())
            .or_default()
            .push_back(answer);
        self
    }

    pub fn add_vault(&mut self, name: &str, id: &str) -> &mut Self {
        self.vaults
            .insert(name.to_string(), Record::new(id).with_name(name));
        self
    }

    pub fn add_file(&mut self, id: &str, name: &str) -> &mut Self {
        self.files.push(Record::new(id).with_name(name));
        self
    }

    pub fn set_purge(&mut self, item_type: &str, answer: Scripted<u64>) -> &mut Self {
        self.purges.insert(item_type.to_string(), answer);
        self
    }

    /// Make transaction creation fail for this record.
    pub fn fail_record(&mut self, record_id: &str) -> &mut Self {
        self.failing_records.insert(record_id.to_string());
        self
    }

    pub fn batch_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::ProcessBatch { .. }))
            .count()
    }

    pub fn query_calls(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, Call::Query(_)))
            .count()
    }
}

/// Records with the given raw statuses.
pub fn records_with_statuses(statuses: &[&str]) -> Vec<Record> {
    statuses
        .iter()
        .enumerate()
        .map(|(i, status)| Record::new(format!("T{:03}", i)).with_status(*status))
        .collect()
}

impl RemoteQueueClient for MockQueueClient {
    fn process_batch(&mut self, max_batch: u32, max_pending: u32) -> RemoteFuture<'_, BatchResult> {
        Box::pin(async move {
            self.calls.push(Call::ProcessBatch {
                max_batch,
                max_pending,
            });
            let request = ClientMessage::process_batch(max_batch, max_pending).describe();
            match self.batches.pop_front() {
                Some(Ok(result)) => Ok(result),
                Some(Err(reason)) => Err(RemoteError::Transport {
                    operation: "process_batch",
                    request,
                    source: TransportError::ReceiveFailed(reason),
                }),
                None => Err(RemoteError::Transport {
                    operation: "process_batch",
                    request,
                    source: TransportError::ConnectionClosed,
                }),
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
            self.calls.push(Call::Create {
                record_id: record_id.clone(),
                target_id: target_id.clone(),
            });
            if self.failing_records.contains(&record_id) {
                return Err(RemoteError::Logic {
                    operation: "replicate",
                    request: ClientMessage::replicate(record_id.clone(), target_id).describe(),
                    code: "SOAP-ENV:Server".to_string(),
                    message: format!("no replication rule for {}", record_id),
                });
            }
            self.next_txn += 1;
            Ok(ReplicationTransaction::created(
                format!("TXN{:03}", self.next_txn),
                record_id,
                target_id,
            ))
        })
    }

    fn query_by_type(&mut self, item_type: &str) -> RemoteFuture<'_, Vec<Record>> {
        let item_type = item_type.to_string();
        Box::pin(async move {
            self.calls.push(Call::Query(item_type.clone()));
            let msg = ClientMessage::query(item_type.clone());
            let Some(answers) = self.queries.get_mut(&item_type) else {
                return Scripted::<Vec<Record>>::Empty.resolve(&msg);
            };
            let answer = if answers.len() > 1 {
                answers.pop_front().unwrap()
            } else {
                answers.front().cloned().unwrap_or(Scripted::Empty)
            };
            answer.resolve(&msg)
        })
    }

    fn find_vault(&mut self, name: &str) -> RemoteFuture<'_, Record> {
        let name = name.to_string();
        Box::pin(async move {
            self.calls.push(Call::FindVault(name.clone()));
            match self.vaults.get(&name) {
                Some(vault) => Ok(vault.clone()),
                None => Scripted::<Record>::Empty
                    .resolve(&ClientMessage::query_filtered(VAULT, QueryFilter::Name { name })),
            }
        })
    }

    fn find_records(&mut self, pattern: &str, vault_id: &str) -> RemoteFuture<'_, Vec<Record>> {
        let pattern = pattern.to_string();
        let vault_id = vault_id.to_string();
        Box::pin(async move {
            self.calls.push(Call::FindRecords {
                pattern: pattern.clone(),
                vault_id: vault_id.clone(),
            });
            if self.files.is_empty() {
                let msg = ClientMessage::query_filtered(FILE, QueryFilter::Located { pattern, vault_id });
                Scripted::<Vec<Record>>::Empty.resolve(&msg)
            } else {
                Ok(self.files.clone())
            }
        })
    }

    fn purge(&mut self, item_type: &str) -> RemoteFuture<'_, u64> {
        let item_type = item_type.to_string();
        Box::pin(async move {
            self.calls.push(Call::Purge(item_type.clone()));
            self.purges
                .get(&item_type)
                .cloned()
                .unwrap_or(Scripted::Ok(0))
                .resolve(&ClientMessage::purge(item_type))
        })
    }
}
