// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Outcome of one queue-processing cycle.
//!
//! The server reports a cycle as an optional item carrying three counters.
//! No item at all means the queue holds no transactions, which is different
//! from a cycle that simply processed nothing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Raw counters as reported by the server.
///
/// Counters may arrive as JSON numbers or as numeric strings; anything else
/// is rejected by [`BatchResult::from_report`].
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BatchItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processed: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub need_processing: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked_by_others: Option<Value>,
}

impl BatchItem {
    /// Creates an item with numeric counters.
    pub fn new(processed: u32, need_processing: u32, locked_by_others: u32) -> Self {
        BatchItem {
            processed: Some(Value::from(processed)),
            need_processing: Some(Value::from(need_processing)),
            locked_by_others: Some(Value::from(locked_by_others)),
        }
    }
}

/// Validated outcome of one drain cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Transactions completed during this cycle.
    pub processed: u32,
    /// Eligible transactions still waiting, including those locked by others.
    pub need_processing: u32,
    /// Eligible transactions currently held by a concurrent worker.
    pub locked_by_others: u32,
    /// True when the server reported no item at all: no work exists.
    pub empty: bool,
}

impl BatchResult {
    /// Result for a queue with no transactions.
    pub fn empty() -> Self {
        BatchResult {
            empty: true,
            ..BatchResult::default()
        }
    }

    /// Result for a cycle that found work.
    pub fn new(processed: u32, need_processing: u32, locked_by_others: u32) -> Self {
        BatchResult {
            processed,
            need_processing,
            locked_by_others,
            empty: false,
        }
    }

    /// Validates a raw server report.
    ///
    /// # Errors
    ///
    /// Returns a protocol error when a counter is missing, not a
    /// non-negative integer, or when more items are locked than need
    /// processing.
    pub fn from_report(item: Option<&BatchItem>) -> Result<Self> {
        let Some(item) = item else {
            return Ok(BatchResult::empty());
        };

        let processed = parse_count("processed", item.processed.as_ref())?;
        let need_processing = parse_count("need_processing", item.need_processing.as_ref())?;
        let locked_by_others = parse_count("locked_by_others", item.locked_by_others.as_ref())?;

        if locked_by_others > need_processing {
            return Err(Error::LockedExceedsPending {
                need_processing,
                locked_by_others,
            });
        }

        Ok(BatchResult::new(processed, need_processing, locked_by_others))
    }

    /// Work this worker can still make progress on.
    ///
    /// Transactions locked by other workers are excluded.
    pub fn remaining(&self) -> u32 {
        self.need_processing.saturating_sub(self.locked_by_others)
    }

    /// Returns true if another worker holds part of the remaining work.
    pub fn is_contended(&self) -> bool {
        self.locked_by_others > 0
    }
}

fn parse_count(field: &'static str, value: Option<&Value>) -> Result<u32> {
    let value = value.ok_or(Error::MissingField { field })?;
    let invalid = || Error::InvalidCount {
        field,
        value: value.to_string(),
    };

    match value {
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(invalid),
        Value::String(s) => s.trim().parse::<u32>().map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}

#[cfg(test)]
#[path = "batch_tests.rs"]
mod tests;
