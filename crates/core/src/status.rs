// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Replication status vocabulary and per-type aggregates.

use std::fmt;

/// Status of a replication transaction or log entry.
///
/// The server may grow its vocabulary without a client update, so any value
/// not listed here is classified as [`ReplicationStatus::FailedOther`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplicationStatus {
    NotStarted,
    Pending,
    Completed,
    Discarded,
    FailedOther,
}

impl ReplicationStatus {
    /// Classifies a raw status value. A missing value counts as failed.
    pub fn classify(raw: Option<&str>) -> Self {
        match raw {
            Some("NotStarted") => ReplicationStatus::NotStarted,
            Some("Pending") => ReplicationStatus::Pending,
            Some("Completed") => ReplicationStatus::Completed,
            Some("Discarded") => ReplicationStatus::Discarded,
            _ => ReplicationStatus::FailedOther,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReplicationStatus::NotStarted => "NotStarted",
            ReplicationStatus::Pending => "Pending",
            ReplicationStatus::Completed => "Completed",
            ReplicationStatus::Discarded => "Discarded",
            ReplicationStatus::FailedOther => "Failed",
        }
    }
}

impl fmt::Display for ReplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Counts of records per status for one item type.
///
/// Recomputed from scratch on every reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusTally {
    pub not_started: usize,
    pub pending: usize,
    pub completed: usize,
    pub discarded: usize,
    pub failed_other: usize,
}

impl StatusTally {
    /// Builds a tally from raw status values.
    pub fn from_statuses<'a, I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut tally = StatusTally::default();
        for raw in statuses {
            tally.record(ReplicationStatus::classify(raw));
        }
        tally
    }

    /// Adds one record with the given status.
    pub fn record(&mut self, status: ReplicationStatus) {
        let bucket = match status {
            ReplicationStatus::NotStarted => &mut self.not_started,
            ReplicationStatus::Pending => &mut self.pending,
            ReplicationStatus::Completed => &mut self.completed,
            ReplicationStatus::Discarded => &mut self.discarded,
            ReplicationStatus::FailedOther => &mut self.failed_other,
        };
        *bucket += 1;
    }

    /// Total number of records tallied.
    pub fn total(&self) -> usize {
        self.not_started + self.pending + self.completed + self.discarded + self.failed_other
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Reconciled status of transactions and their log entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalTally {
    pub transactions: StatusTally,
    pub logs: StatusTally,
}

impl FinalTally {
    /// Completed log entries, used to detect progress between tallies.
    pub fn completed(&self) -> usize {
        self.logs.completed
    }
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
