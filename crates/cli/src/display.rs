// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text formatting for cycle summaries, tallies and reports.

use chrono::{DateTime, Local};
use replq_core::{BatchResult, FinalTally, StatusTally};

use crate::drain::{DrainReport, StopReason};
use crate::producer::{ReplicationOutcome, ReplicationSummary};
use crate::purge::PurgeOutcome;

/// Summary printed after each batch call.
pub fn format_cycle(cycle: u32, at: DateTime<Local>, result: &BatchResult) -> String {
    let header = format!(
        "*** Replication queue cycle {} ({})",
        cycle,
        at.format("%H:%M:%S")
    );
    if result.empty {
        return format!("{}\nAll transactions processed", header);
    }
    format!(
        "{}\n- Processed: {}\n- Remains: {}\n- Locked by others: {}",
        header, result.processed, result.need_processing, result.locked_by_others
    )
}

/// Line printed when another cycle follows after the cooldown.
pub fn format_continue(remaining: u32) -> String {
    format!("{} transactions left to process. Continue ...", remaining)
}

/// Per-status counts for one item type.
pub fn format_tally(item_type: &str, tally: &StatusTally) -> String {
    if tally.is_empty() {
        return format!("No items of type '{}' found", item_type);
    }
    format!(
        ">>> {}\nNot Started: {}\nCompleted: {}\nPending: {}\nDiscarded: {}\nFailed: {}",
        item_type,
        tally.not_started,
        tally.completed,
        tally.pending,
        tally.discarded,
        tally.failed_other
    )
}

/// Counts for transactions and logs.
pub fn format_final_tally(tally: &FinalTally) -> String {
    format!(
        "{}\n\n{}",
        format_tally(replq_core::record::REPLICATION_TXN, &tally.transactions),
        format_tally(replq_core::record::REPLICATION_TXN_LOG, &tally.logs)
    )
}

/// One-line description of how a drain ended.
pub fn format_report(report: &DrainReport) -> String {
    let reason = match report.stop {
        StopReason::QueueEmpty => "queue empty",
        StopReason::Idle => "nothing left for this worker",
        StopReason::Declined => "stopped by operator",
        StopReason::Cancelled => "cancelled",
    };
    let cycles = if report.cycles == 1 { "cycle" } else { "cycles" };
    format!(
        "Drain finished after {} {} ({}): {} processed",
        report.cycles, cycles, reason, report.processed
    )
}

/// Failures and totals for a replicate run.
pub fn format_outcomes(outcomes: &[ReplicationOutcome]) -> String {
    let mut lines: Vec<String> = outcomes
        .iter()
        .filter_map(|o| match &o.result {
            Ok(_) => None,
            Err(e) => Some(format!(
                "Failed to send request for replication of '{}' - {}",
                o.record.label(),
                e
            )),
        })
        .collect();
    let summary = ReplicationSummary::from_outcomes(outcomes);
    lines.push(format!(
        "Requested: {}, created: {}, failed: {}",
        summary.requested, summary.created, summary.failed
    ));
    lines.join("\n")
}

/// One line per purged item type.
pub fn format_purge(outcomes: &[PurgeOutcome]) -> String {
    outcomes
        .iter()
        .map(|o| match &o.result {
            Ok(count) => format!("Deleted {} '{}' items", count, o.item_type),
            Err(e) => format!(
                "Failed to delete '{}' items ({}). Please delete them manually",
                o.item_type, e
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "display_tests.rs"]
mod tests;
