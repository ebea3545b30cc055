// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Queue draining loop.
//!
//! Each cycle asks the server to process one bounded batch and classifies the
//! outcome three ways:
//!
//! - the queue holds nothing at all: reconcile and stop
//! - this worker still has actionable work: cool down and go again
//! - only work locked by other workers (or none) is left: reconcile, then
//!   stop or continue on the operator's word
//!
//! A failed batch call ends the drain. The server may have applied part of
//! the batch, so retrying is left to the caller.

use replq_core::{BatchResult, FinalTally};
use tokio_util::sync::CancellationToken;

use crate::client::{RemoteError, RemoteQueueClient};
use crate::cooldown::CooldownPolicy;
use crate::reconcile::StatusReconciler;

/// Error type for drain operations.
#[derive(Debug, thiserror::Error)]
pub enum DrainError {
    #[error("invalid drain settings: {0}")]
    InvalidSettings(&'static str),

    #[error("cycle {cycle} (max_batch={max_batch}, max_pending={max_pending}) failed: {source}")]
    Batch {
        cycle: u32,
        max_batch: u32,
        max_pending: u32,
        #[source]
        source: RemoteError,
    },

    #[error("status reconciliation failed: {0}")]
    Reconcile(#[source] RemoteError),

    #[error("operator prompt failed: {0}")]
    Operator(#[from] std::io::Error),
}

/// Parameters forwarded unchanged to every cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrainSettings {
    /// Transactions the server attempts per call.
    pub max_batch: u32,
    /// Transactions left in flight at once.
    pub max_pending: u32,
    pub cooldown: CooldownPolicy,
    /// Ask the operator whether to go on once this worker has nothing left.
    /// When false the drain stops at the first idle cycle.
    pub confirm_each_idle_cycle: bool,
}

impl DrainSettings {
    pub fn new(
        max_batch: u32,
        max_pending: u32,
        cooldown: CooldownPolicy,
        confirm_each_idle_cycle: bool,
    ) -> Result<Self, DrainError> {
        if max_batch == 0 {
            return Err(DrainError::InvalidSettings("max_batch must be positive"));
        }
        if max_pending == 0 {
            return Err(DrainError::InvalidSettings("max_pending must be positive"));
        }
        Ok(DrainSettings {
            max_batch,
            max_pending,
            cooldown,
            confirm_each_idle_cycle,
        })
    }
}

/// Why a drain ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The server reported no transactions at all.
    QueueEmpty,
    /// Nothing actionable was left and no confirmation was requested.
    Idle,
    /// The operator chose not to continue.
    Declined,
    /// The cancellation token fired.
    Cancelled,
}

/// Summary of a finished drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrainReport {
    /// Batch calls issued.
    pub cycles: u32,
    /// Transactions processed across all cycles.
    pub processed: u64,
    pub stop: StopReason,
    /// Most recent reconciliation. Absent only when cancelled before the
    /// first one.
    pub tally: Option<FinalTally>,
}

/// Receives drain progress and answers the continue prompt.
pub trait DrainObserver {
    /// Called after every successful batch call.
    fn on_cycle(&mut self, _cycle: u32, _result: &BatchResult) {}

    /// Called after every reconciliation. `progressed` is false when no
    /// further log entries completed since the previous reconciliation.
    fn on_reconciled(&mut self, _tally: &FinalTally, _progressed: bool) {}

    /// Whether to keep draining after an idle cycle.
    fn confirm_continue(&mut self, tally: &FinalTally) -> std::io::Result<bool>;
}

/// Drives bounded-batch processing against one remote queue.
pub struct Drainer<'a, C: RemoteQueueClient + ?Sized> {
    client: &'a mut C,
    settings: DrainSettings,
    cancel: CancellationToken,
    last_completed: Option<usize>,
}

impl<'a, C: RemoteQueueClient + ?Sized> Drainer<'a, C> {
    pub fn new(client: &'a mut C, settings: DrainSettings, cancel: CancellationToken) -> Self {
        Drainer {
            client,
            settings,
            cancel,
            last_completed: None,
        }
    }

    /// Run cycles until the queue is empty, the operator stops, or the
    /// token is cancelled.
    pub async fn drain<O: DrainObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<DrainReport, DrainError> {
        let DrainSettings {
            max_batch,
            max_pending,
            ..
        } = self.settings;

        let mut report = DrainReport {
            cycles: 0,
            processed: 0,
            stop: StopReason::Cancelled,
            tally: None,
        };

        loop {
            if self.cancel.is_cancelled() {
                tracing::info!(cycles = report.cycles, "drain cancelled");
                report.stop = StopReason::Cancelled;
                return Ok(report);
            }

            report.cycles += 1;
            let cycle = report.cycles;
            let result = self
                .client
                .process_batch(max_batch, max_pending)
                .await
                .map_err(|source| DrainError::Batch {
                    cycle,
                    max_batch,
                    max_pending,
                    source,
                })?;

            report.processed += u64::from(result.processed);
            observer.on_cycle(cycle, &result);

            if result.empty {
                tracing::info!(cycle, "replication queue is empty");
                report.tally = Some(self.reconcile(observer).await?);
                report.stop = StopReason::QueueEmpty;
                return Ok(report);
            }

            let remaining = result.remaining();
            tracing::info!(
                cycle,
                processed = result.processed,
                remaining,
                locked_by_others = result.locked_by_others,
                "cycle finished"
            );

            if remaining > 0 {
                if !self.cool_down(&result).await {
                    report.stop = StopReason::Cancelled;
                    return Ok(report);
                }
                continue;
            }

            let tally = self.reconcile(observer).await?;
            report.tally = Some(tally);

            if !self.settings.confirm_each_idle_cycle {
                report.stop = StopReason::Idle;
                return Ok(report);
            }
            if !observer.confirm_continue(&tally)? {
                report.stop = StopReason::Declined;
                return Ok(report);
            }
            // Nothing to wait for unless another worker still holds locks
            if result.is_contended() && !self.cool_down(&result).await {
                report.stop = StopReason::Cancelled;
                return Ok(report);
            }
        }
    }

    async fn reconcile<O: DrainObserver + ?Sized>(
        &mut self,
        observer: &mut O,
    ) -> Result<FinalTally, DrainError> {
        let tally = StatusReconciler::new(&mut *self.client)
            .final_tally()
            .await
            .map_err(DrainError::Reconcile)?;

        let completed = tally.completed();
        let progressed = self.last_completed.is_none_or(|last| completed > last);
        if !progressed {
            tracing::warn!(completed, "no replication progress since last reconciliation");
        }
        self.last_completed = Some(completed);

        observer.on_reconciled(&tally, progressed);
        Ok(tally)
    }

    /// Sleep before the next cycle. Returns false if cancelled.
    async fn cool_down(&self, last: &BatchResult) -> bool {
        if self.cancel.is_cancelled() {
            return false;
        }
        let delay = self.settings.cooldown.delay_after(last);
        if delay.is_zero() {
            return true;
        }
        tracing::debug!(?delay, "cooling down");
        tokio::select! {
            _ = tokio::time::sleep(delay) => true,
            _ = self.cancel.cancelled() => false,
        }
    }
}

#[cfg(test)]
#[path = "drain_tests.rs"]
mod tests;
