// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `replq replicate`: create replication transactions for matching files.

use std::io::Write;

use replq_core::record::REPLICATION_TXN;

use super::{close_session, open_session};
use crate::client::RemoteQueueClient;
use crate::config::{Config, ReplicateConfig, Role};
use crate::display;
use crate::error::{Error, Result};
use crate::producer::{Producer, ReplicationSummary};
use crate::reconcile::StatusReconciler;

/// Which records to replicate and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicateArgs {
    pub source_vault: String,
    pub target_vault: String,
    pub pattern: String,
}

impl ReplicateArgs {
    /// Fill in whatever the command line left out from `[replicate]`.
    pub fn resolve(
        config: &ReplicateConfig,
        source_vault: Option<String>,
        target_vault: Option<String>,
        pattern: Option<String>,
    ) -> Self {
        ReplicateArgs {
            source_vault: source_vault.unwrap_or_else(|| config.source_vault.clone()),
            target_vault: target_vault.unwrap_or_else(|| config.target_vault.clone()),
            pattern: pattern.unwrap_or_else(|| config.pattern.clone()),
        }
    }
}

pub async fn run(config: &Config, args: ReplicateArgs) -> Result<()> {
    let mut session = open_session(config, Role::Producer).await?;
    let result = execute(&mut session, &args, &mut std::io::stdout()).await;
    close_session(session).await;

    let summary = result?;
    if summary.failed > 0 {
        return Err(Error::PartialFailure {
            failed: summary.failed,
            requested: summary.requested,
        });
    }
    Ok(())
}

/// Show the transaction tally, request replication for every selected
/// record, then show the tally again.
pub async fn execute<C, W>(client: &mut C, args: &ReplicateArgs, out: &mut W) -> Result<ReplicationSummary>
where
    C: RemoteQueueClient + ?Sized,
    W: Write,
{
    let before = StatusReconciler::new(&mut *client).tally(REPLICATION_TXN).await?;
    writeln!(out, "{}", display::format_tally(REPLICATION_TXN, &before))?;

    let mut producer = Producer::new(&mut *client);
    let selection = producer.select(&args.source_vault, &args.pattern).await?;
    if selection.records.is_empty() {
        writeln!(
            out,
            "No files matching '{}' in vault '{}'",
            args.pattern, args.source_vault
        )?;
        return Ok(ReplicationSummary::default());
    }

    let target = producer.resolve_vault(&args.target_vault).await?;
    let outcomes = producer.replicate(selection.records, &target.id).await;
    writeln!(out, "{}", display::format_outcomes(&outcomes))?;

    let after = StatusReconciler::new(&mut *client).tally(REPLICATION_TXN).await?;
    writeln!(out, "{}", display::format_tally(REPLICATION_TXN, &after))?;

    Ok(ReplicationSummary::from_outcomes(&outcomes))
}

#[cfg(test)]
#[path = "replicate_tests.rs"]
mod tests;
