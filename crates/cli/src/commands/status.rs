// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `replq status`: show transaction and log counts.

use std::io::Write;

use replq_core::FinalTally;

use super::{close_session, open_session};
use crate::client::RemoteQueueClient;
use crate::config::{Config, Role};
use crate::display;
use crate::error::Result;
use crate::reconcile::StatusReconciler;

pub async fn run(config: &Config) -> Result<()> {
    let mut session = open_session(config, Role::Replication).await?;
    let result = execute(&mut session, &mut std::io::stdout()).await;
    close_session(session).await;
    result.map(|_| ())
}

pub async fn execute<C, W>(client: &mut C, out: &mut W) -> Result<FinalTally>
where
    C: RemoteQueueClient + ?Sized,
    W: Write,
{
    let tally = StatusReconciler::new(client).final_tally().await?;
    writeln!(out, "{}", display::format_final_tally(&tally))?;
    Ok(tally)
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
