// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `replq purge`: delete all replication transactions and logs.

use std::io::{BufReader, Write};

use super::{close_session, open_session, require_tty};
use crate::client::RemoteQueueClient;
use crate::config::{Config, Role};
use crate::display;
use crate::error::{Error, Result};
use crate::operator::ask;
use crate::purge::{purge_replication_items, PurgeOutcome};

pub async fn run(config: &Config, yes: bool) -> Result<()> {
    // Fail on a missing admin section before prompting
    config.identity(Role::Admin)?;

    if !yes {
        require_tty()?;
        let mut input = BufReader::new(std::io::stdin());
        let confirmed = ask(
            &mut input,
            &mut std::io::stdout(),
            "Delete all replication transactions and logs",
            false,
        )?;
        if !confirmed {
            println!("Nothing deleted");
            return Ok(());
        }
    }

    let mut session = open_session(config, Role::Admin).await?;
    let result = execute(&mut session, &mut std::io::stdout()).await;
    close_session(session).await;
    require_all_purged(&result?)
}

pub async fn execute<C, W>(client: &mut C, out: &mut W) -> Result<Vec<PurgeOutcome>>
where
    C: RemoteQueueClient + ?Sized,
    W: Write,
{
    let outcomes = purge_replication_items(client).await;
    writeln!(out, "{}", display::format_purge(&outcomes))?;
    Ok(outcomes)
}

/// Fail if any item type could not be deleted.
pub fn require_all_purged(outcomes: &[PurgeOutcome]) -> Result<()> {
    let item_types: Vec<&'static str> = outcomes
        .iter()
        .filter(|o| o.result.is_err())
        .map(|o| o.item_type)
        .collect();
    if item_types.is_empty() {
        Ok(())
    } else {
        Err(Error::PurgeFailed { item_types })
    }
}

#[cfg(test)]
#[path = "purge_tests.rs"]
mod tests;
