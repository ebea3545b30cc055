// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `replq drain`: process the replication queue.

use std::io::{BufReader, Write};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::{close_session, open_session, require_tty};
use crate::client::RemoteQueueClient;
use crate::config::{Config, DrainConfig, Role};
use crate::display;
use crate::drain::{DrainObserver, DrainReport, DrainSettings, Drainer, StopReason};
use crate::error::{Error, Result};
use crate::operator::ConsoleOperator;

/// Command-line overrides for the `[drain]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainArgs {
    pub max_batch: Option<u32>,
    pub max_pending: Option<u32>,
    pub cooldown_secs: Option<u64>,
    pub yes: bool,
    pub no_confirm: bool,
}

/// Merge config and flags into drain settings.
pub fn settings(config: &DrainConfig, args: &DrainArgs) -> Result<DrainSettings> {
    let mut cooldown = config.cooldown_policy();
    if let Some(secs) = args.cooldown_secs {
        cooldown.base = Duration::from_secs(secs);
    }
    Ok(DrainSettings::new(
        args.max_batch.unwrap_or(config.max_batch),
        args.max_pending.unwrap_or(config.max_pending),
        cooldown,
        config.confirm && !args.no_confirm,
    )?)
}

pub async fn run(config: &Config, args: DrainArgs, cancel: CancellationToken) -> Result<()> {
    let settings = settings(&config.drain, &args)?;
    if !args.yes || settings.confirm_each_idle_cycle {
        require_tty()?;
    }

    let mut session = open_session(config, Role::Replication).await?;
    let mut operator = ConsoleOperator::new(BufReader::new(std::io::stdin()), std::io::stdout());

    let start = if args.yes {
        Ok(true)
    } else {
        operator.confirm_start()
    };
    let result = match start {
        Ok(true) => execute(&mut session, settings, cancel, &mut operator)
            .await
            .map(Some),
        Ok(false) => Ok(None),
        Err(e) => Err(e.into()),
    };
    close_session(session).await;

    let report = match result? {
        Some(report) => report,
        None => {
            println!("Queue processing not started");
            return Ok(());
        }
    };
    println!("\n{}", display::format_report(&report));
    std::io::stdout().flush()?;
    if report.stop == StopReason::Cancelled {
        return Err(Error::Cancelled);
    }
    Ok(())
}

/// Drain through `client`, reporting progress to `observer`.
pub async fn execute<C, O>(
    client: &mut C,
    settings: DrainSettings,
    cancel: CancellationToken,
    observer: &mut O,
) -> Result<DrainReport>
where
    C: RemoteQueueClient + ?Sized,
    O: DrainObserver + ?Sized,
{
    tracing::info!(
        max_batch = settings.max_batch,
        max_pending = settings.max_pending,
        "starting drain"
    );
    let report = Drainer::new(client, settings, cancel).drain(observer).await?;
    Ok(report)
}

#[cfg(test)]
#[path = "drain_tests.rs"]
mod tests;
