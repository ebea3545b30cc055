// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! replqrs - client library for draining a server-side replication queue.
//!
//! This crate provides the core functionality for the `replq` CLI tool.
//! A replication worker logs in to the server and repeatedly asks it to
//! process bounded batches of pending replication transactions, pausing
//! between cycles, until the queue is empty or the operator stops.
//!
//! # Main Components
//!
//! - [`client`] - WebSocket session and the [`RemoteQueueClient`](client::RemoteQueueClient) seam
//! - [`drain`] - the batch loop ([`Drainer`](drain::Drainer))
//! - [`reconcile`] - per-status tallies of transactions and logs
//! - [`producer`] - creation of replication transactions
//! - [`purge`] - administrative removal of transactions and logs
//! - [`Config`] - server, identity and drain settings
//! - [`Error`] - Error types for all operations

mod cli;
mod commands;
mod display;

pub mod client;
pub mod config;
pub mod cooldown;
pub mod drain;
pub mod error;
pub mod operator;
pub mod producer;
pub mod purge;
pub mod reconcile;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{Error, Result};

use futures_util::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;

use commands::drain::DrainArgs;
use commands::replicate::ReplicateArgs;

/// Execute a CLI invocation. This is the main entry point for library users
/// and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    let path = cli.config.unwrap_or_else(config::default_config_path);
    let config = Config::load(&path)?;
    tracing::debug!(path = %path.display(), url = %config.server.url, "loaded config");

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(dispatch(&config, cli.command))
}

async fn dispatch(config: &Config, command: Command) -> Result<()> {
    match command {
        Command::Drain {
            max_batch,
            max_pending,
            cooldown,
            yes,
            no_confirm,
        } => {
            let args = DrainArgs {
                max_batch,
                max_pending,
                cooldown_secs: cooldown,
                yes,
                no_confirm,
            };
            commands::drain::run(config, args, cancel_on_interrupt()).await
        }
        Command::Replicate {
            source_vault,
            target_vault,
            pattern,
        } => {
            let args =
                ReplicateArgs::resolve(&config.replicate, source_vault, target_vault, pattern);
            commands::replicate::run(config, args).await
        }
        Command::Status => commands::status::run(config).await,
        Command::Purge { yes } => commands::purge::run(config, yes).await,
    }
}

/// Token cancelled on the first Ctrl-C.
///
/// The drain finishes the call in flight and stops before its next batch
/// or sleep. A second Ctrl-C exits at once, which also releases an operator
/// prompt blocked on stdin.
fn cancel_on_interrupt() -> CancellationToken {
    let cancel = CancellationToken::new();
    let token = cancel.clone();
    tokio::spawn(async move {
        let interrupts = futures_util::stream::unfold((), |()| async {
            tokio::signal::ctrl_c().await.ok().map(|()| ((), ()))
        });
        if watch_interrupts(Box::pin(interrupts), token).await {
            std::process::exit(130);
        }
    });
    cancel
}

/// Cancel `token` on the first interrupt. Returns true on a second one.
async fn watch_interrupts<S>(mut interrupts: S, token: CancellationToken) -> bool
where
    S: Stream<Item = ()> + Unpin,
{
    if interrupts.next().await.is_none() {
        return false;
    }
    eprintln!("\nInterrupted, stopping after the current cycle (Ctrl-C again to quit now)");
    tracing::info!("interrupt received");
    token.cancel();

    if interrupts.next().await.is_none() {
        return false;
    }
    tracing::warn!("second interrupt, exiting");
    true
}

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
