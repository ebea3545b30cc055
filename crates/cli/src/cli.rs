// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser, Debug)]
#[command(name = "replq")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Drain a server-side file replication queue")]
#[command(
    long_about = "Drain a server-side file replication queue.\n\n\
    Repeatedly asks the server to process bounded batches of pending replication \
    transactions until the queue is empty or the operator stops, then reports \
    transaction and log status.\n\n\
    Configuration is read from ./replq.toml, then ~/.config/replq/config.toml, \
    unless --config is given."
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, value_name = "path")]
    pub config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Process the replication queue until it is empty or you stop
    Drain {
        /// Transactions the server attempts per cycle
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_batch: Option<u32>,

        /// Transactions left in flight at once
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        max_pending: Option<u32>,

        /// Pause between cycles in seconds
        #[arg(long, value_name = "SECS")]
        cooldown: Option<u64>,

        /// Start without asking
        #[arg(long, short)]
        yes: bool,

        /// Stop at the first idle cycle instead of asking to continue
        #[arg(long)]
        no_confirm: bool,
    },

    /// Create replication transactions for files in a vault
    Replicate {
        /// Vault holding the files
        #[arg(long, value_parser = non_empty_string)]
        source_vault: Option<String>,

        /// Vault to replicate to
        #[arg(long, value_parser = non_empty_string)]
        target_vault: Option<String>,

        /// Filename pattern (`*` wildcard)
        #[arg(long, value_parser = non_empty_string)]
        pattern: Option<String>,
    },

    /// Show replication transaction and log status
    Status,

    /// Delete all replication transactions and logs (admin)
    Purge {
        /// Delete without asking
        #[arg(long, short)]
        yes: bool,
    },
}
