// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use clap::Parser;
use tracing_subscriber::EnvFilter;

use replqrs::Cli;

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = replqrs::run(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so it never mixes with command output. `RUST_LOG` wins
/// over `--verbose`.
fn setup_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
