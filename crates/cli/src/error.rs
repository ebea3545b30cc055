// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

use crate::client::RemoteError;
use crate::drain::DrainError;

/// All possible errors that can occur in the replqrs library.
///
/// Errors provide user-friendly messages with hints for common issues.
#[derive(Debug, Error)]
pub enum Error {
    #[error("config error: {0}\n  hint: see 'replq --help' for the config file location")]
    Config(String),

    #[error("{0}")]
    Remote(#[from] RemoteError),

    #[error("{0}")]
    Drain(#[from] DrainError),

    #[error("interactive mode requires a terminal (TTY)\n  hint: pass --yes to skip prompts")]
    TtyRequired,

    #[error("operation cancelled")]
    Cancelled,

    #[error("{failed} of {requested} replication requests failed")]
    PartialFailure { failed: usize, requested: usize },

    #[error("failed to delete {}", .item_types.join(", "))]
    PurgeFailed { item_types: Vec<&'static str> },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for replqrs operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
