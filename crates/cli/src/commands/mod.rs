// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command implementations.
//!
//! Each command has a `run` that opens the session it needs and an
//! `execute` that does the work against any
//! [`RemoteQueueClient`](crate::client::RemoteQueueClient).

pub mod drain;
pub mod purge;
pub mod replicate;
pub mod status;

use std::io::IsTerminal;

use crate::client::RemoteSession;
use crate::config::{Config, Role};
use crate::error::{Error, Result};

/// Log in as the identity configured for `role`.
///
/// Every call opens a new session; sessions are never shared between
/// identities.
pub(crate) async fn open_session(config: &Config, role: Role) -> Result<RemoteSession> {
    let identity = config.identity(role)?;
    Ok(RemoteSession::open(&config.server, identity).await?)
}

/// Log out once the work is done. Failures are logged, not returned.
pub(crate) async fn close_session(session: RemoteSession) {
    let user = session.user().to_string();
    if let Err(e) = session.logout().await {
        tracing::warn!(user = %user, error = %e, "logout failed");
    }
}

/// Prompts read from stdin, which must be a terminal.
pub(crate) fn require_tty() -> Result<()> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(Error::TtyRequired)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
