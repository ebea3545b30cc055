// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration management.
//!
//! Configuration is stored in a TOML file (`replq.toml` by default) and includes:
//! - `[server]`: where the replication server lives and which database to use
//! - `[identities.*]`: credentials for the replication, producer and admin users
//! - `[drain]`: batch caps, cooldown and contention backoff
//! - `[replicate]`: source/target vaults and filename pattern

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::cooldown::{ContentionBackoff, CooldownPolicy};
use crate::error::{Error, Result};

const CONFIG_FILE_NAME: &str = "replq.toml";
const USER_CONFIG_DIR: &str = "replq";
const USER_CONFIG_FILE_NAME: &str = "config.toml";

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub identities: Identities,
    #[serde(default)]
    pub drain: DrainConfig,
    #[serde(default)]
    pub replicate: ReplicateConfig,
}

/// Connection settings for the replication server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// WebSocket URL (`ws://...` or `wss://...`).
    pub url: String,
    /// Database name sent at login.
    pub database: String,
    /// Max time to wait for a single response in seconds (default: 300).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

/// Credentials for one user.
#[derive(Clone, Deserialize)]
pub struct Identity {
    pub user: String,
    pub password: String,
}

impl std::fmt::Debug for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Identity")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// The users each command acts as.
#[derive(Debug, Clone, Deserialize)]
pub struct Identities {
    /// Drains the queue and reads status.
    pub replication: Identity,
    /// Creates replication transactions.
    pub producer: Option<Identity>,
    /// Purges transactions and logs.
    pub admin: Option<Identity>,
}

/// Which identity a command needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Replication,
    Producer,
    Admin,
}

impl Role {
    fn section(&self) -> &'static str {
        match self {
            Role::Replication => "identities.replication",
            Role::Producer => "identities.producer",
            Role::Admin => "identities.admin",
        }
    }
}

/// Queue draining settings.
#[derive(Debug, Clone, Deserialize)]
pub struct DrainConfig {
    /// Transactions the server attempts per cycle (default: 10).
    #[serde(default = "default_max_batch")]
    pub max_batch: u32,
    /// Transactions left in flight at once (default: 15).
    #[serde(default = "default_max_pending")]
    pub max_pending: u32,
    /// Pause between cycles in seconds (default: 10). 0 = no pause.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Ask before continuing once this worker has nothing left (default: true).
    #[serde(default = "default_confirm")]
    pub confirm: bool,
    #[serde(default)]
    pub contention: ContentionConfig,
}

/// Backoff applied when other workers hold locks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentionConfig {
    #[serde(default)]
    pub mode: ContentionMode,
    /// Upper bound on the random extra delay in milliseconds.
    #[serde(default)]
    pub max_jitter_ms: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentionMode {
    /// Same delay as for genuine remaining work.
    #[default]
    Fixed,
    /// Base delay plus random jitter.
    Jittered,
}

/// Settings for creating replication transactions.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplicateConfig {
    /// Vault holding the source records (default: "Default").
    #[serde(default = "default_source_vault")]
    pub source_vault: String,
    /// Vault to replicate to (default: "VaultA").
    #[serde(default = "default_target_vault")]
    pub target_vault: String,
    /// Filename pattern, `*` wildcard (default: "file*").
    #[serde(default = "default_pattern")]
    pub pattern: String,
}

fn default_request_timeout_secs() -> u64 {
    300
}

fn default_max_batch() -> u32 {
    10
}

fn default_max_pending() -> u32 {
    15
}

fn default_cooldown_secs() -> u64 {
    10
}

fn default_confirm() -> bool {
    true
}

fn default_source_vault() -> String {
    "Default".to_string()
}

fn default_target_vault() -> String {
    "VaultA".to_string()
}

fn default_pattern() -> String {
    "file*".to_string()
}

impl Default for DrainConfig {
    fn default() -> Self {
        DrainConfig {
            max_batch: default_max_batch(),
            max_pending: default_max_pending(),
            cooldown_secs: default_cooldown_secs(),
            confirm: default_confirm(),
            contention: ContentionConfig::default(),
        }
    }
}

impl Default for ReplicateConfig {
    fn default() -> Self {
        ReplicateConfig {
            source_vault: default_source_vault(),
            target_vault: default_target_vault(),
            pattern: default_pattern(),
        }
    }
}

impl DrainConfig {
    /// Cooldown policy described by this section.
    pub fn cooldown_policy(&self) -> CooldownPolicy {
        let contention = match self.contention.mode {
            ContentionMode::Fixed => ContentionBackoff::Fixed,
            ContentionMode::Jittered => ContentionBackoff::Jittered {
                max_jitter: Duration::from_millis(self.contention.max_jitter_ms),
            },
        };
        CooldownPolicy {
            base: Duration::from_secs(self.cooldown_secs),
            contention,
        }
    }
}

impl Config {
    /// Loads and validates configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("failed to read config '{}': {}", path.display(), e))
        })?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            Error::Config(format!("failed to parse config '{}': {}", path.display(), e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values that the format alone cannot rule out.
    pub fn validate(&self) -> Result<()> {
        let url = &self.server.url;
        if !(url.starts_with("ws://") || url.starts_with("wss://")) {
            return Err(Error::Config(format!(
                "invalid server url '{}': must be ws:// or wss://",
                url
            )));
        }
        if self.server.database.trim().is_empty() {
            return Err(Error::Config("server.database cannot be empty".to_string()));
        }
        if self.drain.max_batch == 0 {
            return Err(Error::Config("drain.max_batch must be positive".to_string()));
        }
        if self.drain.max_pending == 0 {
            return Err(Error::Config("drain.max_pending must be positive".to_string()));
        }
        Ok(())
    }

    /// Credentials for a role.
    pub fn identity(&self, role: Role) -> Result<&Identity> {
        let identity = match role {
            Role::Replication => Some(&self.identities.replication),
            Role::Producer => self.identities.producer.as_ref(),
            Role::Admin => self.identities.admin.as_ref(),
        };
        identity.ok_or_else(|| Error::Config(format!("missing [{}] section", role.section())))
    }
}

/// Where to look for the configuration when no path is given.
///
/// Prefers `replq.toml` in the current directory, then the user config
/// directory (`~/.config/replq/config.toml` on Linux).
pub fn default_config_path() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.is_file() {
        return local;
    }
    match dirs::config_dir() {
        Some(dir) => {
            let user = dir.join(USER_CONFIG_DIR).join(USER_CONFIG_FILE_NAME);
            if user.is_file() {
                user
            } else {
                local
            }
        }
        None => local,
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
