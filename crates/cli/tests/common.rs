// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]
#![allow(clippy::unwrap_used)]

use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub fn replq() -> Command {
    let mut cmd = cargo_bin_cmd!("replq");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Write a config pointing at `url` and return its path.
pub fn write_config(temp: &TempDir, url: &str) -> PathBuf {
    let path = temp.path().join("replq.toml");
    std::fs::write(
        &path,
        format!(
            r#"
[server]
url = "{}"
database = "Solutions"
request_timeout_secs = 2

[identities.replication]
user = "repl"
password = "innovator"

[identities.producer]
user = "producer"
password = "innovator"

[drain]
cooldown_secs = 0
"#,
            url
        ),
    )
    .unwrap();
    path
}

/// A URL nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("ws://127.0.0.1:{}", port)
}
