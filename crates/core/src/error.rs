// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for replq-core operations.

use thiserror::Error;

/// Violations of the documented response contract.
///
/// These are protocol errors: the server answered, but not in a shape the
/// client can interpret safely.
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing field '{field}' in batch report")]
    MissingField { field: &'static str },

    #[error("invalid count for '{field}': {value}")]
    InvalidCount { field: &'static str, value: String },

    #[error("locked_by_others ({locked_by_others}) exceeds need_processing ({need_processing})")]
    LockedExceedsPending {
        need_processing: u32,
        locked_by_others: u32,
    },

    #[error("unexpected response to {request}: {response}")]
    UnexpectedResponse {
        request: &'static str,
        response: String,
    },

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for replq-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
