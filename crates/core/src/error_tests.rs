// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    missing_field = { Error::MissingField { field: "processed" }, "processed" },
    invalid_count = { Error::InvalidCount { field: "need_processing", value: "\"abc\"".into() }, "abc" },
    locked_exceeds = { Error::LockedExceedsPending { need_processing: 2, locked_by_others: 5 }, "exceeds" },
    unexpected = { Error::UnexpectedResponse { request: "query", response: "purged".into() }, "query" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_from_json() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}
