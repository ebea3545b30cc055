// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::client::test_helpers::{MockQueueClient, Scripted};
use replq_core::record::{REPLICATION_TXN, REPLICATION_TXN_LOG};

#[tokio::test]
async fn reports_each_item_type() {
    let mut client = MockQueueClient::new();
    client
        .set_purge(REPLICATION_TXN, Scripted::Ok(3))
        .set_purge(REPLICATION_TXN_LOG, Scripted::fail("403", "forbidden"));
    let mut out = Vec::new();

    let outcomes = execute(&mut client, &mut out).await.unwrap();

    assert_eq!(outcomes.len(), 2);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Deleted 3 'ReplicationTxn' items"));
    assert!(text.contains("Please delete them manually"));

    let err = require_all_purged(&outcomes).unwrap_err();
    assert!(matches!(
        err,
        Error::PurgeFailed { ref item_types } if *item_types == vec![REPLICATION_TXN_LOG]
    ));
    assert_eq!(err.to_string(), "failed to delete ReplicationTxnLog");
}

#[tokio::test]
async fn missing_items_count_as_purged() {
    let mut client = MockQueueClient::new();
    client
        .set_purge(REPLICATION_TXN, Scripted::Empty)
        .set_purge(REPLICATION_TXN_LOG, Scripted::Ok(7));
    let mut out = Vec::new();

    let outcomes = execute(&mut client, &mut out).await.unwrap();

    assert!(require_all_purged(&outcomes).is_ok());
}
