// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::client::test_helpers::{records_with_statuses, Call, MockQueueClient, Scripted};
use crate::client::RemoteError;

#[tokio::test]
async fn tallies_each_status_bucket() {
    let mut client = MockQueueClient::new();
    client.push_query(
        REPLICATION_TXN,
        Scripted::Ok(records_with_statuses(&[
            "Completed",
            "Completed",
            "Pending",
            "Discarded",
            "Unknown",
        ])),
    );

    let tally = StatusReconciler::new(&mut client)
        .tally(REPLICATION_TXN)
        .await
        .unwrap();

    assert_eq!(
        tally,
        StatusTally {
            not_started: 0,
            pending: 1,
            completed: 2,
            discarded: 1,
            failed_other: 1,
        }
    );
}

#[tokio::test]
async fn no_items_found_is_an_empty_tally() {
    let mut client = MockQueueClient::new();
    client.push_query(REPLICATION_TXN_LOG, Scripted::Empty);

    let tally = StatusReconciler::new(&mut client)
        .tally(REPLICATION_TXN_LOG)
        .await
        .unwrap();

    assert!(tally.is_empty());
    assert_eq!(tally.total(), 0);
}

#[tokio::test]
async fn other_query_failures_propagate() {
    let mut client = MockQueueClient::new();
    client.push_query(REPLICATION_TXN, Scripted::fail("SOAP-ENV:Server", "timeout"));

    let err = StatusReconciler::new(&mut client)
        .tally(REPLICATION_TXN)
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::Logic { ref code, .. } if code == "SOAP-ENV:Server"));
}

#[tokio::test]
async fn log_query_failure_names_the_log_type() {
    let mut client = MockQueueClient::new();
    client
        .push_query(REPLICATION_TXN, Scripted::Ok(records_with_statuses(&["Completed"])))
        .push_query(REPLICATION_TXN_LOG, Scripted::fail("500", "boom"));

    let err = StatusReconciler::new(&mut client)
        .final_tally()
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "query ReplicationTxnLog: server error 500: boom");
}

#[tokio::test]
async fn final_tally_queries_transactions_then_logs() {
    let mut client = MockQueueClient::new();
    client
        .push_query(
            REPLICATION_TXN,
            Scripted::Ok(records_with_statuses(&["Pending", "NotStarted"])),
        )
        .push_query(
            REPLICATION_TXN_LOG,
            Scripted::Ok(records_with_statuses(&["Completed", "Completed", "Discarded"])),
        );

    let tally = StatusReconciler::new(&mut client).final_tally().await.unwrap();

    assert_eq!(tally.transactions.pending, 1);
    assert_eq!(tally.transactions.not_started, 1);
    assert_eq!(tally.logs.completed, 2);
    assert_eq!(tally.logs.discarded, 1);
    assert_eq!(tally.completed(), 2);
    assert_eq!(
        client.calls,
        vec![
            Call::Query(REPLICATION_TXN.to_string()),
            Call::Query(REPLICATION_TXN_LOG.to_string()),
        ]
    );
}

#[tokio::test]
async fn final_tally_stops_at_first_failure() {
    let mut client = MockQueueClient::new();
    client.push_query(REPLICATION_TXN, Scripted::fail("500", "boom"));

    assert!(StatusReconciler::new(&mut client).final_tally().await.is_err());
    assert_eq!(client.query_calls(), 1);
}
