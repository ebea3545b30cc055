// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! replq-core: Shared data model for the replication queue drainer.
//!
//! This crate provides the batch outcome, status vocabulary, record types and
//! protocol messages used by the replq CLI and its tests.

pub mod batch;
pub mod error;
pub mod protocol;
pub mod record;
pub mod status;

pub use batch::{BatchItem, BatchResult};
pub use error::{Error, Result};
pub use protocol::{ClientMessage, QueryFilter, ServerMessage};
pub use record::{Record, ReplicationTransaction};
pub use status::{FinalTally, ReplicationStatus, StatusTally};
