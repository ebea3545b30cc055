// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Client side of the replication server protocol.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Drainer/Producer │────►│  Session    │────►│  Transport  │────► server
//! │   /Reconciler    │◄────│ (RemoteQ..) │◄────│   (trait)   │◄────
//! └──────────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! - [`RemoteQueueClient`] is the seam the core logic depends on
//! - [`RemoteSession`] implements it for one logged-in identity
//! - [`Transport`] carries one request/response pair at a time

mod remote;
mod session;
mod transport;

pub use remote::{RemoteError, RemoteFuture, RemoteQueueClient, RemoteResult};
pub use session::{password_digest, RemoteSession};
pub use transport::{Transport, TransportError, TransportFuture, TransportResult, WebSocketTransport};

#[cfg(test)]
pub(crate) mod test_helpers;

#[cfg(test)]
mod transport_tests;
