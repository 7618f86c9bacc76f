// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! Client for submitting transactions and reading events through a permissioned-ledger
//! gateway peer.
//!
//! The entry point is [`gateway::Gateway::connect`], which yields a [`gateway::Gateway`]
//! scoped down through [`network::Network`] and [`contract::Contract`] to
//! [`proposal::ProposalBuilder`]. A proposal is endorsed into a
//! [`transaction::Transaction`], submitted into a [`commit::Commit`], and polled to a
//! terminal [`commit::CommitStatus`] — the four-stage lifecycle the gateway peer exists
//! to shepherd a transaction through. [`network::Network`] also opens
//! [`events::ChaincodeEventStream`]s and [`events::BlockEventStream`]s.
//!
//! Every wire message this crate builds or decodes lives in [`pb`], hand-authored in
//! the idiom `prost-build` itself emits (spec-equivalent fidelity without depending on
//! `protoc` being available at build time).

pub mod commit;
pub mod contract;
pub mod error;
pub mod events;
pub mod gateway;
pub mod grpc;
pub mod identity;
pub mod network;
pub mod pb;
pub mod proposal;
pub mod transaction;

pub use commit::{Commit, CommitStatus};
pub use contract::Contract;
pub use error::GatewayError;
pub use events::{BlockEventStream, ChaincodeEvent, ChaincodeEventStream, Checkpoint, EventStreamOptions, StartPosition};
pub use gateway::{ConnectOptions, Gateway, Timeouts};
pub use grpc::{BlockEventsKind, GatewayRpc, GrpcGateway};
pub use identity::{Hash, Sha256, Sign, SigningIdentity};
pub use network::Network;
pub use proposal::{Proposal, ProposalBuilder};
pub use transaction::Transaction;
