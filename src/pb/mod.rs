// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! Protobuf message types for the gateway wire protocol, hand-authored in the
//! `prost`-generated idiom rather than produced by a `build.rs` + `protoc` step (see
//! DESIGN.md). Organised the same way the upstream schema is split across packages:
//! `common`, `msp`, `peer`, `gateway`.

pub mod common;
pub mod gateway;
pub mod msp;
pub mod peer;
