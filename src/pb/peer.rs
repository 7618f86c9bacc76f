// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! `peer` package: the proposal/endorsement/transaction chain. Several fields below
//! carry the marshalled bytes of another message in this file rather than the message
//! itself — that's upstream's own layering (a field must be digested/signed
//! independently of its container) and `crate::transaction` decodes through it.

use super::common;

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignedProposal {
    /// Marshalled `Proposal`.
    #[prost(bytes, tag = "1")]
    pub proposal_bytes: ::std::vec::Vec<u8>,
    #[prost(bytes, tag = "2")]
    pub signature: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Proposal {
    /// Marshalled `common.Header`.
    #[prost(bytes, tag = "1")]
    pub header: ::std::vec::Vec<u8>,
    /// Marshalled `ChaincodeProposalPayload`.
    #[prost(bytes, tag = "2")]
    pub payload: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeProposalPayload {
    /// Marshalled `ChaincodeInvocationSpec`.
    #[prost(bytes, tag = "1")]
    pub input: ::std::vec::Vec<u8>,
    #[prost(map = "string, bytes", tag = "2")]
    pub transient_map: ::std::collections::HashMap<::std::string::String, ::std::vec::Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeInput {
    #[prost(bytes, repeated, tag = "1")]
    pub args: ::std::vec::Vec<::std::vec::Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeSpec {
    #[prost(enumeration = "chaincode_spec::Type", tag = "1")]
    pub r#type: i32,
    #[prost(message, optional, tag = "2")]
    pub chaincode_id: ::std::option::Option<common::ChaincodeId>,
    #[prost(message, optional, tag = "3")]
    pub input: ::std::option::Option<ChaincodeInput>,
}

pub mod chaincode_spec {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
        Unspecified = 0,
        Golang = 1,
        Node = 2,
        Java = 3,
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeInvocationSpec {
    #[prost(message, optional, tag = "1")]
    pub chaincode_spec: ::std::option::Option<ChaincodeSpec>,
}

/// A chaincode invocation's simulated result, as returned from the peer to the
/// application (via `EvaluateResponse`) or embedded in a `ProposalResponsePayload`
/// extension (via `EndorseResponse`'s prepared transaction).
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Response {
    #[prost(int32, tag = "1")]
    pub status: i32,
    #[prost(string, tag = "2")]
    pub message: ::std::string::String,
    #[prost(bytes, tag = "3")]
    pub payload: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeAction {
    #[prost(bytes, tag = "1")]
    pub results: ::std::vec::Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub response: ::std::option::Option<Response>,
    #[prost(message, optional, tag = "3")]
    pub chaincode_id: ::std::option::Option<common::ChaincodeId>,
    #[prost(bytes, tag = "4")]
    pub events: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProposalResponsePayload {
    #[prost(bytes, tag = "1")]
    pub proposal_hash: ::std::vec::Vec<u8>,
    /// Marshalled `ChaincodeAction`.
    #[prost(bytes, tag = "2")]
    pub extension: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Endorsement {
    #[prost(bytes, tag = "1")]
    pub endorser: ::std::vec::Vec<u8>,
    #[prost(bytes, tag = "2")]
    pub signature: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeEndorsedAction {
    /// Marshalled `ProposalResponsePayload`.
    #[prost(bytes, tag = "1")]
    pub proposal_response_payload: ::std::vec::Vec<u8>,
    #[prost(message, repeated, tag = "2")]
    pub endorsements: ::std::vec::Vec<Endorsement>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeActionPayload {
    /// Marshalled `ChaincodeProposalPayload`.
    #[prost(bytes, tag = "1")]
    pub chaincode_proposal_payload: ::std::vec::Vec<u8>,
    #[prost(message, optional, tag = "2")]
    pub action: ::std::option::Option<ChaincodeEndorsedAction>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TransactionAction {
    /// Marshalled `common.SignatureHeader`.
    #[prost(bytes, tag = "1")]
    pub header: ::std::vec::Vec<u8>,
    /// Marshalled `ChaincodeActionPayload`.
    #[prost(bytes, tag = "2")]
    pub payload: ::std::vec::Vec<u8>,
}

/// The payload of an `Envelope` whose header type is `ENDORSER_TRANSACTION`. Decoded
/// from `common.Payload.data`.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Transaction {
    #[prost(message, repeated, tag = "1")]
    pub actions: ::std::vec::Vec<TransactionAction>,
}
