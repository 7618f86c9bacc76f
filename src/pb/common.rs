// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! `common` package: the envelope/header types shared by every transaction, and the
//! block/validation-code types surfaced by the commit and block-event RPCs.

/// A signed message: `payload` is the canonical bytes that were signed, `signature`
/// is produced over `payload` by the creator identified in its embedded header.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Envelope {
    #[prost(bytes, tag = "1")]
    pub payload: ::std::vec::Vec<u8>,
    #[prost(bytes, tag = "2")]
    pub signature: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Payload {
    #[prost(message, optional, tag = "1")]
    pub header: ::std::option::Option<Header>,
    #[prost(bytes, tag = "2")]
    pub data: ::std::vec::Vec<u8>,
}

/// Both fields are themselves marshalled messages (`ChannelHeader`, `SignatureHeader`)
/// so that their digest can be taken independently of this wrapper.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Header {
    #[prost(bytes, tag = "1")]
    pub channel_header: ::std::vec::Vec<u8>,
    #[prost(bytes, tag = "2")]
    pub signature_header: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChannelHeader {
    #[prost(enumeration = "HeaderType", tag = "1")]
    pub r#type: i32,
    #[prost(int32, tag = "2")]
    pub version: i32,
    #[prost(message, optional, tag = "3")]
    pub timestamp: ::std::option::Option<::prost_types::Timestamp>,
    #[prost(string, tag = "4")]
    pub channel_id: ::std::string::String,
    #[prost(string, tag = "5")]
    pub tx_id: ::std::string::String,
    #[prost(int64, tag = "6")]
    pub epoch: i64,
    /// Marshalled `ChaincodeHeaderExtension`.
    #[prost(bytes, tag = "7")]
    pub extension: ::std::vec::Vec<u8>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum HeaderType {
    MessageType = 0,
    Config = 1,
    ConfigUpdate = 2,
    EndorserTransaction = 3,
    OrdererTransaction = 4,
    DeliverSeekInfo = 5,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignatureHeader {
    #[prost(bytes, tag = "1")]
    pub creator: ::std::vec::Vec<u8>,
    #[prost(bytes, tag = "2")]
    pub nonce: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeId {
    #[prost(string, tag = "1")]
    pub name: ::std::string::String,
    #[prost(string, tag = "2")]
    pub version: ::std::string::String,
    #[prost(string, tag = "3")]
    pub path: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeHeaderExtension {
    #[prost(message, optional, tag = "1")]
    pub chaincode_id: ::std::option::Option<ChaincodeId>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Block {
    #[prost(message, optional, tag = "1")]
    pub header: ::std::option::Option<BlockHeader>,
    #[prost(message, optional, tag = "2")]
    pub data: ::std::option::Option<BlockData>,
    #[prost(message, optional, tag = "3")]
    pub metadata: ::std::option::Option<BlockMetadata>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockHeader {
    #[prost(uint64, tag = "1")]
    pub number: u64,
    #[prost(bytes, tag = "2")]
    pub previous_hash: ::std::vec::Vec<u8>,
    #[prost(bytes, tag = "3")]
    pub data_hash: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockData {
    #[prost(bytes, repeated, tag = "1")]
    pub data: ::std::vec::Vec<::std::vec::Vec<u8>>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockMetadata {
    #[prost(bytes, repeated, tag = "1")]
    pub metadata: ::std::vec::Vec<::std::vec::Vec<u8>>,
}

/// Mirrors `peer.TxValidationCode`; only the codes this crate's test scenarios and
/// callers need to branch on are enumerated, matching upstream tag numbers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum TxValidationCode {
    Valid = 0,
    NilEnvelope = 1,
    BadPayload = 2,
    BadCommonHeader = 3,
    BadCreatorSignature = 4,
    InvalidEndorserTransaction = 5,
    BadProposalTxid = 8,
    DuplicateTxid = 9,
    EndorsementPolicyFailure = 10,
    MvccReadConflict = 11,
    PhantomReadConflict = 12,
    ExpiredChaincode = 17,
    BadChannelHeader = 20,
    BadRwset = 22,
    InvalidOtherReason = 255,
}
