// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! `gateway` package: the five (plus block-event siblings) RPC request/response
//! messages, and the generated client stub for the `Gateway` service.

use super::{common, peer};

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EvaluateRequest {
    #[prost(string, tag = "1")]
    pub channel_id: ::std::string::String,
    #[prost(message, optional, tag = "2")]
    pub proposed_transaction: ::std::option::Option<peer::SignedProposal>,
    #[prost(string, repeated, tag = "3")]
    pub target_organizations: ::std::vec::Vec<::std::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EvaluateResponse {
    #[prost(message, optional, tag = "1")]
    pub result: ::std::option::Option<peer::Response>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EndorseRequest {
    #[prost(string, tag = "1")]
    pub transaction_id: ::std::string::String,
    #[prost(string, tag = "2")]
    pub channel_id: ::std::string::String,
    #[prost(message, optional, tag = "3")]
    pub proposed_transaction: ::std::option::Option<peer::SignedProposal>,
    #[prost(string, repeated, tag = "4")]
    pub endorsing_organizations: ::std::vec::Vec<::std::string::String>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct EndorseResponse {
    #[prost(message, optional, tag = "1")]
    pub prepared_transaction: ::std::option::Option<common::Envelope>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubmitRequest {
    #[prost(string, tag = "1")]
    pub transaction_id: ::std::string::String,
    #[prost(string, tag = "2")]
    pub channel_id: ::std::string::String,
    #[prost(message, optional, tag = "3")]
    pub prepared_transaction: ::std::option::Option<common::Envelope>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SubmitResponse {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommitStatusRequest {
    #[prost(string, tag = "1")]
    pub channel_id: ::std::string::String,
    #[prost(string, tag = "2")]
    pub transaction_id: ::std::string::String,
    #[prost(bytes, tag = "3")]
    pub identity: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignedCommitStatusRequest {
    /// Marshalled `CommitStatusRequest`.
    #[prost(bytes, tag = "1")]
    pub request: ::std::vec::Vec<u8>,
    #[prost(bytes, tag = "2")]
    pub signature: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CommitStatusResponse {
    #[prost(enumeration = "common::TxValidationCode", tag = "1")]
    pub result: i32,
    #[prost(uint64, tag = "2")]
    pub block_number: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SeekNextCommit {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SeekSpecified {
    #[prost(uint64, tag = "1")]
    pub number: u64,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SeekPosition {
    #[prost(oneof = "seek_position::Type", tags = "1, 2")]
    pub r#type: ::std::option::Option<seek_position::Type>,
}

pub mod seek_position {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Type {
        #[prost(message, tag = "1")]
        NextCommit(super::SeekNextCommit),
        #[prost(message, tag = "2")]
        Specified(super::SeekSpecified),
    }
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeEventsRequest {
    #[prost(string, tag = "1")]
    pub channel_id: ::std::string::String,
    #[prost(string, tag = "2")]
    pub chaincode_id: ::std::string::String,
    #[prost(bytes, tag = "3")]
    pub identity: ::std::vec::Vec<u8>,
    #[prost(message, optional, tag = "4")]
    pub start_position: ::std::option::Option<SeekPosition>,
    /// Non-empty only when resuming after a checkpointed transaction within
    /// `start_position`'s block.
    #[prost(string, tag = "5")]
    pub after_transaction_id: ::std::string::String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignedChaincodeEventsRequest {
    /// Marshalled `ChaincodeEventsRequest`.
    #[prost(bytes, tag = "1")]
    pub request: ::std::vec::Vec<u8>,
    #[prost(bytes, tag = "2")]
    pub signature: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeEvent {
    #[prost(string, tag = "1")]
    pub chaincode_id: ::std::string::String,
    #[prost(string, tag = "2")]
    pub transaction_id: ::std::string::String,
    #[prost(string, tag = "3")]
    pub event_name: ::std::string::String,
    #[prost(bytes, tag = "4")]
    pub payload: ::std::vec::Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ChaincodeEventsResponse {
    #[prost(uint64, tag = "1")]
    pub block_number: u64,
    #[prost(message, repeated, tag = "2")]
    pub events: ::std::vec::Vec<ChaincodeEvent>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct BlockEventsRequest {
    #[prost(string, tag = "1")]
    pub channel_id: ::std::string::String,
    #[prost(bytes, tag = "2")]
    pub identity: ::std::vec::Vec<u8>,
    #[prost(message, optional, tag = "3")]
    pub start_position: ::std::option::Option<SeekPosition>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct SignedBlockEventsRequest {
    /// Marshalled `BlockEventsRequest`.
    #[prost(bytes, tag = "1")]
    pub request: ::std::vec::Vec<u8>,
    #[prost(bytes, tag = "2")]
    pub signature: ::std::vec::Vec<u8>,
}

/// Per-endorser detail attached to a non-OK `Endorse` status.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ErrorDetail {
    #[prost(string, tag = "1")]
    pub address: ::std::string::String,
    #[prost(string, tag = "2")]
    pub mspid: ::std::string::String,
    #[prost(string, tag = "3")]
    pub message: ::std::string::String,
}

/// Carries one `ErrorDetail` per endorser that reported a failure. This is the
/// message actually marshalled into a non-OK `Endorse` status's binary details —
/// `ErrorDetail` alone can only ever represent a single endorser's failure.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ErrorDetails {
    #[prost(message, repeated, tag = "1")]
    pub details: ::std::vec::Vec<ErrorDetail>,
}

#[doc = r" Generated client implementation."]
pub mod gateway_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;

    #[doc = " The gRPC interface for interacting with a Gateway peer."]
    #[derive(Clone)]
    pub struct GatewayClient<T> {
        inner: tonic::client::Grpc<T>,
    }

    impl GatewayClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }

    impl<T> GatewayClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }

        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }

        #[doc = " Evaluate a proposal and return its simulated result, without ordering or commit."]
        pub async fn evaluate(
            &mut self,
            request: impl tonic::IntoRequest<super::EvaluateRequest>,
        ) -> Result<tonic::Response<super::EvaluateResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/gateway.Gateway/Evaluate");
            self.inner.unary(request.into_request(), path, codec).await
        }

        #[doc = " Forward a proposal to peers for endorsement."]
        pub async fn endorse(
            &mut self,
            request: impl tonic::IntoRequest<super::EndorseRequest>,
        ) -> Result<tonic::Response<super::EndorseResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/gateway.Gateway/Endorse");
            self.inner.unary(request.into_request(), path, codec).await
        }

        #[doc = " Forward an endorsed, signed transaction to the ordering service."]
        pub async fn submit(
            &mut self,
            request: impl tonic::IntoRequest<super::SubmitRequest>,
        ) -> Result<tonic::Response<super::SubmitResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/gateway.Gateway/Submit");
            self.inner.unary(request.into_request(), path, codec).await
        }

        #[doc = " Poll the terminal validation status of a submitted transaction."]
        pub async fn commit_status(
            &mut self,
            request: impl tonic::IntoRequest<super::SignedCommitStatusRequest>,
        ) -> Result<tonic::Response<super::CommitStatusResponse>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/gateway.Gateway/CommitStatus");
            self.inner.unary(request.into_request(), path, codec).await
        }

        #[doc = " Stream chaincode events emitted from the requested start position onward."]
        pub async fn chaincode_events(
            &mut self,
            request: impl tonic::IntoRequest<super::SignedChaincodeEventsRequest>,
        ) -> Result<tonic::Response<tonic::codec::Streaming<super::ChaincodeEventsResponse>>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/gateway.Gateway/ChaincodeEvents");
            self.inner.server_streaming(request.into_request(), path, codec).await
        }

        #[doc = " Stream full blocks from the requested start position onward."]
        pub async fn block_events(
            &mut self,
            request: impl tonic::IntoRequest<super::SignedBlockEventsRequest>,
        ) -> Result<tonic::Response<tonic::codec::Streaming<super::super::common::Block>>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/gateway.Gateway/BlockEvents");
            self.inner.server_streaming(request.into_request(), path, codec).await
        }

        #[doc = " Stream filtered blocks from the requested start position onward."]
        pub async fn filtered_block_events(
            &mut self,
            request: impl tonic::IntoRequest<super::SignedBlockEventsRequest>,
        ) -> Result<tonic::Response<tonic::codec::Streaming<super::super::common::Block>>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/gateway.Gateway/FilteredBlockEvents");
            self.inner.server_streaming(request.into_request(), path, codec).await
        }

        #[doc = " Stream blocks with private data from the requested start position onward."]
        pub async fn block_and_private_data_events(
            &mut self,
            request: impl tonic::IntoRequest<super::SignedBlockEventsRequest>,
        ) -> Result<tonic::Response<tonic::codec::Streaming<super::super::common::Block>>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(tonic::Code::Unknown, format!("Service was not ready: {}", e.into()))
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/gateway.Gateway/BlockAndPrivateDataEvents");
            self.inner.server_streaming(request.into_request(), path, codec).await
        }
    }
}
