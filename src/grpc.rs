// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! The gRPC seam (spec §4.5): the wire transport is otherwise out of scope for this
//! crate, so every RPC is reached exclusively through the [`GatewayRpc`] trait. Tests
//! implement the trait directly instead of standing up a real peer, the way the
//! teacher's `tari_dan_core::services::BaseNodeClient` trait is implemented once for a
//! live tonic channel and once for a test double.

use std::{pin::Pin, time::Duration};

use async_trait::async_trait;
use futures::Stream;
use prost::Message;
use tonic::{transport::Channel, Status};

use crate::pb::{
    common::Block,
    gateway::{
        gateway_client::GatewayClient,
        ChaincodeEventsResponse,
        CommitStatusResponse,
        EndorseRequest,
        EndorseResponse,
        ErrorDetail,
        ErrorDetails,
        EvaluateRequest,
        EvaluateResponse,
        SignedBlockEventsRequest,
        SignedChaincodeEventsRequest,
        SignedCommitStatusRequest,
        SubmitRequest,
        SubmitResponse,
    },
};

/// Decodes the per-endorser `ErrorDetail` messages a non-OK `Endorse` status carries
/// in its binary details, as a marshalled `ErrorDetails` (spec §7 "partial failure",
/// §8 scenario 4 — two endorsers failing yields two entries). Tolerant of a status
/// that carries none, or details this crate can't decode — an unparsable payload is
/// simply omitted rather than surfaced as a second error.
pub fn error_details(status: &Status) -> Vec<ErrorDetail> {
    let bytes = status.details();
    if bytes.is_empty() {
        return Vec::new();
    }
    ErrorDetails::decode(bytes).map(|wrapper| wrapper.details).unwrap_or_default()
}

/// Which of the block-event RPC family to invoke; the decode/delivery machinery in
/// [`crate::events`] is shared across all three (spec §4.4 "added" note).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockEventsKind {
    Full,
    Filtered,
    WithPrivateData,
}

/// A gRPC server-streaming response, boxed so that [`GatewayRpc`] can be implemented by
/// a test double without standing up a live tonic channel — `tonic::Streaming<T>`
/// itself implements this `Stream` and is boxed into it at the real implementation's
/// call sites.
pub type EventStream<T> = Pin<Box<dyn Stream<Item = Result<T, Status>> + Send>>;

#[async_trait]
pub trait GatewayRpc: Send + Sync {
    async fn evaluate(&self, request: EvaluateRequest, timeout: Option<Duration>) -> Result<EvaluateResponse, Status>;

    async fn endorse(&self, request: EndorseRequest, timeout: Option<Duration>) -> Result<EndorseResponse, Status>;

    async fn submit(&self, request: SubmitRequest, timeout: Option<Duration>) -> Result<SubmitResponse, Status>;

    async fn commit_status(
        &self,
        request: SignedCommitStatusRequest,
        timeout: Option<Duration>,
    ) -> Result<CommitStatusResponse, Status>;

    async fn chaincode_events(
        &self,
        request: SignedChaincodeEventsRequest,
        timeout: Option<Duration>,
    ) -> Result<EventStream<ChaincodeEventsResponse>, Status>;

    async fn block_events(
        &self,
        kind: BlockEventsKind,
        request: SignedBlockEventsRequest,
        timeout: Option<Duration>,
    ) -> Result<EventStream<Block>, Status>;
}

/// Runs `fut`, bounding it by `timeout` when supplied. A zero-duration timeout elapses
/// immediately, which is relied on by tests and by callers that want to force explicit
/// deadline passing (spec §5).
async fn bounded<F, T>(timeout: Option<Duration>, fut: F) -> Result<T, Status>
where
    F: std::future::Future<Output = Result<tonic::Response<T>, Status>>,
{
    let response = match timeout {
        Some(duration) => tokio::time::timeout(duration, fut)
            .await
            .map_err(|_| Status::deadline_exceeded("gateway call exceeded its deadline"))??,
        None => fut.await?,
    };
    Ok(response.into_inner())
}

/// Adapts the generated tonic stub to [`GatewayRpc`]. `GatewayClient<Channel>` clones
/// cheaply (the underlying HTTP/2 connection is shared and multiplexed), so each call
/// clones it rather than holding a lock across a suspension point.
#[derive(Clone)]
pub struct GrpcGateway {
    client: GatewayClient<Channel>,
}

impl GrpcGateway {
    pub fn new(channel: Channel) -> Self {
        Self {
            client: GatewayClient::new(channel),
        }
    }

    pub async fn connect(endpoint: String) -> Result<Self, tonic::transport::Error> {
        Ok(Self {
            client: GatewayClient::connect(endpoint).await?,
        })
    }
}

#[async_trait]
impl GatewayRpc for GrpcGateway {
    async fn evaluate(&self, request: EvaluateRequest, timeout: Option<Duration>) -> Result<EvaluateResponse, Status> {
        let mut client = self.client.clone();
        bounded(timeout, client.evaluate(request)).await
    }

    async fn endorse(&self, request: EndorseRequest, timeout: Option<Duration>) -> Result<EndorseResponse, Status> {
        let mut client = self.client.clone();
        bounded(timeout, client.endorse(request)).await
    }

    async fn submit(&self, request: SubmitRequest, timeout: Option<Duration>) -> Result<SubmitResponse, Status> {
        let mut client = self.client.clone();
        bounded(timeout, client.submit(request)).await
    }

    async fn commit_status(
        &self,
        request: SignedCommitStatusRequest,
        timeout: Option<Duration>,
    ) -> Result<CommitStatusResponse, Status> {
        let mut client = self.client.clone();
        bounded(timeout, client.commit_status(request)).await
    }

    async fn chaincode_events(
        &self,
        request: SignedChaincodeEventsRequest,
        timeout: Option<Duration>,
    ) -> Result<EventStream<ChaincodeEventsResponse>, Status> {
        let mut client = self.client.clone();
        let stream = bounded(timeout, client.chaincode_events(request)).await?;
        Ok(Box::pin(stream))
    }

    async fn block_events(
        &self,
        kind: BlockEventsKind,
        request: SignedBlockEventsRequest,
        timeout: Option<Duration>,
    ) -> Result<EventStream<Block>, Status> {
        let mut client = self.client.clone();
        let stream = match kind {
            BlockEventsKind::Full => bounded(timeout, client.block_events(request)).await,
            BlockEventsKind::Filtered => bounded(timeout, client.filtered_block_events(request)).await,
            BlockEventsKind::WithPrivateData => bounded(timeout, client.block_and_private_data_events(request)).await,
        }?;
        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_details_decodes_every_endorser_failure() {
        let payload = ErrorDetails {
            details: vec![
                ErrorDetail {
                    address: "peer0".to_string(),
                    mspid: "Org1MSP".to_string(),
                    message: "MVCC_READ_CONFLICT".to_string(),
                },
                ErrorDetail {
                    address: "peer1".to_string(),
                    mspid: "Org2MSP".to_string(),
                    message: "MVCC_READ_CONFLICT".to_string(),
                },
            ],
        }
        .encode_to_vec();
        let status = Status::with_details(tonic::Code::Aborted, "endorsement failed", payload.into());

        let details = error_details(&status);
        assert_eq!(details.len(), 2);
        assert_eq!(details[0].address, "peer0");
        assert_eq!(details[1].address, "peer1");
    }

    #[test]
    fn error_details_is_empty_when_status_carries_none() {
        let status = Status::new(tonic::Code::Aborted, "endorsement failed");
        assert!(error_details(&status).is_empty());
    }
}
