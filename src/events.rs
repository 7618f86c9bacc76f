// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! Chaincode and block event streams (spec §4.4). Each stream signs its request
//! eagerly (there is no offline-sign re-hydration path for event streams, unlike
//! proposals/transactions/commits) and delivers decoded items to the caller over a
//! bounded channel, mirroring the teacher's `BATCH_SIZE`-bounded channel in
//! `base_node/rpc/service.rs` so that a slow consumer applies backpressure to the
//! background pump task rather than buffering unboundedly in this process.

use std::time::Duration;

use futures::StreamExt;
use log::warn;
use prost::Message;
use tokio::{sync::mpsc, task::JoinHandle};

use crate::{
    error::GatewayError,
    gateway::Gateway,
    grpc::{BlockEventsKind, EventStream},
    network::Network,
    pb::{
        common::Block,
        gateway::{self as pb_gateway, ChaincodeEventsResponse},
    },
};

const LOG_TARGET: &str = "fabric_gateway::events";
const CHANNEL_CAPACITY: usize = 64;

/// Where a newly opened event stream should start (spec §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartPosition {
    /// The next block to be committed after the stream opens.
    NextCommit,
    /// A specific block number, inclusive.
    BlockNumber(u64),
}

/// A resumption point captured from a previously delivered chaincode event: the block
/// it arrived in, and (if resuming mid-block) the last transaction already delivered.
#[derive(Debug, Clone)]
pub struct Checkpoint {
    pub block_number: u64,
    pub transaction_id: Option<String>,
}

/// Options common to chaincode and block event streams.
pub struct EventStreamOptions {
    start_position: StartPosition,
    after_transaction_id: Option<String>,
    timeout: Option<Duration>,
}

impl Default for EventStreamOptions {
    fn default() -> Self {
        Self {
            start_position: StartPosition::NextCommit,
            after_transaction_id: None,
            timeout: None,
        }
    }
}

impl EventStreamOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_block(mut self, block_number: u64) -> Self {
        self.start_position = StartPosition::BlockNumber(block_number);
        self
    }

    /// Resume from a previously captured [`Checkpoint`]. Only meaningful for
    /// chaincode event streams — block event streams have no `after_transaction_id`
    /// equivalent on the wire and ignore it.
    pub fn checkpoint(mut self, checkpoint: Checkpoint) -> Self {
        self.start_position = StartPosition::BlockNumber(checkpoint.block_number);
        self.after_transaction_id = checkpoint.transaction_id;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

fn to_seek_position(start: StartPosition) -> pb_gateway::SeekPosition {
    let inner = match start {
        StartPosition::NextCommit => pb_gateway::seek_position::Type::NextCommit(pb_gateway::SeekNextCommit {}),
        StartPosition::BlockNumber(number) => pb_gateway::seek_position::Type::Specified(pb_gateway::SeekSpecified { number }),
    };
    pb_gateway::SeekPosition { r#type: Some(inner) }
}

/// A chaincode event emitted during a committed transaction's invocation (spec §3).
#[derive(Debug, Clone)]
pub struct ChaincodeEvent {
    pub block_number: u64,
    pub chaincode_id: String,
    pub transaction_id: String,
    pub event_name: String,
    pub payload: Vec<u8>,
}

async fn pump_chaincode_events(mut stream: EventStream<ChaincodeEventsResponse>, tx: mpsc::Sender<Result<ChaincodeEvent, GatewayError>>) {
    while let Some(item) = stream.next().await {
        let response = match item {
            Ok(response) => response,
            Err(status) => {
                let _ = tx.send(Err(GatewayError::EventStream(status))).await;
                return;
            },
        };
        for event in response.events {
            let event = ChaincodeEvent {
                block_number: response.block_number,
                chaincode_id: event.chaincode_id,
                transaction_id: event.transaction_id,
                event_name: event.event_name,
                payload: event.payload,
            };
            if tx.send(Ok(event)).await.is_err() {
                warn!(target: LOG_TARGET, "chaincode event stream consumer dropped, stopping pump");
                return;
            }
        }
    }
}

/// A live, signed subscription to a channel's chaincode events (spec §4.4). Dropping
/// or [`close`](ChaincodeEventStream::close)-ing it stops the background pump task;
/// both are idempotent.
pub struct ChaincodeEventStream {
    rx: mpsc::Receiver<Result<ChaincodeEvent, GatewayError>>,
    task: JoinHandle<()>,
}

impl ChaincodeEventStream {
    pub(crate) async fn open(network: Network, chaincode_name: String, options: EventStreamOptions) -> Result<Self, GatewayError> {
        let gateway = network.gateway();
        let identity = &gateway.inner.identity;

        let request_bytes = pb_gateway::ChaincodeEventsRequest {
            channel_id: network.channel_name().to_string(),
            chaincode_id: chaincode_name,
            identity: identity.creator().to_vec(),
            start_position: Some(to_seek_position(options.start_position)),
            after_transaction_id: options.after_transaction_id.unwrap_or_default(),
        }
        .encode_to_vec();

        let signature = identity.sign(&identity.hash(&request_bytes))?;
        let timeout = options.timeout.or(gateway.inner.timeouts.chaincode_events);

        let stream = gateway
            .inner
            .rpc
            .chaincode_events(
                pb_gateway::SignedChaincodeEventsRequest {
                    request: request_bytes,
                    signature,
                },
                timeout,
            )
            .await
            .map_err(GatewayError::EventStream)?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let task = tokio::spawn(pump_chaincode_events(stream, tx));
        Ok(Self { rx, task })
    }

    /// Awaits the next event, or `None` once the stream ends (server closed it, or the
    /// underlying RPC failed and already delivered its terminal `Err`).
    pub async fn next(&mut self) -> Option<Result<ChaincodeEvent, GatewayError>> {
        self.rx.recv().await
    }

    pub fn close(self) {
        self.task.abort();
    }
}

impl Drop for ChaincodeEventStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn pump_block_events(mut stream: EventStream<Block>, tx: mpsc::Sender<Result<Block, GatewayError>>) {
    while let Some(item) = stream.next().await {
        let mapped = item.map_err(GatewayError::EventStream);
        let failed = mapped.is_err();
        if tx.send(mapped).await.is_err() {
            warn!(target: LOG_TARGET, "block event stream consumer dropped, stopping pump");
            return;
        }
        if failed {
            return;
        }
    }
}

/// A live, signed subscription to a channel's blocks — full, filtered, or with
/// private data depending on which [`Network`] method opened it (spec §4.4 "added"
/// note). Dropping or [`close`](BlockEventStream::close)-ing it stops the background
/// pump task; both are idempotent.
pub struct BlockEventStream {
    rx: mpsc::Receiver<Result<Block, GatewayError>>,
    task: JoinHandle<()>,
}

impl BlockEventStream {
    pub(crate) async fn open(network: Network, kind: BlockEventsKind, options: EventStreamOptions) -> Result<Self, GatewayError> {
        let gateway = network.gateway();
        let identity = &gateway.inner.identity;

        let request_bytes = pb_gateway::BlockEventsRequest {
            channel_id: network.channel_name().to_string(),
            identity: identity.creator().to_vec(),
            start_position: Some(to_seek_position(options.start_position)),
        }
        .encode_to_vec();

        let signature = identity.sign(&identity.hash(&request_bytes))?;
        let timeout = options.timeout.or(gateway.inner.timeouts.block_events);

        let stream = gateway
            .inner
            .rpc
            .block_events(
                kind,
                pb_gateway::SignedBlockEventsRequest {
                    request: request_bytes,
                    signature,
                },
                timeout,
            )
            .await
            .map_err(GatewayError::EventStream)?;

        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let task = tokio::spawn(pump_block_events(stream, tx));
        Ok(Self { rx, task })
    }

    pub async fn next(&mut self) -> Option<Result<Block, GatewayError>> {
        self.rx.recv().await
    }

    pub fn close(self) {
        self.task.abort();
    }
}

impl Drop for BlockEventStream {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        grpc::test_support::MockGatewayRpc,
        identity::{Sha256, Sign, SigningIdentity},
    };

    struct NullSign;
    impl Sign for NullSign {
        fn sign(&self, digest: &[u8]) -> Result<Vec<u8>, GatewayError> {
            Ok(digest.to_vec())
        }
    }

    fn signed_gateway(rpc: MockGatewayRpc) -> Gateway {
        let (gateway, _) = signed_gateway_with_rpc(rpc);
        gateway
    }

    fn signed_gateway_with_rpc(rpc: MockGatewayRpc) -> (Gateway, Arc<MockGatewayRpc>) {
        let identity = SigningIdentity::new("Org1MSP", b"cert".to_vec(), Arc::new(Sha256))
            .unwrap()
            .with_signer(Arc::new(NullSign));
        let rpc = Arc::new(rpc);
        let gateway = Gateway::from_parts(Arc::new(identity), rpc.clone(), crate::gateway::Timeouts::default());
        (gateway, rpc)
    }

    #[tokio::test]
    async fn chaincode_events_deliver_one_event_per_block_entry() {
        let mut rpc = MockGatewayRpc::default();
        *rpc.chaincode_events.lock().unwrap() = Some(vec![Ok(ChaincodeEventsResponse {
            block_number: 7,
            events: vec![crate::pb::gateway::ChaincodeEvent {
                chaincode_id: "mycc".to_string(),
                transaction_id: "tx1".to_string(),
                event_name: "Transferred".to_string(),
                payload: b"payload".to_vec(),
            }],
        })]);
        let gateway = signed_gateway(rpc);
        let network = gateway.network("mychannel");

        let mut stream = ChaincodeEventStream::open(network, "mycc".to_string(), EventStreamOptions::new().start_block(418))
            .await
            .unwrap();
        let event = stream.next().await.unwrap().unwrap();
        assert_eq!(event.block_number, 7);
        assert_eq!(event.transaction_id, "tx1");
        assert_eq!(event.event_name, "Transferred");
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn opening_without_signer_fails_unsupported() {
        let identity = SigningIdentity::new("Org1MSP", b"cert".to_vec(), Arc::new(Sha256)).unwrap();
        let gateway = Gateway::from_parts(Arc::new(identity), Arc::new(MockGatewayRpc::default()), crate::gateway::Timeouts::default());
        let network = gateway.network("mychannel");
        let err = ChaincodeEventStream::open(network, "mycc".to_string(), EventStreamOptions::new()).await.unwrap_err();
        assert!(matches!(err, GatewayError::Unsupported(_)));
    }

    #[tokio::test]
    async fn start_position_is_captured_in_the_request() {
        let mut rpc = MockGatewayRpc::default();
        *rpc.chaincode_events.lock().unwrap() = Some(vec![]);
        let (gateway, rpc) = signed_gateway_with_rpc(rpc);
        let network = gateway.network("mychannel");

        let stream = ChaincodeEventStream::open(network, "mycc".to_string(), EventStreamOptions::new().start_block(418))
            .await
            .unwrap();
        stream.close();

        let sent = rpc.last_chaincode_events_request.lock().unwrap().clone().unwrap();
        let request = pb_gateway::ChaincodeEventsRequest::decode(sent.request.as_slice()).unwrap();
        match request.start_position.unwrap().r#type.unwrap() {
            pb_gateway::seek_position::Type::Specified(specified) => assert_eq!(specified.number, 418),
            pb_gateway::seek_position::Type::NextCommit(_) => panic!("expected Specified start position, got NextCommit"),
        }
    }

    #[tokio::test]
    async fn block_events_stop_after_a_stream_error() {
        let mut rpc = MockGatewayRpc::default();
        *rpc.block_events.lock().unwrap() = Some(vec![
            Ok(Block::default()),
            Err(tonic::Status::unavailable("peer disconnected")),
        ]);
        let gateway = signed_gateway(rpc);
        let network = gateway.network("mychannel");

        let mut stream = BlockEventStream::open(network, BlockEventsKind::Full, EventStreamOptions::new()).await.unwrap();
        assert!(stream.next().await.unwrap().is_ok());
        assert!(stream.next().await.unwrap().is_err());
        assert!(stream.next().await.is_none());
    }
}
