// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! The façade entry point: `Gateway::connect(identity, options) -> network(channel) ->
//! contract(chaincode[, name]) -> new_proposal(name)` (spec §4.5, §2).

use std::{sync::Arc, time::Duration};

use log::debug;

use crate::{
    error::GatewayError,
    grpc::{GatewayRpc, GrpcGateway},
    identity::{Hash, Sha256, Sign, SigningIdentity},
    network::Network,
};

const LOG_TARGET: &str = "fabric_gateway::gateway";

const DEFAULT_EVALUATE_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_ENDORSE_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_SUBMIT_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_COMMIT_STATUS_TIMEOUT: Duration = Duration::from_secs(60);

/// Per-stage default deadlines (spec §5). `chaincode_events`/`block_events` default to
/// `None` — no deadline — since a caller opening an event stream is expected to keep
/// it open for a long time.
#[derive(Debug, Clone)]
pub struct Timeouts {
    pub evaluate: Option<Duration>,
    pub endorse: Option<Duration>,
    pub submit: Option<Duration>,
    pub commit_status: Option<Duration>,
    pub chaincode_events: Option<Duration>,
    pub block_events: Option<Duration>,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            evaluate: Some(DEFAULT_EVALUATE_TIMEOUT),
            endorse: Some(DEFAULT_ENDORSE_TIMEOUT),
            submit: Some(DEFAULT_SUBMIT_TIMEOUT),
            commit_status: Some(DEFAULT_COMMIT_STATUS_TIMEOUT),
            chaincode_events: None,
            block_events: None,
        }
    }
}

enum ConnectionOption {
    Existing(Arc<dyn GatewayRpc>),
    Endpoint(String),
}

/// Functional-options builder for [`Gateway::connect`]. Setters return `Self` so they
/// chain; `connect` applies them and performs the (possibly failing) connection step
/// last.
pub struct ConnectOptions {
    sign: Option<Arc<dyn Sign>>,
    hash: Arc<dyn Hash>,
    connection: Option<ConnectionOption>,
    timeouts: Timeouts,
}

impl Default for ConnectOptions {
    fn default() -> Self {
        Self {
            sign: None,
            hash: Arc::new(Sha256),
            connection: None,
            timeouts: Timeouts::default(),
        }
    }
}

impl ConnectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign(mut self, sign: Arc<dyn Sign>) -> Self {
        self.sign = Some(sign);
        self
    }

    pub fn hash(mut self, hash: Arc<dyn Hash>) -> Self {
        self.hash = hash;
        self
    }

    /// Use an already-established gRPC stub. `Gateway::close` will not tear this
    /// connection down (spec §4.5).
    pub fn client_connection(mut self, rpc: Arc<dyn GatewayRpc>) -> Self {
        self.connection = Some(ConnectionOption::Existing(rpc));
        self
    }

    /// Dial `endpoint` when the Gateway connects. `Gateway::close` tears this
    /// connection down, since the Gateway created it.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.connection = Some(ConnectionOption::Endpoint(endpoint.into()));
        self
    }

    pub fn evaluate_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.evaluate = Some(timeout);
        self
    }

    pub fn endorse_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.endorse = Some(timeout);
        self
    }

    pub fn submit_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.submit = Some(timeout);
        self
    }

    pub fn commit_status_timeout(mut self, timeout: Duration) -> Self {
        self.timeouts.commit_status = Some(timeout);
        self
    }

    /// `None` (the default) means no deadline is applied unless the caller passes one
    /// per-call.
    pub fn chaincode_events_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeouts.chaincode_events = timeout;
        self
    }

    pub fn block_events_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeouts.block_events = timeout;
        self
    }
}

pub(crate) struct GatewayInner {
    pub(crate) rpc: Arc<dyn GatewayRpc>,
    pub(crate) identity: Arc<SigningIdentity>,
    pub(crate) timeouts: Timeouts,
}

/// The single network entry point (spec §2). Cheap to clone: `Network`/`Contract`
/// hold a cloned `Gateway`, all sharing the same underlying gRPC stub.
#[derive(Clone)]
pub struct Gateway {
    pub(crate) inner: Arc<GatewayInner>,
    owns_connection: bool,
}

impl Gateway {
    /// Builds a `SigningIdentity` from `msp_id`/`certificate_pem` using the options'
    /// `hash`, attaches the options' `sign` if present, and dials or adopts the
    /// connection per `options.connection`.
    pub async fn connect(msp_id: impl Into<String>, certificate_pem: Vec<u8>, options: ConnectOptions) -> Result<Self, GatewayError> {
        let mut identity = SigningIdentity::new(msp_id, certificate_pem, options.hash)?;
        if let Some(sign) = options.sign {
            identity = identity.with_signer(sign);
        }

        let (rpc, owns_connection): (Arc<dyn GatewayRpc>, bool) = match options.connection {
            Some(ConnectionOption::Existing(rpc)) => (rpc, false),
            Some(ConnectionOption::Endpoint(endpoint)) => {
                debug!(target: LOG_TARGET, "dialling gateway endpoint {}", endpoint);
                (Arc::new(GrpcGateway::connect(endpoint).await?), true)
            },
            None => return Err(GatewayError::InvalidArgument("no endpoint or client connection supplied".to_string())),
        };

        Ok(Self {
            inner: Arc::new(GatewayInner {
                rpc,
                identity: Arc::new(identity),
                timeouts: options.timeouts,
            }),
            owns_connection,
        })
    }

    /// Construct directly from an already-connected identity and rpc stub, bypassing
    /// `ConnectOptions` — used by re-hydration paths (`new_signed_proposal` etc.) that
    /// need a `Gateway` handle without repeating the connect dance.
    pub(crate) fn from_parts(identity: Arc<SigningIdentity>, rpc: Arc<dyn GatewayRpc>, timeouts: Timeouts) -> Self {
        Self {
            inner: Arc::new(GatewayInner { rpc, identity, timeouts }),
            owns_connection: false,
        }
    }

    pub fn network(&self, channel_name: impl Into<String>) -> Network {
        Network::new(self.clone(), channel_name.into())
    }

    /// Re-hydrates a [`crate::proposal::Proposal`] exported (unsigned) from
    /// [`crate::proposal::Proposal::bytes`] together with a signature produced
    /// offline. Preserves the original transaction id and digest; the endorsing-orgs
    /// list cannot be recovered from the wire bytes (it is never encoded in them), so
    /// it defaults to empty — pass `endorsing_orgs` to restore it (spec §9 Open
    /// Question).
    pub fn new_signed_proposal(
        &self,
        proposal_bytes: Vec<u8>,
        signature: Vec<u8>,
        endorsing_orgs: Vec<String>,
    ) -> Result<crate::proposal::Proposal, GatewayError> {
        crate::proposal::Proposal::from_signed_bytes(self.clone(), proposal_bytes, signature, endorsing_orgs)
    }

    /// Re-hydrates a [`crate::transaction::Transaction`] exported (unsigned) from
    /// [`crate::transaction::Transaction::bytes`] together with a signature produced
    /// offline.
    pub fn new_signed_transaction(
        &self,
        payload_bytes: Vec<u8>,
        signature: Vec<u8>,
    ) -> Result<crate::transaction::Transaction, GatewayError> {
        crate::transaction::Transaction::from_signed_bytes(self.clone(), payload_bytes, signature)
    }

    /// Re-hydrates a [`crate::commit::Commit`] exported (unsigned) from
    /// [`crate::commit::Commit::bytes`] together with a signature produced offline.
    pub fn new_signed_commit(&self, request_bytes: Vec<u8>, signature: Vec<u8>) -> Result<crate::commit::Commit, GatewayError> {
        crate::commit::Commit::from_signed_bytes(self.clone(), request_bytes, signature)
    }

    /// Tears down the connection if the Gateway created it; a no-op for a connection
    /// the caller supplied via `client_connection` — dropping our clone of an `Arc`
    /// the caller still holds elsewhere never closes it for them.
    pub fn close(self) {
        if self.owns_connection {
            debug!(target: LOG_TARGET, "closing gateway-owned connection");
        }
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connect_without_endpoint_or_connection_is_invalid_argument() {
        let options = ConnectOptions::new();
        let result = tokio_test_block_on(Gateway::connect("Org1MSP", vec![], options));
        assert!(matches!(result, Err(GatewayError::InvalidArgument(_))));
    }

    fn tokio_test_block_on<F: std::future::Future>(fut: F) -> F::Output {
        tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap().block_on(fut)
    }
}
