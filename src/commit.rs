// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! A submitted transaction's terminal validation status (spec §4.3). `CommitStatus`
//! never fails on an invalid commit — a caller that wants `submitTransaction`'s
//! convenience semantics (fail on non-`Valid`) gets that from [`crate::contract`]
//! instead.

use once_cell::sync::OnceCell;
use prost::Message;

use crate::{
    error::GatewayError,
    gateway::Gateway,
    pb::{common::TxValidationCode, gateway as pb_gateway},
};

/// A signable request for a submitted transaction's terminal status. Like
/// [`crate::proposal::Proposal`] and [`crate::transaction::Transaction`], the
/// signature slot fills exactly once and the request bytes are exported for offline
/// signing.
pub struct Commit {
    gateway: Gateway,
    channel_name: String,
    transaction_id: String,
    request_bytes: Vec<u8>,
    signature: OnceCell<Vec<u8>>,
}

impl Commit {
    pub(crate) fn new(gateway: Gateway, channel_name: String, transaction_id: String) -> Self {
        let request_bytes = pb_gateway::CommitStatusRequest {
            channel_id: channel_name.clone(),
            transaction_id: transaction_id.clone(),
            identity: gateway.inner.identity.creator().to_vec(),
        }
        .encode_to_vec();

        Self {
            gateway,
            channel_name,
            transaction_id,
            request_bytes,
            signature: OnceCell::new(),
        }
    }

    pub(crate) fn from_signed_bytes(gateway: Gateway, request_bytes: Vec<u8>, signature: Vec<u8>) -> Result<Self, GatewayError> {
        let decoded = pb_gateway::CommitStatusRequest::decode(request_bytes.as_slice())?;
        let signature_cell = OnceCell::new();
        if !signature.is_empty() {
            let _ = signature_cell.set(signature);
        }
        Ok(Self {
            gateway,
            channel_name: decoded.channel_id,
            transaction_id: decoded.transaction_id,
            request_bytes,
            signature: signature_cell,
        })
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// The bytes that are signed: `SignedCommitStatusRequest.Request`, a marshalled
    /// `CommitStatusRequest`. Exported for offline signing.
    pub fn bytes(&self) -> &[u8] {
        &self.request_bytes
    }

    pub fn digest(&self) -> Vec<u8> {
        self.gateway.inner.identity.hash(&self.request_bytes)
    }

    fn signature(&self) -> Result<Vec<u8>, GatewayError> {
        if let Some(sig) = self.signature.get() {
            return Ok(sig.clone());
        }
        let digest = self.digest();
        let sig = self.gateway.inner.identity.sign(&digest)?;
        let _ = self.signature.set(sig);
        Ok(self.signature.get().expect("just set").clone())
    }

    /// Polls the transaction's terminal validation status. Returns `Ok` regardless of
    /// whether the transaction validated — check [`CommitStatus::successful`].
    pub async fn status(&self) -> Result<CommitStatus, GatewayError> {
        let signature = self.signature()?;
        let gateway = &self.gateway.inner;
        let response = gateway
            .rpc
            .commit_status(
                pb_gateway::SignedCommitStatusRequest {
                    request: self.request_bytes.clone(),
                    signature,
                },
                gateway.timeouts.commit_status,
            )
            .await
            .map_err(|status| GatewayError::CommitStatus {
                transaction_id: self.transaction_id.clone(),
                status,
            })?;

        Ok(CommitStatus {
            transaction_id: self.transaction_id.clone(),
            code: response.result,
            successful: response.result == TxValidationCode::Valid as i32,
            block_number: response.block_number,
        })
    }
}

/// A transaction's terminal validation outcome (spec §4.3). `code` mirrors upstream's
/// `TxValidationCode`; `successful` is `code == Valid`, precomputed so callers don't
/// need to match on the raw code for the common case.
#[derive(Debug, Clone)]
pub struct CommitStatus {
    transaction_id: String,
    pub code: i32,
    pub successful: bool,
    pub block_number: u64,
}

impl CommitStatus {
    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        grpc::test_support::MockGatewayRpc,
        identity::{Sha256, SigningIdentity},
    };

    fn test_gateway_with_result(result: TxValidationCode, block_number: u64) -> Gateway {
        let identity = SigningIdentity::new("Org1MSP", b"cert".to_vec(), Arc::new(Sha256)).unwrap();
        let seen_request: Arc<Mutex<Option<pb_gateway::SignedCommitStatusRequest>>> = Arc::new(Mutex::new(None));
        let seen_request_for_closure = seen_request.clone();
        let mut rpc = MockGatewayRpc::default();
        rpc.commit_status = Some(Box::new(move |request| {
            *seen_request_for_closure.lock().unwrap() = Some(request);
            Ok(pb_gateway::CommitStatusResponse {
                result: result as i32,
                block_number,
            })
        }));
        Gateway::from_parts(Arc::new(identity), Arc::new(rpc), crate::gateway::Timeouts::default())
    }

    #[tokio::test]
    async fn valid_commit_is_successful() {
        let gateway = test_gateway_with_result(TxValidationCode::Valid, 42);
        let commit = Commit::new(gateway, "mychannel".to_string(), "tx1".to_string());
        let status = commit.status().await.unwrap();
        assert!(status.successful);
        assert_eq!(status.block_number, 42);
        assert_eq!(status.transaction_id(), "tx1");
    }

    #[tokio::test]
    async fn mvcc_conflict_is_not_successful_but_not_an_error() {
        let gateway = test_gateway_with_result(TxValidationCode::MvccReadConflict, 43);
        let commit = Commit::new(gateway, "mychannel".to_string(), "tx1".to_string());
        let status = commit.status().await.unwrap();
        assert!(!status.successful);
        assert_eq!(status.code, TxValidationCode::MvccReadConflict as i32);
    }

    #[test]
    fn txid_and_digest_preserved_under_offline_sign() {
        let gateway = test_gateway_with_result(TxValidationCode::Valid, 0);
        let commit = Commit::new(gateway.clone(), "mychannel".to_string(), "tx1".to_string());
        let bytes = commit.bytes().to_vec();
        let digest = commit.digest();

        let rehydrated = Commit::from_signed_bytes(gateway, bytes, vec![7, 7, 7]).unwrap();
        assert_eq!(rehydrated.transaction_id(), "tx1");
        assert_eq!(rehydrated.digest(), digest);
    }

    #[tokio::test]
    async fn status_without_signer_fails_unsupported() {
        let identity = SigningIdentity::new("Org1MSP", b"cert".to_vec(), Arc::new(Sha256)).unwrap();
        let gateway = Gateway::from_parts(Arc::new(identity), Arc::new(MockGatewayRpc::default()), crate::gateway::Timeouts::default());
        let commit = Commit::new(gateway, "mychannel".to_string(), "tx1".to_string());
        let err = commit.status().await.unwrap_err();
        assert!(matches!(err, GatewayError::Unsupported(_)));
    }
}
