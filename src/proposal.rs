// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! `ProposalBuilder`/`Proposal` (spec §4.1): constructs the `ChannelHeader` +
//! `SignatureHeader` + `ChaincodeProposalPayload`, derives the transaction id, and
//! carries the unsigned/signed `SignedProposal` through to endorsement.

use std::collections::HashMap;

use log::debug;
use once_cell::sync::OnceCell;
use prost::Message;
use rand::RngCore;

use crate::{
    contract::Contract,
    error::GatewayError,
    gateway::Gateway,
    pb::{common, peer},
    transaction::Transaction,
};

const LOG_TARGET: &str = "fabric_gateway::proposal";
const NONCE_LEN: usize = 24;

fn to_prost_timestamp(dt: chrono::DateTime<chrono::Utc>) -> prost_types::Timestamp {
    prost_types::Timestamp {
        seconds: dt.timestamp(),
        nanos: dt.timestamp_subsec_nanos() as i32,
    }
}

/// Builder for a [`Proposal`] (spec §4.1). Obtained from
/// [`Contract::new_proposal`]; terminal [`ProposalBuilder::build`] performs the
/// (infallible, offline) message construction and transaction id derivation.
pub struct ProposalBuilder {
    contract: Contract,
    transaction_name: String,
    arguments: Vec<Vec<u8>>,
    transient: HashMap<String, Vec<u8>>,
    endorsing_orgs: Vec<String>,
}

impl ProposalBuilder {
    pub(crate) fn new(contract: Contract, transaction_name: String) -> Self {
        Self {
            contract,
            transaction_name,
            arguments: Vec::new(),
            transient: HashMap::new(),
            endorsing_orgs: Vec::new(),
        }
    }

    pub fn add_argument(mut self, argument: Vec<u8>) -> Self {
        self.arguments.push(argument);
        self
    }

    pub fn arguments(mut self, arguments: impl IntoIterator<Item = Vec<u8>>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    pub fn transient(mut self, transient: HashMap<String, Vec<u8>>) -> Self {
        self.transient = transient;
        self
    }

    pub fn endorsing_organizations(mut self, orgs: impl IntoIterator<Item = String>) -> Self {
        self.endorsing_orgs.extend(orgs);
        self
    }

    pub fn build(self) -> Result<Proposal, GatewayError> {
        let network = self.contract.network();
        let gateway = network.gateway().clone();
        let identity = gateway.inner.identity.clone();
        let channel_name = network.channel_name().to_string();
        let chaincode_name = self.contract.chaincode_name().to_string();

        let mut nonce = vec![0u8; NONCE_LEN];
        rand::thread_rng().fill_bytes(&mut nonce);

        let mut preimage = nonce.clone();
        preimage.extend_from_slice(identity.creator());
        let transaction_id = hex::encode(identity.hash(&preimage));

        let mut args = Vec::with_capacity(self.arguments.len() + 1);
        args.push(self.transaction_name.clone().into_bytes());
        args.extend(self.arguments);

        let input_bytes = peer::ChaincodeInvocationSpec {
            chaincode_spec: Some(peer::ChaincodeSpec {
                r#type: peer::chaincode_spec::Type::Golang as i32,
                chaincode_id: Some(common::ChaincodeId {
                    name: chaincode_name.clone(),
                    ..Default::default()
                }),
                input: Some(peer::ChaincodeInput { args }),
            }),
        }
        .encode_to_vec();

        let payload_bytes = peer::ChaincodeProposalPayload {
            input: input_bytes,
            transient_map: self.transient,
        }
        .encode_to_vec();

        let extension_bytes = common::ChaincodeHeaderExtension {
            chaincode_id: Some(common::ChaincodeId {
                name: chaincode_name,
                ..Default::default()
            }),
        }
        .encode_to_vec();

        let channel_header_bytes = common::ChannelHeader {
            r#type: common::HeaderType::EndorserTransaction as i32,
            version: 0,
            timestamp: Some(to_prost_timestamp(chrono::Utc::now())),
            channel_id: channel_name.clone(),
            tx_id: transaction_id.clone(),
            epoch: 0,
            extension: extension_bytes,
        }
        .encode_to_vec();

        let signature_header_bytes = common::SignatureHeader {
            creator: identity.creator().to_vec(),
            nonce,
        }
        .encode_to_vec();

        let header_bytes = common::Header {
            channel_header: channel_header_bytes,
            signature_header: signature_header_bytes,
        }
        .encode_to_vec();

        let proposal_bytes = peer::Proposal {
            header: header_bytes,
            payload: payload_bytes,
        }
        .encode_to_vec();

        debug!(target: LOG_TARGET, "built proposal {} on channel {}", transaction_id, channel_name);

        Ok(Proposal {
            gateway,
            channel_name,
            transaction_id,
            proposal_bytes,
            signature: OnceCell::new(),
            endorsing_orgs: self.endorsing_orgs,
        })
    }
}

/// An unsigned-or-signed `SignedProposal`, plus the transaction id derived alongside
/// it (spec §3 Proposal). The signature slot fills exactly once, lazily, the first
/// time a terminal operation needs it.
pub struct Proposal {
    gateway: Gateway,
    channel_name: String,
    transaction_id: String,
    proposal_bytes: Vec<u8>,
    signature: OnceCell<Vec<u8>>,
    endorsing_orgs: Vec<String>,
}

impl Proposal {
    pub(crate) fn from_signed_bytes(
        gateway: Gateway,
        proposal_bytes: Vec<u8>,
        signature: Vec<u8>,
        endorsing_orgs: Vec<String>,
    ) -> Result<Self, GatewayError> {
        let decoded = peer::Proposal::decode(proposal_bytes.as_slice())?;
        let header = common::Header::decode(decoded.header.as_slice())?;
        let channel_header = common::ChannelHeader::decode(header.channel_header.as_slice())?;

        let signature_cell = OnceCell::new();
        if !signature.is_empty() {
            let _ = signature_cell.set(signature);
        }

        Ok(Self {
            gateway,
            channel_name: channel_header.channel_id,
            transaction_id: channel_header.tx_id,
            proposal_bytes,
            signature: signature_cell,
            endorsing_orgs,
        })
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// The bytes that are signed: `SignedProposal.ProposalBytes`, a marshalled
    /// `peer.Proposal`. Exported for offline signing.
    pub fn bytes(&self) -> &[u8] {
        &self.proposal_bytes
    }

    pub fn digest(&self) -> Vec<u8> {
        self.gateway.inner.identity.hash(&self.proposal_bytes)
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

    fn signed_proposal(&self) -> Result<peer::SignedProposal, GatewayError> {
        Ok(peer::SignedProposal {
            proposal_bytes: self.proposal_bytes.clone(),
            signature: self.signature()?,
        })
    }

    /// Simulates the proposal without ordering or committing it (spec §4.1 Evaluate).
    pub async fn evaluate(&self) -> Result<Vec<u8>, GatewayError> {
        let signed_proposal = self.signed_proposal()?;
        let gateway = &self.gateway.inner;
        let response = gateway
            .rpc
            .evaluate(
                crate::pb::gateway::EvaluateRequest {
                    channel_id: self.channel_name.clone(),
                    proposed_transaction: Some(signed_proposal),
                    target_organizations: self.endorsing_orgs.clone(),
                },
                gateway.timeouts.evaluate,
            )
            .await
            .map_err(|status| GatewayError::Evaluate {
                transaction_id: self.transaction_id.clone(),
                status,
            })?;
        Ok(response.result.map(|r| r.payload).unwrap_or_default())
    }

    /// Sends the proposal to peers for endorsement (spec §4.1 Endorse).
    pub async fn endorse(&self) -> Result<Transaction, GatewayError> {
        let signed_proposal = self.signed_proposal()?;
        let gateway = &self.gateway.inner;
        let response = gateway
            .rpc
            .endorse(
                crate::pb::gateway::EndorseRequest {
                    transaction_id: self.transaction_id.clone(),
                    channel_id: self.channel_name.clone(),
                    proposed_transaction: Some(signed_proposal),
                    endorsing_organizations: self.endorsing_orgs.clone(),
                },
                gateway.timeouts.endorse,
            )
            .await
            .map_err(|status| {
                let details = crate::grpc::error_details(&status);
                GatewayError::Endorse {
                    transaction_id: self.transaction_id.clone(),
                    status,
                    details,
                }
            })?;

        let envelope = response.prepared_transaction.unwrap_or_default();
        Transaction::new(self.gateway.clone(), self.channel_name.clone(), self.transaction_id.clone(), envelope)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        grpc::test_support::MockGatewayRpc,
        identity::{Sha256, SigningIdentity},
    };

    struct NullSign;
    impl crate::identity::Sign for NullSign {
        fn sign(&self, digest: &[u8]) -> Result<Vec<u8>, GatewayError> {
            Ok(digest.to_vec())
        }
    }

    fn test_gateway(signer: Option<Arc<dyn crate::identity::Sign>>) -> Gateway {
        let mut identity = SigningIdentity::new("Org1MSP", b"cert".to_vec(), Arc::new(Sha256)).unwrap();
        if let Some(signer) = signer {
            identity = identity.with_signer(signer);
        }
        Gateway::from_parts(Arc::new(identity), Arc::new(MockGatewayRpc::default()), crate::gateway::Timeouts::default())
    }

    fn test_contract(gateway: Gateway) -> Contract {
        let network = gateway.network("mychannel");
        network.contract("mycc", None)
    }

    #[test]
    fn nonce_freshness_yields_distinct_transaction_ids() {
        let contract = test_contract(test_gateway(None));
        let p1 = contract.new_proposal("transact").unwrap().build().unwrap();
        let p2 = contract.new_proposal("transact").unwrap().build().unwrap();
        assert_ne!(p1.transaction_id(), p2.transaction_id());
    }

    #[test]
    fn header_fidelity_default_contract() {
        let contract = test_contract(test_gateway(None));
        let proposal = contract.new_proposal("transact").unwrap().add_argument(b"a1".to_vec()).build().unwrap();

        let decoded = peer::Proposal::decode(proposal.bytes()).unwrap();
        let header = common::Header::decode(decoded.header.as_slice()).unwrap();
        let channel_header = common::ChannelHeader::decode(header.channel_header.as_slice()).unwrap();
        assert_eq!(channel_header.channel_id, "mychannel");
        assert_eq!(channel_header.tx_id, proposal.transaction_id());

        let extension = common::ChaincodeHeaderExtension::decode(channel_header.extension.as_slice()).unwrap();
        assert_eq!(extension.chaincode_id.unwrap().name, "mycc");

        let payload = peer::ChaincodeProposalPayload::decode(decoded.payload.as_slice()).unwrap();
        let invocation = peer::ChaincodeInvocationSpec::decode(payload.input.as_slice()).unwrap();
        let spec = invocation.chaincode_spec.unwrap();
        assert_eq!(spec.chaincode_id.unwrap().name, "mycc");
        let args = spec.input.unwrap().args;
        assert_eq!(args[0], b"transact".to_vec());
        assert_eq!(args[1], b"a1".to_vec());
    }

    #[test]
    fn named_contract_prefixes_transaction_name() {
        let gateway = test_gateway(None);
        let network = gateway.network("mychannel");
        let contract = network.contract("mycc", Some("AssetContract".to_string()));
        let proposal = contract.new_proposal("Transfer").unwrap().build().unwrap();

        let decoded = peer::Proposal::decode(proposal.bytes()).unwrap();
        let payload = peer::ChaincodeProposalPayload::decode(decoded.payload.as_slice()).unwrap();
        let invocation = peer::ChaincodeInvocationSpec::decode(payload.input.as_slice()).unwrap();
        let args = invocation.chaincode_spec.unwrap().input.unwrap().args;
        assert_eq!(args[0], b"AssetContract:Transfer".to_vec());
    }

    #[test]
    fn empty_transaction_name_is_invalid_argument() {
        let contract = test_contract(test_gateway(None));
        let err = contract.new_proposal("").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidArgument(_)));
    }

    #[tokio::test]
    async fn unsigned_proposal_without_signer_fails_unsupported() {
        let contract = test_contract(test_gateway(None));
        let proposal = contract.new_proposal("transact").unwrap().build().unwrap();
        let err = proposal.evaluate().await.unwrap_err();
        assert!(matches!(err, GatewayError::Unsupported(_)));
    }

    #[tokio::test]
    async fn zero_endorse_timeout_yields_deadline_exceeded_immediately() {
        let identity = SigningIdentity::new("Org1MSP", b"cert".to_vec(), Arc::new(Sha256))
            .unwrap()
            .with_signer(Arc::new(NullSign));
        let mut timeouts = crate::gateway::Timeouts::default();
        timeouts.endorse = Some(std::time::Duration::ZERO);
        let gateway = Gateway::from_parts(Arc::new(identity), Arc::new(MockGatewayRpc::default()), timeouts);
        let contract = test_contract(gateway);
        let proposal = contract.new_proposal("transact").unwrap().build().unwrap();

        let err = proposal.endorse().await.unwrap_err();
        match err {
            GatewayError::Endorse { status, .. } => assert_eq!(status.code(), tonic::Code::DeadlineExceeded),
            other => panic!("expected Endorse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn endorse_error_carries_one_detail_per_failing_endorser() {
        use crate::pb::gateway::{ErrorDetail, ErrorDetails};

        let mut rpc = MockGatewayRpc::default();
        rpc.endorse = Some(Box::new(|_request| {
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
            Err(tonic::Status::with_details(tonic::Code::Aborted, "endorsement failed", payload.into()))
        }));

        let identity = SigningIdentity::new("Org1MSP", b"cert".to_vec(), Arc::new(Sha256))
            .unwrap()
            .with_signer(Arc::new(NullSign));
        let gateway = Gateway::from_parts(Arc::new(identity), Arc::new(rpc), crate::gateway::Timeouts::default());
        let contract = test_contract(gateway);
        let proposal = contract.new_proposal("transact").unwrap().build().unwrap();

        let err = proposal.endorse().await.unwrap_err();
        match err {
            GatewayError::Endorse { transaction_id, status, details } => {
                assert_eq!(transaction_id, proposal.transaction_id());
                assert_eq!(status.code(), tonic::Code::Aborted);
                assert_eq!(details.len(), 2);
                assert_eq!(details[0].address, "peer0");
                assert_eq!(details[1].address, "peer1");
            },
            other => panic!("expected Endorse error, got {:?}", other),
        }
    }

    fn endorsed_envelope(channel: &str, tx_id: &str) -> common::Envelope {
        let chaincode_action = peer::ChaincodeAction {
            response: Some(peer::Response {
                status: 200,
                message: String::new(),
                payload: vec![],
            }),
            ..Default::default()
        };
        let response_payload = peer::ProposalResponsePayload {
            proposal_hash: vec![],
            extension: chaincode_action.encode_to_vec(),
        };
        let action_payload = peer::ChaincodeActionPayload {
            chaincode_proposal_payload: vec![],
            action: Some(peer::ChaincodeEndorsedAction {
                proposal_response_payload: response_payload.encode_to_vec(),
                endorsements: vec![],
            }),
        };
        let transaction = peer::Transaction {
            actions: vec![peer::TransactionAction {
                header: vec![],
                payload: action_payload.encode_to_vec(),
            }],
        };
        let channel_header = common::ChannelHeader {
            channel_id: channel.to_string(),
            tx_id: tx_id.to_string(),
            ..Default::default()
        };
        let payload = common::Payload {
            header: Some(common::Header {
                channel_header: channel_header.encode_to_vec(),
                signature_header: vec![],
            }),
            data: transaction.encode_to_vec(),
        };
        common::Envelope {
            payload: payload.encode_to_vec(),
            signature: vec![],
        }
    }

    #[tokio::test]
    async fn evaluate_and_endorse_carry_the_configured_endorsing_orgs() {
        let seen_evaluate: Arc<std::sync::Mutex<Option<crate::pb::gateway::EvaluateRequest>>> = Arc::new(std::sync::Mutex::new(None));
        let seen_endorse: Arc<std::sync::Mutex<Option<crate::pb::gateway::EndorseRequest>>> = Arc::new(std::sync::Mutex::new(None));
        let seen_evaluate_for_closure = seen_evaluate.clone();
        let seen_endorse_for_closure = seen_endorse.clone();

        let mut rpc = MockGatewayRpc::default();
        rpc.evaluate = Some(Box::new(move |request| {
            *seen_evaluate_for_closure.lock().unwrap() = Some(request);
            Ok(crate::pb::gateway::EvaluateResponse { result: None })
        }));
        rpc.endorse = Some(Box::new(move |request| {
            *seen_endorse_for_closure.lock().unwrap() = Some(request);
            Ok(crate::pb::gateway::EndorseResponse {
                prepared_transaction: Some(endorsed_envelope("mychannel", "tx1")),
            })
        }));

        let identity = SigningIdentity::new("Org1MSP", b"cert".to_vec(), Arc::new(Sha256))
            .unwrap()
            .with_signer(Arc::new(NullSign));
        let gateway = Gateway::from_parts(Arc::new(identity), Arc::new(rpc), crate::gateway::Timeouts::default());
        let contract = test_contract(gateway);
        let target_organizations = vec!["Org1MSP".to_string(), "Org2MSP".to_string()];
        let proposal = contract
            .new_proposal("transact")
            .unwrap()
            .endorsing_organizations(target_organizations.clone())
            .build()
            .unwrap();

        proposal.evaluate().await.unwrap();
        assert_eq!(seen_evaluate.lock().unwrap().as_ref().unwrap().target_organizations, target_organizations);

        proposal.endorse().await.unwrap();
        assert_eq!(seen_endorse.lock().unwrap().as_ref().unwrap().endorsing_organizations, target_organizations);
    }

    #[tokio::test]
    async fn txid_and_digest_preserved_under_offline_sign() {
        let contract = test_contract(test_gateway(None));
        let proposal = contract.new_proposal("transact").unwrap().build().unwrap();
        let bytes = proposal.bytes().to_vec();
        let digest = proposal.digest();
        let txid = proposal.transaction_id().to_string();

        let rehydrated = Proposal::from_signed_bytes(proposal.gateway.clone(), bytes, vec![1, 2, 3], vec![]).unwrap();
        assert_eq!(rehydrated.transaction_id(), txid);
        assert_eq!(rehydrated.digest(), digest);
    }
}
