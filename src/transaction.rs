// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! The endorsed-but-unsubmitted [`Transaction`] (spec §4.2): decodes the endorsement
//! result out of the nested `Envelope -> Payload -> peer.Transaction ->
//! ChaincodeActionPayload -> ProposalResponsePayload -> ChaincodeAction` chain once at
//! construction, then carries the `Payload` bytes through to signing and submission.

use once_cell::sync::OnceCell;
use prost::Message;

use crate::{
    commit::Commit,
    error::GatewayError,
    gateway::Gateway,
    pb::{common, gateway as pb_gateway, peer},
};

fn decode_result(payload_bytes: &[u8]) -> Result<Vec<u8>, GatewayError> {
    let payload = common::Payload::decode(payload_bytes)?;
    let transaction = peer::Transaction::decode(payload.data.as_slice())?;
    let action = transaction
        .actions
        .first()
        .ok_or_else(|| prost::DecodeError::new("endorsed transaction has no actions"))?;
    let action_payload = peer::ChaincodeActionPayload::decode(action.payload.as_slice())?;
    let endorsed_action = action_payload
        .action
        .ok_or_else(|| prost::DecodeError::new("chaincode action payload has no endorsed action"))?;
    let response_payload = peer::ProposalResponsePayload::decode(endorsed_action.proposal_response_payload.as_slice())?;
    let chaincode_action = peer::ChaincodeAction::decode(response_payload.extension.as_slice())?;
    Ok(chaincode_action.response.map(|r| r.payload).unwrap_or_default())
}

/// An endorsed proposal, ready to sign and submit to the ordering service. The
/// signable artifact is the `Envelope.Payload` bytes; `result()` is decoded once up
/// front so that reading it never requires a second round trip or a signature.
pub struct Transaction {
    gateway: Gateway,
    channel_name: String,
    transaction_id: String,
    payload_bytes: Vec<u8>,
    signature: OnceCell<Vec<u8>>,
    result: Vec<u8>,
}

impl Transaction {
    pub(crate) fn new(
        gateway: Gateway,
        channel_name: String,
        transaction_id: String,
        envelope: common::Envelope,
    ) -> Result<Self, GatewayError> {
        let result = decode_result(&envelope.payload)?;
        let signature = OnceCell::new();
        if !envelope.signature.is_empty() {
            let _ = signature.set(envelope.signature);
        }
        Ok(Self {
            gateway,
            channel_name,
            transaction_id,
            payload_bytes: envelope.payload,
            signature,
            result,
        })
    }

    pub(crate) fn from_signed_bytes(gateway: Gateway, payload_bytes: Vec<u8>, signature: Vec<u8>) -> Result<Self, GatewayError> {
        let decoded = common::Payload::decode(payload_bytes.as_slice())?;
        let header = decoded.header.ok_or_else(|| prost::DecodeError::new("transaction payload has no header"))?;
        let channel_header = common::ChannelHeader::decode(header.channel_header.as_slice())?;
        let result = decode_result(&payload_bytes)?;

        let signature_cell = OnceCell::new();
        if !signature.is_empty() {
            let _ = signature_cell.set(signature);
        }

        Ok(Self {
            gateway,
            channel_name: channel_header.channel_id,
            transaction_id: channel_header.tx_id,
            payload_bytes,
            signature: signature_cell,
            result,
        })
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub fn transaction_id(&self) -> &str {
        &self.transaction_id
    }

    /// The simulated chaincode response payload produced at endorsement time. Reading
    /// this never requires a signature — only `submit` does.
    pub fn result(&self) -> &[u8] {
        &self.result
    }

    /// The bytes that are signed: `Envelope.Payload`, a marshalled `common.Payload`.
    /// Exported for offline signing.
    pub fn bytes(&self) -> &[u8] {
        &self.payload_bytes
    }

    pub fn digest(&self) -> Vec<u8> {
        self.gateway.inner.identity.hash(&self.payload_bytes)
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

    /// Submits and immediately returns the endorsement result alongside the `Commit`
    /// handle, without polling it to a terminal status (spec §4.2 SubmitAsync) —
    /// equivalent to pairing [`Transaction::result`] with [`Transaction::submit`], for
    /// callers who want both in one call.
    pub async fn submit_async(&self) -> Result<(Vec<u8>, Commit), GatewayError> {
        let result = self.result.clone();
        let commit = self.submit().await?;
        Ok((result, commit))
    }

    /// Forwards the signed transaction envelope to the ordering service (spec §4.2
    /// Submit). Does not wait for a terminal status — see [`Commit::status`].
    pub async fn submit(&self) -> Result<Commit, GatewayError> {
        let signature = self.signature()?;
        let envelope = common::Envelope {
            payload: self.payload_bytes.clone(),
            signature,
        };
        let gateway = &self.gateway.inner;
        gateway
            .rpc
            .submit(
                pb_gateway::SubmitRequest {
                    transaction_id: self.transaction_id.clone(),
                    channel_id: self.channel_name.clone(),
                    prepared_transaction: Some(envelope),
                },
                gateway.timeouts.submit,
            )
            .await
            .map_err(|status| GatewayError::Submit {
                transaction_id: self.transaction_id.clone(),
                status,
            })?;

        Ok(Commit::new(self.gateway.clone(), self.channel_name.clone(), self.transaction_id.clone()))
    }
}
