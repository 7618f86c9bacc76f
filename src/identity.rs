// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! The identity bound to every request this crate sends: an MSP id and certificate,
//! plus the injected [`Hash`] and [`Sign`] capabilities that turn proposals,
//! transactions and commit-status requests into signed wire messages.

use std::sync::Arc;

use prost::Message;

use crate::{error::GatewayError, pb};

/// Computes a digest over arbitrary bytes. The default implementation is SHA-256,
/// matching the upstream Gateway's default; a Gateway may be configured with a
/// different hash to match the channel's configured hash function.
pub trait Hash: Send + Sync {
    fn digest(&self, data: &[u8]) -> Vec<u8>;
}

/// Signs a digest with the identity's private key. Implementations hold the key
/// outside this crate (hardware wallet, KMS, in-memory key, ...); this crate never
/// sees key material.
pub trait Sign: Send + Sync {
    fn sign(&self, digest: &[u8]) -> Result<Vec<u8>, GatewayError>;
}

/// SHA-256, the default hash algorithm for transaction id derivation and signing
/// digests.
#[derive(Default)]
pub struct Sha256;

impl Hash for Sha256 {
    fn digest(&self, data: &[u8]) -> Vec<u8> {
        use sha2::Digest;
        sha2::Sha256::digest(data).to_vec()
    }
}

/// Binds an MSP id and X.509 certificate (PEM-encoded) to the [`Sign`]/[`Hash`]
/// capabilities supplied at [`crate::gateway::Gateway::connect`] time. Produces the
/// `Creator` bytes embedded in every signed request this crate builds.
pub struct SigningIdentity {
    msp_id: String,
    certificate_pem: Vec<u8>,
    sign: Option<Arc<dyn Sign>>,
    hash: Arc<dyn Hash>,
    creator: Vec<u8>,
}

impl SigningIdentity {
    pub fn new(msp_id: impl Into<String>, certificate_pem: Vec<u8>, hash: Arc<dyn Hash>) -> Result<Self, GatewayError> {
        let msp_id = msp_id.into();
        if msp_id.is_empty() {
            return Err(GatewayError::InvalidArgument("unknown MSP id".to_string()));
        }
        let creator = pb::msp::SerializedIdentity {
            mspid: msp_id.clone(),
            id_bytes: certificate_pem.clone(),
        }
        .encode_to_vec();
        Ok(Self {
            msp_id,
            certificate_pem,
            sign: None,
            hash,
            creator,
        })
    }

    pub fn with_signer(mut self, sign: Arc<dyn Sign>) -> Self {
        self.sign = Some(sign);
        self
    }

    pub fn msp_id(&self) -> &str {
        &self.msp_id
    }

    pub fn certificate_pem(&self) -> &[u8] {
        &self.certificate_pem
    }

    /// The `SerializedIdentity` proto, marshalled once at construction time.
    pub fn creator(&self) -> &[u8] {
        &self.creator
    }

    pub fn hash(&self, data: &[u8]) -> Vec<u8> {
        self.hash.digest(data)
    }

    pub fn has_signer(&self) -> bool {
        self.sign.is_some()
    }

    /// Signs `digest` with the in-process signer, or fails with *Unsupported* if none
    /// was configured — the caller is expected to sign offline instead.
    pub fn sign(&self, digest: &[u8]) -> Result<Vec<u8>, GatewayError> {
        match &self.sign {
            Some(sign) => sign.sign(digest),
            None => Err(GatewayError::Unsupported("no signer".to_string())),
        }
    }
}
