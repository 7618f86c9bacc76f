// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! The error taxonomy (spec §4.6/§7): one enum per crate, each stage-specific variant
//! carrying enough structured data — transaction id, preserved gRPC status, decoded
//! per-endorser detail — that a caller can branch on it without parsing `Display`
//! output.

use thiserror::Error;

use crate::pb::gateway::ErrorDetail;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("failed to connect to gateway: {0}")]
    Connect(#[from] tonic::transport::Error),

    #[error("evaluation of transaction {transaction_id} failed: {status}")]
    Evaluate { transaction_id: String, status: tonic::Status },

    #[error("endorsement of transaction {transaction_id} failed: {status}")]
    Endorse {
        transaction_id: String,
        status: tonic::Status,
        details: Vec<ErrorDetail>,
    },

    #[error("submission of transaction {transaction_id} failed: {status}")]
    Submit { transaction_id: String, status: tonic::Status },

    #[error("commit status request for transaction {transaction_id} failed: {status}")]
    CommitStatus { transaction_id: String, status: tonic::Status },

    #[error("transaction {transaction_id} committed with status {code:?}")]
    Commit { transaction_id: String, code: i32 },

    #[error("event stream request failed: {0}")]
    EventStream(tonic::Status),

    #[error("failed to decode protobuf message: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl GatewayError {
    pub fn transaction_id(&self) -> Option<&str> {
        match self {
            GatewayError::Evaluate { transaction_id, .. }
            | GatewayError::Endorse { transaction_id, .. }
            | GatewayError::Submit { transaction_id, .. }
            | GatewayError::CommitStatus { transaction_id, .. }
            | GatewayError::Commit { transaction_id, .. } => Some(transaction_id),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<&tonic::Status> {
        match self {
            GatewayError::Evaluate { status, .. }
            | GatewayError::Endorse { status, .. }
            | GatewayError::Submit { status, .. }
            | GatewayError::CommitStatus { status, .. } => Some(status),
            GatewayError::EventStream(status) => Some(status),
            _ => None,
        }
    }
}
