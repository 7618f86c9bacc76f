// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! A chaincode-scoped (and, optionally, contract-scoped) view of a [`Network`] (spec
//! §2 façade, §4.1 transaction-name composition).

use crate::{error::GatewayError, network::Network, proposal::ProposalBuilder};

#[derive(Clone)]
pub struct Contract {
    network: Network,
    chaincode_name: String,
    contract_name: Option<String>,
}

impl Contract {
    pub(crate) fn new(network: Network, chaincode_name: String, contract_name: Option<String>) -> Self {
        Self {
            network,
            chaincode_name,
            contract_name,
        }
    }

    pub fn chaincode_name(&self) -> &str {
        &self.chaincode_name
    }

    pub fn contract_name(&self) -> Option<&str> {
        self.contract_name.as_deref()
    }

    pub(crate) fn network(&self) -> &Network {
        &self.network
    }

    /// `transaction_name` composes with `contract_name` per spec §4.1: the default
    /// contract's first argument is the bare name; a named contract prefixes it with
    /// `"<contract_name>:"`.
    pub fn new_proposal(&self, transaction_name: impl Into<String>) -> Result<ProposalBuilder, GatewayError> {
        let transaction_name = transaction_name.into();
        if transaction_name.is_empty() {
            return Err(GatewayError::InvalidArgument("transaction name".to_string()));
        }
        let qualified_name = match &self.contract_name {
            Some(contract_name) => format!("{}:{}", contract_name, transaction_name),
            None => transaction_name,
        };
        Ok(ProposalBuilder::new(self.clone(), qualified_name))
    }

    /// Convenience: propose, endorse, submit and wait for a terminal commit status in
    /// one call, failing with [`GatewayError::Commit`] if the transaction did not
    /// validate (spec §4.3: direct `Commit::status` never fails on an invalid commit,
    /// only this convenience does).
    pub async fn submit_transaction(&self, transaction_name: impl Into<String>, args: Vec<Vec<u8>>) -> Result<Vec<u8>, GatewayError> {
        let mut builder = self.new_proposal(transaction_name)?;
        for arg in args {
            builder = builder.add_argument(arg);
        }
        let proposal = builder.build()?;
        let transaction = proposal.endorse().await?;
        let result = transaction.result().to_vec();
        let commit = transaction.submit().await?;
        let status = commit.status().await?;
        if !status.successful {
            return Err(GatewayError::Commit {
                transaction_id: commit.transaction_id().to_string(),
                code: status.code,
            });
        }
        Ok(result)
    }
}
