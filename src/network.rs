// Copyright 2024 The Tari Development Community
// SPDX-License-Identifier: BSD-3-Clause

//! A channel-scoped view of a [`Gateway`] (spec §2 façade). Holds a non-owning,
//! cheaply-cloned reference to the Gateway plus the channel name every request built
//! through it carries.

use crate::{
    contract::Contract,
    error::GatewayError,
    events::{BlockEventStream, ChaincodeEventStream, EventStreamOptions},
    gateway::Gateway,
    grpc::BlockEventsKind,
};

#[derive(Clone)]
pub struct Network {
    gateway: Gateway,
    channel_name: String,
}

impl Network {
    pub(crate) fn new(gateway: Gateway, channel_name: String) -> Self {
        Self { gateway, channel_name }
    }

    pub fn channel_name(&self) -> &str {
        &self.channel_name
    }

    pub(crate) fn gateway(&self) -> &Gateway {
        &self.gateway
    }

    /// `contract_name = None` addresses the channel's default contract; the first
    /// argument of any proposal built through it is the bare transaction name.
    pub fn contract(&self, chaincode_name: impl Into<String>, contract_name: Option<String>) -> Contract {
        Contract::new(self.clone(), chaincode_name.into(), contract_name)
    }

    pub async fn chaincode_events(
        &self,
        chaincode_name: impl Into<String>,
        options: EventStreamOptions,
    ) -> Result<ChaincodeEventStream, GatewayError> {
        ChaincodeEventStream::open(self.clone(), chaincode_name.into(), options).await
    }

    pub async fn block_events(&self, options: EventStreamOptions) -> Result<BlockEventStream, GatewayError> {
        BlockEventStream::open(self.clone(), BlockEventsKind::Full, options).await
    }

    pub async fn filtered_block_events(&self, options: EventStreamOptions) -> Result<BlockEventStream, GatewayError> {
        BlockEventStream::open(self.clone(), BlockEventsKind::Filtered, options).await
    }

    pub async fn block_and_private_data_events(&self, options: EventStreamOptions) -> Result<BlockEventStream, GatewayError> {
        BlockEventStream::open(self.clone(), BlockEventsKind::WithPrivateData, options).await
    }
}
