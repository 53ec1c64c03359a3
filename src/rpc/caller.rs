// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! `eth_call` transport seam
//!
//! [`ContractCaller`] is the single point where the crate touches the network
//! for contract reads. Production code uses [`AlloyContractCaller`]; tests
//! substitute a mock that counts calls and scripts responses.

use alloy_network::TransactionBuilder;
use alloy_primitives::{Address, Bytes};
use alloy_provider::Provider;
use alloy_rpc_types::TransactionRequest;
use async_trait::async_trait;

use super::abi::TokenMethod;
use super::pool::ProviderPool;
use crate::errors::RpcError;
use crate::network::NetworkConfig;

/// Issues one read-only contract call at the latest block
#[async_trait]
pub trait ContractCaller: Send + Sync {
    /// Calls `method` on the contract at `to`, returning the raw result bytes
    ///
    /// An empty result is returned as-is; interpreting it is the caller's job.
    async fn call(
        &self,
        network: &NetworkConfig,
        to: Address,
        method: TokenMethod,
    ) -> Result<Bytes, RpcError>;
}

/// [`ContractCaller`] backed by alloy HTTP providers
#[derive(Debug, Default)]
pub struct AlloyContractCaller {
    pool: ProviderPool,
}

impl AlloyContractCaller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(pool: ProviderPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ContractCaller for AlloyContractCaller {
    async fn call(
        &self,
        network: &NetworkConfig,
        to: Address,
        method: TokenMethod,
    ) -> Result<Bytes, RpcError> {
        let provider = self
            .pool
            .get_or_add(network)
            .map_err(|e| RpcError::call_failed(method.signature(), e))?;

        let tx = TransactionRequest::default()
            .with_to(to)
            .with_input(method.calldata());

        provider
            .call(tx)
            .await
            .map_err(|e| RpcError::call_failed(method.signature(), e))
    }
}
