// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Reads `name`, `symbol` and `decimals` from a token contract

use std::{sync::Arc, time::Duration};

use alloy_primitives::Bytes;
use chrono::Utc;
use tracing::{debug, info, warn, Instrument};

use super::abi::{decode_decimals, decode_string, TokenMethod};
use super::caller::ContractCaller;
use crate::config::constants::{known_tokens, DEFAULT_RPC_TIMEOUT};
use crate::errors::{ResolveError, RpcError};
use crate::network::{NetworkConfig, NetworkRegistry};
use crate::spans;
use crate::types::address::TokenAddress;
use crate::types::metadata::TokenMetadata;

/// Fetches token metadata over JSON-RPC
///
/// Holds no state of its own besides what the registry caches.
///
/// # Examples
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use tokenmeta::{AlloyContractCaller, ContractReadClient, StaticRegistry};
///
/// let client = ContractReadClient::new(
///     Arc::new(StaticRegistry::new()),
///     Arc::new(AlloyContractCaller::new()),
/// );
/// let usdc = client
///     .fetch_metadata("arbitrum", "0xaf88d065e77c8cc2239327c5edb3a432268e5831")
///     .await?;
/// assert_eq!(usdc.decimals, 6);
/// ```
#[derive(Clone)]
pub struct ContractReadClient {
    registry: Arc<dyn NetworkRegistry>,
    caller: Arc<dyn ContractCaller>,
    rpc_timeout: Duration,
}

impl ContractReadClient {
    pub fn new(registry: Arc<dyn NetworkRegistry>, caller: Arc<dyn ContractCaller>) -> Self {
        Self {
            registry,
            caller,
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
        }
    }

    /// Per-call deadline for each of the three reads
    pub fn with_timeout(mut self, rpc_timeout: Duration) -> Self {
        self.rpc_timeout = rpc_timeout;
        self
    }

    /// Resolves the network, validates the address, then reads the contract
    ///
    /// # Errors
    ///
    /// In order of checking:
    /// - [`ResolveError::UnsupportedNetwork`] / [`ResolveError::RegistryUnavailable`]
    /// - [`ResolveError::InvalidAddress`] (no call is issued)
    /// - [`ResolveError::ContractReadFailure`] if any of the three reads fails
    pub async fn fetch_metadata(
        &self,
        network: &str,
        address: &str,
    ) -> Result<TokenMetadata, ResolveError> {
        let config = self.registry.resolve(network).await?;
        let token = TokenAddress::parse(address)?;

        let span = spans::fetch_metadata(&config.name, config.chain_id, &token.normalized());
        self.read_token(&config, token).instrument(span).await
    }

    async fn read_token(
        &self,
        config: &NetworkConfig,
        token: TokenAddress,
    ) -> Result<TokenMetadata, ResolveError> {
        warn_if_foreign_token(config, token);

        let (name, symbol, decimals) = futures::join!(
            self.read(config, token, TokenMethod::Name),
            self.read(config, token, TokenMethod::Symbol),
            self.read(config, token, TokenMethod::Decimals),
        );

        let decoded = name
            .and_then(|raw| decode_string(TokenMethod::Name, &raw))
            .and_then(|name| {
                let symbol = symbol.and_then(|raw| decode_string(TokenMethod::Symbol, &raw))?;
                let decimals = decimals.and_then(|raw| decode_decimals(&raw))?;
                Ok((name, symbol, decimals))
            });

        let (name, symbol, decimals) = decoded.map_err(|source| {
            warn!(
                network = %config.name,
                address = %token,
                method = source.method(),
                error = %source,
                "Contract read failed"
            );
            ResolveError::contract_read_failure(&config.name, token.normalized(), source)
        })?;

        info!(
            network = %config.name,
            address = %token,
            symbol = %symbol,
            decimals,
            "Fetched token metadata"
        );

        Ok(TokenMetadata {
            address: token.normalized(),
            network: config.name.clone(),
            name,
            symbol,
            decimals,
            cached: false,
            timestamp: Utc::now(),
        })
    }

    async fn read(
        &self,
        config: &NetworkConfig,
        token: TokenAddress,
        method: TokenMethod,
    ) -> Result<Bytes, RpcError> {
        let call = self.caller.call(config, token.as_address(), method);

        let raw = tokio::time::timeout(self.rpc_timeout, call)
            .instrument(spans::read_contract(method))
            .await
            .map_err(|_| RpcError::Timeout {
                method: method.signature(),
                timeout: self.rpc_timeout,
            })??;

        debug!(method = %method, bytes = raw.len(), "Contract read returned");
        Ok(raw)
    }
}

fn warn_if_foreign_token(config: &NetworkConfig, token: TokenAddress) {
    let Some((home_chain, symbol)) = known_tokens::lookup(token.as_address()) else {
        return;
    };
    if config.named_chain() != Some(home_chain) {
        warn!(
            network = %config.name,
            address = %token,
            home_chain = %home_chain,
            symbol,
            "Address is a well-known token on a different network"
        );
    }
}
