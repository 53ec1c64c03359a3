// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Provider pooling keyed by RPC endpoint
//!
//! The registry hands out endpoint URLs per request, so providers are created
//! lazily on first use of a URL and reused afterwards. Keying by URL (not by
//! network name) means a registry refresh that moves a network to a new
//! endpoint naturally gets a new provider.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use alloy_network::Ethereum;
use alloy_provider::{ProviderBuilder, RootProvider};
use alloy_rpc_client::ClientBuilder;
use tracing::info;

use crate::network::NetworkConfig;
use crate::transport::LoggingLayer;

/// Provider type used for all contract reads
pub type PooledProvider = Arc<RootProvider<Ethereum>>;

/// A thread-safe pool of providers indexed by endpoint URL
///
/// Multiple readers can fetch providers simultaneously; the write lock is only
/// taken when a new endpoint is seen.
#[derive(Debug, Default)]
pub struct ProviderPool {
    providers: RwLock<HashMap<String, PooledProvider>>,
    log_payloads: bool,
}

impl ProviderPool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool whose providers log full JSON-RPC packets at trace level
    #[must_use]
    pub fn with_payload_logging() -> Self {
        Self {
            providers: RwLock::new(HashMap::new()),
            log_payloads: true,
        }
    }

    /// Get the provider for a network's endpoint, creating it if needed
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL does not parse
    pub fn get_or_add(&self, network: &NetworkConfig) -> Result<PooledProvider, url::ParseError> {
        if let Some(provider) = self.get(&network.rpc_url) {
            return Ok(provider);
        }

        let provider = Arc::new(self.create_provider(network)?);

        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let provider = providers
            .entry(network.rpc_url.clone())
            .or_insert_with(|| {
                info!(network = %network.name, "Added provider to pool");
                provider
            })
            .clone();

        Ok(provider)
    }

    /// Get the provider for an endpoint URL, if one has been created
    #[must_use]
    pub fn get(&self, rpc_url: &str) -> Option<PooledProvider> {
        self.providers
            .read()
            .ok()
            .and_then(|providers| providers.get(rpc_url).cloned())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.providers
            .read()
            .map(|providers| providers.len())
            .unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn create_provider(
        &self,
        network: &NetworkConfig,
    ) -> Result<RootProvider<Ethereum>, url::ParseError> {
        let url: url::Url = network.rpc_url.parse()?;

        let mut logging = LoggingLayer::for_network(network.name.as_str());
        if self.log_payloads {
            logging = logging.with_payload_logging();
        }

        let client = ClientBuilder::default().layer(logging).http(url);

        // No fillers: we only issue eth_call, which needs no nonce or gas
        Ok(ProviderBuilder::new()
            .disable_recommended_fillers()
            .connect_client(client))
    }
}
