// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache-first token resolution
//!
//! [`TokenResolver`] composes the cache, the registry and the contract read
//! client. It holds no state of its own; everything it knows lives in those
//! three collaborators.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokenmeta::{AlloyContractCaller, ContractReadClient, MetadataCache, StaticRegistry, TokenResolver};
//!
//! let registry = Arc::new(StaticRegistry::new());
//! let client = ContractReadClient::new(registry.clone(), Arc::new(AlloyContractCaller::new()));
//! let resolver = TokenResolver::new(Arc::new(MetadataCache::new()), registry, client);
//!
//! let first = resolver.resolve("arbitrum", "0xaf88d065e77c8cc2239327c5edb3a432268e5831").await?;
//! let second = resolver.resolve("arbitrum", "0xaf88d065e77c8cc2239327c5edb3a432268e5831").await?;
//! assert!(!first.cached && second.cached);
//! ```

use std::sync::Arc;

use tracing::{debug, Instrument};

use crate::cache::MetadataCache;
use crate::errors::{RegistryError, ResolveError};
use crate::network::NetworkRegistry;
use crate::rpc::ContractReadClient;
use crate::spans;
use crate::types::metadata::TokenMetadata;

#[derive(Clone)]
pub struct TokenResolver {
    cache: Arc<MetadataCache>,
    registry: Arc<dyn NetworkRegistry>,
    client: ContractReadClient,
}

impl TokenResolver {
    pub fn new(
        cache: Arc<MetadataCache>,
        registry: Arc<dyn NetworkRegistry>,
        client: ContractReadClient,
    ) -> Self {
        Self {
            cache,
            registry,
            client,
        }
    }

    pub fn cache(&self) -> &Arc<MetadataCache> {
        &self.cache
    }

    /// Returns metadata for `address` on `network`, from cache when possible
    ///
    /// A cache hit is the only path that returns `cached = true`. On a miss the
    /// network is checked before any contract call, the contract is read, and
    /// the result is cached.
    pub async fn resolve(
        &self,
        network: &str,
        address: &str,
    ) -> Result<TokenMetadata, ResolveError> {
        let span = spans::resolve_token(network, address);
        async move {
            if let Some(hit) = self.cache.get(network, address).await {
                tracing::Span::current().record("cached", true);
                return Ok(hit);
            }
            tracing::Span::current().record("cached", false);

            self.ensure_supported(network).await?;

            let metadata = self.client.fetch_metadata(network, address).await?;
            self.cache
                .put(network, &metadata.address, metadata.clone())
                .await;

            Ok(metadata)
        }
        .instrument(span)
        .await
    }

    /// Returns metadata from the symbol index
    ///
    /// Never reads a contract: symbols are only indexed as a side effect of
    /// [`resolve`](Self::resolve).
    pub async fn resolve_by_symbol(
        &self,
        network: &str,
        symbol: &str,
    ) -> Result<TokenMetadata, ResolveError> {
        let span = spans::resolve_by_symbol(network, symbol);
        async move {
            self.ensure_supported(network).await?;

            self.cache
                .get_by_symbol(network, symbol)
                .await
                .ok_or_else(|| {
                    debug!(network = %network, symbol = %symbol, "Symbol not indexed");
                    ResolveError::SymbolNotIndexed {
                        network: network.to_string(),
                        symbol: symbol.to_string(),
                    }
                })
        }
        .instrument(span)
        .await
    }

    pub async fn supported_networks(&self) -> Result<Vec<String>, ResolveError> {
        Ok(self.registry.list_supported().await?)
    }

    async fn ensure_supported(&self, network: &str) -> Result<(), ResolveError> {
        if self.registry.supports(network).await? {
            return Ok(());
        }
        Err(RegistryError::NotFound {
            network: network.to_string(),
            supported: self.registry.list_supported().await?,
        }
        .into())
    }
}
