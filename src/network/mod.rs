// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Network registry: network identifier -> RPC endpoint and chain id
//!
//! Two strategies sit behind the same [`NetworkRegistry`] trait, so the contract
//! read client never knows where its configs came from:
//!
//! - [`StaticRegistry`]: compiled-in table of eight well-known networks (default)
//! - [`ChainListRegistry`]: remote chain list with a refresh window and stale fallback
//!
//! # Examples
//!
//! ```rust,ignore
//! use tokenmeta::network::{NetworkRegistry, StaticRegistry};
//!
//! let registry = StaticRegistry::new();
//! let arbitrum = registry.resolve("arbitrum").await?;
//! assert_eq!(arbitrum.chain_id, 42161);
//! ```

use alloy_chains::NamedChain;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::RegistryError;

mod chain_list;
mod static_table;

pub use chain_list::{
    ChainListEntry, ChainListRegistry, ChainListSource, HttpChainListSource, RegistryStatus,
    RpcEntry,
};
pub use static_table::StaticRegistry;

/// Endpoint configuration of one network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Registry identifier (e.g. `"arbitrum"`)
    pub name: String,
    /// JSON-RPC endpoint URL
    pub rpc_url: String,
    /// EIP-155 chain id
    pub chain_id: u64,
    /// Slug from the remote chain list, when sourced dynamically
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_slug: Option<String>,
}

impl NetworkConfig {
    /// Creates a config without a chain slug
    pub fn new(name: impl Into<String>, rpc_url: impl Into<String>, chain_id: u64) -> Self {
        Self {
            name: name.into(),
            rpc_url: rpc_url.into(),
            chain_id,
            chain_slug: None,
        }
    }

    /// The chain as an alloy [`NamedChain`], if it is one alloy knows about
    pub fn named_chain(&self) -> Option<NamedChain> {
        NamedChain::try_from(self.chain_id).ok()
    }
}

/// Source of network configurations
///
/// # Thread Safety
///
/// Implementations are shared across concurrent requests and must use interior
/// mutability for any cached state.
#[async_trait]
pub trait NetworkRegistry: Send + Sync {
    /// Looks up one network
    ///
    /// Returns [`RegistryError::NotFound`] (carrying the supported ids) when the
    /// network is absent.
    async fn resolve(&self, network: &str) -> Result<NetworkConfig, RegistryError>;

    /// All supported network ids, in a stable order
    async fn list_supported(&self) -> Result<Vec<String>, RegistryError>;

    /// Whether `network` is supported
    ///
    /// Only registry outages are errors; an unknown network is `Ok(false)`.
    async fn supports(&self, network: &str) -> Result<bool, RegistryError> {
        match self.resolve(network).await {
            Ok(_) => Ok(true),
            Err(RegistryError::NotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Returns a human-readable name for this registry strategy
    ///
    /// Used for logging and debugging.
    fn name(&self) -> &'static str;
}
