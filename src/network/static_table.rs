// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Compiled-in network table

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, warn};

use super::{NetworkConfig, NetworkRegistry};
use crate::errors::RegistryError;

/// `(id, default public endpoint, chain id)` in listing order
const DEFAULT_NETWORKS: &[(&str, &str, u64)] = &[
    ("mainnet", "https://eth.llamarpc.com", 1),
    ("arbitrum", "https://arb1.arbitrum.io/rpc", 42161),
    ("polygon", "https://polygon-rpc.com", 137),
    ("optimism", "https://mainnet.optimism.io", 10),
    ("base", "https://mainnet.base.org", 8453),
    ("sepolia", "https://rpc.sepolia.org", 11155111),
    (
        "arbitrum-sepolia",
        "https://sepolia-rollup.arbitrum.io/rpc",
        421614,
    ),
    ("polygon-mumbai", "https://rpc-mumbai.maticvigil.com", 80001),
];

/// Fixed table of well-known networks
///
/// Zero I/O and deterministic. Endpoints default to public RPCs and can be
/// overridden per network (see [`crate::TokenMetaConfig::rpc_overrides`]).
///
/// # Examples
///
/// ```rust
/// use std::collections::HashMap;
/// use tokenmeta::network::StaticRegistry;
///
/// let overrides = HashMap::from([(
///     "base".to_string(),
///     "https://base.example.org".to_string(),
/// )]);
/// let registry = StaticRegistry::with_overrides(&overrides);
/// assert_eq!(registry.len(), 8);
/// ```
#[derive(Debug, Clone)]
pub struct StaticRegistry {
    networks: Vec<NetworkConfig>,
}

impl StaticRegistry {
    /// The eight well-known networks with their default endpoints
    pub fn new() -> Self {
        Self::with_overrides(&HashMap::new())
    }

    /// The eight well-known networks, replacing endpoints found in `overrides`
    ///
    /// Overrides for ids outside the table are ignored with a warning.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        for network in overrides.keys() {
            if !DEFAULT_NETWORKS.iter().any(|(id, _, _)| id == network) {
                warn!(network = %network, "Ignoring RPC override for unknown network");
            }
        }

        let networks = DEFAULT_NETWORKS
            .iter()
            .map(|(id, default_url, chain_id)| {
                let rpc_url = match overrides.get(*id) {
                    Some(url) => {
                        debug!(network = %id, "Using RPC override");
                        url.clone()
                    }
                    None => (*default_url).to_string(),
                };
                NetworkConfig::new(*id, rpc_url, *chain_id)
            })
            .collect();

        Self { networks }
    }

    /// Ids of the compiled-in networks, in listing order
    pub fn network_ids() -> Vec<&'static str> {
        DEFAULT_NETWORKS.iter().map(|(id, _, _)| *id).collect()
    }

    /// Number of networks in the table
    pub fn len(&self) -> usize {
        self.networks.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.networks.is_empty()
    }

    fn ids(&self) -> Vec<String> {
        self.networks.iter().map(|n| n.name.clone()).collect()
    }
}

impl Default for StaticRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NetworkRegistry for StaticRegistry {
    async fn resolve(&self, network: &str) -> Result<NetworkConfig, RegistryError> {
        self.networks
            .iter()
            .find(|n| n.name == network)
            .cloned()
            .ok_or_else(|| RegistryError::NotFound {
                network: network.to_string(),
                supported: self.ids(),
            })
    }

    async fn list_supported(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.ids())
    }

    fn name(&self) -> &'static str {
        "StaticRegistry"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_registry_lists_eight_networks_in_order() {
        let registry = StaticRegistry::new();
        let ids = registry.list_supported().await.unwrap();

        assert_eq!(
            ids,
            vec![
                "mainnet",
                "arbitrum",
                "polygon",
                "optimism",
                "base",
                "sepolia",
                "arbitrum-sepolia",
                "polygon-mumbai"
            ]
        );
    }

    #[tokio::test]
    async fn test_static_registry_resolve() {
        let registry = StaticRegistry::new();
        let arbitrum = registry.resolve("arbitrum").await.unwrap();

        assert_eq!(arbitrum.chain_id, 42161);
        assert!(arbitrum.rpc_url.starts_with("https://"));
        assert!(arbitrum.chain_slug.is_none());
    }

    #[tokio::test]
    async fn test_static_registry_not_found_carries_supported() {
        let registry = StaticRegistry::new();
        let error = registry.resolve("not-a-chain").await.unwrap_err();

        match error {
            RegistryError::NotFound { network, supported } => {
                assert_eq!(network, "not-a-chain");
                assert_eq!(supported.len(), 8);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!registry.supports("not-a-chain").await.unwrap());
        assert!(registry.supports("base").await.unwrap());
    }

    #[tokio::test]
    async fn test_static_registry_overrides() {
        let overrides = HashMap::from([
            ("base".to_string(), "https://base.example.org".to_string()),
            ("solana".to_string(), "https://ignored.example.org".to_string()),
        ]);
        let registry = StaticRegistry::with_overrides(&overrides);

        let base = registry.resolve("base").await.unwrap();
        assert_eq!(base.rpc_url, "https://base.example.org");
        assert!(registry.resolve("solana").await.is_err());
        assert_eq!(registry.len(), 8);
    }

    #[tokio::test]
    async fn test_static_registry_lookup_is_case_sensitive() {
        let registry = StaticRegistry::new();
        assert!(registry.resolve("Mainnet").await.is_err());
    }
}
