// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for tokenmeta
//!
//! Controls the RPC deadline, where network configs come from, per-network
//! endpoint overrides, and optional cache snapshotting.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use tokenmeta::TokenMetaConfig;
//!
//! // Static registry, 10s per-call timeout, no snapshot
//! let config = TokenMetaConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use tokenmeta::TokenMetaConfigBuilder;
//! use std::time::Duration;
//!
//! let config = TokenMetaConfigBuilder::new()
//!     .rpc_timeout(Duration::from_secs(5))
//!     .rpc_url("arbitrum", "https://arb1.arbitrum.io/rpc")
//!     .snapshot_path("cache.json")
//!     .build();
//! ```

use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::ConfigError;

pub mod constants;

use constants::{
    DEFAULT_CHAIN_LIST_URL, DEFAULT_LISTEN_PORT, DEFAULT_REGISTRY_REFRESH, DEFAULT_RPC_TIMEOUT,
};

/// Where network configs are sourced from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryMode {
    /// Compiled-in table of well-known networks
    Static,
    /// Remote chain list, refreshed periodically with stale fallback
    Dynamic {
        /// Chain list JSON URL
        source_url: String,
        /// How long a fetched list is considered fresh
        refresh_window: Duration,
    },
}

/// Configuration for tokenmeta
///
/// Use [`TokenMetaConfigBuilder`] for a fluent API to construct instances, or
/// [`TokenMetaConfig::from_env`] to read it from the process environment.
#[derive(Debug, Clone)]
pub struct TokenMetaConfig {
    /// Deadline for each `eth_call`
    /// Default: 10 seconds
    pub rpc_timeout: Duration,

    /// Cache snapshot file
    /// Default: None (in-memory only)
    pub snapshot_path: Option<PathBuf>,

    /// Network registry strategy
    /// Default: [`RegistryMode::Static`]
    pub registry: RegistryMode,

    /// RPC URL overrides keyed by network id (static registry only)
    pub rpc_overrides: HashMap<String, String>,

    /// HTTP port for the API server
    /// Default: 3000
    pub listen_port: u16,

    /// Log full JSON-RPC request and response bodies at trace level
    /// Default: false
    pub log_rpc_payloads: bool,
}

impl Default for TokenMetaConfig {
    fn default() -> Self {
        Self {
            rpc_timeout: DEFAULT_RPC_TIMEOUT,
            snapshot_path: None,
            registry: RegistryMode::Static,
            rpc_overrides: HashMap::new(),
            listen_port: DEFAULT_LISTEN_PORT,
            log_rpc_payloads: false,
        }
    }
}

impl TokenMetaConfig {
    /// Reads configuration from the process environment (and `.env`, if present)
    ///
    /// | Variable | Meaning |
    /// |---|---|
    /// | `API_PORT` / `PORT` | listen port |
    /// | `RPC_TIMEOUT_SECS` | per-call deadline |
    /// | `CACHE_FILE` | snapshot path |
    /// | `NETWORK_REGISTRY` | `static` or `dynamic` |
    /// | `CHAIN_LIST_URL` | dynamic registry source |
    /// | `REGISTRY_REFRESH_SECS` | dynamic registry refresh window |
    /// | `RPC_URL_<NETWORK>` | endpoint override, e.g. `RPC_URL_ARBITRUM_SEPOLIA` |
    /// | `RPC_LOG_PAYLOADS` | `true` to trace full JSON-RPC packets |
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to something
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let network_ids = crate::network::StaticRegistry::network_ids();
        Self::from_lookup(&network_ids, |key| dotenvy::var(key).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup
    ///
    /// `network_ids` lists the networks whose `RPC_URL_<NETWORK>` overrides are read.
    pub fn from_lookup<F>(network_ids: &[&str], lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = TokenMetaConfigBuilder::new();

        let port = lookup("API_PORT")
            .map(|value| ("API_PORT", value))
            .or_else(|| lookup("PORT").map(|value| ("PORT", value)));
        if let Some((variable, value)) = port {
            builder = builder.listen_port(parse_var(variable, &value)?);
        }

        if let Some(secs) = lookup("RPC_TIMEOUT_SECS") {
            builder = builder.rpc_timeout(Duration::from_secs(parse_var(
                "RPC_TIMEOUT_SECS",
                &secs,
            )?));
        }

        if let Some(flag) = lookup("RPC_LOG_PAYLOADS") {
            builder = builder.log_rpc_payloads(parse_var("RPC_LOG_PAYLOADS", &flag)?);
        }

        if let Some(path) = lookup("CACHE_FILE").filter(|p| !p.is_empty()) {
            builder = builder.snapshot_path(path);
        }

        match lookup("NETWORK_REGISTRY").as_deref() {
            None | Some("static") => {}
            Some("dynamic") => {
                let source_url =
                    lookup("CHAIN_LIST_URL").unwrap_or_else(|| DEFAULT_CHAIN_LIST_URL.to_string());
                let refresh_window = match lookup("REGISTRY_REFRESH_SECS") {
                    Some(secs) => Duration::from_secs(parse_var("REGISTRY_REFRESH_SECS", &secs)?),
                    None => DEFAULT_REGISTRY_REFRESH,
                };
                builder = builder.dynamic_registry(source_url, refresh_window);
            }
            Some(other) => {
                return Err(ConfigError::invalid_value(
                    "NETWORK_REGISTRY",
                    other,
                    "expected \"static\" or \"dynamic\"",
                ))
            }
        }

        for network in network_ids {
            if let Some(url) = lookup(&rpc_url_variable(network)) {
                builder = builder.rpc_url(*network, url);
            }
        }

        Ok(builder.build())
    }
}

/// Name of the environment variable overriding a network's RPC URL
///
/// ```rust
/// assert_eq!(tokenmeta::rpc_url_variable("arbitrum-sepolia"), "RPC_URL_ARBITRUM_SEPOLIA");
/// ```
pub fn rpc_url_variable(network: &str) -> String {
    format!("RPC_URL_{}", network.to_ascii_uppercase().replace('-', "_"))
}

fn parse_var<T>(variable: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| ConfigError::invalid_value(variable, value, e.to_string()))
}

/// Builder for [`TokenMetaConfig`]
///
/// # Example
///
/// ```rust
/// use tokenmeta::{RegistryMode, TokenMetaConfigBuilder};
/// use std::time::Duration;
///
/// let config = TokenMetaConfigBuilder::new()
///     .dynamic_registry("https://chainid.network/chains.json", Duration::from_secs(300))
///     .build();
/// assert!(matches!(config.registry, RegistryMode::Dynamic { .. }));
/// ```
#[derive(Debug, Default)]
pub struct TokenMetaConfigBuilder {
    config: TokenMetaConfig,
}

impl TokenMetaConfigBuilder {
    /// Create a new builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-call RPC timeout
    pub fn rpc_timeout(mut self, timeout: Duration) -> Self {
        self.config.rpc_timeout = timeout;
        self
    }

    /// Persist the cache to this file
    pub fn snapshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.snapshot_path = Some(path.into());
        self
    }

    /// Use the dynamic chain-list registry
    pub fn dynamic_registry(
        mut self,
        source_url: impl Into<String>,
        refresh_window: Duration,
    ) -> Self {
        self.config.registry = RegistryMode::Dynamic {
            source_url: source_url.into(),
            refresh_window,
        };
        self
    }

    /// Override the RPC URL of one network
    pub fn rpc_url(mut self, network: impl Into<String>, url: impl Into<String>) -> Self {
        self.config.rpc_overrides.insert(network.into(), url.into());
        self
    }

    /// Set the API listen port
    pub fn listen_port(mut self, port: u16) -> Self {
        self.config.listen_port = port;
        self
    }

    /// Trace full JSON-RPC packets
    pub fn log_rpc_payloads(mut self, enabled: bool) -> Self {
        self.config.log_rpc_payloads = enabled;
        self
    }

    /// Build the final configuration
    pub fn build(self) -> TokenMetaConfig {
        self.config
    }
}
