// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! ERC-20 token metadata service
//!
//! Resolves `(network, address)` to a token's name, symbol and decimals by
//! reading the contract over JSON-RPC, caching results for 24 hours.
//!
//! - [`network`]: which networks exist and where their RPC endpoints are
//! - [`rpc`]: concurrent `name()` / `symbol()` / `decimals()` reads
//! - [`cache`]: TTL cache with a symbol index and optional JSON snapshot
//! - [`TokenResolver`]: cache-first resolution tying the three together
//! - [`api`]: the HTTP surface over a [`TokenResolver`]

pub mod api;
pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod errors;
pub mod network;
pub mod rpc;
pub mod service;
mod spans;
pub mod transport;
pub mod types;

pub use api::{router, serve_api};
pub use cache::{CacheStats, MetadataCache};
pub use config::{rpc_url_variable, RegistryMode, TokenMetaConfig, TokenMetaConfigBuilder};
pub use errors::{
    CacheError, ConfigError, RegistryError, ResolveError, ResolveErrorKind, RpcError,
    CONTRACT_READ_PUBLIC_MESSAGE,
};
pub use network::{
    ChainListRegistry, ChainListSource, HttpChainListSource, NetworkConfig, NetworkRegistry,
    RegistryStatus, StaticRegistry,
};
pub use rpc::{AlloyContractCaller, ContractCaller, ContractReadClient, TokenMethod};
pub use service::TokenResolver;
pub use types::{address::TokenAddress, cache::TimestampMillis, metadata::TokenMetadata};
