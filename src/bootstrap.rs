// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::{
    cache::MetadataCache,
    config::{RegistryMode, TokenMetaConfig},
    network::{ChainListRegistry, HttpChainListSource, NetworkRegistry, StaticRegistry},
    rpc::{AlloyContractCaller, ContractReadClient, ProviderPool},
    serve_api,
    service::TokenResolver,
};

/// Main entry point for the application.
pub async fn run() -> anyhow::Result<()> {
    let config = TokenMetaConfig::from_env()?;

    let listener = TcpListener::bind(&format!("0.0.0.0:{}", config.listen_port)).await?;

    let resolver = build_resolver(&config).await;

    serve_api(listener, resolver).await?;

    Ok(())
}

/// Wires registry, caller, cache and client from `config`.
pub async fn build_resolver(config: &TokenMetaConfig) -> TokenResolver {
    let registry = build_registry(config);
    info!(registry = registry.name(), "Network registry ready");

    let cache = match &config.snapshot_path {
        Some(path) => MetadataCache::with_snapshot(path.clone()).await,
        None => MetadataCache::new(),
    };

    let pool = if config.log_rpc_payloads {
        ProviderPool::with_payload_logging()
    } else {
        ProviderPool::new()
    };
    let caller = Arc::new(AlloyContractCaller::with_pool(pool));

    let client = ContractReadClient::new(registry.clone(), caller).with_timeout(config.rpc_timeout);

    TokenResolver::new(Arc::new(cache), registry, client)
}

fn build_registry(config: &TokenMetaConfig) -> Arc<dyn NetworkRegistry> {
    match &config.registry {
        RegistryMode::Static => Arc::new(StaticRegistry::with_overrides(&config.rpc_overrides)),
        RegistryMode::Dynamic {
            source_url,
            refresh_window,
        } => Arc::new(ChainListRegistry::new(
            HttpChainListSource::new(source_url.as_str()),
            *refresh_window,
        )),
    }
}
