// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end tests for cache-first token resolution
//!
//! The resolver runs against the static registry and a mock contract caller,
//! so every test can assert exactly how many `eth_call`s were issued.

mod helpers;

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::address;
use helpers::{
    encode_bytes32, encode_uint, resolver_with, static_resolver, MockChainListSource,
    MockContractCaller, ARBITRUM_USDC, ARBITRUM_USDC_CHECKSUMMED,
};
use tokenmeta::{
    ChainListRegistry, ContractReadClient, MetadataCache, RegistryError, ResolveError,
    ResolveErrorKind, RpcError, StaticRegistry, TokenMethod, TokenResolver,
};

#[tokio::test]
async fn test_arbitrum_usdc_resolves_to_expected_record() {
    let caller = Arc::new(MockContractCaller::usdc());
    let resolver = static_resolver(caller.clone());

    let token = resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap();

    assert_eq!(token.address, ARBITRUM_USDC);
    assert_eq!(token.network, "arbitrum");
    assert_eq!(token.name, "USD Coin");
    assert_eq!(token.symbol, "USDC");
    assert_eq!(token.decimals, 6);
    assert!(!token.cached);
    assert_eq!(caller.call_count(), 3);

    let contract = address!("af88d065e77c8cc2239327c5edb3a432268e5831");
    assert!(caller
        .seen()
        .iter()
        .all(|(network, to, _)| network == "arbitrum" && *to == contract));
}

#[tokio::test]
async fn test_second_resolve_is_served_from_cache() {
    let caller = Arc::new(MockContractCaller::usdc());
    let resolver = static_resolver(caller.clone());

    let first = resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap();
    let second = resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap();

    assert!(!first.cached);
    assert!(second.cached);
    assert_eq!(second.address, first.address);
    assert_eq!(second.network, first.network);
    assert_eq!(second.name, first.name);
    assert_eq!(second.symbol, first.symbol);
    assert_eq!(second.decimals, first.decimals);
    assert_eq!(caller.call_count(), 3, "cache hit must not touch the network");
}

#[tokio::test]
async fn test_address_case_does_not_matter_for_cache_hits() {
    let caller = Arc::new(MockContractCaller::usdc());
    let resolver = static_resolver(caller.clone());

    let first = resolver
        .resolve("arbitrum", ARBITRUM_USDC_CHECKSUMMED)
        .await
        .unwrap();
    let second = resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap();

    assert_eq!(first.address, ARBITRUM_USDC, "addresses are normalized");
    assert!(second.cached);
    assert_eq!(caller.call_count(), 3);
}

#[tokio::test]
async fn test_unsupported_network_fails_before_any_call() {
    let caller = Arc::new(MockContractCaller::usdc());
    let resolver = static_resolver(caller.clone());

    let error = resolver
        .resolve("not-a-chain", ARBITRUM_USDC)
        .await
        .unwrap_err();

    match &error {
        ResolveError::UnsupportedNetwork { network, supported } => {
            assert_eq!(network, "not-a-chain");
            assert_eq!(supported.len(), 8);
            assert!(supported.contains(&"arbitrum".to_string()));
        }
        other => panic!("expected UnsupportedNetwork, got {other:?}"),
    }
    assert_eq!(error.status_code(), 400);
    assert_eq!(caller.call_count(), 0);
}

#[tokio::test]
async fn test_invalid_address_fails_before_any_call() {
    let caller = Arc::new(MockContractCaller::usdc());
    let resolver = static_resolver(caller.clone());

    for bad in [
        "0x123",
        "af88d065e77c8cc2239327c5edb3a432268e5831",
        "0xzz88d065e77c8cc2239327c5edb3a432268e5831",
        "0xaf88d065e77c8cc2239327c5edb3a432268e583100",
    ] {
        let error = resolver.resolve("arbitrum", bad).await.unwrap_err();
        assert_eq!(error.kind(), ResolveErrorKind::InvalidAddress, "{bad}");
    }
    assert_eq!(caller.call_count(), 0);
}

#[tokio::test]
async fn test_no_code_address_is_a_contract_read_failure() {
    let caller = Arc::new(MockContractCaller::no_code());
    let resolver = static_resolver(caller.clone());

    let error = resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap_err();

    match &error {
        ResolveError::ContractReadFailure {
            network,
            address,
            source,
        } => {
            assert_eq!(network, "arbitrum");
            assert_eq!(address, ARBITRUM_USDC);
            assert!(matches!(source, RpcError::EmptyResponse { .. }));
        }
        other => panic!("expected ContractReadFailure, got {other:?}"),
    }
    assert_eq!(error.public_message(), "Token not found or invalid contract");
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let caller = Arc::new(
        MockContractCaller::usdc().with_failure(TokenMethod::Symbol, "execution reverted"),
    );
    let resolver = static_resolver(caller.clone());

    assert!(resolver.resolve("arbitrum", ARBITRUM_USDC).await.is_err());
    assert!(resolver.resolve("arbitrum", ARBITRUM_USDC).await.is_err());

    assert_eq!(caller.call_count(), 6, "each attempt reads all three methods");
    assert_eq!(resolver.cache().stats().await.entries, 0);
}

#[tokio::test]
async fn test_one_failing_read_fails_the_whole_fetch() {
    let caller = Arc::new(
        MockContractCaller::usdc().with_failure(TokenMethod::Decimals, "connection reset"),
    );
    let resolver = static_resolver(caller.clone());

    let error = resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap_err();

    let ResolveError::ContractReadFailure { source, .. } = error else {
        panic!("expected ContractReadFailure");
    };
    assert_eq!(source.method(), "decimals()");
    assert_eq!(caller.call_count(), 3, "all three reads are joined");
}

#[tokio::test(start_paused = true)]
async fn test_slow_read_times_out() {
    let caller = Arc::new(
        MockContractCaller::usdc().with_delay(TokenMethod::Name, Duration::from_secs(60)),
    );
    let registry = Arc::new(StaticRegistry::new());
    let client = ContractReadClient::new(registry.clone(), caller.clone())
        .with_timeout(Duration::from_secs(10));
    let resolver = TokenResolver::new(Arc::new(MetadataCache::new()), registry, client);

    let error = resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap_err();

    let ResolveError::ContractReadFailure { source, .. } = error else {
        panic!("expected ContractReadFailure");
    };
    match source {
        RpcError::Timeout { method, timeout } => {
            assert_eq!(method, "name()");
            assert_eq!(timeout, Duration::from_secs(10));
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_decimals_above_255_are_rejected() {
    let caller = Arc::new(
        MockContractCaller::usdc().with_reply(TokenMethod::Decimals, encode_uint(256)),
    );
    let resolver = static_resolver(caller);

    let error = resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap_err();

    let ResolveError::ContractReadFailure { source, .. } = error else {
        panic!("expected ContractReadFailure");
    };
    assert!(matches!(source, RpcError::Decode { method: "decimals()", .. }));
}

#[tokio::test]
async fn test_bytes32_metadata_is_decoded() {
    let caller = Arc::new(
        MockContractCaller::erc20("", "", 18)
            .with_reply(TokenMethod::Name, encode_bytes32("Maker"))
            .with_reply(TokenMethod::Symbol, encode_bytes32("MKR")),
    );
    let resolver = static_resolver(caller);

    let token = resolver
        .resolve("mainnet", "0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2")
        .await
        .unwrap();

    assert_eq!(token.name, "Maker");
    assert_eq!(token.symbol, "MKR");
    assert_eq!(token.decimals, 18);
}

#[tokio::test]
async fn test_clear_forces_refetch() {
    let caller = Arc::new(MockContractCaller::usdc());
    let resolver = static_resolver(caller.clone());

    resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap();
    resolver.cache().clear().await;
    let token = resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap();

    assert!(!token.cached);
    assert_eq!(caller.call_count(), 6);
}

#[tokio::test]
async fn test_symbol_lookup_only_finds_resolved_tokens() {
    let caller = Arc::new(MockContractCaller::usdc());
    let resolver = static_resolver(caller.clone());

    let miss = resolver
        .resolve_by_symbol("arbitrum", "USDC")
        .await
        .unwrap_err();
    assert_eq!(miss.kind(), ResolveErrorKind::SymbolNotIndexed);
    assert_eq!(miss.status_code(), 404);
    assert_eq!(caller.call_count(), 0, "symbol lookups never read contracts");

    resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap();

    let hit = resolver.resolve_by_symbol("arbitrum", "usdc").await.unwrap();
    assert!(hit.cached);
    assert_eq!(hit.address, ARBITRUM_USDC);

    let other_network = resolver.resolve_by_symbol("base", "USDC").await.unwrap_err();
    assert_eq!(other_network.kind(), ResolveErrorKind::SymbolNotIndexed);
}

#[tokio::test]
async fn test_symbol_lookup_accepts_the_symbol_as_returned() {
    let caller = Arc::new(MockContractCaller::erc20("USD Coin", " USDC ", 6));
    let resolver = static_resolver(caller);

    let token = resolver.resolve("arbitrum", ARBITRUM_USDC).await.unwrap();
    assert_eq!(token.symbol, " USDC ");

    let by_returned = resolver
        .resolve_by_symbol("arbitrum", &token.symbol)
        .await
        .unwrap();
    assert_eq!(by_returned.address, ARBITRUM_USDC);

    let by_trimmed = resolver.resolve_by_symbol("arbitrum", "usdc").await.unwrap();
    assert_eq!(by_trimmed.address, ARBITRUM_USDC);
}

#[tokio::test]
async fn test_symbol_lookup_checks_network_first() {
    let resolver = static_resolver(Arc::new(MockContractCaller::usdc()));

    let error = resolver
        .resolve_by_symbol("not-a-chain", "USDC")
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ResolveErrorKind::UnsupportedNetwork);
}

#[tokio::test]
async fn test_unreachable_registry_is_registry_unavailable() {
    let caller = Arc::new(MockContractCaller::usdc());
    let registry = Arc::new(ChainListRegistry::with_default_window(
        MockChainListSource::failing(),
    ));
    let resolver = resolver_with(registry, caller.clone(), MetadataCache::new());

    let error = resolver.resolve("ethereum", ARBITRUM_USDC).await.unwrap_err();

    match &error {
        ResolveError::RegistryUnavailable(RegistryError::Unavailable { .. }) => {}
        other => panic!("expected RegistryUnavailable, got {other:?}"),
    }
    assert_eq!(error.status_code(), 500);
    assert_eq!(caller.call_count(), 0);
}

#[tokio::test]
async fn test_supported_networks_passes_registry_order_through() {
    let resolver = static_resolver(Arc::new(MockContractCaller::usdc()));

    let networks = resolver.supported_networks().await.unwrap();

    assert_eq!(networks.first().map(String::as_str), Some("mainnet"));
    assert_eq!(networks.last().map(String::as_str), Some("polygon-mumbai"));
}

#[tokio::test]
async fn test_concurrent_resolves_agree() {
    let caller = Arc::new(MockContractCaller::usdc());
    let resolver = static_resolver(caller.clone());

    let (a, b) = tokio::join!(
        resolver.resolve("arbitrum", ARBITRUM_USDC),
        resolver.resolve("arbitrum", ARBITRUM_USDC),
    );

    let (a, b) = (a.unwrap(), b.unwrap());
    assert_eq!(a.symbol, b.symbol);
    assert!(caller.call_count() >= 3);
    assert_eq!(resolver.cache().stats().await.entries, 2);
}
