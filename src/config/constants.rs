// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known addresses and constants
//!
//! This module centralizes magic constants and well-known token addresses used
//! throughout the tokenmeta crate.

use std::time::Duration;

use alloy_chains::NamedChain;
use alloy_primitives::{address, Address};

/// How long a cached metadata record stays valid. Fixed; not configurable.
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default deadline for each individual `eth_call`.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(10);

/// Default refresh window of the dynamic network registry.
pub const DEFAULT_REGISTRY_REFRESH: Duration = Duration::from_secs(5 * 60);

/// Default source of the dynamic network registry.
pub const DEFAULT_CHAIN_LIST_URL: &str = "https://chainid.network/chains.json";

/// Default HTTP port for the API server.
pub const DEFAULT_LISTEN_PORT: u16 = 3000;

/// Well-known token deployments
///
/// Used for the advisory cross-network check: querying one of these addresses on
/// a network other than its home chain logs a warning but still proceeds.
pub mod known_tokens {
    use super::*;

    /// Native USDC on Ethereum Mainnet
    ///
    /// Contract: 0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48
    pub const ETH_USDC: Address = address!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48");

    /// USDT on Ethereum Mainnet
    ///
    /// Contract: 0xdAC17F958D2ee523a2206206994597C13D831ec7
    pub const ETH_USDT: Address = address!("dac17f958d2ee523a2206206994597c13d831ec7");

    /// Native USDC on Arbitrum One
    ///
    /// Contract: 0xaf88d065e77c8cC2239327C5EDb3A432268e5831
    pub const ARBITRUM_USDC: Address = address!("af88d065e77c8cc2239327c5edb3a432268e5831");

    /// Native USDC on Base
    ///
    /// Contract: 0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913
    pub const BASE_USDC: Address = address!("833589fcd6edb6e08f4c7c32d4f71b54bda02913");

    /// Native USDC on OP Mainnet
    ///
    /// Contract: 0x0b2C639c533813f4Aa9D7837CAf62653d097Ff85
    pub const OPTIMISM_USDC: Address = address!("0b2c639c533813f4aa9d7837caf62653d097ff85");

    /// Native USDC on Polygon PoS
    ///
    /// Contract: 0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359
    pub const POLYGON_USDC: Address = address!("3c499c542cef5e3811e1192ce70d8cc03d5c3359");

    /// Circle's test USDC on Sepolia
    ///
    /// Contract: 0x1c7D4B196Cb0C7B01d743Fbc6116a902379C7238
    pub const SEPOLIA_USDC: Address = address!("1c7d4b196cb0c7b01d743fbc6116a902379c7238");

    /// `(address, home chain, symbol)` for every known deployment
    pub const ALL: &[(Address, NamedChain, &str)] = &[
        (ETH_USDC, NamedChain::Mainnet, "USDC"),
        (ETH_USDT, NamedChain::Mainnet, "USDT"),
        (ARBITRUM_USDC, NamedChain::Arbitrum, "USDC"),
        (BASE_USDC, NamedChain::Base, "USDC"),
        (OPTIMISM_USDC, NamedChain::Optimism, "USDC"),
        (POLYGON_USDC, NamedChain::Polygon, "USDC"),
        (SEPOLIA_USDC, NamedChain::Sepolia, "USDC"),
    ];

    /// Home chain and symbol of a well-known token address, if any
    pub fn lookup(token: Address) -> Option<(NamedChain, &'static str)> {
        ALL.iter()
            .find(|(known, _, _)| *known == token)
            .map(|(_, chain, symbol)| (*chain, *symbol))
    }
}
