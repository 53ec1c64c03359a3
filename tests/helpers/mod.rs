// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for tokenmeta integration tests
//!
//! Provides mock implementations of the transport traits so the resolution
//! pipeline can be exercised without real RPC endpoints.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolValue;
use async_trait::async_trait;
use tokenmeta::{
    ChainListSource, ContractCaller, ContractReadClient, MetadataCache, NetworkConfig,
    NetworkRegistry, RegistryError, RpcError, StaticRegistry, TokenMethod, TokenResolver,
};

/// Native USDC on Arbitrum One
pub const ARBITRUM_USDC: &str = "0xaf88d065e77c8cc2239327c5edb3a432268e5831";
pub const ARBITRUM_USDC_CHECKSUMMED: &str = "0xaf88d065e77c8cC2239327C5EDb3A432268e5831";

/// ABI-encodes a `string` return value
pub fn encode_string(value: &str) -> Bytes {
    Bytes::from(value.to_string().abi_encode())
}

/// ABI-encodes a `uint256` return value
pub fn encode_uint(value: u64) -> Bytes {
    Bytes::from(U256::from(value).abi_encode())
}

/// Right-pads `value` into a single `bytes32` word
pub fn encode_bytes32(value: &str) -> Bytes {
    let mut word = [0u8; 32];
    word[..value.len()].copy_from_slice(value.as_bytes());
    Bytes::copy_from_slice(&word)
}

#[derive(Debug, Clone)]
enum MockReply {
    Data(Bytes),
    Fail(String),
}

/// Mock ContractCaller with scripted replies and call counting
///
/// # Example
///
/// ```rust,ignore
/// let caller = Arc::new(
///     MockContractCaller::erc20("USD Coin", "USDC", 6)
///         .with_delay(TokenMethod::Decimals, Duration::from_secs(60)),
/// );
/// let resolver = static_resolver(caller.clone());
/// assert_eq!(caller.call_count(), 0);
/// ```
pub struct MockContractCaller {
    replies: HashMap<TokenMethod, MockReply>,
    delays: HashMap<TokenMethod, Duration>,
    calls: AtomicUsize,
    seen: Mutex<Vec<(String, Address, TokenMethod)>>,
}

impl MockContractCaller {
    /// A contract that answers all three reads successfully
    pub fn erc20(name: &str, symbol: &str, decimals: u64) -> Self {
        Self {
            replies: HashMap::from([
                (TokenMethod::Name, MockReply::Data(encode_string(name))),
                (TokenMethod::Symbol, MockReply::Data(encode_string(symbol))),
                (TokenMethod::Decimals, MockReply::Data(encode_uint(decimals))),
            ]),
            delays: HashMap::new(),
            calls: AtomicUsize::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    /// Arbitrum USDC as a node returns it
    pub fn usdc() -> Self {
        Self::erc20("USD Coin", "USDC", 6)
    }

    /// An address with no code: every read returns `0x`
    pub fn no_code() -> Self {
        let mut mock = Self::erc20("", "", 0);
        for method in TokenMethod::ALL {
            mock.replies.insert(method, MockReply::Data(Bytes::new()));
        }
        mock
    }

    pub fn with_reply(mut self, method: TokenMethod, data: Bytes) -> Self {
        self.replies.insert(method, MockReply::Data(data));
        self
    }

    /// Makes `method` fail as a transport error would
    pub fn with_failure(mut self, method: TokenMethod, message: &str) -> Self {
        self.replies
            .insert(method, MockReply::Fail(message.to_string()));
        self
    }

    /// Delays the reply to `method`; pair with paused tokio time
    pub fn with_delay(mut self, method: TokenMethod, delay: Duration) -> Self {
        self.delays.insert(method, delay);
        self
    }

    /// Number of `eth_call`s issued so far
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// `(network, contract, method)` of every call so far
    pub fn seen(&self) -> Vec<(String, Address, TokenMethod)> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl ContractCaller for MockContractCaller {
    async fn call(
        &self,
        network: &NetworkConfig,
        to: Address,
        method: TokenMethod,
    ) -> Result<Bytes, RpcError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen
            .lock()
            .unwrap()
            .push((network.name.clone(), to, method));

        if let Some(delay) = self.delays.get(&method) {
            tokio::time::sleep(*delay).await;
        }

        match self.replies.get(&method) {
            Some(MockReply::Data(data)) => Ok(data.clone()),
            Some(MockReply::Fail(message)) => Err(RpcError::call_failed(
                method.signature(),
                std::io::Error::other(message.clone()),
            )),
            None => Ok(Bytes::new()),
        }
    }
}

/// Resolver over the static registry, a fresh in-memory cache and `caller`
pub fn static_resolver(caller: Arc<MockContractCaller>) -> TokenResolver {
    resolver_with(Arc::new(StaticRegistry::new()), caller, MetadataCache::new())
}

pub fn resolver_with(
    registry: Arc<dyn NetworkRegistry>,
    caller: Arc<MockContractCaller>,
    cache: MetadataCache,
) -> TokenResolver {
    let client = ContractReadClient::new(registry.clone(), caller);
    TokenResolver::new(Arc::new(cache), registry, client)
}

#[derive(Default)]
struct ChainListState {
    entries: Option<Vec<serde_json::Value>>,
    delay: Option<Duration>,
}

/// Mock ChainListSource whose list can be swapped or broken mid-test
///
/// Clones share state, so a test keeps one handle while the registry owns
/// another.
#[derive(Clone, Default)]
pub struct MockChainListSource {
    state: Arc<Mutex<ChainListState>>,
    fetches: Arc<AtomicUsize>,
}

impl MockChainListSource {
    pub fn with_entries(entries: Vec<serde_json::Value>) -> Self {
        let source = Self::default();
        source.set_entries(entries);
        source
    }

    /// A source that has never been reachable
    pub fn failing() -> Self {
        Self::default()
    }

    pub fn set_entries(&self, entries: Vec<serde_json::Value>) {
        self.state.lock().unwrap().entries = Some(entries);
    }

    /// Every later fetch fails
    pub fn break_source(&self) {
        self.state.lock().unwrap().entries = None;
    }

    pub fn set_delay(&self, delay: Duration) {
        self.state.lock().unwrap().delay = Some(delay);
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainListSource for MockChainListSource {
    async fn fetch(&self) -> Result<Vec<serde_json::Value>, RegistryError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let delay = self.state.lock().unwrap().delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let entries = self.state.lock().unwrap().entries.clone();
        entries.ok_or_else(|| {
            RegistryError::fetch_failed(
                self.location(),
                std::io::Error::other("connection refused"),
            )
        })
    }

    fn location(&self) -> &str {
        "mock://chains.json"
    }
}

/// A chain list entry in the upstream format
pub fn chain_entry(name: &str, chain_id: u64, short_name: &str, rpc: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "chainId": chain_id,
        "shortName": short_name,
        "rpc": rpc,
    })
}

/// A small upstream list: two usable chains and one with only keyed endpoints
pub fn sample_chain_list() -> Vec<serde_json::Value> {
    vec![
        serde_json::json!({
            "name": "Ethereum Mainnet",
            "chainId": 1,
            "shortName": "eth",
            "chainSlug": "ethereum",
            "rpc": [
                "https://mainnet.infura.io/v3/${INFURA_API_KEY}",
                "https://ethereum-rpc.publicnode.com"
            ]
        }),
        chain_entry("OP Mainnet", 10, "oeth", &["https://mainnet.optimism.io"]),
        chain_entry(
            "Keyed Only",
            999_999,
            "keyed",
            &["https://rpc.example.org/${API_KEY}", "wss://rpc.example.org"],
        ),
    ]
}
