// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Network registry backed by a remote chain list
//!
//! The list (by default `https://chainid.network/chains.json`) is fetched lazily
//! on first use and re-fetched once the refresh window has elapsed.
//!
//! # States
//!
//! - **Empty**: nothing fetched yet. A failed refresh is
//!   [`RegistryError::Unavailable`].
//! - **Fresh**: the last refresh succeeded less than one window ago.
//! - **Stale**: a later refresh failed. The previous snapshot keeps serving
//!   lookups, and the next attempt waits another full window.
//!
//! Concurrent lookups that find the registry due for refresh share a single
//! fetch: the refresh lock is held across it and the state is re-checked after
//! acquiring the lock.
//!
//! # Network ids
//!
//! Each entry is keyed by its `chainSlug`, falling back to the lowercased
//! `shortName`. Entries with neither are skipped, as are entries whose RPC list
//! has no usable URL (only `http(s)` URLs without `${...}` templates qualify).
//! The first entry wins when two entries produce the same id.

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::{
    sync::{Mutex, RwLock},
    time::Instant,
};
use tracing::{debug, info, warn, Instrument};

use super::{NetworkConfig, NetworkRegistry};
use crate::config::constants::DEFAULT_REGISTRY_REFRESH;
use crate::errors::RegistryError;
use crate::spans;

/// One entry of the chain list, with only the fields we use
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainListEntry {
    pub name: String,
    pub chain_id: u64,
    #[serde(default)]
    pub short_name: Option<String>,
    #[serde(default)]
    pub chain_slug: Option<String>,
    #[serde(default)]
    pub rpc: Vec<RpcEntry>,
}

/// The list mixes bare URL strings with `{ "url": ... }` objects
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RpcEntry {
    Url(String),
    Detailed { url: String },
}

impl RpcEntry {
    fn url(&self) -> &str {
        match self {
            RpcEntry::Url(url) | RpcEntry::Detailed { url } => url,
        }
    }
}

impl ChainListEntry {
    /// Registry id: `chainSlug`, else lowercased `shortName`
    pub fn network_id(&self) -> Option<String> {
        self.chain_slug
            .as_deref()
            .filter(|slug| !slug.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.short_name
                    .as_deref()
                    .filter(|short| !short.is_empty())
                    .map(str::to_lowercase)
            })
    }

    /// First RPC URL that needs no API key substitution
    pub fn usable_rpc_url(&self) -> Option<&str> {
        self.rpc.iter().map(RpcEntry::url).find(|url| {
            (url.starts_with("https://") || url.starts_with("http://")) && !url.contains("${")
        })
    }
}

/// Where raw chain list entries come from
///
/// Entries are returned as raw JSON so one malformed entry cannot spoil the
/// whole list.
#[async_trait]
pub trait ChainListSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<serde_json::Value>, RegistryError>;

    /// Location of the list, for logs
    fn location(&self) -> &str;
}

/// Fetches the chain list over HTTP
#[derive(Debug, Clone)]
pub struct HttpChainListSource {
    url: String,
    client: reqwest::Client,
}

impl HttpChainListSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl ChainListSource for HttpChainListSource {
    async fn fetch(&self) -> Result<Vec<serde_json::Value>, RegistryError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| RegistryError::fetch_failed(&self.url, e))?;

        response
            .json::<Vec<serde_json::Value>>()
            .await
            .map_err(|e| RegistryError::fetch_failed(&self.url, e))
    }

    fn location(&self) -> &str {
        &self.url
    }
}

/// Observable state of a [`ChainListRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryStatus {
    Empty,
    Fresh,
    Stale,
}

#[derive(Debug)]
struct RegistrySnapshot {
    networks: Vec<NetworkConfig>,
    index: HashMap<String, usize>,
}

impl RegistrySnapshot {
    fn from_entries(raw: Vec<serde_json::Value>) -> Self {
        let mut networks = Vec::new();
        let mut index = HashMap::new();
        let mut skipped = 0usize;

        for value in raw {
            let entry: ChainListEntry = match serde_json::from_value(value) {
                Ok(entry) => entry,
                Err(e) => {
                    debug!(error = %e, "Skipping malformed chain list entry");
                    skipped += 1;
                    continue;
                }
            };

            let (Some(id), Some(rpc_url)) = (entry.network_id(), entry.usable_rpc_url()) else {
                skipped += 1;
                continue;
            };

            if index.contains_key(&id) {
                debug!(network = %id, chain_id = entry.chain_id, "Duplicate network id, keeping first");
                skipped += 1;
                continue;
            }

            index.insert(id.clone(), networks.len());
            networks.push(NetworkConfig {
                name: id,
                rpc_url: rpc_url.to_string(),
                chain_id: entry.chain_id,
                chain_slug: entry.chain_slug.clone(),
            });
        }

        debug!(
            networks = networks.len(),
            skipped, "Built network registry from chain list"
        );

        Self { networks, index }
    }

    fn ids(&self) -> Vec<String> {
        self.networks.iter().map(|n| n.name.clone()).collect()
    }
}

enum RegistryState {
    Empty,
    Fresh {
        snapshot: Arc<RegistrySnapshot>,
        fetched_at: Instant,
    },
    Stale {
        snapshot: Arc<RegistrySnapshot>,
        failed_at: Instant,
    },
}

/// Registry sourced from a remote chain list
///
/// # Examples
///
/// ```rust,ignore
/// use std::time::Duration;
/// use tokenmeta::network::{ChainListRegistry, HttpChainListSource, NetworkRegistry};
///
/// let registry = ChainListRegistry::new(
///     HttpChainListSource::new("https://chainid.network/chains.json"),
///     Duration::from_secs(300),
/// );
/// let optimism = registry.resolve("optimism").await?;
/// ```
pub struct ChainListRegistry<S = HttpChainListSource> {
    source: S,
    refresh_window: Duration,
    state: RwLock<RegistryState>,
    refresh_lock: Mutex<()>,
}

impl<S: ChainListSource> ChainListRegistry<S> {
    pub fn new(source: S, refresh_window: Duration) -> Self {
        Self {
            source,
            refresh_window,
            state: RwLock::new(RegistryState::Empty),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Same as [`new`](Self::new) with the default five minute window
    pub fn with_default_window(source: S) -> Self {
        Self::new(source, DEFAULT_REGISTRY_REFRESH)
    }

    pub async fn status(&self) -> RegistryStatus {
        match &*self.state.read().await {
            RegistryState::Empty => RegistryStatus::Empty,
            RegistryState::Fresh { .. } => RegistryStatus::Fresh,
            RegistryState::Stale { .. } => RegistryStatus::Stale,
        }
    }

    /// Fetches the list now, regardless of the refresh window
    ///
    /// Returns the number of usable networks. On failure a previous snapshot is
    /// kept (and marked stale) and the fetch error is returned.
    pub async fn refresh(&self) -> Result<usize, RegistryError> {
        let _guard = self.refresh_lock.lock().await;
        Ok(self.refresh_locked().await?.networks.len())
    }

    async fn refresh_locked(&self) -> Result<Arc<RegistrySnapshot>, RegistryError> {
        let fetched = self
            .source
            .fetch()
            .instrument(spans::refresh_registry(self.source.location()))
            .await
            .map(RegistrySnapshot::from_entries)
            .and_then(|snapshot| {
                if snapshot.networks.is_empty() {
                    Err(RegistryError::fetch_failed(
                        self.source.location(),
                        std::io::Error::new(
                            std::io::ErrorKind::InvalidData,
                            "chain list contained no usable networks",
                        ),
                    ))
                } else {
                    Ok(snapshot)
                }
            });

        let mut state = self.state.write().await;
        match fetched {
            Ok(snapshot) => {
                info!(
                    source = %self.source.location(),
                    networks = snapshot.networks.len(),
                    "Network registry refreshed"
                );
                let snapshot = Arc::new(snapshot);
                *state = RegistryState::Fresh {
                    snapshot: Arc::clone(&snapshot),
                    fetched_at: Instant::now(),
                };
                Ok(snapshot)
            }
            Err(e) => {
                let previous = match &*state {
                    RegistryState::Empty => None,
                    RegistryState::Fresh { snapshot, .. } | RegistryState::Stale { snapshot, .. } => {
                        Some(Arc::clone(snapshot))
                    }
                };
                if let Some(snapshot) = previous {
                    warn!(
                        source = %self.source.location(),
                        error = %e,
                        "Chain list refresh failed, serving stale registry"
                    );
                    *state = RegistryState::Stale {
                        snapshot,
                        failed_at: Instant::now(),
                    };
                }
                Err(e)
            }
        }
    }

    /// Snapshot that needs no refresh right now
    async fn current(&self) -> Option<Arc<RegistrySnapshot>> {
        match &*self.state.read().await {
            RegistryState::Fresh {
                snapshot,
                fetched_at,
            } if fetched_at.elapsed() < self.refresh_window => Some(Arc::clone(snapshot)),
            RegistryState::Stale {
                snapshot,
                failed_at,
            } if failed_at.elapsed() < self.refresh_window => Some(Arc::clone(snapshot)),
            _ => None,
        }
    }

    async fn last_known(&self) -> Option<Arc<RegistrySnapshot>> {
        match &*self.state.read().await {
            RegistryState::Empty => None,
            RegistryState::Fresh { snapshot, .. } | RegistryState::Stale { snapshot, .. } => {
                Some(Arc::clone(snapshot))
            }
        }
    }

    async fn snapshot(&self) -> Result<Arc<RegistrySnapshot>, RegistryError> {
        if let Some(snapshot) = self.current().await {
            return Ok(snapshot);
        }

        let _guard = self.refresh_lock.lock().await;

        // another task may have refreshed while we waited
        if let Some(snapshot) = self.current().await {
            return Ok(snapshot);
        }

        match self.refresh_locked().await {
            Ok(snapshot) => Ok(snapshot),
            Err(e) => self
                .last_known()
                .await
                .ok_or_else(|| RegistryError::unavailable(e)),
        }
    }
}

#[async_trait]
impl<S: ChainListSource> NetworkRegistry for ChainListRegistry<S> {
    async fn resolve(&self, network: &str) -> Result<NetworkConfig, RegistryError> {
        let snapshot = self.snapshot().await?;
        snapshot
            .index
            .get(network)
            .map(|&i| snapshot.networks[i].clone())
            .ok_or_else(|| RegistryError::NotFound {
                network: network.to_string(),
                supported: snapshot.ids(),
            })
    }

    async fn list_supported(&self) -> Result<Vec<String>, RegistryError> {
        Ok(self.snapshot().await?.ids())
    }

    fn name(&self) -> &'static str {
        "ChainListRegistry"
    }
}
