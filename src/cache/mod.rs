// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Token metadata cache with a 24 hour TTL
//!
//! Entries are stored under `(network, address)` and, when the symbol is
//! non-empty, also under `(network, SYMBOL)` so tokens that have been resolved
//! once can be found by symbol.
//!
//! # Expiry
//!
//! Expiry is lazy: an entry older than its TTL is evicted by the lookup that
//! finds it. There is no background sweep and no sliding expiry; a hit does not
//! extend an entry's life.
//!
//! # Durability
//!
//! [`MetadataCache::with_snapshot`] backs the cache with a JSON file. The file
//! is loaded once at construction and rewritten after every mutation
//! (insert, expiry eviction, clear). Snapshot failures are logged and never
//! reach callers; the in-memory map stays authoritative.
//!
//! # Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use tokenmeta::MetadataCache;
//!
//! let cache = Arc::new(MetadataCache::with_snapshot("token-cache.json").await);
//! if let Some(token) = cache.get("arbitrum", "0xaf88d065e77c8cc2239327c5edb3a432268e5831").await {
//!     assert!(token.cached);
//! }
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn, Instrument};

use crate::config::constants::CACHE_TTL;
use crate::spans;
use crate::types::cache::TimestampMillis;
use crate::types::metadata::TokenMetadata;

mod key;
mod snapshot;

pub use key::CacheKey;

/// One stored record, as it appears in the snapshot file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct CacheEntry {
    data: TokenMetadata,
    timestamp: TimestampMillis,
    /// Milliseconds
    ttl: u64,
}

impl CacheEntry {
    fn new(data: TokenMetadata, now: TimestampMillis) -> Self {
        Self {
            data: data.with_cached(false).with_timestamp(now.to_datetime()),
            timestamp: now,
            ttl: ttl_millis(),
        }
    }

    /// Discards a TTL read from disk in favour of the fixed one
    fn with_fixed_ttl(self) -> Self {
        Self {
            ttl: ttl_millis(),
            ..self
        }
    }

    fn is_expired(&self, now: TimestampMillis) -> bool {
        self.timestamp.elapsed_until(now).as_millis() > u128::from(self.ttl)
    }
}

fn ttl_millis() -> u64 {
    CACHE_TTL.as_millis() as u64
}

/// Cache statistics for observability
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of stored entries (address and symbol keys both count)
    pub entries: usize,
    /// All keys in string form, sorted
    pub keys: Vec<String>,
    /// Entries per network
    pub per_network: BTreeMap<String, usize>,
    /// Lookups that returned a live entry
    pub hits: u64,
    /// Lookups that found nothing, or found an expired entry
    pub misses: u64,
    /// Entries evicted because their TTL had passed
    pub expirations: u64,
}

impl CacheStats {
    /// Calculates the cache hit rate as a percentage (0.0 to 100.0)
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            (self.hits as f64 / total as f64) * 100.0
        }
    }
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entries={}, hits={}, misses={}, expirations={}, hit_rate={:.1}%",
            self.entries,
            self.hits,
            self.misses,
            self.expirations,
            self.hit_rate()
        )
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<CacheKey, CacheEntry>,
    hits: u64,
    misses: u64,
    expirations: u64,
}

/// Shared token metadata cache
///
/// Construct once and share via `Arc`. All operations take the internal lock
/// for their full duration, including any snapshot write.
#[derive(Debug, Default)]
pub struct MetadataCache {
    state: Mutex<CacheState>,
    snapshot_path: Option<PathBuf>,
}

impl MetadataCache {
    /// In-memory cache with no snapshot
    pub fn new() -> Self {
        Self::default()
    }

    /// Cache backed by a JSON snapshot at `path`
    ///
    /// A missing file starts an empty cache. An unreadable or corrupt file also
    /// starts an empty cache, with a warning; it is overwritten on the first
    /// mutation.
    pub async fn with_snapshot(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match snapshot::load(&path)
            .instrument(spans::load_snapshot(&path))
            .await
        {
            Ok(entries) => {
                info!(path = %path.display(), entries = entries.len(), "Loaded cache snapshot");
                entries
            }
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to load cache snapshot, starting with empty cache"
                );
                HashMap::new()
            }
        };

        Self {
            state: Mutex::new(CacheState {
                entries,
                ..CacheState::default()
            }),
            snapshot_path: Some(path),
        }
    }

    pub fn snapshot_path(&self) -> Option<&Path> {
        self.snapshot_path.as_deref()
    }

    /// Looks up a token by address (case-insensitive)
    ///
    /// Returns a copy with `cached = true`, or `None` if absent or expired.
    pub async fn get(&self, network: &str, address: &str) -> Option<TokenMetadata> {
        self.get_at(CacheKey::address(network, address), TimestampMillis::now())
            .await
    }

    /// Looks up a token by symbol (case-insensitive)
    ///
    /// Only tokens previously stored with [`put`](Self::put) are indexed.
    pub async fn get_by_symbol(&self, network: &str, symbol: &str) -> Option<TokenMetadata> {
        self.get_at(CacheKey::symbol(network, symbol), TimestampMillis::now())
            .await
    }

    /// Stores `metadata` under its address and, if non-empty, its symbol
    ///
    /// Replaces existing entries under the same keys.
    pub async fn put(&self, network: &str, address: &str, metadata: TokenMetadata) {
        self.put_at(network, address, metadata, TimestampMillis::now())
            .await
    }

    /// Drops every entry
    pub async fn clear(&self) {
        let mut state = self.state.lock().await;
        let dropped = state.entries.len();
        state.entries.clear();
        info!(dropped, "Cleared metadata cache");
        self.persist(&state).await;
    }

    pub async fn stats(&self) -> CacheStats {
        let state = self.state.lock().await;

        let mut keys: Vec<String> = state.entries.keys().map(ToString::to_string).collect();
        keys.sort();

        let mut per_network = BTreeMap::new();
        for key in state.entries.keys() {
            *per_network.entry(key.network().to_string()).or_insert(0) += 1;
        }

        CacheStats {
            entries: state.entries.len(),
            keys,
            per_network,
            hits: state.hits,
            misses: state.misses,
            expirations: state.expirations,
        }
    }

    pub(crate) async fn get_at(&self, key: CacheKey, now: TimestampMillis) -> Option<TokenMetadata> {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        let expired = state.entries.get(&key).map(|entry| entry.is_expired(now));
        match expired {
            None => {
                state.misses += 1;
                debug!(key = %key, "Cache miss");
                None
            }
            Some(true) => {
                state.entries.remove(&key);
                state.expirations += 1;
                state.misses += 1;
                debug!(key = %key, "Cache entry expired");
                self.persist(state).await;
                None
            }
            Some(false) => {
                state.hits += 1;
                debug!(key = %key, "Cache hit");
                state
                    .entries
                    .get(&key)
                    .map(|entry| entry.data.clone().with_cached(true))
            }
        }
    }

    pub(crate) async fn put_at(
        &self,
        network: &str,
        address: &str,
        metadata: TokenMetadata,
        now: TimestampMillis,
    ) {
        let symbol_key = CacheKey::symbol(network, &metadata.symbol);
        let symbol = metadata.symbol.clone();
        let entry = CacheEntry::new(metadata, now);

        let mut state = self.state.lock().await;
        if matches!(&symbol_key, CacheKey::Symbol { symbol, .. } if !symbol.is_empty()) {
            state.entries.insert(symbol_key, entry.clone());
        }
        state
            .entries
            .insert(CacheKey::address(network, address), entry);

        debug!(network = %network, address = %address, symbol = %symbol, "Cached token metadata");
        self.persist(&state).await;
    }

    async fn persist(&self, state: &CacheState) {
        let Some(path) = &self.snapshot_path else {
            return;
        };
        if let Err(e) = snapshot::write(path, &state.entries).await {
            warn!(path = %path.display(), error = %e, "Failed to write cache snapshot");
        }
    }
}
