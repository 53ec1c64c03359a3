// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! The token metadata record returned by every lookup

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resolved state of one ERC-20 contract on one network.
///
/// `(network, address)` identifies a record. The `cached` flag is provenance,
/// annotated when the record is handed to a caller; it is never stored as `true`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenMetadata {
    /// Lowercase `0x`-prefixed contract address
    pub address: String,
    /// Network identifier from the registry
    pub network: String,
    /// Decoded `name()`; may be empty
    pub name: String,
    /// Decoded `symbol()`; may be empty
    pub symbol: String,
    /// Decoded `decimals()`
    pub decimals: u8,
    /// `true` when served from cache, `false` when freshly fetched
    pub cached: bool,
    /// When the record was produced (fetch time, or cache-write time)
    pub timestamp: DateTime<Utc>,
}

impl TokenMetadata {
    /// Returns the record with its provenance flag set.
    #[must_use]
    pub fn with_cached(mut self, cached: bool) -> Self {
        self.cached = cached;
        self
    }

    /// Returns the record with its production instant replaced.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}
