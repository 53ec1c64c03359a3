// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Cache keys and their string form

use std::{fmt, str::FromStr};

use crate::errors::CacheError;

/// Key of one cache entry
///
/// String form (used in snapshots): `{network}:address:{address}` with the
/// address lowercased, or `{network}:symbol:{SYMBOL}` with the symbol
/// trimmed and uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheKey {
    Address { network: String, address: String },
    Symbol { network: String, symbol: String },
}

impl CacheKey {
    pub fn address(network: &str, address: &str) -> Self {
        CacheKey::Address {
            network: network.to_string(),
            address: address.to_ascii_lowercase(),
        }
    }

    pub fn symbol(network: &str, symbol: &str) -> Self {
        CacheKey::Symbol {
            network: network.to_string(),
            symbol: symbol.trim().to_uppercase(),
        }
    }

    pub fn network(&self) -> &str {
        match self {
            CacheKey::Address { network, .. } | CacheKey::Symbol { network, .. } => network,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Address { network, address } => write!(f, "{network}:address:{address}"),
            CacheKey::Symbol { network, symbol } => write!(f, "{network}:symbol:{symbol}"),
        }
    }
}

impl FromStr for CacheKey {
    type Err = CacheError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || CacheError::InvalidKey {
            key: key.to_string(),
        };

        let mut parts = key.splitn(3, ':');
        let (Some(network), Some(kind), Some(value)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if network.is_empty() || value.trim().is_empty() {
            return Err(invalid());
        }

        match kind {
            "address" => Ok(CacheKey::address(network, value)),
            "symbol" => Ok(CacheKey::symbol(network, value)),
            _ => Err(invalid()),
        }
    }
}
