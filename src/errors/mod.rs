// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the tokenmeta library.
//!
//! This module follows a hybrid approach:
//!
//! - **Component errors** for the pieces that talk to the outside world
//!   ([`RpcError`], [`RegistryError`], [`CacheError`], [`ConfigError`])
//! - **A closed taxonomy** ([`ResolveError`]) for everything the resolution
//!   pipeline can return to a caller
//!
//! Callers branch on [`ResolveError`] variants (or on [`ResolveErrorKind`]),
//! never on message text.
//!
//! # Examples
//!
//! ```rust,ignore
//! use tokenmeta::{ResolveError, TokenResolver};
//!
//! match resolver.resolve("arbitrum", "0xaf88d065e77c8cc2239327c5edb3a432268e5831").await {
//!     Ok(token) => println!("{} has {} decimals", token.symbol, token.decimals),
//!     Err(ResolveError::UnsupportedNetwork { supported, .. }) => {
//!         eprintln!("try one of: {}", supported.join(", "));
//!     }
//!     Err(ResolveError::ContractReadFailure { source, .. }) => {
//!         eprintln!("RPC failure, retrying...: {source}");
//!     }
//!     Err(e) => eprintln!("Other error: {e}"),
//! }
//! ```

mod cache;
mod config;
mod registry;
mod rpc;

pub use cache::CacheError;
pub use config::ConfigError;
pub use registry::RegistryError;
pub use rpc::RpcError;

/// Message returned to HTTP callers for any contract read failure.
///
/// Transport details stay in the logs.
pub const CONTRACT_READ_PUBLIC_MESSAGE: &str = "Token not found or invalid contract";

/// Every failure the resolution pipeline can report.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The network identifier is not in the registry.
    #[error("Unsupported network: {network}. Supported networks: {}", supported.join(", "))]
    UnsupportedNetwork {
        /// The identifier that was requested
        network: String,
        /// Identifiers the registry supports
        supported: Vec<String>,
    },

    /// The address is not `0x` followed by exactly 40 hex characters.
    #[error("Invalid address format: {address}. Must be 0x followed by 40 hex characters")]
    InvalidAddress {
        /// The rejected input, verbatim
        address: String,
    },

    /// Any of the `name()`, `symbol()` or `decimals()` reads failed.
    #[error("Failed to fetch token metadata for {address} on {network}")]
    ContractReadFailure {
        /// Network the read was issued against
        network: String,
        /// Normalized contract address
        address: String,
        /// What went wrong on the wire
        #[source]
        source: RpcError,
    },

    /// The dynamic registry has never been fetched successfully.
    #[error("Network registry unavailable")]
    RegistryUnavailable(#[source] RegistryError),

    /// No cached token with this symbol on this network.
    ///
    /// Symbols are only indexed as a side effect of address lookups.
    #[error("No indexed token with symbol {symbol} on {network}. Use address-based lookup instead")]
    SymbolNotIndexed {
        /// Network that was searched
        network: String,
        /// Symbol that was requested
        symbol: String,
    },
}

/// Fieldless mirror of [`ResolveError`] for table lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolveErrorKind {
    UnsupportedNetwork,
    InvalidAddress,
    ContractReadFailure,
    RegistryUnavailable,
    SymbolNotIndexed,
}

impl ResolveError {
    /// Create a `ContractReadFailure` for a specific network and address.
    pub fn contract_read_failure(
        network: impl Into<String>,
        address: impl Into<String>,
        source: RpcError,
    ) -> Self {
        ResolveError::ContractReadFailure {
            network: network.into(),
            address: address.into(),
            source,
        }
    }

    /// Create an `InvalidAddress` error.
    pub fn invalid_address(address: impl Into<String>) -> Self {
        ResolveError::InvalidAddress {
            address: address.into(),
        }
    }

    /// The variant tag of this error.
    pub fn kind(&self) -> ResolveErrorKind {
        match self {
            ResolveError::UnsupportedNetwork { .. } => ResolveErrorKind::UnsupportedNetwork,
            ResolveError::InvalidAddress { .. } => ResolveErrorKind::InvalidAddress,
            ResolveError::ContractReadFailure { .. } => ResolveErrorKind::ContractReadFailure,
            ResolveError::RegistryUnavailable(_) => ResolveErrorKind::RegistryUnavailable,
            ResolveError::SymbolNotIndexed { .. } => ResolveErrorKind::SymbolNotIndexed,
        }
    }

    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ResolveErrorKind::UnsupportedNetwork | ResolveErrorKind::InvalidAddress => 400,
            ResolveErrorKind::SymbolNotIndexed => 404,
            ResolveErrorKind::ContractReadFailure | ResolveErrorKind::RegistryUnavailable => 500,
        }
    }

    /// Message that is safe to show to an API caller.
    ///
    /// Identical to `Display` except for contract read failures, whose transport
    /// details are replaced by [`CONTRACT_READ_PUBLIC_MESSAGE`].
    pub fn public_message(&self) -> String {
        match self {
            ResolveError::ContractReadFailure { .. } => CONTRACT_READ_PUBLIC_MESSAGE.to_string(),
            ResolveError::RegistryUnavailable(_) => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<RegistryError> for ResolveError {
    fn from(error: RegistryError) -> Self {
        match error {
            RegistryError::NotFound { network, supported } => {
                ResolveError::UnsupportedNetwork { network, supported }
            }
            other => ResolveError::RegistryUnavailable(other),
        }
    }
}
