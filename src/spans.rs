// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for tokenmeta operations.
//!
//! Telemetry is kept apart from business logic: instead of `#[instrument]`
//! attributes, each instrumented operation has a span helper here, attached to
//! the operation's future with [`tracing::Instrument`].
//!
//! Usage pattern:
//! ```rust,ignore
//! pub async fn my_operation(&self, network: &str) -> Result<T> {
//!     let span = spans::my_operation(network);
//!     async move {
//!         // Business logic here
//!     }
//!     .instrument(span)
//!     .await
//! }
//! ```

use tracing::{Level, Span};

use crate::rpc::TokenMethod;

/// Create span for resolving token metadata by address.
///
/// Parent: HTTP request (if any)
/// Children: fetch_metadata span on cache miss
#[inline]
pub(crate) fn resolve_token(network: &str, address: &str) -> Span {
    tracing::span!(
        Level::INFO,
        "tokenmeta.resolve_token",
        network = %network,
        address = %address,
        cached = tracing::field::Empty,
    )
}

/// Create span for resolving token metadata from the symbol index.
#[inline]
pub(crate) fn resolve_by_symbol(network: &str, symbol: &str) -> Span {
    tracing::debug_span!(
        "tokenmeta.resolve_by_symbol",
        network = %network,
        symbol = %symbol,
    )
}

/// Create span for reading token metadata from the contract.
///
/// Parent: resolve_token span
/// Children: read_contract spans (one per method)
#[inline]
pub(crate) fn fetch_metadata(network: &str, chain_id: u64, address: &str) -> Span {
    tracing::info_span!(
        "tokenmeta.fetch_metadata",
        network = %network,
        chain_id = chain_id,
        address = %address,
    )
}

/// Create span for one `eth_call` against a token contract.
///
/// Parent: fetch_metadata span
/// Children: rpc_call span from the transport logging layer
#[inline]
pub(crate) fn read_contract(method: TokenMethod) -> Span {
    tracing::debug_span!("tokenmeta.read_contract", method = %method.signature())
}

/// Create span for fetching the remote chain list.
#[inline]
pub(crate) fn refresh_registry(source: &str) -> Span {
    tracing::info_span!("tokenmeta.refresh_registry", source = %source)
}

/// Create span for loading a cache snapshot from disk.
#[inline]
pub(crate) fn load_snapshot(path: &std::path::Path) -> Span {
    tracing::info_span!("tokenmeta.load_snapshot", path = %path.display())
}
