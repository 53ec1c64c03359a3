// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for network registry lookups and refreshes.

/// Errors that can occur while resolving a network identifier.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The network identifier is not present in the registry.
    #[error("Unsupported network: {network}. Supported networks: {}", supported.join(", "))]
    NotFound {
        /// The identifier that was requested
        network: String,
        /// Identifiers the registry does know about, in listing order
        supported: Vec<String>,
    },

    /// Fetching the remote chain list failed.
    #[error("Failed to fetch chain list from {url}")]
    FetchFailed {
        /// Chain list source URL
        url: String,
        /// The underlying HTTP or decode error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A refresh failed and there is no previously fetched registry to fall back on.
    #[error("Network registry unavailable: no chain list has been fetched yet")]
    Unavailable {
        /// The failure from the most recent refresh attempt
        #[source]
        source: Box<RegistryError>,
    },
}

impl RegistryError {
    /// Helper to create a `FetchFailed` error from any error type.
    pub fn fetch_failed(
        url: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RegistryError::FetchFailed {
            url: url.into(),
            source: Box::new(source),
        }
    }

    /// Wraps a refresh failure that left the registry with nothing to serve.
    pub fn unavailable(source: RegistryError) -> Self {
        RegistryError::Unavailable {
            source: Box::new(source),
        }
    }
}
