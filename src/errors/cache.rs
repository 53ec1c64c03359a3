// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for metadata cache snapshot persistence.
//!
//! Snapshot failures never reach callers of the cache: they are logged and the
//! in-memory map stays authoritative.

/// Errors that can occur while loading or writing a cache snapshot.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// File system error while reading or writing the snapshot.
    #[error("Cache snapshot I/O error: {details}")]
    Io {
        /// What was being done, and to which path
        details: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The snapshot could not be (de)serialized.
    #[error("Cache snapshot serialization error")]
    Serialization(#[source] serde_json::Error),

    /// A snapshot key did not match `{network}:address:{address}` or
    /// `{network}:symbol:{symbol}`.
    #[error("Invalid cache key: {key}")]
    InvalidKey {
        /// The offending key string
        key: String,
    },
}

impl CacheError {
    /// Create an I/O error with context.
    pub fn io(details: impl Into<String>, source: std::io::Error) -> Self {
        CacheError::Io {
            details: details.into(),
            source,
        }
    }

    /// Create a serialization error.
    pub fn serialization(source: serde_json::Error) -> Self {
        CacheError::Serialization(source)
    }
}
