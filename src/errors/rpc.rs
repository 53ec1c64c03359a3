// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared RPC error types for contract read operations.
//!
//! These errors describe what went wrong on the wire (or while decoding what came
//! back from it). They are never surfaced to HTTP callers directly; the contract
//! read client wraps them in [`crate::ResolveError::ContractReadFailure`] together
//! with the network and address that were being queried.

use std::time::Duration;

/// Errors that can occur while reading from a token contract over JSON-RPC.
///
/// # Examples
///
/// ```rust
/// use tokenmeta::RpcError;
///
/// let error = RpcError::EmptyResponse { method: "symbol()" };
/// assert_eq!(error.to_string(), "symbol() returned no data");
/// ```
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The `eth_call` itself failed.
    ///
    /// Covers transport failures, HTTP errors, JSON-RPC error objects (including
    /// reverts) and malformed endpoint URLs.
    #[error("eth_call {method} failed")]
    CallFailed {
        /// Contract method being called (e.g. `"name()"`)
        method: &'static str,
        /// The underlying provider error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The call succeeded but returned `0x`.
    ///
    /// This is what a node returns when the target address holds no code, or when
    /// the contract does not implement the function.
    #[error("{method} returned no data")]
    EmptyResponse {
        /// Contract method being called
        method: &'static str,
    },

    /// The call did not complete within the configured deadline.
    #[error("{method} timed out after {}ms", timeout.as_millis())]
    Timeout {
        /// Contract method being called
        method: &'static str,
        /// Deadline that was exceeded
        timeout: Duration,
    },

    /// The returned bytes could not be decoded as the expected ABI type.
    #[error("failed to decode {method} response: {reason}")]
    Decode {
        /// Contract method being called
        method: &'static str,
        /// What was wrong with the payload
        reason: String,
    },
}

impl RpcError {
    /// Helper to create a `CallFailed` error from any error type.
    pub fn call_failed(
        method: &'static str,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        RpcError::CallFailed {
            method,
            source: Box::new(source),
        }
    }

    /// Helper to create a `Decode` error.
    pub fn decode(method: &'static str, reason: impl Into<String>) -> Self {
        RpcError::Decode {
            method,
            reason: reason.into(),
        }
    }

    /// The contract method this error relates to.
    pub fn method(&self) -> &'static str {
        match self {
            RpcError::CallFailed { method, .. }
            | RpcError::EmptyResponse { method }
            | RpcError::Timeout { method, .. }
            | RpcError::Decode { method, .. } => method,
        }
    }
}
