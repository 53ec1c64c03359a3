// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! ERC-20 metadata calls and tolerant decoding of their return data
//!
//! Standard tokens return ABI-encoded `string`s. Some early tokens (MKR, SAI)
//! predate that convention and return a right-padded `bytes32` instead, so a
//! 32-byte payload that is not a valid dynamic string is read as `bytes32`.

use std::fmt;

use alloy_primitives::{Bytes, U256};
use alloy_sol_types::{sol, SolCall};

use crate::errors::RpcError;

sol! {
    interface IERC20Metadata {
        function name() external view returns (string);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
    }
}

/// The three metadata reads issued per token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenMethod {
    Name,
    Symbol,
    Decimals,
}

impl TokenMethod {
    pub const ALL: [TokenMethod; 3] = [
        TokenMethod::Name,
        TokenMethod::Symbol,
        TokenMethod::Decimals,
    ];

    /// Solidity signature, e.g. `"name()"`
    pub fn signature(self) -> &'static str {
        match self {
            TokenMethod::Name => IERC20Metadata::nameCall::SIGNATURE,
            TokenMethod::Symbol => IERC20Metadata::symbolCall::SIGNATURE,
            TokenMethod::Decimals => IERC20Metadata::decimalsCall::SIGNATURE,
        }
    }

    /// 4-byte function selector
    pub fn selector(self) -> [u8; 4] {
        match self {
            TokenMethod::Name => IERC20Metadata::nameCall::SELECTOR,
            TokenMethod::Symbol => IERC20Metadata::symbolCall::SELECTOR,
            TokenMethod::Decimals => IERC20Metadata::decimalsCall::SELECTOR,
        }
    }

    /// Calldata for `eth_call` (selector only, none of these take arguments)
    pub fn calldata(self) -> Bytes {
        let encoded = match self {
            TokenMethod::Name => IERC20Metadata::nameCall {}.abi_encode(),
            TokenMethod::Symbol => IERC20Metadata::symbolCall {}.abi_encode(),
            TokenMethod::Decimals => IERC20Metadata::decimalsCall {}.abi_encode(),
        };
        Bytes::from(encoded)
    }
}

impl fmt::Display for TokenMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.signature())
    }
}

/// Decodes a `name()` or `symbol()` result
///
/// Trailing zero bytes are dropped in both the `string` and `bytes32` forms.
pub fn decode_string(method: TokenMethod, data: &[u8]) -> Result<String, RpcError> {
    let signature = method.signature();
    if data.is_empty() {
        return Err(RpcError::EmptyResponse { method: signature });
    }

    if let Some(payload) = dynamic_payload(data) {
        return utf8_trimmed(signature, payload);
    }

    if data.len() == 32 {
        return utf8_trimmed(signature, data);
    }

    Err(RpcError::decode(
        signature,
        format!("{} bytes is neither an ABI string nor bytes32", data.len()),
    ))
}

/// Decodes a `decimals()` result as a `uint256` word that must fit in a `u8`
pub fn decode_decimals(data: &[u8]) -> Result<u8, RpcError> {
    let signature = TokenMethod::Decimals.signature();
    if data.is_empty() {
        return Err(RpcError::EmptyResponse { method: signature });
    }
    if data.len() < 32 {
        return Err(RpcError::decode(
            signature,
            format!("expected a 32-byte word, got {} bytes", data.len()),
        ));
    }

    let value = U256::from_be_slice(&data[..32]);
    u8::try_from(value)
        .map_err(|_| RpcError::decode(signature, format!("decimals value {value} exceeds 255")))
}

/// Payload of an ABI dynamic `string`: offset word, length word, bytes
///
/// A payload shorter than its declared length is accepted as-is.
fn dynamic_payload(data: &[u8]) -> Option<&[u8]> {
    if data.len() < 64 {
        return None;
    }

    let offset = word_as_usize(&data[..32])?;
    let length_end = offset.checked_add(32)?;
    let length = word_as_usize(data.get(offset..length_end)?)?;

    let start = length_end;
    let end = start.checked_add(length)?.min(data.len());
    data.get(start..end)
}

fn word_as_usize(word: &[u8]) -> Option<usize> {
    usize::try_from(U256::from_be_slice(word)).ok()
}

fn utf8_trimmed(method: &'static str, bytes: &[u8]) -> Result<String, RpcError> {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);

    String::from_utf8(bytes[..end].to_vec())
        .map_err(|e| RpcError::decode(method, format!("invalid UTF-8: {e}")))
}
