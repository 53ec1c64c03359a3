// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Validated contract addresses
//!
//! User input arrives as free-form strings. [`TokenAddress`] is only constructed
//! through the syntactic check (`0x` followed by exactly 40 hex characters, any
//! case), so code holding one never has to re-validate.

use std::fmt;

use alloy_primitives::{hex, Address};

use crate::errors::ResolveError;

/// Number of hex characters in an address after the `0x` prefix.
const ADDRESS_HEX_LEN: usize = 40;

/// A syntactically valid ERC-20 contract address.
///
/// Displays as the normalized lowercase `0x`-prefixed form.
///
/// # Examples
///
/// ```
/// use tokenmeta::TokenAddress;
///
/// let address = TokenAddress::parse("0xAF88d065e77c8cC2239327C5EDb3A432268e5831").unwrap();
/// assert_eq!(address.to_string(), "0xaf88d065e77c8cc2239327c5edb3a432268e5831");
///
/// assert!(TokenAddress::parse("0x123").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenAddress(Address);

impl TokenAddress {
    /// Validates and parses a user-supplied address string.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::InvalidAddress`] unless the input is `0x` followed by
    /// exactly 40 hexadecimal characters.
    pub fn parse(input: &str) -> Result<Self, ResolveError> {
        let digits = input
            .strip_prefix("0x")
            .ok_or_else(|| ResolveError::invalid_address(input))?;

        if digits.len() != ADDRESS_HEX_LEN || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ResolveError::invalid_address(input));
        }

        let address = digits
            .parse::<Address>()
            .map_err(|_| ResolveError::invalid_address(input))?;

        Ok(Self(address))
    }

    /// The underlying 20-byte address.
    pub fn as_address(&self) -> Address {
        self.0
    }

    /// Lowercase `0x`-prefixed form used for storage and comparison.
    pub fn normalized(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl From<Address> for TokenAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

impl fmt::Display for TokenAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.normalized())
    }
}
