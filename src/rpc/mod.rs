// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Contract read client
//!
//! - [`abi`]: the three ERC-20 metadata calls and their decoders
//! - [`ContractCaller`]: the `eth_call` seam, implemented over alloy by
//!   [`AlloyContractCaller`]
//! - [`ContractReadClient`]: resolve, validate, read concurrently, decode

pub mod abi;
mod caller;
mod client;
mod pool;

pub use abi::TokenMethod;
pub use caller::{AlloyContractCaller, ContractCaller};
pub use client::ContractReadClient;
pub use pool::{PooledProvider, ProviderPool};
