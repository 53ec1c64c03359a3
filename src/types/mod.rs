// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for type safety across tokenmeta.
//!
//! - Validated contract addresses
//! - The token metadata record
//! - Cache metadata (write timestamps)

pub mod address;
pub mod cache;
pub mod metadata;

// Note: Public types are re-exported from lib.rs, not here
