// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Assertions over token listing API responses
//!
//! Validators are plain functions returning [`ValidationResult`]. The first
//! failed check decides the error; nothing is collected or retried.
//!
//! # Core Abstractions
//!
//! - **[`status`]**: status codes and `{code, message}` error bodies
//! - **[`tokens`]**: chain keys, per-token properties and price thresholds
//! - **[`ValidationError`]**: one variant per failed assertion, carrying the
//!   offending values

pub mod error;
pub mod status;
pub mod tokens;

pub use error::{ValidationError, ValidationResult};
pub use status::{
    HasStatus, validate_error_body, validate_error_message_and_code, validate_error_response,
    validate_status_code,
};
pub use tokens::{
    validate_all_tokens_above_price, validate_chains, validate_chains_in_response,
    validate_token_properties, validate_tokens_by_chain, validate_tokens_response,
};
