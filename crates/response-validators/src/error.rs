// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Validation failures
//!
//! Every check reports its own variant with the offending value in the
//! message, so a failed scenario can be diagnosed from the error alone.

use serde_json::Value;
use shared_types::ChainId;
use thiserror::Error;

/// Result type alias for validators
pub type ValidationResult<T> = Result<T, ValidationError>;

/// A failed assertion on a response
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    /// HTTP status differs from the expected one
    #[error("Expected status code {expected}, got {actual}")]
    StatusCode { expected: u16, actual: u16 },

    /// `code` field of an error body differs from the expected one
    #[error("Expected error code {expected}, got {actual}")]
    ErrorCode { expected: i64, actual: String },

    /// `message` field of an error body lacks the expected text
    #[error("Expected error message to contain {expected:?}, got {actual}")]
    ErrorMessage { expected: String, actual: String },

    /// Body could not be read
    #[error("Failed to read response body: {0}")]
    Body(#[from] reqwest::Error),

    /// Body is not the expected JSON
    #[error("Response body is not valid JSON for this check: {0}")]
    Json(#[from] serde_json::Error),

    /// Response contains token groups for chains that were not expected
    #[error("The following chain IDs are not supported: {}", .chain_ids.join(", "))]
    UnsupportedChains { chain_ids: Vec<String> },

    /// A token group is empty or not a list
    #[error(
        "No tokens found for chainId={chain_id}. Expected tokens for chainIds={}",
        join_ids(.expected)
    )]
    EmptyTokenGroup {
        chain_id: String,
        expected: Vec<ChainId>,
    },

    /// A token group is not a list
    #[error("Token group for chainId={chain_id} is not a list")]
    InvalidTokenGroup { chain_id: String },

    /// A required token property is absent
    #[error("Token {token} is missing required property: {property}")]
    MissingProperty { token: String, property: String },

    /// Token belongs to a different chain than its group
    #[error("Token with address={address} has invalid chainId={actual}. Expected: {expected}")]
    ChainIdMismatch {
        address: String,
        actual: String,
        expected: ChainId,
    },

    /// `decimals` is missing, not a number, or negative
    #[error("Invalid 'decimals' value for token: {value}. Expected a non-negative number.")]
    InvalidDecimals { value: String },

    /// `priceUSD` is missing, not a string, or not numeric
    #[error("Invalid 'priceUSD' value for token: {value}. Expected a numeric string.")]
    InvalidPrice { value: String },

    /// `priceUSD` cannot be compared against a threshold
    #[error("Invalid priceUSD value for token: {token}")]
    UnparseablePrice { token: String },

    /// Token price does not exceed the requested minimum
    #[error(
        "Validation failed: Token with address={address} has priceUSD={price}, which is not greater than {threshold}."
    )]
    PriceNotAboveThreshold {
        address: String,
        price: f64,
        threshold: f64,
    },
}

fn join_ids(ids: &[ChainId]) -> String {
    ids.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a JSON field for an error message; strings without quotes
pub(crate) fn describe(value: Option<&Value>) -> String {
    match value {
        None => "<missing>".to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
