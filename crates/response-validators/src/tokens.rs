// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Token listing checks
//!
//! These run on an already parsed [`TokensApiResponse`]. Chains are checked
//! in one direction only: every chain in the response must be expected, but
//! not every expected chain has to be present, since filtered requests
//! legitimately return a subset.

use reqwest::Response;
use serde_json::{Map, Value};
use shared_types::{ChainId, ChainList, TokensApiResponse, parse_price};
use tracing::{debug, error, info};

use crate::{
    error::{ValidationError, ValidationResult, describe},
    status::validate_status_code,
};

/// Check that every chain key of the response belongs to `expected_chains`
///
/// All offending keys are reported together.
pub fn validate_chains(
    response: &TokensApiResponse,
    expected_chains: &ChainList,
) -> ValidationResult<()> {
    let valid_ids = expected_chains.ids();

    let invalid: Vec<String> = response
        .chain_keys()
        .filter(|key| {
            !key.parse::<ChainId>()
                .is_ok_and(|chain_id| valid_ids.contains(&chain_id))
        })
        .map(str::to_string)
        .collect();

    if !invalid.is_empty() {
        error!(chain_ids = %invalid.join(", "), "invalid chains found in response");
        return Err(ValidationError::UnsupportedChains { chain_ids: invalid });
    }

    debug!(chains = response.tokens.len(), "all chains in the response are valid");
    Ok(())
}

/// [`validate_chains`] with progress logging
pub fn validate_chains_in_response(
    response: &TokensApiResponse,
    expected_chains: &ChainList,
) -> ValidationResult<()> {
    info!("validating the chains in the API response");
    validate_chains(response, expected_chains)?;
    info!("all chains in the response are valid");
    Ok(())
}

/// Check chains, then every token of every group against its group's chain
///
/// Each group must be a non-empty list.
pub fn validate_tokens_by_chain(
    response: &TokensApiResponse,
    expected_chains: &ChainList,
    required_properties: &[String],
) -> ValidationResult<()> {
    info!("validating the token properties for each chain in the response");
    validate_chains(response, expected_chains)?;

    for (key, group) in &response.tokens {
        let chain_id: ChainId = key.parse().map_err(|_| ValidationError::UnsupportedChains {
            chain_ids: vec![key.clone()],
        })?;

        let tokens = match group.as_array() {
            Some(tokens) if !tokens.is_empty() => tokens,
            _ => {
                return Err(ValidationError::EmptyTokenGroup {
                    chain_id: key.clone(),
                    expected: expected_chains.ids().into_iter().collect(),
                });
            }
        };

        for token in tokens {
            debug!(token = %token_label(token), %chain_id, "validating token properties");
            validate_token_properties(token, chain_id, required_properties)?;
        }
    }

    info!(chains = response.tokens.len(), "token properties are valid");
    Ok(())
}

/// Check a single token
///
/// Order of checks: required properties (first missing one fails), strict
/// `chainId` equality, non-negative numeric `decimals`, numeric-string
/// `priceUSD`. A negative price passes.
pub fn validate_token_properties(
    token: &Value,
    expected_chain_id: ChainId,
    required_properties: &[String],
) -> ValidationResult<()> {
    let fields = token.as_object();
    for property in required_properties {
        if !fields.is_some_and(|fields| fields.contains_key(property)) {
            return Err(ValidationError::MissingProperty {
                token: token_label(token),
                property: property.clone(),
            });
        }
    }

    let chain_id = token.get("chainId");
    if !chain_id.is_some_and(|value| is_chain_id(value, expected_chain_id)) {
        return Err(ValidationError::ChainIdMismatch {
            address: describe(token.get("address")),
            actual: describe(chain_id),
            expected: expected_chain_id,
        });
    }

    let decimals = token.get("decimals");
    if !decimals
        .and_then(Value::as_f64)
        .is_some_and(|decimals| decimals >= 0.0)
    {
        return Err(ValidationError::InvalidDecimals {
            value: describe(decimals),
        });
    }

    let price = token.get("priceUSD");
    if !price
        .and_then(Value::as_str)
        .is_some_and(|price| parse_price(price).is_some())
    {
        return Err(ValidationError::InvalidPrice {
            value: describe(price),
        });
    }

    Ok(())
}

/// Check that every token of every chain is priced strictly above `threshold`
///
/// Stops at the first token that is not.
pub fn validate_all_tokens_above_price(
    tokens_by_chain: &Map<String, Value>,
    threshold: f64,
) -> ValidationResult<()> {
    info!(threshold, "validating that all token prices exceed the threshold");

    for (chain_id, group) in tokens_by_chain {
        let Some(tokens) = group.as_array() else {
            return Err(ValidationError::InvalidTokenGroup {
                chain_id: chain_id.clone(),
            });
        };

        for token in tokens {
            let price = price_of(token).ok_or_else(|| ValidationError::UnparseablePrice {
                token: token.to_string(),
            })?;

            if price <= threshold {
                return Err(ValidationError::PriceNotAboveThreshold {
                    address: describe(token.get("address")),
                    price,
                    threshold,
                });
            }
        }
    }

    info!(threshold, "all tokens have priceUSD greater than the threshold");
    Ok(())
}

/// Read a successful tokens response and validate it
///
/// Requires status 200, parses the body and runs
/// [`validate_tokens_by_chain`]. The parsed body is returned for further
/// checks.
pub async fn validate_tokens_response(
    response: Response,
    expected_chains: &ChainList,
    required_properties: &[String],
) -> ValidationResult<TokensApiResponse> {
    validate_status_code(&response, 200)?;
    let body: TokensApiResponse = serde_json::from_slice(&response.bytes().await?)?;
    validate_tokens_by_chain(&body, expected_chains, required_properties)?;
    Ok(body)
}

#[allow(clippy::cast_precision_loss, clippy::float_cmp)]
fn is_chain_id(value: &Value, expected: ChainId) -> bool {
    match value.as_u64() {
        Some(id) => id == expected.value(),
        None => value
            .as_f64()
            .is_some_and(|id| id == expected.value() as f64),
    }
}

fn price_of(token: &Value) -> Option<f64> {
    match token.get("priceUSD")? {
        Value::String(price) => parse_price(price),
        Value::Number(price) => price.as_f64(),
        _ => None,
    }
}

fn token_label(token: &Value) -> String {
    token
        .get("name")
        .or_else(|| token.get("address"))
        .map_or_else(|| token.to_string(), |label| describe(Some(label)))
}
