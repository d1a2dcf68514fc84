// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Token listing payloads
//!
//! [`Token`] is the typed form of a listed token. Responses are kept as raw
//! JSON inside [`TokensApiResponse`] so that malformed tokens survive parsing
//! and can be reported field by field.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ChainId;

/// A token as returned by the tokens endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    /// Chain the token lives on
    pub chain_id: ChainId,
    /// Contract address (or mint, for non-EVM chains)
    pub address: String,
    /// Ticker symbol
    pub symbol: String,
    /// Number of decimals
    pub decimals: u8,
    /// Price in US dollars as a numeric string
    #[serde(rename = "priceUSD")]
    pub price_usd: String,
    /// Display name
    pub name: String,
    /// Cross-chain coin identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coin_key: Option<String>,
    /// Logo location
    #[serde(rename = "logoURI", default, skip_serializing_if = "Option::is_none")]
    pub logo_uri: Option<String>,
}

/// Body of a successful `GET /tokens` response
///
/// Keys of `tokens` are string-encoded chain IDs; values should be arrays of
/// tokens but are left untyped on purpose.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokensApiResponse {
    /// Token groups keyed by chain ID
    pub tokens: Map<String, Value>,
}

impl TokensApiResponse {
    /// Group typed tokens by their chain ID, keeping their order within a chain
    pub fn from_tokens<I>(tokens: I) -> Result<Self, serde_json::Error>
    where
        I: IntoIterator<Item = Token>,
    {
        let mut groups = Map::new();
        for token in tokens {
            let group = groups
                .entry(token.chain_id.to_string())
                .or_insert_with(|| Value::Array(Vec::new()));
            if let Value::Array(list) = group {
                list.push(serde_json::to_value(token)?);
            }
        }
        Ok(Self { tokens: groups })
    }

    /// Chain keys present in the response
    pub fn chain_keys(&self) -> impl Iterator<Item = &str> {
        self.tokens.keys().map(String::as_str)
    }
}

/// Error payload returned with 4xx responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Service error code, e.g. `1011` for invalid query values
    pub code: i64,
    /// Human-readable error text
    pub message: String,
}

impl ErrorBody {
    /// Create an error body
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}
