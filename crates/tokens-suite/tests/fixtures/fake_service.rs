// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

//! In-process stand-in for the tokens endpoint
//!
//! Serves the chains of the bundled fixtures, two tokens each, and refuses
//! unsupported query values with the catalog's messages the way the real
//! service does.

use std::{
    collections::HashMap,
    sync::atomic::{AtomicUsize, Ordering},
};

use api_client::API_KEY_HEADER;
use shared_types::{ChainId, ErrorBody, Token, TokensApiResponse, parse_price};
use tokens_suite::{ErrorMessageKey, Fixtures};
use wiremock::{Request, Respond, ResponseTemplate};

const SOLANA: ChainId = ChainId::new(1_151_111_081_099_710);
const BITCOIN: ChainId = ChainId::new(20_000_000_000_001);

/// Token price below every valid fixture threshold
pub const DUST_PRICE: &str = "0.25";
/// Token price above every valid fixture threshold
pub const NATIVE_PRICE: &str = "2500.5";

struct FakeChain {
    chain_id: ChainId,
    chain_type: &'static str,
    tokens: Vec<Token>,
}

/// `wiremock` responder emulating `GET /tokens`
pub struct FakeTokensService {
    chains: Vec<FakeChain>,
    messages: HashMap<ErrorMessageKey, String>,
    accepted_api_key: Option<String>,
    rate_limit: Option<usize>,
    served: AtomicUsize,
}

impl FakeTokensService {
    /// Service supporting exactly the fixture's supported chains
    pub fn from_fixtures(fixtures: &Fixtures) -> Self {
        let chains = fixtures
            .chains
            .supported
            .iter()
            .map(|(name, chain_id)| FakeChain {
                chain_id: *chain_id,
                chain_type: chain_type_of(*chain_id),
                tokens: vec![
                    token(*chain_id, 1, &format!("{name} Dust"), DUST_PRICE),
                    token(*chain_id, 2, &format!("{name} Native"), NATIVE_PRICE),
                ],
            })
            .collect();

        let messages = [
            ErrorMessageKey::ChainTypes,
            ErrorMessageKey::Chains,
            ErrorMessageKey::MinPriceUsd,
            ErrorMessageKey::Unauthorized,
            ErrorMessageKey::RateLimited,
        ]
        .into_iter()
        .map(|key| (key, fixtures.message(key).unwrap().to_string()))
        .collect();

        Self {
            chains,
            messages,
            accepted_api_key: None,
            rate_limit: None,
            served: AtomicUsize::new(0),
        }
    }

    /// Accept requests carrying `api_key`; any other key is refused
    pub fn accepting_api_key(mut self, api_key: &str) -> Self {
        self.accepted_api_key = Some(api_key.to_string());
        self
    }

    /// Answer 429 once `limit` requests have been served
    pub fn rate_limited_after(mut self, limit: usize) -> Self {
        self.rate_limit = Some(limit);
        self
    }

    fn error(&self, status: u16, code: i64, key: ErrorMessageKey) -> ResponseTemplate {
        ResponseTemplate::new(status).set_body_json(ErrorBody::new(code, &self.messages[&key]))
    }

    fn invalid_query(&self, key: ErrorMessageKey) -> ResponseTemplate {
        self.error(400, 1011, key)
    }

    fn chain(&self, chain_id: ChainId) -> Option<&FakeChain> {
        self.chains.iter().find(|chain| chain.chain_id == chain_id)
    }
}

impl Respond for FakeTokensService {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let served = self.served.fetch_add(1, Ordering::SeqCst);
        if self.rate_limit.is_some_and(|limit| served >= limit) {
            return self.error(429, 429, ErrorMessageKey::RateLimited);
        }

        if let Some(key) = request.headers.get(API_KEY_HEADER) {
            if key.to_str().ok() != self.accepted_api_key.as_deref() {
                return self.error(401, 401, ErrorMessageKey::Unauthorized);
            }
        }

        let query: HashMap<String, String> = request.url.query_pairs().into_owned().collect();

        let mut selected: Vec<&FakeChain> = self.chains.iter().collect();

        if let Some(chains) = query.get("chains") {
            let mut requested = Vec::new();
            for raw in chains.split(',') {
                match raw.parse::<ChainId>().ok().and_then(|id| self.chain(id)) {
                    Some(chain) => requested.push(chain.chain_id),
                    None => return self.invalid_query(ErrorMessageKey::Chains),
                }
            }
            selected.retain(|chain| requested.contains(&chain.chain_id));
        }

        if let Some(chain_types) = query.get("chainTypes") {
            let mut requested = Vec::new();
            for raw in chain_types.split(',') {
                let chain_type = raw.trim().to_uppercase();
                if !self.chains.iter().any(|chain| chain.chain_type == chain_type) {
                    return self.invalid_query(ErrorMessageKey::ChainTypes);
                }
                requested.push(chain_type);
            }
            selected.retain(|chain| requested.iter().any(|t| t == chain.chain_type));
        }

        let mut min_price = None;
        if let Some(price) = query.get("minPriceUSD") {
            match parse_price(price) {
                Some(value) if value.is_finite() && value >= 0.0 => min_price = Some(value),
                _ => return self.invalid_query(ErrorMessageKey::MinPriceUsd),
            }
        }

        let tokens = selected
            .into_iter()
            .flat_map(|chain| chain.tokens.iter())
            .filter(|token| {
                min_price.is_none_or(|min| {
                    parse_price(&token.price_usd).is_some_and(|price| price > min)
                })
            })
            .cloned();

        let body = TokensApiResponse::from_tokens(tokens).unwrap();
        ResponseTemplate::new(200).set_body_json(body)
    }
}

fn chain_type_of(chain_id: ChainId) -> &'static str {
    match chain_id {
        SOLANA => "SVM",
        BITCOIN => "UTXO",
        _ => "EVM",
    }
}

fn token(chain_id: ChainId, index: u8, name: &str, price_usd: &str) -> Token {
    let symbol: String = name
        .split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect::<String>()
        .to_uppercase();
    Token {
        chain_id,
        address: format!("0x{:038x}{index:02x}", chain_id.value()),
        symbol,
        decimals: if index == 1 { 6 } else { 18 },
        price_usd: price_usd.to_string(),
        name: name.to_string(),
        coin_key: None,
        logo_uri: Some(format!("https://example.com/{chain_id}/{index}.png")),
    }
}
