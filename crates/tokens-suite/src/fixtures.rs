// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Fixture data
//!
//! Scenario inputs and expectations live in JSON files under a fixtures
//! root, so the supported chains and the service's error texts can change
//! without touching code. When a test environment is selected, a file under
//! `{root}/{env}/` takes precedence over the shared one.

use std::{
    collections::HashMap,
    fmt,
    path::{Path, PathBuf},
};

use api_client::QueryParams;
use rand::seq::IndexedRandom;
use serde::{Deserialize, de::DeserializeOwned};
use shared_types::{ChainList, ChainType, MinPriceUsd, NamedList};
use tracing::debug;

use crate::{config::SuiteConfig, error::FixtureError};

const CHAINS_FILE: &str = "tokens/chains.json";
const CHAIN_TYPES_FILE: &str = "tokens/chain_types.json";
const MIN_PRICE_USD_FILE: &str = "tokens/min_price_usd.json";
const RESPONSE_CHAINS_FILE: &str = "tokens/response_chains.json";
const TOKEN_PROPERTIES_FILE: &str = "tokens/token_properties.json";
const ERROR_MESSAGES_FILE: &str = "error_messages.json";

/// Chain ID inputs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainFixtures {
    /// Chains the service supports
    pub supported: ChainList,
    /// Supported chains listed more than once
    pub duplicated: ChainList,
    /// One unsupported chain
    pub not_supported_single: ChainList,
    /// Several unsupported chains
    pub not_supported_multiple: ChainList,
    /// Supported and unsupported chains together
    pub mix_supported_and_not_supported: ChainList,
    /// SQL injection payloads
    pub sql_injection: NamedList<String>,
    /// Script injection payloads
    pub xss_injection: NamedList<String>,
}

/// Chain type inputs
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainTypeFixtures {
    /// Chain types the service supports
    pub supported: Vec<ChainType>,
    /// Supported chain types in non-canonical case
    pub case_sensitive: Vec<ChainType>,
    /// Supported chain types listed more than once
    pub duplicated: Vec<ChainType>,
    /// One unsupported chain type
    pub not_supported_single: Vec<ChainType>,
    /// Supported and unsupported chain types together
    pub not_supported_mix_valid_and_invalid: Vec<ChainType>,
    /// Several unsupported chain types
    pub not_supported_multiple: Vec<ChainType>,
}

/// `minPriceUSD` inputs
#[derive(Debug, Clone, Deserialize)]
pub struct PriceFixtures {
    /// Accepted thresholds
    #[serde(rename = "validMinPriceUSD")]
    pub valid_min_price_usd: Vec<MinPriceUsd>,
    /// Rejected thresholds
    #[serde(rename = "invalidMinPriceUSD")]
    pub invalid_min_price_usd: Vec<MinPriceUsd>,
}

/// Chains a successful response may contain
#[derive(Debug, Clone, Deserialize)]
pub struct ResponseChains {
    /// Expected chain keys of any 200 body
    pub supported: ChainList,
}

/// Properties every returned token must carry
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenProperties {
    /// Property names, checked in order
    pub required_token_properties: Vec<String>,
}

/// Keys of the error message catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorMessageKey {
    /// Unsupported `chainTypes`
    ChainTypes,
    /// Unsupported or malformed `chains`
    Chains,
    /// Invalid `minPriceUSD`
    MinPriceUsd,
    /// Rejected API key
    Unauthorized,
    /// Too many requests
    RateLimited,
}

impl ErrorMessageKey {
    /// Key as written in the catalog file
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChainTypes => "ErrorMessageChainTypes",
            Self::Chains => "ErrorMessageChains",
            Self::MinPriceUsd => "ErrorMessageMinPriceUsd",
            Self::Unauthorized => "Unauthorized",
            Self::RateLimited => "RateLimited",
        }
    }
}

impl fmt::Display for ErrorMessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Expected error message fragments by key
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ErrorMessageCatalog(HashMap<String, String>);

impl ErrorMessageCatalog {
    /// Expected fragment for `key`
    pub fn get(&self, key: ErrorMessageKey) -> Result<&str, FixtureError> {
        self.0
            .get(key.as_str())
            .map(String::as_str)
            .ok_or_else(|| FixtureError::MissingMessage {
                key: key.as_str().to_string(),
            })
    }
}

/// All fixture data of a run
#[derive(Debug, Clone)]
pub struct Fixtures {
    /// Chain ID inputs
    pub chains: ChainFixtures,
    /// Chain type inputs
    pub chain_types: ChainTypeFixtures,
    /// `minPriceUSD` inputs
    pub prices: PriceFixtures,
    /// Chains allowed in responses
    pub response_chains: ResponseChains,
    /// Required token properties
    pub token_properties: TokenProperties,
    /// Expected error message fragments
    pub error_messages: ErrorMessageCatalog,
}

impl Fixtures {
    /// First valid `minPriceUSD`
    pub fn valid_min_price(&self) -> Result<&MinPriceUsd, FixtureError> {
        self.prices
            .valid_min_price_usd
            .first()
            .ok_or(FixtureError::Empty {
                name: "validMinPriceUSD",
            })
    }

    /// First valid `minPriceUSD` together with its numeric value
    pub fn valid_min_price_threshold(&self) -> Result<(&MinPriceUsd, f64), FixtureError> {
        let price = self.valid_min_price()?;
        let threshold = price.threshold().ok_or_else(|| FixtureError::NotNumeric {
            name: "validMinPriceUSD",
            value: price.to_string(),
        })?;
        Ok((price, threshold))
    }

    /// First invalid `minPriceUSD`
    pub fn invalid_min_price(&self) -> Result<&MinPriceUsd, FixtureError> {
        self.prices
            .invalid_min_price_usd
            .first()
            .ok_or(FixtureError::Empty {
                name: "invalidMinPriceUSD",
            })
    }

    /// Required token properties
    pub fn required_properties(&self) -> &[String] {
        &self.token_properties.required_token_properties
    }

    /// Expected error message fragment for `key`
    pub fn message(&self, key: ErrorMessageKey) -> Result<&str, FixtureError> {
        self.error_messages.get(key)
    }
}

/// Reads fixture files from a root directory
#[derive(Debug, Clone)]
pub struct FixtureLoader {
    root: PathBuf,
    env: Option<String>,
}

impl FixtureLoader {
    /// Loader reading from `root` with no environment overrides
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            env: None,
        }
    }

    /// Prefer files under `{root}/{env}/`
    #[must_use]
    pub fn with_env(mut self, env: Option<String>) -> Self {
        self.env = env;
        self
    }

    /// Loader for the fixtures directory and environment of `config`
    pub fn from_config(config: &SuiteConfig) -> Self {
        Self::new(&config.fixtures_dir).with_env(config.test_env.clone())
    }

    /// Fixtures root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path `relative` resolves to, honouring the environment override
    pub async fn resolve(&self, relative: &str) -> PathBuf {
        if let Some(env) = &self.env {
            let candidate = self.root.join(env).join(relative);
            if tokio::fs::try_exists(&candidate).await.unwrap_or(false) {
                return candidate;
            }
        }
        self.root.join(relative)
    }

    /// Read and parse one JSON file
    pub async fn load_json<T: DeserializeOwned>(&self, relative: &str) -> Result<T, FixtureError> {
        let path = self.resolve(relative).await;
        let load_error = |message: String| FixtureError::Load {
            path: path.display().to_string(),
            message,
        };

        let contents = tokio::fs::read(&path)
            .await
            .map_err(|e| load_error(e.to_string()))?;
        let value = serde_json::from_slice(&contents).map_err(|e| load_error(e.to_string()))?;

        debug!(path = %path.display(), "loaded fixture");
        Ok(value)
    }

    /// Read every fixture file
    pub async fn load_all(&self) -> Result<Fixtures, FixtureError> {
        let (chains, chain_types, prices, response_chains, token_properties, error_messages) = tokio::try_join!(
            self.load_json(CHAINS_FILE),
            self.load_json(CHAIN_TYPES_FILE),
            self.load_json(MIN_PRICE_USD_FILE),
            self.load_json(RESPONSE_CHAINS_FILE),
            self.load_json(TOKEN_PROPERTIES_FILE),
            self.load_json(ERROR_MESSAGES_FILE),
        )?;

        Ok(Fixtures {
            chains,
            chain_types,
            prices,
            response_chains,
            token_properties,
            error_messages,
        })
    }
}

const NOUNS: &[&str] = &[
    "anchor", "badge", "canyon", "dolphin", "engine", "falcon", "garden", "harbor", "island",
    "jacket", "kettle", "lantern", "meadow", "needle", "orchard", "pillow", "quarry", "river",
    "saddle", "tunnel", "umbrella", "valley", "window", "yacht", "zephyr",
];

const ADJECTIVES: &[&str] = &[
    "ancient", "brisk", "curious", "dusty", "eager", "fragile", "gentle", "hollow", "icy",
    "jolly", "keen", "lively", "mellow", "narrow", "odd", "polite", "quiet", "rusty", "shiny",
    "tidy", "vivid", "wary", "young", "zealous",
];

/// `count` random `noun=adjective` query parameters
///
/// Names may repeat. None of them is a parameter the tokens endpoint knows.
pub fn generate_query_params(count: usize) -> QueryParams {
    let mut rng = rand::rng();
    (0..count)
        .map(|_| {
            let noun = NOUNS.choose(&mut rng).copied().unwrap_or("anchor");
            let adjective = ADJECTIVES.choose(&mut rng).copied().unwrap_or("odd");
            (noun, adjective)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use shared_types::ChainId;

    use super::*;
    use crate::config::DEFAULT_FIXTURES_DIR;

    fn write(root: &Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, contents).unwrap();
    }

    #[tokio::test]
    async fn bundled_fixtures_load() {
        let fixtures = FixtureLoader::new(DEFAULT_FIXTURES_DIR)
            .load_all()
            .await
            .unwrap();

        assert!(!fixtures.chains.supported.is_empty());
        assert!(!fixtures.chain_types.supported.is_empty());
        assert!(!fixtures.required_properties().is_empty());
        assert!(fixtures.valid_min_price_threshold().is_ok());
        assert!(fixtures.invalid_min_price().is_ok());

        for key in [
            ErrorMessageKey::ChainTypes,
            ErrorMessageKey::Chains,
            ErrorMessageKey::MinPriceUsd,
            ErrorMessageKey::Unauthorized,
            ErrorMessageKey::RateLimited,
        ] {
            assert!(fixtures.message(key).is_ok(), "missing message for {key}");
        }

        let supported = fixtures.chains.supported.ids();
        assert!(fixtures.response_chains.supported.ids().is_superset(&supported));
    }

    #[tokio::test]
    async fn environment_file_takes_precedence() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "tokens/response_chains.json", r#"{"supported": {"Ethereum": 1}}"#);
        write(
            dir.path(),
            "staging/tokens/response_chains.json",
            r#"{"supported": {"Sepolia": 11155111}}"#,
        );

        let shared: ResponseChains = FixtureLoader::new(dir.path())
            .load_json(RESPONSE_CHAINS_FILE)
            .await
            .unwrap();
        assert_eq!(shared.supported.joined(), "1");

        let staging: ResponseChains = FixtureLoader::new(dir.path())
            .with_env(Some("staging".to_string()))
            .load_json(RESPONSE_CHAINS_FILE)
            .await
            .unwrap();
        assert_eq!(staging.supported.ids().into_iter().next(), Some(ChainId::new(11_155_111)));
    }

    #[tokio::test]
    async fn environment_without_override_falls_back_to_shared() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "error_messages.json", r#"{"Unauthorized": "Unauthorized"}"#);

        let catalog: ErrorMessageCatalog = FixtureLoader::new(dir.path())
            .with_env(Some("prod".to_string()))
            .load_json(ERROR_MESSAGES_FILE)
            .await
            .unwrap();
        assert_eq!(catalog.get(ErrorMessageKey::Unauthorized).unwrap(), "Unauthorized");
    }

    #[tokio::test]
    async fn missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();

        match FixtureLoader::new(dir.path()).load_all().await {
            Err(FixtureError::Load { path, .. }) => assert!(path.ends_with(".json")),
            other => panic!("Expected Load error, got: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_file_is_a_load_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "tokens/token_properties.json", r#"{"requiredTokenProperties": 5}"#);

        let result: Result<TokenProperties, _> = FixtureLoader::new(dir.path())
            .load_json(TOKEN_PROPERTIES_FILE)
            .await;
        match result {
            Err(err @ FixtureError::Load { .. }) => {
                assert!(err.to_string().starts_with("Error loading test data from"));
                assert!(err.to_string().contains("token_properties.json"));
            }
            other => panic!("Expected Load error, got: {other:?}"),
        }
    }

    #[test]
    fn missing_catalog_entry_is_reported() {
        let catalog = ErrorMessageCatalog::default();
        match catalog.get(ErrorMessageKey::RateLimited) {
            Err(FixtureError::MissingMessage { key }) => assert_eq!(key, "RateLimited"),
            other => panic!("Expected MissingMessage error, got: {other:?}"),
        }
    }

    #[test]
    fn min_price_fixtures_accept_strings_and_numbers() {
        let prices: PriceFixtures = serde_json::from_str(
            r#"{"validMinPriceUSD": ["0.5", 10], "invalidMinPriceUSD": ["abc", ""]}"#,
        )
        .unwrap();

        assert_eq!(prices.valid_min_price_usd[1].as_str(), "10");
        assert_eq!(prices.invalid_min_price_usd[0].threshold(), None);
    }

    #[test]
    fn generated_params_are_unknown_to_the_endpoint() {
        let params = generate_query_params(90);

        assert_eq!(params.len(), 90);
        for (name, value) in params.iter() {
            assert!(NOUNS.contains(&name));
            assert!(ADJECTIVES.contains(&value));
            assert!(!["chains", "chainTypes", "minPriceUSD"].contains(&name));
        }
        assert!(generate_query_params(0).is_empty());
    }
}
