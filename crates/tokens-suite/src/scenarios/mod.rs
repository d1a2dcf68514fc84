// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Scenario catalog
//!
//! Each [`Scenario`] is one request against `GET /tokens` plus the checks its
//! response must pass. Cases that depend on fixture entries are expanded per
//! entry by [`Scenario::catalog`].

use std::fmt;

use shared_types::{ChainId, ChainType, MinPriceUsd};
use tracing::{info, warn};

use crate::{context::SuiteContext, error::SuiteResult, fixtures::Fixtures};

mod negative;
mod positive;

/// Error code the service uses for invalid or unsupported query values
pub const INVALID_QUERY_VALUE_CODE: i64 = 1011;

/// Number of random parameters sent by [`Scenario::UnknownQueryParameters`]
pub const UNKNOWN_PARAMETER_COUNT: usize = 90;

/// How a scenario ended when it did not fail
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScenarioOutcome {
    /// Every check passed
    Passed,
    /// The scenario is disabled by configuration
    Skipped {
        /// Why it did not run
        reason: String,
    },
}

/// A single test case
#[derive(Debug, Clone, PartialEq)]
pub enum Scenario {
    /// No query parameters
    NoQueryParameters,
    /// Every supported chain type and chain plus a valid price
    AllQueryParameters,
    /// Supported chain types in non-canonical case
    CaseInsensitiveChainTypes,
    /// Every supported chain type at once
    AllSupportedChainTypes,
    /// Every supported chain at once
    AllSupportedChains,
    /// Valid `minPriceUSD`; every returned token must be priced above it
    ValidMinPriceUsd,
    /// Supported chain types listed more than once
    DuplicatedChainTypes,
    /// Supported chains listed more than once
    DuplicatedChains,
    /// One supported chain; only that chain may come back
    SingleChain {
        /// Fixture name of the chain
        name: String,
        /// Chain ID sent
        chain_id: ChainId,
    },
    /// One supported chain type
    SingleChainType(ChainType),

    /// One unsupported chain type
    UnsupportedChainTypeSingle,
    /// Supported and unsupported chain types together
    UnsupportedChainTypesMixed,
    /// Several unsupported chain types
    UnsupportedChainTypesMultiple,
    /// One unsupported chain
    UnsupportedChainSingle,
    /// Several unsupported chains
    UnsupportedChainsMultiple,
    /// Supported and unsupported chains together
    UnsupportedChainsMixed,
    /// One invalid `minPriceUSD`
    InvalidMinPriceUsd(MinPriceUsd),
    /// Invalid chain, chain type and price; the chain error wins
    AllParametersInvalid,
    /// Invalid chain and chain type with a valid price
    InvalidChainsWithValidPrice,
    /// Random parameters the endpoint does not know; they are ignored
    UnknownQueryParameters,
    /// SQL injection in `chains`
    SqlInjection,
    /// Script injection in `chains`
    XssInjection,
    /// Invalid API key
    InvalidApiKey,
    /// Expired API key
    ExpiredApiKey,
    /// Burst of requests followed by one that must be rate limited
    RateLimit,
}

impl Scenario {
    /// Every scenario, positive cases first
    pub fn catalog(fixtures: &Fixtures) -> Vec<Self> {
        let mut scenarios = Self::positive(fixtures);
        scenarios.extend(Self::negative(fixtures));
        scenarios
    }

    /// Scenarios expecting a 200 response
    pub fn positive(fixtures: &Fixtures) -> Vec<Self> {
        let mut scenarios = vec![
            Self::NoQueryParameters,
            Self::AllQueryParameters,
            Self::CaseInsensitiveChainTypes,
            Self::AllSupportedChainTypes,
            Self::AllSupportedChains,
            Self::ValidMinPriceUsd,
            Self::DuplicatedChainTypes,
            Self::DuplicatedChains,
        ];
        scenarios.extend(
            fixtures
                .chains
                .supported
                .iter()
                .map(|(name, chain_id)| Self::SingleChain {
                    name: name.to_string(),
                    chain_id: *chain_id,
                }),
        );
        scenarios.extend(
            fixtures
                .chain_types
                .supported
                .iter()
                .cloned()
                .map(Self::SingleChainType),
        );
        scenarios
    }

    /// Scenarios expecting the request to be refused
    ///
    /// [`Scenario::UnknownQueryParameters`] is listed here although it
    /// expects 200.
    pub fn negative(fixtures: &Fixtures) -> Vec<Self> {
        let mut scenarios = vec![
            Self::UnsupportedChainTypeSingle,
            Self::UnsupportedChainTypesMixed,
            Self::UnsupportedChainTypesMultiple,
            Self::UnsupportedChainSingle,
            Self::UnsupportedChainsMultiple,
            Self::UnsupportedChainsMixed,
        ];
        scenarios.extend(
            fixtures
                .prices
                .invalid_min_price_usd
                .iter()
                .cloned()
                .map(Self::InvalidMinPriceUsd),
        );
        scenarios.extend([
            Self::AllParametersInvalid,
            Self::InvalidChainsWithValidPrice,
            Self::UnknownQueryParameters,
            Self::SqlInjection,
            Self::XssInjection,
            Self::InvalidApiKey,
            Self::ExpiredApiKey,
            Self::RateLimit,
        ]);
        scenarios
    }

    /// Human-readable name, unique within a catalog
    pub fn name(&self) -> String {
        self.to_string()
    }

    /// Run the request and its checks
    ///
    /// The first failed check ends the scenario with its error.
    pub async fn run(&self, ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
        let outcome = match self {
            Self::NoQueryParameters => positive::no_query_parameters(ctx).await,
            Self::AllQueryParameters => positive::all_query_parameters(ctx).await,
            Self::CaseInsensitiveChainTypes => positive::case_insensitive_chain_types(ctx).await,
            Self::AllSupportedChainTypes => positive::all_supported_chain_types(ctx).await,
            Self::AllSupportedChains => positive::all_supported_chains(ctx).await,
            Self::ValidMinPriceUsd => positive::valid_min_price(ctx).await,
            Self::DuplicatedChainTypes => positive::duplicated_chain_types(ctx).await,
            Self::DuplicatedChains => positive::duplicated_chains(ctx).await,
            Self::SingleChain { name, chain_id } => {
                positive::single_chain(ctx, name, *chain_id).await
            }
            Self::SingleChainType(chain_type) => positive::single_chain_type(ctx, chain_type).await,
            Self::UnsupportedChainTypeSingle => negative::unsupported_chain_type_single(ctx).await,
            Self::UnsupportedChainTypesMixed => negative::unsupported_chain_types_mixed(ctx).await,
            Self::UnsupportedChainTypesMultiple => {
                negative::unsupported_chain_types_multiple(ctx).await
            }
            Self::UnsupportedChainSingle => negative::unsupported_chain_single(ctx).await,
            Self::UnsupportedChainsMultiple => negative::unsupported_chains_multiple(ctx).await,
            Self::UnsupportedChainsMixed => negative::unsupported_chains_mixed(ctx).await,
            Self::InvalidMinPriceUsd(price) => negative::invalid_min_price(ctx, price).await,
            Self::AllParametersInvalid => negative::all_parameters_invalid(ctx).await,
            Self::InvalidChainsWithValidPrice => {
                negative::invalid_chains_with_valid_price(ctx).await
            }
            Self::UnknownQueryParameters => negative::unknown_query_parameters(ctx).await,
            Self::SqlInjection => negative::sql_injection(ctx).await,
            Self::XssInjection => negative::xss_injection(ctx).await,
            Self::InvalidApiKey => negative::invalid_api_key(ctx).await,
            Self::ExpiredApiKey => negative::expired_api_key(ctx).await,
            Self::RateLimit => negative::rate_limit(ctx).await,
        }?;

        match &outcome {
            ScenarioOutcome::Passed => info!(scenario = %self, "scenario passed"),
            ScenarioOutcome::Skipped { reason } => {
                warn!(scenario = %self, reason, "scenario skipped");
            }
        }
        Ok(outcome)
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoQueryParameters => write!(f, "GET /tokens without query parameters"),
            Self::AllQueryParameters => write!(f, "GET /tokens with all query parameters"),
            Self::CaseInsensitiveChainTypes => write!(f, "GET /tokens with mixed-case chainTypes"),
            Self::AllSupportedChainTypes => write!(f, "GET /tokens with all supported chainTypes"),
            Self::AllSupportedChains => write!(f, "GET /tokens with all supported chains"),
            Self::ValidMinPriceUsd => write!(f, "GET /tokens with a valid minPriceUSD"),
            Self::DuplicatedChainTypes => write!(f, "GET /tokens with duplicated chainTypes"),
            Self::DuplicatedChains => write!(f, "GET /tokens with duplicated chains"),
            Self::SingleChain { name, chain_id } => {
                write!(f, "GET /tokens for chain {name} ({chain_id})")
            }
            Self::SingleChainType(chain_type) => {
                write!(f, "GET /tokens for chainType {chain_type}")
            }
            Self::UnsupportedChainTypeSingle => {
                write!(f, "GET /tokens with an unsupported chainType")
            }
            Self::UnsupportedChainTypesMixed => {
                write!(f, "GET /tokens with supported and unsupported chainTypes")
            }
            Self::UnsupportedChainTypesMultiple => {
                write!(f, "GET /tokens with multiple unsupported chainTypes")
            }
            Self::UnsupportedChainSingle => write!(f, "GET /tokens with an unsupported chain"),
            Self::UnsupportedChainsMultiple => {
                write!(f, "GET /tokens with multiple unsupported chains")
            }
            Self::UnsupportedChainsMixed => {
                write!(f, "GET /tokens with supported and unsupported chains")
            }
            Self::InvalidMinPriceUsd(price) => {
                write!(f, "GET /tokens with invalid minPriceUSD \"{price}\"")
            }
            Self::AllParametersInvalid => write!(f, "GET /tokens with every parameter invalid"),
            Self::InvalidChainsWithValidPrice => {
                write!(f, "GET /tokens with invalid chains and a valid minPriceUSD")
            }
            Self::UnknownQueryParameters => write!(f, "GET /tokens with unknown query parameters"),
            Self::SqlInjection => write!(f, "GET /tokens with SQL injection in chains"),
            Self::XssInjection => write!(f, "GET /tokens with XSS injection in chains"),
            Self::InvalidApiKey => write!(f, "GET /tokens with an invalid API key"),
            Self::ExpiredApiKey => write!(f, "GET /tokens with an expired API key"),
            Self::RateLimit => write!(f, "GET /tokens beyond the rate limit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::{config::DEFAULT_FIXTURES_DIR, fixtures::FixtureLoader};

    use super::*;

    async fn fixtures() -> Fixtures {
        FixtureLoader::new(DEFAULT_FIXTURES_DIR)
            .load_all()
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn catalog_expands_fixture_entries() {
        let fixtures = fixtures().await;
        let catalog = Scenario::catalog(&fixtures);

        let single_chains = catalog
            .iter()
            .filter(|s| matches!(s, Scenario::SingleChain { .. }))
            .count();
        assert_eq!(single_chains, fixtures.chains.supported.len());

        let single_types = catalog
            .iter()
            .filter(|s| matches!(s, Scenario::SingleChainType(_)))
            .count();
        assert_eq!(single_types, fixtures.chain_types.supported.len());

        let invalid_prices = catalog
            .iter()
            .filter(|s| matches!(s, Scenario::InvalidMinPriceUsd(_)))
            .count();
        assert_eq!(invalid_prices, fixtures.prices.invalid_min_price_usd.len());

        assert_eq!(
            catalog.len(),
            Scenario::positive(&fixtures).len() + Scenario::negative(&fixtures).len()
        );
    }

    #[tokio::test]
    async fn scenario_names_are_unique() {
        let catalog = Scenario::catalog(&fixtures().await);
        let names: HashSet<String> = catalog.iter().map(Scenario::name).collect();
        assert_eq!(names.len(), catalog.len());
    }

    #[test]
    fn names_describe_the_request() {
        let scenario = Scenario::SingleChain {
            name: "Polygon".to_string(),
            chain_id: ChainId::new(137),
        };
        assert_eq!(scenario.name(), "GET /tokens for chain Polygon (137)");
        assert_eq!(
            Scenario::InvalidMinPriceUsd(MinPriceUsd::new("abc")).name(),
            "GET /tokens with invalid minPriceUSD \"abc\""
        );
    }
}
