// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! End-to-end checks for the token listing API
//!
//! A run is configured once ([`SuiteConfig`]), loads its fixture data
//! ([`Fixtures`]) and shares both through a [`SuiteContext`]. Every test case
//! is a [`Scenario`]; running one issues its request through `api-client` and
//! checks the response with `response-validators`.
//!
//! # Core Abstractions
//!
//! - **[`SuiteConfig`]**: base URL, API keys, timeout and rate-limit probe
//!   settings, layered from defaults, a JSON file and the environment
//! - **[`FixtureLoader`]**: reads the JSON fixture files, with per-environment
//!   overrides
//! - **[`Scenario`]**: the positive and negative test cases
//! - **[`exceed_rate_limit`]**: concurrent burst followed by a probe request

pub mod config;
pub mod context;
pub mod error;
pub mod fixtures;
pub mod rate_limit;
pub mod scenarios;

pub use config::{RateLimitConfig, SuiteConfig, TimeoutSeconds};
pub use context::{SuiteContext, TOKENS_ENDPOINT};
pub use error::{FixtureError, SuiteError, SuiteResult};
pub use fixtures::{
    ChainFixtures, ChainTypeFixtures, ErrorMessageCatalog, ErrorMessageKey, FixtureLoader,
    Fixtures, PriceFixtures, ResponseChains, TokenProperties, generate_query_params,
};
pub use rate_limit::exceed_rate_limit;
pub use scenarios::{Scenario, ScenarioOutcome};
