// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared state of a suite run

use api_client::{ApiClient, QueryParams, Response};
use tracing::info;

use crate::{
    config::SuiteConfig,
    error::SuiteResult,
    fixtures::{FixtureLoader, Fixtures},
};

/// Path of the token listing endpoint relative to the base URL
pub const TOKENS_ENDPOINT: &str = "tokens";

/// Configuration, fixtures and the default client of a run
///
/// Nothing here changes after construction, so one context can be shared by
/// concurrently running scenarios.
#[derive(Debug, Clone)]
pub struct SuiteContext {
    config: SuiteConfig,
    fixtures: Fixtures,
    client: ApiClient,
}

impl SuiteContext {
    /// Build a context from already loaded parts
    pub fn new(config: SuiteConfig, fixtures: Fixtures) -> SuiteResult<Self> {
        let client = ApiClient::new(config.client_config())?;
        Ok(Self {
            config,
            fixtures,
            client,
        })
    }

    /// Load the fixtures `config` points at and build a context
    pub async fn load(config: SuiteConfig) -> SuiteResult<Self> {
        let loader = FixtureLoader::from_config(&config);
        let fixtures = loader.load_all().await?;
        info!(
            base_url = %config.base_url,
            fixtures = %loader.root().display(),
            test_env = ?config.test_env,
            "suite context ready"
        );
        Self::new(config, fixtures)
    }

    /// Run configuration
    pub fn config(&self) -> &SuiteConfig {
        &self.config
    }

    /// Fixture data
    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    /// Client sending the configured API key, if any
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    /// A client for the same service that sends `api_key` instead
    pub fn client_with_api_key(&self, api_key: impl Into<String>) -> SuiteResult<ApiClient> {
        let config = self.config.client_config_with_key(Some(api_key.into()));
        Ok(ApiClient::new(config)?)
    }

    /// `GET /tokens` with the default client
    pub async fn get_tokens(&self, params: &QueryParams) -> SuiteResult<Response> {
        Ok(self.client.get(TOKENS_ENDPOINT, params).await?)
    }
}
