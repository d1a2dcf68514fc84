// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0
#![allow(dead_code)]

//! Shared test setup: bundled fixtures, a fake tokens service and
//! configuration pointing at it

pub mod fake_service;

use std::collections::HashMap;

pub use fake_service::*;
use tokens_suite::{FixtureLoader, Fixtures, SuiteConfig, SuiteContext, config::DEFAULT_FIXTURES_DIR};
use wiremock::{
    Mock, MockServer,
    matchers::{method, path},
};

/// Fixture files shipped with the crate
pub async fn bundled_fixtures() -> Fixtures {
    FixtureLoader::new(DEFAULT_FIXTURES_DIR)
        .load_all()
        .await
        .unwrap()
}

/// Configuration for `server`, with extra variables applied on top
pub fn config_for(server: &MockServer, vars: &[(&str, &str)]) -> SuiteConfig {
    let mut map: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    map.insert("BASE_URL".to_string(), server.uri());
    map.insert("REQUEST_TIMEOUT_SECONDS".to_string(), "10".to_string());

    SuiteConfig::load(move |name| map.get(name).cloned(), None).unwrap()
}

/// Serve `GET /tokens` from `service`
pub async fn mount(server: &MockServer, service: FakeTokensService) {
    Mock::given(method("GET"))
        .and(path("/tokens"))
        .respond_with(service)
        .mount(server)
        .await;
}

/// Start a server running the fake service built from the bundled fixtures
/// and a context pointing at it
pub async fn fake_context(vars: &[(&str, &str)]) -> (MockServer, SuiteContext) {
    let server = MockServer::start().await;
    let fixtures = bundled_fixtures().await;
    mount(&server, FakeTokensService::from_fixtures(&fixtures)).await;

    let ctx = SuiteContext::new(config_for(&server, vars), fixtures).unwrap();
    (server, ctx)
}
