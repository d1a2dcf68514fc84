// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Requests the service must refuse, plus unknown parameters it must ignore

use api_client::QueryParams;
use response_validators::validate_error_response;
use shared_types::{ChainType, MinPriceUsd, comma_joined};
use tracing::debug;

use super::{INVALID_QUERY_VALUE_CODE, ScenarioOutcome, UNKNOWN_PARAMETER_COUNT, positive};
use crate::{
    context::{SuiteContext, TOKENS_ENDPOINT},
    error::SuiteResult,
    fixtures::{ErrorMessageKey, generate_query_params},
    rate_limit::exceed_rate_limit,
};

const UNAUTHORIZED_CODE: u16 = 401;

/// `GET /tokens?params` must fail with 400, code 1011 and the catalog
/// message for `key`
async fn expect_invalid_query(
    ctx: &SuiteContext,
    params: &QueryParams,
    key: ErrorMessageKey,
) -> SuiteResult<ScenarioOutcome> {
    let message = ctx.fixtures().message(key)?;
    let response = ctx.get_tokens(params).await?;
    validate_error_response(response, 400, INVALID_QUERY_VALUE_CODE, message).await?;
    Ok(ScenarioOutcome::Passed)
}

async fn expect_unauthorized(ctx: &SuiteContext, api_key: &str) -> SuiteResult<ScenarioOutcome> {
    let message = ctx.fixtures().message(ErrorMessageKey::Unauthorized)?;
    let client = ctx.client_with_api_key(api_key)?;
    let response = client.get(TOKENS_ENDPOINT, &QueryParams::new()).await?;
    validate_error_response(
        response,
        UNAUTHORIZED_CODE,
        i64::from(UNAUTHORIZED_CODE),
        message,
    )
    .await?;
    Ok(ScenarioOutcome::Passed)
}

fn chain_types_query(chain_types: &[ChainType]) -> QueryParams {
    QueryParams::new().with("chainTypes", comma_joined(chain_types))
}

pub(super) async fn unsupported_chain_type_single(
    ctx: &SuiteContext,
) -> SuiteResult<ScenarioOutcome> {
    let params = chain_types_query(&ctx.fixtures().chain_types.not_supported_single);
    expect_invalid_query(ctx, &params, ErrorMessageKey::ChainTypes).await
}

pub(super) async fn unsupported_chain_types_mixed(
    ctx: &SuiteContext,
) -> SuiteResult<ScenarioOutcome> {
    let params = chain_types_query(&ctx.fixtures().chain_types.not_supported_mix_valid_and_invalid);
    expect_invalid_query(ctx, &params, ErrorMessageKey::ChainTypes).await
}

pub(super) async fn unsupported_chain_types_multiple(
    ctx: &SuiteContext,
) -> SuiteResult<ScenarioOutcome> {
    let params = chain_types_query(&ctx.fixtures().chain_types.not_supported_multiple);
    expect_invalid_query(ctx, &params, ErrorMessageKey::ChainTypes).await
}

pub(super) async fn unsupported_chain_single(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let chains = ctx.fixtures().chains.not_supported_single.joined();
    expect_invalid_query(ctx, &QueryParams::new().with("chains", chains), ErrorMessageKey::Chains)
        .await
}

pub(super) async fn unsupported_chains_multiple(
    ctx: &SuiteContext,
) -> SuiteResult<ScenarioOutcome> {
    let chains = ctx.fixtures().chains.not_supported_multiple.joined();
    expect_invalid_query(ctx, &QueryParams::new().with("chains", chains), ErrorMessageKey::Chains)
        .await
}

pub(super) async fn unsupported_chains_mixed(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let chains = ctx.fixtures().chains.mix_supported_and_not_supported.joined();
    expect_invalid_query(ctx, &QueryParams::new().with("chains", chains), ErrorMessageKey::Chains)
        .await
}

pub(super) async fn invalid_min_price(
    ctx: &SuiteContext,
    price: &MinPriceUsd,
) -> SuiteResult<ScenarioOutcome> {
    let params = QueryParams::new().with("minPriceUSD", price.as_str());
    expect_invalid_query(ctx, &params, ErrorMessageKey::MinPriceUsd).await
}

pub(super) async fn all_parameters_invalid(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let fixtures = ctx.fixtures();
    let params = QueryParams::new()
        .with("minPriceUSD", fixtures.invalid_min_price()?.as_str())
        .with(
            "chainTypes",
            comma_joined(&fixtures.chain_types.not_supported_single),
        )
        .with("chains", fixtures.chains.not_supported_single.joined());
    expect_invalid_query(ctx, &params, ErrorMessageKey::Chains).await
}

pub(super) async fn invalid_chains_with_valid_price(
    ctx: &SuiteContext,
) -> SuiteResult<ScenarioOutcome> {
    let fixtures = ctx.fixtures();
    let params = QueryParams::new()
        .with("minPriceUSD", fixtures.valid_min_price()?.as_str())
        .with(
            "chainTypes",
            comma_joined(&fixtures.chain_types.not_supported_single),
        )
        .with("chains", fixtures.chains.not_supported_single.joined());
    expect_invalid_query(ctx, &params, ErrorMessageKey::Chains).await
}

pub(super) async fn unknown_query_parameters(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let params = generate_query_params(UNKNOWN_PARAMETER_COUNT);
    debug!(?params, "sending unknown query parameters");
    positive::expect_supported_tokens(ctx, &params).await
}

pub(super) async fn sql_injection(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let chains = ctx.fixtures().chains.sql_injection.joined();
    expect_invalid_query(ctx, &QueryParams::new().with("chains", chains), ErrorMessageKey::Chains)
        .await
}

pub(super) async fn xss_injection(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let chains = ctx.fixtures().chains.xss_injection.joined();
    expect_invalid_query(ctx, &QueryParams::new().with("chains", chains), ErrorMessageKey::Chains)
        .await
}

pub(super) async fn invalid_api_key(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let api_key = ctx.config().invalid_api_key.clone().unwrap_or_default();
    expect_unauthorized(ctx, &api_key).await
}

pub(super) async fn expired_api_key(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let api_key = ctx.config().expired_api_key.clone().unwrap_or_default();
    expect_unauthorized(ctx, &api_key).await
}

pub(super) async fn rate_limit(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let settings = ctx.config().rate_limit;
    if !settings.enabled {
        return Ok(ScenarioOutcome::Skipped {
            reason: "rate-limit probe disabled, set RATE_LIMIT_TEST_ENABLED=true to run it"
                .to_string(),
        });
    }

    let message = ctx.fixtures().message(ErrorMessageKey::RateLimited)?;
    exceed_rate_limit(ctx.client(), settings.request_count, message).await?;
    Ok(ScenarioOutcome::Passed)
}
