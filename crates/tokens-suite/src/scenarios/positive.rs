// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Requests the service must answer with a token listing

use api_client::QueryParams;
use response_validators::{
    ValidationError, validate_all_tokens_above_price, validate_status_code,
    validate_tokens_response,
};
use shared_types::{ChainId, ChainList, ChainType, TokensApiResponse, comma_joined};
use tracing::debug;

use super::ScenarioOutcome;
use crate::{context::SuiteContext, error::SuiteResult};

/// `GET /tokens?params`, then status, chain and per-token checks against
/// `expected`
async fn expect_tokens(
    ctx: &SuiteContext,
    params: &QueryParams,
    expected: &ChainList,
) -> SuiteResult<ScenarioOutcome> {
    let response = ctx.get_tokens(params).await?;
    let body =
        validate_tokens_response(response, expected, ctx.fixtures().required_properties()).await?;
    debug!(chains = body.tokens.len(), "token listing accepted");
    Ok(ScenarioOutcome::Passed)
}

/// [`expect_tokens`] against every chain a response may contain
pub(super) async fn expect_supported_tokens(
    ctx: &SuiteContext,
    params: &QueryParams,
) -> SuiteResult<ScenarioOutcome> {
    expect_tokens(ctx, params, &ctx.fixtures().response_chains.supported).await
}

pub(super) async fn no_query_parameters(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    expect_supported_tokens(ctx, &QueryParams::new()).await
}

pub(super) async fn all_query_parameters(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let fixtures = ctx.fixtures();
    let params = QueryParams::new()
        .with("chainTypes", comma_joined(&fixtures.chain_types.supported))
        .with("chains", fixtures.chains.supported.joined())
        .with("minPriceUSD", fixtures.valid_min_price()?.as_str());
    expect_supported_tokens(ctx, &params).await
}

pub(super) async fn case_insensitive_chain_types(
    ctx: &SuiteContext,
) -> SuiteResult<ScenarioOutcome> {
    let chain_types = comma_joined(&ctx.fixtures().chain_types.case_sensitive);
    expect_supported_tokens(ctx, &QueryParams::new().with("chainTypes", chain_types)).await
}

pub(super) async fn all_supported_chain_types(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let chain_types = comma_joined(&ctx.fixtures().chain_types.supported);
    debug!(%chain_types, "requesting all supported chain types");
    expect_supported_tokens(ctx, &QueryParams::new().with("chainTypes", chain_types)).await
}

pub(super) async fn all_supported_chains(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let chains = ctx.fixtures().chains.supported.joined();
    debug!(%chains, "requesting all supported chains");
    expect_supported_tokens(ctx, &QueryParams::new().with("chains", chains)).await
}

pub(super) async fn valid_min_price(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let (price, threshold) = ctx.fixtures().valid_min_price_threshold()?;
    let response = ctx
        .get_tokens(&QueryParams::new().with("minPriceUSD", price.as_str()))
        .await?;

    validate_status_code(&response, 200)?;
    let body: TokensApiResponse = response
        .json()
        .await
        .map_err(ValidationError::from)?;
    validate_all_tokens_above_price(&body.tokens, threshold)?;
    Ok(ScenarioOutcome::Passed)
}

pub(super) async fn duplicated_chain_types(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let chain_types = comma_joined(&ctx.fixtures().chain_types.duplicated);
    expect_supported_tokens(ctx, &QueryParams::new().with("chainTypes", chain_types)).await
}

pub(super) async fn duplicated_chains(ctx: &SuiteContext) -> SuiteResult<ScenarioOutcome> {
    let chains = ctx.fixtures().chains.duplicated.joined();
    expect_supported_tokens(ctx, &QueryParams::new().with("chains", chains)).await
}

pub(super) async fn single_chain(
    ctx: &SuiteContext,
    name: &str,
    chain_id: ChainId,
) -> SuiteResult<ScenarioOutcome> {
    let params = QueryParams::new().with("chains", chain_id.to_string());
    expect_tokens(ctx, &params, &ChainList::single(name, chain_id)).await
}

pub(super) async fn single_chain_type(
    ctx: &SuiteContext,
    chain_type: &ChainType,
) -> SuiteResult<ScenarioOutcome> {
    let params = QueryParams::new().with("chainTypes", chain_type.as_str());
    expect_supported_tokens(ctx, &params).await
}
