// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Rate-limit probe
//!
//! Sends a burst of concurrent requests that must all succeed, then one more
//! that must be refused with 429.

use api_client::{ApiClient, QueryParams};
use response_validators::{validate_error_response, validate_status_code};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::{context::TOKENS_ENDPOINT, error::SuiteResult};

/// Status and error code of a rate-limited response
pub const RATE_LIMITED_CODE: u16 = 429;

/// Exhaust the quota with `request_count` requests and expect the next one to
/// be rate limited
///
/// Every request of the burst must return 200. The probe response must be
/// 429 with error code 429 and a message containing `rate_limited_message`.
pub async fn exceed_rate_limit(
    client: &ApiClient,
    request_count: usize,
    rate_limited_message: &str,
) -> SuiteResult<()> {
    info!(request_count, "sending request burst");

    let mut burst = JoinSet::new();
    for _ in 0..request_count {
        let client = client.clone();
        burst.spawn(async move { client.get(TOKENS_ENDPOINT, &QueryParams::new()).await });
    }

    let mut completed = 0_usize;
    while let Some(joined) = burst.join_next().await {
        let response = joined??;
        validate_status_code(&response, 200)?;
        completed += 1;
        debug!(completed, "burst request succeeded");
    }

    info!(completed, "burst accepted, sending probe request");
    let probe = client.get(TOKENS_ENDPOINT, &QueryParams::new()).await?;
    validate_error_response(
        probe,
        RATE_LIMITED_CODE,
        i64::from(RATE_LIMITED_CODE),
        rate_limited_message,
    )
    .await?;

    info!("probe request was rate limited");
    Ok(())
}
