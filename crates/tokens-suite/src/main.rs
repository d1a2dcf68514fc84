// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Token listing API smoke run
//!
//! Runs the whole scenario catalog against the configured service and exits
//! with an error if any scenario failed.

use std::sync::Arc;

use anyhow::{Result, bail};
use tokens_suite::{Scenario, ScenarioOutcome, SuiteConfig, SuiteContext, SuiteResult};
use tokio::task::JoinSet;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SuiteConfig::from_env()?;
    info!(?config, "starting token listing smoke run");

    let ctx = Arc::new(SuiteContext::load(config).await?);

    // The rate-limit probe exhausts the quota, so it runs after everything else.
    let (probes, scenarios): (Vec<_>, Vec<_>) = Scenario::catalog(ctx.fixtures())
        .into_iter()
        .partition(|scenario| *scenario == Scenario::RateLimit);

    let mut results = Vec::new();
    let mut running = JoinSet::new();
    for scenario in scenarios {
        let ctx = Arc::clone(&ctx);
        running.spawn(async move {
            let outcome = scenario.run(&ctx).await;
            (scenario, outcome)
        });
    }
    while let Some(joined) = running.join_next().await {
        results.push(joined?);
    }
    for probe in probes {
        let outcome = probe.run(&ctx).await;
        results.push((probe, outcome));
    }

    let failed = report(&results);
    if failed > 0 {
        bail!("{failed} of {} scenarios failed", results.len());
    }
    Ok(())
}

fn report(results: &[(Scenario, SuiteResult<ScenarioOutcome>)]) -> usize {
    let mut passed = 0;
    let mut skipped = 0;
    let mut failed = 0;
    for (scenario, outcome) in results {
        match outcome {
            Ok(ScenarioOutcome::Passed) => passed += 1,
            Ok(ScenarioOutcome::Skipped { .. }) => skipped += 1,
            Err(e) => {
                failed += 1;
                error!(scenario = %scenario, error = %e, "scenario failed");
            }
        }
    }
    info!(passed, skipped, failed, "smoke run finished");
    failed
}
