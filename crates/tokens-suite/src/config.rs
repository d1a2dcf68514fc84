// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Suite configuration
//!
//! Values are layered with the `config` crate: built-in defaults, then an
//! optional JSON file, then environment variables. Empty variables are
//! treated as unset.

use std::{
    fmt,
    path::{Path, PathBuf},
    time::Duration,
};

use api_client::ClientConfig;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Deserializer, de};

use crate::error::{SuiteError, SuiteResult};

/// Base URL used when `BASE_URL` is not set
pub const DEFAULT_BASE_URL: &str = "https://li.quest/v1";

/// Config file looked up in the working directory when `SUITE_CONFIG` is not set
pub const DEFAULT_CONFIG_FILE: &str = "tokens-suite.json";

/// Fixture files shipped with this crate
pub const DEFAULT_FIXTURES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

/// Environment variable to configuration key
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("BASE_URL", "base_url"),
    ("X_LIFI_API_KEY", "api_key"),
    ("INVALID_API_KEY", "invalid_api_key"),
    ("EXPIRED_API_KEY", "expired_api_key"),
    ("TEST_ENV", "test_env"),
    ("FIXTURES_DIR", "fixtures_dir"),
    ("REQUEST_TIMEOUT_SECONDS", "timeout_seconds"),
    ("RATE_LIMIT_TEST_ENABLED", "rate_limit.enabled"),
    ("RATE_LIMIT_REQUEST_COUNT", "rate_limit.request_count"),
];

/// A validated timeout duration in seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutSeconds(Duration);

impl TimeoutSeconds {
    /// Create a new `TimeoutSeconds`, ensuring the value is within 1..=300
    pub fn new(seconds: u64) -> SuiteResult<Self> {
        if !(1..=300).contains(&seconds) {
            return Err(SuiteError::Config {
                message: format!("timeout must be between 1 and 300 seconds, got {seconds}"),
            });
        }
        Ok(Self(Duration::from_secs(seconds)))
    }

    /// Get the timeout value
    pub fn value(&self) -> Duration {
        self.0
    }
}

impl Default for TimeoutSeconds {
    fn default() -> Self {
        Self(Duration::from_secs(30))
    }
}

impl<'de> Deserialize<'de> for TimeoutSeconds {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let seconds = u64::deserialize(deserializer)?;
        Self::new(seconds).map_err(|e| de::Error::custom(e.to_string()))
    }
}

/// Settings of the rate-limit probe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RateLimitConfig {
    /// Run the probe at all; it burns through the caller's quota
    pub enabled: bool,
    /// Requests sent before the probe request
    pub request_count: usize,
}

/// Configuration for one suite run
#[derive(Clone, Deserialize)]
pub struct SuiteConfig {
    /// Base URL of the API under test
    pub base_url: String,
    /// Key sent with regular requests
    pub api_key: Option<String>,
    /// Key the service must reject as invalid
    pub invalid_api_key: Option<String>,
    /// Key the service must reject as expired
    pub expired_api_key: Option<String>,
    /// Selects `{fixtures_dir}/{test_env}/` overrides
    pub test_env: Option<String>,
    /// Root of the fixture files
    pub fixtures_dir: PathBuf,
    /// Request timeout
    pub timeout_seconds: TimeoutSeconds,
    /// Rate-limit probe settings
    pub rate_limit: RateLimitConfig,
}

impl SuiteConfig {
    /// Load configuration from the process environment
    ///
    /// A `.env` file in the working directory is read first. `SUITE_CONFIG`
    /// names the config file; without it `tokens-suite.json` is used when
    /// present.
    pub fn from_env() -> SuiteResult<Self> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();

        let lookup = |name: &str| std::env::var(name).ok();
        let file = lookup("SUITE_CONFIG")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);
        Self::load(lookup, file.as_deref())
    }

    /// Load configuration with variables resolved through `lookup`
    ///
    /// When `file` is given it must exist; otherwise the default config file
    /// is optional.
    pub fn load<F>(lookup: F, file: Option<&Path>) -> SuiteResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::build(&lookup, file).map_err(|e| SuiteError::Config {
            message: format!("failed to load configuration: {e}"),
        })
    }

    fn build<F>(lookup: &F, file: Option<&Path>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let mut builder = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("fixtures_dir", DEFAULT_FIXTURES_DIR)?
            .set_default("timeout_seconds", 30)?
            .set_default("rate_limit.enabled", false)?
            .set_default("rate_limit.request_count", 100)?
            .add_source(file_source);

        for (variable, key) in ENV_OVERRIDES {
            let value = lookup(variable).filter(|value| !value.trim().is_empty());
            builder = builder.set_override_option(*key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Client configuration carrying the regular API key
    pub fn client_config(&self) -> ClientConfig {
        self.client_config_with_key(self.api_key.clone())
    }

    /// Client configuration carrying `api_key` instead of the regular one
    pub fn client_config_with_key(&self, api_key: Option<String>) -> ClientConfig {
        let config = ClientConfig::new(self.base_url.clone())
            .with_timeout_seconds(self.timeout_seconds.value().as_secs());
        match api_key {
            Some(key) => config.with_api_key(key),
            None => config,
        }
    }
}

impl fmt::Debug for SuiteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redacted = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("SuiteConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &redacted(&self.api_key))
            .field("invalid_api_key", &redacted(&self.invalid_api_key))
            .field("expired_api_key", &redacted(&self.expired_api_key))
            .field("test_env", &self.test_env)
            .field("fixtures_dir", &self.fixtures_dir)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("rate_limit", &self.rate_limit)
            .finish()
    }
}
