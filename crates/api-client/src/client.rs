// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Request construction and dispatch

use std::{fmt, time::Duration};

use reqwest::{
    Client, Method, Response,
    header::{CONTENT_TYPE, HeaderValue},
};
use serde::Serialize;
use tracing::{debug, error};
use url::Url;

use crate::{ApiError, NonEmptyString, QueryParams};

/// Header carrying the API key
pub const API_KEY_HEADER: &str = "x-lifi-api-key";

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
const USER_AGENT: &str = concat!("tokens-e2e/", env!("CARGO_PKG_VERSION"));

/// Configuration for [`ApiClient`]
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL every endpoint is resolved against
    pub base_url: String,
    /// Value of the `x-lifi-api-key` header; no header when `None`
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl ClientConfig {
    /// Configuration without an API key and with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Send `api_key` with every request
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Override the request timeout
    #[must_use]
    pub fn with_timeout_seconds(mut self, timeout_seconds: u64) -> Self {
        self.timeout_seconds = timeout_seconds;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_seconds", &self.timeout_seconds)
            .finish()
    }
}

/// HTTP client for the token listing API
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
}

impl ApiClient {
    /// Create a client
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Configuration`] if the base URL is blank,
    /// [`ApiError::InvalidUrl`] if it cannot be parsed, and
    /// [`ApiError::Http`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let base_url = NonEmptyString::new(config.base_url).map_err(|_| ApiError::Configuration {
            message: "Base URL is required for API requests".to_string(),
        })?;

        let mut base_url = Url::parse(base_url.as_str().trim())?;
        // Endpoints are resolved relative to the base path, not its parent.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url,
            api_key: config.api_key,
        })
    }

    /// The normalized base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `endpoint` against the base URL and append `params`
    ///
    /// A leading `/` on the endpoint is ignored so that `tokens` and `/tokens`
    /// resolve the same way. Absolute endpoint URLs replace the base URL.
    pub fn build_url(&self, endpoint: &str, params: &QueryParams) -> Result<Url, ApiError> {
        let mut url = self.base_url.join(endpoint.trim_start_matches('/'))?;
        if !params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params.iter() {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Send a request and return the response untouched
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the URL cannot be built and
    /// [`ApiError::Http`] on transport failure. Non-2xx responses are not
    /// errors.
    pub async fn send<B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        params: &QueryParams,
    ) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let url = self.build_url(endpoint, params)?;
        debug!(%method, %url, ?params, "sending request");

        let mut request = self
            .client
            .request(method, url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &self.api_key {
            request = request.header(API_KEY_HEADER, api_key);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        request.send().await.map_err(|e| {
            error!(%url, error = %e, "request failed");
            ApiError::Http(e)
        })
    }

    /// `GET endpoint?params`
    pub async fn get(&self, endpoint: &str, params: &QueryParams) -> Result<Response, ApiError> {
        self.send::<()>(Method::GET, endpoint, None, params).await
    }

    /// `POST endpoint` with a JSON body
    pub async fn post<B>(&self, endpoint: &str, body: &B) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::POST, endpoint, Some(body), &QueryParams::new())
            .await
    }

    /// `PUT endpoint` with a JSON body
    pub async fn put<B>(&self, endpoint: &str, body: &B) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PUT, endpoint, Some(body), &QueryParams::new())
            .await
    }

    /// `PATCH endpoint` with a JSON body
    pub async fn patch<B>(&self, endpoint: &str, body: &B) -> Result<Response, ApiError>
    where
        B: Serialize + ?Sized,
    {
        self.send(Method::PATCH, endpoint, Some(body), &QueryParams::new())
            .await
    }

    /// `DELETE endpoint`
    pub async fn delete(&self, endpoint: &str) -> Result<Response, ApiError> {
        self.send::<()>(Method::DELETE, endpoint, None, &QueryParams::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(ClientConfig::new(base_url)).unwrap()
    }

    #[test]
    fn blank_base_url_is_a_configuration_error() {
        for base_url in ["", "   "] {
            match ApiClient::new(ClientConfig::new(base_url)) {
                Err(ApiError::Configuration { message }) => {
                    assert!(message.contains("Base URL is required"));
                }
                other => panic!("Expected Configuration error, got: {other:?}"),
            }
        }
    }

    #[test]
    fn unparseable_base_url_is_rejected() {
        assert!(matches!(
            ApiClient::new(ClientConfig::new("not a url")),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn endpoint_resolves_under_base_path() {
        let client = client("https://li.quest/v1");
        assert_eq!(client.base_url().as_str(), "https://li.quest/v1/");

        let params = QueryParams::new();
        assert_eq!(
            client.build_url("tokens", &params).unwrap().as_str(),
            "https://li.quest/v1/tokens"
        );
        assert_eq!(
            client.build_url("/tokens", &params).unwrap().as_str(),
            "https://li.quest/v1/tokens"
        );
    }

    #[test]
    fn absolute_endpoint_replaces_base() {
        let client = client("https://li.quest/v1");
        let url = client
            .build_url("https://staging.li.quest/v1/tokens", &QueryParams::new())
            .unwrap();
        assert_eq!(url.as_str(), "https://staging.li.quest/v1/tokens");
    }

    #[test]
    fn query_parameters_keep_order_and_encoding() {
        let client = client("https://li.quest/v1/");
        let params = QueryParams::new()
            .with("chains", "137,1")
            .with("minPriceUSD", "0.5")
            .with("chains", "1 OR 1=1");

        let url = client.build_url("tokens", &params).unwrap();
        assert_eq!(
            url.as_str(),
            "https://li.quest/v1/tokens?chains=137%2C1&minPriceUSD=0.5&chains=1+OR+1%3D1"
        );
    }

    #[test]
    fn config_debug_redacts_api_key() {
        let config = ClientConfig::new("https://li.quest/v1").with_api_key("secret-key");
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<redacted>"));
    }
}
