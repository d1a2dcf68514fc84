// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP client wrapper for the token listing API
//!
//! This crate sends one request at a time and hands back the raw
//! [`reqwest::Response`]. It never interprets status codes; that is the job of
//! the validators.
//!
//! # Core Abstractions
//!
//! - **[`ApiClient`]**: builds URLs against a base URL and issues GET, POST,
//!   PUT, PATCH and DELETE with the JSON content type and optional API key
//! - **[`ClientConfig`]**: base URL, API key and request timeout
//! - **[`QueryParams`]**: ordered query parameters, duplicates allowed
//! - **[`ApiError`]**: configuration, URL and transport failures

use thiserror::Error;

pub mod client;
pub mod non_empty_string;
pub mod query;

pub use client::{API_KEY_HEADER, ApiClient, ClientConfig};
pub use non_empty_string::NonEmptyString;
pub use query::QueryParams;
pub use reqwest::{Method, Response, StatusCode};

/// Errors raised while building or sending a request
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum ApiError {
    /// Client configuration is unusable
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Base URL or endpoint could not be parsed or joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level failure, propagated as is
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
}
