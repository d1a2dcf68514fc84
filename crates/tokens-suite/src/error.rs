// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for suite runs

use api_client::ApiError;
use response_validators::ValidationError;
use thiserror::Error;

/// Result type alias for suite operations
pub type SuiteResult<T> = Result<T, SuiteError>;

/// Fixture files could not be used
#[derive(Error, Debug)]
pub enum FixtureError {
    /// A file is missing, unreadable or not the expected JSON
    #[error("Error loading test data from {path}: {message}")]
    Load {
        /// File that failed
        path: String,
        /// Underlying IO or parse error
        message: String,
    },

    /// The error message catalog has no entry for a key
    #[error("Error message catalog has no entry for {key}")]
    MissingMessage {
        /// Catalog key
        key: String,
    },

    /// A fixture list a scenario draws from is empty
    #[error("Fixture list {name} is empty")]
    Empty {
        /// Name of the list as it appears in the file
        name: &'static str,
    },

    /// A fixture value that must be numeric is not
    #[error("Fixture value {value:?} in {name} is not a number")]
    NotNumeric {
        /// Name of the list as it appears in the file
        name: &'static str,
        /// Offending value
        value: String,
    },
}

/// Anything that makes a scenario or the suite itself fail
#[derive(Error, Debug)]
pub enum SuiteError {
    /// Configuration validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error message
        message: String,
    },

    /// Fixture loading errors
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    /// Request could not be built or sent
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Response did not satisfy a check
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Task join errors for concurrent requests
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}
