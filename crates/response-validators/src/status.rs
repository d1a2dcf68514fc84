// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Generic status code and error payload checks

use reqwest::{Response, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::error::{ValidationError, ValidationResult, describe};

/// Anything that carries an HTTP status
pub trait HasStatus {
    /// The HTTP status
    fn status_code(&self) -> StatusCode;
}

impl HasStatus for Response {
    fn status_code(&self) -> StatusCode {
        self.status()
    }
}

impl HasStatus for StatusCode {
    fn status_code(&self) -> StatusCode {
        *self
    }
}

/// Check that the response has exactly the `expected` status
pub fn validate_status_code(response: &impl HasStatus, expected: u16) -> ValidationResult<()> {
    let actual = response.status_code().as_u16();
    if actual != expected {
        return Err(ValidationError::StatusCode { expected, actual });
    }
    Ok(())
}

/// Check an error body: `message` contains `expected_message` and `code`
/// equals `expected_code`
pub fn validate_error_body(
    body: &Value,
    expected_code: i64,
    expected_message: &str,
) -> ValidationResult<()> {
    let message = body.get("message");
    if !message
        .and_then(Value::as_str)
        .is_some_and(|text| text.contains(expected_message))
    {
        return Err(ValidationError::ErrorMessage {
            expected: expected_message.to_string(),
            actual: describe(message),
        });
    }

    let code = body.get("code");
    if code.and_then(Value::as_i64) != Some(expected_code) {
        return Err(ValidationError::ErrorCode {
            expected: expected_code,
            actual: describe(code),
        });
    }

    debug!(expected_code, expected_message, "error body matches");
    Ok(())
}

/// Read the body as JSON and run [`validate_error_body`] on it
pub async fn validate_error_message_and_code(
    response: Response,
    expected_code: i64,
    expected_message: &str,
) -> ValidationResult<()> {
    let body: Value = serde_json::from_slice(&response.bytes().await?)?;
    validate_error_body(&body, expected_code, expected_message)
}

/// Status check followed by the error body check
pub async fn validate_error_response(
    response: Response,
    expected_status: u16,
    expected_code: i64,
    expected_message: &str,
) -> ValidationResult<()> {
    validate_status_code(&response, expected_status)?;
    validate_error_message_and_code(response, expected_code, expected_message).await
}
