// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Non-empty string validation
//!
//! [`NonEmptyString`] guarantees at construction that a value holds at least
//! one non-whitespace character. The client uses it to reject a blank base
//! URL before any request is attempted.
//!
//! ```rust
//! use api_client::NonEmptyString;
//!
//! let base = NonEmptyString::new("https://li.quest/v1").expect("valid base URL");
//! assert_eq!(base.as_str(), "https://li.quest/v1");
//!
//! assert!(NonEmptyString::new("").is_err());
//! assert!(NonEmptyString::new(" \t\n").is_err());
//! ```

use core::fmt;
use std::str::FromStr;

/// A string with at least one non-whitespace character
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyString(Box<str>);

impl NonEmptyString {
    /// Validate and wrap `s`
    ///
    /// Leading and trailing whitespace is kept; only blank input is rejected.
    pub fn new(s: impl Into<String>) -> Result<Self, String> {
        let s = s.into();
        if s.trim().is_empty() {
            Err("String cannot be empty or whitespace-only".to_string())
        } else {
            Ok(NonEmptyString(s.into_boxed_str()))
        }
    }

    /// Borrow the contained value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NonEmptyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for NonEmptyString {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for NonEmptyString {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_padded_values() {
        let value = NonEmptyString::new(" https://example.com ").unwrap();
        assert_eq!(value.as_str(), " https://example.com ");
        assert_eq!(value.to_string(), " https://example.com ");
    }

    #[test]
    fn rejects_blank_values() {
        assert!(NonEmptyString::new("").is_err());
        assert!("   ".parse::<NonEmptyString>().is_err());
    }
}
