// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! USD price values
//!
//! The tokens endpoint transmits prices as strings and the fixture files mix
//! strings and numbers, so prices are parsed leniently: the longest leading
//! decimal literal is used and anything after it is ignored. Input without
//! such a prefix has no price.

use std::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{self, Visitor},
};

/// Parse the leading decimal literal of `input`
///
/// Leading whitespace is skipped, an optional sign, digits with an optional
/// fraction and exponent are accepted, as is `Infinity`. Returns `None` when
/// no digits can be read.
pub fn parse_price(input: &str) -> Option<f64> {
    let trimmed = input.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end += 1;
    }

    let unsigned = &trimmed[end..];
    if unsigned.starts_with("Infinity") {
        let sign = if trimmed.starts_with('-') { -1.0 } else { 1.0 };
        return Some(sign * f64::INFINITY);
    }

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let literal = trimmed[..end].trim_end_matches('.');
    let normalized = match literal.strip_prefix(['+', '-']) {
        Some(rest) if rest.starts_with('.') => {
            format!("{}0{rest}", &literal[..1])
        }
        _ if literal.starts_with('.') => format!("0{literal}"),
        _ => literal.to_string(),
    };

    normalized.parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// A minimum price as written in fixtures, kept in its textual form
///
/// The text is what goes into the `minPriceUSD` query parameter; the parsed
/// value is what token prices are compared against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinPriceUsd(String);

impl MinPriceUsd {
    /// Wrap a textual price
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The value sent as the `minPriceUSD` query parameter
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric threshold, if the text holds a number at all
    pub fn threshold(&self) -> Option<f64> {
        parse_price(&self.0)
    }
}

impl fmt::Display for MinPriceUsd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for MinPriceUsd {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for MinPriceUsd {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MinPriceVisitor;

        impl Visitor<'_> for MinPriceVisitor {
            type Value = MinPriceUsd;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a price as a string or a number")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
                Ok(MinPriceUsd::new(value))
            }

            fn visit_u64<E: de::Error>(self, value: u64) -> Result<Self::Value, E> {
                Ok(MinPriceUsd::new(value.to_string()))
            }

            fn visit_i64<E: de::Error>(self, value: i64) -> Result<Self::Value, E> {
                Ok(MinPriceUsd::new(value.to_string()))
            }

            fn visit_f64<E: de::Error>(self, value: f64) -> Result<Self::Value, E> {
                Ok(MinPriceUsd::new(value.to_string()))
            }
        }

        deserializer.deserialize_any(MinPriceVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_decimals() {
        assert_eq!(parse_price("1.00"), Some(1.0));
        assert_eq!(parse_price("0"), Some(0.0));
        assert_eq!(parse_price("-2.5"), Some(-2.5));
        assert_eq!(parse_price("+3"), Some(3.0));
        assert_eq!(parse_price("1e3"), Some(1000.0));
        assert_eq!(parse_price("2.5E-1"), Some(0.25));
    }

    #[test]
    fn partial_literals() {
        assert_eq!(parse_price(".5"), Some(0.5));
        assert_eq!(parse_price("-.5"), Some(-0.5));
        assert_eq!(parse_price("5."), Some(5.0));
        assert_eq!(parse_price("  12.5abc"), Some(12.5));
        assert_eq!(parse_price("0x10"), Some(0.0));
        assert_eq!(parse_price("1e"), Some(1.0));
        assert_eq!(parse_price("1.2.3"), Some(1.2));
    }

    #[test]
    fn infinity() {
        assert_eq!(parse_price("Infinity"), Some(f64::INFINITY));
        assert_eq!(parse_price("-Infinityx"), Some(f64::NEG_INFINITY));
    }

    #[test]
    fn no_number() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price("."), None);
        assert_eq!(parse_price("-"), None);
        assert_eq!(parse_price("NaN"), None);
        assert_eq!(parse_price("e5"), None);
    }

    #[test]
    fn min_price_from_string_or_number() {
        let prices: Vec<MinPriceUsd> = serde_json::from_str(r#"["0.5", 10, -1, 2.5, "abc"]"#).unwrap();
        let texts: Vec<_> = prices.iter().map(MinPriceUsd::as_str).collect();
        assert_eq!(texts, ["0.5", "10", "-1", "2.5", "abc"]);
        assert_eq!(prices[0].threshold(), Some(0.5));
        assert_eq!(prices[4].threshold(), None);
    }
}
