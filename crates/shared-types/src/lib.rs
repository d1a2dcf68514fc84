// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Shared types for the token listing test suite
//!
//! This crate holds the wire payloads of the tokens endpoint and the value
//! types fixture files are made of, so that the client, the validators and
//! the suite agree on one representation.

pub mod chains;
pub mod price;
pub mod token;

pub use chains::{ChainId, ChainIdParseError, ChainList, ChainType, NamedList, comma_joined};
pub use price::{MinPriceUsd, parse_price};
pub use token::{ErrorBody, Token, TokensApiResponse};
