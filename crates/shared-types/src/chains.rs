// SPDX-FileCopyrightText: 2025 Semiotic Labs
//
// SPDX-License-Identifier: Apache-2.0

//! Blockchain chain identifiers and fixture chain lists
//!
//! Chain IDs are not hardcoded here: the set of supported chains comes from
//! fixture data, so [`ChainId`] is an open numeric identifier and
//! [`NamedList`] keeps the human-readable names attached to it.

use std::{
    collections::BTreeSet,
    fmt::{self, Display},
    marker::PhantomData,
    str::FromStr,
};

use serde::{
    Deserialize, Deserializer, Serialize,
    de::{MapAccess, Visitor},
};

/// Numeric identifier of a blockchain network
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainId(u64);

impl ChainId {
    /// Wrap a numeric chain ID
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the numeric chain ID
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = ChainIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ChainIdParseError::NotNumeric(s.to_string()))
    }
}

/// Error type for chain ID parsing
#[derive(Debug, thiserror::Error)]
pub enum ChainIdParseError {
    /// The value is not a non-negative integer
    #[error("chain ID is not numeric: {0}")]
    NotNumeric(String),
}

/// Abbreviation of a chain category, e.g. `EVM` or `SVM`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainType(String);

impl ChainType {
    /// Create a chain type from its abbreviation
    pub fn new(abbreviation: impl Into<String>) -> Self {
        Self(abbreviation.into())
    }

    /// The abbreviation as sent on the wire
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ChainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Join values with `,` the way list query parameters are encoded
pub fn comma_joined<I>(values: I) -> String
where
    I: IntoIterator,
    I::Item: Display,
{
    values
        .into_iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Ordered `name -> value` mapping as found in fixture files
///
/// Unlike a `HashMap`, entries keep the order of the source document and
/// duplicate values are allowed, which matters when the values are joined
/// into a query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedList<T> {
    entries: Vec<(String, T)>,
}

/// Chain names mapped to their numeric IDs
pub type ChainList = NamedList<ChainId>;

impl<T> NamedList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Create a list with a single entry
    pub fn single(name: impl Into<String>, value: T) -> Self {
        Self {
            entries: vec![(name.into(), value)],
        }
    }

    /// Append an entry, keeping existing ones
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: T) -> Self {
        self.entries.push((name.into(), value));
        self
    }

    /// Iterate over `(name, value)` pairs in document order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Iterate over the values in document order
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, value)| value)
    }

    /// Number of entries, duplicates included
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: Display> NamedList<T> {
    /// All values joined with `,` in document order
    pub fn joined(&self) -> String {
        comma_joined(self.values())
    }
}

impl NamedList<ChainId> {
    /// Distinct chain IDs contained in the list
    pub fn ids(&self) -> BTreeSet<ChainId> {
        self.values().copied().collect()
    }
}

impl<T> Default for NamedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: Into<String>, T> FromIterator<(N, T)> for NamedList<T> {
    fn from_iter<I: IntoIterator<Item = (N, T)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        }
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for NamedList<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct NamedListVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for NamedListVisitor<T> {
            type Value = NamedList<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                write!(formatter, "a map of names to values")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, value)) = map.next_entry::<String, T>()? {
                    entries.push((name, value));
                }
                Ok(NamedList { entries })
            }
        }

        deserializer.deserialize_map(NamedListVisitor(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chain_id_from_str() {
        assert_eq!(ChainId::from_str("137").unwrap(), ChainId::new(137));
        assert_eq!(ChainId::from_str(" 1 ").unwrap(), ChainId::new(1));
        assert!(ChainId::from_str("polygon").is_err());
        assert!(ChainId::from_str("-1").is_err());
        assert!(ChainId::from_str("").is_err());
    }

    #[test]
    fn chain_id_serializes_as_number() {
        assert_eq!(serde_json::to_string(&ChainId::new(137)).unwrap(), "137");
        let parsed: ChainId = serde_json::from_str("1151111081099710").unwrap();
        assert_eq!(parsed.value(), 1_151_111_081_099_710);
    }

    #[test]
    fn chain_list_keeps_document_order() {
        let list: ChainList =
            serde_json::from_str(r#"{"Polygon": 137, "Ethereum": 1, "Base": 8453}"#).unwrap();

        let names: Vec<_> = list.iter().map(|(name, _)| name).collect();
        assert_eq!(names, ["Polygon", "Ethereum", "Base"]);
        assert_eq!(list.joined(), "137,1,8453");
    }

    #[test]
    fn chain_list_duplicates_are_kept_but_ids_are_distinct() {
        let list: ChainList =
            serde_json::from_str(r#"{"Ethereum": 1, "Mainnet": 1, "Polygon": 137}"#).unwrap();

        assert_eq!(list.len(), 3);
        assert_eq!(list.joined(), "1,1,137");
        assert_eq!(
            list.ids().into_iter().collect::<Vec<_>>(),
            [ChainId::new(1), ChainId::new(137)]
        );
    }

    #[test]
    fn raw_value_list_deserializes_strings() {
        let list: NamedList<String> =
            serde_json::from_str(r#"{"drop": "1; DROP TABLE tokens"}"#).unwrap();
        assert_eq!(list.joined(), "1; DROP TABLE tokens");
    }

    #[test]
    fn chain_list_rejects_non_numeric_values() {
        assert!(serde_json::from_str::<ChainList>(r#"{"Polygon": "137"}"#).is_err());
        assert!(serde_json::from_str::<ChainList>("[137]").is_err());
    }

    #[test]
    fn comma_joined_chain_types() {
        let types = [ChainType::new("EVM"), ChainType::new("SVM")];
        assert_eq!(comma_joined(&types), "EVM,SVM");
        assert_eq!(comma_joined(Vec::<ChainType>::new()), "");
    }

    #[test]
    fn single_and_with_build_lists() {
        let list = ChainList::single("Polygon", ChainId::new(137)).with("Base", ChainId::new(8453));
        assert_eq!(list.joined(), "137,8453");
        assert!(!list.is_empty());
        assert!(ChainList::new().is_empty());
    }
}
