//! Field path type

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

/// A parsed field path
///
/// Keys are member names or decimal array indices. Negative indices count
/// from the end of an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath {
    keys: Vec<String>,
}

impl FieldPath {
    /// Split a query string on whitespace
    pub fn parse(field: &str) -> Self {
        Self {
            keys: field.split_whitespace().map(str::to_string).collect(),
        }
    }

    /// Build a path from individual keys
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    /// The keys in order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Whether the path addresses the root
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.keys.join(" "))
    }
}

impl FromStr for FieldPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl From<&str> for FieldPath {
    fn from(field: &str) -> Self {
        Self::parse(field)
    }
}

impl From<String> for FieldPath {
    fn from(field: String) -> Self {
        Self::parse(&field)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.to_string()
    }
}
