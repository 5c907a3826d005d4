//! Address - the two-valued coarse category used by filtered listings

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse category a user can be filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Address {
    A,
    B,
}

impl Address {
    /// Wire and storage representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Address {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            other => Err(AddressParseError(other.to_string())),
        }
    }
}

/// Error when parsing an address category
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid address category: {0} (expected \"a\" or \"b\")")]
pub struct AddressParseError(pub String);
