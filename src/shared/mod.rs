//! Shared newtypes and utilities used across all domain modules.
//!
//! These types are serialization-transparent: they serialize/deserialize identically
//! to the raw format the backend sends, so they can be used directly in wire types
//! without conversion overhead.

pub mod fmt;
pub mod serde_util;

pub use fmt::{format_cents, format_signed_usd, format_usd};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

// ─── MarketId ────────────────────────────────────────────────────────────────

/// Newtype for market primary keys (e.g. `42`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarketId(i64);

impl MarketId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn get(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for MarketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for MarketId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for MarketId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(MarketId)
    }
}

impl Serialize for MarketId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for MarketId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = i64::deserialize(deserializer)?;
        Ok(MarketId(id))
    }
}

// ─── Outcome ─────────────────────────────────────────────────────────────────

/// One side of a binary market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    #[default]
    Yes,
    No,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yes => "YES",
            Self::No => "NO",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Self::Yes => Self::No,
            Self::No => Self::Yes,
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Outcome {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "YES" => Ok(Self::Yes),
            "NO" => Ok(Self::No),
            other => Err(format!("unknown outcome: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_id_serde() {
        let id = MarketId::new(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "7");
        let back: MarketId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }

    #[test]
    fn test_market_id_from_route_segment() {
        assert_eq!(MarketId::from_str("12").unwrap(), MarketId::new(12));
        assert!(MarketId::from_str("abc").is_err());
    }

    #[test]
    fn test_outcome_serde() {
        let yes: Outcome = serde_json::from_str("\"YES\"").unwrap();
        assert_eq!(yes, Outcome::Yes);
        assert_eq!(serde_json::to_string(&Outcome::No).unwrap(), "\"NO\"");
    }

    #[test]
    fn test_outcome_parse_is_case_insensitive() {
        assert_eq!(Outcome::from_str("no").unwrap(), Outcome::No);
        assert!(Outcome::from_str("maybe").is_err());
        assert_eq!(Outcome::Yes.opposite(), Outcome::No);
    }
}
