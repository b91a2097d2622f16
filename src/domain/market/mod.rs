//! Market domain: market types, validation, conversion.

mod convert;
pub mod wire;

pub use convert::markets_from_wire;

use crate::shared::{MarketId, Outcome};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── Status ──────────────────────────────────────────────────────────────────

/// Market lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Pending,
    Active,
    Closed,
    Resolved,
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Pending => "PENDING",
            Status::Active => "ACTIVE",
            Status::Closed => "CLOSED",
            Status::Resolved => "RESOLVED",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(Status::Pending),
            "ACTIVE" => Some(Status::Active),
            "CLOSED" => Some(Status::Closed),
            "RESOLVED" => Some(Status::Resolved),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── Market ──────────────────────────────────────────────────────────────────

/// A validated binary prediction market.
///
/// Read-only on the client: a newer view of a market always comes from a
/// re-fetch, never from local mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Market {
    pub id: MarketId,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub current_yes_price: Decimal,
    pub current_no_price: Decimal,
    pub outcome_yes: String,
    pub outcome_no: String,
    pub resolution_date: DateTime<Utc>,
    pub created_by: String,
    pub created_at: Option<DateTime<Utc>>,
    pub resolved_outcome: Option<String>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl Market {
    /// Display label for one side of the market.
    pub fn outcome_label(&self, outcome: Outcome) -> &str {
        match outcome {
            Outcome::Yes => &self.outcome_yes,
            Outcome::No => &self.outcome_no,
        }
    }

    /// Current price of one side of the market.
    pub fn price(&self, outcome: Outcome) -> Decimal {
        match outcome {
            Outcome::Yes => self.current_yes_price,
            Outcome::No => self.current_no_price,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Active
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum ValidationError {
    Multiple(MarketId, Vec<ValidationError>),
    TitleMissing,
    InvalidStatus(String),
    PriceOutOfRange(Outcome, Decimal),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Multiple(id, errors) => {
                writeln!(f, "Market validation errors ({id}):")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            ValidationError::TitleMissing => write!(f, "Missing title"),
            ValidationError::InvalidStatus(s) => write!(f, "Invalid status: {s}"),
            ValidationError::PriceOutOfRange(outcome, price) => {
                write!(f, "{outcome} price out of range: {price}")
            }
        }
    }
}

impl std::error::Error for ValidationError {}
