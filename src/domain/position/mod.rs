//! Position domain: share holdings and the aggregates derived from them.

mod convert;
pub mod wire;

pub use convert::positions_from_wire;

use crate::shared::{MarketId, Outcome};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A holding of shares in one outcome of one market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub id: i64,
    pub market_id: MarketId,
    pub market_title: String,
    pub outcome: Outcome,
    pub quantity: u64,
    pub average_price: Decimal,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Position {
    /// Cost basis of the holding: quantity × average price.
    pub fn value(&self) -> Decimal {
        Decimal::from(self.quantity) * self.average_price
    }

    pub fn is_active(&self) -> bool {
        self.quantity > 0
    }
}

/// Σ quantity × average_price over every position given.
pub fn total_value(positions: &[Position]) -> Decimal {
    positions.iter().map(Position::value).sum()
}

/// Number of positions with shares still held.
pub fn active_count(positions: &[Position]) -> usize {
    positions.iter().filter(|p| p.is_active()).count()
}

/// Shares held in each outcome of a single market.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Holdings {
    pub yes: u64,
    pub no: u64,
}

impl Holdings {
    pub fn get(&self, outcome: Outcome) -> u64 {
        match outcome {
            Outcome::Yes => self.yes,
            Outcome::No => self.no,
        }
    }
}

/// Holdings in `market`, summed per outcome. A market with no matching
/// records holds zero of each.
pub fn holdings_for(positions: &[Position], market: MarketId) -> Holdings {
    positions
        .iter()
        .filter(|p| p.market_id == market)
        .fold(Holdings::default(), |mut acc, p| {
            match p.outcome {
                Outcome::Yes => acc.yes += p.quantity,
                Outcome::No => acc.no += p.quantity,
            }
            acc
        })
}

// ─── Validation ──────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum PositionValidationError {
    Multiple(i64, Vec<PositionValidationError>),
    InvalidOutcome(String),
    AveragePriceOutOfRange(Decimal),
}

impl fmt::Display for PositionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionValidationError::Multiple(id, errors) => {
                writeln!(f, "Position validation errors ({id}):")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            PositionValidationError::InvalidOutcome(s) => write!(f, "Invalid outcome: {s}"),
            PositionValidationError::AveragePriceOutOfRange(p) => {
                write!(f, "Average price out of range: {p}")
            }
        }
    }
}

impl std::error::Error for PositionValidationError {}
