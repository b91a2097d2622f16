//! Conversion: ShareResponse → Position (TryFrom + validation).

use super::wire::ShareResponse;
use super::{Position, PositionValidationError};
use crate::shared::{MarketId, Outcome};
use rust_decimal::Decimal;
use std::str::FromStr;

impl TryFrom<ShareResponse> for Position {
    type Error = PositionValidationError;

    fn try_from(source: ShareResponse) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let outcome = Outcome::from_str(&source.outcome).unwrap_or_else(|_| {
            errors.push(PositionValidationError::InvalidOutcome(source.outcome.clone()));
            Outcome::Yes
        });
        if source.average_price < Decimal::ZERO || source.average_price > Decimal::ONE {
            errors.push(PositionValidationError::AveragePriceOutOfRange(
                source.average_price,
            ));
        }

        if !errors.is_empty() {
            return Err(PositionValidationError::Multiple(source.id, errors));
        }

        Ok(Position {
            id: source.id,
            market_id: MarketId::new(source.market),
            market_title: source.market_title.unwrap_or_default(),
            outcome,
            quantity: source.quantity,
            average_price: source.average_price,
            created_at: source.created_at,
            updated_at: source.updated_at,
        })
    }
}

/// Convert a share listing, dropping (and logging) invalid records.
pub fn positions_from_wire(source: Vec<ShareResponse>) -> Vec<Position> {
    source
        .into_iter()
        .filter_map(|s| match Position::try_from(s) {
            Ok(position) => Some(position),
            Err(e) => {
                tracing::warn!("Skipping invalid position: {}", e);
                None
            }
        })
        .collect()
}
