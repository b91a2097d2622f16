//! Conversion: MarketResponse → Market (TryFrom + validation).

use super::wire;
use super::{Market, Status, ValidationError};
use crate::shared::{MarketId, Outcome};
use rust_decimal::Decimal;

impl TryFrom<wire::MarketResponse> for Market {
    type Error = ValidationError;

    fn try_from(source: wire::MarketResponse) -> Result<Self, Self::Error> {
        let mut errors: Vec<ValidationError> = Vec::new();
        let id = MarketId::new(source.id);

        let title = source
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| {
                errors.push(ValidationError::TitleMissing);
                String::new()
            });
        let status = Status::from_str(&source.status).unwrap_or_else(|| {
            errors.push(ValidationError::InvalidStatus(source.status.clone()));
            Status::Pending
        });

        for (outcome, price) in [
            (Outcome::Yes, source.current_yes_price),
            (Outcome::No, source.current_no_price),
        ] {
            if price < Decimal::ZERO || price > Decimal::ONE {
                errors.push(ValidationError::PriceOutOfRange(outcome, price));
            }
        }

        if !errors.is_empty() {
            return Err(ValidationError::Multiple(id, errors));
        }

        Ok(Market {
            id,
            title,
            description: source.description.unwrap_or_default(),
            status,
            current_yes_price: source.current_yes_price,
            current_no_price: source.current_no_price,
            outcome_yes: source.outcome_yes.unwrap_or_else(|| "Yes".to_string()),
            outcome_no: source.outcome_no.unwrap_or_else(|| "No".to_string()),
            resolution_date: source.resolution_date,
            created_by: source.created_by_username.unwrap_or_default(),
            created_at: source.created_at,
            resolved_outcome: source.resolved_outcome,
            resolved_at: source.resolved_at,
        })
    }
}

/// Convert a market listing, dropping (and logging) entries that fail validation.
pub fn markets_from_wire(source: Vec<wire::MarketResponse>) -> Vec<Market> {
    source
        .into_iter()
        .filter_map(|m| match Market::try_from(m) {
            Ok(market) => Some(market),
            Err(e) => {
                tracing::warn!("Skipping invalid market: {}", e);
                None
            }
        })
        .collect()
}
