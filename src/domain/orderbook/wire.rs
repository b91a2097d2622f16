//! Wire types for the order book depth endpoint.

use crate::shared::serde_util;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single aggregated price level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepthLevel {
    #[serde(with = "serde_util::decimal")]
    pub price: Decimal,
    pub quantity: u64,
}

/// Response from `GET markets/{id}/orderbook/{outcome}`.
///
/// `spread` and `mid_price` are the server's own view of the book; the client
/// recomputes both from the levels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderBookDepthResponse {
    pub outcome: String,
    #[serde(default)]
    pub bids: Vec<DepthLevel>,
    #[serde(default)]
    pub asks: Vec<DepthLevel>,
    #[serde(default, with = "serde_util::decimal_opt")]
    pub spread: Option<Decimal>,
    #[serde(default, with = "serde_util::decimal_opt")]
    pub mid_price: Option<Decimal>,
}
