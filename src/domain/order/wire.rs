//! Wire types for order placement and order listing.

use super::OrderDraft;
use crate::domain::order::{OrderClass, OrderType};
use crate::shared::{serde_util, MarketId, Outcome};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

// ─── Place order ─────────────────────────────────────────────────────────────

/// Body of `POST place-order`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlaceOrderRequest {
    pub market: MarketId,
    pub order_type: OrderType,
    pub order_class: OrderClass,
    pub outcome: Outcome,
    pub quantity: u64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_util::decimal_opt"
    )]
    pub price: Option<Decimal>,
}

impl PlaceOrderRequest {
    /// Pair a validated draft with its market. Market orders never carry a price.
    pub fn from_draft(market: MarketId, draft: &OrderDraft) -> Self {
        Self {
            market,
            order_type: draft.order_type,
            order_class: draft.order_class(),
            outcome: draft.outcome,
            quantity: draft.quantity,
            price: draft.pricing.price(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FillResponse {
    #[serde(with = "serde_util::decimal")]
    pub price: Decimal,
    pub quantity: u64,
    #[serde(default)]
    pub counterparty: Option<String>,
}

/// Response from `POST place-order`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub order: Option<OrderResponse>,
    #[serde(default)]
    pub fills: Vec<FillResponse>,
}

// ─── Order records ───────────────────────────────────────────────────────────

/// An order as returned by `GET orders` and embedded in place-order responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: i64,
    pub market: i64,
    #[serde(default)]
    pub market_title: Option<String>,
    pub order_type: String,
    pub order_class: String,
    pub outcome: String,
    pub quantity: u64,
    #[serde(default, with = "serde_util::decimal_opt")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub filled_quantity: u64,
    #[serde(default)]
    pub remaining_quantity: u64,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub filled_at: Option<DateTime<Utc>>,
}

/// Generic `{"message": ...}` acknowledgement (cancel, logout, login, register).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

// ─── Add funds ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFundsRequest {
    #[serde(with = "serde_util::decimal_number")]
    pub amount: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFundsResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(with = "serde_util::decimal")]
    pub new_balance: Decimal,
}
