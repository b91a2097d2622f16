//! Order domain: drafts, pre-submit validation, submission results, order records.

mod convert;
pub mod form;
pub mod wire;

pub use convert::{orders_from_wire, OrderConversionError};
pub use form::OrderForm;

use crate::error::SdkError;
use crate::shared::{MarketId, Outcome};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ─── OrderType ───────────────────────────────────────────────────────────────

/// Direction of an order.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderType {
    #[default]
    Buy,
    Sell,
}

impl OrderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Buy => "BUY",
            OrderType::Sell => "SELL",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "BUY" => Some(OrderType::Buy),
            "SELL" => Some(OrderType::Sell),
            _ => None,
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── OrderClass ──────────────────────────────────────────────────────────────

/// Whether an order rests at a price or executes against the book.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderClass {
    #[default]
    Limit,
    Market,
}

impl OrderClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderClass::Limit => "LIMIT",
            OrderClass::Market => "MARKET",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "LIMIT" => Some(OrderClass::Limit),
            "MARKET" => Some(OrderClass::Market),
            _ => None,
        }
    }
}

impl fmt::Display for OrderClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ─── OrderDraft ──────────────────────────────────────────────────────────────

/// Pricing of a validated draft. Market orders carry no price at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pricing {
    Limit { price: Decimal },
    Market,
}

impl Pricing {
    pub fn class(&self) -> OrderClass {
        match self {
            Pricing::Limit { .. } => OrderClass::Limit,
            Pricing::Market => OrderClass::Market,
        }
    }

    pub fn price(&self) -> Option<Decimal> {
        match self {
            Pricing::Limit { price } => Some(*price),
            Pricing::Market => None,
        }
    }
}

/// A validated order, ready to pair with a market and submit.
///
/// Only produced by [`OrderForm::draft`], so quantity is always ≥ 1 and a
/// limit price always lies strictly between 0 and 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDraft {
    pub order_type: OrderType,
    pub outcome: Outcome,
    pub quantity: u64,
    pub pricing: Pricing,
}

impl OrderDraft {
    pub fn order_class(&self) -> OrderClass {
        self.pricing.class()
    }
}

// ─── OrderStatus / Order ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Pending,
    Partial,
    Filled,
    Cancelled,
}

impl OrderStatus {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "PENDING" => Some(OrderStatus::Pending),
            "PARTIAL" => Some(OrderStatus::Partial),
            "FILLED" => Some(OrderStatus::Filled),
            "CANCELLED" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether the order can still be cancelled.
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Partial)
    }
}

/// An order record as the exchange tracks it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: i64,
    pub market_id: MarketId,
    pub market_title: String,
    pub order_type: OrderType,
    pub order_class: OrderClass,
    pub outcome: Outcome,
    pub quantity: u64,
    pub price: Option<Decimal>,
    pub filled_quantity: u64,
    pub remaining_quantity: u64,
    pub status: OrderStatus,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub filled_at: Option<DateTime<Utc>>,
}

// ─── OrderResult ─────────────────────────────────────────────────────────────

/// A matched portion of a submitted order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Fill {
    pub price: Decimal,
    pub quantity: u64,
    pub counterparty: Option<String>,
}

/// Outcome of an accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderResult {
    pub fills: Vec<Fill>,
    pub message: Option<String>,
    pub order: Option<Order>,
}

impl OrderResult {
    pub fn filled_quantity(&self) -> u64 {
        self.fills.iter().map(|f| f.quantity).sum()
    }

    /// Banner text for an accepted order.
    pub fn banner(&self) -> Banner {
        let text = if !self.fills.is_empty() {
            format!("Order filled! {} fills executed.", self.fills.len())
        } else {
            self.message
                .clone()
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "Order placed successfully!".to_string())
        };
        Banner {
            kind: BannerKind::Success,
            text,
        }
    }
}

// ─── Banner ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// One-shot message shown above the order form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub text: String,
}

impl Banner {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            text: text.into(),
        }
    }

    /// Banner for a rejected submission: the service's message verbatim, or a
    /// generic failure.
    pub fn rejected(err: &SdkError) -> Self {
        Self::error(
            err.api_message()
                .unwrap_or_else(|| "Error placing order".to_string()),
        )
    }

    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Pre-submit validation failures. No request is sent when any of these occur.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderValidationError {
    QuantityNotPositive(i64),
    PriceOutOfRange(Decimal),
    PriceMissing,
}

impl fmt::Display for OrderValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderValidationError::QuantityNotPositive(q) => {
                write!(f, "Quantity must be a positive whole number (got {q})")
            }
            OrderValidationError::PriceOutOfRange(p) => {
                write!(f, "Price must be between 0 and 1, exclusive (got {p})")
            }
            OrderValidationError::PriceMissing => write!(f, "Limit orders require a price"),
        }
    }
}

impl std::error::Error for OrderValidationError {}
