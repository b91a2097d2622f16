//! Wire types for share holdings (REST).

use crate::shared::serde_util;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single share record from `GET shares`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShareResponse {
    pub id: i64,
    pub market: i64,
    #[serde(default)]
    pub market_title: Option<String>,
    pub outcome: String,
    pub quantity: u64,
    #[serde(with = "serde_util::decimal")]
    pub average_price: Decimal,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}
