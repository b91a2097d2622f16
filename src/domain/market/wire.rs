//! Wire types for market responses (REST).

use crate::shared::serde_util;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// REST response for a single market (`GET markets/{id}` and list items).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketResponse {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub outcome_yes: Option<String>,
    #[serde(default)]
    pub outcome_no: Option<String>,
    pub status: String,
    pub resolution_date: DateTime<Utc>,
    #[serde(with = "serde_util::decimal")]
    pub current_yes_price: Decimal,
    #[serde(with = "serde_util::decimal")]
    pub current_no_price: Decimal,
    #[serde(default)]
    pub created_by_username: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolved_outcome: Option<String>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
}
