//! Wire types for account transactions (REST).

use crate::shared::serde_util;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single entry from `GET account/transactions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransactionResponse {
    pub id: i64,
    pub transaction_type: String,
    #[serde(with = "serde_util::decimal")]
    pub amount: Decimal,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}
