//! Transaction domain: account ledger entries.

pub mod wire;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of ledger entry. Unknown kinds are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    Buy,
    Sell,
    Refund,
    BuyLimit,
    CancelBuy,
    Other(String),
}

impl TransactionType {
    pub fn as_str(&self) -> &str {
        match self {
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdrawal => "WITHDRAWAL",
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
            TransactionType::Refund => "REFUND",
            TransactionType::BuyLimit => "BUY_LIMIT",
            TransactionType::CancelBuy => "CANCEL_BUY",
            TransactionType::Other(s) => s,
        }
    }
}

impl From<String> for TransactionType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "DEPOSIT" => TransactionType::Deposit,
            "WITHDRAWAL" => TransactionType::Withdrawal,
            "BUY" => TransactionType::Buy,
            "SELL" => TransactionType::Sell,
            "REFUND" => TransactionType::Refund,
            "BUY_LIMIT" => TransactionType::BuyLimit,
            "CANCEL_BUY" => TransactionType::CancelBuy,
            _ => TransactionType::Other(s),
        }
    }
}

impl From<TransactionType> for String {
    fn from(t: TransactionType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One account ledger entry. `amount` is signed: credits are positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub transaction_type: TransactionType,
    pub amount: Decimal,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_credit(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl From<wire::TransactionResponse> for Transaction {
    fn from(source: wire::TransactionResponse) -> Self {
        Transaction {
            id: source.id,
            transaction_type: TransactionType::from(source.transaction_type),
            amount: source.amount,
            description: source.description,
            created_at: source.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transaction_type_known_and_unknown() {
        assert_eq!(
            TransactionType::from("BUY_LIMIT".to_string()),
            TransactionType::BuyLimit
        );
        let other = TransactionType::from("PAYOUT".to_string());
        assert_eq!(other, TransactionType::Other("PAYOUT".to_string()));
        assert_eq!(other.as_str(), "PAYOUT");
    }

    #[test]
    fn test_transaction_from_wire() {
        let json = r#"{
            "id": 8,
            "transaction_type": "SELL",
            "amount": "12.50",
            "description": "Sell 25 YES shares in Rain?",
            "created_at": "2025-03-04T09:30:00Z"
        }"#;
        let resp: wire::TransactionResponse = serde_json::from_str(json).unwrap();
        let tx = Transaction::from(resp);
        assert_eq!(tx.transaction_type, TransactionType::Sell);
        assert!(tx.is_credit());
        assert_eq!(tx.amount, Decimal::new(1250, 2));
    }

    #[test]
    fn test_debit_is_not_credit() {
        let tx = Transaction {
            id: 1,
            transaction_type: TransactionType::Buy,
            amount: Decimal::new(-420, 2),
            description: String::new(),
            created_at: Utc::now(),
        };
        assert!(!tx.is_credit());
    }
}
