//! The backend port.
//!
//! Everything above the transport (session store, view coordinators, order
//! composer) talks to the exchange through [`MarketApi`]. `MarketHttp` is the
//! production implementation; tests substitute a scripted fake.

use crate::auth::{LoginForm, RegisterRequest, Session};
use crate::domain::market::Market;
use crate::domain::order::wire::PlaceOrderRequest;
use crate::domain::order::{Order, OrderResult};
use crate::domain::orderbook::OrderBookSnapshot;
use crate::domain::position::Position;
use crate::domain::transaction::Transaction;
use crate::error::SdkError;
use crate::shared::{MarketId, Outcome};
use async_trait::async_trait;
use rust_decimal::Decimal;

#[async_trait]
pub trait MarketApi: Send + Sync {
    /// Current account. Any error means "not signed in".
    async fn account(&self) -> Result<Session, SdkError>;
    async fn login(&self, credentials: &LoginForm) -> Result<(), SdkError>;
    async fn register(&self, request: &RegisterRequest) -> Result<(), SdkError>;
    async fn logout(&self) -> Result<(), SdkError>;

    async fn markets(&self) -> Result<Vec<Market>, SdkError>;
    async fn market(&self, id: MarketId) -> Result<Market, SdkError>;
    async fn order_book(
        &self,
        id: MarketId,
        outcome: Outcome,
    ) -> Result<OrderBookSnapshot, SdkError>;

    /// Share holdings of the signed-in account.
    async fn portfolio(&self) -> Result<Vec<Position>, SdkError>;
    /// Ledger entries, most recent first.
    async fn transactions(&self) -> Result<Vec<Transaction>, SdkError>;

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<OrderResult, SdkError>;
    async fn orders(&self) -> Result<Vec<Order>, SdkError>;
    /// Cancel a resting order. Returns the service's acknowledgement message.
    async fn cancel_order(&self, order_id: i64) -> Result<Option<String>, SdkError>;
    /// Credit the account. Returns the new balance.
    async fn add_funds(&self, amount: Decimal) -> Result<Decimal, SdkError>;
}
