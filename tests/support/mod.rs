//! Scripted in-memory backend for integration tests.
//!
//! `FakeApi` implements `MarketApi` over plain data, counts every call, can be
//! told to fail individual calls, and can hold a call until a test releases it
//! (see [`FakeApi::gate`]) so tests control completion order.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use predmarket_client::api::MarketApi;
use predmarket_client::auth::{LoginForm, RegisterRequest, Session};
use predmarket_client::domain::market::{Market, Status};
use predmarket_client::domain::order::wire::PlaceOrderRequest;
use predmarket_client::domain::order::{Fill, Order, OrderResult};
use predmarket_client::domain::orderbook::wire::{DepthLevel, OrderBookDepthResponse};
use predmarket_client::domain::orderbook::OrderBookSnapshot;
use predmarket_client::domain::position::Position;
use predmarket_client::domain::transaction::{Transaction, TransactionType};
use predmarket_client::error::{HttpError, SdkError};
use predmarket_client::shared::{MarketId, Outcome};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

pub fn d(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn market(id: i64, yes_price: &str) -> Market {
    let yes = d(yes_price);
    Market {
        id: MarketId::new(id),
        title: format!("Market {id}"),
        description: String::new(),
        status: Status::Active,
        current_yes_price: yes,
        current_no_price: Decimal::ONE - yes,
        outcome_yes: "Yes".to_string(),
        outcome_no: "No".to_string(),
        resolution_date: Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        created_by: "admin".to_string(),
        created_at: None,
        resolved_outcome: None,
        resolved_at: None,
    }
}

pub fn position(market: i64, outcome: Outcome, quantity: u64, avg: &str) -> Position {
    Position {
        id: market * 100 + quantity as i64,
        market_id: MarketId::new(market),
        market_title: format!("Market {market}"),
        outcome,
        quantity,
        average_price: d(avg),
        created_at: None,
        updated_at: None,
    }
}

pub fn transaction(id: i64, amount: &str) -> Transaction {
    Transaction {
        id,
        transaction_type: TransactionType::Deposit,
        amount: d(amount),
        description: format!("Transaction {id}"),
        created_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
    }
}

pub fn book(market: i64, outcome: Outcome, bids: &[(&str, u64)], asks: &[(&str, u64)]) -> OrderBookSnapshot {
    let level = |(p, q): &(&str, u64)| DepthLevel {
        price: d(p),
        quantity: *q,
    };
    let depth = OrderBookDepthResponse {
        outcome: outcome.to_string(),
        bids: bids.iter().map(level).collect(),
        asks: asks.iter().map(level).collect(),
        spread: None,
        mid_price: None,
    };
    OrderBookSnapshot::from_depth(MarketId::new(market), outcome, &depth)
}

pub fn session(username: &str, balance: &str) -> Session {
    Session {
        id: 1,
        username: username.to_string(),
        display_name: username.to_string(),
        balance: d(balance),
        created_at: None,
    }
}

pub fn fills(n: usize) -> OrderResult {
    OrderResult {
        fills: (0..n)
            .map(|i| Fill {
                price: d("0.44"),
                quantity: 1 + i as u64,
                counterparty: Some(format!("maker{i}")),
            })
            .collect(),
        message: Some("Order filled completely.".to_string()),
        order: None,
    }
}

pub fn server_error() -> SdkError {
    HttpError::ServerError {
        status: 500,
        body: String::new(),
    }
    .into()
}

// ── FakeApi ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Script {
    markets: Vec<Market>,
    books: HashMap<(MarketId, Outcome), OrderBookSnapshot>,
    positions: Vec<Position>,
    transactions: Vec<Transaction>,
    /// Account returned by `account()`; `None` answers 403.
    session: Option<Session>,
    /// Known users → password.
    users: HashMap<String, String>,
    place_result: Option<Result<OrderResult, String>>,
    failing: HashSet<String>,
    placed: Vec<PlaceOrderRequest>,
}

#[derive(Default)]
pub struct FakeApi {
    script: Mutex<Script>,
    calls: Mutex<HashMap<String, usize>>,
    in_flight: Mutex<HashMap<String, (usize, usize)>>,
    gates: Mutex<HashMap<String, Arc<Notify>>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    // ── Scripting ────────────────────────────────────────────────────────

    pub fn with_market(&self, market: Market) {
        self.script.lock().unwrap().markets.push(market);
    }

    pub fn with_book(&self, book: OrderBookSnapshot) {
        self.script
            .lock()
            .unwrap()
            .books
            .insert((book.market_id, book.outcome), book);
    }

    pub fn with_positions(&self, positions: Vec<Position>) {
        self.script.lock().unwrap().positions = positions;
    }

    pub fn with_transactions(&self, transactions: Vec<Transaction>) {
        self.script.lock().unwrap().transactions = transactions;
    }

    pub fn signed_in(&self, session: Session) {
        self.script.lock().unwrap().session = Some(session);
    }

    pub fn signed_out(&self) {
        self.script.lock().unwrap().session = None;
    }

    pub fn with_user(&self, username: &str, password: &str) {
        self.script
            .lock()
            .unwrap()
            .users
            .insert(username.to_string(), password.to_string());
    }

    /// Next `place_order` answers with this result.
    pub fn accept_orders(&self, result: OrderResult) {
        self.script.lock().unwrap().place_result = Some(Ok(result));
    }

    /// Next `place_order` answers 400 with this body.
    pub fn reject_orders(&self, body: &str) {
        self.script.lock().unwrap().place_result = Some(Err(body.to_string()));
    }

    /// Make a call fail with a 500 until [`FakeApi::recover`].
    pub fn fail(&self, call: &str) {
        self.script.lock().unwrap().failing.insert(call.to_string());
    }

    pub fn recover(&self, call: &str) {
        self.script.lock().unwrap().failing.remove(call);
    }

    /// Hold the next call named `key` (e.g. `"market:1"`, `"account"`) until
    /// the returned `Notify` is notified. Only one call is held; later calls
    /// pass straight through. A notification sent before the call arrives is
    /// remembered.
    pub fn gate(&self, key: &str) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        self.gates
            .lock()
            .unwrap()
            .insert(key.to_string(), notify.clone());
        notify
    }

    // ── Inspection ───────────────────────────────────────────────────────

    pub fn calls(&self, call: &str) -> usize {
        self.calls.lock().unwrap().get(call).copied().unwrap_or(0)
    }

    /// Highest number of simultaneous in-flight calls seen for `call`.
    pub fn max_concurrent(&self, call: &str) -> usize {
        self.in_flight
            .lock()
            .unwrap()
            .get(call)
            .map(|(_, max)| *max)
            .unwrap_or(0)
    }

    pub fn placed_orders(&self) -> Vec<PlaceOrderRequest> {
        self.script.lock().unwrap().placed.clone()
    }

    /// Wait until `call` has been entered at least `n` times.
    pub async fn wait_for_calls(&self, call: &str, n: usize) {
        while self.calls(call) < n {
            tokio::task::yield_now().await;
        }
    }

    // ── Internals ────────────────────────────────────────────────────────

    async fn enter(&self, call: &str, key: Option<String>) -> Result<(), SdkError> {
        *self.calls.lock().unwrap().entry(call.to_string()).or_insert(0) += 1;
        {
            let mut in_flight = self.in_flight.lock().unwrap();
            let entry = in_flight.entry(call.to_string()).or_insert((0, 0));
            entry.0 += 1;
            entry.1 = entry.1.max(entry.0);
        }

        let gate = {
            let mut gates = self.gates.lock().unwrap();
            key.as_deref()
                .and_then(|k| gates.remove(k))
                .or_else(|| gates.remove(call))
        };
        if let Some(gate) = gate {
            gate.notified().await;
        }

        if let Some(entry) = self.in_flight.lock().unwrap().get_mut(call) {
            entry.0 -= 1;
        }

        if self.script.lock().unwrap().failing.contains(call) {
            return Err(server_error());
        }
        Ok(())
    }
}

#[async_trait]
impl MarketApi for FakeApi {
    async fn account(&self) -> Result<Session, SdkError> {
        self.enter("account", None).await?;
        self.script
            .lock()
            .unwrap()
            .session
            .clone()
            .ok_or_else(|| HttpError::Unauthorized(r#"{"detail": "Not authenticated"}"#.into()).into())
    }

    async fn login(&self, credentials: &LoginForm) -> Result<(), SdkError> {
        self.enter("login", None).await?;
        let mut script = self.script.lock().unwrap();
        let valid = script
            .users
            .get(&credentials.username)
            .is_some_and(|password| *password == credentials.password);
        if !valid {
            return Err(HttpError::Unauthorized(r#"{"error": "Invalid credentials"}"#.into()).into());
        }
        script.session = Some(session(&credentials.username, "1000.00"));
        Ok(())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), SdkError> {
        self.enter("register", None).await?;
        let mut script = self.script.lock().unwrap();
        if script.users.contains_key(&request.username) {
            return Err(HttpError::BadRequest(r#"{"error": "Username already exists"}"#.into()).into());
        }
        script
            .users
            .insert(request.username.clone(), request.password.clone());
        Ok(())
    }

    async fn logout(&self) -> Result<(), SdkError> {
        self.enter("logout", None).await?;
        self.script.lock().unwrap().session = None;
        Ok(())
    }

    async fn markets(&self) -> Result<Vec<Market>, SdkError> {
        self.enter("markets", None).await?;
        Ok(self.script.lock().unwrap().markets.clone())
    }

    async fn market(&self, id: MarketId) -> Result<Market, SdkError> {
        self.enter("market", Some(format!("market:{id}"))).await?;
        self.script
            .lock()
            .unwrap()
            .markets
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| HttpError::NotFound(r#"{"detail": "Not found."}"#.into()).into())
    }

    async fn order_book(&self, id: MarketId, outcome: Outcome) -> Result<OrderBookSnapshot, SdkError> {
        self.enter("order_book", Some(format!("order_book:{id}:{outcome}")))
            .await?;
        Ok(self
            .script
            .lock()
            .unwrap()
            .books
            .get(&(id, outcome))
            .cloned()
            .unwrap_or_else(|| OrderBookSnapshot::new(id, outcome)))
    }

    async fn portfolio(&self) -> Result<Vec<Position>, SdkError> {
        self.enter("portfolio", None).await?;
        Ok(self.script.lock().unwrap().positions.clone())
    }

    async fn transactions(&self) -> Result<Vec<Transaction>, SdkError> {
        self.enter("transactions", None).await?;
        Ok(self.script.lock().unwrap().transactions.clone())
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<OrderResult, SdkError> {
        self.enter("place_order", None).await?;
        let mut script = self.script.lock().unwrap();
        script.placed.push(request.clone());
        match script.place_result.clone() {
            Some(Ok(result)) => Ok(result),
            Some(Err(body)) => Err(HttpError::BadRequest(body).into()),
            None => Ok(OrderResult {
                fills: vec![],
                message: None,
                order: None,
            }),
        }
    }

    async fn orders(&self) -> Result<Vec<Order>, SdkError> {
        self.enter("orders", None).await?;
        Ok(vec![])
    }

    async fn cancel_order(&self, _order_id: i64) -> Result<Option<String>, SdkError> {
        self.enter("cancel_order", None).await?;
        Ok(Some("Order cancelled successfully".to_string()))
    }

    async fn add_funds(&self, amount: Decimal) -> Result<Decimal, SdkError> {
        self.enter("add_funds", None).await?;
        let mut script = self.script.lock().unwrap();
        let session = script
            .session
            .as_mut()
            .ok_or(SdkError::Http(HttpError::Unauthorized(String::new())))?;
        session.balance += amount;
        Ok(session.balance)
    }
}
