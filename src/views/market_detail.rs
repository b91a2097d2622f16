//! Market detail coordinator: one market, its order book, and the user's holdings.

use super::{settle, RequestTracker};
use crate::api::MarketApi;
use crate::domain::market::Market;
use crate::domain::orderbook::OrderBookSnapshot;
use crate::domain::position::{self, Holdings, Position};
use crate::shared::{MarketId, Outcome};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketDetailState {
    /// The `(market, outcome)` this state belongs to.
    pub key: Option<(MarketId, Outcome)>,
    pub market: Option<Market>,
    pub order_book: Option<OrderBookSnapshot>,
    pub positions: Vec<Position>,
    pub loading: bool,
    /// The market itself could not be loaded.
    pub not_found: bool,
}

/// What the detail view should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailView {
    Loading,
    NotFound,
    Ready,
}

impl MarketDetailState {
    pub fn market_id(&self) -> Option<MarketId> {
        self.key.map(|(id, _)| id)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.key.map(|(_, outcome)| outcome)
    }

    pub fn view(&self) -> DetailView {
        if self.loading && self.market.is_none() {
            DetailView::Loading
        } else if self.not_found || self.market.is_none() {
            DetailView::NotFound
        } else {
            DetailView::Ready
        }
    }

    /// Shares held in this market per outcome; zero when nothing matches.
    pub fn holdings(&self) -> Holdings {
        match self.market_id() {
            Some(id) => position::holdings_for(&self.positions, id),
            None => Holdings::default(),
        }
    }
}

pub struct MarketDetail {
    api: Arc<dyn MarketApi>,
    tracker: RequestTracker,
    state: watch::Sender<MarketDetailState>,
}

impl MarketDetail {
    pub fn new(api: Arc<dyn MarketApi>) -> Self {
        let (state, _) = watch::channel(MarketDetailState::default());
        Self {
            api,
            tracker: RequestTracker::new(),
            state,
        }
    }

    /// Load a market, the order book for `outcome`, and the user's positions.
    ///
    /// Switching to a different `(market, outcome)` clears the previous
    /// market's data immediately. Returns `false` if a newer load superseded
    /// this one.
    pub async fn load(&self, market_id: MarketId, outcome: Outcome) -> bool {
        let generation = self.tracker.begin();
        let key = (market_id, outcome);
        self.state.send_modify(|s| {
            if s.key != Some(key) {
                let same_market = s.market_id() == Some(market_id);
                let market = if same_market { s.market.take() } else { None };
                let positions = if same_market {
                    std::mem::take(&mut s.positions)
                } else {
                    Vec::new()
                };
                *s = MarketDetailState {
                    key: Some(key),
                    market,
                    positions,
                    ..MarketDetailState::default()
                };
            }
            s.loading = true;
        });
        tracing::debug!(%market_id, %outcome, generation, "Loading market detail");

        let (market, positions, order_book) = futures_util::join!(
            self.api.market(market_id),
            self.api.portfolio(),
            self.api.order_book(market_id, outcome),
        );

        let applied = self.state.send_if_modified(|s| {
            if !self.tracker.is_current(generation) {
                return false;
            }
            match market {
                Ok(market) => {
                    s.market = Some(market);
                    s.not_found = false;
                }
                Err(e) => {
                    tracing::warn!(%market_id, "Market not available: {}", e);
                    s.market = None;
                    s.not_found = true;
                }
            }
            if let Some(positions) = settle("market_detail", "positions", positions) {
                s.positions = positions;
            }
            if let Some(book) = settle("market_detail", "order_book", order_book) {
                s.order_book = Some(book);
            }
            s.loading = false;
            true
        });
        if !applied {
            tracing::debug!(%market_id, generation, "Discarding stale market detail load");
        }
        applied
    }

    /// Re-run the load for the current key. Returns `false` if nothing is
    /// loaded yet or the reload was superseded.
    pub async fn reload(&self) -> bool {
        let key = self.state.borrow().key;
        match key {
            Some((market_id, outcome)) => self.load(market_id, outcome).await,
            None => false,
        }
    }

    /// Like [`reload`](Self::reload), but only while `market_id` is still
    /// the market on display.
    pub async fn reload_market(&self, market_id: MarketId) -> bool {
        let key = self.state.borrow().key;
        match key {
            Some((id, outcome)) if id == market_id => self.load(id, outcome).await,
            _ => false,
        }
    }

    /// Forget the current market (navigating away).
    pub fn clear(&self) {
        self.tracker.begin();
        self.state.send_replace(MarketDetailState::default());
    }

    pub fn state(&self) -> MarketDetailState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MarketDetailState> {
        self.state.subscribe()
    }
}
