//! Dashboard coordinator: featured markets and a positions summary.

use super::{settle, RequestTracker};
use crate::api::MarketApi;
use crate::domain::market::Market;
use crate::domain::position::{self, Position};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::watch;

/// Markets shown in the featured list.
pub const FEATURED_MARKETS: usize = 5;
/// Positions shown in the summary list.
pub const RECENT_POSITIONS: usize = 5;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    pub markets: Vec<Market>,
    pub positions: Vec<Position>,
    pub loading: bool,
}

impl DashboardState {
    pub fn featured_markets(&self) -> &[Market] {
        &self.markets[..self.markets.len().min(FEATURED_MARKETS)]
    }

    pub fn recent_positions(&self) -> &[Position] {
        &self.positions[..self.positions.len().min(RECENT_POSITIONS)]
    }

    /// Computed over every loaded position, not just the displayed ones.
    pub fn total_value(&self) -> Decimal {
        position::total_value(&self.positions)
    }

    pub fn active_positions(&self) -> usize {
        position::active_count(&self.positions)
    }
}

pub struct Dashboard {
    api: Arc<dyn MarketApi>,
    tracker: RequestTracker,
    state: watch::Sender<DashboardState>,
}

impl Dashboard {
    pub fn new(api: Arc<dyn MarketApi>) -> Self {
        let (state, _) = watch::channel(DashboardState::default());
        Self {
            api,
            tracker: RequestTracker::new(),
            state,
        }
    }

    /// Fetch markets and positions together. Returns `false` if a newer load
    /// superseded this one and its results were discarded.
    pub async fn load(&self) -> bool {
        let generation = self.tracker.begin();
        self.state.send_modify(|s| s.loading = true);

        let (markets, positions) = futures_util::join!(self.api.markets(), self.api.portfolio());

        let applied = self.state.send_if_modified(|s| {
            if !self.tracker.is_current(generation) {
                return false;
            }
            if let Some(markets) = settle("dashboard", "markets", markets) {
                s.markets = markets;
            }
            if let Some(positions) = settle("dashboard", "positions", positions) {
                s.positions = positions;
            }
            s.loading = false;
            true
        });
        if !applied {
            tracing::debug!(generation, "Discarding stale dashboard load");
        }
        applied
    }

    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }
}
