//! Portfolio coordinator: holdings and account history.

use super::{settle, RequestTracker};
use crate::api::MarketApi;
use crate::domain::position::{self, Position};
use crate::domain::transaction::Transaction;
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::watch;

/// Transactions shown in the history list.
pub const RECENT_TRANSACTIONS: usize = 10;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PortfolioState {
    pub positions: Vec<Position>,
    /// Most recent first, as the backend orders them.
    pub transactions: Vec<Transaction>,
    pub loading: bool,
}

impl PortfolioState {
    pub fn total_value(&self) -> Decimal {
        position::total_value(&self.positions)
    }

    pub fn active_positions(&self) -> usize {
        position::active_count(&self.positions)
    }

    pub fn recent_transactions(&self) -> &[Transaction] {
        &self.transactions[..self.transactions.len().min(RECENT_TRANSACTIONS)]
    }
}

pub struct Portfolio {
    api: Arc<dyn MarketApi>,
    tracker: RequestTracker,
    state: watch::Sender<PortfolioState>,
}

impl Portfolio {
    pub fn new(api: Arc<dyn MarketApi>) -> Self {
        let (state, _) = watch::channel(PortfolioState::default());
        Self {
            api,
            tracker: RequestTracker::new(),
            state,
        }
    }

    pub async fn load(&self) -> bool {
        let generation = self.tracker.begin();
        self.state.send_modify(|s| s.loading = true);

        let (positions, transactions) =
            futures_util::join!(self.api.portfolio(), self.api.transactions());

        let applied = self.state.send_if_modified(|s| {
            if !self.tracker.is_current(generation) {
                return false;
            }
            if let Some(positions) = settle("portfolio", "positions", positions) {
                s.positions = positions;
            }
            if let Some(transactions) = settle("portfolio", "transactions", transactions) {
                s.transactions = transactions;
            }
            s.loading = false;
            true
        });
        if !applied {
            tracing::debug!(generation, "Discarding stale portfolio load");
        }
        applied
    }

    pub fn state(&self) -> PortfolioState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<PortfolioState> {
        self.state.subscribe()
    }
}
