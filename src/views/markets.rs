//! Markets list coordinator.

use super::{settle, RequestTracker};
use crate::api::MarketApi;
use crate::domain::market::{Market, Status};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketsListState {
    pub markets: Vec<Market>,
    pub loading: bool,
}

impl MarketsListState {
    pub fn by_status(&self, status: Status) -> Vec<&Market> {
        self.markets.iter().filter(|m| m.status == status).collect()
    }
}

pub struct MarketsList {
    api: Arc<dyn MarketApi>,
    tracker: RequestTracker,
    state: watch::Sender<MarketsListState>,
}

impl MarketsList {
    pub fn new(api: Arc<dyn MarketApi>) -> Self {
        let (state, _) = watch::channel(MarketsListState::default());
        Self {
            api,
            tracker: RequestTracker::new(),
            state,
        }
    }

    pub async fn load(&self) -> bool {
        let generation = self.tracker.begin();
        self.state.send_modify(|s| s.loading = true);

        let markets = self.api.markets().await;

        let applied = self.state.send_if_modified(|s| {
            if !self.tracker.is_current(generation) {
                return false;
            }
            if let Some(markets) = settle("markets", "markets", markets) {
                s.markets = markets;
            }
            s.loading = false;
            true
        });
        if !applied {
            tracing::debug!(generation, "Discarding stale markets load");
        }
        applied
    }

    pub fn state(&self) -> MarketsListState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<MarketsListState> {
        self.state.subscribe()
    }
}
