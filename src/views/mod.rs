//! View data coordinators and the order composer.
//!
//! Each coordinator owns one view's fetch/merge/loading cycle:
//!
//! - every load issues its reads concurrently and clears `loading` only after
//!   all of them settle
//! - a failed read is logged and leaves its slice of state untouched
//! - results from a load that has since been superseded are discarded
//!
//! State is published through a `tokio::sync::watch` channel. `state()`
//! returns a snapshot; `subscribe()` returns a receiver for re-rendering.

pub mod dashboard;
pub mod market_detail;
pub mod markets;
pub mod order_composer;
pub mod portfolio;

pub use dashboard::{Dashboard, DashboardState};
pub use market_detail::{DetailView, MarketDetail, MarketDetailState};
pub use markets::{MarketsList, MarketsListState};
pub use order_composer::{ComposerError, ComposerState, OrderComposer};
pub use portfolio::{Portfolio, PortfolioState};

use crate::error::SdkError;
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation counter tagging each load with the request that started it.
///
/// A load takes a generation with [`begin`](Self::begin) and may only write
/// state while [`is_current`](Self::is_current) still holds for it.
#[derive(Debug, Default)]
pub struct RequestTracker {
    current: AtomicU64,
}

impl RequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new generation, superseding every earlier one.
    pub fn begin(&self) -> u64 {
        self.current.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current.load(Ordering::SeqCst) == generation
    }
}

/// Unwrap one read of a load, logging a failure instead of propagating it.
pub(crate) fn settle<T>(view: &'static str, slice: &'static str, result: Result<T, SdkError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(view, slice, "Failed to load: {}", e);
            None
        }
    }
}
