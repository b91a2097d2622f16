//! Order composer: owns the order form for the market detail view.
//!
//! The composer seeds a default price from the latest order book, validates
//! the form before anything is sent, submits at most one order at a time, and
//! after every submission (accepted or rejected) reloads the market detail and
//! refreshes the session once each.

use crate::api::MarketApi;
use crate::auth::SessionStore;
use crate::domain::order::wire::PlaceOrderRequest;
use crate::domain::order::{
    Banner, OrderClass, OrderDraft, OrderForm, OrderType, OrderValidationError,
};
use crate::shared::{MarketId, Outcome};
use crate::views::market_detail::{MarketDetail, MarketDetailState};
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ComposerError {
    #[error("{0}")]
    Validation(#[from] OrderValidationError),

    #[error("An order is already being submitted")]
    InFlight,

    #[error("No market selected")]
    NoMarket,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComposerState {
    pub market_id: Option<MarketId>,
    pub form: OrderForm,
    /// Result of the last submission or validation attempt.
    pub banner: Option<Banner>,
    pub submitting: bool,
}

pub struct OrderComposer {
    api: Arc<dyn MarketApi>,
    detail: Arc<MarketDetail>,
    session: Arc<SessionStore>,
    in_flight: AtomicBool,
    state: watch::Sender<ComposerState>,
}

impl OrderComposer {
    pub fn new(
        api: Arc<dyn MarketApi>,
        detail: Arc<MarketDetail>,
        session: Arc<SessionStore>,
    ) -> Self {
        let (state, _) = watch::channel(ComposerState::default());
        Self {
            api,
            detail,
            session,
            in_flight: AtomicBool::new(false),
            state,
        }
    }

    /// Open the composer on a market. A different market starts from a
    /// fresh form; the same market keeps the form as it is.
    pub async fn open(&self, market_id: MarketId) -> bool {
        let reset = self.state.send_if_modified(|s| {
            if s.market_id != Some(market_id) {
                *s = ComposerState {
                    market_id: Some(market_id),
                    ..ComposerState::default()
                };
                true
            } else {
                false
            }
        });
        if reset {
            tracing::debug!(%market_id, "Order form reset for new market");
        }
        let outcome = self.state.borrow().form.outcome;
        self.load_detail(market_id, outcome).await
    }

    /// Navigate away: drop the form and the market.
    pub fn close(&self) {
        self.state.send_replace(ComposerState::default());
        self.detail.clear();
    }

    /// Switch the traded outcome and load that outcome's order book.
    pub async fn select_outcome(&self, outcome: Outcome) -> bool {
        self.edit(|f| f.outcome = outcome);
        let market_id = self.state.borrow().market_id;
        match market_id {
            Some(market_id) => self.load_detail(market_id, outcome).await,
            None => false,
        }
    }

    pub fn set_order_type(&self, order_type: OrderType) {
        self.edit(|f| f.order_type = order_type);
    }

    pub fn set_order_class(&self, order_class: OrderClass) {
        self.edit(|f| f.order_class = order_class);
    }

    pub fn set_quantity(&self, quantity: i64) {
        self.edit(|f| f.quantity = quantity);
    }

    /// A user-entered price. Stops default seeding until the form is reset.
    pub fn set_price(&self, price: Option<Decimal>) {
        self.edit(|f| f.set_price(price));
    }

    /// Validate the current form without submitting.
    pub fn draft(&self) -> Result<OrderDraft, OrderValidationError> {
        self.state.borrow().form.draft()
    }

    /// Expected cost (buy) or proceeds (sell) of the order as entered.
    pub fn estimated_total(&self) -> Option<Decimal> {
        let detail = self.detail.state();
        self.state
            .borrow()
            .form
            .estimated_total(detail.order_book.as_ref())
    }

    /// Validate and submit the form.
    ///
    /// Validation failures are reported without contacting the backend. Once
    /// a request has been sent, the returned banner describes the outcome
    /// whether the order was accepted or rejected.
    pub async fn submit(&self) -> Result<Banner, ComposerError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(ComposerError::InFlight);
        }
        let _release = InFlightGuard(self);

        let (market_id, draft) = {
            let state = self.state.borrow();
            let market_id = state.market_id.ok_or(ComposerError::NoMarket)?;
            (market_id, state.form.draft())
        };
        let draft = match draft {
            Ok(draft) => draft,
            Err(e) => {
                self.state.send_modify(|s| s.banner = Some(Banner::error(e.to_string())));
                return Err(e.into());
            }
        };

        self.state.send_modify(|s| {
            s.submitting = true;
            s.banner = None;
        });

        let request = PlaceOrderRequest::from_draft(market_id, &draft);
        tracing::debug!(
            %market_id,
            order_type = %request.order_type,
            order_class = %request.order_class,
            quantity = request.quantity,
            "Submitting order"
        );

        let (banner, accepted) = match self.api.place_order(&request).await {
            Ok(result) => {
                tracing::info!(%market_id, fills = result.fills.len(), "Order accepted");
                (result.banner(), true)
            }
            Err(e) => {
                tracing::warn!(%market_id, "Order rejected: {}", e);
                (Banner::rejected(&e), false)
            }
        };

        // The form may belong to another market by now.
        let applied = self.state.send_if_modified(|s| {
            if s.market_id != Some(market_id) {
                return false;
            }
            if accepted {
                s.form.reset();
            }
            s.banner = Some(banner.clone());
            true
        });
        if !applied {
            tracing::debug!(%market_id, "Order result arrived after the market was closed");
        }

        // Balance and holdings may have moved either way.
        let (reloaded, _) = futures_util::join!(
            self.detail.reload_market(market_id),
            self.session.refresh()
        );
        if reloaded {
            self.seed_price(&self.detail.state());
        }

        Ok(banner)
    }

    pub fn state(&self) -> ComposerState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ComposerState> {
        self.state.subscribe()
    }

    async fn load_detail(&self, market_id: MarketId, outcome: Outcome) -> bool {
        let applied = self.detail.load(market_id, outcome).await;
        if applied {
            self.seed_price(&self.detail.state());
        }
        applied
    }

    /// Default price: order-book mid, else the market's current price for
    /// the selected outcome.
    fn seed_price(&self, detail: &MarketDetailState) {
        self.state.send_if_modified(|s| {
            if s.market_id != detail.market_id() || detail.outcome() != Some(s.form.outcome) {
                return false;
            }
            let seed = detail
                .order_book
                .as_ref()
                .and_then(|book| book.mid_price())
                .or_else(|| detail.market.as_ref().map(|m| m.price(s.form.outcome)));
            match seed {
                Some(price) => s.form.seed_price(price),
                None => false,
            }
        });
    }

    fn edit(&self, f: impl FnOnce(&mut OrderForm)) {
        self.state.send_modify(|s| f(&mut s.form));
    }
}

/// Releases the single-submission slot, also when the submit future is dropped.
struct InFlightGuard<'a>(&'a OrderComposer);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.state.send_if_modified(|s| {
            let was = s.submitting;
            s.submitting = false;
            was
        });
        self.0.in_flight.store(false, Ordering::SeqCst);
    }
}
