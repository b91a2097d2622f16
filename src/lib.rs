//! # predmarket-client
//!
//! Client-side layer for a binary prediction-market exchange: session state,
//! view data coordinators, and an order composer over a cookie-authenticated
//! REST backend.
//!
//! ## Architecture
//!
//! The crate is organized in layers:
//!
//! 1. **Core**: Newtypes, domain models, errors (no I/O)
//! 2. **Endpoints**: `EndpointRegistry` resolving logical operations to URLs
//! 3. **Transport**: the `MarketApi` port and its reqwest implementation, `MarketHttp`
//! 4. **Session**: `SessionStore` state machine and the navigation guard
//! 5. **Views**: per-view coordinators and the `OrderComposer`
//! 6. **High-Level Client**: `PredictionClient` wiring it all together
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use predmarket_client::prelude::*;
//!
//! let client = PredictionClient::builder()
//!     .base_url("http://localhost:8000")
//!     .connect()
//!     .await?;
//!
//! if client.session().login("alice", "secret").await.is_ok() {
//!     let dashboard = client.dashboard();
//!     dashboard.load().await;
//!     println!("{}", format_usd(&dashboard.state().total_value()));
//! }
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared newtypes, serde helpers, and display formatting.
pub mod shared;

/// Domain modules (vertical slices): types, wire types, conversions, state.
pub mod domain;

/// Unified error types.
pub mod error;

/// Network defaults and environment variable names.
pub mod network;

// ── Layer 2: Endpoints ───────────────────────────────────────────────────────

/// Logical operations → URLs.
pub mod endpoints;

// ── Layer 3: Transport ───────────────────────────────────────────────────────

/// The backend port.
pub mod api;

/// HTTP transport with a session cookie jar.
#[cfg(feature = "http")]
pub mod http;

// ── Layer 4: Session ─────────────────────────────────────────────────────────

/// Session identity, credentials, and the session store.
pub mod auth;

/// Route gating on session state.
pub mod navigation;

// ── Layer 5: Views ───────────────────────────────────────────────────────────

/// View data coordinators and the order composer.
pub mod views;

// ── Layer 6: High-Level Client ───────────────────────────────────────────────

/// `PredictionClient`: the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Shared newtypes + formatting
    pub use crate::shared::{format_cents, format_signed_usd, format_usd, MarketId, Outcome};

    // Domain types
    pub use crate::domain::market::{Market, Status};
    pub use crate::domain::order::{
        Banner, BannerKind, Fill, Order, OrderClass, OrderDraft, OrderForm, OrderResult,
        OrderStatus, OrderType, OrderValidationError, Pricing,
    };
    pub use crate::domain::orderbook::OrderBookSnapshot;
    pub use crate::domain::position::{Holdings, Position};
    pub use crate::domain::transaction::{Transaction, TransactionType};

    // Errors
    pub use crate::error::{AuthError, HttpError, SdkError};

    // Endpoints + transport
    pub use crate::api::MarketApi;
    pub use crate::endpoints::{Endpoint, EndpointRegistry, RouteTable};
    #[cfg(feature = "http")]
    pub use crate::http::MarketHttp;
    pub use crate::network::DEFAULT_API_URL;

    // Session + navigation
    pub use crate::auth::{
        AuthResult, NavbarState, Session, SessionSnapshot, SessionStatus, SessionStore,
    };
    pub use crate::navigation::{guard, GuardDecision, Navigator, Route};

    // Views
    pub use crate::views::{
        ComposerError, ComposerState, Dashboard, DashboardState, DetailView, MarketDetail,
        MarketDetailState, MarketsList, MarketsListState, OrderComposer, Portfolio,
        PortfolioState, RequestTracker,
    };

    // Client
    pub use crate::client::{PredictionClient, PredictionClientBuilder};
}
