//! High-level client: `PredictionClient` wiring config, transport, session and views.
//!
//! The client owns one [`SessionStore`] for the lifetime of the application
//! and hands out view coordinators that share its backend port.

use crate::api::MarketApi;
use crate::auth::SessionStore;
use crate::endpoints::{EndpointRegistry, RouteTable};
use crate::error::SdkError;
use crate::navigation::Navigator;
use crate::views::{Dashboard, MarketDetail, MarketsList, OrderComposer, Portfolio};

use std::sync::Arc;
use std::time::Duration;

/// The primary entry point.
///
/// Coordinators are created per view; the session store is shared by all of
/// them.
#[derive(Clone)]
pub struct PredictionClient {
    api: Arc<dyn MarketApi>,
    endpoints: EndpointRegistry,
    session: Arc<SessionStore>,
}

impl PredictionClient {
    pub fn builder() -> PredictionClientBuilder {
        PredictionClientBuilder::default()
    }

    /// Run the first account check. Call once at startup, unless the client
    /// came from [`PredictionClientBuilder::connect`].
    pub async fn initialize(&self) {
        self.session.initialize().await;
    }

    pub fn api(&self) -> &Arc<dyn MarketApi> {
        &self.api
    }

    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn navigator(&self) -> Navigator {
        Navigator::new(self.session.clone())
    }

    // ── View coordinators ────────────────────────────────────────────────

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::new(self.api.clone())
    }

    pub fn markets(&self) -> MarketsList {
        MarketsList::new(self.api.clone())
    }

    pub fn market_detail(&self) -> Arc<MarketDetail> {
        Arc::new(MarketDetail::new(self.api.clone()))
    }

    pub fn portfolio(&self) -> Portfolio {
        Portfolio::new(self.api.clone())
    }

    /// An order composer bound to `detail`, which it reloads after each
    /// submission.
    pub fn order_composer(&self, detail: Arc<MarketDetail>) -> OrderComposer {
        OrderComposer::new(self.api.clone(), detail, self.session.clone())
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

pub struct PredictionClientBuilder {
    base_url: String,
    routes: RouteTable,
    request_timeout: Option<Duration>,
    api: Option<Arc<dyn MarketApi>>,
}

impl Default for PredictionClientBuilder {
    fn default() -> Self {
        Self {
            base_url: crate::network::DEFAULT_API_URL.to_string(),
            routes: RouteTable::default(),
            request_timeout: None,
            api: None,
        }
    }
}

impl PredictionClientBuilder {
    /// Builder seeded from `PREDMARKET_API_URL` and `PREDMARKET_ROUTES`.
    pub fn from_env() -> Result<Self, SdkError> {
        let mut builder = Self::default();
        if let Ok(url) = std::env::var(crate::network::API_URL_ENV) {
            if !url.trim().is_empty() {
                builder.base_url = url;
            }
        }
        if let Ok(json) = std::env::var(crate::network::ROUTES_ENV) {
            if !json.trim().is_empty() {
                builder.routes = RouteTable::from_json(&json)?;
            }
        }
        Ok(builder)
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.base_url = url.to_string();
        self
    }

    pub fn routes(mut self, routes: RouteTable) -> Self {
        self.routes = routes;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Use a custom backend port instead of the HTTP transport.
    pub fn api(mut self, api: Arc<dyn MarketApi>) -> Self {
        self.api = Some(api);
        self
    }

    pub fn build(self) -> Result<PredictionClient, SdkError> {
        let endpoints = EndpointRegistry::with_routes(&self.base_url, self.routes);
        let api = match self.api {
            Some(api) => api,
            None => default_transport(&endpoints, self.request_timeout)?,
        };
        tracing::debug!(base_url = endpoints.base_url(), "Prediction client built");

        Ok(PredictionClient {
            session: Arc::new(SessionStore::new(api.clone())),
            api,
            endpoints,
        })
    }

    /// Build the client and run the first account check before returning.
    ///
    /// Prefer this over [`build`](Self::build): until the first check runs,
    /// the session stays loading and protected views stay pending.
    pub async fn connect(self) -> Result<PredictionClient, SdkError> {
        let client = self.build()?;
        client.initialize().await;
        Ok(client)
    }
}

#[cfg(feature = "http")]
fn default_transport(
    endpoints: &EndpointRegistry,
    timeout: Option<Duration>,
) -> Result<Arc<dyn MarketApi>, SdkError> {
    let http = crate::http::MarketHttp::with_timeout(endpoints.clone(), timeout)?;
    Ok(Arc::new(http))
}

#[cfg(not(feature = "http"))]
fn default_transport(
    _endpoints: &EndpointRegistry,
    _timeout: Option<Duration>,
) -> Result<Arc<dyn MarketApi>, SdkError> {
    Err(SdkError::Config(
        "no HTTP transport compiled in; supply one with `.api()`".to_string(),
    ))
}
