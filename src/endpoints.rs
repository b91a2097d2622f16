//! Endpoint registry: resolves logical API operations to concrete URLs.
//!
//! Call sites never format paths themselves. They name an [`Endpoint`] and the
//! [`EndpointRegistry`] joins the matching [`RouteTable`] template onto the
//! configured base URL. Swapping the base address or fixing a route to match a
//! deployed backend is a configuration change, not a code change.

use crate::error::SdkError;
use crate::shared::{MarketId, Outcome};
use serde::{Deserialize, Serialize};

/// A logical operation on the exchange backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Account,
    Login,
    Logout,
    Register,
    Markets,
    Market(MarketId),
    OrderBook(MarketId, Outcome),
    Portfolio,
    Transactions,
    PlaceOrder,
    Orders,
    CancelOrder(i64),
    AddFunds,
}

impl Endpoint {
    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Account => "account",
            Endpoint::Login => "login",
            Endpoint::Logout => "logout",
            Endpoint::Register => "register",
            Endpoint::Markets => "markets",
            Endpoint::Market(_) => "market",
            Endpoint::OrderBook(..) => "orderbook",
            Endpoint::Portfolio => "portfolio",
            Endpoint::Transactions => "transactions",
            Endpoint::PlaceOrder => "place-order",
            Endpoint::Orders => "orders",
            Endpoint::CancelOrder(_) => "cancel-order",
            Endpoint::AddFunds => "add-funds",
        }
    }
}

/// Path templates for every [`Endpoint`], relative to the base URL.
///
/// Placeholders: `{id}` (market id), `{outcome}`, `{order_id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouteTable {
    pub account: String,
    pub login: String,
    pub logout: String,
    pub register: String,
    pub markets: String,
    pub market: String,
    pub order_book: String,
    pub portfolio: String,
    pub transactions: String,
    pub place_order: String,
    pub orders: String,
    pub cancel_order: String,
    pub add_funds: String,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self {
            account: "api/accounts/account/".into(),
            login: "api/auth/login/".into(),
            logout: "api/auth/logout/".into(),
            register: "api/auth/register/".into(),
            markets: "api/markets/markets/".into(),
            market: "api/markets/markets/{id}/".into(),
            order_book: "api/markets/markets/{id}/orderbook/{outcome}/".into(),
            portfolio: "api/markets/shares/".into(),
            transactions: "api/accounts/account/transactions/".into(),
            place_order: "api/markets/place-order/".into(),
            orders: "api/markets/orders/".into(),
            cancel_order: "api/markets/orders/{order_id}/cancel/".into(),
            add_funds: "api/accounts/add-funds/".into(),
        }
    }
}

impl RouteTable {
    /// Parse a (possibly partial) JSON object of overrides on top of the defaults.
    pub fn from_json(json: &str) -> Result<Self, SdkError> {
        serde_json::from_str(json)
            .map_err(|e| SdkError::Config(format!("invalid route table: {e}")))
    }

    fn template(&self, endpoint: &Endpoint) -> &str {
        match endpoint {
            Endpoint::Account => &self.account,
            Endpoint::Login => &self.login,
            Endpoint::Logout => &self.logout,
            Endpoint::Register => &self.register,
            Endpoint::Markets => &self.markets,
            Endpoint::Market(_) => &self.market,
            Endpoint::OrderBook(..) => &self.order_book,
            Endpoint::Portfolio => &self.portfolio,
            Endpoint::Transactions => &self.transactions,
            Endpoint::PlaceOrder => &self.place_order,
            Endpoint::Orders => &self.orders,
            Endpoint::CancelOrder(_) => &self.cancel_order,
            Endpoint::AddFunds => &self.add_funds,
        }
    }
}

/// Resolves [`Endpoint`]s against a base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRegistry {
    base_url: String,
    routes: RouteTable,
}

impl EndpointRegistry {
    pub fn new(base_url: &str) -> Self {
        Self::with_routes(base_url, RouteTable::default())
    }

    pub fn with_routes(base_url: &str, routes: RouteTable) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            routes,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Concrete URL for a logical operation.
    pub fn url(&self, endpoint: Endpoint) -> String {
        let mut path = self.routes.template(&endpoint).to_string();

        match endpoint {
            Endpoint::Market(id) => {
                path = path.replace("{id}", &id.to_string());
            }
            Endpoint::OrderBook(id, outcome) => {
                path = path
                    .replace("{id}", &id.to_string())
                    .replace("{outcome}", &urlencoding::encode(outcome.as_str()));
            }
            Endpoint::CancelOrder(order_id) => {
                path = path.replace("{order_id}", &order_id.to_string());
            }
            _ => {}
        }

        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

impl Default for EndpointRegistry {
    fn default() -> Self {
        Self::new(crate::network::DEFAULT_API_URL)
    }
}
