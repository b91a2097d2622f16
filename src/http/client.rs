//! Low-level HTTP client: `MarketHttp`.
//!
//! One method per logical endpoint. Responses are decoded into wire types and
//! converted to domain types before they leave this module. Every request
//! carries the session cookie from the client's cookie jar.

use crate::api::MarketApi;
use crate::auth::{AccountResponse, LoginForm, RegisterRequest, Session};
use crate::domain::market::wire::MarketResponse;
use crate::domain::market::{markets_from_wire, Market};
use crate::domain::order::wire::{
    AddFundsRequest, AddFundsResponse, MessageResponse, OrderResponse, PlaceOrderRequest,
    PlaceOrderResponse,
};
use crate::domain::order::{orders_from_wire, Order, OrderResult};
use crate::domain::orderbook::wire::OrderBookDepthResponse;
use crate::domain::orderbook::OrderBookSnapshot;
use crate::domain::position::wire::ShareResponse;
use crate::domain::position::{positions_from_wire, Position};
use crate::domain::transaction::wire::TransactionResponse;
use crate::domain::transaction::Transaction;
use crate::endpoints::{Endpoint, EndpointRegistry};
use crate::error::{HttpError, SdkError};
use crate::shared::{MarketId, Outcome};

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// List endpoints answer with a bare array, or with a page object when the
/// backend has pagination switched on.
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing<T> {
    Plain(Vec<T>),
    Paged { results: Vec<T> },
}

impl<T> Listing<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Listing::Plain(items) => items,
            Listing::Paged { results } => results,
        }
    }
}

/// Low-level HTTP client for the exchange REST API.
#[derive(Clone)]
pub struct MarketHttp {
    endpoints: EndpointRegistry,
    client: Client,
}

impl MarketHttp {
    pub fn new(endpoints: EndpointRegistry) -> Result<Self, SdkError> {
        Self::with_timeout(endpoints, None)
    }

    /// Build with an optional per-request timeout. Without one, the
    /// transport default applies.
    pub fn with_timeout(
        endpoints: EndpointRegistry,
        timeout: Option<Duration>,
    ) -> Result<Self, SdkError> {
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.cookie_store(true);
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
        }
        #[cfg(target_arch = "wasm32")]
        let _ = timeout;

        let client = builder
            .build()
            .map_err(|e| SdkError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { endpoints, client })
    }

    pub fn endpoints(&self) -> &EndpointRegistry {
        &self.endpoints
    }

    pub fn base_url(&self) -> &str {
        self.endpoints.base_url()
    }

    // ── Internal HTTP methods ────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, HttpError> {
        let req = self.request(Method::GET, endpoint);
        self.send(endpoint, req).await
    }

    async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        body: &B,
    ) -> Result<T, HttpError> {
        let req = self.request(Method::POST, endpoint).json(body);
        self.send(endpoint, req).await
    }

    async fn post_form<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        endpoint: Endpoint,
        form: &B,
    ) -> Result<T, HttpError> {
        let req = self.request(Method::POST, endpoint).form(form);
        self.send(endpoint, req).await
    }

    fn request(&self, method: Method, endpoint: Endpoint) -> RequestBuilder {
        let url = self.endpoints.url(endpoint);
        tracing::debug!(endpoint = endpoint.name(), %method, %url, "HTTP request");
        self.client.request(method, url)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        req: RequestBuilder,
    ) -> Result<T, HttpError> {
        let resp = req.send().await?;
        let status = resp.status();
        let status_code = status.as_u16();
        let body_text = resp.text().await?;
        tracing::debug!(endpoint = endpoint.name(), status = status_code, "HTTP response");

        if status.is_success() {
            // Acknowledgement endpoints may answer with an empty body.
            let text = if body_text.trim().is_empty() { "null" } else { &body_text };
            return serde_json::from_str(text).map_err(|e| HttpError::Decode {
                endpoint: endpoint.name().to_string(),
                reason: e.to_string(),
            });
        }

        match status_code {
            401 | 403 => Err(HttpError::Unauthorized(body_text)),
            404 => Err(HttpError::NotFound(body_text)),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

#[async_trait]
impl MarketApi for MarketHttp {
    // ── Auth ─────────────────────────────────────────────────────────────

    async fn account(&self) -> Result<Session, SdkError> {
        let resp: AccountResponse = self.get(Endpoint::Account).await?;
        Ok(Session::from(resp))
    }

    async fn login(&self, credentials: &LoginForm) -> Result<(), SdkError> {
        let _: Option<MessageResponse> = self.post_form(Endpoint::Login, credentials).await?;
        Ok(())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), SdkError> {
        let _: Option<MessageResponse> = self.post_json(Endpoint::Register, request).await?;
        Ok(())
    }

    async fn logout(&self) -> Result<(), SdkError> {
        let _: Option<MessageResponse> = self
            .post_json(Endpoint::Logout, &serde_json::json!({}))
            .await?;
        Ok(())
    }

    // ── Markets ──────────────────────────────────────────────────────────

    async fn markets(&self) -> Result<Vec<Market>, SdkError> {
        let resp: Listing<MarketResponse> = self.get(Endpoint::Markets).await?;
        Ok(markets_from_wire(resp.into_vec()))
    }

    async fn market(&self, id: MarketId) -> Result<Market, SdkError> {
        let resp: MarketResponse = self.get(Endpoint::Market(id)).await?;
        Market::try_from(resp).map_err(|e| SdkError::Validation(e.to_string()))
    }

    async fn order_book(
        &self,
        id: MarketId,
        outcome: Outcome,
    ) -> Result<OrderBookSnapshot, SdkError> {
        let resp: OrderBookDepthResponse = self.get(Endpoint::OrderBook(id, outcome)).await?;
        Ok(OrderBookSnapshot::from_depth(id, outcome, &resp))
    }

    // ── Account ──────────────────────────────────────────────────────────

    async fn portfolio(&self) -> Result<Vec<Position>, SdkError> {
        let resp: Listing<ShareResponse> = self.get(Endpoint::Portfolio).await?;
        Ok(positions_from_wire(resp.into_vec()))
    }

    async fn transactions(&self) -> Result<Vec<Transaction>, SdkError> {
        let resp: Listing<TransactionResponse> = self.get(Endpoint::Transactions).await?;
        Ok(resp.into_vec().into_iter().map(Transaction::from).collect())
    }

    async fn add_funds(&self, amount: Decimal) -> Result<Decimal, SdkError> {
        let resp: AddFundsResponse = self
            .post_json(Endpoint::AddFunds, &AddFundsRequest { amount })
            .await?;
        Ok(resp.new_balance)
    }

    // ── Orders ───────────────────────────────────────────────────────────

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<OrderResult, SdkError> {
        let resp: PlaceOrderResponse = self.post_json(Endpoint::PlaceOrder, request).await?;
        Ok(OrderResult::from(resp))
    }

    async fn orders(&self) -> Result<Vec<Order>, SdkError> {
        let resp: Listing<OrderResponse> = self.get(Endpoint::Orders).await?;
        Ok(orders_from_wire(resp.into_vec()))
    }

    async fn cancel_order(&self, order_id: i64) -> Result<Option<String>, SdkError> {
        let resp: Option<MessageResponse> = self
            .post_json(Endpoint::CancelOrder(order_id), &serde_json::json!({}))
            .await?;
        Ok(resp.and_then(|r| r.message))
    }
}
