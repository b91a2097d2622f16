//! HTTP transport: `MarketHttp`, the cookie-credentialed [`MarketApi`](crate::api::MarketApi).

pub mod client;

pub use client::MarketHttp;
