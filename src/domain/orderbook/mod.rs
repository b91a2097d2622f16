//! Orderbook domain: depth snapshot for one outcome of a market.

pub mod state;
pub mod wire;

pub use state::OrderBookSnapshot;
