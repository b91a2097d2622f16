//! Order book snapshot container.

use crate::domain::order::OrderType;
use crate::domain::orderbook::wire::OrderBookDepthResponse;
use crate::shared::{MarketId, Outcome};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Point-in-time depth for one outcome of a market.
///
/// A fresh fetch replaces the whole snapshot; there is no delta protocol.
/// Levels with the same price are merged and empty levels are dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBookSnapshot {
    pub market_id: MarketId,
    pub outcome: Outcome,
    bids: BTreeMap<Decimal, u64>,
    asks: BTreeMap<Decimal, u64>,
}

impl OrderBookSnapshot {
    pub fn new(market_id: MarketId, outcome: Outcome) -> Self {
        Self {
            market_id,
            outcome,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
        }
    }

    /// Build a snapshot from a depth response.
    pub fn from_depth(market_id: MarketId, outcome: Outcome, depth: &OrderBookDepthResponse) -> Self {
        let mut book = Self::new(market_id, outcome);
        for level in &depth.bids {
            add_level(&mut book.bids, level.price, level.quantity);
        }
        for level in &depth.asks {
            add_level(&mut book.asks, level.price, level.quantity);
        }
        book
    }

    /// Bids, best (highest) price first.
    pub fn bids(&self) -> Vec<(Decimal, u64)> {
        self.bids.iter().rev().map(|(p, q)| (*p, *q)).collect()
    }

    /// Asks, best (lowest) price first.
    pub fn asks(&self) -> Vec<(Decimal, u64)> {
        self.asks.iter().map(|(p, q)| (*p, *q)).collect()
    }

    pub fn top_bids(&self, n: usize) -> Vec<(Decimal, u64)> {
        self.bids.iter().rev().take(n).map(|(p, q)| (*p, *q)).collect()
    }

    pub fn top_asks(&self, n: usize) -> Vec<(Decimal, u64)> {
        self.asks.iter().take(n).map(|(p, q)| (*p, *q)).collect()
    }

    /// Highest bid price.
    pub fn best_bid(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    /// Lowest ask price.
    pub fn best_ask(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    /// Mid price (average of best bid and best ask). `None` if either side is empty.
    pub fn mid_price(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::from(2)),
            _ => None,
        }
    }

    /// Spread between best ask and best bid. `None` if either side is empty.
    pub fn spread(&self) -> Option<Decimal> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Price a market order would trade at first: the best ask for a buy,
    /// the best bid for a sell.
    pub fn estimated_fill_price(&self, order_type: OrderType) -> Option<Decimal> {
        match order_type {
            OrderType::Buy => self.best_ask(),
            OrderType::Sell => self.best_bid(),
        }
    }

    pub fn bid_volume(&self) -> u64 {
        self.bids.values().sum()
    }

    pub fn ask_volume(&self) -> u64 {
        self.asks.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty()
    }
}

fn add_level(side: &mut BTreeMap<Decimal, u64>, price: Decimal, quantity: u64) {
    if quantity == 0 {
        return;
    }
    *side.entry(price.normalize()).or_insert(0) += quantity;
}
