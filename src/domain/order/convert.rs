//! Conversion: order wire types → domain types.

use super::wire::{FillResponse, OrderResponse, PlaceOrderResponse};
use super::{Fill, Order, OrderClass, OrderResult, OrderStatus, OrderType};
use crate::shared::{MarketId, Outcome};
use std::fmt;
use std::str::FromStr;

#[derive(Debug)]
pub enum OrderConversionError {
    Multiple(i64, Vec<OrderConversionError>),
    InvalidOrderType(String),
    InvalidOrderClass(String),
    InvalidOutcome(String),
    InvalidStatus(String),
}

impl fmt::Display for OrderConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderConversionError::Multiple(id, errors) => {
                writeln!(f, "Order conversion errors ({id}):")?;
                for err in errors {
                    writeln!(f, "  - {}", err)?;
                }
                Ok(())
            }
            OrderConversionError::InvalidOrderType(s) => write!(f, "Invalid order type: {s}"),
            OrderConversionError::InvalidOrderClass(s) => write!(f, "Invalid order class: {s}"),
            OrderConversionError::InvalidOutcome(s) => write!(f, "Invalid outcome: {s}"),
            OrderConversionError::InvalidStatus(s) => write!(f, "Invalid status: {s}"),
        }
    }
}

impl std::error::Error for OrderConversionError {}

impl TryFrom<OrderResponse> for Order {
    type Error = OrderConversionError;

    fn try_from(source: OrderResponse) -> Result<Self, Self::Error> {
        let mut errors = Vec::new();

        let order_type = OrderType::from_str(&source.order_type);
        if order_type.is_none() {
            errors.push(OrderConversionError::InvalidOrderType(source.order_type.clone()));
        }
        let order_class = OrderClass::from_str(&source.order_class);
        if order_class.is_none() {
            errors.push(OrderConversionError::InvalidOrderClass(source.order_class.clone()));
        }
        let outcome = Outcome::from_str(&source.outcome).ok();
        if outcome.is_none() {
            errors.push(OrderConversionError::InvalidOutcome(source.outcome.clone()));
        }
        let status = OrderStatus::from_str(&source.status);
        if status.is_none() {
            errors.push(OrderConversionError::InvalidStatus(source.status.clone()));
        }

        match (order_type, order_class, outcome, status) {
            (Some(order_type), Some(order_class), Some(outcome), Some(status)) => Ok(Order {
                id: source.id,
                market_id: MarketId::new(source.market),
                market_title: source.market_title.unwrap_or_default(),
                order_type,
                order_class,
                outcome,
                quantity: source.quantity,
                price: source.price,
                filled_quantity: source.filled_quantity,
                remaining_quantity: source.remaining_quantity,
                status,
                created_at: source.created_at,
                updated_at: source.updated_at,
                filled_at: source.filled_at,
            }),
            _ => Err(OrderConversionError::Multiple(source.id, errors)),
        }
    }
}

impl From<FillResponse> for Fill {
    fn from(source: FillResponse) -> Self {
        Fill {
            price: source.price,
            quantity: source.quantity,
            counterparty: source.counterparty,
        }
    }
}

impl From<PlaceOrderResponse> for OrderResult {
    fn from(source: PlaceOrderResponse) -> Self {
        let order = source.order.and_then(|o| match Order::try_from(o) {
            Ok(order) => Some(order),
            Err(e) => {
                tracing::warn!("Ignoring malformed order in place-order response: {}", e);
                None
            }
        });
        OrderResult {
            fills: source.fills.into_iter().map(Fill::from).collect(),
            message: source.message,
            order,
        }
    }
}

/// Convert an order listing, dropping (and logging) malformed entries.
pub fn orders_from_wire(source: Vec<OrderResponse>) -> Vec<Order> {
    source
        .into_iter()
        .filter_map(|o| match Order::try_from(o) {
            Ok(order) => Some(order),
            Err(e) => {
                tracing::warn!("Skipping invalid order: {}", e);
                None
            }
        })
        .collect()
}
