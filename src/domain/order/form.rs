//! Editable order form and its pre-submit validation.

use super::{OrderClass, OrderDraft, OrderType, OrderValidationError, Pricing};
use crate::domain::orderbook::OrderBookSnapshot;
use crate::shared::Outcome;
use rust_decimal::Decimal;

/// The order form as the user is editing it.
///
/// Fields hold whatever was entered; nothing here is guaranteed valid until
/// [`OrderForm::draft`] succeeds. The price is kept when switching to a market
/// order so it is still there when switching back to limit.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    pub order_type: OrderType,
    pub order_class: OrderClass,
    pub outcome: Outcome,
    pub quantity: i64,
    pub price: Option<Decimal>,
    price_touched: bool,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self {
            order_type: OrderType::Buy,
            order_class: OrderClass::Limit,
            outcome: Outcome::Yes,
            quantity: 1,
            price: None,
            price_touched: false,
        }
    }
}

impl OrderForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to defaults, keeping the selected outcome.
    pub fn reset(&mut self) {
        *self = Self {
            outcome: self.outcome,
            ..Self::default()
        };
    }

    /// Price entered by the user. Stops further default seeding.
    pub fn set_price(&mut self, price: Option<Decimal>) {
        self.price = price;
        self.price_touched = true;
    }

    /// Whether the user has edited the price since the form was last reset.
    pub fn price_touched(&self) -> bool {
        self.price_touched
    }

    /// Seed the default price unless the user already set one.
    ///
    /// Returns `true` if the price was changed.
    pub fn seed_price(&mut self, price: Decimal) -> bool {
        if self.price_touched || self.price == Some(price) {
            return false;
        }
        self.price = Some(price);
        true
    }

    /// Validate the form into a submittable draft.
    pub fn draft(&self) -> Result<OrderDraft, OrderValidationError> {
        if self.quantity <= 0 {
            return Err(OrderValidationError::QuantityNotPositive(self.quantity));
        }
        let quantity = self.quantity as u64;

        let pricing = match self.order_class {
            OrderClass::Market => Pricing::Market,
            OrderClass::Limit => {
                let price = self.price.ok_or(OrderValidationError::PriceMissing)?;
                if price <= Decimal::ZERO || price >= Decimal::ONE {
                    return Err(OrderValidationError::PriceOutOfRange(price));
                }
                Pricing::Limit { price }
            }
        };

        Ok(OrderDraft {
            order_type: self.order_type,
            outcome: self.outcome,
            quantity,
            pricing,
        })
    }

    /// Price the order is expected to execute at: the entered price for a
    /// limit order, the top of the opposite side of the book for a market order.
    pub fn estimated_price(&self, book: Option<&OrderBookSnapshot>) -> Option<Decimal> {
        match self.order_class {
            OrderClass::Limit => self.price,
            OrderClass::Market => book.and_then(|b| b.estimated_fill_price(self.order_type)),
        }
    }

    /// Quantity × estimated price, when both are known.
    pub fn estimated_total(&self, book: Option<&OrderBookSnapshot>) -> Option<Decimal> {
        if self.quantity <= 0 {
            return None;
        }
        self.estimated_price(book)
            .map(|price| price * Decimal::from(self.quantity))
    }
}
