use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::level::PriceLevel;
use crate::order::{Order, Side};
use crate::price::Price;

/// Two indexed collections of price levels for one symbol: bids
/// (max-priority) and asks (min-priority). A resting MKT order is the
/// best price on its own side by construction, so it lives in a
/// dedicated slot rather than the `Decimal`-keyed maps — a `BTreeMap`
/// key space can't express "better than every possible `Decimal`"
/// without a wrapper that every lookup would have to branch on anyway.
#[derive(Debug, Default)]
pub struct OrderBook {
    bids: BTreeMap<Decimal, PriceLevel>,
    asks: BTreeMap<Decimal, PriceLevel>,
    bid_market: Option<PriceLevel>,
    ask_market: Option<PriceLevel>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn best_bid(&self) -> Option<Price> {
        if self.bid_market.as_ref().is_some_and(|l| !l.is_empty()) {
            return Some(Price::Market);
        }
        self.bids.keys().next_back().copied().map(Price::Limit)
    }

    pub fn best_ask(&self) -> Option<Price> {
        if self.ask_market.as_ref().is_some_and(|l| !l.is_empty()) {
            return Some(Price::Market);
        }
        self.asks.keys().next().copied().map(Price::Limit)
    }

    /// Best price strictly inside the MKT sentinel on the ask side —
    /// i.e. the best concrete limit ask, ignoring any resting MKT sells.
    pub fn second_best_ask_excluding_market(&self) -> Option<Decimal> {
        self.asks.keys().next().copied()
    }

    /// Best price strictly inside the MKT sentinel on the bid side.
    pub fn second_best_bid_excluding_market(&self) -> Option<Decimal> {
        self.bids.keys().next_back().copied()
    }

    pub fn insert(&mut self, order: Order) {
        match (order.side, order.quoted_price) {
            (Side::Buy, Price::Market) => self.bid_market.get_or_insert_with(PriceLevel::new).append(order),
            (Side::Sell, Price::Market) => self.ask_market.get_or_insert_with(PriceLevel::new).append(order),
            (Side::Buy, Price::Limit(p)) => self.bids.entry(p).or_default().append(order),
            (Side::Sell, Price::Limit(p)) => self.asks.entry(p).or_default().append(order),
        }
    }

    pub fn level_mut(&mut self, side: Side, price: Price) -> Option<&mut PriceLevel> {
        match (side, price) {
            (Side::Buy, Price::Market) => self.bid_market.as_mut(),
            (Side::Sell, Price::Market) => self.ask_market.as_mut(),
            (Side::Buy, Price::Limit(p)) => self.bids.get_mut(&p),
            (Side::Sell, Price::Limit(p)) => self.asks.get_mut(&p),
        }
    }

    pub fn drop_if_empty(&mut self, side: Side, price: Price) {
        match (side, price) {
            (Side::Buy, Price::Market) => {
                if self.bid_market.as_ref().is_some_and(PriceLevel::is_empty) {
                    self.bid_market = None;
                }
            }
            (Side::Sell, Price::Market) => {
                if self.ask_market.as_ref().is_some_and(PriceLevel::is_empty) {
                    self.ask_market = None;
                }
            }
            (Side::Buy, Price::Limit(p)) => {
                if self.bids.get(&p).is_some_and(PriceLevel::is_empty) {
                    self.bids.remove(&p);
                }
            }
            (Side::Sell, Price::Limit(p)) => {
                if self.asks.get(&p).is_some_and(PriceLevel::is_empty) {
                    self.asks.remove(&p);
                }
            }
        }
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.bids.is_empty() && self.asks.is_empty() && self.bid_market.is_none() && self.ask_market.is_none()
    }
}
