use crate::price::Price;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(self) -> &'static str {
        match self {
            Side::Buy => "Buy",
            Side::Sell => "Sell",
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Buy => Side::Sell,
            Side::Sell => Side::Buy,
        }
    }
}

/// One admitted order. Identity fields never change after admission;
/// `qty_remaining` is the only mutable execution state, and the
/// Matching Core is the only component that mutates it.
#[derive(Debug, Clone)]
pub struct Order {
    pub order_id: String,
    pub symbol: String,
    pub side: Side,
    pub original_qty: u64,
    /// MKT-normalized price: `Price::Market` for a market order,
    /// `Price::Limit(_)` otherwise. Also the price rendered on output —
    /// `Price::Market` always displays as `MKT`.
    pub quoted_price: Price,
    pub qty_remaining: u64,
}

impl Order {
    pub fn new(order_id: String, symbol: String, side: Side, original_qty: u64, quoted_price: Price) -> Self {
        Self {
            order_id,
            symbol,
            side,
            original_qty,
            quoted_price,
            qty_remaining: original_qty,
        }
    }

    pub fn qty_done(&self) -> u64 {
        self.original_qty - self.qty_remaining
    }
}
