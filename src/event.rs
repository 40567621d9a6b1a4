use crate::order::Side;
use crate::price::Price;

/// One admission or fill record. The [`EventSink`] preserves strict
/// append order — this is the entire audit trail of a run.
#[derive(Debug, Clone)]
pub enum Event {
    Ack {
        order_id: String,
        symbol: String,
        price: Price,
        side: Side,
        qty: u64,
    },
    Reject {
        order_id: String,
        symbol: String,
        price: Price,
        side: Side,
        qty: u64,
    },
    Fill {
        order_id: String,
        symbol: String,
        side: Side,
        original_qty: u64,
        /// The order's own quoted price (`MKT` renders for market orders).
        quoted_price: Price,
        fill_price: Price,
        fill_qty: u64,
    },
}

/// Append-only ordered log. `push` is the single mutation point; no
/// other component writes events directly.
#[derive(Debug, Default)]
pub struct EventSink {
    events: Vec<Event>,
}

impl EventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn into_vec(self) -> Vec<Event> {
        self.events
    }
}
