use rust_decimal::Decimal;

use crate::errors::{EngineError, EngineResult};
use crate::event::Event;
use crate::order::{Order, Side};
use crate::price::Price;

pub const MAX_QTY: u64 = 1_000_000;

/// One row as parsed from the CSV boundary, before admission.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct RawOrderRow {
    #[serde(rename = "OrderID")]
    pub order_id: String,
    #[serde(rename = "Symbol")]
    pub symbol: String,
    #[serde(rename = "Price")]
    pub price: String,
    #[serde(rename = "Side")]
    pub side: String,
    #[serde(rename = "OrderQuantity")]
    pub quantity: String,
}

/// Either the order was accepted into the book (with its MKT-normalized
/// internal price), or it was rejected outright — not entered into any
/// book, but still logged with exactly one `Reject` event.
pub enum Admission {
    Admitted(Order),
    Rejected(Event),
}

/// Classifies one raw row. Fatal format errors (unknown side,
/// unparseable price, non-positive or fractional quantity) abort the
/// run via `Err` — they indicate a malformed feed, not a business
/// outcome. A quantity over [`MAX_QTY`] is a normal, recoverable
/// [`Admission::Rejected`].
pub fn admit(row_index: usize, raw: &RawOrderRow) -> EngineResult<(Event, Admission)> {
    let side = match raw.side.as_str() {
        "Buy" => Side::Buy,
        "Sell" => Side::Sell,
        other => {
            return Err(EngineError::MalformedInput {
                row: row_index,
                reason: format!("unknown side {other:?}"),
            });
        }
    };

    let qty = parse_quantity(row_index, &raw.quantity)?;

    let price = Price::parse(&raw.price).map_err(|e| EngineError::MalformedInput {
        row: row_index,
        reason: format!("unparseable price {:?}: {e}", raw.price),
    })?;

    if qty > MAX_QTY {
        let reject = Event::Reject {
            order_id: raw.order_id.clone(),
            symbol: raw.symbol.clone(),
            price,
            side,
            qty,
        };
        return Ok((reject.clone(), Admission::Rejected(reject)));
    }

    let ack = Event::Ack {
        order_id: raw.order_id.clone(),
        symbol: raw.symbol.clone(),
        price,
        side,
        qty,
    };
    let order = Order::new(raw.order_id.clone(), raw.symbol.clone(), side, qty, price);
    Ok((ack, Admission::Admitted(order)))
}

fn parse_quantity(row_index: usize, raw: &str) -> EngineResult<u64> {
    let decimal: Decimal = raw.trim().parse().map_err(|_| EngineError::MalformedInput {
        row: row_index,
        reason: format!("unparseable quantity {raw:?}"),
    })?;

    if decimal <= Decimal::ZERO {
        return Err(EngineError::MalformedInput {
            row: row_index,
            reason: format!("non-positive quantity {raw:?}"),
        });
    }
    if decimal.fract() != Decimal::ZERO {
        return Err(EngineError::MalformedInput {
            row: row_index,
            reason: format!("fractional quantity {raw:?}"),
        });
    }
    decimal.try_into().map_err(|_| EngineError::MalformedInput {
        row: row_index,
        reason: format!("quantity out of range {raw:?}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: &str, symbol: &str, price: &str, side: &str, qty: &str) -> RawOrderRow {
        RawOrderRow {
            order_id: id.into(),
            symbol: symbol.into(),
            price: price.into(),
            side: side.into(),
            quantity: qty.into(),
        }
    }

    #[test]
    fn admits_a_valid_limit_order() {
        let r = row("B1", "AAPL", "100.0", "Buy", "10");
        let (event, admission) = admit(0, &r).unwrap();
        assert!(matches!(event, Event::Ack { .. }));
        match admission {
            Admission::Admitted(order) => assert_eq!(order.original_qty, 10),
            Admission::Rejected(_) => panic!("expected admission"),
        }
    }

    #[test]
    fn rejects_oversized_quantity() {
        let r = row("B1", "AAPL", "10.0", "Buy", "1500000");
        let (event, admission) = admit(0, &r).unwrap();
        assert!(matches!(event, Event::Reject { .. }));
        assert!(matches!(admission, Admission::Rejected(_)));
    }

    #[test]
    fn unknown_side_is_fatal() {
        let r = row("B1", "AAPL", "10.0", "Hold", "10");
        assert!(admit(0, &r).is_err());
    }

    #[test]
    fn fractional_quantity_is_fatal() {
        let r = row("B1", "AAPL", "10.0", "Buy", "10.5");
        assert!(admit(0, &r).is_err());
    }

    #[test]
    fn mkt_price_normalizes_by_side() {
        let r = row("B1", "AAPL", "MKT", "Buy", "10");
        let (_, admission) = admit(0, &r).unwrap();
        match admission {
            Admission::Admitted(order) => assert_eq!(order.quoted_price, Price::Market),
            _ => panic!("expected admission"),
        }
    }
}
