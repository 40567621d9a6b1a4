use std::io::{Read, Write};

use crate::admission::RawOrderRow;
use crate::errors::{EngineError, EngineResult};
use crate::event::Event;

/// Reads the `OrderID,Symbol,Price,Side,OrderQuantity` CSV boundary
/// format into raw rows, in file order.
pub fn read_orders<R: Read>(reader: R) -> EngineResult<Vec<RawOrderRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for record in csv_reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

/// One output row: `ActionType,OrderID,Symbol,Price,Side,OrderQuantity,FillPrice,FillQuantity`.
/// `Ack`/`Reject` rows leave the fill columns empty; `Fill` rows
/// populate every column.
#[derive(Debug, serde::Serialize)]
struct EventRow {
    #[serde(rename = "ActionType")]
    action_type: &'static str,
    #[serde(rename = "OrderID")]
    order_id: String,
    #[serde(rename = "Symbol")]
    symbol: String,
    #[serde(rename = "Price")]
    price: String,
    #[serde(rename = "Side")]
    side: &'static str,
    #[serde(rename = "OrderQuantity")]
    order_quantity: u64,
    #[serde(rename = "FillPrice")]
    fill_price: String,
    #[serde(rename = "FillQuantity")]
    fill_quantity: String,
}

impl From<&Event> for EventRow {
    fn from(event: &Event) -> Self {
        match event {
            Event::Ack { order_id, symbol, price, side, qty } => EventRow {
                action_type: "Ack",
                order_id: order_id.clone(),
                symbol: symbol.clone(),
                price: price.to_string(),
                side: side.as_str(),
                order_quantity: *qty,
                fill_price: String::new(),
                fill_quantity: String::new(),
            },
            Event::Reject { order_id, symbol, price, side, qty } => EventRow {
                action_type: "Reject",
                order_id: order_id.clone(),
                symbol: symbol.clone(),
                price: price.to_string(),
                side: side.as_str(),
                order_quantity: *qty,
                fill_price: String::new(),
                fill_quantity: String::new(),
            },
            Event::Fill {
                order_id,
                symbol,
                side,
                original_qty,
                quoted_price,
                fill_price,
                fill_qty,
            } => EventRow {
                action_type: "Fill",
                order_id: order_id.clone(),
                symbol: symbol.clone(),
                price: quoted_price.to_string(),
                side: side.as_str(),
                order_quantity: *original_qty,
                fill_price: fill_price.to_string(),
                fill_quantity: fill_qty.to_string(),
            },
        }
    }
}

/// Writes the event log as CSV, preserving the sink's append order.
pub fn write_events<W: Write>(writer: W, events: &[Event]) -> EngineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for event in events {
        csv_writer.serialize(EventRow::from(event))?;
    }
    csv_writer.flush().map_err(EngineError::Io)?;
    Ok(())
}
