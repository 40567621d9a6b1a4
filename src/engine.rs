use crate::admission::{self, Admission, RawOrderRow};
use crate::cursor::AdmittedOrders;
use crate::errors::EngineResult;
use crate::event::{Event, EventSink};
use crate::matching::MatchingCore;
use crate::registry::Registry;

/// Ties the Admission Filter, Input Cursor, and Matching Core together
/// for one run over one symbol universe. Rows are admitted eagerly
/// (their MKT-normalized prices feed the same-side lookahead, which
/// needs to see the full stream), but their events are emitted, and
/// their matching is run, strictly in input order — one row fully
/// processed before the next is considered.
#[derive(Default)]
pub struct Engine {
    registry: Registry,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn run_rows(&mut self, rows: &[RawOrderRow]) -> EngineResult<Vec<Event>> {
        let mut sink = EventSink::new();

        let mut row_events = Vec::with_capacity(rows.len());
        let mut row_admitted_index = Vec::with_capacity(rows.len());
        let mut admitted = Vec::new();
        for (row_index, raw) in rows.iter().enumerate() {
            let (event, admission) = admission::admit(row_index, raw)?;
            row_events.push(event);
            match admission {
                Admission::Admitted(order) => {
                    row_admitted_index.push(Some(admitted.len()));
                    admitted.push(order);
                }
                Admission::Rejected(_) => row_admitted_index.push(None),
            }
        }

        let pending = AdmittedOrders::new(admitted);
        for (row_index, event) in row_events.into_iter().enumerate() {
            sink.push(event);
            if let Some(admitted_index) = row_admitted_index[row_index] {
                MatchingCore::new(&mut self.registry, &mut sink).process_index(&pending, admitted_index)?;
            }
        }

        Ok(sink.into_vec())
    }
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
    fn ack_and_fills_for_one_order_precede_the_next_orders_ack() {
        let rows = vec![
            row("S1", "AAPL", "100.0", "Sell", "10"),
            row("B1", "AAPL", "100.0", "Buy", "10"),
        ];
        let events = Engine::new().run_rows(&rows).unwrap();
        let labels: Vec<&'static str> = events
            .iter()
            .map(|e| match e {
                Event::Ack { .. } => "Ack",
                Event::Reject { .. } => "Reject",
                Event::Fill { .. } => "Fill",
            })
            .collect();
        assert_eq!(labels, vec!["Ack", "Ack", "Fill", "Fill"]);
    }

    #[test]
    fn reject_between_two_crossing_orders_does_not_disturb_order() {
        let rows = vec![
            row("S1", "AAPL", "100.0", "Sell", "10"),
            row("X1", "AAPL", "100.0", "Buy", "5000000"),
            row("B1", "AAPL", "100.0", "Buy", "10"),
        ];
        let events = Engine::new().run_rows(&rows).unwrap();
        let labels: Vec<&'static str> = events
            .iter()
            .map(|e| match e {
                Event::Ack { .. } => "Ack",
                Event::Reject { .. } => "Reject",
                Event::Fill { .. } => "Fill",
            })
            .collect();
        assert_eq!(labels, vec!["Ack", "Reject", "Ack", "Fill", "Fill"]);
    }
}
