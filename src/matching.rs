use rust_decimal::Decimal;

use crate::cursor::AdmittedOrders;
use crate::errors::{EngineError, EngineResult};
use crate::event::{Event, EventSink};
use crate::order::{Order, Side};
use crate::price::Price;
use crate::registry::Registry;

/// Drives the crossing loop for every admitted order, in input order.
/// The Matching Core is the only mutator of [`Registry`]'s books.
pub struct MatchingCore<'a> {
    registry: &'a mut Registry,
    sink: &'a mut EventSink,
}

impl<'a> MatchingCore<'a> {
    pub fn new(registry: &'a mut Registry, sink: &'a mut EventSink) -> Self {
        Self { registry, sink }
    }

    /// Processes every admitted order in `pending`, in order. Each order
    /// is fully matched against available liquidity before the next one
    /// is considered.
    pub fn run(&mut self, pending: &AdmittedOrders) -> EngineResult<()> {
        for index in 0..pending.len() {
            self.process_index(pending, index)?;
        }
        Ok(())
    }

    /// Fully matches a single admitted order (by its position in
    /// `pending`) and rests any residual. Exposed separately from
    /// [`Self::run`] so a driver can interleave this with the Ack/Reject
    /// event for this same order and for rows rejected in between
    /// (so a driver can interleave per-order events exactly as they occur).
    /// An order halted by an unresolvable MKT-vs-MKT cross is left
    /// unfilled and is not rested — resting it at its sentinel would
    /// poison later same-side lookaheads indefinitely.
    pub fn process_index(&mut self, pending: &AdmittedOrders, index: usize) -> EngineResult<()> {
        let mut aggressor = pending.get(index).expect("index in range").clone();
        let halted_unpriceable = self.process_one(&mut aggressor, pending, index)?;
        if !halted_unpriceable && aggressor.qty_remaining > 0 {
            self.registry.book_mut(&aggressor.symbol).insert(aggressor);
        }
        Ok(())
    }

    /// Returns `true` if matching stopped because a cross could not be
    /// priced, as opposed to the aggressor being filled or simply
    /// running out of crossing liquidity.
    fn process_one(&mut self, aggressor: &mut Order, pending: &AdmittedOrders, index: usize) -> EngineResult<bool> {
        loop {
            if aggressor.qty_remaining == 0 {
                return Ok(false);
            }
            let side = aggressor.side;
            let best_contra = {
                let book = self.registry.book_mut(&aggressor.symbol);
                match side {
                    Side::Buy => book.best_ask(),
                    Side::Sell => book.best_bid(),
                }
            };
            let Some(best_contra) = best_contra else {
                return Ok(false);
            };
            if !crosses(side, aggressor.quoted_price, best_contra) {
                return Ok(false);
            }

            match self.level_match(aggressor, pending, index, best_contra)? {
                LevelMatchOutcome::Matched => continue,
                LevelMatchOutcome::Unpriceable => {
                    tracing::warn!(
                        order_id = %aggressor.order_id,
                        "unpriceable MKT-vs-MKT cross; halting match for this order"
                    );
                    return Ok(true);
                }
            }
        }
    }

    /// Consumes the head contra level at `best_contra`, FIFO, emitting a
    /// passive `Fill` per counterparty consumed and a single aggregate
    /// aggressor `Fill` once the level match is complete.
    fn level_match(
        &mut self,
        aggressor: &mut Order,
        pending: &AdmittedOrders,
        index: usize,
        best_contra: Price,
    ) -> EngineResult<LevelMatchOutcome> {
        let contra_side = aggressor.side.opposite();

        let trade_price = match self.trade_price(aggressor, pending, index, contra_side, best_contra) {
            Some(p) => p,
            None => return Ok(LevelMatchOutcome::Unpriceable),
        };

        let book = self.registry.book_mut(&aggressor.symbol);
        let level = book
            .level_mut(contra_side, best_contra)
            .expect("cross condition implies a non-empty contra level exists");

        let avail = level.total_qty();
        let match_qty = avail.min(aggressor.qty_remaining);
        if match_qty == 0 {
            return Err(EngineError::Invariant(format!(
                "level match for order {} at {best_contra} traded a non-positive quantity",
                aggressor.order_id
            )));
        }

        let mut remaining = match_qty;
        while remaining > 0 {
            let head = level
                .peek_head_mut()
                .expect("avail was summed from these same resting orders");
            let take = remaining.min(head.qty_remaining);
            head.qty_remaining -= take;
            self.sink.push(Event::Fill {
                order_id: head.order_id.clone(),
                symbol: head.symbol.clone(),
                side: head.side,
                original_qty: head.original_qty,
                quoted_price: head.quoted_price,
                fill_price: Price::Limit(trade_price),
                fill_qty: take,
            });
            if head.qty_remaining == 0 {
                level.pop_head();
            }
            remaining -= take;
        }

        aggressor.qty_remaining -= match_qty;
        self.sink.push(Event::Fill {
            order_id: aggressor.order_id.clone(),
            symbol: aggressor.symbol.clone(),
            side: aggressor.side,
            original_qty: aggressor.original_qty,
            quoted_price: aggressor.quoted_price,
            fill_price: Price::Limit(trade_price),
            fill_qty: match_qty,
        });

        book.drop_if_empty(contra_side, best_contra);
        Ok(LevelMatchOutcome::Matched)
    }

    /// Trade-price determination, the subtle part of a level match: a
    /// concrete contra price wins outright; otherwise the resting level
    /// is MKT, and price is sourced from the aggressor's own limit, then
    /// the contra side's best non-sentinel price, then a same-side
    /// lookahead over the remaining admitted stream.
    fn trade_price(
        &mut self,
        aggressor: &Order,
        pending: &AdmittedOrders,
        index: usize,
        contra_side: Side,
        best_contra: Price,
    ) -> Option<Decimal> {
        if let Price::Limit(b) = best_contra {
            return Some(b);
        }
        if let Price::Limit(p) = aggressor.quoted_price {
            return Some(p);
        }

        let book = self.registry.book_mut(&aggressor.symbol);
        let informative = match contra_side {
            Side::Sell => book.second_best_ask_excluding_market(),
            Side::Buy => book.second_best_bid_excluding_market(),
        };
        if let Some(p) = informative {
            return Some(p);
        }

        lookahead_price(pending, index, aggressor.side)
    }
}

enum LevelMatchOutcome {
    Matched,
    Unpriceable,
}

/// Buy crosses if its price is at least the best ask (MKT buy crosses
/// any ask); sell crosses if its price is at most the best bid (MKT
/// sell crosses any bid). A resting MKT level is always crossable from
/// the other side's perspective since it is the side's best price.
fn crosses(side: Side, price: Price, best_contra: Price) -> bool {
    match (price, best_contra) {
        (Price::Market, _) => true,
        (_, Price::Market) => true,
        (Price::Limit(p), Price::Limit(b)) => match side {
            Side::Buy => p >= b,
            Side::Sell => p <= b,
        },
    }
}

/// Next admitted order, starting at `index`, on `side`, whose price is a
/// concrete limit — `side` is the aggressor's own side, not the contra
/// side.
fn lookahead_price(pending: &AdmittedOrders, index: usize, side: Side) -> Option<Decimal> {
    pending
        .peek_from(index)
        .find_map(|o| if o.side == side { o.quoted_price.as_limit() } else { None })
}
