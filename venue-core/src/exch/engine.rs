use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, trace};

use crate::exch::book::{BuyLadder, Ladder, LadderKey, SellLadder};
use crate::exch::error::EngineError;
use crate::exch::order::{OrderRef, OrderType, Quantity, Side, TimeInForce};

/// EngineEvent is the tagged event delivered to the engine's callback.
/// The sink receives every case through the one callable and dispatches
/// by pattern match.
#[derive(Debug, Clone)]
pub enum EngineEvent<P> {
    /// An incoming order matched against a resting one for `quantity`
    /// units. Both orders' quantities have already been decremented.
    Trade {
        new_order: OrderRef<P>,
        existing_order: OrderRef<P>,
        quantity: Quantity,
    },
    /// A resting order was cancelled; `order` is the removed order.
    Cancel { order: OrderRef<P> },
    /// A revise completed, whether the revision filled, rested, or both.
    Revise { order: OrderRef<P> },
}

/// A two-sided limit order book with price/time priority matching.
///
/// The engine is single-threaded; the callback is invoked synchronously
/// from within the call that caused the event, before that call returns.
pub struct MatchingEngine<P: Copy + Ord, F> {
    order_book: HashMap<String, OrderRef<P>>,
    buy_ladder: BuyLadder<P>,
    sell_ladder: SellLadder<P>,
    callback: F,
}

impl<P, F> MatchingEngine<P, F>
where
    P: Copy + Ord,
    F: FnMut(EngineEvent<P>),
{
    pub fn new(callback: F) -> Self {
        Self {
            order_book: HashMap::new(),
            buy_ladder: BuyLadder::default(),
            sell_ladder: SellLadder::default(),
            callback,
        }
    }

    /// Submit a buy order: fill against the sell ladder, then rest the
    /// remainder on the buy side if the order is allowed to rest.
    pub fn buy(&mut self, order: &OrderRef<P>) {
        Self::fill(
            &mut self.order_book,
            &mut self.callback,
            order,
            &mut self.sell_ladder,
            &mut self.buy_ladder,
        );
    }

    /// Submit a sell order: fill against the buy ladder, then rest the
    /// remainder on the sell side if the order is allowed to rest.
    pub fn sell(&mut self, order: &OrderRef<P>) {
        Self::fill(
            &mut self.order_book,
            &mut self.callback,
            order,
            &mut self.buy_ladder,
            &mut self.sell_ladder,
        );
    }

    /// Cancel a resting order and emit `Cancel` with the removed order.
    /// Unknown ids are a silent no-op, so retries are safe.
    pub fn cancel(&mut self, id: &str) {
        let Some(order) = self.order_book.remove(id) else {
            return;
        };
        Self::ladder_del(&mut self.buy_ladder, &mut self.sell_ladder, &order);
        debug!(id = %id, "order cancelled");
        (self.callback)(EngineEvent::Cancel { order });
    }

    /// Atomically cancel the resting order with this order's id and
    /// resubmit the supplied order as a new entry. The original leaves
    /// the book silently (no `Cancel` event); `Revise` is emitted once
    /// the resubmission has filled and/or rested. Unknown ids are a
    /// silent no-op.
    pub fn revise(&mut self, order: &OrderRef<P>) -> Result<(), EngineError> {
        let (id, side) = {
            let order = order.borrow();
            (order.id.clone(), order.side)
        };
        let Some(original) = self.order_book.get(&id).cloned() else {
            return Ok(());
        };
        if side == Side::Unknown {
            return Err(EngineError::InvalidSide);
        }

        self.order_book.remove(&id);
        Self::ladder_del(&mut self.buy_ladder, &mut self.sell_ladder, &original);

        match side {
            Side::Buy => self.buy(order),
            Side::Sell => self.sell(order),
            Side::Unknown => unreachable!("side validated above"),
        }
        debug!(id = %id, "order revised");
        (self.callback)(EngineEvent::Revise {
            order: Rc::clone(order),
        });
        Ok(())
    }

    /// Whether an order with this id is resting in the book.
    pub fn contains(&self, id: &str) -> bool {
        self.order_book.contains_key(id)
    }

    /// Snapshot of one side's resting orders in match-priority order.
    pub fn resting(&self, side: Side) -> Vec<OrderRef<P>> {
        match side {
            Side::Buy => self.buy_ladder.orders().collect(),
            Side::Sell => self.sell_ladder.orders().collect(),
            Side::Unknown => Vec::new(),
        }
    }

    fn ladder_del(buy_ladder: &mut BuyLadder<P>, sell_ladder: &mut SellLadder<P>, order: &OrderRef<P>) {
        let side = order.borrow().side;
        match side {
            Side::Buy => buy_ladder.remove(order),
            Side::Sell => sell_ladder.remove(order),
            Side::Unknown => {}
        }
    }

    /// Fill an order from the opposing ladder, best price outward, each
    /// rung front to back. The rest-or-discard decision is the single
    /// exit step at the bottom: it runs on every path out of the
    /// matching loop so an order is never left half-indexed.
    fn fill<KC, KS>(
        order_book: &mut HashMap<String, OrderRef<P>>,
        callback: &mut F,
        order: &OrderRef<P>,
        compare: &mut Ladder<P, KC>,
        store: &mut Ladder<P, KS>,
    ) where
        KC: LadderKey<P>,
        KS: LadderKey<P>,
    {
        if !compare.is_empty() {
            let target = {
                let order = order.borrow();
                match order.order_type {
                    OrderType::Market => compare.worst_price().unwrap_or(order.price),
                    _ => order.price,
                }
            };
            let target_key = KC::from_price(target);
            let mut remaining = order.borrow().quantity;
            let mut drained = Vec::new();

            for (&level, rung) in compare.levels.iter_mut() {
                if remaining == 0 {
                    break;
                }
                // The limit no longer crosses once the target is strictly
                // worse than this level under the ladder's own ordering.
                if target_key < level {
                    break;
                }

                while remaining > 0 {
                    let Some(existing) = rung.front().cloned() else {
                        break;
                    };
                    let quantity = existing.borrow().quantity;
                    let matched = remaining.min(quantity);

                    remaining -= matched;
                    let quantity = quantity - matched;

                    order.borrow_mut().quantity = remaining;
                    existing.borrow_mut().quantity = quantity;

                    {
                        let new_order = order.borrow();
                        let resting = existing.borrow();
                        trace!(
                            new_order = %new_order.id,
                            existing_order = %resting.id,
                            quantity = matched,
                            "orders matched"
                        );
                    }
                    callback(EngineEvent::Trade {
                        new_order: Rc::clone(order),
                        existing_order: Rc::clone(&existing),
                        quantity: matched,
                    });

                    if quantity == 0 {
                        let filled = existing.borrow().id.clone();
                        order_book.remove(&filled);
                        rung.pop_front();
                    }
                }

                if rung.is_empty() {
                    drained.push(level);
                }
            }

            for level in drained {
                compare.levels.remove(&level);
            }
        }

        // Rest-or-discard: MARKET and IOC orders never rest, nor does a
        // fully filled order. Everything else joins the back of its
        // price's rung and is indexed by id.
        let rest = {
            let order = order.borrow();
            order.order_type != OrderType::Market
                && order.time_in_force != TimeInForce::Ioc
                && order.quantity != 0
        };
        if rest {
            store.push(Rc::clone(order));
            let id = order.borrow().id.clone();
            order_book.insert(id, Rc::clone(order));
        }
    }
}
