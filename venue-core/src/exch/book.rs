use std::cmp::Reverse;
use std::collections::{BTreeMap, VecDeque};
use std::rc::Rc;

use crate::exch::order::OrderRef;

/// LadderKey adapts a price to the key ordering of one side of the book.
///
/// The buy ladder iterates best-bid-first (descending price) and the sell
/// ladder best-ask-first (ascending price). Keeping the adaptation here
/// means the fill loop's "no longer crossing" test is a single comparison
/// under the map's own key order, whichever side it walks.
pub trait LadderKey<P>: Copy + Ord {
    fn from_price(price: P) -> Self;
    fn price(self) -> P;
}

impl<P: Copy + Ord> LadderKey<P> for P {
    fn from_price(price: P) -> Self {
        price
    }

    fn price(self) -> P {
        self
    }
}

impl<P: Copy + Ord> LadderKey<P> for Reverse<P> {
    fn from_price(price: P) -> Self {
        Reverse(price)
    }

    fn price(self) -> P {
        self.0
    }
}

/// The FIFO queue of resting orders at a single price.
pub type PriceRung<P> = VecDeque<OrderRef<P>>;

/// One side of the order book: price levels in match-priority order, each
/// holding its rung of resting orders in arrival order.
pub struct Ladder<P, K: LadderKey<P>> {
    pub(crate) levels: BTreeMap<K, PriceRung<P>>,
}

/// Buy side: descending price, best bid first.
pub type BuyLadder<P> = Ladder<P, Reverse<P>>;
/// Sell side: ascending price, best ask first.
pub type SellLadder<P> = Ladder<P, P>;

impl<P: Copy + Ord, K: LadderKey<P>> Default for Ladder<P, K> {
    fn default() -> Self {
        Self {
            levels: BTreeMap::new(),
        }
    }
}

impl<P: Copy + Ord, K: LadderKey<P>> Ladder<P, K> {
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The last price this side would match at, i.e. the final iteration
    /// point of a full walk. A MARKET order targets this so it sweeps
    /// every level.
    pub fn worst_price(&self) -> Option<P> {
        self.levels.last_key_value().map(|(key, _)| K::price(*key))
    }

    /// Append an order to the back of its price's rung.
    pub fn push(&mut self, order: OrderRef<P>) {
        let price = order.borrow().price;
        self.levels
            .entry(K::from_price(price))
            .or_default()
            .push_back(order);
    }

    /// Remove the order with this order's id from its price rung, if
    /// present. A drained level is dropped from the ladder.
    pub fn remove(&mut self, order: &OrderRef<P>) {
        let (price, id) = {
            let order = order.borrow();
            (order.price, order.id.clone())
        };
        let key = K::from_price(price);
        if let Some(rung) = self.levels.get_mut(&key) {
            if let Some(index) = rung.iter().position(|resting| resting.borrow().id == id) {
                rung.remove(index);
            }
            if rung.is_empty() {
                self.levels.remove(&key);
            }
        }
    }

    /// All resting orders in match-priority order.
    pub fn orders(&self) -> impl Iterator<Item = OrderRef<P>> + '_ {
        self.levels.values().flatten().map(Rc::clone)
    }
}
