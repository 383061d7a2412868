use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::exch::error::MonitorError;

/// Traits of a watched stock. A price of 0 means "unset".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stock {
    pub name: String,
    pub price: i64,
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "name[{}] price[{}]", self.name, self.price)
    }
}

/// StockRef is the shared handle to a stock, co-owned by the monitor's
/// lookup table and every pair the stock participates in.
pub type StockRef = Rc<RefCell<Stock>>;

/// A coupled pair of stocks watched for price divergence.
pub struct StockPair {
    stock_one: StockRef,
    stock_two: StockRef,
}

impl StockPair {
    pub fn new(stock_one: StockRef, stock_two: StockRef) -> Self {
        Self {
            stock_one,
            stock_two,
        }
    }

    /// Whether the pair's prices differ by more than `threshold`.
    /// A pair with either price unset never diverges, which keeps
    /// warm-up updates from firing spurious notifications.
    pub fn diverged(&self, threshold: i64) -> bool {
        let one = self.stock_one.borrow();
        let two = self.stock_two.borrow();
        if one.price == 0 || two.price == 0 {
            return false;
        }
        (one.price - two.price).abs() > threshold
    }

    pub fn stock_one(&self) -> Ref<'_, Stock> {
        self.stock_one.borrow()
    }

    pub fn stock_two(&self) -> Ref<'_, Stock> {
        self.stock_two.borrow()
    }
}

impl fmt::Display for StockPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "one[{}] two[{}]", self.stock_one(), self.stock_two())
    }
}

/// PairRef is the shared handle to a pair; each pair is referenced from
/// both constituent stocks' pairing lists.
pub type PairRef = Rc<StockPair>;

struct MonitoredStock {
    stock: StockRef,
    pairings: Vec<PairRef>,
}

/// A stock threshold divergence monitor.
///
/// On each price update, every pair containing the updated stock is
/// checked and `on_notify(changed, other)` fires for each diverged pair,
/// the changed stock always first.
pub struct DivergeMonitor<F> {
    threshold: i64,
    on_notify: F,
    stocks: HashMap<String, MonitoredStock>,
}

impl<F> DivergeMonitor<F>
where
    F: FnMut(&Stock, &Stock),
{
    pub fn new(threshold: i64, on_notify: F) -> Result<Self, MonitorError> {
        if threshold <= 0 {
            return Err(MonitorError::InvalidArgument);
        }
        Ok(Self {
            threshold,
            on_notify,
            stocks: HashMap::new(),
        })
    }

    /// Start monitoring the identified pair of stocks. Unknown stocks are
    /// inserted with an unset price. Watching a stock against itself, or
    /// re-watching an existing pair, is a no-op.
    pub fn monitor(&mut self, stock_one: &str, stock_two: &str) {
        if stock_one == stock_two {
            return;
        }
        self.intern(stock_one);
        self.intern(stock_two);

        let (one, two) = match (self.stocks.get(stock_one), self.stocks.get(stock_two)) {
            (Some(one), Some(two)) => (one, two),
            _ => return,
        };
        for first in &one.pairings {
            for second in &two.pairings {
                // already monitored
                if Rc::ptr_eq(first, second) {
                    return;
                }
            }
        }

        let pair = Rc::new(StockPair::new(
            Rc::clone(&one.stock),
            Rc::clone(&two.stock),
        ));
        if let Some(entry) = self.stocks.get_mut(stock_one) {
            entry.pairings.push(Rc::clone(&pair));
        }
        if let Some(entry) = self.stocks.get_mut(stock_two) {
            entry.pairings.push(pair);
        }
    }

    /// Update the price of the identified stock, creating it if unknown,
    /// then notify for every pair of this stock that has diverged.
    pub fn update(&mut self, name: &str, price: i64) {
        if !self.stocks.contains_key(name) {
            let stock = Rc::new(RefCell::new(Stock {
                name: name.to_owned(),
                price,
            }));
            self.stocks.insert(
                name.to_owned(),
                MonitoredStock {
                    stock,
                    pairings: Vec::new(),
                },
            );
            return;
        }
        let Some(entry) = self.stocks.get_mut(name) else {
            return;
        };

        entry.stock.borrow_mut().price = price;

        let pairings = entry.pairings.clone();
        for pair in pairings {
            if pair.diverged(self.threshold) {
                self.notify(name, &pair);
            }
        }
    }

    /// The pairings involving the named stock; empty for unknown names.
    pub fn pairings(&self, name: &str) -> &[PairRef] {
        self.stocks
            .get(name)
            .map_or(&[], |entry| entry.pairings.as_slice())
    }

    /// Deliver a divergence, the changed stock first.
    fn notify(&mut self, name: &str, pair: &StockPair) {
        let one = pair.stock_one();
        let two = pair.stock_two();
        if name == one.name {
            trace!(changed = %one.name, other = %two.name, "divergence");
            (self.on_notify)(&one, &two);
        } else {
            trace!(changed = %two.name, other = %one.name, "divergence");
            (self.on_notify)(&two, &one);
        }
    }

    fn intern(&mut self, name: &str) {
        if !self.stocks.contains_key(name) {
            let stock = Rc::new(RefCell::new(Stock {
                name: name.to_owned(),
                price: 0,
            }));
            self.stocks.insert(
                name.to_owned(),
                MonitoredStock {
                    stock,
                    pairings: Vec::new(),
                },
            );
        }
    }
}
