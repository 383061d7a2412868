use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

/// Quantity is the type used for order quantities.
pub type Quantity = u64;

/// OrderRef is the shared handle to an order. The engine keeps one clone
/// for as long as the order rests in the book; after a cancel or a full
/// fill the engine's clone is dropped.
pub type OrderRef<P> = Rc<RefCell<Order<P>>>;

/// Side indicates the direction of the order.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug)]
pub enum Side {
    /// Buy means the order takes from the sell ladder and rests on the buy side.
    Buy,
    /// Sell means the order takes from the buy ladder and rests on the sell side.
    Sell,
    /// Unknown is the unset state; the engine rejects it where a side is required.
    #[default]
    Unknown,
}

/// OrderType determines how the order will be executed.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug)]
pub enum OrderType {
    /// Market orders sweep every opposing price level and never rest.
    Market,
    /// Limit orders match up to their own price and may rest the remainder.
    Limit,
    #[default]
    Unknown,
}

/// TimeInForce specifies whether the unfilled remainder may rest in the book.
#[derive(PartialEq, Eq, Default, Copy, Clone, Debug)]
pub enum TimeInForce {
    /// Immediate-or-cancel: fill what crosses now, discard the rest.
    Ioc,
    Day,
    Gtc,
    #[default]
    Unknown,
}

/// A generic order, parameterized by the numeric price type.
///
/// Orders are created by the caller, handed to the engine, and mutated
/// only by the engine: `quantity` is decremented as fills occur. While an
/// order rests in the book its quantity is strictly positive.
#[derive(Debug, Clone)]
pub struct Order<P> {
    pub id: String,
    pub side: Side,
    pub order_type: OrderType,
    pub time_in_force: TimeInForce,
    pub price: P,
    pub quantity: Quantity,
    pub created_at: Instant,
}

impl<P> Order<P> {
    pub fn new(
        side: Side,
        order_type: OrderType,
        time_in_force: TimeInForce,
        price: P,
        quantity: Quantity,
        id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            side,
            order_type,
            time_in_force,
            price,
            quantity,
            created_at: Instant::now(),
        }
    }

    /// Wrap the order in the shared handle the engine operates on.
    pub fn into_ref(self) -> OrderRef<P> {
        Rc::new(RefCell::new(self))
    }
}
