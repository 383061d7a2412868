#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Once;

use venue_core::prelude::*;

pub type Events = Rc<RefCell<Vec<EngineEvent<i64>>>>;

static TRACING: Once = Once::new();

/// Install a fmt subscriber once so RUST_LOG exposes engine traces
/// during test runs.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// An engine whose callback records every event for later inspection.
pub fn recording_engine() -> (
    MatchingEngine<i64, impl FnMut(EngineEvent<i64>)>,
    Events,
) {
    let events: Events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    let engine = MatchingEngine::new(move |event| sink.borrow_mut().push(event));
    (engine, events)
}

pub fn make_order(
    side: Side,
    order_type: OrderType,
    time_in_force: TimeInForce,
    price: i64,
    quantity: u64,
    id: &str,
) -> OrderRef<i64> {
    Order::new(side, order_type, time_in_force, price, quantity, id).into_ref()
}

/// Quickly generate a simple limit order for testing
pub fn make_limit(
    side: Side,
    time_in_force: TimeInForce,
    price: i64,
    quantity: u64,
    id: &str,
) -> OrderRef<i64> {
    make_order(side, OrderType::Limit, time_in_force, price, quantity, id)
}

/// Quickly generate a market order for testing
pub fn make_market(side: Side, quantity: u64, id: &str) -> OrderRef<i64> {
    make_order(side, OrderType::Market, TimeInForce::Day, 0, quantity, id)
}

/// Get the current state of a side of the book
pub fn book_state<F>(engine: &MatchingEngine<i64, F>, side: Side) -> Vec<(String, u64)>
where
    F: FnMut(EngineEvent<i64>),
{
    engine
        .resting(side)
        .iter()
        .map(|order| {
            let order = order.borrow();
            (order.id.clone(), order.quantity)
        })
        .collect()
}

/// The `(new_order, existing_order, quantity)` triple of every recorded trade.
pub fn trades(events: &Events) -> Vec<(String, String, u64)> {
    events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Trade {
                new_order,
                existing_order,
                quantity,
            } => Some((
                new_order.borrow().id.clone(),
                existing_order.borrow().id.clone(),
                *quantity,
            )),
            _ => None,
        })
        .collect()
}

/// The ids of every recorded cancel, in emission order.
pub fn cancels(events: &Events) -> Vec<String> {
    events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Cancel { order } => Some(order.borrow().id.clone()),
            _ => None,
        })
        .collect()
}

/// The ids of every recorded revise, in emission order.
pub fn revises(events: &Events) -> Vec<String> {
    events
        .borrow()
        .iter()
        .filter_map(|event| match event {
            EngineEvent::Revise { order } => Some(order.borrow().id.clone()),
            _ => None,
        })
        .collect()
}
