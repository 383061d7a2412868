#![allow(dead_code)]

use venue_core::prelude::*;

/// Quickly generate a simple limit order for benching
pub fn make_limit_order(side: Side, price: i64, quantity: u64, id: &str) -> OrderRef<i64> {
    Order::new(
        side,
        OrderType::Limit,
        TimeInForce::Day,
        price,
        quantity,
        id,
    )
    .into_ref()
}

/// Quickly generate a market order for benching
pub fn make_market_order(side: Side, quantity: u64, id: &str) -> OrderRef<i64> {
    Order::new(side, OrderType::Market, TimeInForce::Day, 0, quantity, id).into_ref()
}
