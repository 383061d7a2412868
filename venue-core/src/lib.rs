//! Core of a small trading venue: a price/time priority matching engine,
//! a FIX 4.2/4.4 wire codec, and a stock-pair divergence monitor.
//!
//! Everything here is single-threaded by contract. The engine, parser,
//! encoder, and monitor assume exclusive access for the duration of any
//! call; callbacks fire synchronously before that call returns.

use mimalloc::MiMalloc;

pub mod convert;
pub mod exch;
pub mod fix;

/// Global allocator
/// Requires the `mimalloc` feature to be enabled in the `Cargo.toml` file.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

pub mod prelude {
    pub use crate::convert::{FromAscii, translate};
    pub use crate::exch::book::{BuyLadder, Ladder, LadderKey, SellLadder};
    pub use crate::exch::engine::{EngineEvent, MatchingEngine};
    pub use crate::exch::error::{EngineError, MonitorError};
    pub use crate::exch::monitor::{DivergeMonitor, PairRef, Stock, StockPair, StockRef};
    pub use crate::exch::order::{Order, OrderRef, OrderType, Quantity, Side, TimeInForce};
    pub use crate::fix::encode::{Encode, FixValue, FixWidthValue};
    pub use crate::fix::error::ParseError;
    pub use crate::fix::parse::{Parser, RawTag};
    pub use crate::fix::tags::{MsgType, SOH, Tag, Version, tag_width};
}
