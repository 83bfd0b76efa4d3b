//! # In-Memory Limit Order Book
//!
//! A single-instrument limit order book that tracks resting bid and offer
//! liquidity. Orders are grouped into price levels; levels are kept in strict
//! price priority per side and orders inside a level in strict time priority.
//! The book never matches or executes; it only tracks what is resting and
//! answers depth and top-of-book queries.
//!
//! ## Key Features
//!
//! - **Price-Level Index**: Bids iterate highest price first, offers lowest
//!   price first. Level 1 is always the best price on its side.
//!
//! - **Deterministic Time Priority**: Every insertion gets the next value of a
//!   per-book sequence counter. FIFO order inside a level follows that
//!   sequence, never the wall clock.
//!
//! - **Identity Registry**: Each resting order id maps to its level and queue
//!   position, so removal and modification never scan the book.
//!
//! - **Level Cleanup**: A level whose last order leaves is deleted and stops
//!   counting toward depth.
//!
//! - **Single Writer by Construction**: Mutations take `&mut self`. For shared
//!   use, [`BookSequencer`] moves a book into a tokio task that applies commands
//!   in arrival order and publishes an immutable [`BookSnapshot`] after every
//!   change.
//!
//! ## Error Policy
//!
//! Malformed structural input (unknown side code, non-positive size, non-finite
//! or negative price, level 0 or past the current depth, duplicate resting id)
//! is reported as an [`OrderBookError`]. Removing or modifying an unknown id is
//! a silent no-op: the order may already have been filled or cancelled
//! elsewhere.
//!
//! ## Example
//!
//! ```
//! use lob_rs::prelude::*;
//!
//! # fn main() -> Result<(), OrderBookError> {
//! let mut book = OrderBook::new("BTC/USD");
//! book.add_order(Order::new(1, Side::Bid, 100.0, 100)?)?;
//! book.add_order(Order::new(2, Side::Bid, 101.0, 200)?)?;
//! book.add_order(Order::new(3, Side::Offer, 99.0, 300)?)?;
//! book.add_order(Order::new(4, Side::Offer, 98.0, 400)?)?;
//!
//! assert_eq!(book.size_at_level(Side::Bid, 1)?, 200);
//! assert_eq!(book.price_for_level(Side::Offer, 1)?, 98.0);
//!
//! book.remove_order(2);
//! assert_eq!(book.size_at_level(Side::Bid, 1)?, 100);
//! assert!(book.price_for_level(Side::Bid, 2).is_err());
//!
//! book.modify_order(3, 350)?;
//! assert_eq!(book.size_at_level(Side::Offer, 2)?, 350);
//! # Ok(())
//! # }
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events (`trace` for each operation, `debug` for
//! level creation and removal, `warn` for rejected duplicates, `info` for
//! sequencer and manager lifecycle). It never installs a subscriber.

pub mod orderbook;

pub mod prelude;
mod utils;

pub use orderbook::{
    BookConfig, BookManager, BookSequencer, BookSnapshot, DuplicatePolicy, LevelSnapshot,
    ModifyPolicy, Order, OrderBook, OrderBookError, OrderId, Price, SequencerHandle, Side,
};
pub use utils::current_time_millis;
