//! Common imports for users of the order book.
//!
//! ```
//! use lob_rs::prelude::*;
//! ```

pub use crate::orderbook::{
    BookConfig, BookManager, BookSequencer, BookSnapshot, DuplicatePolicy, LevelSnapshot,
    ModifyPolicy, Order, OrderBook, OrderBookError, OrderId, Price, SequencerHandle, Side,
};
pub use crate::utils::current_time_millis;
