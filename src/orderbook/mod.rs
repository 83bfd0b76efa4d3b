//! OrderBook implementation for tracking resting limit orders by price level.

pub mod book;
pub mod config;
pub mod error;
pub mod level;
/// Management of independent per-instrument books.
pub mod manager;
/// Contains the core logic for modifying the order book state: adding, removing and modifying orders.
pub mod modifications;
pub mod order;
/// Single-writer event loop owning one book.
pub mod sequencer;
pub mod snapshot;

pub use book::OrderBook;
pub use config::{BookConfig, DEFAULT_SNAPSHOT_DEPTH, DuplicatePolicy, ModifyPolicy};
pub use error::OrderBookError;
pub use level::{BookPrice, PriceLevel};
pub use manager::BookManager;
pub use order::{Order, OrderId, Price, Side};
pub use sequencer::{BookSequencer, SequencerHandle};
pub use snapshot::{BookSnapshot, LevelSnapshot};
