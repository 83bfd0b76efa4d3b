//! Immutable depth view of an order book

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Aggregated view of one price level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelSnapshot {
    /// Price of the level
    pub price: f64,

    /// Sum of resting sizes at the level
    pub size: u64,

    /// Number of resting orders at the level
    pub order_count: usize,
}

/// A snapshot of the order book state at a specific point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSnapshot {
    /// The symbol or identifier for this order book
    pub symbol: String,

    /// Last sequence number assigned by the book when the snapshot was taken
    pub sequence: u64,

    /// Timestamp when the snapshot was created (milliseconds since epoch)
    pub timestamp: u64,

    /// Bid levels, best (highest) price first
    pub bids: Vec<LevelSnapshot>,

    /// Offer levels, best (lowest) price first
    pub asks: Vec<LevelSnapshot>,
}

impl BookSnapshot {
    /// Snapshot with no levels on either side.
    pub fn empty(symbol: &str) -> Self {
        Self {
            symbol: symbol.to_string(),
            sequence: 0,
            timestamp: 0,
            bids: Vec::new(),
            asks: Vec::new(),
        }
    }

    /// Get the best bid price and size
    pub fn best_bid(&self) -> Option<(f64, u64)> {
        let bid = self.bids.first().map(|level| (level.price, level.size));
        trace!("best_bid: {:?}", bid);
        bid
    }

    /// Get the best ask price and size
    pub fn best_ask(&self) -> Option<(f64, u64)> {
        let ask = self.asks.first().map(|level| (level.price, level.size));
        trace!("best_ask: {:?}", ask);
        ask
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        let mid_price = match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => Some((bid_price + ask_price) / 2.0),
            _ => None,
        };
        trace!("mid_price: {:?}", mid_price);
        mid_price
    }

    /// Get the spread (best ask - best bid). Negative when the book is crossed.
    pub fn spread(&self) -> Option<f64> {
        let spread = match (self.best_bid(), self.best_ask()) {
            (Some((bid_price, _)), Some((ask_price, _))) => Some(ask_price - bid_price),
            _ => None,
        };
        trace!("spread: {:?}", spread);
        spread
    }

    /// Calculate the total volume on the bid side, saturating at `u64::MAX`
    pub fn total_bid_volume(&self) -> u64 {
        let volume = self
            .bids
            .iter()
            .map(|level| level.size)
            .fold(0, u64::saturating_add);
        trace!("total_bid_volume: {:?}", volume);
        volume
    }

    /// Calculate the total volume on the ask side, saturating at `u64::MAX`
    pub fn total_ask_volume(&self) -> u64 {
        let volume = self
            .asks
            .iter()
            .map(|level| level.size)
            .fold(0, u64::saturating_add);
        trace!("total_ask_volume: {:?}", volume);
        volume
    }
}
