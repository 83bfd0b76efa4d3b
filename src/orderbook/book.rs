//! Core OrderBook implementation for managing price levels and orders

use super::config::BookConfig;
use super::error::OrderBookError;
use super::level::{BookPrice, PriceLevel};
use super::order::{Order, OrderId, Side};
use super::snapshot::BookSnapshot;
use crate::utils::current_time_millis;
use std::collections::{BTreeMap, HashMap};
use tracing::trace;

/// Where a resting order lives: its level key and its place in that level's queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct OrderLocation {
    pub(super) price: BookPrice,
    pub(super) sequence: u64,
}

/// The OrderBook manages a collection of price levels for both bid and offer sides
/// of a single instrument.
///
/// Mutations take `&mut self`, so a book has exactly one writer at a time. To
/// share a book between tasks, move it into a [`BookSequencer`](super::BookSequencer).
#[derive(Debug, Clone)]
pub struct OrderBook {
    /// The symbol or identifier for this order book
    pub(super) symbol: String,

    pub(super) config: BookConfig,

    /// Bid side price levels, iterated highest price first
    pub(super) bids: BTreeMap<BookPrice, PriceLevel>,

    /// Offer side price levels, iterated lowest price first
    pub(super) asks: BTreeMap<BookPrice, PriceLevel>,

    /// A map from order ID to its level and queue position for fast lookups.
    /// Holds exactly the orders present in `bids` and `asks`.
    pub(super) order_locations: HashMap<OrderId, OrderLocation>,

    /// Last sequence number handed out. Time priority within a level follows it.
    pub(super) last_sequence: u64,
}

impl OrderBook {
    /// Create a new order book for the given symbol with default settings.
    ///
    /// The symbol is taken as is, even when empty. Use [`OrderBook::with_config`]
    /// to have the configuration validated.
    pub fn new(symbol: &str) -> Self {
        Self::from_parts(BookConfig::new(symbol))
    }

    /// Create a new order book from a validated configuration
    pub fn with_config(config: BookConfig) -> Result<Self, OrderBookError> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: BookConfig) -> Self {
        Self {
            symbol: config.symbol.clone(),
            config,
            bids: BTreeMap::new(),
            asks: BTreeMap::new(),
            order_locations: HashMap::new(),
            last_sequence: 0,
        }
    }

    /// Get the symbol of this order book
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn config(&self) -> &BookConfig {
        &self.config
    }

    /// Last sequence number assigned to an inserted order, 0 if none yet.
    pub fn sequence(&self) -> u64 {
        self.last_sequence
    }

    /// Number of resting orders on both sides.
    pub fn len(&self) -> usize {
        self.order_locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order_locations.is_empty()
    }

    pub fn contains(&self, order_id: OrderId) -> bool {
        self.order_locations.contains_key(&order_id)
    }

    /// Number of distinct price levels on a side.
    pub fn depth(&self, side: Side) -> usize {
        self.side_levels(side).len()
    }

    pub(super) fn side_levels(&self, side: Side) -> &BTreeMap<BookPrice, PriceLevel> {
        match side {
            Side::Bid => &self.bids,
            Side::Offer => &self.asks,
        }
    }

    /// Resolve a 1-based level index to its price level.
    fn level_at(&self, side: Side, level: usize) -> Result<&PriceLevel, OrderBookError> {
        let levels = self.side_levels(side);
        let depth = levels.len();
        if level == 0 || level > depth {
            return Err(OrderBookError::InvalidLevel { level, depth });
        }
        levels
            .values()
            .nth(level - 1)
            .ok_or(OrderBookError::InvalidLevel { level, depth })
    }

    /// Price at a 1-based level, where level 1 is the best price on the side.
    ///
    /// # Errors
    /// [`OrderBookError::InvalidLevel`] when `level` is 0 or exceeds the number
    /// of price levels on `side`.
    pub fn price_for_level(&self, side: Side, level: usize) -> Result<f64, OrderBookError> {
        trace!(
            "Order book {}: Getting price for level {} on side {}",
            self.symbol, level, side
        );
        self.level_at(side, level).map(PriceLevel::price)
    }

    /// Total resting size at a 1-based level. Same level contract as
    /// [`OrderBook::price_for_level`].
    pub fn size_at_level(&self, side: Side, level: usize) -> Result<u64, OrderBookError> {
        trace!(
            "Order book {}: Getting size at level {} on side {}",
            self.symbol, level, side
        );
        self.level_at(side, level).map(PriceLevel::total_size)
    }

    /// Orders resting at a 1-based level, oldest first.
    pub fn level_orders(&self, side: Side, level: usize) -> Result<Vec<Order>, OrderBookError> {
        self.level_at(side, level)
            .map(|level| level.iter_orders().copied().collect())
    }

    /// All resting orders on a side, best price first and oldest first within a price.
    pub fn orders_for_side(&self, side: Side) -> Vec<Order> {
        trace!(
            "Order book {}: Getting all orders for side {}",
            self.symbol, side
        );
        self.side_levels(side)
            .values()
            .flat_map(PriceLevel::iter_orders)
            .copied()
            .collect()
    }

    /// Like [`OrderBook::orders_for_side`] but keyed by a side code. An
    /// unrecognized code names no side of the book and yields nothing.
    pub fn orders_for_side_code(&self, code: char) -> Vec<Order> {
        match Side::try_from(code) {
            Ok(side) => self.orders_for_side(side),
            Err(_) => {
                trace!(
                    "Order book {}: Unknown side code {:?}, returning no orders",
                    self.symbol, code
                );
                Vec::new()
            }
        }
    }

    /// Get an order by its ID
    pub fn get_order(&self, order_id: OrderId) -> Option<Order> {
        let location = self.order_locations.get(&order_id)?;
        self.side_levels(location.price.side)
            .get(&location.price)?
            .get(location.sequence)
            .copied()
    }

    /// Get the best bid price, if any
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.values().next().map(PriceLevel::price)
    }

    /// Get the best offer price, if any
    pub fn best_ask(&self) -> Option<f64> {
        self.asks.values().next().map(PriceLevel::price)
    }

    /// Get the spread (best ask - best bid)
    pub fn spread(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(ask - bid),
            _ => None,
        }
    }

    /// Get the mid price (average of best bid and best ask)
    pub fn mid_price(&self) -> Option<f64> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some((bid + ask) / 2.0),
            _ => None,
        }
    }

    /// Sum of resting sizes over every level of a side, saturating at `u64::MAX`.
    pub fn total_size(&self, side: Side) -> u64 {
        self.side_levels(side)
            .values()
            .map(PriceLevel::total_size)
            .fold(0, u64::saturating_add)
    }

    /// Create a snapshot of the current order book state, keeping at most
    /// `depth` levels per side
    pub fn create_snapshot(&self, depth: usize) -> BookSnapshot {
        BookSnapshot {
            symbol: self.symbol.clone(),
            sequence: self.last_sequence,
            timestamp: current_time_millis(),
            bids: self
                .bids
                .values()
                .take(depth)
                .map(PriceLevel::snapshot)
                .collect(),
            asks: self
                .asks
                .values()
                .take(depth)
                .map(PriceLevel::snapshot)
                .collect(),
        }
    }

    /// Remove every order and level. The sequence counter keeps counting.
    pub fn clear(&mut self) {
        trace!("Order book {}: Clearing all orders", self.symbol);
        self.bids.clear();
        self.asks.clear();
        self.order_locations.clear();
    }
}
