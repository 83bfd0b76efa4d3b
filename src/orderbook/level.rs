//! Price levels and the side-aware price key that orders them.

use super::error::OrderBookError;
use super::order::{Order, Price, Side};
use super::snapshot::LevelSnapshot;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// A price tagged with its side so that a [`BTreeMap`] keyed by it iterates
/// best price first on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookPrice {
    pub value: Price,
    pub side: Side,
}

impl BookPrice {
    pub fn new(value: Price, side: Side) -> Self {
        Self { value, side }
    }
}

impl PartialOrd for BookPrice {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BookPrice {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.side {
            Side::Bid => other.value.cmp(&self.value),
            Side::Offer => self.value.cmp(&other.value),
        }
    }
}

impl fmt::Display for BookPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// All resting orders at one price on one side, oldest first.
///
/// Orders are keyed by the sequence number the book assigned on insertion, so
/// iteration order is time priority and removal by sequence does not scan.
#[derive(Debug, Clone)]
pub struct PriceLevel {
    price: BookPrice,
    orders: BTreeMap<u64, Order>,
    total_size: u64,
}

impl PriceLevel {
    pub fn new(price: BookPrice) -> Self {
        Self {
            price,
            orders: BTreeMap::new(),
            total_size: 0,
        }
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price.value.as_f64()
    }

    #[inline]
    pub fn book_price(&self) -> BookPrice {
        self.price
    }

    /// Sum of the sizes of every order at this level.
    #[inline]
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    #[inline]
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Size this level would hold after adding `size`, or `None` past `u64::MAX`.
    #[inline]
    pub fn total_with(&self, size: u64) -> Option<u64> {
        self.total_size.checked_add(size)
    }

    /// Appends an order at the tail of the queue.
    ///
    /// `sequence` must be greater than every sequence already queued here.
    ///
    /// # Errors
    /// [`OrderBookError::InvalidSize`] if the level total would exceed
    /// `u64::MAX`; the level is left unchanged.
    pub fn push(&mut self, sequence: u64, order: Order) -> Result<(), OrderBookError> {
        debug_assert!(
            self.orders
                .last_key_value()
                .is_none_or(|(last, _)| *last < sequence)
        );
        self.total_size = self
            .total_with(order.size())
            .ok_or(OrderBookError::InvalidSize { size: order.size() })?;
        self.orders.insert(sequence, order);
        Ok(())
    }

    /// Removes the order queued under `sequence`.
    pub fn remove(&mut self, sequence: u64) -> Option<Order> {
        let order = self.orders.remove(&sequence)?;
        self.total_size -= order.size();
        Some(order)
    }

    /// Changes the size of a queued order without touching its position.
    /// Returns the previous size, or `None` when `sequence` is not queued here
    /// or the new total would exceed `u64::MAX`.
    pub fn resize(&mut self, sequence: u64, size: u64) -> Option<u64> {
        let previous = self.orders.get(&sequence)?.size();
        let total = (self.total_size - previous).checked_add(size)?;
        self.orders.get_mut(&sequence)?.set_size(size);
        self.total_size = total;
        Some(previous)
    }

    pub fn get(&self, sequence: u64) -> Option<&Order> {
        self.orders.get(&sequence)
    }

    /// Orders in time priority.
    pub fn iter_orders(&self) -> impl Iterator<Item = &Order> {
        self.orders.values()
    }

    pub fn snapshot(&self) -> LevelSnapshot {
        LevelSnapshot {
            price: self.price(),
            size: self.total_size,
            order_count: self.orders.len(),
        }
    }
}
