use super::book::{OrderBook, OrderLocation};
use super::config::{DuplicatePolicy, ModifyPolicy};
use super::error::OrderBookError;
use super::level::{BookPrice, PriceLevel};
use super::order::{Order, OrderId, Side};
use tracing::{debug, trace, warn};

impl OrderBook {
    /// Add a resting order at the back of its price level.
    ///
    /// # Errors
    /// [`OrderBookError::DuplicateOrderId`] if the id is already resting and the
    /// book is configured with [`DuplicatePolicy::Reject`].
    /// [`OrderBookError::InvalidSize`] if the level total would exceed
    /// `u64::MAX`. The book is left unchanged on every error.
    pub fn add_order(&mut self, order: Order) -> Result<(), OrderBookError> {
        trace!(
            "Order book {}: Adding order {} at price {} on side {}",
            self.symbol,
            order.id(),
            order.price(),
            order.side()
        );

        let resting = self.order_locations.get(&order.id()).copied();
        if resting.is_some() && self.config.duplicate_policy == DuplicatePolicy::Reject {
            warn!(
                "Order book {}: Rejected duplicate order id {}",
                self.symbol,
                order.id()
            );
            return Err(OrderBookError::DuplicateOrderId {
                order_id: order.id(),
            });
        }

        // A replaced order on the same level frees its size before the new one lands.
        let price = BookPrice::new(order.book_price(), order.side());
        let released = match resting {
            Some(location) if location.price == price => {
                self.get_order(order.id()).map_or(0, |current| current.size())
            }
            _ => 0,
        };
        self.ensure_level_capacity(&order, released)?;

        if resting.is_some() {
            debug!(
                "Order book {}: Replacing resting order {}",
                self.symbol,
                order.id()
            );
            self.remove_order(order.id());
        }

        self.insert_resting(order)
    }

    /// Remove a resting order. Unknown ids are ignored and yield `None`.
    pub fn remove_order(&mut self, order_id: OrderId) -> Option<Order> {
        let Some(location) = self.order_locations.remove(&order_id) else {
            trace!(
                "Order book {}: Remove of unknown order {} ignored",
                self.symbol, order_id
            );
            return None;
        };

        let levels = match location.price.side {
            Side::Bid => &mut self.bids,
            Side::Offer => &mut self.asks,
        };

        let level = levels.get_mut(&location.price)?;
        let removed = level.remove(location.sequence);
        if level.is_empty() {
            levels.remove(&location.price);
            debug!(
                "Order book {}: Removed empty level {} on side {}",
                self.symbol, location.price, location.price.side
            );
        }

        trace!("Order book {}: Removed order {}", self.symbol, order_id);
        removed
    }

    /// Change the size of a resting order, keeping its id, side and price.
    ///
    /// Under [`ModifyPolicy::CancelReplace`] the order always moves to the back
    /// of its level. Under [`ModifyPolicy::RetainPriorityOnDecrease`] a size
    /// that does not grow is applied in place. Unknown ids are ignored.
    ///
    /// # Errors
    /// [`OrderBookError::InvalidSize`] when `new_size` is zero or the level
    /// total would exceed `u64::MAX`; the book is left unchanged.
    pub fn modify_order(&mut self, order_id: OrderId, new_size: u64) -> Result<(), OrderBookError> {
        trace!(
            "Order book {}: Modifying order {} to size {}",
            self.symbol, order_id, new_size
        );

        let Some(current) = self.get_order(order_id) else {
            trace!(
                "Order book {}: Modify of unknown order {} ignored",
                self.symbol, order_id
            );
            return Ok(());
        };
        let replacement = current.with_size(new_size)?;
        self.ensure_level_capacity(&replacement, current.size())?;

        if self.config.modify_policy == ModifyPolicy::RetainPriorityOnDecrease
            && new_size <= current.size()
            && let Some(location) = self.order_locations.get(&order_id).copied()
        {
            let levels = match location.price.side {
                Side::Bid => &mut self.bids,
                Side::Offer => &mut self.asks,
            };
            if let Some(level) = levels.get_mut(&location.price)
                && level.resize(location.sequence, new_size).is_some()
            {
                return Ok(());
            }
        }

        self.remove_order(order_id);
        self.insert_resting(replacement)
    }

    /// Fails when `order` would push its level total past `u64::MAX`, counting
    /// `released` as already leaving that level.
    fn ensure_level_capacity(&self, order: &Order, released: u64) -> Result<(), OrderBookError> {
        let price = BookPrice::new(order.book_price(), order.side());
        let fits = match self.side_levels(order.side()).get(&price) {
            Some(level) => (level.total_size() - released)
                .checked_add(order.size())
                .is_some(),
            None => true,
        };
        if fits {
            return Ok(());
        }
        warn!(
            "Order book {}: Rejected order {} of size {}: level {} would overflow",
            self.symbol,
            order.id(),
            order.size(),
            price
        );
        Err(OrderBookError::InvalidSize { size: order.size() })
    }

    fn insert_resting(&mut self, order: Order) -> Result<(), OrderBookError> {
        let sequence = self.last_sequence + 1;
        let price = BookPrice::new(order.book_price(), order.side());

        let symbol = &self.symbol;
        let levels = match order.side() {
            Side::Bid => &mut self.bids,
            Side::Offer => &mut self.asks,
        };

        levels
            .entry(price)
            .or_insert_with(|| {
                debug!(
                    "Order book {}: Created level {} on side {}",
                    symbol,
                    price,
                    order.side()
                );
                PriceLevel::new(price)
            })
            .push(sequence, order)?;

        self.last_sequence = sequence;
        self.order_locations
            .insert(order.id(), OrderLocation { price, sequence });
        Ok(())
    }
}
