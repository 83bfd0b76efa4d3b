//! Error types for order book operations.

use super::order::OrderId;
use std::fmt;

/// Errors returned by the order book and its sequencer.
#[derive(Debug, Clone, PartialEq)]
pub enum OrderBookError {
    /// Side code is neither `'B'` nor `'O'`.
    InvalidSide {
        /// The rejected side code.
        code: char,
    },

    /// Price is not a finite, non-negative number.
    InvalidPrice {
        /// The rejected price.
        price: f64,
    },

    /// Size is not strictly positive.
    InvalidSize {
        /// The rejected size.
        size: u64,
    },

    /// Requested level is zero or beyond the current depth of the side.
    InvalidLevel {
        /// The requested 1-based level.
        level: usize,
        /// Number of price levels on the side at the time of the request.
        depth: usize,
    },

    /// An order with the same id is already resting in the book.
    DuplicateOrderId {
        /// The conflicting order id.
        order_id: OrderId,
    },

    /// Configuration could not be parsed or failed validation.
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },

    /// The sequencer owning the book is no longer running.
    SequencerStopped,
}

impl OrderBookError {
    /// Returns true for malformed input the caller could have prevented.
    pub fn is_invalid_argument(&self) -> bool {
        !matches!(self, OrderBookError::SequencerStopped)
    }
}

impl fmt::Display for OrderBookError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderBookError::InvalidSide { code } => {
                write!(f, "the order's side is invalid: {code:?}")
            }
            OrderBookError::InvalidPrice { price } => {
                write!(f, "the order's price is invalid: {price}")
            }
            OrderBookError::InvalidSize { size } => {
                write!(f, "the order's size is invalid: {size}")
            }
            OrderBookError::InvalidLevel { level: 0, .. } => {
                write!(f, "The level value must be a strictly positive integer")
            }
            OrderBookError::InvalidLevel { level, depth } => {
                write!(
                    f,
                    "The order book contains less than {level} levels (depth is {depth})"
                )
            }
            OrderBookError::DuplicateOrderId { order_id } => {
                write!(f, "order {order_id} is already resting in the book")
            }
            OrderBookError::InvalidConfig { message } => {
                write!(f, "invalid order book configuration: {message}")
            }
            OrderBookError::SequencerStopped => {
                write!(f, "the book sequencer is no longer running")
            }
        }
    }
}

impl std::error::Error for OrderBookError {}
