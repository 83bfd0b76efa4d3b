//! Order value type and its building blocks: side, price and id.

use super::error::OrderBookError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Caller-assigned order identifier, unique among resting orders of one book.
pub type OrderId = u64;

/// Half of the book an order rests on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy interest. Best price is the highest.
    Bid,
    /// Sell interest. Best price is the lowest.
    Offer,
}

impl Side {
    /// Single character code used on the wire (`'B'` or `'O'`).
    pub fn code(self) -> char {
        match self {
            Side::Bid => 'B',
            Side::Offer => 'O',
        }
    }

    /// The other half of the book.
    pub fn opposite(self) -> Self {
        match self {
            Side::Bid => Side::Offer,
            Side::Offer => Side::Bid,
        }
    }
}

impl TryFrom<char> for Side {
    type Error = OrderBookError;

    fn try_from(code: char) -> Result<Self, Self::Error> {
        match code {
            'B' => Ok(Side::Bid),
            'O' => Ok(Side::Offer),
            other => Err(OrderBookError::InvalidSide { code: other }),
        }
    }
}

impl FromStr for Side {
    type Err = OrderBookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(code), None) => Side::try_from(code),
            (Some(code), Some(_)) => Err(OrderBookError::InvalidSide { code }),
            (None, _) => Err(OrderBookError::InvalidSide { code: '\0' }),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Bid => write!(f, "BID"),
            Side::Offer => write!(f, "OFFER"),
        }
    }
}

/// A finite, non-negative price with a total order.
///
/// Negative zero is folded into positive zero so that equal prices always
/// share one level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price(f64);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(0.0);

    /// Validates and wraps a raw price.
    pub fn new(value: f64) -> Result<Self, OrderBookError> {
        if !value.is_finite() || value < 0.0 {
            return Err(OrderBookError::InvalidPrice { price: value });
        }
        // -0.0 + 0.0 == +0.0
        Ok(Self(value + 0.0))
    }

    /// The raw floating point value.
    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Price {
    type Error = OrderBookError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl PartialEq for Price {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for Price {}

impl PartialEq<f64> for Price {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for Price {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A plain resting limit order.
///
/// `id` and `side` never change. A different size is expressed by building a
/// replacement with [`Order::with_size`]; the book decides what that does to
/// time priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawOrder")]
pub struct Order {
    id: OrderId,
    side: Side,
    price: Price,
    size: u64,
}

impl Order {
    /// Creates an order, rejecting a non-finite or negative price and a zero size.
    pub fn new(id: OrderId, side: Side, price: f64, size: u64) -> Result<Self, OrderBookError> {
        let price = Price::new(price)?;
        Self::from_price(id, side, price, size)
    }

    /// Creates an order from a side code (`'B'` or `'O'`).
    pub fn from_code(
        id: OrderId,
        code: char,
        price: f64,
        size: u64,
    ) -> Result<Self, OrderBookError> {
        Self::new(id, Side::try_from(code)?, price, size)
    }

    /// Creates an order from an already validated price.
    pub fn from_price(
        id: OrderId,
        side: Side,
        price: Price,
        size: u64,
    ) -> Result<Self, OrderBookError> {
        if size == 0 {
            return Err(OrderBookError::InvalidSize { size });
        }
        Ok(Self {
            id,
            side,
            price,
            size,
        })
    }

    /// Same order with a different size.
    pub fn with_size(self, size: u64) -> Result<Self, OrderBookError> {
        Self::from_price(self.id, self.side, self.price, size)
    }

    #[inline]
    pub fn id(&self) -> OrderId {
        self.id
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn price(&self) -> f64 {
        self.price.as_f64()
    }

    /// The validated price key this order rests under.
    #[inline]
    pub fn book_price(&self) -> Price {
        self.price
    }

    #[inline]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Sets the size in place. Callers guarantee `size > 0`.
    pub(super) fn set_size(&mut self, size: u64) {
        debug_assert!(size > 0);
        self.size = size;
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}@{}",
            self.id, self.side, self.size, self.price
        )
    }
}

#[derive(Deserialize)]
struct RawOrder {
    id: OrderId,
    side: Side,
    price: f64,
    size: u64,
}

impl TryFrom<RawOrder> for Order {
    type Error = OrderBookError;

    fn try_from(raw: RawOrder) -> Result<Self, Self::Error> {
        Order::new(raw.id, raw.side, raw.price, raw.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_side_codes() {
        assert_eq!(Side::try_from('B').unwrap(), Side::Bid);
        assert_eq!(Side::try_from('O').unwrap(), Side::Offer);
        assert_eq!(
            Side::try_from('X').unwrap_err(),
            OrderBookError::InvalidSide { code: 'X' }
        );
        assert_eq!("O".parse::<Side>().unwrap(), Side::Offer);
        assert!("BO".parse::<Side>().is_err());
        assert!("".parse::<Side>().is_err());
        assert_eq!(Side::Bid.code(), 'B');
        assert_eq!(Side::Bid.opposite(), Side::Offer);
        assert_eq!(Side::Offer.to_string(), "OFFER");
    }

    #[test]
    fn test_price_validation() {
        assert!(Price::new(f64::NAN).is_err());
        assert!(Price::new(f64::INFINITY).is_err());
        assert!(Price::new(-0.01).is_err());
        assert_eq!(Price::new(-0.0).unwrap(), Price::ZERO);
        assert_eq!(Price::new(100.5).unwrap(), 100.5);
    }

    #[test]
    fn test_price_ordering() {
        let low = Price::new(99.0).unwrap();
        let high = Price::new(101.0).unwrap();
        assert!(low < high);
        assert_eq!(low.max(high), high);
        assert_eq!(Price::new(99.0).unwrap(), low);
    }

    #[test]
    fn test_order_construction() {
        let order = Order::new(1, Side::Bid, 100.0, 10).unwrap();
        assert_eq!(order.id(), 1);
        assert_eq!(order.side(), Side::Bid);
        assert_eq!(order.price(), 100.0);
        assert_eq!(order.size(), 10);

        let err = Order::from_code(1, 'X', 100.0, 10).unwrap_err();
        assert!(err.to_string().contains("side is invalid"));

        let err = Order::new(1, Side::Bid, 100.0, 0).unwrap_err();
        assert_eq!(err, OrderBookError::InvalidSize { size: 0 });

        assert!(Order::new(1, Side::Offer, f64::NAN, 10).is_err());
    }

    #[test]
    fn test_with_size_keeps_identity() {
        let order = Order::from_code(9, 'O', 99.0, 300).unwrap();
        let resized = order.with_size(350).unwrap();
        assert_eq!(resized.id(), 9);
        assert_eq!(resized.side(), Side::Offer);
        assert_eq!(resized.price(), 99.0);
        assert_eq!(resized.size(), 350);
        assert!(order.with_size(0).is_err());
    }

    #[test]
    fn test_order_deserialization_validates() {
        let order = Order::new(3, Side::Offer, 98.5, 40).unwrap();
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back, order);

        let bad = r#"{"id":1,"side":"Bid","price":10.0,"size":0}"#;
        assert!(serde_json::from_str::<Order>(bad).is_err());

        let bad = r#"{"id":1,"side":"Bid","price":-1.0,"size":5}"#;
        assert!(serde_json::from_str::<Order>(bad).is_err());
    }
}
