use lob_rs::orderbook::DEFAULT_SNAPSHOT_DEPTH;
use lob_rs::prelude::*;

fn scenario_book() -> OrderBook {
    let mut book = OrderBook::new("TEST");
    book.add_order(Order::from_code(1, 'B', 100.0, 100).unwrap()).unwrap();
    book.add_order(Order::from_code(2, 'B', 101.0, 200).unwrap()).unwrap();
    book.add_order(Order::from_code(3, 'O', 99.0, 300).unwrap()).unwrap();
    book.add_order(Order::from_code(4, 'O', 98.0, 400).unwrap()).unwrap();
    book
}

#[test]
fn test_add_remove_modify_scenario() {
    let mut book = scenario_book();
    assert_eq!(book.size_at_level(Side::Bid, 1).unwrap(), 200);
    assert_eq!(book.size_at_level(Side::Bid, 2).unwrap(), 100);
    assert_eq!(book.size_at_level(Side::Offer, 1).unwrap(), 400);
    assert_eq!(book.size_at_level(Side::Offer, 2).unwrap(), 300);

    book.remove_order(2);
    assert_eq!(book.size_at_level(Side::Bid, 1).unwrap(), 100);
    assert!(book.size_at_level(Side::Bid, 2).unwrap_err().is_invalid_argument());

    book.modify_order(3, 350).unwrap();
    assert_eq!(book.size_at_level(Side::Offer, 2).unwrap(), 350);
    assert_eq!(book.price_for_level(Side::Offer, 2).unwrap(), 99.0);
    assert_eq!(book.size_at_level(Side::Offer, 1).unwrap(), 400);
}

#[test]
fn test_invalid_side_code_is_rejected_at_construction() {
    let err = Order::from_code(1, 'X', 100.0, 10).unwrap_err();
    assert_eq!(err, OrderBookError::InvalidSide { code: 'X' });
}

#[test]
fn test_negative_size_style_inputs_are_rejected() {
    assert!(Order::new(1, Side::Bid, 100.0, 0).is_err());
    assert!(Order::new(1, Side::Bid, -100.0, 10).is_err());
    assert!(Order::new(1, Side::Bid, f64::NEG_INFINITY, 10).is_err());
}

#[test]
fn test_orders_for_side_contents() {
    let mut book = OrderBook::new("TEST");
    let bid_1 = Order::new(1, Side::Bid, 100.0, 100).unwrap();
    let bid_2 = Order::new(2, Side::Bid, 99.0, 200).unwrap();
    let offer = Order::new(3, Side::Offer, 101.0, 300).unwrap();
    book.add_order(bid_1).unwrap();
    book.add_order(bid_2).unwrap();
    book.add_order(offer).unwrap();

    let bids = book.orders_for_side(Side::Bid);
    assert_eq!(bids, vec![bid_1, bid_2]);
    assert!(!bids.contains(&offer));

    let offers = book.orders_for_side(Side::Offer);
    assert_eq!(offers, vec![offer]);
}

#[test]
fn test_snapshot_serializes() {
    let book = scenario_book();
    let snapshot = book.create_snapshot(DEFAULT_SNAPSHOT_DEPTH);
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: BookSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}
