use lob_rs::prelude::*;
use proptest::prelude::*;
use std::collections::HashMap;

prop_compose! {
    fn random_side()(side in 0..2u8) -> Side {
        match side {
            0 => Side::Bid,
            _ => Side::Offer,
        }
    }
}

prop_compose! {
    // A small tick grid so that orders share levels often.
    fn random_price()(ticks in 90u32..110) -> f64 {
        f64::from(ticks) * 0.5
    }
}

#[derive(Debug, Clone)]
enum Action {
    Add { side: Side, price: f64, size: u64 },
    Remove { pick: usize },
    Modify { pick: usize, size: u64 },
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        3 => (random_side(), random_price(), 1u64..1_000)
            .prop_map(|(side, price, size)| Action::Add { side, price, size }),
        1 => any::<usize>().prop_map(|pick| Action::Remove { pick }),
        1 => (any::<usize>(), 1u64..1_000).prop_map(|(pick, size)| Action::Modify { pick, size }),
    ]
}

/// Reference model: resting orders in arrival order.
fn expected_side(model: &[Order], side: Side) -> Vec<Order> {
    let mut orders: Vec<Order> = model.iter().filter(|o| o.side() == side).copied().collect();
    // Stable sort keeps arrival order within a price.
    orders.sort_by(|a, b| match side {
        Side::Bid => b.price().total_cmp(&a.price()),
        Side::Offer => a.price().total_cmp(&b.price()),
    });
    orders
}

fn check_invariants(book: &OrderBook, model: &[Order]) -> Result<(), TestCaseError> {
    for side in [Side::Bid, Side::Offer] {
        let orders = book.orders_for_side(side);
        prop_assert_eq!(&orders, &expected_side(model, side));

        let mut sizes: HashMap<u64, u64> = HashMap::new();
        for order in &orders {
            *sizes.entry(order.price().to_bits()).or_default() += order.size();
        }
        let depth = book.depth(side);
        prop_assert_eq!(depth, sizes.len());

        let mut previous: Option<f64> = None;
        for level in 1..=depth {
            let price = book.price_for_level(side, level).unwrap();
            prop_assert_eq!(book.size_at_level(side, level).unwrap(), sizes[&price.to_bits()]);
            if let Some(previous) = previous {
                match side {
                    Side::Bid => prop_assert!(price < previous),
                    Side::Offer => prop_assert!(price > previous),
                }
            }
            previous = Some(price);
        }
        prop_assert!(book.price_for_level(side, depth + 1).is_err());
        prop_assert!(book.size_at_level(side, depth + 1).is_err());
    }
    prop_assert_eq!(book.len(), model.len());
    Ok(())
}

proptest! {
    #[test]
    fn prop_book_matches_reference_model(actions in prop::collection::vec(action(), 1..200)) {
        let mut book = OrderBook::new("PROP");
        let mut model: Vec<Order> = Vec::new();
        let mut next_id = 1u64;

        for action in actions {
            match action {
                Action::Add { side, price, size } => {
                    let order = Order::new(next_id, side, price, size).unwrap();
                    next_id += 1;
                    book.add_order(order).unwrap();
                    model.push(order);
                }
                Action::Remove { pick } => {
                    if model.is_empty() {
                        prop_assert!(book.remove_order(next_id).is_none());
                        continue;
                    }
                    let removed = model.remove(pick % model.len());
                    prop_assert_eq!(book.remove_order(removed.id()), Some(removed));
                    prop_assert!(book.remove_order(removed.id()).is_none());
                }
                Action::Modify { pick, size } => {
                    if model.is_empty() {
                        book.modify_order(next_id, size).unwrap();
                        continue;
                    }
                    let current = model.remove(pick % model.len());
                    book.modify_order(current.id(), size).unwrap();
                    model.push(current.with_size(size).unwrap());
                }
            }
            check_invariants(&book, &model)?;
        }
    }

    #[test]
    fn prop_distinct_adds_are_all_reported(orders in prop::collection::vec((random_side(), random_price(), 1u64..100), 0..64)) {
        let mut book = OrderBook::new("PROP");
        let mut model = Vec::new();
        for (index, (side, price, size)) in orders.into_iter().enumerate() {
            let order = Order::new(index as u64, side, price, size).unwrap();
            book.add_order(order).unwrap();
            model.push(order);
        }
        check_invariants(&book, &model)?;
    }
}
