use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lob_rs::prelude::*;
use std::hint::black_box;

fn populated_book(levels: u64, orders_per_level: u64) -> OrderBook {
    let mut book = OrderBook::new("BENCH");
    let mut id = 0;
    for level in 0..levels {
        for _ in 0..orders_per_level {
            id += 1;
            let bid = Order::new(id, Side::Bid, 1_000.0 - level as f64, 10).unwrap();
            book.add_order(bid).unwrap();
            id += 1;
            let offer = Order::new(id, Side::Offer, 1_001.0 + level as f64, 10).unwrap();
            book.add_order(offer).unwrap();
        }
    }
    book
}

fn bench_add_order(c: &mut Criterion) {
    c.bench_function("add_order_1k", |b| {
        b.iter_batched(
            || OrderBook::new("BENCH"),
            |mut book| {
                for id in 0..1_000u64 {
                    let order = Order::new(id, Side::Bid, 100.0 + (id % 50) as f64, 10).unwrap();
                    book.add_order(order).unwrap();
                }
                book
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_remove_order(c: &mut Criterion) {
    c.bench_function("remove_order_from_deep_book", |b| {
        b.iter_batched(
            || populated_book(100, 10),
            |mut book| {
                for id in (1..=2_000u64).step_by(7) {
                    black_box(book.remove_order(id));
                }
                book
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_modify_order(c: &mut Criterion) {
    c.bench_function("modify_order_cancel_replace", |b| {
        b.iter_batched(
            || populated_book(100, 10),
            |mut book| {
                for id in (1..=2_000u64).step_by(3) {
                    book.modify_order(id, 20).unwrap();
                }
                book
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_queries(c: &mut Criterion) {
    let book = populated_book(100, 10);
    c.bench_function("size_at_level_10", |b| {
        b.iter(|| black_box(book.size_at_level(Side::Bid, black_box(10))))
    });
    c.bench_function("orders_for_side", |b| {
        b.iter(|| black_box(book.orders_for_side(Side::Offer)))
    });
    c.bench_function("create_snapshot_10", |b| {
        b.iter(|| black_box(book.create_snapshot(10)))
    });
}

criterion_group!(
    benches,
    bench_add_order,
    bench_remove_order,
    bench_modify_order,
    bench_queries
);
criterion_main!(benches);
