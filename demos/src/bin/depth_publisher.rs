//! Example demonstrating sequencer-owned books with snapshot subscribers
//!
//! This example shows how to:
//! 1. Run several independent books through a BookManager
//! 2. Feed add/remove/modify commands to each book's sequencer
//! 3. Follow published depth snapshots from a separate reader task

use lob_rs::prelude::*;
use std::time::Duration;
use tracing::{info, warn};

/// Example helper to add liquidity around a mid price
async fn add_liquidity(book: &SequencerHandle, mid: f64) {
    info!("Adding liquidity to {}", book.symbol());

    for i in 1..=5u64 {
        let offer = Order::new(1000 + i, Side::Offer, mid + i as f64, 100 * i);
        let bid = Order::new(2000 + i, Side::Bid, mid - i as f64, 100 * i);
        for order in [offer, bid] {
            match order {
                Ok(order) => {
                    if let Err(e) = book.add_order(order).await {
                        warn!("Failed to add order {}: {}", order.id(), e);
                    }
                }
                Err(e) => warn!("Rejected order: {}", e),
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("Starting depth publisher example");

    let manager = BookManager::with_template(BookConfig::default().with_snapshot_depth(3));
    let symbols = [("BTC/USD", 50_000.0), ("ETH/USD", 3_000.0)];
    for (symbol, _) in &symbols {
        manager.add_book(symbol)?;
    }

    // Follow BTC/USD depth from a reader task
    let btc = manager
        .get_book("BTC/USD")
        .ok_or("BTC/USD book missing")?;
    let mut updates = btc.subscribe();
    let reader = tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let snapshot = updates.borrow_and_update().clone();
            info!(
                "{} seq {} - Best Bid: {:?}, Best Ask: {:?}, Spread: {:?}",
                snapshot.symbol,
                snapshot.sequence,
                snapshot.best_bid(),
                snapshot.best_ask(),
                snapshot.spread()
            );
        }
    });

    for (symbol, mid) in &symbols {
        if let Some(book) = manager.get_book(symbol) {
            add_liquidity(&book, *mid).await;
        }
    }

    // Cancel the best offer and shrink the best bid
    btc.remove_order(1001).await?;
    btc.modify_order(2001, 40).await?;

    for level in 1..=3 {
        info!(
            "BTC/USD bid level {}: {} @ {}",
            level,
            btc.size_at_level(Side::Bid, level).await?,
            btc.price_for_level(Side::Bid, level).await?
        );
    }

    tokio::time::sleep(Duration::from_millis(50)).await;

    for (symbol, _) in &symbols {
        if let Some(handle) = manager.remove_book(symbol) {
            let book = handle.shutdown().await?;
            info!("{} closed with {} resting orders", book.symbol(), book.len());
        }
    }
    drop(btc);
    reader.await?;

    info!("Example completed successfully");
    Ok(())
}
