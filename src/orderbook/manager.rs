/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 2/10/25
******************************************************************************/

//! Management of independent per-instrument books.
//!
//! This module provides the `BookManager` struct, which owns one
//! [`BookSequencer`] per symbol. Books never share state; each one is driven by
//! its own task, so different instruments are processed in parallel.

use super::config::BookConfig;
use super::error::OrderBookError;
use super::sequencer::{BookSequencer, SequencerHandle};
use super::OrderBook;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::info;

/// Manages a set of order books indexed by symbol.
pub struct BookManager {
    /// Running sequencers indexed by symbol
    books: DashMap<String, SequencerHandle>,
    /// Settings applied to every book created by `add_book`
    template: BookConfig,
}

impl BookManager {
    /// Create a manager whose books use default settings.
    pub fn new() -> Self {
        Self::with_template(BookConfig::default())
    }

    /// Create a manager whose books copy every setting of `template` except the symbol.
    pub fn with_template(template: BookConfig) -> Self {
        Self {
            books: DashMap::new(),
            template,
        }
    }

    /// Spawn a sequencer-owned book for `symbol` on the current tokio runtime.
    ///
    /// # Errors
    /// [`OrderBookError::InvalidConfig`] if the resulting configuration is not
    /// valid, or if a book for `symbol` already exists.
    pub fn add_book(&self, symbol: &str) -> Result<SequencerHandle, OrderBookError> {
        let config = BookConfig {
            symbol: symbol.to_string(),
            ..self.template.clone()
        };
        let book = OrderBook::with_config(config)?;

        match self.books.entry(symbol.to_string()) {
            Entry::Occupied(_) => Err(OrderBookError::InvalidConfig {
                message: format!("a book for {symbol} already exists"),
            }),
            Entry::Vacant(slot) => {
                let handle = BookSequencer::spawn(book);
                slot.insert(handle.clone());
                info!("Added order book for symbol: {}", symbol);
                Ok(handle)
            }
        }
    }

    /// Get a handle to the book for `symbol`.
    pub fn get_book(&self, symbol: &str) -> Option<SequencerHandle> {
        self.books.get(symbol).map(|entry| entry.value().clone())
    }

    /// Get the list of all symbols with order books in this manager.
    pub fn symbols(&self) -> Vec<String> {
        self.books.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Stop tracking the book for `symbol` and return its handle.
    ///
    /// The sequencer keeps running while other clones of the handle exist; call
    /// [`SequencerHandle::shutdown`] to stop it and recover the book.
    pub fn remove_book(&self, symbol: &str) -> Option<SequencerHandle> {
        let result = self.books.remove(symbol).map(|(_, handle)| handle);
        if result.is_some() {
            info!("Removed order book for symbol: {}", symbol);
        }
        result
    }

    /// Check if a book exists for a specific symbol.
    pub fn has_book(&self, symbol: &str) -> bool {
        self.books.contains_key(symbol)
    }

    /// Get the number of order books in this manager.
    pub fn book_count(&self) -> usize {
        self.books.len()
    }
}

impl Default for BookManager {
    fn default() -> Self {
        Self::new()
    }
}
