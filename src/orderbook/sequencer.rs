//! Single-writer event loop that owns one order book.
//!
//! A [`BookSequencer`] moves an [`OrderBook`] into a tokio task and applies
//! every command strictly in arrival order. Callers talk to it through a
//! cloneable [`SequencerHandle`]: mutations and queries are answered on oneshot
//! channels, and a fresh [`BookSnapshot`] is published on a watch channel after
//! each change so readers never wait on the writer.

use super::book::OrderBook;
use super::error::OrderBookError;
use super::order::{Order, OrderId, Side};
use super::snapshot::BookSnapshot;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{error, info, trace};

enum SequencerCommand {
    Add {
        order: Order,
        reply: oneshot::Sender<Result<(), OrderBookError>>,
    },
    Remove {
        order_id: OrderId,
        reply: oneshot::Sender<Option<Order>>,
    },
    Modify {
        order_id: OrderId,
        new_size: u64,
        reply: oneshot::Sender<Result<(), OrderBookError>>,
    },
    PriceForLevel {
        side: Side,
        level: usize,
        reply: oneshot::Sender<Result<f64, OrderBookError>>,
    },
    SizeAtLevel {
        side: Side,
        level: usize,
        reply: oneshot::Sender<Result<u64, OrderBookError>>,
    },
    OrdersForSide {
        side: Side,
        reply: oneshot::Sender<Vec<Order>>,
    },
    Shutdown {
        reply: oneshot::Sender<OrderBook>,
    },
}

impl std::fmt::Debug for SequencerCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SequencerCommand::Add { .. } => "Add",
            SequencerCommand::Remove { .. } => "Remove",
            SequencerCommand::Modify { .. } => "Modify",
            SequencerCommand::PriceForLevel { .. } => "PriceForLevel",
            SequencerCommand::SizeAtLevel { .. } => "SizeAtLevel",
            SequencerCommand::OrdersForSide { .. } => "OrdersForSide",
            SequencerCommand::Shutdown { .. } => "Shutdown",
        };
        f.write_str(name)
    }
}

/// Spawns the owning task for a book.
pub struct BookSequencer;

impl BookSequencer {
    /// Move `book` into a new task on the current tokio runtime.
    ///
    /// # Panics
    /// Panics when called outside a tokio runtime.
    pub fn spawn(book: OrderBook) -> SequencerHandle {
        let symbol: Arc<str> = Arc::from(book.symbol());
        let depth = book.config().snapshot_depth;
        let (command_sender, command_receiver) = mpsc::unbounded_channel();
        let (snapshot_sender, snapshot_receiver) =
            watch::channel(Arc::new(book.create_snapshot(depth)));

        tokio::spawn(Self::run(book, depth, command_receiver, snapshot_sender));

        SequencerHandle {
            symbol,
            commands: command_sender,
            snapshots: snapshot_receiver,
        }
    }

    async fn run(
        mut book: OrderBook,
        depth: usize,
        mut commands: mpsc::UnboundedReceiver<SequencerCommand>,
        snapshots: watch::Sender<Arc<BookSnapshot>>,
    ) {
        info!("Sequencer for {} started", book.symbol());

        let publish = |book: &OrderBook| {
            snapshots.send_replace(Arc::new(book.create_snapshot(depth)));
        };

        while let Some(command) = commands.recv().await {
            match command {
                SequencerCommand::Add { order, reply } => {
                    let result = book.add_order(order);
                    if result.is_ok() {
                        publish(&book);
                    }
                    deliver(book.symbol(), reply, result);
                }
                SequencerCommand::Remove { order_id, reply } => {
                    let removed = book.remove_order(order_id);
                    if removed.is_some() {
                        publish(&book);
                    }
                    deliver(book.symbol(), reply, removed);
                }
                SequencerCommand::Modify {
                    order_id,
                    new_size,
                    reply,
                } => {
                    let existed = book.contains(order_id);
                    let result = book.modify_order(order_id, new_size);
                    if existed && result.is_ok() {
                        publish(&book);
                    }
                    deliver(book.symbol(), reply, result);
                }
                SequencerCommand::PriceForLevel { side, level, reply } => {
                    let result = book.price_for_level(side, level);
                    deliver(book.symbol(), reply, result);
                }
                SequencerCommand::SizeAtLevel { side, level, reply } => {
                    let result = book.size_at_level(side, level);
                    deliver(book.symbol(), reply, result);
                }
                SequencerCommand::OrdersForSide { side, reply } => {
                    let orders = book.orders_for_side(side);
                    deliver(book.symbol(), reply, orders);
                }
                SequencerCommand::Shutdown { reply } => {
                    commands.close();
                    info!("Sequencer for {} stopped by request", book.symbol());
                    if reply.send(book).is_err() {
                        error!("Shutdown requester went away before receiving the book");
                    }
                    return;
                }
            }
        }

        info!("Sequencer for {} stopped: all handles dropped", book.symbol());
    }
}

fn deliver<R>(symbol: &str, reply: oneshot::Sender<R>, value: R) {
    if reply.send(value).is_err() {
        error!("Sequencer for {}: caller dropped before reply", symbol);
    }
}

/// Cloneable access to a running [`BookSequencer`].
#[derive(Debug, Clone)]
pub struct SequencerHandle {
    symbol: Arc<str>,
    commands: mpsc::UnboundedSender<SequencerCommand>,
    snapshots: watch::Receiver<Arc<BookSnapshot>>,
}

impl SequencerHandle {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// False once the sequencer has stopped accepting commands.
    pub fn is_running(&self) -> bool {
        !self.commands.is_closed()
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<R>) -> SequencerCommand,
    ) -> Result<R, OrderBookError> {
        let (reply, response) = oneshot::channel();
        let command = build(reply);
        trace!("Sequencer for {}: sending {:?}", self.symbol, command);
        self.commands
            .send(command)
            .map_err(|_| OrderBookError::SequencerStopped)?;
        response.await.map_err(|_| OrderBookError::SequencerStopped)
    }

    pub async fn add_order(&self, order: Order) -> Result<(), OrderBookError> {
        self.request(|reply| SequencerCommand::Add { order, reply })
            .await?
    }

    pub async fn remove_order(&self, order_id: OrderId) -> Result<Option<Order>, OrderBookError> {
        self.request(|reply| SequencerCommand::Remove { order_id, reply })
            .await
    }

    pub async fn modify_order(&self, order_id: OrderId, new_size: u64) -> Result<(), OrderBookError> {
        self.request(|reply| SequencerCommand::Modify {
            order_id,
            new_size,
            reply,
        })
        .await?
    }

    pub async fn price_for_level(&self, side: Side, level: usize) -> Result<f64, OrderBookError> {
        self.request(|reply| SequencerCommand::PriceForLevel { side, level, reply })
            .await?
    }

    pub async fn size_at_level(&self, side: Side, level: usize) -> Result<u64, OrderBookError> {
        self.request(|reply| SequencerCommand::SizeAtLevel { side, level, reply })
            .await?
    }

    pub async fn orders_for_side(&self, side: Side) -> Result<Vec<Order>, OrderBookError> {
        self.request(|reply| SequencerCommand::OrdersForSide { side, reply })
            .await
    }

    /// Latest published snapshot. May trail commands still in flight.
    pub fn snapshot(&self) -> Arc<BookSnapshot> {
        self.snapshots.borrow().clone()
    }

    /// A receiver notified on every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Arc<BookSnapshot>> {
        self.snapshots.clone()
    }

    /// Stop the sequencer after every command queued before this one, and
    /// hand back the book.
    pub async fn shutdown(&self) -> Result<OrderBook, OrderBookError> {
        self.request(|reply| SequencerCommand::Shutdown { reply })
            .await
    }
}
