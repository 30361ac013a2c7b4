//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is a fan-out of already-decided facts. It never feeds back into
//! the operation that produced the event: a failed publish does not undo a
//! completed loan.

use std::sync::mpsc::Receiver;

use thiserror::Error;

/// Failure to hand a message to the bus.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    /// Publish failed due to internal lock poisoning.
    #[error("event bus lock poisoned")]
    Poisoned,
}

/// A subscription to an event stream.
///
/// Each subscription gets a copy of every message published after it was
/// created (broadcast semantics), in publish order.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Drain every message currently queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
pub trait EventBus<M>: Send + Sync {
    /// Publish a message to all current subscribers.
    fn publish(&self, message: M) -> Result<(), BusError>;

    /// Create a new subscription.
    fn subscribe(&self) -> Subscription<M>;
}
