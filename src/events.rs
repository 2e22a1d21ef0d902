//! Decoupled event bus for stage progress.
//!
//! The calculator emits an event each time an attempt changes stage and
//! the REPL's spinner subscribes to show it. Built on
//! [`tokio::sync::broadcast`] so multiple listeners can react independently.

use tokio::sync::broadcast;

/// Stages of one evaluation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    ValidatingInput,
    EnsuringCredential,
    Requesting,
    Sanitizing,
    Displaying,
    /// Attempt finished, successfully or not.
    Idle,
}

/// Events that flow through the system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// An attempt entered a new stage. `status` is the current status line.
    Stage { stage: Stage, status: String },
}

/// A broadcast channel that any component can emit to or subscribe from.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events. Returns a receiver that yields all
    /// future events (does not replay past ones).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
