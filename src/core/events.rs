//! View invalidation signals
//!
//! After a successful mutation the service tells whoever renders the invoice
//! listing that it is stale. The signal is one-way: nothing is returned and
//! nobody has to be listening.
//!
//! # Architecture
//!
//! ```text
//! InvoiceActions ──▶ ViewInvalidator::invalidate() ──▶ EventBus ──▶ broadcast channel ──▶ page cache
//!                                                                                     ──▶ live listings
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let bus = EventBus::new(1024);
//! let mut rx = bus.subscribe();
//!
//! bus.invalidate(Invalidation {
//!     path: "/dashboard/invoices".to_string(),
//!     event: InvoiceEvent::Deleted { invoice_id },
//! });
//!
//! let envelope = rx.recv().await?;
//! assert_eq!(envelope.invalidation.path, "/dashboard/invoices");
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use uuid::Uuid;

/// The mutation that made a view stale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum InvoiceEvent {
    /// An invoice was created
    Created {
        invoice_id: Uuid,
        data: serde_json::Value,
    },
    /// An invoice was updated
    Updated {
        invoice_id: Uuid,
        data: serde_json::Value,
    },
    /// An invoice was deleted (or was already gone)
    Deleted { invoice_id: Uuid },
}

impl InvoiceEvent {
    pub fn invoice_id(&self) -> Uuid {
        match self {
            InvoiceEvent::Created { invoice_id, .. }
            | InvoiceEvent::Updated { invoice_id, .. }
            | InvoiceEvent::Deleted { invoice_id } => *invoice_id,
        }
    }

    /// Get the action name (created, updated, deleted)
    pub fn action(&self) -> &'static str {
        match self {
            InvoiceEvent::Created { .. } => "created",
            InvoiceEvent::Updated { .. } => "updated",
            InvoiceEvent::Deleted { .. } => "deleted",
        }
    }
}

/// "The view at `path` is stale", with the mutation that caused it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invalidation {
    /// Logical path of the stale view
    pub path: String,
    pub event: InvoiceEvent,
}

/// Receiver of view invalidation signals
pub trait ViewInvalidator: Send + Sync {
    fn invalidate(&self, invalidation: Invalidation);
}

/// Envelope wrapping an invalidation with metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique event ID
    pub id: Uuid,
    /// When the signal was emitted
    pub timestamp: DateTime<Utc>,
    pub invalidation: Invalidation,
}

impl EventEnvelope {
    pub fn new(invalidation: Invalidation) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            invalidation,
        }
    }
}

/// Broadcast-based event bus
///
/// Cheap to clone (the sender is shared) and safe to use from any task.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<EventEnvelope>,
}

impl EventBus {
    /// Create a new EventBus with the given channel capacity
    ///
    /// The capacity determines how many events can be buffered before
    /// slow receivers start losing events (lagged).
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an invalidation to all subscribers
    ///
    /// Never blocks and never fails. Returns the number of receivers that
    /// will see it; with no subscribers the signal is simply dropped.
    pub fn publish(&self, invalidation: Invalidation) -> usize {
        let envelope = EventEnvelope::new(invalidation);
        // send() returns Err only if there are no receivers
        self.sender.send(envelope).unwrap_or(0)
    }

    /// Subscribe to future invalidations
    pub fn subscribe(&self) -> broadcast::Receiver<EventEnvelope> {
        self.sender.subscribe()
    }

    /// Get the current number of active subscribers
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl ViewInvalidator for EventBus {
    fn invalidate(&self, invalidation: Invalidation) {
        let path = invalidation.path.clone();
        let action = invalidation.event.action();
        let receivers = self.publish(invalidation);
        tracing::debug!(path = %path, action, receivers, "View invalidated");
    }
}
