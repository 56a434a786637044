//! # Invoice Actions
//!
//! Server-side create, update and delete of invoices, with validation of
//! untrusted form input and a cache-invalidation signal for the invoice
//! listing view.
//!
//! ## Features
//!
//! - **Typed validation**: raw form fields become [`InvoiceFields`](core::InvoiceFields)
//!   or a per-field error map with user-facing messages
//! - **Exact amounts**: decimal input converted to integer cents without floats
//! - **Outcomes as values**: every action returns an [`ActionOutcome`](core::ActionOutcome)
//!   (navigate, revalidate, failure or invalid); nothing unwinds
//! - **Invalidation events**: each successful mutation is broadcast on an
//!   [`EventBus`](core::EventBus)
//! - **Pluggable storage**: in-memory by default, PostgreSQL behind the
//!   `postgres` feature
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use invoices::prelude::*;
//!
//! let actions = InvoiceActions::new(
//!     Arc::new(InMemoryInvoiceStore::new()),
//!     Arc::new(EventBus::default()),
//! );
//!
//! let input = FormInput::new()
//!     .with("customerId", "3958dc9e-712f-4377-85e9-fec4b6a6442a")
//!     .with("amount", "157.95")
//!     .with("status", "pending");
//!
//! match actions.create(&input).await {
//!     ActionOutcome::Navigate { target } => println!("redirect to {}", target),
//!     outcome => println!("{:?}", outcome.form_state()),
//! }
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ActionError, ActionOutcome, Cents, Clock, EventBus, EventEnvelope, FixedClock, FormInput,
        FormState, Invalidation, Invoice, InvoiceActions, InvoiceEvent, InvoiceFields,
        InvoiceSchema, InvoiceStatus, InvoiceStore, NewInvoice, Operation, SystemClock,
        ValidationErrors, ViewInvalidator,
    };

    // === Configuration ===
    pub use crate::config::ServiceConfig;

    // === Storage ===
    pub use crate::storage::{InMemoryInvoiceStore, open_store};

    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresInvoiceStore;

    // === Server ===
    pub use crate::server::{RestExposure, ServerBuilder, ServerHost};

    // === External re-exports ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
