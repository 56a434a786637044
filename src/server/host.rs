//! Server host for transport-agnostic API exposure
//!
//! `ServerHost` holds everything a transport needs to serve invoices: the
//! configuration, the action service, the store for reads and the event bus
//! listeners subscribe to for invalidations.

use crate::config::ServiceConfig;
use crate::core::actions::InvoiceActions;
use crate::core::clock::Clock;
use crate::core::events::EventBus;
use crate::core::store::InvoiceStore;
use crate::core::validation::InvoiceSchema;
use anyhow::Result;
use std::sync::Arc;

/// Host context containing all service state
///
/// # Example
///
/// ```rust,ignore
/// let host = Arc::new(
///     ServerBuilder::new()
///         .with_store(InMemoryInvoiceStore::new())
///         .build_host()?,
/// );
///
/// let mut invalidations = host.event_bus().subscribe();
/// let app = RestExposure::build_router(host, vec![])?;
/// ```
pub struct ServerHost {
    pub config: Arc<ServiceConfig>,

    /// Validated mutations; every write goes through here
    pub actions: Arc<InvoiceActions>,

    /// Direct store access for reads
    pub store: Arc<dyn InvoiceStore>,

    /// Receives one invalidation per successful mutation
    pub event_bus: Arc<EventBus>,
}

impl ServerHost {
    /// Build the host from builder components
    ///
    /// The action service is wired to publish its invalidations on
    /// `event_bus` and to report the configured listing path.
    pub fn from_builder_components(
        config: ServiceConfig,
        store: Arc<dyn InvoiceStore>,
        event_bus: EventBus,
        schema: Option<Arc<InvoiceSchema>>,
        clock: Option<Arc<dyn Clock>>,
    ) -> Result<Self> {
        config.validate()?;

        let event_bus = Arc::new(event_bus);
        let mut actions = InvoiceActions::new(store.clone(), event_bus.clone())
            .with_listing_path(config.listing_path.clone());
        if let Some(schema) = schema {
            actions = actions.with_schema(schema);
        }
        if let Some(clock) = clock {
            actions = actions.with_clock(clock);
        }

        Ok(Self {
            config: Arc::new(config),
            actions: Arc::new(actions),
            store,
            event_bus,
        })
    }

    pub fn listing_path(&self) -> &str {
        &self.config.listing_path
    }

    pub fn event_bus(&self) -> &Arc<EventBus> {
        &self.event_bus
    }
}
