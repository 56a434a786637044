//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::RestExposure;
use super::host::ServerHost;
use crate::config::ServiceConfig;
use crate::core::clock::Clock;
use crate::core::events::EventBus;
use crate::core::store::InvoiceStore;
use crate::core::validation::InvoiceSchema;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the invoice HTTP server
///
/// # Example
///
/// ```ignore
/// let config = ServiceConfig::from_yaml_file("invoices.yaml")?.with_env_overrides()?;
/// let store = open_store(&config.database).await?;
///
/// ServerBuilder::new()
///     .with_config(config)
///     .with_shared_store(store)
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: ServiceConfig,
    store: Option<Arc<dyn InvoiceStore>>,
    schema: Option<Arc<InvoiceSchema>>,
    clock: Option<Arc<dyn Clock>>,
    custom_routes: Vec<Router>,
    event_bus: Option<EventBus>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: ServiceConfig::default(),
            store: None,
            schema: None,
            clock: None,
            custom_routes: Vec::new(),
            event_bus: None,
        }
    }

    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the invoice store (required)
    pub fn with_store(mut self, store: impl InvoiceStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared invoice store, such as the one returned by
    /// [`open_store`](crate::storage::open_store)
    pub fn with_shared_store(mut self, store: Arc<dyn InvoiceStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the default field rules and messages
    pub fn with_schema(mut self, schema: InvoiceSchema) -> Self {
        self.schema = Some(Arc::new(schema));
        self
    }

    /// Replace the UTC system clock used to date new invoices
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Use this event bus instead of one sized from the configuration.
    ///
    /// Subscribe before handing it over to observe invalidations from the
    /// very first request.
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    /// Add custom routes to the server
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{Router, routing::get};
    ///
    /// let extra = Router::new().route("/version", get(|| async { "1.0" }));
    ///
    /// ServerBuilder::new()
    ///     .with_store(InMemoryInvoiceStore::new())
    ///     .with_custom_routes(extra)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("InvoiceStore is required. Call .with_store()"))?;

        let event_bus = match self.event_bus.take() {
            Some(bus) => bus,
            None => EventBus::new(self.config.event_bus_capacity),
        };

        ServerHost::from_builder_components(self.config, store, event_bus, self.schema, self.clock)
    }

    /// Build the final REST router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        RestExposure::build_router(host, custom_routes)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `server.host:server.port` from the configuration and stops
    /// on SIGTERM or Ctrl+C.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.address();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
