//! Invoice server: the REST exposure over the configured store
//!
//! ```text
//! INVOICES_CONFIG=invoices.yaml DATABASE_URL=postgres://... \
//!     cargo run --example invoice_server --features postgres
//! ```
//!
//! Without a config file the defaults are used; without `DATABASE_URL` the
//! in-memory store is used.

use invoices::prelude::*;
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "INVOICES_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::var(CONFIG_ENV) {
        Ok(path) => ServiceConfig::from_yaml_file(&path)?,
        Err(_) => ServiceConfig::default(),
    }
    .with_env_overrides()?;

    let store = open_store(&config.database).await?;

    let bus = EventBus::new(config.event_bus_capacity);
    let mut invalidations = bus.subscribe();
    tokio::spawn(async move {
        while let Ok(envelope) = invalidations.recv().await {
            tracing::info!(
                path = %envelope.invalidation.path,
                action = envelope.invalidation.event.action(),
                invoice_id = %envelope.invalidation.event.invoice_id(),
                "Listing invalidated"
            );
        }
    });

    let listing = config.listing_path.clone();
    println!("🚀 Invoice server on http://{}", config.server.address());
    println!("    GET    {}             - List invoices", listing);
    println!("    POST   {}             - Create an invoice", listing);
    println!("    GET    {}/{{id}}        - Get an invoice", listing);
    println!("    PUT    {}/{{id}}        - Update an invoice", listing);
    println!("    DELETE {}/{{id}}        - Delete an invoice", listing);

    ServerBuilder::new()
        .with_config(config)
        .with_shared_store(store)
        .with_event_bus(bus)
        .serve()
        .await
}
