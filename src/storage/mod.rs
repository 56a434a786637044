//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryInvoiceStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresInvoiceStore;

use crate::config::DatabaseConfig;
use crate::core::store::InvoiceStore;
use anyhow::Result;
use std::sync::Arc;

/// Open the store described by `config`.
///
/// Without a database URL the in-memory store is used. With one, the
/// PostgreSQL store is connected and its table created if missing.
pub async fn open_store(config: &DatabaseConfig) -> Result<Arc<dyn InvoiceStore>> {
    match config.url.as_deref() {
        None => {
            tracing::info!("No database URL configured, using in-memory invoice store");
            Ok(Arc::new(InMemoryInvoiceStore::new()))
        }
        #[cfg(feature = "postgres")]
        Some(url) => {
            let pool = postgres::connect(url, config.max_connections).await?;
            postgres::ensure_schema(&pool).await?;
            tracing::info!(
                max_connections = config.max_connections,
                "Connected to PostgreSQL invoice store"
            );
            Ok(Arc::new(PostgresInvoiceStore::new(pool)))
        }
        #[cfg(not(feature = "postgres"))]
        Some(_) => anyhow::bail!(
            "A database URL is configured but the crate was built without the `postgres` feature"
        ),
    }
}
