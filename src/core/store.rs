//! Store trait for invoice persistence

use crate::core::invoice::{Invoice, InvoiceFields, NewInvoice};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Persistence for invoices
///
/// Every mutation maps to exactly one statement against the backing store.
/// Implementations never retry and hold no locks beyond what the backend
/// itself takes for a single statement.
#[async_trait]
pub trait InvoiceStore: Send + Sync {
    /// Insert a new invoice; the store assigns its id
    async fn insert(&self, invoice: NewInvoice) -> Result<Invoice>;

    /// Get an invoice by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Invoice>>;

    /// List all invoices, newest date first
    async fn list(&self) -> Result<Vec<Invoice>>;

    /// Overwrite the editable fields of an invoice.
    ///
    /// Returns `Ok(None)` when no invoice has this id. The creation date is
    /// never touched.
    async fn update(&self, id: &Uuid, fields: InvoiceFields) -> Result<Option<Invoice>>;

    /// Delete an invoice. Returns whether a row was removed.
    async fn delete(&self, id: &Uuid) -> Result<bool>;
}

/// Order used by [`InvoiceStore::list`]: date descending, then id
pub fn listing_order(a: &Invoice, b: &Invoice) -> std::cmp::Ordering {
    b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id))
}
