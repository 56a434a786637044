//! In-memory implementation of InvoiceStore for testing and development

use crate::core::invoice::{Invoice, InvoiceFields, NewInvoice};
use crate::core::store::{InvoiceStore, listing_order};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory invoice store
///
/// Useful for testing and development. Uses RwLock for thread-safe access;
/// each method takes the lock once, mirroring a single statement.
#[derive(Clone, Default)]
pub struct InMemoryInvoiceStore {
    invoices: Arc<RwLock<HashMap<Uuid, Invoice>>>,
}

impl InMemoryInvoiceStore {
    /// Create a new, empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored invoices
    pub fn len(&self) -> Result<usize> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;
        Ok(invoices.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, new: NewInvoice) -> Result<Invoice> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        let invoice = Invoice::from_new(Uuid::new_v4(), new);
        invoices.insert(invoice.id, invoice.clone());

        Ok(invoice)
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Invoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(invoices.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Invoice>> {
        let invoices = self
            .invoices
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        let mut all: Vec<Invoice> = invoices.values().cloned().collect();
        all.sort_by(listing_order);
        Ok(all)
    }

    async fn update(&self, id: &Uuid, fields: InvoiceFields) -> Result<Option<Invoice>> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(invoices.get_mut(id).map(|invoice| {
            invoice.apply(fields);
            invoice.clone()
        }))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool> {
        let mut invoices = self
            .invoices
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(invoices.remove(id).is_some())
    }
}
