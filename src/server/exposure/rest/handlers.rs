//! HTTP handlers for invoice routes
//!
//! Mutations delegate to [`InvoiceActions`](crate::core::actions::InvoiceActions)
//! and answer with its [`ActionOutcome`]. Reads go straight to the store.

use crate::core::actions::{ActionOutcome, Operation};
use crate::core::error::ActionError;
use crate::core::invoice::Invoice;
use crate::core::validation::FormInput;
use crate::server::host::ServerHost;
use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Response for the listing endpoint
#[derive(Debug, Serialize)]
pub struct ListInvoicesResponse {
    pub invoices: Vec<Invoice>,
    pub count: usize,
}

/// `GET {listing}`: every invoice, newest first
pub async fn list_invoices(
    State(host): State<Arc<ServerHost>>,
) -> Result<Json<ListInvoicesResponse>, ActionError> {
    let invoices = host.store.list().await.map_err(|e| {
        tracing::error!(error = %e, "Failed to list invoices");
        ActionError::Database {
            operation: Operation::Fetch,
        }
    })?;

    Ok(Json(ListInvoicesResponse {
        count: invoices.len(),
        invoices,
    }))
}

/// `GET {listing}/{id}`
pub async fn get_invoice(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Invoice>, ActionError> {
    let invoice = host.store.get(&id).await.map_err(|e| {
        tracing::error!(invoice_id = %id, error = %e, "Failed to get invoice");
        ActionError::Database {
            operation: Operation::Fetch,
        }
    })?;

    invoice.map(Json).ok_or(ActionError::NotFound {
        operation: Operation::Fetch,
        id,
    })
}

/// `POST {listing}`
pub async fn create_invoice(
    State(host): State<Arc<ServerHost>>,
    input: FormInput,
) -> ActionOutcome {
    host.actions.create(&input).await
}

/// `PUT {listing}/{id}` and the form-friendly `POST {listing}/{id}`
pub async fn update_invoice(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<Uuid>,
    input: FormInput,
) -> ActionOutcome {
    host.actions.update(id, &input).await
}

/// `DELETE {listing}/{id}`
pub async fn delete_invoice(
    State(host): State<Arc<ServerHost>>,
    Path(id): Path<Uuid>,
) -> ActionOutcome {
    host.actions.delete(id).await
}
