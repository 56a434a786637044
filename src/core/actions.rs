//! Invoice actions: validated create, update and delete
//!
//! Each action is one request/response. It validates the raw form, issues a
//! single store call, signals that the invoice listing is stale and returns
//! an [`ActionOutcome`] telling the caller what to do next. Failures are
//! values, not panics or early jumps.

use crate::core::clock::{Clock, SystemClock};
use crate::core::error::ActionError;
use crate::core::events::{Invalidation, InvoiceEvent, ViewInvalidator};
use crate::core::invoice::{Invoice, InvoiceFields, NewInvoice};
use crate::core::store::InvoiceStore;
use crate::core::validation::{FormInput, InvoiceSchema, ValidationErrors};
use axum::Json;
use axum::http::{StatusCode, header::LOCATION};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Default logical path of the invoice listing view
pub const DEFAULT_LISTING_PATH: &str = "/dashboard/invoices";

/// The three mutations, plus the read used by the listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Create,
    Update,
    Delete,
    Fetch,
}

impl Operation {
    /// Summary shown alongside field errors
    pub fn missing_fields_message(self) -> String {
        format!("Missing Fields. Failed to {} Invoice.", self)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Operation::Create => "Create",
            Operation::Update => "Update",
            Operation::Delete => "Delete",
            Operation::Fetch => "Fetch",
        })
    }
}

/// What the caller should do after an action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Success; move the caller to `target` (the listing view)
    Navigate { target: String },

    /// Success; the caller stays where it is and re-reads the listing
    Revalidated,

    /// The store failed or the invoice does not exist
    Failure(ActionError),

    /// The input did not pass validation; nothing was persisted
    Invalid {
        errors: ValidationErrors,
        message: String,
    },
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            ActionOutcome::Navigate { .. } | ActionOutcome::Revalidated
        )
    }

    /// State for re-rendering the form. Empty on success.
    pub fn form_state(&self) -> FormState {
        match self {
            ActionOutcome::Navigate { .. } | ActionOutcome::Revalidated => FormState::default(),
            ActionOutcome::Failure(err) => err.to_form_state(),
            ActionOutcome::Invalid { errors, message } => FormState {
                errors: Some(errors.clone()),
                message: Some(message.clone()),
            },
        }
    }
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Navigate { target } => {
                (StatusCode::SEE_OTHER, [(LOCATION, target)]).into_response()
            }
            ActionOutcome::Revalidated => StatusCode::NO_CONTENT.into_response(),
            ActionOutcome::Failure(err) => err.into_response(),
            invalid @ ActionOutcome::Invalid { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, Json(invalid.form_state())).into_response()
            }
        }
    }
}

/// `{errors?, message?}` handed back to the form for re-display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The record mutation service
///
/// Holds no state of its own between calls; everything shared lives in the
/// store. Cheap to wrap in an `Arc` and share across request handlers.
///
/// # Example
///
/// ```rust,ignore
/// let actions = InvoiceActions::new(
///     Arc::new(InMemoryInvoiceStore::new()),
///     Arc::new(EventBus::default()),
/// );
///
/// let input = FormInput::new()
///     .with("customerId", "c1")
///     .with("amount", "9.99")
///     .with("status", "pending");
///
/// match actions.create(&input).await {
///     ActionOutcome::Navigate { target } => println!("go to {}", target),
///     other => println!("{:?}", other.form_state()),
/// }
/// ```
pub struct InvoiceActions {
    store: Arc<dyn InvoiceStore>,
    invalidator: Arc<dyn ViewInvalidator>,
    schema: Arc<InvoiceSchema>,
    clock: Arc<dyn Clock>,
    listing_path: String,
}

impl InvoiceActions {
    /// Create the service with the default schema, the UTC system clock and
    /// [`DEFAULT_LISTING_PATH`].
    pub fn new(store: Arc<dyn InvoiceStore>, invalidator: Arc<dyn ViewInvalidator>) -> Self {
        Self {
            store,
            invalidator,
            schema: Arc::new(InvoiceSchema::default()),
            clock: Arc::new(SystemClock),
            listing_path: DEFAULT_LISTING_PATH.to_string(),
        }
    }

    pub fn with_schema(mut self, schema: Arc<InvoiceSchema>) -> Self {
        self.schema = schema;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_listing_path(mut self, path: impl Into<String>) -> Self {
        self.listing_path = path.into();
        self
    }

    pub fn schema(&self) -> &InvoiceSchema {
        &self.schema
    }

    pub fn store(&self) -> &Arc<dyn InvoiceStore> {
        &self.store
    }

    pub fn listing_path(&self) -> &str {
        &self.listing_path
    }

    /// Validate raw input for `operation`.
    ///
    /// On failure the error is the ready-made [`ActionOutcome::Invalid`].
    pub fn validate(
        &self,
        operation: Operation,
        input: &FormInput,
    ) -> Result<InvoiceFields, ActionOutcome> {
        self.schema.validate(input).map_err(|errors| {
            tracing::debug!(%operation, %errors, "Invoice form rejected");
            ActionOutcome::Invalid {
                errors,
                message: operation.missing_fields_message(),
            }
        })
    }

    /// Validate `input` and insert a new invoice dated today
    pub async fn create(&self, input: &FormInput) -> ActionOutcome {
        tracing::debug!(?input, "Create invoice requested");
        match self.validate(Operation::Create, input) {
            Ok(fields) => self.create_validated(fields).await,
            Err(outcome) => outcome,
        }
    }

    /// Insert already-validated fields. The date always comes from the clock.
    pub async fn create_validated(&self, fields: InvoiceFields) -> ActionOutcome {
        let new = NewInvoice {
            fields,
            date: self.clock.today(),
        };

        match self.store.insert(new).await {
            Ok(invoice) => {
                tracing::info!(
                    invoice_id = %invoice.id,
                    amount = invoice.amount.get(),
                    date = %invoice.date,
                    "Invoice created"
                );
                self.invalidate(InvoiceEvent::Created {
                    invoice_id: invoice.id,
                    data: snapshot(&invoice),
                });
                self.navigate_to_listing()
            }
            Err(e) => self.database_failure(Operation::Create, None, &e),
        }
    }

    /// Validate `input` and overwrite the editable fields of invoice `id`
    pub async fn update(&self, id: Uuid, input: &FormInput) -> ActionOutcome {
        tracing::debug!(invoice_id = %id, ?input, "Update invoice requested");
        match self.validate(Operation::Update, input) {
            Ok(fields) => self.update_validated(id, fields).await,
            Err(outcome) => outcome,
        }
    }

    /// Overwrite the editable fields of invoice `id`. The creation date is
    /// left untouched.
    pub async fn update_validated(&self, id: Uuid, fields: InvoiceFields) -> ActionOutcome {
        match self.store.update(&id, fields).await {
            Ok(Some(invoice)) => {
                tracing::info!(invoice_id = %id, amount = invoice.amount.get(), "Invoice updated");
                self.invalidate(InvoiceEvent::Updated {
                    invoice_id: id,
                    data: snapshot(&invoice),
                });
                self.navigate_to_listing()
            }
            Ok(None) => {
                tracing::warn!(invoice_id = %id, "Update of unknown invoice");
                ActionOutcome::Failure(ActionError::NotFound {
                    operation: Operation::Update,
                    id,
                })
            }
            Err(e) => self.database_failure(Operation::Update, Some(id), &e),
        }
    }

    /// Delete invoice `id`.
    ///
    /// Deleting an invoice that does not exist is not an error: the end state
    /// is the same, so the listing is revalidated either way.
    pub async fn delete(&self, id: Uuid) -> ActionOutcome {
        match self.store.delete(&id).await {
            Ok(removed) => {
                if removed {
                    tracing::info!(invoice_id = %id, "Invoice deleted");
                } else {
                    tracing::debug!(invoice_id = %id, "Delete of unknown invoice, nothing to do");
                }
                self.invalidate(InvoiceEvent::Deleted { invoice_id: id });
                ActionOutcome::Revalidated
            }
            Err(e) => self.database_failure(Operation::Delete, Some(id), &e),
        }
    }

    fn invalidate(&self, event: InvoiceEvent) {
        self.invalidator.invalidate(Invalidation {
            path: self.listing_path.clone(),
            event,
        });
    }

    fn navigate_to_listing(&self) -> ActionOutcome {
        ActionOutcome::Navigate {
            target: self.listing_path.clone(),
        }
    }

    fn database_failure(
        &self,
        operation: Operation,
        id: Option<Uuid>,
        error: &anyhow::Error,
    ) -> ActionOutcome {
        match id {
            Some(id) => tracing::error!(%operation, invoice_id = %id, error = %error, "Invoice store failure"),
            None => tracing::error!(%operation, error = %error, "Invoice store failure"),
        }
        ActionOutcome::Failure(ActionError::Database { operation })
    }
}

fn snapshot(invoice: &Invoice) -> serde_json::Value {
    serde_json::to_value(invoice).unwrap_or(serde_json::Value::Null)
}
