//! Typed failures of invoice actions
//!
//! Only two things can go wrong in an action and be reported to the caller:
//! validation (see [`ValidationErrors`](crate::core::validation::ValidationErrors),
//! carried by [`ActionOutcome::Invalid`](crate::core::actions::ActionOutcome::Invalid))
//! and the store. Store failures are described here. Their `Display` is the
//! exact user-facing message; the underlying cause is logged, never shown.
//!
//! # Example
//!
//! ```rust,ignore
//! match actions.update(id, &input).await {
//!     ActionOutcome::Failure(ActionError::NotFound { id, .. }) => {
//!         println!("invoice {} is gone", id);
//!     }
//!     ActionOutcome::Failure(err) => eprintln!("{}", err),
//!     _ => {}
//! }
//! ```

use crate::core::actions::{FormState, Operation};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

/// A failed invoice action
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ActionError {
    /// The store rejected or could not run the statement
    #[error("Database Error: Failed to {operation} Invoice.")]
    Database { operation: Operation },

    /// No invoice has the requested id
    #[error("Invoice Not Found. Failed to {operation} Invoice.")]
    NotFound { operation: Operation, id: Uuid },
}

impl ActionError {
    /// The operation that failed
    pub fn operation(&self) -> Operation {
        match self {
            ActionError::Database { operation } | ActionError::NotFound { operation, .. } => {
                *operation
            }
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ActionError::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ActionError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::Database { .. } => "DATABASE_ERROR",
            ActionError::NotFound { .. } => "INVOICE_NOT_FOUND",
        }
    }

    /// Caller-facing state: the message only, no field errors
    pub fn to_form_state(&self) -> FormState {
        FormState {
            errors: None,
            message: Some(self.to_string()),
        }
    }
}

impl IntoResponse for ActionError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(self.to_form_state())).into_response()
    }
}
