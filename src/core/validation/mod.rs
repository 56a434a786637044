//! Validation of untrusted invoice form input
//!
//! Raw [`FormInput`] goes in, typed
//! [`InvoiceFields`](crate::core::invoice::InvoiceFields) or
//! [`ValidationErrors`] come out. Filters normalize values first, then the
//! validators parse them, and the [`InvoiceSchema`] pairs each field with its
//! user-facing message.

pub mod extractor;
pub mod filters;
pub mod input;
pub mod schema;
pub mod validators;

pub use input::FormInput;
pub use schema::{
    AMOUNT_FIELD, CUSTOMER_ID_FIELD, FieldRule, InvoiceSchema, STATUS_FIELD, ValidationErrors,
};
