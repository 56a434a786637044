//! The invoice validation schema
//!
//! The schema is an immutable value. Build it once (usually via
//! [`InvoiceSchema::default`]) and share it by reference between operations.

use super::input::FormInput;
use super::{filters, validators};
use crate::core::invoice::{InvoiceFields, InvoiceStatus};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Form field carrying the customer reference
pub const CUSTOMER_ID_FIELD: &str = "customerId";
/// Form field carrying the amount in major units
pub const AMOUNT_FIELD: &str = "amount";
/// Form field carrying the invoice status
pub const STATUS_FIELD: &str = "status";

/// A named form field and the message shown when it fails validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: String,
    pub message: String,
}

impl FieldRule {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Filter the field's raw value, run `validator`, and record the rule's
    /// message on failure.
    fn check<T>(
        &self,
        input: &FormInput,
        validator: impl Fn(Option<&str>) -> Option<T>,
        errors: &mut ValidationErrors,
    ) -> Option<T> {
        let value = filters::normalize(&self.field, input.get(&self.field));
        let checked = validator(value.as_deref());
        if checked.is_none() {
            errors.add(&self.field, &self.message);
        }
        checked
    }
}

/// Ruleset for the caller-editable invoice fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceSchema {
    pub customer_id: FieldRule,
    pub amount: FieldRule,
    pub status: FieldRule,
}

impl Default for InvoiceSchema {
    fn default() -> Self {
        Self {
            customer_id: FieldRule::new(CUSTOMER_ID_FIELD, "Please select a customer."),
            amount: FieldRule::new(AMOUNT_FIELD, "Please enter an amount greater than $0"),
            status: FieldRule::new(STATUS_FIELD, "Please select an invoice status."),
        }
    }
}

impl InvoiceSchema {
    /// Rules in the order their errors are reported
    pub fn rules(&self) -> [&FieldRule; 3] {
        [&self.customer_id, &self.amount, &self.status]
    }

    /// Parse and validate raw form input into typed invoice fields.
    ///
    /// Every field is checked, so a failure reports all failing fields at
    /// once. Unknown input keys are ignored.
    pub fn validate(&self, input: &FormInput) -> Result<InvoiceFields, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let customer_id = self
            .customer_id
            .check(input, validators::required, &mut errors);
        let amount = self
            .amount
            .check(input, validators::positive_amount, &mut errors);
        let status = self
            .status
            .check(input, validators::one_of::<InvoiceStatus>, &mut errors);

        match (customer_id, amount, status) {
            (Some(customer_id), Some(amount), Some(status)) => Ok(InvoiceFields {
                customer_id,
                amount,
                status,
            }),
            _ => Err(errors),
        }
    }
}

/// Field name to ordered list of messages, in schema order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(IndexMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    /// Messages recorded for one field
    pub fn field(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Names of the failing fields, in schema order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_inner(self) -> IndexMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}
