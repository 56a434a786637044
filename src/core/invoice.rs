//! The invoice record and its validated building blocks

use crate::core::amount::Cents;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Payment status of an invoice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    /// All accepted statuses, in display order
    pub const ALL: [InvoiceStatus; 2] = [InvoiceStatus::Pending, InvoiceStatus::Paid];

    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known invoice status
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown invoice status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for InvoiceStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(InvoiceStatus::Pending),
            "paid" => Ok(InvoiceStatus::Paid),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Caller-editable invoice fields after validation
///
/// Only produced by [`InvoiceSchema::validate`](crate::core::validation::InvoiceSchema::validate),
/// so every value here has already been checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceFields {
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
}

/// An invoice ready to be inserted; the store assigns its id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvoice {
    pub fields: InvoiceFields,
    pub date: NaiveDate,
}

/// A persisted invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub customer_id: String,
    pub amount: Cents,
    pub status: InvoiceStatus,
    /// Creation date, serialized as `YYYY-MM-DD`
    pub date: NaiveDate,
}

impl Invoice {
    /// Materialize a new invoice under the given id
    pub fn from_new(id: Uuid, new: NewInvoice) -> Self {
        Self {
            id,
            customer_id: new.fields.customer_id,
            amount: new.fields.amount,
            status: new.fields.status,
            date: new.date,
        }
    }

    /// Overwrite the editable fields, keeping id and creation date
    pub fn apply(&mut self, fields: InvoiceFields) {
        self.customer_id = fields.customer_id;
        self.amount = fields.amount;
        self.status = fields.status;
    }
}
