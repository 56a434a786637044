//! Core module containing the invoice model, validation and actions

pub mod actions;
pub mod amount;
pub mod clock;
pub mod error;
pub mod events;
pub mod invoice;
pub mod store;
pub mod validation;

pub use actions::{ActionOutcome, DEFAULT_LISTING_PATH, FormState, InvoiceActions, Operation};
pub use amount::{AmountError, Cents};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::ActionError;
pub use events::{EventBus, EventEnvelope, Invalidation, InvoiceEvent, ViewInvalidator};
pub use invoice::{Invoice, InvoiceFields, InvoiceStatus, NewInvoice};
pub use store::InvoiceStore;
pub use validation::{FormInput, InvoiceSchema, ValidationErrors};
