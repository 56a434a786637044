//! Reusable field validators
//!
//! Each validator takes an already-filtered value and either produces the
//! typed value or `None`. The schema attaches the field-specific message.

use crate::core::amount::Cents;
use std::str::FromStr;

/// Validator: field is present and non-empty
pub fn required(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_owned)
}

/// Validator: decimal amount in major units, strictly greater than zero
pub fn positive_amount(value: Option<&str>) -> Option<Cents> {
    value.and_then(|s| Cents::from_major_units(s).ok())
}

/// Validator: value parses into one of the variants of `T`
pub fn one_of<T: FromStr>(value: Option<&str>) -> Option<T> {
    value.and_then(|s| s.parse().ok())
}
