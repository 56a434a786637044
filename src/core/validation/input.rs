//! Raw, untrusted form input

use serde_json::{Map, Value};
use std::collections::HashMap;

/// A submitted form: field name to string value, exactly as received.
///
/// Nothing in here is trusted. It only becomes an
/// [`InvoiceFields`](crate::core::invoice::InvoiceFields) by going through
/// [`InvoiceSchema::validate`](super::InvoiceSchema::validate).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput(HashMap<String, String>);

impl FormInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build form input from a JSON object.
    ///
    /// Strings are taken as-is, numbers and booleans are rendered to their
    /// textual form, and `null`, arrays and objects are dropped (the field is
    /// then treated as missing).
    pub fn from_json(object: Map<String, Value>) -> Self {
        object
            .into_iter()
            .filter_map(|(field, value)| {
                let text = match value {
                    Value::String(s) => s,
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    Value::Null | Value::Array(_) | Value::Object(_) => return None,
                };
                Some((field, text))
            })
            .collect()
    }
}

impl From<HashMap<String, String>> for FormInput {
    fn from(fields: HashMap<String, String>) -> Self {
        Self(fields)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FormInput {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_builder_and_get() {
        let input = FormInput::new().with("customerId", "c1").with("amount", "10");
        assert_eq!(input.get("customerId"), Some("c1"));
        assert_eq!(input.get("amount"), Some("10"));
        assert_eq!(input.get("status"), None);
        assert_eq!(input.len(), 2);
    }

    #[test]
    fn test_from_iterator() {
        let input: FormInput = [("status", "paid")].into_iter().collect();
        assert_eq!(input.get("status"), Some("paid"));
    }

    #[test]
    fn test_from_json_coerces_scalars() {
        let Value::Object(object) = json!({
            "customerId": "c1",
            "amount": 9.99,
            "flag": true,
            "status": null,
            "tags": ["a"],
        }) else {
            unreachable!()
        };

        let input = FormInput::from_json(object);
        assert_eq!(input.get("customerId"), Some("c1"));
        assert_eq!(input.get("amount"), Some("9.99"));
        assert_eq!(input.get("flag"), Some("true"));
        assert_eq!(input.get("status"), None);
        assert_eq!(input.get("tags"), None);
    }

    #[test]
    fn test_empty() {
        assert!(FormInput::new().is_empty());
    }
}
