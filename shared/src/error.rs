//! Backend error payload decoding
//!
//! The catalog API reports failures as a JSON body with a `detail` field:
//!
//! ```json
//! { "detail": "Category not found" }
//! { "detail": { "message": "Parent category not found" } }
//! { "detail": { "errors": { "sku": "SKU already exists" } } }
//! { "detail": [ { "loc": ["body", "name"], "msg": "Field required" } ] }
//! ```
//!
//! The last form is the framework's own request validation output.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field name -> message, for highlighting individual form inputs
pub type FieldErrors = BTreeMap<String, String>;

/// Decoded error payload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorBody {
    /// Human-readable message, when the payload carried one
    pub message: Option<String>,
    /// Per-field validation messages, when the payload carried any
    pub field_errors: Option<FieldErrors>,
}

impl ErrorBody {
    /// Decode an error payload. Unknown shapes decode to an empty body.
    pub fn from_value(value: &Value) -> Self {
        let mut body = Self::default();

        match value.get("detail") {
            Some(Value::String(message)) => body.message = Some(message.clone()),
            Some(Value::Object(detail)) => {
                if let Some(Value::String(message)) = detail.get("message") {
                    body.message = Some(message.clone());
                }
                if let Some(Value::Object(errors)) = detail.get("errors") {
                    body.field_errors = non_empty(collect_field_errors(errors));
                }
            }
            Some(Value::Array(items)) => {
                body.field_errors = non_empty(collect_validation_list(items));
            }
            _ => {}
        }

        if body.message.is_none() {
            if let Some(Value::String(message)) = value.get("message") {
                body.message = Some(message.clone());
            }
        }

        body
    }

    /// Message to show for this payload, falling back to `HTTP Error {status}`
    pub fn message_or_status(&self, status: u16) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| format!("HTTP Error {}", status))
    }
}

fn non_empty(errors: FieldErrors) -> Option<FieldErrors> {
    (!errors.is_empty()).then_some(errors)
}

fn collect_field_errors(errors: &Map<String, Value>) -> FieldErrors {
    errors
        .iter()
        .map(|(field, message)| (field.clone(), value_to_message(message)))
        .collect()
}

/// `[{"loc": [..., "field"], "msg": "..."}]` keyed by the last `loc` element
fn collect_validation_list(items: &[Value]) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for item in items {
        let Some(msg) = item.get("msg").and_then(Value::as_str) else {
            continue;
        };
        let field = item
            .get("loc")
            .and_then(Value::as_array)
            .and_then(|loc| loc.last())
            .map(value_to_message)
            .unwrap_or_else(|| "__root__".to_string());
        errors.entry(field).or_insert_with(|| msg.to_string());
    }
    errors
}

fn value_to_message(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts
            .iter()
            .map(value_to_message)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
