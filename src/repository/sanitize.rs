//! Payload sanitization before submission to the store

use serde_json::Value;

use super::Row;
use crate::models::asset::DATE_FIELDS;

/// Replace empty-string date fields with an explicit null so the store
/// clears the column instead of rejecting `""` as a date. Every other field,
/// including absent date fields, passes through unchanged.
pub fn sanitize_date_fields(mut row: Row) -> Row {
    for field in DATE_FIELDS {
        if let Some(value) = row.get_mut(field) {
            if value.as_str() == Some("") {
                *value = Value::Null;
            }
        }
    }
    row
}
