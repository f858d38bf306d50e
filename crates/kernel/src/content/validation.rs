//! Entry data validation against a content type's field list.
//!
//! Only used when strict validation is enabled. Fields not declared on the
//! content type are allowed through untouched.

use muse_sdk::types::{ContentType, FieldType, JsonObject};
use serde_json::Value;

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

/// Check `data` against `content_type`.
///
/// Required fields must be present and non-blank; `number` fields must
/// hold JSON numbers when present. All problems are reported together.
pub fn validate_entry_data(content_type: &ContentType, data: &JsonObject) -> Result<(), String> {
    let mut problems = Vec::new();

    for field in &content_type.fields {
        match data.get(&field.name) {
            None => {
                if field.required {
                    problems.push(format!("field '{}' is required", field.name));
                }
            }
            Some(value) if is_blank(value) => {
                if field.required {
                    problems.push(format!("field '{}' is required", field.name));
                }
            }
            Some(value) => {
                if field.field_type == FieldType::Number && !value.is_number() {
                    problems.push(format!("field '{}' must be a number", field.name));
                }
            }
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("; "))
    }
}
