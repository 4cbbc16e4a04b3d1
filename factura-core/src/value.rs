//! Attribute value helpers.

use serde_json::Value;

/// Whether a value carries nothing worth sending: JSON null or an empty
/// string.
#[must_use]
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.is_empty(),
        _ => false,
    }
}

/// Trailing identifier segment of a URI path, ignoring empty segments.
#[must_use]
pub fn id_from_uri(uri: &str) -> Option<&str> {
    uri.split('/').filter(|segment| !segment.is_empty()).next_back()
}
