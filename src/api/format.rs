use serde_json::{Map, Value};

/// Text shown in a table cell for a JSON value.
///
/// Strings are shown verbatim, `null` as an empty cell, everything else as
/// its JSON text.
pub fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

/// Read a string-ish field out of a response object.
///
/// Numbers are accepted so ids come back as text either way.
pub fn string_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Split a collection response into its row objects.
///
/// Non-object entries are skipped; the backend only ever returns objects.
pub fn rows_of(body: &Value) -> Option<Vec<&Map<String, Value>>> {
    let items = body.as_array()?;
    Some(items.iter().filter_map(Value::as_object).collect())
}
