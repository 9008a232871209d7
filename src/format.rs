use std::fmt::Write;

use serde_json::Value;

use crate::types::ParsedJsonObject;

const HEADER: &str = "User Information:";
const SEPARATOR: &str = "-----------------";

/// Render every field of `object` as a `name: value` line under a header.
///
/// Lines follow the object's key order. Strings are printed without quotes,
/// numbers as they appeared in the response, `null` as an empty value, nested
/// values as compact JSON.
pub fn format_user_data(object: &ParsedJsonObject) -> String {
    let mut formatted = String::new();
    formatted.push_str(HEADER);
    formatted.push('\n');
    formatted.push_str(SEPARATOR);
    formatted.push('\n');

    for (name, value) in object {
        // Writing to a String cannot fail
        let _ = writeln!(formatted, "{}: {}", name, display_value(value));
    }

    formatted
}

fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}
