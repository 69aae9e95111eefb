//! Popup content assembly.

use serde_json::{Map, Value};

/// Renders a feature's attributes as `key: value` lines, one per attribute,
/// in the map's insertion order.
pub fn format_properties(properties: &Map<String, Value>) -> String {
    let mut lines = Vec::with_capacity(properties.len());
    for (key, value) in properties {
        lines.push(format!("{}: {}", key, render_value(value)));
    }
    lines.join("\n")
}

/// Strings render without JSON quoting; everything else uses its JSON form.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
