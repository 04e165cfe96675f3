pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Render a leaf value for human-readable output. Tagged metrics
/// ({"status": "defined", "value": ...}) collapse to the value or "n/a".
pub(crate) fn display_value(value: &Value) -> String {
    if let Value::Object(map) = value {
        if let Some(Value::String(status)) = map.get("status") {
            return match (status.as_str(), map.get("value")) {
                ("defined", Some(v)) => display_value(v),
                _ => "n/a".to_string(),
            };
        }
    }

    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(display_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
