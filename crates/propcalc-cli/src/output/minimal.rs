use serde_json::Value;

use super::display_value;

/// Print just the key answer value from the output.
///
/// Heuristic: look for well-known result fields in order of priority,
/// then fall back to the first field in the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // The headline figure of each computation
    let priority_keys = [
        "monthly_payment",
        "first_month_payment",
        "net_income",
        "composite_score",
    ];

    if let Value::Object(map) = result_obj {
        // Mortgage results nest the headline figures under "summary"
        let scalars = match map.get("summary") {
            Some(Value::Object(summary)) => summary,
            _ => map,
        };

        for key in &priority_keys {
            if let Some(val) = scalars.get(*key) {
                if !val.is_null() {
                    println!("{}", display_value(val));
                    return;
                }
            }
        }

        if let Some((key, val)) = scalars.iter().next() {
            println!("{}: {}", key, display_value(val));
            return;
        }
    }

    println!("{}", display_value(result_obj));
}
