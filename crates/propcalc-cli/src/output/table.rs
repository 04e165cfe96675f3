use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::display_value;

/// Row-table keys rendered after the scalar summary, in display order.
const ROW_SECTIONS: [&str; 3] = ["entries", "expense_breakdown", "contributions"];

/// Format output as tables using the tabled crate: a field/value table
/// for scalar results, then one row table per schedule-like array.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_tables(result, map);
            } else {
                print_flat_object(value);
            }
        }
        Value::Array(arr) => print_array_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result_tables(result: &Value, envelope: &serde_json::Map<String, Value>) {
    match result {
        Value::Object(res_map) => {
            // Scalar fields: either the nested "summary" object or the
            // top-level non-array fields
            if let Some(Value::Object(summary)) = res_map.get("summary") {
                print_field_rows(summary.iter());
            } else {
                print_field_rows(
                    res_map
                        .iter()
                        .filter(|(k, v)| !v.is_array() || !ROW_SECTIONS.contains(&k.as_str())),
                );
            }

            for section in ROW_SECTIONS {
                if let Some(Value::Array(rows)) = res_map.get(section) {
                    if !rows.is_empty() {
                        println!("\n{}:", section);
                        print_array_table(rows);
                    }
                }
            }
        }
        _ => print_flat_object(&Value::Object(envelope.clone())),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_field_rows<'a>(fields: impl Iterator<Item = (&'a String, &'a Value)>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key.as_str(), &display_value(val)]);
    }
    let table = Table::from(builder);
    println!("{}", table);
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        print_field_rows(map.iter());
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(display_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        for item in arr {
            println!("{}", display_value(item));
        }
    }
}
