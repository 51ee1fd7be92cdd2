use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::render_scalar;

/// Format output as tables using the tabled crate.
///
/// Estimator and sweep results arrive wrapped in the computation envelope;
/// the scalar result fields become a Field/Value table and any nested arrays
/// of records (gap records, sweep rows) get their own table below it.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result);
                print_envelope_footer(map);
            } else {
                print_scalar_fields(value);
            }
        }
        Value::Array(arr) => print_record_table(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value) {
    let Value::Object(map) = result else {
        println!("{}", result);
        return;
    };

    // Scalars first, in serialization order.
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        match val {
            Value::Array(_) => continue,
            Value::Object(nested) => {
                // One level of flattening for the echoed benchmark profile
                for (nkey, nval) in nested {
                    builder.push_record([format!("{}.{}", key, nkey), render_scalar(nval)]);
                }
            }
            _ => builder.push_record([key.clone(), render_scalar(val)]),
        }
    }
    println!("{}", Table::from(builder));

    // Then each array of records as its own table.
    for (key, val) in map {
        if let Value::Array(arr) = val {
            if !arr.is_empty() {
                println!("\n{}:", key);
                print_record_table(arr);
            }
        }
    }
}

fn print_scalar_fields(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.clone(), render_scalar(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_record_table(arr: &[Value]) {
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
                    .map(|h| map.get(h.as_str()).map(render_scalar).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", render_scalar(item));
        }
    }
}

fn print_envelope_footer(envelope: &serde_json::Map<String, Value>) {
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
