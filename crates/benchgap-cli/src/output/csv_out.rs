use serde_json::Value;
use std::io;

use super::render_scalar;

/// Write output as CSV to stdout.
///
/// Arrays of records (sweep rows, gap records, the benchmark table) become
/// proper record CSV; a wrapped estimator result falls back to two-column
/// field/value form.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            // Prefer an array of records inside the result envelope.
            let result = map.get("result").unwrap_or(value);
            if let Some(arr) = result
                .as_object()
                .and_then(|m| m.values().find_map(|v| v.as_array()))
            {
                write_records(&mut wtr, arr);
            } else if let Some(Value::Object(res_map)) = map.get("result") {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in res_map {
                    let _ = wtr.write_record([key.as_str(), &render_scalar(val)]);
                }
            } else {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in map {
                    let _ = wtr.write_record([key.as_str(), &render_scalar(val)]);
                }
            }
        }
        Value::Array(arr) => write_records(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&render_scalar(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_records(wtr: &mut csv::Writer<io::StdoutLock<'_>>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(render_scalar).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&render_scalar(item)]);
        }
    }
}
