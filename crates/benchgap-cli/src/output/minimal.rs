use serde_json::Value;

use super::render_scalar;

/// Print just the headline answer from the output.
///
/// For an estimate that is the score plus the total recoverable revenue;
/// for a sweep, the row count; otherwise the first field of the result.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let Value::Object(map) = result else {
        println!("{}", render_scalar(result));
        return;
    };

    if let (Some(score), Some(total)) = (
        map.get("score"),
        map.get("total_recoverable_revenue_millions"),
    ) {
        println!(
            "score={} recoverable_millions={}",
            render_scalar(score),
            render_scalar(total)
        );
        if let Some(label) = map.get("primary_gap_label") {
            println!("primary_gap={}", render_scalar(label));
        }
        return;
    }

    if let Some(Value::Array(rows)) = map.get("rows") {
        println!("rows={}", rows.len());
        return;
    }

    if let Some((key, val)) = map.iter().next() {
        println!("{}: {}", key, render_scalar(val));
    }
}
