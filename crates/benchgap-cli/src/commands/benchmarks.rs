use serde_json::{json, Value};

use benchgap_core::benchmarks::BenchmarkProfile;

/// Print the ACV-bracket benchmark table.
pub fn run_benchmarks() -> Result<Value, Box<dyn std::error::Error>> {
    let rows: Vec<Value> = BenchmarkProfile::table()
        .into_iter()
        .map(|row| {
            json!({
                "bracket": row.bracket.label(),
                "win_rate_pct": row.win_rate_pct.to_string(),
                "sales_cycle_days": row.sales_cycle_days.to_string(),
                "nrr_pct": row.nrr_pct.to_string(),
            })
        })
        .collect();

    Ok(Value::Array(rows))
}
