use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use benchgap_core::estimator::{estimate_benchmark_gap, GapEstimatorInput};

use crate::input;

/// Arguments for a one-off benchmark gap estimate
#[derive(Args)]
pub struct EstimateArgs {
    /// Path to a JSON or YAML file with the five metrics
    #[arg(long)]
    pub input: Option<String>,

    /// Annual recurring revenue in millions of dollars
    #[arg(long)]
    pub arr: Option<Decimal>,

    /// Average contract value in thousands of dollars
    #[arg(long)]
    pub acv: Option<Decimal>,

    /// Win rate as a percentage (e.g. 25 for 25%)
    #[arg(long)]
    pub win_rate: Option<Decimal>,

    /// Average sales cycle length in days
    #[arg(long)]
    pub sales_cycle: Option<Decimal>,

    /// Net revenue retention as a percentage (may exceed 100)
    #[arg(long)]
    pub nrr: Option<Decimal>,
}

/// Resolve the estimator input from flags, an input file, or piped stdin.
pub fn resolve_input(args: &EstimateArgs) -> Result<GapEstimatorInput, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_typed(path);
    }

    // All five flags present: build the input directly.
    if let (Some(arr), Some(acv), Some(win), Some(cycle), Some(nrr)) =
        (args.arr, args.acv, args.win_rate, args.sales_cycle, args.nrr)
    {
        return Ok(GapEstimatorInput {
            annual_recurring_revenue_millions: arr,
            average_contract_value_thousands: acv,
            win_rate_pct: win,
            sales_cycle_days: cycle,
            net_revenue_retention_pct: nrr,
        });
    }

    if let Some(data) = input::stdin::read_stdin()? {
        let parsed: GapEstimatorInput = serde_json::from_value(data)?;
        return Ok(parsed);
    }

    Err("Provide --arr/--acv/--win-rate/--sales-cycle/--nrr, or --input file, \
         or pipe JSON via stdin"
        .into())
}

pub fn run_estimate(args: EstimateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let estimator_input = resolve_input(&args)?;
    let result = estimate_benchmark_gap(&estimator_input)?;
    Ok(serde_json::to_value(result)?)
}
