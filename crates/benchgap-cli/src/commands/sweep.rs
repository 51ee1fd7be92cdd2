use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use benchgap_core::sensitivity::{sweep_metric, MetricField, SweepInput};

use crate::commands::estimate::{resolve_input, EstimateArgs};

/// Arguments for a slider-style metric sweep
#[derive(Args)]
pub struct SweepArgs {
    /// Metric to sweep, in the format name:min:max:step
    /// (e.g. "win_rate:10:60:5" or "acv:5:500:25")
    #[arg(long)]
    pub var: String,

    #[command(flatten)]
    pub base: EstimateArgs,
}

struct SweepSpec {
    field: MetricField,
    min: Decimal,
    max: Decimal,
    step: Decimal,
}

fn parse_sweep_spec(spec: &str) -> Result<SweepSpec, Box<dyn std::error::Error>> {
    let parts: Vec<&str> = spec.split(':').collect();
    if parts.len() != 4 {
        return Err(format!("Sweep variable must be name:min:max:step, got '{}'", spec).into());
    }
    Ok(SweepSpec {
        field: MetricField::from_name(parts[0])?,
        min: parts[1].parse()?,
        max: parts[2].parse()?,
        step: parts[3].parse()?,
    })
}

pub fn run_sweep(args: SweepArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let spec = parse_sweep_spec(&args.var)?;
    let base = resolve_input(&args.base)?;

    let sweep_input = SweepInput {
        base,
        field: spec.field,
        min: spec.min,
        max: spec.max,
        step: spec.step,
    };

    let result = sweep_metric(&sweep_input)?;
    Ok(serde_json::to_value(result)?)
}
