use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::BenchGapError;
use crate::estimator::{estimate_benchmark_gap, GapEstimatorInput, ScoreBand};
use crate::types::{with_metadata, ComputationOutput, Money, Score};
use crate::BenchGapResult;

// ---------------------------------------------------------------------------
// Metric sweeps — the library equivalent of dragging one calculator slider
// ---------------------------------------------------------------------------

/// The five adjustable metrics, addressable by name for sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricField {
    AnnualRecurringRevenueMillions,
    AverageContractValueThousands,
    WinRatePct,
    SalesCycleDays,
    NetRevenueRetentionPct,
}

impl MetricField {
    pub fn name(&self) -> &'static str {
        match self {
            MetricField::AnnualRecurringRevenueMillions => "annual_recurring_revenue_millions",
            MetricField::AverageContractValueThousands => "average_contract_value_thousands",
            MetricField::WinRatePct => "win_rate_pct",
            MetricField::SalesCycleDays => "sales_cycle_days",
            MetricField::NetRevenueRetentionPct => "net_revenue_retention_pct",
        }
    }

    pub fn from_name(name: &str) -> BenchGapResult<Self> {
        match name {
            "annual_recurring_revenue_millions" | "arr" => {
                Ok(MetricField::AnnualRecurringRevenueMillions)
            }
            "average_contract_value_thousands" | "acv" => {
                Ok(MetricField::AverageContractValueThousands)
            }
            "win_rate_pct" | "win_rate" => Ok(MetricField::WinRatePct),
            "sales_cycle_days" | "sales_cycle" => Ok(MetricField::SalesCycleDays),
            "net_revenue_retention_pct" | "nrr" => Ok(MetricField::NetRevenueRetentionPct),
            other => Err(BenchGapError::InvalidInput {
                field: "metric".into(),
                reason: format!(
                    "Unknown metric '{}'. Use: arr, acv, win_rate, sales_cycle, nrr",
                    other
                ),
            }),
        }
    }

    fn apply(&self, input: &mut GapEstimatorInput, value: Decimal) {
        match self {
            MetricField::AnnualRecurringRevenueMillions => {
                input.annual_recurring_revenue_millions = value
            }
            MetricField::AverageContractValueThousands => {
                input.average_contract_value_thousands = value
            }
            MetricField::WinRatePct => input.win_rate_pct = value,
            MetricField::SalesCycleDays => input.sales_cycle_days = value,
            MetricField::NetRevenueRetentionPct => input.net_revenue_retention_pct = value,
        }
    }
}

/// Input for a one-dimensional metric sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepInput {
    pub base: GapEstimatorInput,
    pub field: MetricField,
    pub min: Decimal,
    pub max: Decimal,
    pub step: Decimal,
}

/// One row of the sweep: the substituted value and the headline outputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRow {
    pub value: Decimal,
    pub score: Score,
    pub band: ScoreBand,
    pub total_recoverable_revenue_millions: Money,
    pub primary_gap_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepOutput {
    pub field: MetricField,
    pub rows: Vec<SweepRow>,
}

/// Run the estimator across a range of values for one metric, holding the
/// other four fixed. Each row is exactly what a direct estimator call on the
/// substituted input would return.
pub fn sweep_metric(input: &SweepInput) -> BenchGapResult<ComputationOutput<SweepOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    if input.step <= Decimal::ZERO {
        return Err(BenchGapError::InvalidInput {
            field: "step".into(),
            reason: "Step must be positive.".into(),
        });
    }
    if input.min > input.max {
        return Err(BenchGapError::InvalidInput {
            field: "min".into(),
            reason: "Sweep minimum cannot exceed maximum.".into(),
        });
    }

    let mut rows = Vec::new();
    let mut current = input.min;
    while current <= input.max {
        let mut substituted = input.base.clone();
        input.field.apply(&mut substituted, current);

        let estimate = estimate_benchmark_gap(&substituted)?;
        rows.push(SweepRow {
            value: current,
            score: estimate.result.score,
            band: estimate.result.band,
            total_recoverable_revenue_millions: estimate
                .result
                .total_recoverable_revenue_millions,
            primary_gap_label: estimate.result.primary_gap_label,
        });

        current += input.step;
    }

    let output = SweepOutput {
        field: input.field,
        rows,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Metric Sensitivity Sweep",
        input,
        warnings,
        elapsed,
        output,
    ))
}
