use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::benchmarks::{
    BenchmarkProfile, CYCLE_DAMPING_FACTOR, CYCLE_SCORE_WEIGHT, NRR_SCORE_WEIGHT,
    WIN_RATE_SCORE_WEIGHT,
};
use crate::error::BenchGapError;
use crate::types::{with_metadata, ComputationOutput, Days, Money, Percent, Score};
use crate::BenchGapResult;

// ---------------------------------------------------------------------------
// Benchmark Gap Estimator — Input / Output types
// ---------------------------------------------------------------------------

/// The five company metrics the estimator runs on.
///
/// The calculator UI constrains each metric to a slider range (noted per
/// field); the estimator itself accepts any finite positive value and only
/// warns when a metric falls outside the usual range.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapEstimatorInput {
    /// Annual recurring revenue in millions of dollars (UI range 1–100)
    pub annual_recurring_revenue_millions: Money,
    /// Average contract value in thousands of dollars (UI range 5–500)
    pub average_contract_value_thousands: Money,
    /// Win rate as a percentage (UI range 10–60)
    pub win_rate_pct: Percent,
    /// Average sales cycle length in days (UI range 30–365)
    pub sales_cycle_days: Days,
    /// Net revenue retention as a percentage, may exceed 100 (UI range 80–150)
    pub net_revenue_retention_pct: Percent,
}

/// The three dimensions a company is benchmarked on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapDimension {
    WinRate,
    SalesCycle,
    Retention,
}

impl GapDimension {
    pub fn label(&self) -> &'static str {
        match self {
            GapDimension::WinRate => "Win Rate",
            GapDimension::SalesCycle => "Sales Cycle",
            GapDimension::Retention => "Retention",
        }
    }
}

/// One benchmarked dimension: how far from benchmark, and what it costs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapRecord {
    pub dimension: GapDimension,
    pub label: String,
    /// Signed gap versus benchmark; positive means underperforming.
    /// Win rate and NRR gaps are in percentage points, cycle gap in days.
    pub gap_magnitude: Decimal,
    /// Estimated annual revenue impact in millions. Never negative.
    pub impact_millions: Money,
    pub description: String,
}

/// Qualitative interpretation band for the 0–10 performance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    SignificantUnderperformance,
    BelowBenchmark,
    NearBenchmark,
    StrongPerformance,
}

impl ScoreBand {
    /// Band thresholds: <5, [5,7), [7,9), >=9.
    pub fn for_score(score: Score) -> Self {
        if score < dec!(5) {
            ScoreBand::SignificantUnderperformance
        } else if score < dec!(7) {
            ScoreBand::BelowBenchmark
        } else if score < dec!(9) {
            ScoreBand::NearBenchmark
        } else {
            ScoreBand::StrongPerformance
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            ScoreBand::SignificantUnderperformance => {
                "Significant underperformance versus benchmark"
            }
            ScoreBand::BelowBenchmark => "Below benchmark with clear opportunities",
            ScoreBand::NearBenchmark => "Near benchmark with optimization opportunities",
            ScoreBand::StrongPerformance => "Strong performance at or above benchmark",
        }
    }
}

/// Full output of the benchmark gap estimation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GapEstimatorOutput {
    /// Weighted performance score in [0, 10]
    pub score: Score,
    /// Interpretation band for the score
    pub band: ScoreBand,
    /// Natural-language reading of the band
    pub interpretation: String,
    /// Sum of the per-dimension impacts, in millions
    pub total_recoverable_revenue_millions: Money,
    /// Label of the highest-impact gap, or "Optimization" when none is positive
    pub primary_gap_label: String,
    pub primary_gap_description: String,
    /// All three gap records, sorted descending by impact
    pub gaps: Vec<GapRecord>,
    /// Implied customer count = round(ARR * 1000 / ACV)
    pub current_customer_count: Decimal,
    /// The benchmark row the company was measured against
    pub benchmark: BenchmarkProfile,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Estimate the benchmark gap for a company.
///
/// Selects the benchmark row for the company's ACV bracket, measures the
/// signed gap on each of the three dimensions, prices each positive gap as
/// annual recoverable revenue, and folds the dimensions into a 0–10
/// performance score.
///
/// Pure and deterministic: no I/O, no hidden state. Identical inputs yield
/// bit-identical outputs, so the function is safe to call on every slider
/// tick.
pub fn estimate_benchmark_gap(
    input: &GapEstimatorInput,
) -> BenchGapResult<ComputationOutput<GapEstimatorOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    // -- Validation ----------------------------------------------------------
    validate_input(input, &mut warnings)?;

    let acv = input.average_contract_value_thousands;
    let win_rate = input.win_rate_pct;
    let cycle = input.sales_cycle_days;
    let nrr = input.net_revenue_retention_pct;

    // -- Bracket selection ---------------------------------------------------
    let benchmark = BenchmarkProfile::for_acv(acv);

    // -- Implied customer count ----------------------------------------------
    // ARR is in millions, ACV in thousands, so ARR * 1000 / ACV is a count.
    let current_customer_count = (input.annual_recurring_revenue_millions * dec!(1000) / acv)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);

    // -- Gap magnitudes (positive = underperforming) -------------------------
    let win_rate_gap = benchmark.win_rate_pct - win_rate;
    let cycle_gap = cycle - benchmark.sales_cycle_days;
    let nrr_gap = benchmark.nrr_pct - nrr;

    // -- Revenue impact per dimension ----------------------------------------
    // A dimension only contributes when its gap is strictly positive; no
    // bonus revenue is modelled for outperformance.

    // Win rate: hold the implied opportunity volume fixed and ask how many
    // customers the benchmark win rate would have produced from it.
    let win_rate_impact = if win_rate_gap > Decimal::ZERO {
        let opportunities = current_customer_count / (win_rate / dec!(100));
        let benchmark_customers = opportunities * (benchmark.win_rate_pct / dec!(100));
        (benchmark_customers - current_customer_count) * acv / dec!(1000)
    } else {
        Decimal::ZERO
    };

    // Retention: customers lost each year to sub-benchmark retention.
    let retention_impact = if nrr_gap > Decimal::ZERO {
        current_customer_count * (nrr_gap / dec!(100)) * acv / dec!(1000)
    } else {
        Decimal::ZERO
    };

    // Sales cycle: relative velocity shortfall, damped because only part of
    // the freed-up cycle time converts into additional closed deals.
    let cycle_impact = if cycle_gap > Decimal::ZERO {
        let velocity_shortfall = cycle / benchmark.sales_cycle_days - Decimal::ONE;
        velocity_shortfall * current_customer_count * CYCLE_DAMPING_FACTOR * acv / dec!(1000)
    } else {
        Decimal::ZERO
    };

    let total_recoverable = win_rate_impact + retention_impact + cycle_impact;

    // -- Performance score ---------------------------------------------------
    // Each dimension contributes a capped sub-score proportional to distance
    // from benchmark; the caps sum to 10. The cycle sub-score inverts the
    // ratio because a shorter cycle is better.
    let win_rate_score = (WIN_RATE_SCORE_WEIGHT * win_rate / benchmark.win_rate_pct)
        .clamp(Decimal::ZERO, WIN_RATE_SCORE_WEIGHT);
    let cycle_score = (CYCLE_SCORE_WEIGHT * benchmark.sales_cycle_days / cycle)
        .clamp(Decimal::ZERO, CYCLE_SCORE_WEIGHT);
    let nrr_score =
        (NRR_SCORE_WEIGHT * nrr / benchmark.nrr_pct).clamp(Decimal::ZERO, NRR_SCORE_WEIGHT);
    let score = win_rate_score + cycle_score + nrr_score;

    let band = ScoreBand::for_score(score);

    // -- Gap records, sorted by impact ---------------------------------------
    let mut gaps = vec![
        build_gap_record(
            GapDimension::WinRate,
            win_rate_gap,
            win_rate_impact,
            win_rate,
            benchmark.win_rate_pct,
        ),
        build_gap_record(
            GapDimension::SalesCycle,
            cycle_gap,
            cycle_impact,
            cycle,
            benchmark.sales_cycle_days,
        ),
        build_gap_record(
            GapDimension::Retention,
            nrr_gap,
            retention_impact,
            nrr,
            benchmark.nrr_pct,
        ),
    ];
    gaps.sort_by(|a, b| b.impact_millions.cmp(&a.impact_millions));

    // -- Primary gap ---------------------------------------------------------
    let top = &gaps[0];
    let (primary_gap_label, primary_gap_description) = if top.impact_millions > Decimal::ZERO {
        (top.label.clone(), top.description.clone())
    } else {
        (
            "Optimization".to_string(),
            "All metrics are at or above benchmark for this ACV band. \
             Focus on compounding existing advantages."
                .to_string(),
        )
    };

    let output = GapEstimatorOutput {
        score,
        band,
        interpretation: band.description().to_string(),
        total_recoverable_revenue_millions: total_recoverable,
        primary_gap_label,
        primary_gap_description,
        gaps,
        current_customer_count,
        benchmark,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Benchmark Gap Analysis (win rate / sales cycle / retention)",
        input,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn validate_input(input: &GapEstimatorInput, warnings: &mut Vec<String>) -> BenchGapResult<()> {
    if input.annual_recurring_revenue_millions <= Decimal::ZERO {
        return Err(BenchGapError::InvalidInput {
            field: "annual_recurring_revenue_millions".into(),
            reason: "ARR must be positive.".into(),
        });
    }
    // ACV and win rate appear as divisors; zero would be a structural fault,
    // not a degenerate result.
    if input.average_contract_value_thousands <= Decimal::ZERO {
        return Err(BenchGapError::InvalidInput {
            field: "average_contract_value_thousands".into(),
            reason: "ACV must be positive.".into(),
        });
    }
    if input.win_rate_pct <= Decimal::ZERO {
        return Err(BenchGapError::InvalidInput {
            field: "win_rate_pct".into(),
            reason: "Win rate must be positive.".into(),
        });
    }
    if input.sales_cycle_days <= Decimal::ZERO {
        return Err(BenchGapError::InvalidInput {
            field: "sales_cycle_days".into(),
            reason: "Sales cycle length must be positive.".into(),
        });
    }
    if input.net_revenue_retention_pct < Decimal::ZERO {
        return Err(BenchGapError::InvalidInput {
            field: "net_revenue_retention_pct".into(),
            reason: "Net revenue retention cannot be negative.".into(),
        });
    }

    warn_outside_ui_range(
        warnings,
        "annual_recurring_revenue_millions",
        input.annual_recurring_revenue_millions,
        dec!(1),
        dec!(100),
    );
    warn_outside_ui_range(
        warnings,
        "average_contract_value_thousands",
        input.average_contract_value_thousands,
        dec!(5),
        dec!(500),
    );
    warn_outside_ui_range(warnings, "win_rate_pct", input.win_rate_pct, dec!(10), dec!(60));
    warn_outside_ui_range(
        warnings,
        "sales_cycle_days",
        input.sales_cycle_days,
        dec!(30),
        dec!(365),
    );
    warn_outside_ui_range(
        warnings,
        "net_revenue_retention_pct",
        input.net_revenue_retention_pct,
        dec!(80),
        dec!(150),
    );

    Ok(())
}

fn warn_outside_ui_range(
    warnings: &mut Vec<String>,
    field: &str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) {
    if value < min || value > max {
        warnings.push(format!(
            "{} = {} is outside the calculator's usual {}–{} range; computed anyway.",
            field, value, min, max
        ));
    }
}

/// Build the gap record for one dimension, including its display message.
fn build_gap_record(
    dimension: GapDimension,
    gap_magnitude: Decimal,
    impact_millions: Money,
    actual: Decimal,
    benchmark: Decimal,
) -> GapRecord {
    let description = if gap_magnitude > Decimal::ZERO {
        let rounded_impact = impact_millions.round_dp(1);
        match dimension {
            GapDimension::WinRate => format!(
                "Win rate of {}% trails the {}% benchmark; closing the gap is worth \
                 an estimated ${}M annually.",
                actual, benchmark, rounded_impact
            ),
            GapDimension::SalesCycle => format!(
                "Sales cycle of {} days runs {} days longer than the {}-day benchmark, \
                 costing an estimated ${}M annually in deal velocity.",
                actual, gap_magnitude, benchmark, rounded_impact
            ),
            GapDimension::Retention => format!(
                "Net revenue retention of {}% sits below the {}% benchmark, \
                 costing an estimated ${}M annually in churned revenue.",
                actual, benchmark, rounded_impact
            ),
        }
    } else {
        match dimension {
            GapDimension::WinRate => format!(
                "Win rate of {}% is at or above the {}% benchmark.",
                actual, benchmark
            ),
            GapDimension::SalesCycle => format!(
                "Sales cycle of {} days is at or better than the {}-day benchmark.",
                actual, benchmark
            ),
            GapDimension::Retention => format!(
                "Net revenue retention of {}% is at or above the {}% benchmark.",
                actual, benchmark
            ),
        }
    };

    GapRecord {
        dimension,
        label: dimension.label().to_string(),
        gap_magnitude,
        impact_millions,
        description,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input(
        arr: Decimal,
        acv: Decimal,
        win: Decimal,
        cycle: Decimal,
        nrr: Decimal,
    ) -> GapEstimatorInput {
        GapEstimatorInput {
            annual_recurring_revenue_millions: arr,
            average_contract_value_thousands: acv,
            win_rate_pct: win,
            sales_cycle_days: cycle,
            net_revenue_retention_pct: nrr,
        }
    }

    fn estimate(i: &GapEstimatorInput) -> GapEstimatorOutput {
        estimate_benchmark_gap(i).unwrap().result
    }

    fn impact_for(out: &GapEstimatorOutput, dim: GapDimension) -> Decimal {
        out.gaps
            .iter()
            .find(|g| g.dimension == dim)
            .unwrap()
            .impact_millions
    }

    // -- Golden scenarios ----------------------------------------------------

    #[test]
    fn test_golden_mid_bracket_scenario() {
        // ARR=10, ACV=50, win=25, cycle=90, nrr=100 — mid bracket (25/75/115)
        let out = estimate(&input(dec!(10), dec!(50), dec!(25), dec!(90), dec!(100)));

        assert_eq!(out.benchmark.win_rate_pct, dec!(25));
        assert_eq!(out.benchmark.sales_cycle_days, dec!(75));
        assert_eq!(out.benchmark.nrr_pct, dec!(115));
        assert_eq!(out.current_customer_count, dec!(200));

        // Win rate exactly at benchmark: zero gap, zero impact
        assert_eq!(impact_for(&out, GapDimension::WinRate), Decimal::ZERO);

        // Cycle: (90/75 - 1) * 200 * 0.5 * 50 / 1000 = 1.0
        let cycle_impact = impact_for(&out, GapDimension::SalesCycle);
        assert_eq!(
            cycle_impact,
            (dec!(90) / dec!(75) - dec!(1)) * dec!(200) * dec!(0.5) * dec!(50) / dec!(1000)
        );
        assert_eq!(cycle_impact, dec!(1.0));

        // Retention: 200 * 15/100 * 50 / 1000 = 1.5
        let retention_impact = impact_for(&out, GapDimension::Retention);
        assert_eq!(retention_impact, dec!(1.5));

        assert_eq!(out.total_recoverable_revenue_millions, dec!(2.5));

        // Score: 3.5 + 3*75/90 + 3.5*100/115
        let expected_score =
            dec!(3.5) + dec!(3) * dec!(75) / dec!(90) + dec!(3.5) * dec!(100) / dec!(115);
        assert_eq!(out.score, expected_score);
    }

    #[test]
    fn test_golden_all_underperforming_scenario() {
        // ARR=10, ACV=10, win=10, cycle=365, nrr=80 — low bracket (30/45/110)
        let out = estimate(&input(dec!(10), dec!(10), dec!(10), dec!(365), dec!(80)));

        assert_eq!(out.benchmark.win_rate_pct, dec!(30));
        assert_eq!(out.current_customer_count, dec!(1000));

        for gap in &out.gaps {
            assert!(
                gap.impact_millions > Decimal::ZERO,
                "every dimension should carry a positive impact, got {:?}",
                gap
            );
        }

        // Primary gap must be whichever dimension has the largest impact
        let max_gap = out
            .gaps
            .iter()
            .max_by(|a, b| a.impact_millions.cmp(&b.impact_millions))
            .unwrap();
        assert_eq!(out.primary_gap_label, max_gap.label);

        // With cycle at 365 vs 45, velocity dominates:
        // (365/45 - 1) * 1000 * 0.5 * 10 / 1000
        let expected_cycle =
            (dec!(365) / dec!(45) - dec!(1)) * dec!(1000) * dec!(0.5) * dec!(10) / dec!(1000);
        assert_eq!(impact_for(&out, GapDimension::SalesCycle), expected_cycle);
        assert_eq!(out.primary_gap_label, "Sales Cycle");
    }

    // -- Invariants ----------------------------------------------------------

    #[test]
    fn test_score_stays_in_range_at_extremes() {
        // Far above benchmark on every dimension: clamps cap the score at 10
        let best = estimate(&input(dec!(50), dec!(50), dec!(60), dec!(30), dec!(150)));
        assert_eq!(best.score, dec!(10));

        // Far below benchmark: score stays non-negative
        let worst = estimate(&input(dec!(1), dec!(500), dec!(1), dec!(3650), dec!(1)));
        assert!(worst.score >= Decimal::ZERO);
        assert!(worst.score <= dec!(10));
        assert_eq!(worst.band, ScoreBand::SignificantUnderperformance);
    }

    #[test]
    fn test_benchmark_exact_input_scores_ten_with_zero_impact() {
        // Exactly on the mid-bracket benchmark row
        let out = estimate(&input(dec!(10), dec!(50), dec!(25), dec!(75), dec!(115)));

        assert_eq!(out.score, dec!(10));
        assert_eq!(out.band, ScoreBand::StrongPerformance);
        assert_eq!(out.total_recoverable_revenue_millions, Decimal::ZERO);
        assert_eq!(out.primary_gap_label, "Optimization");
        for gap in &out.gaps {
            assert_eq!(gap.impact_millions, Decimal::ZERO);
        }
    }

    #[test]
    fn test_outperformance_yields_no_negative_impacts() {
        // Better than benchmark on all three dimensions
        let out = estimate(&input(dec!(10), dec!(50), dec!(40), dec!(60), dec!(130)));
        assert_eq!(out.total_recoverable_revenue_millions, Decimal::ZERO);
        for gap in &out.gaps {
            assert_eq!(gap.impact_millions, Decimal::ZERO);
            assert!(gap.gap_magnitude < Decimal::ZERO);
        }
        assert_eq!(out.primary_gap_label, "Optimization");
    }

    #[test]
    fn test_idempotence_bit_identical_output() {
        let i = input(dec!(23.7), dec!(42.5), dec!(18), dec!(140), dec!(97));
        let a = estimate_benchmark_gap(&i).unwrap();
        let b = estimate_benchmark_gap(&i).unwrap();
        assert_eq!(
            serde_json::to_string(&a.result).unwrap(),
            serde_json::to_string(&b.result).unwrap(),
            "identical inputs must produce bit-identical results"
        );
    }

    #[test]
    fn test_win_rate_monotonicity() {
        // Decreasing win rate: impact never decreases, score never increases
        let base = input(dec!(10), dec!(50), dec!(25), dec!(90), dec!(100));
        let mut prev_impact = Decimal::ZERO;
        let mut prev_score = dec!(11);
        let mut win = dec!(25);
        while win >= dec!(5) {
            let mut i = base.clone();
            i.win_rate_pct = win;
            let out = estimate(&i);
            let impact = impact_for(&out, GapDimension::WinRate);
            assert!(
                impact >= prev_impact,
                "win-rate impact decreased when win rate dropped to {}",
                win
            );
            assert!(
                out.score <= prev_score,
                "score increased when win rate dropped to {}",
                win
            );
            prev_impact = impact;
            prev_score = out.score;
            win -= dec!(5);
        }
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let out = estimate(&input(dec!(30), dec!(120), dec!(15), dec!(200), dec!(95)));
        let sum: Decimal = out.gaps.iter().map(|g| g.impact_millions).sum();
        assert_eq!(out.total_recoverable_revenue_millions, sum);
    }

    #[test]
    fn test_gaps_sorted_descending_by_impact() {
        let out = estimate(&input(dec!(10), dec!(10), dec!(10), dec!(365), dec!(80)));
        for pair in out.gaps.windows(2) {
            assert!(pair[0].impact_millions >= pair[1].impact_millions);
        }
    }

    // -- Validation ----------------------------------------------------------

    #[test]
    fn test_zero_acv_rejected() {
        let err = estimate_benchmark_gap(&input(dec!(10), dec!(0), dec!(25), dec!(90), dec!(100)))
            .unwrap_err();
        assert!(matches!(err, BenchGapError::InvalidInput { ref field, .. }
            if field == "average_contract_value_thousands"));
    }

    #[test]
    fn test_zero_win_rate_rejected() {
        let err = estimate_benchmark_gap(&input(dec!(10), dec!(50), dec!(0), dec!(90), dec!(100)))
            .unwrap_err();
        assert!(matches!(err, BenchGapError::InvalidInput { ref field, .. }
            if field == "win_rate_pct"));
    }

    #[test]
    fn test_negative_arr_rejected() {
        let err = estimate_benchmark_gap(&input(dec!(-1), dec!(50), dec!(25), dec!(90), dec!(100)))
            .unwrap_err();
        assert!(matches!(err, BenchGapError::InvalidInput { .. }));
    }

    #[test]
    fn test_out_of_ui_range_warns_but_computes() {
        let i = input(dec!(250), dec!(50), dec!(25), dec!(90), dec!(100));
        let out = estimate_benchmark_gap(&i).unwrap();
        assert!(!out.warnings.is_empty(), "expected an out-of-range warning");
        assert!(out.result.score > Decimal::ZERO);
    }

    #[test]
    fn test_interpretation_bands() {
        assert_eq!(
            ScoreBand::for_score(dec!(4.99)),
            ScoreBand::SignificantUnderperformance
        );
        assert_eq!(ScoreBand::for_score(dec!(5)), ScoreBand::BelowBenchmark);
        assert_eq!(ScoreBand::for_score(dec!(6.99)), ScoreBand::BelowBenchmark);
        assert_eq!(ScoreBand::for_score(dec!(7)), ScoreBand::NearBenchmark);
        assert_eq!(ScoreBand::for_score(dec!(8.99)), ScoreBand::NearBenchmark);
        assert_eq!(ScoreBand::for_score(dec!(9)), ScoreBand::StrongPerformance);
        assert_eq!(ScoreBand::for_score(dec!(10)), ScoreBand::StrongPerformance);
    }

    #[test]
    fn test_customer_count_rounding() {
        // ARR=1M, ACV=7k => 142.857 customers, rounds to 143
        let out = estimate(&input(dec!(1), dec!(7), dec!(25), dec!(90), dec!(100)));
        assert_eq!(out.current_customer_count, dec!(143));
    }

    #[test]
    fn test_methodology_string() {
        let result =
            estimate_benchmark_gap(&input(dec!(10), dec!(50), dec!(25), dec!(90), dec!(100)))
                .unwrap();
        assert_eq!(
            result.methodology,
            "Benchmark Gap Analysis (win rate / sales cycle / retention)"
        );
    }
}
