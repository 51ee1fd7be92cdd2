use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Days, Money, Percent};

// ---------------------------------------------------------------------------
// ACV brackets and benchmark reference values
// ---------------------------------------------------------------------------

/// Average-contract-value bracket. ACV is denominated in thousands of dollars.
///
/// Brackets are contiguous, non-overlapping, and exhaustive over positive ACV:
/// the boundary values 25 and 100 belong to the upper bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AcvBracket {
    /// ACV below $25k — transactional / SMB motion
    UnderTwentyFive,
    /// $25k up to (but excluding) $100k — mid-market motion
    TwentyFiveToHundred,
    /// $100k and above — enterprise motion
    HundredAndAbove,
}

impl AcvBracket {
    /// Select the bracket for an ACV. Exactly one bracket matches any value.
    pub fn for_acv(acv_thousands: Money) -> Self {
        if acv_thousands < dec!(25) {
            AcvBracket::UnderTwentyFive
        } else if acv_thousands < dec!(100) {
            AcvBracket::TwentyFiveToHundred
        } else {
            AcvBracket::HundredAndAbove
        }
    }

    /// Human-readable bracket description for display.
    pub fn label(&self) -> &'static str {
        match self {
            AcvBracket::UnderTwentyFive => "ACV < $25k",
            AcvBracket::TwentyFiveToHundred => "$25k ≤ ACV < $100k",
            AcvBracket::HundredAndAbove => "ACV ≥ $100k",
        }
    }
}

/// The reference values a company is measured against, keyed by ACV bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkProfile {
    pub bracket: AcvBracket,
    /// Benchmark win rate (percent)
    pub win_rate_pct: Percent,
    /// Benchmark sales cycle length (days)
    pub sales_cycle_days: Days,
    /// Benchmark net revenue retention (percent)
    pub nrr_pct: Percent,
}

impl BenchmarkProfile {
    /// Look up the benchmark triple for an ACV.
    pub fn for_acv(acv_thousands: Money) -> Self {
        let bracket = AcvBracket::for_acv(acv_thousands);
        match bracket {
            AcvBracket::UnderTwentyFive => BenchmarkProfile {
                bracket,
                win_rate_pct: dec!(30),
                sales_cycle_days: dec!(45),
                nrr_pct: dec!(110),
            },
            AcvBracket::TwentyFiveToHundred => BenchmarkProfile {
                bracket,
                win_rate_pct: dec!(25),
                sales_cycle_days: dec!(75),
                nrr_pct: dec!(115),
            },
            AcvBracket::HundredAndAbove => BenchmarkProfile {
                bracket,
                win_rate_pct: dec!(20),
                sales_cycle_days: dec!(120),
                nrr_pct: dec!(120),
            },
        }
    }

    /// The full table, in ascending bracket order. Used for display.
    pub fn table() -> Vec<BenchmarkProfile> {
        vec![
            BenchmarkProfile::for_acv(dec!(10)),
            BenchmarkProfile::for_acv(dec!(50)),
            BenchmarkProfile::for_acv(dec!(150)),
        ]
    }
}

/// Fraction of freed-up sales-cycle time assumed to convert into additional
/// closed deals per year. Product-tuned constant, preserved for parity with
/// the shipped calculator.
pub const CYCLE_DAMPING_FACTOR: Decimal = dec!(0.5);

/// Score weight for the win-rate dimension. Product-tuned.
pub const WIN_RATE_SCORE_WEIGHT: Decimal = dec!(3.5);

/// Score weight for the sales-cycle dimension. Product-tuned.
pub const CYCLE_SCORE_WEIGHT: Decimal = dec!(3);

/// Score weight for the retention dimension. Product-tuned.
pub const NRR_SCORE_WEIGHT: Decimal = dec!(3.5);

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bracket_below_lower_boundary() {
        assert_eq!(AcvBracket::for_acv(dec!(24.99)), AcvBracket::UnderTwentyFive);
        assert_eq!(AcvBracket::for_acv(dec!(5)), AcvBracket::UnderTwentyFive);
    }

    #[test]
    fn test_bracket_lower_boundary_belongs_to_mid() {
        assert_eq!(
            AcvBracket::for_acv(dec!(25)),
            AcvBracket::TwentyFiveToHundred,
            "ACV = 25 must resolve to the mid bracket, not the low one"
        );
        assert_eq!(
            AcvBracket::for_acv(dec!(25.01)),
            AcvBracket::TwentyFiveToHundred
        );
    }

    #[test]
    fn test_bracket_upper_boundary_belongs_to_enterprise() {
        assert_eq!(
            AcvBracket::for_acv(dec!(99.99)),
            AcvBracket::TwentyFiveToHundred
        );
        assert_eq!(
            AcvBracket::for_acv(dec!(100)),
            AcvBracket::HundredAndAbove,
            "ACV = 100 must resolve to the enterprise bracket"
        );
        assert_eq!(AcvBracket::for_acv(dec!(100.01)), AcvBracket::HundredAndAbove);
    }

    #[test]
    fn test_benchmark_values_per_bracket() {
        let low = BenchmarkProfile::for_acv(dec!(10));
        assert_eq!(low.win_rate_pct, dec!(30));
        assert_eq!(low.sales_cycle_days, dec!(45));
        assert_eq!(low.nrr_pct, dec!(110));

        let mid = BenchmarkProfile::for_acv(dec!(50));
        assert_eq!(mid.win_rate_pct, dec!(25));
        assert_eq!(mid.sales_cycle_days, dec!(75));
        assert_eq!(mid.nrr_pct, dec!(115));

        let ent = BenchmarkProfile::for_acv(dec!(150));
        assert_eq!(ent.win_rate_pct, dec!(20));
        assert_eq!(ent.sales_cycle_days, dec!(120));
        assert_eq!(ent.nrr_pct, dec!(120));
    }

    #[test]
    fn test_table_covers_all_brackets_in_order() {
        let table = BenchmarkProfile::table();
        assert_eq!(table.len(), 3);
        assert_eq!(table[0].bracket, AcvBracket::UnderTwentyFive);
        assert_eq!(table[1].bracket, AcvBracket::TwentyFiveToHundred);
        assert_eq!(table[2].bracket, AcvBracket::HundredAndAbove);
    }
}
