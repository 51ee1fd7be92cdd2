use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::BenchGapError;
use crate::estimator::{estimate_benchmark_gap, GapEstimatorInput, GapEstimatorOutput};
use crate::types::ComputationOutput;
use crate::BenchGapResult;

// ---------------------------------------------------------------------------
// Demo company profiles
// ---------------------------------------------------------------------------

/// A canned company used for sales demos and the portfolio view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Stable identifier for lookup, e.g. "series-b-saas"
    pub slug: String,
    pub name: String,
    /// Short positioning line shown in the demo
    pub segment: String,
    pub metrics: GapEstimatorInput,
}

/// The demo roster. Spans all three ACV brackets so every benchmark row is
/// exercised in a walkthrough.
pub fn all_profiles() -> Vec<CompanyProfile> {
    vec![
        CompanyProfile {
            slug: "smb-tools".to_string(),
            name: "Brightpath Tools".to_string(),
            segment: "SMB productivity suite, transactional sales motion".to_string(),
            metrics: GapEstimatorInput {
                annual_recurring_revenue_millions: dec!(4),
                average_contract_value_thousands: dec!(8),
                win_rate_pct: dec!(22),
                sales_cycle_days: dec!(60),
                net_revenue_retention_pct: dec!(96),
            },
        },
        CompanyProfile {
            slug: "series-b-saas".to_string(),
            name: "Corelink Systems".to_string(),
            segment: "Series B mid-market SaaS, inside sales team".to_string(),
            metrics: GapEstimatorInput {
                annual_recurring_revenue_millions: dec!(18),
                average_contract_value_thousands: dec!(45),
                win_rate_pct: dec!(21),
                sales_cycle_days: dec!(110),
                net_revenue_retention_pct: dec!(104),
            },
        },
        CompanyProfile {
            slug: "enterprise-infra".to_string(),
            name: "Meridian Infrastructure".to_string(),
            segment: "Enterprise data platform, field sales motion".to_string(),
            metrics: GapEstimatorInput {
                annual_recurring_revenue_millions: dec!(62),
                average_contract_value_thousands: dec!(180),
                win_rate_pct: dec!(17),
                sales_cycle_days: dec!(160),
                net_revenue_retention_pct: dec!(112),
            },
        },
        CompanyProfile {
            slug: "benchmark-leader".to_string(),
            name: "Northgate Analytics".to_string(),
            segment: "Category leader, at or above benchmark everywhere".to_string(),
            metrics: GapEstimatorInput {
                annual_recurring_revenue_millions: dec!(35),
                average_contract_value_thousands: dec!(70),
                win_rate_pct: dec!(31),
                sales_cycle_days: dec!(65),
                net_revenue_retention_pct: dec!(121),
            },
        },
    ]
}

/// Look up a demo profile by slug.
pub fn find_profile(slug: &str) -> BenchGapResult<CompanyProfile> {
    all_profiles()
        .into_iter()
        .find(|p| p.slug == slug)
        .ok_or_else(|| BenchGapError::UnknownProfile(slug.to_string()))
}

/// Run the estimator on a demo profile.
pub fn run_profile(slug: &str) -> BenchGapResult<ComputationOutput<GapEstimatorOutput>> {
    let profile = find_profile(slug)?;
    estimate_benchmark_gap(&profile.metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::benchmarks::AcvBracket;
    use rust_decimal::Decimal;

    #[test]
    fn test_roster_spans_all_brackets() {
        let brackets: Vec<AcvBracket> = all_profiles()
            .iter()
            .map(|p| AcvBracket::for_acv(p.metrics.average_contract_value_thousands))
            .collect();
        assert!(brackets.contains(&AcvBracket::UnderTwentyFive));
        assert!(brackets.contains(&AcvBracket::TwentyFiveToHundred));
        assert!(brackets.contains(&AcvBracket::HundredAndAbove));
    }

    #[test]
    fn test_every_profile_estimates_cleanly() {
        for profile in all_profiles() {
            let result = run_profile(&profile.slug);
            assert!(result.is_ok(), "profile '{}' failed to estimate", profile.slug);
        }
    }

    #[test]
    fn test_benchmark_leader_has_no_recoverable_revenue() {
        let out = run_profile("benchmark-leader").unwrap().result;
        assert_eq!(out.total_recoverable_revenue_millions, Decimal::ZERO);
        assert_eq!(out.primary_gap_label, "Optimization");
    }

    #[test]
    fn test_unknown_slug_is_an_error() {
        let err = find_profile("no-such-company").unwrap_err();
        assert!(matches!(err, BenchGapError::UnknownProfile(_)));
    }

    #[test]
    fn test_slugs_are_unique() {
        let profiles = all_profiles();
        let mut slugs: Vec<&str> = profiles.iter().map(|p| p.slug.as_str()).collect();
        slugs.sort_unstable();
        slugs.dedup();
        assert_eq!(slugs.len(), profiles.len());
    }
}
