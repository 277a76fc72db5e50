use finanalyse_core::{finite, FinancialProfile};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Sum of every rule's top band.
pub const MAX_POINTS: u32 = 14;

/// What a rule without data contributes to the score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingDataPolicy {
    /// The rule awards 0 points and still counts toward the maximum.
    #[default]
    CountAsZero,
    /// The rule is dropped from both the points and the maximum.
    ExcludeFromDenominator,
}

impl FromStr for MissingDataPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "count-as-zero" | "count_as_zero" => Ok(MissingDataPolicy::CountAsZero),
            "exclude" | "exclude-from-denominator" | "exclude_from_denominator" => {
                Ok(MissingDataPolicy::ExcludeFromDenominator)
            }
            other => Err(format!("unknown missing-data policy '{}' (expected zero or exclude)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreMetric {
    ReturnOnEquity,
    NetMargin,
    PriceEarnings,
    DebtToEquity,
    Revenue,
    DividendYield,
}

impl ScoreMetric {
    pub const ALL: [ScoreMetric; 6] = [
        ScoreMetric::ReturnOnEquity,
        ScoreMetric::NetMargin,
        ScoreMetric::PriceEarnings,
        ScoreMetric::DebtToEquity,
        ScoreMetric::Revenue,
        ScoreMetric::DividendYield,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ScoreMetric::ReturnOnEquity => "ROE",
            ScoreMetric::NetMargin => "Net margin",
            ScoreMetric::PriceEarnings => "P/E",
            ScoreMetric::DebtToEquity => "Debt/Equity",
            ScoreMetric::Revenue => "Revenue",
            ScoreMetric::DividendYield => "Dividend yield",
        }
    }

    pub fn max_points(&self) -> u32 {
        match self {
            ScoreMetric::PriceEarnings | ScoreMetric::DebtToEquity => 3,
            _ => 2,
        }
    }

    pub fn value(&self, profile: &FinancialProfile) -> Option<f64> {
        let raw = match self {
            ScoreMetric::ReturnOnEquity => profile.roe,
            ScoreMetric::NetMargin => profile.net_margin,
            ScoreMetric::PriceEarnings => profile.pe_ratio,
            ScoreMetric::DebtToEquity => profile.debt_to_equity,
            ScoreMetric::Revenue => profile.revenue,
            ScoreMetric::DividendYield => profile.dividend_yield,
        };
        finite(raw)
    }

    /// Bands are checked top-down with strict comparisons; the first match wins.
    pub fn points(&self, v: f64) -> u32 {
        match self {
            ScoreMetric::ReturnOnEquity => {
                if v > 0.2 {
                    2
                } else if v > 0.1 {
                    1
                } else {
                    0
                }
            }
            ScoreMetric::NetMargin => {
                if v > 0.15 {
                    2
                } else if v > 0.05 {
                    1
                } else {
                    0
                }
            }
            // Only the top band requires a positive P/E.
            ScoreMetric::PriceEarnings => {
                if v > 0.0 && v < 15.0 {
                    3
                } else if v < 25.0 {
                    2
                } else if v < 40.0 {
                    1
                } else {
                    0
                }
            }
            ScoreMetric::DebtToEquity => {
                if v < 0.5 {
                    3
                } else if v < 1.0 {
                    2
                } else if v < 2.0 {
                    1
                } else {
                    0
                }
            }
            ScoreMetric::Revenue => {
                if v > 100e9 {
                    2
                } else if v > 20e9 {
                    1
                } else {
                    0
                }
            }
            ScoreMetric::DividendYield => {
                if v > 0.03 {
                    2
                } else if v > 0.01 {
                    1
                } else {
                    0
                }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub metric: ScoreMetric,
    pub value: Option<f64>,
    pub points: u32,
    pub max_points: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialScore {
    /// 0.0 to 10.0, one decimal.
    pub value: f64,
    pub points: u32,
    pub max_points: u32,
    pub rules: Vec<RuleOutcome>,
}

impl FinancialScore {
    pub fn tier(&self) -> ScoreTier {
        ScoreTier::from_score(self.value)
    }

    /// Rules that had data to evaluate.
    pub fn rules_evaluated(&self) -> usize {
        self.rules.iter().filter(|r| r.value.is_some()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Excellent,
    Solid,
    Average,
    Weak,
}

impl ScoreTier {
    pub fn from_score(score: f64) -> Self {
        if score >= 8.0 {
            ScoreTier::Excellent
        } else if score >= 6.0 {
            ScoreTier::Solid
        } else if score >= 4.0 {
            ScoreTier::Average
        } else {
            ScoreTier::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreCalculator {
    policy: MissingDataPolicy,
}

impl ScoreCalculator {
    pub fn new(policy: MissingDataPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> MissingDataPolicy {
        self.policy
    }

    pub fn score(&self, profile: &FinancialProfile) -> FinancialScore {
        let rules: Vec<RuleOutcome> = ScoreMetric::ALL
            .iter()
            .map(|metric| {
                let value = metric.value(profile);
                RuleOutcome {
                    metric: *metric,
                    value,
                    points: value.map(|v| metric.points(v)).unwrap_or(0),
                    max_points: metric.max_points(),
                }
            })
            .collect();

        let points: u32 = rules.iter().map(|r| r.points).sum();
        let max_points: u32 = match self.policy {
            MissingDataPolicy::CountAsZero => MAX_POINTS,
            MissingDataPolicy::ExcludeFromDenominator => rules
                .iter()
                .filter(|r| r.value.is_some())
                .map(|r| r.max_points)
                .sum(),
        };

        let value = if max_points == 0 {
            0.0
        } else {
            let scaled = (points as f64 / max_points as f64) * 10.0;
            ((scaled * 10.0).round() / 10.0).min(10.0)
        };

        FinancialScore {
            value,
            points,
            max_points,
            rules,
        }
    }
}

/// Scores with the default policy (missing data counts as zero).
pub fn calculate_score(profile: &FinancialProfile) -> FinancialScore {
    ScoreCalculator::default().score(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn profile_a() -> FinancialProfile {
        FinancialProfile {
            symbol: "AAA".into(),
            name: "Alpha Industries".into(),
            pe_ratio: Some(12.0),
            roe: Some(0.22),
            net_margin: Some(0.18),
            debt_to_equity: Some(0.3),
            revenue: Some(150e9),
            dividend_yield: Some(0.02),
            ..Default::default()
        }
    }

    #[test]
    fn test_reference_profile_scores_9_3() {
        let score = calculate_score(&profile_a());
        assert_eq!(score.points, 13);
        assert_eq!(score.max_points, MAX_POINTS);
        assert!((score.value - 9.3).abs() < 1e-9);
        assert_eq!(score.tier(), ScoreTier::Excellent);
    }

    #[test]
    fn test_roe_boundary_is_strict() {
        assert_eq!(ScoreMetric::ReturnOnEquity.points(0.2), 1);
        assert_eq!(ScoreMetric::ReturnOnEquity.points(0.2000001), 2);
        assert_eq!(ScoreMetric::ReturnOnEquity.points(0.1), 0);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(ScoreMetric::PriceEarnings.points(15.0), 2);
        assert_eq!(ScoreMetric::PriceEarnings.points(40.0), 0);
        assert_eq!(ScoreMetric::DebtToEquity.points(0.5), 2);
        assert_eq!(ScoreMetric::DebtToEquity.points(2.0), 0);
        assert_eq!(ScoreMetric::Revenue.points(100e9), 1);
        assert_eq!(ScoreMetric::DividendYield.points(0.03), 1);
        assert_eq!(ScoreMetric::NetMargin.points(0.05), 0);
    }

    #[test]
    fn test_negative_pe_falls_to_second_band() {
        assert_eq!(ScoreMetric::PriceEarnings.points(-8.0), 2);
        assert_eq!(ScoreMetric::PriceEarnings.points(0.0), 2);
    }

    #[test]
    fn test_missing_and_nan_fields_score_zero() {
        let mut profile = profile_a();
        profile.roe = Some(f64::NAN);
        profile.revenue = None;
        let score = calculate_score(&profile);
        assert_eq!(score.points, 9);
        assert_eq!(score.max_points, 14);
        assert!((score.value - 6.4).abs() < 1e-9);
        assert_eq!(score.rules_evaluated(), 4);
    }

    #[test]
    fn test_empty_profile() {
        let score = calculate_score(&FinancialProfile::default());
        assert_eq!(score.value, 0.0);

        let score = ScoreCalculator::new(MissingDataPolicy::ExcludeFromDenominator)
            .score(&FinancialProfile::default());
        assert_eq!(score.value, 0.0);
        assert_eq!(score.max_points, 0);
    }

    #[test]
    fn test_exclude_policy_shrinks_denominator() {
        let profile = FinancialProfile {
            pe_ratio: Some(12.0),
            debt_to_equity: Some(0.8),
            ..Default::default()
        };
        let score = ScoreCalculator::new(MissingDataPolicy::ExcludeFromDenominator).score(&profile);
        assert_eq!(score.points, 5);
        assert_eq!(score.max_points, 6);
        assert!((score.value - 8.3).abs() < 1e-9);

        let legacy = calculate_score(&profile);
        assert!((legacy.value - 3.6).abs() < 1e-9);
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("zero".parse::<MissingDataPolicy>(), Ok(MissingDataPolicy::CountAsZero));
        assert_eq!(
            "Exclude".parse::<MissingDataPolicy>(),
            Ok(MissingDataPolicy::ExcludeFromDenominator)
        );
        assert!("ignore".parse::<MissingDataPolicy>().is_err());
    }

    #[test]
    fn test_tiers() {
        assert_eq!(ScoreTier::from_score(8.0), ScoreTier::Excellent);
        assert_eq!(ScoreTier::from_score(7.9), ScoreTier::Solid);
        assert_eq!(ScoreTier::from_score(4.0), ScoreTier::Average);
        assert_eq!(ScoreTier::from_score(3.9), ScoreTier::Weak);
    }

    fn any_field() -> impl Strategy<Value = Option<f64>> {
        prop_oneof![
            Just(None),
            Just(Some(f64::NAN)),
            (-1e12f64..1e12f64).prop_map(Some),
            (-5.0f64..5.0f64).prop_map(Some),
        ]
    }

    proptest! {
        #[test]
        fn prop_score_stays_within_bounds(
            roe in any_field(),
            margin in any_field(),
            pe in any_field(),
            de in any_field(),
            revenue in any_field(),
            dy in any_field(),
            exclude in any::<bool>(),
        ) {
            let profile = FinancialProfile {
                roe,
                net_margin: margin,
                pe_ratio: pe,
                debt_to_equity: de,
                revenue,
                dividend_yield: dy,
                ..Default::default()
            };
            let policy = if exclude {
                MissingDataPolicy::ExcludeFromDenominator
            } else {
                MissingDataPolicy::CountAsZero
            };
            let score = ScoreCalculator::new(policy).score(&profile);
            prop_assert!(score.value >= 0.0 && score.value <= 10.0);
            prop_assert!(score.points <= score.max_points || score.max_points == 0);
            prop_assert!(((score.value * 10.0).round() - score.value * 10.0).abs() < 1e-9);
        }
    }
}
