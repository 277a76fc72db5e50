//! Heuristic financial scoring and two-company comparison.

pub mod commentary;
pub mod compare;
pub mod score;

pub use commentary::FinancialComment;
pub use compare::{comparison_rows, ComparisonRow, ComparisonSummary, Side, Strength, Verdict};
pub use score::{
    calculate_score, FinancialScore, MissingDataPolicy, RuleOutcome, ScoreCalculator, ScoreMetric,
    ScoreTier, MAX_POINTS,
};
