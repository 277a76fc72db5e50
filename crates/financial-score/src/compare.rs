use finanalyse_core::{finite, format, FinancialProfile};
use serde::{Deserialize, Serialize};

pub const DISCLAIMER: &str =
    "This commentary is generated automatically and does not constitute investment advice.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Which side wins a metric. Ties and missing values have no winner.
pub fn metric_winner(left: Option<f64>, right: Option<f64>, lower_is_better: bool) -> Option<Side> {
    let (l, r) = (finite(left)?, finite(right)?);
    let left_wins = if lower_is_better { l < r } else { l > r };
    let right_wins = if lower_is_better { r < l } else { r > l };
    if left_wins {
        Some(Side::Left)
    } else if right_wins {
        Some(Side::Right)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub label: &'static str,
    pub left: Option<f64>,
    pub right: Option<f64>,
    pub left_display: String,
    pub right_display: String,
    pub lower_is_better: bool,
    pub winner: Option<Side>,
}

impl ComparisonRow {
    fn new(
        label: &'static str,
        left: Option<f64>,
        right: Option<f64>,
        lower_is_better: bool,
        formatter: impl Fn(f64) -> String,
    ) -> Self {
        Self {
            label,
            left,
            right,
            left_display: format::na_or(left, &formatter),
            right_display: format::na_or(right, &formatter),
            lower_is_better,
            winner: metric_winner(left, right, lower_is_better),
        }
    }
}

/// Side-by-side table rows, in display order.
pub fn comparison_rows(a: &FinancialProfile, b: &FinancialProfile) -> Vec<ComparisonRow> {
    vec![
        ComparisonRow::new("P/E", a.pe_ratio, b.pe_ratio, true, format::fixed(1)),
        ComparisonRow::new("ROE", a.roe, b.roe, false, format::percentage),
        ComparisonRow::new("Net margin", a.net_margin, b.net_margin, false, format::percentage),
        ComparisonRow::new("Debt/Equity", a.debt_to_equity, b.debt_to_equity, true, format::fixed(2)),
        ComparisonRow::new(
            "Dividend yield",
            a.dividend_yield,
            b.dividend_yield,
            false,
            format::percentage,
        ),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strength {
    Valuation,
    Profitability,
    Margins,
    Leverage,
}

impl Strength {
    pub fn description(&self) -> &'static str {
        match self {
            Strength::Valuation => "a more attractive valuation (lower P/E)",
            Strength::Profitability => "better profitability (ROE)",
            Strength::Margins => "higher margins",
            Strength::Leverage => "better-controlled debt",
        }
    }

    fn inputs(&self, profile: &FinancialProfile) -> Option<f64> {
        match self {
            Strength::Valuation => profile.pe_ratio,
            Strength::Profitability => profile.roe,
            Strength::Margins => profile.net_margin,
            Strength::Leverage => profile.debt_to_equity,
        }
    }

    fn lower_is_better(&self) -> bool {
        matches!(self, Strength::Valuation | Strength::Leverage)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    LeftStronger,
    RightStronger,
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub left_name: String,
    pub right_name: String,
    pub left_strengths: Vec<Strength>,
    pub right_strengths: Vec<Strength>,
    pub verdict: Verdict,
}

impl ComparisonSummary {
    pub fn build(a: &FinancialProfile, b: &FinancialProfile) -> Self {
        let mut left_strengths = Vec::new();
        let mut right_strengths = Vec::new();

        for strength in [
            Strength::Valuation,
            Strength::Profitability,
            Strength::Margins,
            Strength::Leverage,
        ] {
            match metric_winner(strength.inputs(a), strength.inputs(b), strength.lower_is_better()) {
                Some(Side::Left) => left_strengths.push(strength),
                Some(Side::Right) => right_strengths.push(strength),
                None => {}
            }
        }

        let verdict = match left_strengths.len().cmp(&right_strengths.len()) {
            std::cmp::Ordering::Greater => Verdict::LeftStronger,
            std::cmp::Ordering::Less => Verdict::RightStronger,
            std::cmp::Ordering::Equal => Verdict::Balanced,
        };

        Self {
            left_name: a.display_name().to_string(),
            right_name: b.display_name().to_string(),
            left_strengths,
            right_strengths,
            verdict,
        }
    }

    pub fn strengths(&self, side: Side) -> &[Strength] {
        match side {
            Side::Left => &self.left_strengths,
            Side::Right => &self.right_strengths,
        }
    }

    pub fn joined_strengths(&self, side: Side) -> String {
        self.strengths(side)
            .iter()
            .map(Strength::description)
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn to_text(&self) -> String {
        let mut text = format!(
            "Comparing {} and {}, several points stand out.",
            self.left_name, self.right_name
        );
        if !self.left_strengths.is_empty() {
            text.push_str(&format!(
                "\n\n{} stands out for {}.",
                self.left_name,
                self.joined_strengths(Side::Left)
            ));
        }
        if !self.right_strengths.is_empty() {
            text.push_str(&format!(
                "\n\nConversely, {} shows its strength with {}.",
                self.right_name,
                self.joined_strengths(Side::Right)
            ));
        }
        let conclusion = match self.verdict {
            Verdict::LeftStronger => {
                format!("{} appears to have the more robust overall profile.", self.left_name)
            }
            Verdict::RightStronger => {
                format!("{} appears to have the more attractive overall profile.", self.right_name)
            }
            Verdict::Balanced => "Both companies present competitive profiles.".to_string(),
        };
        text.push_str(&format!("\n\nConclusion: {}\n\n{}", conclusion, DISCLAIMER));
        text
    }
}
