use finanalyse_core::{finite, format, FinancialProfile};
use serde::{Deserialize, Serialize};

use crate::score::{FinancialScore, ScoreTier};

/// Generated plain-language reading of a score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialComment {
    pub headline: String,
    pub observations: Vec<String>,
}

impl FinancialComment {
    pub fn generate(profile: &FinancialProfile, score: &FinancialScore) -> Self {
        let verdict = match score.tier() {
            ScoreTier::Excellent => "shows excellent financial health.",
            ScoreTier::Solid => "is in a solid financial position.",
            ScoreTier::Average => "shows average financial performance.",
            ScoreTier::Weak => "faces significant financial challenges.",
        };
        let headline = format!(
            "With a score of {:.1}/10, {} {}",
            score.value,
            profile.display_name(),
            verdict
        );

        let mut observations = Vec::new();
        if let Some(roe) = finite(profile.roe).filter(|roe| *roe > 0.15) {
            observations.push(format!(
                "Return on equity is remarkable ({}).",
                format::percentage(roe)
            ));
        }
        if let Some(pe) = finite(profile.pe_ratio).filter(|pe| *pe > 30.0) {
            observations.push(format!("Its valuation looks high (P/E of {:.1}).", pe));
        }
        if finite(profile.debt_to_equity).is_some_and(|de| de < 1.0) {
            observations.push("Debt is well under control.".to_string());
        }

        Self {
            headline,
            observations,
        }
    }

    /// The line shown under the score: the first observation, if any.
    pub fn summary_line(&self) -> &str {
        self.observations.first().map(String::as_str).unwrap_or("")
    }

    pub fn to_text(&self) -> String {
        std::iter::once(self.headline.as_str())
            .chain(self.observations.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
