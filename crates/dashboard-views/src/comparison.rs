use finanalyse_core::FinancialProfile;
use financial_score::compare::DISCLAIMER;
use financial_score::{comparison_rows, ComparisonRow, ComparisonSummary, Side, Verdict};

use crate::html::escape_html;

const WINNER_CLASS: &str = "text-green-600 font-bold";
const LOSER_CLASS: &str = "text-red-600";

/// Side-by-side metric table for two companies.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub left_symbol: String,
    pub right_symbol: String,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonTable {
    pub fn new(left: &FinancialProfile, right: &FinancialProfile) -> Self {
        Self {
            left_symbol: left.symbol.clone(),
            right_symbol: right.symbol.clone(),
            rows: comparison_rows(left, right),
        }
    }

    fn cell_class(row: &ComparisonRow, side: Side) -> &'static str {
        match row.winner {
            Some(winner) if winner == side => WINNER_CLASS,
            Some(_) => LOSER_CLASS,
            None => "",
        }
    }

    pub fn render(&self) -> String {
        let body: String = self
            .rows
            .iter()
            .map(|row| {
                format!(
                    r#"<tr><td class="px-2 py-2 font-medium text-gray-600">{label}</td><td class="px-2 py-2 text-center {left_class}">{left}</td><td class="px-2 py-2 text-center {right_class}">{right}</td></tr>"#,
                    label = escape_html(row.label),
                    left_class = Self::cell_class(row, Side::Left),
                    left = escape_html(&row.left_display),
                    right_class = Self::cell_class(row, Side::Right),
                    right = escape_html(&row.right_display),
                )
            })
            .collect();

        format!(
            r#"<table id="comparison-table" class="min-w-full text-sm text-left"><thead class="bg-gray-50"><tr><th class="px-2 py-2">Metric</th><th class="px-2 py-2 text-center font-semibold">{}</th><th class="px-2 py-2 text-center font-semibold">{}</th></tr></thead><tbody>{}</tbody></table>"#,
            escape_html(&self.left_symbol),
            escape_html(&self.right_symbol),
            body
        )
    }
}

/// The written comparison, with company names in bold.
pub fn render_summary(summary: &ComparisonSummary) -> String {
    let left = format!("<strong>{}</strong>", escape_html(&summary.left_name));
    let right = format!("<strong>{}</strong>", escape_html(&summary.right_name));

    let mut html = format!("Comparing {} and {}, several points stand out.", left, right);
    if !summary.left_strengths.is_empty() {
        html.push_str(&format!(
            "<br><br>{} stands out for {}.",
            left,
            escape_html(&summary.joined_strengths(Side::Left))
        ));
    }
    if !summary.right_strengths.is_empty() {
        html.push_str(&format!(
            "<br><br>Conversely, {} shows its strength with {}.",
            right,
            escape_html(&summary.joined_strengths(Side::Right))
        ));
    }
    let conclusion = match summary.verdict {
        Verdict::LeftStronger => format!("{} appears to have the more robust overall profile.", left),
        Verdict::RightStronger => format!("{} appears to have the more attractive overall profile.", right),
        Verdict::Balanced => "Both companies present competitive profiles.".to_string(),
    };
    html.push_str(&format!(
        r#"<br><br><strong>Conclusion:</strong> {}<br><br><em class="text-xs text-gray-500">{}</em>"#,
        conclusion, DISCLAIMER
    ));
    html
}
