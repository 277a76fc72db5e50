use finanalyse_core::format::{self, na_or};
use finanalyse_core::{AdvancedMetrics, CompanyFinancials, DashboardError, FinancialProfile};
use financial_score::{FinancialComment, FinancialScore};

use crate::html::escape_html;

fn stat(label: &str, value: &str) -> String {
    format!(
        r#"<div class="bg-gray-50 p-2 rounded-lg"><p class="text-xs text-gray-500">{}</p><p class="text-md font-semibold">{}</p></div>"#,
        escape_html(label),
        escape_html(value)
    )
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyCard {
    pub name: String,
    pub symbol: String,
    pub sector: String,
    pub country: String,
    pub price: String,
}

impl CompanyCard {
    pub fn new(financials: &CompanyFinancials) -> Self {
        Self {
            name: financials.name.clone(),
            symbol: financials.symbol.clone(),
            sector: financials.sector.clone(),
            country: financials.country.clone(),
            price: na_or(financials.price, format::price),
        }
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div id="company-card" class="bg-white p-6 rounded-xl shadow"><h3 class="text-xl font-bold text-gray-800">{name}</h3><p class="text-gray-600 mb-4">{symbol}</p><div class="space-y-2 text-sm"><p>Sector: {sector}</p><p>Country: {country}</p><p>Price: <span class="font-semibold">{price}</span></p></div></div>"#,
            name = escape_html(&self.name),
            symbol = escape_html(&self.symbol),
            sector = escape_html(&self.sector),
            country = escape_html(&self.country),
            price = escape_html(&self.price),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub score: f64,
    pub summary: String,
}

impl ScoreCard {
    pub fn new(score: &FinancialScore, comment: &FinancialComment) -> Self {
        Self {
            score: score.value,
            summary: comment.summary_line().to_string(),
        }
    }

    /// 0 is red, 10 is green.
    pub fn hue(&self) -> f64 {
        self.score.clamp(0.0, 10.0) / 10.0 * 120.0
    }

    pub fn color(&self) -> String {
        format!("hsl({:.0}, 80%, 45%)", self.hue())
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div id="score-card" class="bg-white p-6 rounded-xl shadow"><h3 class="text-lg font-semibold text-gray-800 mb-2 text-center">Financial Score</h3><div class="text-center my-4"><span class="text-5xl font-bold" style="color: {color}">{score:.1}</span><span class="text-2xl text-gray-500">/10</span></div><p class="text-xs text-gray-600 text-center">{summary}</p></div>"#,
            color = self.color(),
            score = self.score,
            summary = escape_html(&self.summary),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuickStats {
    pub stats: Vec<(&'static str, String)>,
}

impl QuickStats {
    pub fn new(profile: &FinancialProfile) -> Self {
        Self {
            stats: vec![
                ("Revenue", na_or(profile.revenue, format::currency_billions)),
                ("Net income", na_or(profile.net_income, format::currency_billions)),
                ("P/E", na_or(profile.pe_ratio, format::fixed(1))),
                ("ROE", na_or(profile.roe, format::percentage)),
                ("Net margin", na_or(profile.net_margin, format::percentage)),
                ("Dividend yield", na_or(profile.dividend_yield, format::percentage)),
            ],
        }
    }

    pub fn render(&self) -> String {
        let cells: String = self.stats.iter().map(|(label, value)| stat(label, value)).collect();
        format!(
            r#"<div id="quick-stats-card" class="bg-white p-6 rounded-xl shadow"><h3 class="text-lg font-semibold text-gray-800 mb-4">Key Indicators</h3><div class="grid grid-cols-2 gap-2">{}</div></div>"#,
            cells
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdvancedGrid {
    pub stats: Vec<(&'static str, String)>,
}

impl AdvancedGrid {
    pub fn new(advanced: &AdvancedMetrics) -> Self {
        Self {
            stats: vec![
                ("Current ratio", na_or(advanced.current_ratio, format::fixed(2))),
                ("Quick ratio", na_or(advanced.quick_ratio, format::fixed(2))),
                ("Debt/Equity", na_or(advanced.debt_to_equity, format::fixed(2))),
                ("Interest coverage", na_or(advanced.interest_coverage, format::ratio_multiple)),
                ("Free cash flow", na_or(advanced.free_cash_flow, format::currency_billions)),
            ],
        }
    }

    pub fn render(&self) -> String {
        let cells: String = self.stats.iter().map(|(label, value)| stat(label, value)).collect();
        format!(
            r#"<div class="bg-white p-6 rounded-xl shadow"><h3 class="text-lg font-semibold text-gray-800 mb-4">Advanced Metrics</h3><div id="advanced-metrics-grid" class="grid grid-cols-2 md:grid-cols-5 gap-2">{}</div></div>"#,
            cells
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorPanel {
    pub message: String,
}

impl ErrorPanel {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn from_error(err: &DashboardError) -> Self {
        Self::new(format!(
            "Error: {}. Check the symbol and try again.",
            err.user_message()
        ))
    }

    pub fn render(&self) -> String {
        format!(
            r#"<div id="error-state" class="bg-red-50 border border-red-200 text-red-700 p-4 rounded-xl"><p id="error-message">{}</p></div>"#,
            escape_html(&self.message)
        )
    }
}
