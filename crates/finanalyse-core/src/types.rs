use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DashboardError, Result};

/// Stock exchange symbol, trimmed and upper-cased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticker(String);

impl Ticker {
    pub fn parse(raw: &str) -> Result<Self> {
        let symbol = raw.trim().to_uppercase();
        if symbol.is_empty() {
            return Err(DashboardError::InvalidInput(
                "Please enter a company name or ticker symbol".to_string(),
            ));
        }
        Ok(Self(symbol))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fundamentals returned by `/entreprise/{ticker}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanyFinancials {
    pub name: String,
    pub symbol: String,
    pub sector: String,
    pub country: String,
    pub price: Option<f64>,
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub roe: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub net_margin: Option<f64>,
}

/// Ratios returned by `/advanced-metrics/{ticker}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdvancedMetrics {
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub interest_coverage: Option<f64>,
    pub free_cash_flow: Option<f64>,
    pub dividend_yield: Option<f64>,
}

/// One year of daily closes from `/historique/{ticker}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceHistory {
    pub dates: Vec<String>,
    pub prices: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DividendHistory {
    pub years: Vec<i32>,
    pub amounts: Vec<f64>,
}

/// Dividend summary from `/dividends/{ticker}` (annual totals, last five years).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DividendData {
    pub dividend_rate: Option<f64>,
    pub payout_ratio: Option<f64>,
    pub dividend_history: DividendHistory,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScreenerHit {
    pub symbol: String,
    pub name: String,
    pub pe: Option<f64>,
    pub dividend_yield: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenerResponse {
    pub results: Vec<ScreenerHit>,
}

/// Screener filters. `dividend_min` is a percentage (e.g. `2.5` for 2.5%).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenerQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pe_max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dividend_min: Option<f64>,
}

impl ScreenerQuery {
    /// Drops blank sectors so an empty select box means "any sector".
    pub fn normalized(mut self) -> Self {
        if self.sector.as_deref().map(str::trim).is_some_and(str::is_empty) {
            self.sector = None;
        }
        self
    }
}

/// A company entry from `/search` or `/companies-by-country/{code}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
    pub exchange: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MarketMover {
    pub symbol: String,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub change_percent: Option<f64>,
}

/// List endpoints answer either `{"results": [...]}` or a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListingPayload<T> {
    Wrapped {
        #[serde(alias = "companies", alias = "data")]
        results: Vec<T>,
    },
    Bare(Vec<T>),
}

impl<T> ListingPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListingPayload::Wrapped { results } => results,
            ListingPayload::Bare(items) => items,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsArticle {
    pub title: String,
    pub snippet: Option<String>,
    pub description: Option<String>,
    pub url: String,
    pub source: Option<String>,
}

impl NewsArticle {
    pub fn summary(&self) -> &str {
        self.snippet
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.description.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsResponse {
    pub articles: Vec<NewsArticle>,
}

/// News sources the dashboard home page shows, as `(source key, heading)`.
pub const NEWS_SOURCES: [(&str, &str); 4] = [
    ("moneywise", "Moneywise"),
    ("gobankingrates", "GOBankingRates"),
    ("morningstar", "Morningstar"),
    ("barchart", "Barchart"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatReply {
    pub response: String,
}

/// Error payload of the API (`{"detail": "..."}`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ApiErrorBody {
    pub detail: Option<String>,
}
