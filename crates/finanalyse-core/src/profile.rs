use serde::{Deserialize, Serialize};

use crate::types::{AdvancedMetrics, CompanyFinancials};

/// Fundamentals and advanced ratios for one company, merged into a flat record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialProfile {
    pub symbol: String,
    pub name: String,
    pub sector: String,
    pub country: String,
    pub price: Option<f64>,
    pub revenue: Option<f64>,
    pub net_income: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub roe: Option<f64>,
    pub net_margin: Option<f64>,
    pub debt_to_equity: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub current_ratio: Option<f64>,
    pub quick_ratio: Option<f64>,
    pub interest_coverage: Option<f64>,
    pub free_cash_flow: Option<f64>,
}

impl FinancialProfile {
    /// Advanced metrics take precedence for keys both payloads carry, unless absent.
    pub fn merge(financials: &CompanyFinancials, advanced: &AdvancedMetrics) -> Self {
        Self {
            symbol: financials.symbol.clone(),
            name: financials.name.clone(),
            sector: financials.sector.clone(),
            country: financials.country.clone(),
            price: financials.price,
            revenue: financials.revenue,
            net_income: financials.net_income,
            pe_ratio: financials.pe_ratio,
            roe: financials.roe,
            net_margin: financials.net_margin,
            debt_to_equity: advanced.debt_to_equity.or(financials.debt_to_equity),
            dividend_yield: advanced.dividend_yield,
            current_ratio: advanced.current_ratio,
            quick_ratio: advanced.quick_ratio,
            interest_coverage: advanced.interest_coverage,
            free_cash_flow: advanced.free_cash_flow,
        }
    }

    /// Name to show, falling back to the symbol when the API had none.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.symbol
        } else {
            &self.name
        }
    }
}

/// `Some` only for finite numbers; NaN and infinities count as missing.
pub fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
