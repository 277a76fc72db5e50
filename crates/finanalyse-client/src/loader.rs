//! Concurrent page loads.
//!
//! Each loader issues its requests together and waits for all of them. The
//! first failure aborts the whole load; nothing partial is returned.

use finanalyse_core::{
    AdvancedMetrics, CompanyFinancials, DashboardApi, DashboardError, DividendData,
    FinancialProfile, MarketMover, PriceHistory, Result, Ticker,
};

/// Everything the analysis page shows for one ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanySnapshot {
    pub financials: CompanyFinancials,
    pub advanced: AdvancedMetrics,
    pub history: PriceHistory,
    pub dividends: DividendData,
}

impl CompanySnapshot {
    pub fn profile(&self) -> FinancialProfile {
        FinancialProfile::merge(&self.financials, &self.advanced)
    }
}

#[tracing::instrument(skip_all, fields(ticker = %ticker))]
pub async fn load_company(api: &dyn DashboardApi, ticker: &Ticker) -> Result<CompanySnapshot> {
    let (financials, history, advanced, dividends) = tokio::try_join!(
        api.company(ticker),
        api.price_history(ticker),
        api.advanced_metrics(ticker),
        api.dividends(ticker),
    )?;

    tracing::info!(
        name = %financials.name,
        history_points = history.prices.len(),
        dividend_years = dividends.dividend_history.years.len(),
        "Loaded company snapshot"
    );

    Ok(CompanySnapshot {
        financials,
        advanced,
        history,
        dividends,
    })
}

/// Fundamentals and advanced metrics only, as needed for a comparison.
pub async fn load_profile(api: &dyn DashboardApi, ticker: &Ticker) -> Result<FinancialProfile> {
    let (financials, advanced) =
        tokio::try_join!(api.company(ticker), api.advanced_metrics(ticker))?;
    Ok(FinancialProfile::merge(&financials, &advanced))
}

/// A company cannot be compared with itself.
pub fn ensure_distinct(base: &Ticker, other: &Ticker) -> Result<()> {
    if base == other {
        return Err(DashboardError::InvalidInput(
            "Choose a different company to compare with".to_string(),
        ));
    }
    Ok(())
}

#[tracing::instrument(skip_all, fields(base = %base, other = %other))]
pub async fn load_comparison(
    api: &dyn DashboardApi,
    base: &Ticker,
    other: &Ticker,
) -> Result<(FinancialProfile, FinancialProfile)> {
    ensure_distinct(base, other)?;
    tokio::try_join!(load_profile(api, base), load_profile(api, other))
}

/// `(gainers, losers)`
pub async fn load_movers(api: &dyn DashboardApi) -> Result<(Vec<MarketMover>, Vec<MarketMover>)> {
    tokio::try_join!(api.gainers(), api.losers())
}
