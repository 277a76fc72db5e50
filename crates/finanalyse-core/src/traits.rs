use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    AdvancedMetrics, ChatReply, ChatRequest, CompanyFinancials, DividendData, MarketMover,
    NewsArticle, PriceHistory, ScreenerHit, ScreenerQuery, SymbolMatch, Ticker,
};

/// The remote dashboard API.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    async fn company(&self, ticker: &Ticker) -> Result<CompanyFinancials>;

    async fn price_history(&self, ticker: &Ticker) -> Result<PriceHistory>;

    async fn advanced_metrics(&self, ticker: &Ticker) -> Result<AdvancedMetrics>;

    async fn dividends(&self, ticker: &Ticker) -> Result<DividendData>;

    async fn screener(&self, query: &ScreenerQuery) -> Result<Vec<ScreenerHit>>;

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>>;

    /// `country_code` is an ISO code such as `FR` or `US`.
    async fn companies_by_country(&self, country_code: &str) -> Result<Vec<SymbolMatch>>;

    async fn gainers(&self) -> Result<Vec<MarketMover>>;

    async fn losers(&self) -> Result<Vec<MarketMover>>;

    async fn news(&self, source: Option<&str>) -> Result<Vec<NewsArticle>>;

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;
}
