use async_trait::async_trait;
use finanalyse_core::{
    AdvancedMetrics, ChatReply, ChatRequest, CompanyFinancials, DashboardApi, DashboardError,
    DividendData, MarketMover, NewsArticle, PriceHistory, Result, ScreenerHit, ScreenerQuery,
    SymbolMatch, Ticker,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// In-memory API used by the loader, chat and suggestion tests.
#[derive(Default)]
pub struct FakeApi {
    pub companies: HashMap<String, (CompanyFinancials, AdvancedMetrics)>,
    /// Endpoint name that fails with a 500 for every ticker.
    pub failing_endpoint: Option<&'static str>,
    pub search_delay: Duration,
    pub search_calls: AtomicUsize,
    pub chat_log: Mutex<Vec<ChatRequest>>,
    pub chat_error: Option<DashboardError>,
}

impl FakeApi {
    pub fn with_company(mut self, symbol: &str, name: &str, pe: f64, roe: f64) -> Self {
        let financials = CompanyFinancials {
            name: name.to_string(),
            symbol: symbol.to_string(),
            pe_ratio: Some(pe),
            roe: Some(roe),
            ..Default::default()
        };
        let advanced = AdvancedMetrics {
            dividend_yield: Some(0.015),
            ..Default::default()
        };
        self.companies.insert(symbol.to_string(), (financials, advanced));
        self
    }

    fn check(&self, endpoint: &'static str) -> Result<()> {
        if self.failing_endpoint == Some(endpoint) {
            return Err(DashboardError::Api {
                status: 500,
                detail: format!("{} failed", endpoint),
            });
        }
        Ok(())
    }

    fn entry(&self, ticker: &Ticker) -> Result<&(CompanyFinancials, AdvancedMetrics)> {
        self.companies
            .get(ticker.as_str())
            .ok_or_else(|| DashboardError::NotFound(format!("Symbol '{}' not found", ticker)))
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    async fn company(&self, ticker: &Ticker) -> Result<CompanyFinancials> {
        self.check("company")?;
        Ok(self.entry(ticker)?.0.clone())
    }

    async fn price_history(&self, ticker: &Ticker) -> Result<PriceHistory> {
        self.check("history")?;
        self.entry(ticker)?;
        Ok(PriceHistory {
            dates: vec!["2024-01-02".into(), "2024-01-03".into()],
            prices: vec![100.0, 101.5],
        })
    }

    async fn advanced_metrics(&self, ticker: &Ticker) -> Result<AdvancedMetrics> {
        self.check("advanced")?;
        Ok(self.entry(ticker)?.1.clone())
    }

    async fn dividends(&self, ticker: &Ticker) -> Result<DividendData> {
        self.check("dividends")?;
        self.entry(ticker)?;
        Ok(DividendData::default())
    }

    async fn screener(&self, _query: &ScreenerQuery) -> Result<Vec<ScreenerHit>> {
        Ok(Vec::new())
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        if !self.search_delay.is_zero() {
            tokio::time::sleep(self.search_delay).await;
        }
        Ok(vec![SymbolMatch {
            symbol: query.to_uppercase(),
            name: format!("{} Holdings", query),
            ..Default::default()
        }])
    }

    async fn companies_by_country(&self, _country_code: &str) -> Result<Vec<SymbolMatch>> {
        Ok(Vec::new())
    }

    async fn gainers(&self) -> Result<Vec<MarketMover>> {
        self.check("gainers")?;
        Ok(vec![MarketMover {
            symbol: "NVDA".into(),
            change_percent: Some(4.0),
            ..Default::default()
        }])
    }

    async fn losers(&self) -> Result<Vec<MarketMover>> {
        self.check("losers")?;
        Ok(Vec::new())
    }

    async fn news(&self, _source: Option<&str>) -> Result<Vec<NewsArticle>> {
        Ok(Vec::new())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.chat_log.lock().unwrap().push(request.clone());
        if let Some(err) = &self.chat_error {
            return Err(err.clone());
        }
        Ok(ChatReply {
            response: format!("You asked: {}", request.message),
        })
    }
}
