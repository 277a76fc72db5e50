use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use finanalyse_core::{
    AdvancedMetrics, ChatReply, ChatRequest, CompanyFinancials, DashboardApi, DashboardError,
    DividendData, MarketMover, NewsArticle, PriceHistory, Result, ScreenerHit, ScreenerQuery,
    SymbolMatch, Ticker,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

use crate::{build_router, AppState, ServerConfig};

/// Two known companies; news and losers always fail.
#[derive(Default)]
pub struct StubApi {
    pub company_calls: AtomicUsize,
    pub screener_queries: Mutex<Vec<ScreenerQuery>>,
}

impl StubApi {
    fn financials(ticker: &Ticker) -> Result<(CompanyFinancials, AdvancedMetrics)> {
        match ticker.as_str() {
            "ALPH" => Ok((
                CompanyFinancials {
                    name: "Alpha Industries".into(),
                    symbol: "ALPH".into(),
                    revenue: Some(150e9),
                    pe_ratio: Some(12.0),
                    roe: Some(0.22),
                    net_margin: Some(0.18),
                    ..Default::default()
                },
                AdvancedMetrics {
                    debt_to_equity: Some(0.3),
                    dividend_yield: Some(0.02),
                    ..Default::default()
                },
            )),
            "BETA" => Ok((
                CompanyFinancials {
                    name: "Beta Corp".into(),
                    symbol: "BETA".into(),
                    pe_ratio: Some(20.0),
                    roe: Some(0.15),
                    ..Default::default()
                },
                AdvancedMetrics::default(),
            )),
            other => Err(DashboardError::NotFound(format!("Symbol '{}' not found", other))),
        }
    }
}

#[async_trait]
impl DashboardApi for StubApi {
    async fn company(&self, ticker: &Ticker) -> Result<CompanyFinancials> {
        self.company_calls.fetch_add(1, Ordering::SeqCst);
        Ok(Self::financials(ticker)?.0)
    }

    async fn price_history(&self, ticker: &Ticker) -> Result<PriceHistory> {
        Self::financials(ticker)?;
        Ok(PriceHistory {
            dates: vec!["2024-01-02".into()],
            prices: vec![41.0],
        })
    }

    async fn advanced_metrics(&self, ticker: &Ticker) -> Result<AdvancedMetrics> {
        Ok(Self::financials(ticker)?.1)
    }

    async fn dividends(&self, ticker: &Ticker) -> Result<DividendData> {
        Self::financials(ticker)?;
        Ok(DividendData::default())
    }

    async fn screener(&self, query: &ScreenerQuery) -> Result<Vec<ScreenerHit>> {
        self.screener_queries.lock().unwrap().push(query.clone());
        Ok(vec![ScreenerHit {
            symbol: "KO".into(),
            name: "Coca-Cola".into(),
            pe: Some(24.3),
            dividend_yield: Some(0.031),
        }])
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>> {
        Ok(vec![SymbolMatch {
            symbol: query.to_uppercase(),
            name: "Match".into(),
            ..Default::default()
        }])
    }

    async fn companies_by_country(&self, country_code: &str) -> Result<Vec<SymbolMatch>> {
        Ok(vec![SymbolMatch {
            symbol: "MC.PA".into(),
            name: "LVMH".into(),
            country: Some(country_code.to_string()),
            ..Default::default()
        }])
    }

    async fn gainers(&self) -> Result<Vec<MarketMover>> {
        Ok(vec![MarketMover {
            symbol: "NVDA".into(),
            change_percent: Some(4.2),
            ..Default::default()
        }])
    }

    async fn losers(&self) -> Result<Vec<MarketMover>> {
        Err(DashboardError::Network("connection refused".into()))
    }

    async fn news(&self, _source: Option<&str>) -> Result<Vec<NewsArticle>> {
        Err(DashboardError::ServiceUnavailable("News service down".into()))
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        if request.message.contains("busy") {
            return Err(DashboardError::ServiceUnavailable("overloaded".into()));
        }
        Ok(ChatReply {
            response: format!("Echo: {}", request.message),
        })
    }
}

#[derive(Clone)]
pub struct TestState {
    pub state: AppState,
    pub api: Arc<StubApi>,
}

pub fn test_state() -> TestState {
    let api = Arc::new(StubApi::default());
    let state = AppState::new(api.clone(), &ServerConfig::default());
    TestState { state, api }
}

pub fn company_calls(test: &TestState) -> usize {
    test.api.company_calls.load(Ordering::SeqCst)
}

pub async fn send(test: TestState, request: Request<Body>) -> (StatusCode, String) {
    let response = build_router(test.state).oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

pub async fn get(test: TestState, uri: &str) -> (StatusCode, String) {
    send(test, Request::builder().uri(uri).body(Body::empty()).unwrap()).await
}
