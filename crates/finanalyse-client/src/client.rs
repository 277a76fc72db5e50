use async_trait::async_trait;
use finanalyse_core::{
    AdvancedMetrics, ApiErrorBody, ChatReply, ChatRequest, CompanyFinancials, DashboardApi,
    DashboardError, DividendData, ListingPayload, MarketMover, NewsArticle, NewsResponse,
    PriceHistory, Result, ScreenerHit, ScreenerQuery, ScreenerResponse, SymbolMatch, Ticker,
};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::config::ClientConfig;

/// HTTP client for the dashboard REST API.
#[derive(Clone)]
pub struct FinAnalyseClient {
    client: Client,
    base_url: String,
    max_attempts: u32,
    retry_wait: Duration,
}

impl FinAnalyseClient {
    pub fn new(config: &ClientConfig) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.api_base.clone(),
            max_attempts: config.max_attempts.max(1),
            retry_wait: config.retry_wait,
        }
    }

    pub fn from_env() -> Self {
        Self::new(&ClientConfig::from_env())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Appends percent-encoded path segments to the API base.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            DashboardError::InvalidInput(format!("Invalid API base URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                DashboardError::InvalidInput(format!("API base URL '{}' cannot take a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request. A 429 is retried only when more than one attempt is configured;
    /// the last response is returned as is so its `detail` reaches the caller.
    async fn send_request(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder
            .build()
            .map_err(|e| DashboardError::Network(e.to_string()))?;

        let mut attempt = 1;
        loop {
            let req_clone = request
                .try_clone()
                .ok_or_else(|| DashboardError::Network("Cannot clone request".to_string()))?;
            tracing::debug!(method = %req_clone.method(), url = %req_clone.url(), "Calling dashboard API");

            let response = self
                .client
                .execute(req_clone)
                .await
                .map_err(|e| DashboardError::Network(e.to_string()))?;

            if response.status() != StatusCode::TOO_MANY_REQUESTS || attempt >= self.max_attempts {
                return Ok(response);
            }

            tracing::warn!(
                "Dashboard API rate limited, waiting {:.1}s before attempt {}/{}",
                self.retry_wait.as_secs_f64(),
                attempt + 1,
                self.max_attempts
            );
            tokio::time::sleep(self.retry_wait).await;
            attempt += 1;
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T> {
        let response = self.send_request(builder).await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = error_for_status(status, &body);
            tracing::warn!(status = status.as_u16(), error = %err, "Dashboard API returned an error");
            return Err(err);
        }

        response
            .json::<T>()
            .await
            .map_err(|e| DashboardError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T> {
        let url = self.endpoint(segments)?;
        self.fetch(self.client.get(url)).await
    }
}

/// Maps a non-success response to an error, preferring the API's `detail` message.
pub(crate) fn error_for_status(status: StatusCode, body: &str) -> DashboardError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    match status {
        StatusCode::NOT_FOUND => DashboardError::NotFound(detail),
        StatusCode::SERVICE_UNAVAILABLE => DashboardError::ServiceUnavailable(detail),
        _ => DashboardError::Api {
            status: status.as_u16(),
            detail,
        },
    }
}

#[async_trait]
impl DashboardApi for FinAnalyseClient {
    async fn company(&self, ticker: &Ticker) -> Result<CompanyFinancials> {
        self.get(&["entreprise", ticker.as_str()]).await
    }

    async fn price_history(&self, ticker: &Ticker) -> Result<PriceHistory> {
        self.get(&["historique", ticker.as_str()]).await
    }

    async fn advanced_metrics(&self, ticker: &Ticker) -> Result<AdvancedMetrics> {
        self.get(&["advanced-metrics", ticker.as_str()]).await
    }

    async fn dividends(&self, ticker: &Ticker) -> Result<DividendData> {
        self.get(&["dividends", ticker.as_str()]).await
    }

    async fn screener(&self, query: &ScreenerQuery) -> Result<Vec<ScreenerHit>> {
        let url = self.endpoint(&["screener"])?;
        let response: ScreenerResponse = self.fetch(self.client.get(url).query(query)).await?;
        Ok(response.results)
    }

    async fn search(&self, query: &str) -> Result<Vec<SymbolMatch>> {
        let url = self.endpoint(&["search"])?;
        let payload: ListingPayload<SymbolMatch> =
            self.fetch(self.client.get(url).query(&[("query", query)])).await?;
        Ok(payload.into_vec())
    }

    async fn companies_by_country(&self, country_code: &str) -> Result<Vec<SymbolMatch>> {
        let code = country_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(DashboardError::InvalidInput("Country code is required".to_string()));
        }
        let payload: ListingPayload<SymbolMatch> = self.get(&["companies-by-country", &code]).await?;
        Ok(payload.into_vec())
    }

    async fn gainers(&self) -> Result<Vec<MarketMover>> {
        let payload: ListingPayload<MarketMover> = self.get(&["gainers"]).await?;
        Ok(payload.into_vec())
    }

    async fn losers(&self) -> Result<Vec<MarketMover>> {
        let payload: ListingPayload<MarketMover> = self.get(&["losers"]).await?;
        Ok(payload.into_vec())
    }

    async fn news(&self, source: Option<&str>) -> Result<Vec<NewsArticle>> {
        let url = self.endpoint(&["news"])?;
        let mut builder = self.client.get(url);
        if let Some(source) = source {
            builder = builder.query(&[("source", source)]);
        }
        let response: NewsResponse = self.fetch(builder).await?;
        Ok(response.articles)
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let url = self.endpoint(&["chat"])?;
        self.fetch(self.client.post(url).json(request)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::{Path, Query},
        http::StatusCode as AxumStatus,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    async fn spawn_upstream(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    fn client_for(base: &str) -> FinAnalyseClient {
        FinAnalyseClient::new(&ClientConfig::with_base(base))
    }

    fn retrying_client_for(base: &str, max_attempts: u32) -> FinAnalyseClient {
        let mut config = ClientConfig::with_base(base);
        config.max_attempts = max_attempts;
        config.retry_wait = Duration::from_millis(1);
        FinAnalyseClient::new(&config)
    }

    fn always_rate_limited(hits: Arc<AtomicU32>) -> Router {
        Router::new().route(
            "/api/gainers",
            get(move || {
                let hits = hits.clone();
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    (AxumStatus::TOO_MANY_REQUESTS, Json(json!({"detail": "slow down"})))
                }
            }),
        )
    }

    #[test]
    fn test_error_for_status_uses_detail() {
        let err = error_for_status(StatusCode::NOT_FOUND, r#"{"detail":"Symbol 'ZZZZ' not found"}"#);
        assert_eq!(err, DashboardError::NotFound("Symbol 'ZZZZ' not found".to_string()));

        let err = error_for_status(StatusCode::SERVICE_UNAVAILABLE, "");
        assert_eq!(err, DashboardError::ServiceUnavailable("HTTP 503".to_string()));

        let err = error_for_status(StatusCode::INTERNAL_SERVER_ERROR, "<html>oops</html>");
        assert_eq!(
            err,
            DashboardError::Api {
                status: 500,
                detail: "HTTP 500".to_string()
            }
        );
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = client_for("http://localhost:8000/api/");
        let url = client.endpoint(&["entreprise", "BRK/B"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/entreprise/BRK%2FB");

        let client = client_for("not a url");
        assert!(matches!(client.endpoint(&["news"]), Err(DashboardError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_company_and_not_found() {
        let router = Router::new().route(
            "/api/entreprise/:ticker",
            get(|Path(ticker): Path<String>| async move {
                if ticker == "AAPL" {
                    (
                        AxumStatus::OK,
                        Json(json!({"name": "Apple Inc.", "symbol": "AAPL", "peRatio": 29.4, "roe": null})),
                    )
                } else {
                    (
                        AxumStatus::NOT_FOUND,
                        Json(json!({"detail": format!("Symbol '{}' not found", ticker)})),
                    )
                }
            }),
        );
        let client = client_for(&spawn_upstream(router).await);

        let fin = client.company(&Ticker::parse("aapl").unwrap()).await.unwrap();
        assert_eq!(fin.name, "Apple Inc.");
        assert_eq!(fin.pe_ratio, Some(29.4));
        assert_eq!(fin.roe, None);

        let err = client.company(&Ticker::parse("zzzz").unwrap()).await.unwrap_err();
        assert_eq!(err, DashboardError::NotFound("Symbol 'ZZZZ' not found".to_string()));
    }

    #[tokio::test]
    async fn test_screener_sends_only_set_filters() {
        let router = Router::new().route(
            "/api/screener",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                let mut keys: Vec<_> = params.keys().cloned().collect();
                keys.sort();
                Json(json!({"results": [{"symbol": keys.join(","), "name": params.get("sector").cloned().unwrap_or_default(), "pe": 12.5}]}))
            }),
        );
        let client = client_for(&spawn_upstream(router).await);

        let hits = client
            .screener(&ScreenerQuery {
                sector: Some("Technology".into()),
                pe_max: Some(25.0),
                dividend_min: None,
            })
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].symbol, "pe_max,sector");
        assert_eq!(hits[0].name, "Technology");
        assert_eq!(hits[0].pe, Some(12.5));
    }

    #[tokio::test]
    async fn test_search_news_and_movers() {
        let router = Router::new()
            .route(
                "/api/search",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    Json(json!([{"symbol": "MSFT", "name": params.get("query").cloned().unwrap_or_default()}]))
                }),
            )
            .route(
                "/api/news",
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    Json(json!({"articles": [{"title": "Markets rally", "snippet": params.get("source").cloned().unwrap_or_default(), "url": "#"}]}))
                }),
            )
            .route(
                "/api/gainers",
                get(|| async { Json(json!({"results": [{"symbol": "NVDA", "changePercent": 5.1}]})) }),
            )
            .route(
                "/api/companies-by-country/:code",
                get(|Path(code): Path<String>| async move {
                    Json(json!({"companies": [{"symbol": "MC.PA", "name": "LVMH", "country": code}]}))
                }),
            );
        let client = client_for(&spawn_upstream(router).await);

        let matches = client.search("micro").await.unwrap();
        assert_eq!(matches[0].name, "micro");

        let news = client.news(Some("morningstar")).await.unwrap();
        assert_eq!(news[0].summary(), "morningstar");

        let gainers = client.gainers().await.unwrap();
        assert_eq!(gainers[0].change_percent, Some(5.1));

        let companies = client.companies_by_country("fr").await.unwrap();
        assert_eq!(companies[0].country.as_deref(), Some("FR"));

        assert!(matches!(
            client.companies_by_country(" ").await,
            Err(DashboardError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_chat_posts_session_and_maps_503() {
        let router = Router::new().route(
            "/api/chat",
            post(|Json(body): Json<serde_json::Value>| async move {
                if body["message"] == "down" {
                    (AxumStatus::SERVICE_UNAVAILABLE, Json(json!({"detail": "AI offline"})))
                } else {
                    (
                        AxumStatus::OK,
                        Json(json!({"response": format!("{}:{}", body["session_id"].as_str().unwrap_or(""), body["message"].as_str().unwrap_or(""))})),
                    )
                }
            }),
        );
        let client = client_for(&spawn_upstream(router).await);

        let reply = client
            .chat(&ChatRequest {
                session_id: "session_1_abc".into(),
                message: "hi".into(),
            })
            .await
            .unwrap();
        assert_eq!(reply.response, "session_1_abc:hi");

        let err = client
            .chat(&ChatRequest {
                session_id: "session_1_abc".into(),
                message: "down".into(),
            })
            .await
            .unwrap_err();
        assert_eq!(err, DashboardError::ServiceUnavailable("AI offline".to_string()));
    }

    #[tokio::test]
    async fn test_429_is_surfaced_without_retry_by_default() {
        let hits = Arc::new(AtomicU32::new(0));
        let client = client_for(&spawn_upstream(always_rate_limited(hits.clone())).await);

        let started = std::time::Instant::now();
        let err = client.gainers().await.unwrap_err();
        assert_eq!(
            err,
            DashboardError::Api {
                status: 429,
                detail: "slow down".to_string()
            }
        );
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(started.elapsed() < Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_opt_in_retry_keeps_last_detail() {
        let hits = Arc::new(AtomicU32::new(0));
        let client = retrying_client_for(&spawn_upstream(always_rate_limited(hits.clone())).await, 3);

        let err = client.gainers().await.unwrap_err();
        assert_eq!(
            err,
            DashboardError::Api {
                status: 429,
                detail: "slow down".to_string()
            }
        );
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_opt_in_retry_after_429() {
        let hits = Arc::new(AtomicU32::new(0));
        let counter = hits.clone();
        let router = Router::new().route(
            "/api/losers",
            get(move || {
                let counter = counter.clone();
                async move {
                    if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                        (AxumStatus::TOO_MANY_REQUESTS, Json(json!({"detail": "slow down"})))
                    } else {
                        (AxumStatus::OK, Json(json!([{"symbol": "INTC", "changePercent": -3.2}])))
                    }
                }
            }),
        );
        let client = retrying_client_for(&spawn_upstream(router).await, 3);

        let losers = client.losers().await.unwrap();
        assert_eq!(losers[0].symbol, "INTC");
        assert_eq!(hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_decode_error_on_malformed_body() {
        let router = Router::new().route("/api/historique/:ticker", get(|| async { "not json" }));
        let client = client_for(&spawn_upstream(router).await);

        let err = client
            .price_history(&Ticker::parse("AAPL").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Decode(_)));
    }
}
