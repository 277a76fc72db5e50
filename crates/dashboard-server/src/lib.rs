//! FinAnalyse dashboard web server.
//!
//! Renders the dashboard pages server-side from the FinAnalyse REST API and
//! exposes the financial score as JSON under `/api`.

pub mod cache;
pub mod config;

mod analysis_routes;
mod chat_routes;
mod market_routes;
mod score_routes;

#[cfg(test)]
mod test_support;

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use finanalyse_client::{load_company, CompanySnapshot, FinAnalyseClient};
use finanalyse_core::{DashboardApi, DashboardError, FinancialProfile, Ticker};
use financial_score::ScoreCalculator;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cache::TtlCache;
pub use crate::config::ServerConfig;

#[derive(Clone)]
pub struct AppState {
    pub api: Arc<dyn DashboardApi>,
    pub snapshots: Arc<TtlCache<CompanySnapshot>>,
    pub profiles: Arc<TtlCache<FinancialProfile>>,
    pub calculator: ScoreCalculator,
}

impl AppState {
    pub fn new(api: Arc<dyn DashboardApi>, config: &ServerConfig) -> Self {
        Self {
            api,
            snapshots: Arc::new(TtlCache::new(config.cache_ttl_secs)),
            profiles: Arc::new(TtlCache::new(config.cache_ttl_secs)),
            calculator: ScoreCalculator::new(config.policy),
        }
    }

    /// Full company snapshot, served from cache when fresh.
    pub async fn snapshot(&self, ticker: &Ticker) -> Result<CompanySnapshot, DashboardError> {
        if let Some(snapshot) = self.snapshots.get(ticker.as_str()) {
            tracing::debug!(ticker = %ticker, "Snapshot cache hit");
            return Ok(snapshot);
        }
        let snapshot = load_company(self.api.as_ref(), ticker).await?;
        self.profiles.insert(ticker.as_str(), snapshot.profile());
        self.snapshots.insert(ticker.as_str(), snapshot.clone());
        Ok(snapshot)
    }

    /// Merged profile only, used by comparisons.
    pub async fn profile(&self, ticker: &Ticker) -> Result<FinancialProfile, DashboardError> {
        if let Some(profile) = self.profiles.get(ticker.as_str()) {
            return Ok(profile);
        }
        let profile = finanalyse_client::load_profile(self.api.as_ref(), ticker).await?;
        self.profiles.insert(ticker.as_str(), profile.clone());
        Ok(profile)
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

fn status_for(err: &DashboardError) -> StatusCode {
    StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// Error for JSON routes.
#[derive(Debug)]
pub struct AppError(pub DashboardError);

impl From<DashboardError> for AppError {
    fn from(err: DashboardError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        tracing::warn!(status = status.as_u16(), error = %self.0, "API request failed");
        (status, Json(ApiResponse::<()>::error(self.0.user_message()))).into_response()
    }
}

/// Error for HTML routes: renders the error page.
#[derive(Debug)]
pub struct PageError(pub DashboardError);

impl From<DashboardError> for PageError {
    fn from(err: DashboardError) -> Self {
        PageError(err)
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        tracing::warn!(status = status.as_u16(), error = %self.0, "Page request failed");
        (status, Html(dashboard_views::pages::error_page(&self.0))).into_response()
    }
}

async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("ok"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(analysis_routes::analysis_routes())
        .merge(market_routes::market_routes())
        .merge(score_routes::score_routes())
        .merge(chat_routes::chat_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    let client = FinAnalyseClient::new(&config.client);
    tracing::info!(api_base = %client.base_url(), policy = ?config.policy, "Starting FinAnalyse dashboard");

    let state = AppState::new(Arc::new(client), &config);
    let app = build_router(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Dashboard listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await?;
    Ok(())
}
