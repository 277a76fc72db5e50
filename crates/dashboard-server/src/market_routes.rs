use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Router,
};
use dashboard_views::pages;
use finanalyse_core::{DashboardError, ScreenerQuery, NEWS_SOURCES};
use serde::Deserialize;

use crate::{AppState, PageError};

/// Raw screener form fields; blank inputs arrive as empty strings.
#[derive(Debug, Default, Deserialize)]
pub struct ScreenerParams {
    pub sector: Option<String>,
    pub pe_max: Option<String>,
    pub dividend_min: Option<String>,
}

fn parse_number(field: &str, raw: Option<&str>) -> Result<Option<f64>, DashboardError> {
    match raw.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => v
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or_else(|| DashboardError::InvalidInput(format!("{} must be a number, got '{}'", field, v))),
    }
}

impl ScreenerParams {
    pub fn into_query(self) -> Result<ScreenerQuery, DashboardError> {
        Ok(ScreenerQuery {
            pe_max: parse_number("pe_max", self.pe_max.as_deref())?,
            dividend_min: parse_number("dividend_min", self.dividend_min.as_deref())?,
            sector: self.sector.map(|s| s.trim().to_string()),
        }
        .normalized())
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NewsParams {
    pub source: Option<String>,
}

pub fn market_routes() -> Router<AppState> {
    Router::new()
        .route("/screener", get(screener))
        .route("/search", get(search))
        .route("/country/:code", get(country))
        .route("/movers", get(movers))
        .route("/news", get(news))
}

async fn screener(
    State(state): State<AppState>,
    Query(params): Query<ScreenerParams>,
) -> Result<Html<String>, PageError> {
    let query = params.into_query()?;
    let hits = state.api.screener(&query).await?;
    tracing::info!(results = hits.len(), "Screener query");
    Ok(Html(pages::screener_page(&query, &hits)))
}

async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Html<String>, PageError> {
    let query = params.query.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return Err(DashboardError::InvalidInput(
            "Please enter a company name or ticker symbol".to_string(),
        )
        .into());
    }
    let matches = state.api.search(query).await?;
    Ok(Html(pages::search_page(query, &matches)))
}

async fn country(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Html<String>, PageError> {
    let code = code.trim().to_uppercase();
    let companies = state.api.companies_by_country(&code).await?;
    Ok(Html(pages::country_page(&code, &companies)))
}

async fn movers(State(state): State<AppState>) -> Result<Html<String>, PageError> {
    let (gainers, losers) = finanalyse_client::load_movers(state.api.as_ref()).await?;
    Ok(Html(pages::movers_page(&gainers, &losers)))
}

async fn news(
    State(state): State<AppState>,
    Query(params): Query<NewsParams>,
) -> Result<Html<String>, PageError> {
    let source = params.source.filter(|s| !s.trim().is_empty());
    let heading = match source.as_deref() {
        Some(key) => NEWS_SOURCES
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, heading)| heading.to_string())
            .unwrap_or_else(|| key.to_string()),
        None => "Financial news".to_string(),
    };
    let articles = state.api.news(source.as_deref()).await?;
    Ok(Html(pages::news_page(&heading, &articles)))
}
