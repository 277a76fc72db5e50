use axum::{
    extract::{Query, State},
    response::Html,
    routing::get,
    Router,
};
use dashboard_views::pages::{self, AnalysisPage, ComparePage};
use finanalyse_core::{NewsArticle, Ticker, NEWS_SOURCES};
use serde::Deserialize;

use crate::{AppState, PageError};

#[derive(Debug, Deserialize)]
pub struct AnalysisParams {
    pub ticker: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareParams {
    pub base: Option<String>,
    pub other: Option<String>,
}

pub fn analysis_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/analysis", get(analysis))
        .route("/compare", get(compare))
}

async fn news_or_empty(state: &AppState, source: &str) -> Vec<NewsArticle> {
    state.api.news(Some(source)).await.unwrap_or_else(|e| {
        tracing::warn!(source, error = %e, "News source failed");
        Vec::new()
    })
}

/// The home page degrades per section: a failing source shows its empty state.
async fn home(State(state): State<AppState>) -> Html<String> {
    let [(s0, h0), (s1, h1), (s2, h2), (s3, h3)] = NEWS_SOURCES;
    let (movers, n0, n1, n2, n3) = tokio::join!(
        finanalyse_client::load_movers(state.api.as_ref()),
        news_or_empty(&state, s0),
        news_or_empty(&state, s1),
        news_or_empty(&state, s2),
        news_or_empty(&state, s3),
    );
    let (gainers, losers) = movers.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Market movers failed");
        (Vec::new(), Vec::new())
    });
    let news = [(h0, n0), (h1, n1), (h2, n2), (h3, n3)];
    Html(pages::home_page(&gainers, &losers, &news))
}

#[tracing::instrument(skip(state))]
async fn analysis(
    State(state): State<AppState>,
    Query(params): Query<AnalysisParams>,
) -> Result<Html<String>, PageError> {
    let raw = params.ticker.unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(Html(pages::missing_ticker_page()));
    }
    let ticker = Ticker::parse(&raw)?;
    let snapshot = state.snapshot(&ticker).await?;
    let page = AnalysisPage::new(&snapshot, &state.calculator);
    tracing::info!(ticker = %ticker, score = page.score.value, "Rendered analysis");
    Ok(Html(page.render()))
}

#[tracing::instrument(skip(state))]
async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareParams>,
) -> Result<Html<String>, PageError> {
    let base = Ticker::parse(params.base.as_deref().unwrap_or(""))?;
    let other = Ticker::parse(params.other.as_deref().unwrap_or(""))?;
    finanalyse_client::ensure_distinct(&base, &other)?;
    let (left, right) = tokio::try_join!(state.profile(&base), state.profile(&other))?;
    Ok(Html(ComparePage::new(left, right).render()))
}
