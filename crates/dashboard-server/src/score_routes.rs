use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use finanalyse_core::Ticker;
use financial_score::{FinancialComment, MissingDataPolicy, RuleOutcome, ScoreTier};
use serde::Serialize;

use crate::{ApiResponse, AppError, AppState};

#[derive(Debug, Serialize)]
pub struct ScoreSummary {
    pub symbol: String,
    pub name: String,
    pub score: f64,
    pub points: u32,
    pub max_points: u32,
    pub tier: ScoreTier,
    pub policy: MissingDataPolicy,
    pub comment: String,
    pub rules: Vec<RuleOutcome>,
}

pub fn score_routes() -> Router<AppState> {
    Router::new().route("/api/score/:ticker", get(get_score))
}

#[tracing::instrument(skip(state))]
async fn get_score(
    State(state): State<AppState>,
    Path(ticker): Path<String>,
) -> Result<Json<ApiResponse<ScoreSummary>>, AppError> {
    let ticker = Ticker::parse(&ticker)?;
    let profile = state.profile(&ticker).await?;
    let score = state.calculator.score(&profile);
    let comment = FinancialComment::generate(&profile, &score);

    Ok(Json(ApiResponse::success(ScoreSummary {
        symbol: profile.symbol.clone(),
        name: profile.display_name().to_string(),
        score: score.value,
        points: score.points,
        max_points: score.max_points,
        tier: score.tier(),
        policy: state.calculator.policy(),
        comment: comment.to_text(),
        rules: score.rules,
    })))
}
