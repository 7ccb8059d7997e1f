//! API Handlers
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use payout_cashout::{summarize, CashoutEligibility, CashoutGate, EarningsSummary};
use payout_core::{format_count, format_currency, Article, RawArticle, PAYOUT_VERSION};
use payout_earnings::{EarningsCalculator, EarningsResult, TierProgress};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{error::ApiError, extract::ApiJson, AppState};

#[derive(Debug, Deserialize)]
pub struct BatchRequest {
    pub articles: Vec<RawArticle>,
    /// Reject invalid counts with 422 instead of clamping them
    #[serde(default)]
    pub strict: bool,
}

#[derive(Debug, Deserialize)]
pub struct SummaryRequest {
    pub articles: Vec<RawArticle>,
    #[serde(default)]
    pub strict: bool,
    /// Reference instant for monthly totals; the server clock when absent
    #[serde(default)]
    pub now: Option<DateTime<Utc>>,
}

/// Formatted amounts for direct display
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EarningsDisplay {
    pub total_earned: String,
    pub base_earnings: String,
    pub views: String,
    pub engagement: String,
}

#[derive(Debug, Serialize)]
pub struct EarningsResponse {
    pub result: EarningsResult,
    pub progress: TierProgress,
    pub display: EarningsDisplay,
}

fn ingest(state: &AppState, raw: Vec<RawArticle>, strict: bool) -> Result<Vec<Article>, ApiError> {
    let max = state.config.max_batch;
    if raw.len() > max {
        return Err(ApiError::BatchTooLarge {
            size: raw.len(),
            max,
        });
    }
    if strict {
        for article in &raw {
            article.validate()?;
        }
    }
    Ok(raw.into_iter().map(RawArticle::into_article).collect())
}

pub async fn health() -> (StatusCode, Json<Value>) {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "version": PAYOUT_VERSION })),
    )
}

pub async fn rates(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "fingerprint": &*state.fingerprint,
        "rates": &*state.rates,
    }))
}

pub async fn engagement(
    State(state): State<AppState>,
    ApiJson(raw): ApiJson<RawArticle>,
) -> Json<Value> {
    let article = raw.into_article();
    let engagement = EarningsCalculator::new(&state.rates).engagement(&article.metrics);
    state.metrics.record_calculations("engagement", 1);

    Json(json!({ "id": article.id, "engagement": engagement }))
}

pub async fn earnings(
    State(state): State<AppState>,
    ApiJson(raw): ApiJson<RawArticle>,
) -> Json<EarningsResponse> {
    let article = raw.into_article();
    let calculator = EarningsCalculator::new(&state.rates);
    let result = calculator.calculate(&article.metrics);
    let progress = calculator.progress(&article.metrics);
    state.metrics.record_calculations("earnings", 1);

    Json(EarningsResponse {
        display: EarningsDisplay {
            total_earned: format_currency(result.total_earned),
            base_earnings: format_currency(result.base_earnings),
            views: format_count(article.metrics.views),
            engagement: format_count(result.engagement),
        },
        result,
        progress,
    })
}

pub async fn cashout_eligibility(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<BatchRequest>,
) -> Result<Json<CashoutEligibility>, ApiError> {
    let articles = ingest(&state, request.articles, request.strict)?;
    let verdict = CashoutGate::new(&state.rates).evaluate(&articles);

    state.metrics.record_calculations("cashout", articles.len());
    state.metrics.record_cashout_check(verdict.eligible);
    tracing::info!(
        articles = articles.len(),
        eligible = verdict.eligible,
        summary = %verdict.summary(),
        "cashout eligibility checked"
    );

    Ok(Json(verdict))
}

pub async fn summary(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<SummaryRequest>,
) -> Result<Json<EarningsSummary>, ApiError> {
    let articles = ingest(&state, request.articles, request.strict)?;
    let now = request.now.unwrap_or_else(Utc::now);
    state.metrics.record_calculations("summary", articles.len());

    Ok(Json(summarize(&articles, &state.rates, now)))
}

pub async fn metrics(State(state): State<AppState>) -> Result<String, ApiError> {
    Ok(state.metrics.encode()?)
}
