//! Payout API /v1: REST endpoints
pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use payout_rates::RateCard;
use tower_http::trace::TraceLayer;

use crate::{config::ServiceConfig, error::ApiError, metrics::ServiceMetrics};

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub rates: Arc<RateCard>,
    pub fingerprint: Arc<str>,
    pub config: Arc<ServiceConfig>,
    pub metrics: Arc<ServiceMetrics>,
}

impl AppState {
    pub fn new(rates: RateCard, config: ServiceConfig) -> Result<Self, ApiError> {
        rates.validate()?;
        let fingerprint = rates.fingerprint()?;

        Ok(Self {
            rates: Arc::new(rates),
            fingerprint: fingerprint.into(),
            config: Arc::new(config),
            metrics: Arc::new(ServiceMetrics::new()?),
        })
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handlers::health))
        .route("/v1/rates", get(handlers::rates))
        .route("/v1/engagement", post(handlers::engagement))
        .route("/v1/earnings", post(handlers::earnings))
        .route("/v1/cashout/eligibility", post(handlers::cashout_eligibility))
        .route("/v1/summary", post(handlers::summary))
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(middleware::request_id))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(config: ServiceConfig) -> anyhow::Result<()> {
    let rates = config.load_rates()?;
    let addr = config.addr.clone();
    let state = AppState::new(rates, config)?;

    tracing::info!(
        rates = %state.rates.name,
        fingerprint = %state.fingerprint,
        "rate card ready"
    );

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Payout API listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}
