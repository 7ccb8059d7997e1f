//! Binary entrypoint for the Payout API server.
use payout_api::{config::ServiceConfig, run};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Listen address and rate card path come from PAYOUT_ADDR / PAYOUT_RATES
    let config = ServiceConfig::from_env()?;
    run(config).await
}
