//! Activity Advisor — Binary Entrypoint
//! Boots the Axum HTTP server, wiring routes, shared state, and middleware.

use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use activity_advisor::api::{self, AppState};
use activity_advisor::config::AdvisorConfig;
use activity_advisor::forecast::OpenMeteoForecast;
use activity_advisor::geocode::OpenMeteoGeocoder;
use activity_advisor::metrics::Metrics;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("activity_advisor=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op when the file is absent.
    let _ = dotenvy::dotenv();

    init_tracing();

    let config = AdvisorConfig::load()?;
    let metrics = Metrics::init(config.forecast_days);

    let timeout = Duration::from_secs(config.http_timeout_secs);
    let state = AppState {
        forecast: Arc::new(OpenMeteoForecast::new(
            &config.forecast_base_url,
            config.forecast_days,
            timeout,
        )?),
        locations: Arc::new(OpenMeteoGeocoder::new(&config.geocode_base_url, timeout)?),
    };

    let router = api::create_router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "activity advisor listening");
    axum::serve(listener, router).await?;

    Ok(())
}
