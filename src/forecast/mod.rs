//! Forecast acquisition: the upstream daily-forecast collaborator.
//!
//! The advisor core never does I/O itself; it consumes the observation
//! window a `ForecastSource` hands it. Timeouts live in the provider's
//! HTTP client, retries are deliberately nobody's job here.

pub mod open_meteo;

use async_trait::async_trait;
use metrics::{describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

use crate::error::AdvisorError;
use crate::location::Coordinates;
use crate::summary::DailyObservation;

pub use open_meteo::OpenMeteoForecast;

/// A source of multi-day daily forecasts for a coordinate pair.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    /// Fetch the daily window for already-validated coordinates.
    /// The returned window is ordered and non-empty.
    async fn fetch_daily(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<DailyObservation>, AdvisorError>;

    fn name(&self) -> &'static str;
}

/// One-time metrics registration (so series show up on /metrics).
pub(crate) fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "forecast_fetch_total",
            "Forecast windows fetched from the upstream source."
        );
        describe_counter!(
            "forecast_fetch_errors_total",
            "Forecast fetch/decode errors."
        );
        describe_histogram!(
            "forecast_fetch_ms",
            "Forecast fetch round-trip time in milliseconds."
        );
        describe_counter!(
            "geocode_search_total",
            "Location searches resolved by the geocoding source."
        );
        describe_counter!(
            "geocode_search_errors_total",
            "Geocoding fetch/decode errors."
        );
    });
}
