//! Open-Meteo daily forecast provider.
//!
//! Calls `/v1/forecast` for the daily aggregates the scoring engine
//! consumes and zips the column-oriented response into per-day rows.
//! Any transport or decode problem surfaces as `FetchFailure`.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::NaiveDate;
use metrics::{counter, histogram};
use reqwest::Client;
use serde::Deserialize;

use crate::error::AdvisorError;
use crate::forecast::{ensure_metrics_described, ForecastSource};
use crate::location::Coordinates;
use crate::summary::DailyObservation;

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";

const DAILY_FIELDS: &str =
    "temperature_2m_max,temperature_2m_min,precipitation_sum,wind_speed_10m_max";

#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    client: Client,
    base_url: String,
    forecast_days: u8,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyBlock,
}

/// Column-oriented daily block exactly as Open-Meteo returns it.
#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<String>,
    #[serde(rename = "temperature_2m_max")]
    temperature_max: Vec<f64>,
    #[serde(rename = "temperature_2m_min")]
    temperature_min: Vec<f64>,
    #[serde(rename = "precipitation_sum")]
    precipitation: Vec<f64>,
    #[serde(rename = "wind_speed_10m_max")]
    wind_speed_max: Vec<f64>,
}

impl OpenMeteoForecast {
    pub fn new(
        base_url: impl Into<String>,
        forecast_days: u8,
        timeout: Duration,
    ) -> Result<Self, AdvisorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            forecast_days,
        })
    }

    /// Transpose the column-oriented block into per-day rows.
    fn rows_from(block: DailyBlock) -> Result<Vec<DailyObservation>, AdvisorError> {
        let len = block.time.len();
        let columns = [
            block.temperature_max.len(),
            block.temperature_min.len(),
            block.precipitation.len(),
            block.wind_speed_max.len(),
        ];
        if columns.iter().any(|&l| l != len) {
            return Err(AdvisorError::FetchFailure(
                "daily series lengths disagree".to_string(),
            ));
        }

        let mut days = Vec::with_capacity(len);
        for i in 0..len {
            let date = NaiveDate::parse_from_str(&block.time[i], "%Y-%m-%d").map_err(|e| {
                AdvisorError::FetchFailure(format!("bad date '{}': {e}", block.time[i]))
            })?;
            days.push(DailyObservation {
                date,
                temperature_max: block.temperature_max[i],
                temperature_min: block.temperature_min[i],
                precipitation: block.precipitation[i],
                wind_speed_max: block.wind_speed_max[i],
            });
        }
        Ok(days)
    }
}

#[async_trait]
impl ForecastSource for OpenMeteoForecast {
    async fn fetch_daily(
        &self,
        coords: Coordinates,
    ) -> Result<Vec<DailyObservation>, AdvisorError> {
        ensure_metrics_described();
        let t0 = Instant::now();

        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&daily={}&timezone=UTC&forecast_days={}",
            self.base_url, coords.latitude, coords.longitude, DAILY_FIELDS, self.forecast_days
        );

        let resp = self.client.get(&url).send().await.map_err(|e| {
            tracing::warn!(error = ?e, provider = "open-meteo", "forecast http error");
            counter!("forecast_fetch_errors_total").increment(1);
            AdvisorError::from(e)
        })?;

        if !resp.status().is_success() {
            counter!("forecast_fetch_errors_total").increment(1);
            return Err(AdvisorError::FetchFailure(format!(
                "forecast upstream returned {}",
                resp.status()
            )));
        }

        let body: ForecastResponse = resp.json().await.map_err(|e| {
            counter!("forecast_fetch_errors_total").increment(1);
            AdvisorError::FetchFailure(format!("decoding forecast response: {e}"))
        })?;

        let days = Self::rows_from(body.daily)?;
        if days.is_empty() {
            counter!("forecast_fetch_errors_total").increment(1);
            return Err(AdvisorError::FetchFailure(
                "forecast upstream returned an empty window".to_string(),
            ));
        }

        histogram!("forecast_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        counter!("forecast_fetch_total").increment(1);
        tracing::debug!(
            lat = coords.latitude,
            lon = coords.longitude,
            days = days.len(),
            "forecast window fetched"
        );
        Ok(days)
    }

    fn name(&self) -> &'static str {
        "open-meteo"
    }
}
