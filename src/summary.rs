//! # Forecast Aggregator
//! Reduces a multi-day forecast window to one period-averaged summary.
//!
//! Pure arithmetic over its input, no I/O. No rounding is applied so the
//! averages can be compared against the scoring thresholds at full
//! precision.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// One day of forecast data as delivered by the forecast source.
/// Temperatures in °C, precipitation in mm, wind speed in km/h.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub precipitation: f64,
    pub wind_speed_max: f64,
}

/// Field-by-field arithmetic means over a forecast window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherSummary {
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub precipitation: f64,
    pub wind_speed_max: f64,
}

/// Average a forecast window into a single summary.
///
/// The window must be non-empty. An empty window is a caller bug and is
/// reported as `InvalidInput` — never silently averaged to zero or NaN.
pub fn aggregate(days: &[DailyObservation]) -> Result<WeatherSummary, AdvisorError> {
    if days.is_empty() {
        return Err(AdvisorError::InvalidInput(
            "cannot aggregate an empty forecast window".to_string(),
        ));
    }

    let n = days.len() as f64;
    let mut temperature_max = 0.0;
    let mut temperature_min = 0.0;
    let mut precipitation = 0.0;
    let mut wind_speed_max = 0.0;

    for day in days {
        temperature_max += day.temperature_max;
        temperature_min += day.temperature_min;
        precipitation += day.precipitation;
        wind_speed_max += day.wind_speed_max;
    }

    Ok(WeatherSummary {
        temperature_max: temperature_max / n,
        temperature_min: temperature_min / n,
        precipitation: precipitation / n,
        wind_speed_max: wind_speed_max / n,
    })
}
