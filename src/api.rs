//! HTTP surface: routes, shared state, and error → status mapping.
//!
//! The handlers own identifier parsing and validation; the pure core
//! (aggregation, scoring, ranking) only ever receives validated
//! coordinates or an already-aggregated summary.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::error::AdvisorError;
use crate::forecast::ForecastSource;
use crate::geocode::{LocationCandidate, LocationResolver};
use crate::location::Coordinates;
use crate::ranking::rank;
use crate::scoring::{ActivityScore, ActivityType};
use crate::summary::{aggregate, DailyObservation, WeatherSummary};

#[derive(Clone)]
pub struct AppState {
    pub forecast: Arc<dyn ForecastSource>,
    pub locations: Arc<dyn LocationResolver>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/locations", get(search_locations))
        .route("/forecast", get(get_forecast))
        .route("/recommendations", get(get_recommendations))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Wrapper that maps the shared taxonomy onto HTTP statuses with a JSON body.
pub struct ApiError(AdvisorError);

impl From<AdvisorError> for ApiError {
    fn from(err: AdvisorError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AdvisorError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AdvisorError::NotFound(_) => StatusCode::NOT_FOUND,
            AdvisorError::FetchFailure(_) => StatusCode::BAD_GATEWAY,
        };
        if status == StatusCode::BAD_GATEWAY {
            tracing::warn!(error = %self.0, "upstream failure surfaced to client");
        }
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

#[derive(Deserialize)]
struct SearchParams {
    query: String,
}

#[derive(Deserialize)]
struct LocationParam {
    /// `"lat,lon"` identifier; parsed and range-checked here.
    location: String,
}

#[derive(Serialize)]
struct ForecastResponse {
    location: Coordinates,
    days: Vec<DailyObservation>,
}

#[derive(Serialize)]
struct RecommendationResponse {
    location: Coordinates,
    summary: WeatherSummary,
    scores: Vec<ActivityScore>,
    recommended: ActivityType,
}

async fn search_locations(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<LocationCandidate>>, ApiError> {
    let candidates = state.locations.search(&params.query).await?;
    Ok(Json(candidates))
}

async fn get_forecast(
    State(state): State<AppState>,
    Query(params): Query<LocationParam>,
) -> Result<Json<ForecastResponse>, ApiError> {
    let coords: Coordinates = params.location.parse()?;
    let days = state.forecast.fetch_daily(coords).await?;
    Ok(Json(ForecastResponse {
        location: coords,
        days,
    }))
}

async fn get_recommendations(
    State(state): State<AppState>,
    Query(params): Query<LocationParam>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let coords: Coordinates = params.location.parse()?;
    let days = state.forecast.fetch_daily(coords).await?;
    let summary = aggregate(&days)?;
    let ranking = rank(&summary);

    tracing::info!(
        lat = coords.latitude,
        lon = coords.longitude,
        recommended = ?ranking.recommended,
        "ranked activities"
    );

    Ok(Json(RecommendationResponse {
        location: coords,
        summary,
        scores: ranking.scores,
        recommended: ranking.recommended,
    }))
}
