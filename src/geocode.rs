//! City search: resolve free-text queries to coordinate candidates.
//!
//! Backed by the Open-Meteo geocoding API. Upstream already orders results
//! by its own relevance; we re-rank by name similarity to the query
//! (normalized Levenshtein) so exact and near-exact matches surface first.

use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use strsim::normalized_levenshtein;

use crate::error::AdvisorError;
use crate::forecast::ensure_metrics_described;

pub const DEFAULT_BASE_URL: &str = "https://geocoding-api.open-meteo.com";

/// Upper bound on candidates requested upstream and returned to callers.
const MAX_CANDIDATES: u8 = 10;

/// One resolved candidate for a place-name query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationCandidate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Resolves free-text place queries to coordinate candidates.
#[async_trait]
pub trait LocationResolver: Send + Sync {
    /// Search for candidates matching `query`, best match first.
    /// Fails with `NotFound` when the query resolves to nothing.
    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>, AdvisorError>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    // Open-Meteo omits the key entirely when nothing matched.
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
    country: Option<String>,
    latitude: f64,
    longitude: f64,
}

impl OpenMeteoGeocoder {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AdvisorError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }
}

/// Order candidates by similarity of their name to the query, best first.
/// The sort is stable, so upstream order breaks similarity ties.
fn rank_by_similarity(query: &str, mut candidates: Vec<LocationCandidate>) -> Vec<LocationCandidate> {
    let needle = query.trim().to_lowercase();
    candidates.sort_by(|a, b| {
        let sim_a = normalized_levenshtein(&needle, &a.name.to_lowercase());
        let sim_b = normalized_levenshtein(&needle, &b.name.to_lowercase());
        sim_b
            .partial_cmp(&sim_a)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    candidates
}

#[async_trait]
impl LocationResolver for OpenMeteoGeocoder {
    async fn search(&self, query: &str) -> Result<Vec<LocationCandidate>, AdvisorError> {
        ensure_metrics_described();

        let query = query.trim();
        if query.is_empty() {
            return Err(AdvisorError::InvalidInput(
                "search query must not be blank".to_string(),
            ));
        }

        let count = MAX_CANDIDATES.to_string();
        let resp = self
            .client
            .get(format!("{}/v1/search", self.base_url))
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("language", "en"),
                ("format", "json"),
            ])
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(error = ?e, provider = "open-meteo-geocoding", "search http error");
                counter!("geocode_search_errors_total").increment(1);
                AdvisorError::from(e)
            })?;

        if !resp.status().is_success() {
            counter!("geocode_search_errors_total").increment(1);
            return Err(AdvisorError::FetchFailure(format!(
                "geocoding upstream returned {}",
                resp.status()
            )));
        }

        let body: SearchResponse = resp.json().await.map_err(|e| {
            counter!("geocode_search_errors_total").increment(1);
            AdvisorError::FetchFailure(format!("decoding geocoding response: {e}"))
        })?;

        counter!("geocode_search_total").increment(1);

        let candidates: Vec<LocationCandidate> = body
            .results
            .into_iter()
            .map(|r| LocationCandidate {
                name: r.name,
                country: r.country,
                latitude: r.latitude,
                longitude: r.longitude,
            })
            .collect();

        if candidates.is_empty() {
            return Err(AdvisorError::NotFound(format!(
                "no locations match '{query}'"
            )));
        }

        tracing::debug!(query, hits = candidates.len(), "geocoding search resolved");
        Ok(rank_by_similarity(query, candidates))
    }

    fn name(&self) -> &'static str {
        "open-meteo-geocoding"
    }
}
