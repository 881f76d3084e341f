//! # Ranking Orchestrator
//! Sequences the scoring engine and ordering into the final recommendation.
//! Pure and deterministic: identical summaries always rank identically.

use serde::{Deserialize, Serialize};

use crate::scoring::{score_all, ActivityScore, ActivityType};
use crate::summary::WeatherSummary;

/// All four scores ordered best-first, plus the winning activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingResult {
    pub scores: Vec<ActivityScore>,
    pub recommended: ActivityType,
}

/// Rank every activity for the given summary.
///
/// The sort is stable over the canonical activity order, so equal scores
/// resolve the same way every time: SURFING, SKIING, OUTDOOR_SIGHTSEEING,
/// INDOOR_SIGHTSEEING. The recommendation is always the first ranked entry.
pub fn rank(summary: &WeatherSummary) -> RankingResult {
    let mut scores = score_all(summary);
    scores.sort_by(|a, b| b.score.cmp(&a.score));
    let recommended = scores[0].activity;
    RankingResult {
        scores,
        recommended,
    }
}
