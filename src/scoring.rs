//! # Scoring Engine
//! Pure, testable logic that maps a `WeatherSummary` → per-activity scores.
//! No I/O, suitable for unit tests and offline evaluation.
//!
//! Each activity carries an ordered table of `(condition, points, reason)`
//! rules. Evaluation is additive and independent: every satisfied rule
//! contributes its points and its reason fragment; rules never interact
//! across activities and there is no early exit. The numeric pass
//! (`evaluate`) is kept separate from reason rendering so the point math
//! stays testable independent of wording.

use serde::{Deserialize, Serialize};

use crate::summary::WeatherSummary;

/// The closed set of activities the advisor ranks.
///
/// Variant order is the canonical tie-break order used by the ranker;
/// adding a variant forces every match below to be revisited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    Surfing,
    Skiing,
    OutdoorSightseeing,
    IndoorSightseeing,
}

/// One scoring rule: a threshold condition, its points, and the fragment
/// that justifies it to the user.
struct Rule {
    points: u32,
    reason: &'static str,
    applies: fn(&WeatherSummary) -> bool,
}

static SURFING_RULES: [Rule; 3] = [
    Rule {
        points: 30,
        reason: "wind creates rideable swells",
        applies: |w| w.wind_speed_max >= 25.0,
    },
    Rule {
        points: 20,
        reason: "good visibility, minimal rain",
        applies: |w| w.precipitation < 2.0,
    },
    Rule {
        points: 20,
        reason: "warm enough for extended water time",
        applies: |w| w.temperature_max > 18.0,
    },
];

static SKIING_RULES: [Rule; 2] = [
    Rule {
        points: 40,
        reason: "excellent snow conditions",
        applies: |w| w.temperature_max < 5.0,
    },
    Rule {
        points: 20,
        reason: "fresh snow accumulation",
        applies: |w| w.precipitation > 2.0,
    },
];

static OUTDOOR_SIGHTSEEING_RULES: [Rule; 2] = [
    Rule {
        points: 40,
        reason: "clear, dry skies",
        applies: |w| w.precipitation < 1.0,
    },
    Rule {
        points: 30,
        reason: "comfortable temperature",
        applies: |w| (18.0..=28.0).contains(&w.temperature_max),
    },
];

static INDOOR_SIGHTSEEING_RULES: [Rule; 2] = [
    Rule {
        points: 40,
        reason: "heavy rain favors indoor activities",
        applies: |w| w.precipitation > 4.0,
    },
    Rule {
        points: 20,
        reason: "strong wind discourages outdoor activities",
        applies: |w| w.wind_speed_max > 30.0,
    },
];

impl ActivityType {
    /// All activities in canonical (declaration) order.
    pub const ALL: [Self; 4] = [
        Self::Surfing,
        Self::Skiing,
        Self::OutdoorSightseeing,
        Self::IndoorSightseeing,
    ];

    fn rules(self) -> &'static [Rule] {
        match self {
            Self::Surfing => &SURFING_RULES,
            Self::Skiing => &SKIING_RULES,
            Self::OutdoorSightseeing => &OUTDOOR_SIGHTSEEING_RULES,
            Self::IndoorSightseeing => &INDOOR_SIGHTSEEING_RULES,
        }
    }

    /// Fixed reason reported when none of the activity's rules match.
    fn unfavorable_reason(self) -> &'static str {
        match self {
            Self::Surfing => "wind, rain and temperature are all unfavorable for surfing",
            Self::Skiing => "too warm and too dry for good snow",
            Self::OutdoorSightseeing => "rain or temperature make the outdoors uncomfortable",
            Self::IndoorSightseeing => "weather outside is too good to stay indoors",
        }
    }

    /// Highest score this activity's table can produce.
    pub fn max_score(self) -> u32 {
        self.rules().iter().map(|r| r.points).sum()
    }
}

/// Numeric outcome for one activity: accumulated points plus the indexes of
/// the rules that matched, in declaration order. Text is rendered later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatches {
    pub activity: ActivityType,
    pub points: u32,
    pub matched: Vec<usize>,
}

/// Evaluate one activity's rule table against the summary.
pub fn evaluate(activity: ActivityType, summary: &WeatherSummary) -> RuleMatches {
    let mut points = 0;
    let mut matched = Vec::new();
    for (idx, rule) in activity.rules().iter().enumerate() {
        if (rule.applies)(summary) {
            points += rule.points;
            matched.push(idx);
        }
    }
    RuleMatches {
        activity,
        points,
        matched,
    }
}

/// Join the matched fragments in declaration order (primary factor first),
/// falling back to the activity's fixed unfavorable-conditions text.
fn render_reason(matches: &RuleMatches) -> String {
    if matches.matched.is_empty() {
        return matches.activity.unfavorable_reason().to_string();
    }
    let rules = matches.activity.rules();
    matches
        .matched
        .iter()
        .map(|&idx| rules[idx].reason)
        .collect::<Vec<_>>()
        .join(" and ")
}

/// Final per-activity score with its human-readable justification.
/// `reason` is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityScore {
    pub activity: ActivityType,
    pub score: u32,
    pub reason: String,
}

/// Score every activity against the summary.
///
/// Returns one entry per activity in canonical order, unsorted — ordering
/// by score is the ranker's job.
pub fn score_all(summary: &WeatherSummary) -> Vec<ActivityScore> {
    ActivityType::ALL
        .iter()
        .map(|&activity| {
            let matches = evaluate(activity, summary);
            ActivityScore {
                activity,
                score: matches.points,
                reason: render_reason(&matches),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(tmax: f64, tmin: f64, precip: f64, wind: f64) -> WeatherSummary {
        WeatherSummary {
            temperature_max: tmax,
            temperature_min: tmin,
            precipitation: precip,
            wind_speed_max: wind,
        }
    }

    #[test]
    fn maxima_match_rule_tables() {
        assert_eq!(ActivityType::Surfing.max_score(), 70);
        assert_eq!(ActivityType::Skiing.max_score(), 60);
        assert_eq!(ActivityType::OutdoorSightseeing.max_score(), 70);
        assert_eq!(ActivityType::IndoorSightseeing.max_score(), 60);
    }

    #[test]
    fn surfing_wind_threshold_is_inclusive() {
        // Wind held just below / at / above 25; other fields kept neutral
        // for the remaining surfing rules (dry, cold).
        let below = evaluate(ActivityType::Surfing, &summary(10.0, 5.0, 3.0, 24.9));
        let at = evaluate(ActivityType::Surfing, &summary(10.0, 5.0, 3.0, 25.0));
        let above = evaluate(ActivityType::Surfing, &summary(10.0, 5.0, 3.0, 25.1));
        assert_eq!(below.points, 0);
        assert_eq!(at.points, 30);
        assert_eq!(above.points, 30);
    }

    #[test]
    fn outdoor_temperature_band_is_inclusive_on_both_ends() {
        let wet = 5.0; // keep the precipitation rule off
        assert_eq!(
            evaluate(ActivityType::OutdoorSightseeing, &summary(17.9, 10.0, wet, 0.0)).points,
            0
        );
        assert_eq!(
            evaluate(ActivityType::OutdoorSightseeing, &summary(18.0, 10.0, wet, 0.0)).points,
            30
        );
        assert_eq!(
            evaluate(ActivityType::OutdoorSightseeing, &summary(28.0, 10.0, wet, 0.0)).points,
            30
        );
        assert_eq!(
            evaluate(ActivityType::OutdoorSightseeing, &summary(28.1, 10.0, wet, 0.0)).points,
            0
        );
    }

    #[test]
    fn skiing_thresholds_are_strict() {
        assert_eq!(evaluate(ActivityType::Skiing, &summary(5.0, 0.0, 2.0, 0.0)).points, 0);
        assert_eq!(evaluate(ActivityType::Skiing, &summary(4.9, 0.0, 2.1, 0.0)).points, 60);
    }

    #[test]
    fn reasons_join_in_declaration_order() {
        // All three surfing rules fire.
        let scores = score_all(&summary(22.0, 18.0, 0.5, 30.0));
        let surfing = &scores[0];
        assert_eq!(surfing.activity, ActivityType::Surfing);
        assert_eq!(
            surfing.reason,
            "wind creates rideable swells and good visibility, minimal rain \
             and warm enough for extended water time"
        );
    }

    #[test]
    fn zero_score_still_carries_a_reason() {
        // Mild, damp, calm: only the skiing precipitation rule fires.
        let scores = score_all(&summary(10.0, 5.0, 3.0, 10.0));
        for s in &scores {
            assert!(!s.reason.is_empty(), "{:?} reason must not be empty", s.activity);
            assert!(s.score <= s.activity.max_score());
        }
        let skiing = scores.iter().find(|s| s.activity == ActivityType::Skiing).unwrap();
        assert_eq!(skiing.score, 20); // precipitation > 2 only
        let indoor = scores
            .iter()
            .find(|s| s.activity == ActivityType::IndoorSightseeing)
            .unwrap();
        assert_eq!(indoor.score, 0);
        assert_eq!(indoor.reason, "weather outside is too good to stay indoors");
    }

    #[test]
    fn score_all_returns_canonical_order() {
        let scores = score_all(&summary(0.0, 0.0, 0.0, 0.0));
        let order: Vec<ActivityType> = scores.iter().map(|s| s.activity).collect();
        assert_eq!(order, ActivityType::ALL.to_vec());
    }

    #[test]
    fn activity_names_serialize_uppercase() {
        let json = serde_json::to_string(&ActivityType::OutdoorSightseeing).unwrap();
        assert_eq!(json, "\"OUTDOOR_SIGHTSEEING\"");
        let back: ActivityType = serde_json::from_str("\"SURFING\"").unwrap();
        assert_eq!(back, ActivityType::Surfing);
    }
}
