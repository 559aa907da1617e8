//! Sport-specific in-play stat records.
//!
//! Each sport carries its own sparse record: a counter absent from the seed
//! data stays absent through every drift pass. The wire format is the plain
//! camelCase object the stat record serializes to.

use serde::{Deserialize, Serialize};

use super::game::Sport;

/// Per-team in-play counters, keyed by sport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TeamStats {
    Soccer(SoccerStats),
    Football(FootballStats),
    Basketball(BasketballStats),
    Baseball(BaseballStats),
}

impl TeamStats {
    /// The sport this record belongs to.
    #[must_use]
    pub fn sport(&self) -> Sport {
        match self {
            TeamStats::Soccer(_) => Sport::Soccer,
            TeamStats::Football(_) => Sport::Football,
            TeamStats::Basketball(_) => Sport::Basketball,
            TeamStats::Baseball(_) => Sport::Baseball,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SoccerStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub possession: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_shots: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shots_on_target: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fouls: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corners: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yellow_cards: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub red_cards: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FootballStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub passing_yards: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rushing_yards: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnovers: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_of_possession: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BasketballStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rebounds: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assists: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steals: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blocks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_goal_pct: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub three_point_pct: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BaseballStats {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikeouts: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walks: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_counters_are_omitted_from_the_wire() {
        let stats = TeamStats::Soccer(SoccerStats {
            possession: Some(55),
            total_shots: Some(9),
            ..Default::default()
        });
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["possession"], 55);
        assert!(json.get("fouls").is_none());
    }

    #[test]
    fn untagged_round_trip_picks_the_right_sport() {
        let stats = TeamStats::Basketball(BasketballStats {
            rebounds: Some(31),
            field_goal_pct: Some(47.5),
            ..Default::default()
        });
        let json = serde_json::to_string(&stats).unwrap();
        let back: TeamStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.sport(), Sport::Basketball);
        assert_eq!(back, stats);
    }
}
