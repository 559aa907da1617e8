//! Game records and live-update deltas.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::GameId;
use super::odds::AmericanOdds;
use super::stats::TeamStats;

/// Sport a game belongs to. Serialized with the league-code tokens the wire
/// format uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sport {
    #[serde(rename = "nfl")]
    Football,
    #[serde(rename = "nba")]
    Basketball,
    #[serde(rename = "mlb")]
    Baseball,
    #[serde(rename = "soccer")]
    Soccer,
}

impl Sport {
    /// Wire token for this sport.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Sport::Football => "nfl",
            Sport::Basketball => "nba",
            Sport::Baseball => "mlb",
            Sport::Soccer => "soccer",
        }
    }
}

impl fmt::Display for Sport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of a game. Transitions only move forward:
/// `upcoming -> live -> final`, and `final` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Upcoming,
    Live,
    Final,
}

impl GameStatus {
    /// Returns true while the game is in play.
    #[must_use]
    pub fn is_live(self) -> bool {
        matches!(self, GameStatus::Live)
    }

    /// Returns true once the game has ended.
    #[must_use]
    pub fn is_final(self) -> bool {
        matches!(self, GameStatus::Final)
    }

    /// True when moving from `self` to `next` goes forward in the lifecycle.
    #[must_use]
    pub fn can_advance_to(self, next: GameStatus) -> bool {
        use GameStatus::{Final, Live, Upcoming};
        matches!(
            (self, next),
            (Upcoming, Live) | (Upcoming, Final) | (Live, Final)
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GameStatus::Upcoming => "upcoming",
            GameStatus::Live => "live",
            GameStatus::Final => "final",
        };
        write!(f, "{label}")
    }
}

/// A scheduled, in-play, or completed game with its betting lines.
///
/// Seeded once, mutated only by the tick simulator while live, immutable
/// once final. Scores are monotonically non-decreasing and the moneylines
/// never sit inside the pick'em band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: GameId,
    pub sport: Sport,
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
    pub status: GameStatus,
    pub quarter: Option<String>,
    pub time_remaining: Option<String>,
    pub start_time: DateTime<Utc>,
    pub home_moneyline: AmericanOdds,
    pub away_moneyline: AmericanOdds,
    pub spread: Decimal,
    pub spread_odds: AmericanOdds,
    pub total_points: Decimal,
    pub over_odds: AmericanOdds,
    pub under_odds: AmericanOdds,
    pub home_stats: Option<TeamStats>,
    pub away_stats: Option<TeamStats>,
    pub featured: bool,
}

impl Game {
    /// Apply a field-delta in place.
    ///
    /// A final game accepts no further mutation, scores never go backwards,
    /// and the status only moves forward in the lifecycle.
    pub fn apply(&mut self, update: &GameUpdate) {
        if self.status.is_final() {
            return;
        }
        if let Some(score) = update.home_score {
            self.home_score = self.home_score.max(score);
        }
        if let Some(score) = update.away_score {
            self.away_score = self.away_score.max(score);
        }
        if let Some(line) = update.home_moneyline {
            self.home_moneyline = line;
        }
        if let Some(line) = update.away_moneyline {
            self.away_moneyline = line;
        }
        if let Some(stats) = &update.home_stats {
            self.home_stats = Some(stats.clone());
        }
        if let Some(stats) = &update.away_stats {
            self.away_stats = Some(stats.clone());
        }
        if let Some(quarter) = &update.quarter {
            self.quarter = Some(quarter.clone());
        }
        if let Some(time_remaining) = &update.time_remaining {
            self.time_remaining = Some(time_remaining.clone());
        }
        if let Some(status) = update.status {
            if self.status.can_advance_to(status) {
                self.status = status;
            }
        }
    }
}

/// Partial update for one game; `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameUpdate {
    pub home_score: Option<u32>,
    pub away_score: Option<u32>,
    pub home_moneyline: Option<AmericanOdds>,
    pub away_moneyline: Option<AmericanOdds>,
    pub home_stats: Option<TeamStats>,
    pub away_stats: Option<TeamStats>,
    pub quarter: Option<String>,
    pub time_remaining: Option<String>,
    pub status: Option<GameStatus>,
}

impl GameUpdate {
    /// True when the delta would not touch any field.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::live_game;

    #[test]
    fn status_transitions_are_one_way() {
        assert!(GameStatus::Upcoming.can_advance_to(GameStatus::Live));
        assert!(GameStatus::Live.can_advance_to(GameStatus::Final));
        assert!(GameStatus::Upcoming.can_advance_to(GameStatus::Final));
        assert!(!GameStatus::Live.can_advance_to(GameStatus::Upcoming));
        assert!(!GameStatus::Final.can_advance_to(GameStatus::Live));
        assert!(!GameStatus::Final.can_advance_to(GameStatus::Upcoming));
    }

    #[test]
    fn apply_updates_scores_and_lines() {
        let mut game = live_game(Sport::Basketball);
        let update = GameUpdate {
            home_score: Some(game.home_score + 3),
            home_moneyline: Some(AmericanOdds::clamped(-140)),
            ..Default::default()
        };
        game.apply(&update);
        assert_eq!(game.home_moneyline.value(), -140);
    }

    #[test]
    fn apply_never_lowers_a_score() {
        let mut game = live_game(Sport::Basketball);
        game.home_score = 80;
        game.apply(&GameUpdate {
            home_score: Some(12),
            ..Default::default()
        });
        assert_eq!(game.home_score, 80);
    }

    #[test]
    fn final_games_are_immutable() {
        let mut game = live_game(Sport::Football);
        game.status = GameStatus::Final;
        let before = game.clone();
        game.apply(&GameUpdate {
            home_score: Some(99),
            status: Some(GameStatus::Live),
            ..Default::default()
        });
        assert_eq!(game, before);
    }

    #[test]
    fn empty_update_is_empty() {
        assert!(GameUpdate::default().is_empty());
        assert!(!GameUpdate {
            away_score: Some(1),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let game = live_game(Sport::Soccer);
        let json = serde_json::to_value(&game).unwrap();
        assert!(json.get("homeTeam").is_some());
        assert!(json.get("homeMoneyline").is_some());
        assert!(json.get("totalPoints").is_some());
        assert_eq!(json["sport"], "soccer");
        assert_eq!(json["status"], "live");
    }
}
