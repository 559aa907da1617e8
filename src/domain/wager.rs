//! Bet and parlay records.

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{BetId, GameId, ParlayId, UserId};
use super::odds::AmericanOdds;

/// How a wager is resolved against the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BetType {
    Moneyline,
    Spread,
    Total,
    Prop,
}

/// Settlement state shared by bets and parlays.
///
/// `Pending` is the only non-terminal state; everything else is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WagerStatus {
    Pending,
    Won,
    Lost,
    CashedOut,
}

impl WagerStatus {
    /// Returns true while the wager can still settle or cash out.
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, WagerStatus::Pending)
    }

    /// Returns true once the wager has reached a terminal state.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        !self.is_pending()
    }
}

impl fmt::Display for WagerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WagerStatus::Pending => "pending",
            WagerStatus::Won => "won",
            WagerStatus::Lost => "lost",
            WagerStatus::CashedOut => "cashed_out",
        };
        write!(f, "{label}")
    }
}

/// A single wager leg.
///
/// The odds are a snapshot frozen at placement; later movement of the game's
/// lines never touches a booked bet. A parlay leg carries `stake = 0` - the
/// parent [`Parlay`] holds the financial terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bet {
    pub id: BetId,
    pub user_id: UserId,
    pub game_id: GameId,
    pub bet_type: BetType,
    pub selection: String,
    pub odds: AmericanOdds,
    pub stake: Decimal,
    pub potential_payout: Decimal,
    pub status: WagerStatus,
    pub is_parlay: bool,
    pub parlay_id: Option<ParlayId>,
    pub created_at: DateTime<Utc>,
}

/// A combined wager over two or more legs; wins only if every leg wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parlay {
    pub id: ParlayId,
    pub user_id: UserId,
    pub total_odds: AmericanOdds,
    pub stake: Decimal,
    pub potential_payout: Decimal,
    pub status: WagerStatus,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_is_the_only_open_state() {
        assert!(WagerStatus::Pending.is_pending());
        for status in [WagerStatus::Won, WagerStatus::Lost, WagerStatus::CashedOut] {
            assert!(status.is_terminal());
        }
    }

    #[test]
    fn status_wire_tokens() {
        assert_eq!(
            serde_json::to_string(&WagerStatus::CashedOut).unwrap(),
            "\"cashed_out\""
        );
        assert_eq!(
            serde_json::to_string(&BetType::Moneyline).unwrap(),
            "\"moneyline\""
        );
    }
}
