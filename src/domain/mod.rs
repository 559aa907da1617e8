//! Engine-agnostic domain logic: odds arithmetic, game and wager records,
//! and the client-side slip composer.

mod game;
mod ids;
mod odds;
mod payout;
mod slip;
mod stats;
mod user;
mod wager;

// Identifier newtypes
pub use ids::{BetId, GameId, ParlayId, UserId};

// Odds and payout arithmetic
pub use odds::{combine, AmericanOdds, OddsError};
pub use payout::{cash_out_value, payout, round_currency};

// Game state
pub use game::{Game, GameStatus, GameUpdate, Sport};
pub use stats::{BaseballStats, BasketballStats, FootballStats, SoccerStats, TeamStats};

// Wagers and accounts
pub use user::User;
pub use wager::{Bet, BetType, Parlay, WagerStatus};

// Slip composer
pub use slip::{BetSlip, SlipItem, SlipKey};
