//! Repositories for users, games, bets, and parlays.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::{
    Bet, BetId, Game, GameId, GameUpdate, Parlay, ParlayId, User, UserId, WagerStatus,
};

/// Repository boundary for the engine's records.
///
/// Implementations must make [`Storage::update_game`] a single atomic
/// read-modify-write keyed by game id; updates to different games may run in
/// parallel. User-scoped wager queries return newest-first.
#[async_trait]
pub trait Storage: Send + Sync {
    async fn user(&self, id: &UserId) -> Option<User>;
    async fn user_by_username(&self, username: &str) -> Option<User>;
    async fn create_user(&self, user: User) -> User;
    /// Replace the stored balance outright.
    async fn set_balance(&self, id: &UserId, balance: Decimal) -> Option<User>;

    async fn games(&self) -> Vec<Game>;
    async fn game(&self, id: &GameId) -> Option<Game>;
    async fn create_game(&self, game: Game) -> Game;
    /// Apply `update` to one game atomically, returning the post-update
    /// snapshot, or `None` when the game is unknown.
    async fn update_game(&self, id: &GameId, update: GameUpdate) -> Option<Game>;

    async fn bet(&self, id: &BetId) -> Option<Bet>;
    async fn bets_for_user(&self, user_id: &UserId) -> Vec<Bet>;
    async fn bets_for_parlay(&self, parlay_id: &ParlayId) -> Vec<Bet>;
    async fn create_bet(&self, bet: Bet) -> Bet;
    async fn set_bet_status(&self, id: &BetId, status: WagerStatus) -> Option<Bet>;

    async fn parlay(&self, id: &ParlayId) -> Option<Parlay>;
    async fn parlays_for_user(&self, user_id: &UserId) -> Vec<Parlay>;
    async fn create_parlay(&self, parlay: Parlay) -> Parlay;
    async fn set_parlay_status(&self, id: &ParlayId, status: WagerStatus) -> Option<Parlay>;
}
