//! In-memory repository backed by concurrent maps.

use async_trait::async_trait;
use dashmap::DashMap;
use rust_decimal::Decimal;

use super::Storage;
use crate::domain::{
    Bet, BetId, Game, GameId, GameUpdate, Parlay, ParlayId, User, UserId, WagerStatus,
};

/// In-memory [`Storage`] implementation.
///
/// Mutations run under the touched key's map guard: same-game updates
/// serialize, distinct games proceed independently. Reads hand out
/// snapshots, never references into the maps.
#[derive(Default)]
pub struct MemoryStore {
    users: DashMap<UserId, User>,
    games: DashMap<GameId, Game>,
    bets: DashMap<BetId, Bet>,
    parlays: DashMap<ParlayId, Parlay>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStore {
    async fn user(&self, id: &UserId) -> Option<User> {
        self.users.get(id).map(|user| user.clone())
    }

    async fn user_by_username(&self, username: &str) -> Option<User> {
        self.users
            .iter()
            .find(|user| user.username == username)
            .map(|user| user.clone())
    }

    async fn create_user(&self, user: User) -> User {
        self.users.insert(user.id.clone(), user.clone());
        user
    }

    async fn set_balance(&self, id: &UserId, balance: Decimal) -> Option<User> {
        let mut user = self.users.get_mut(id)?;
        user.balance = balance;
        Some(user.clone())
    }

    async fn games(&self) -> Vec<Game> {
        self.games.iter().map(|game| game.clone()).collect()
    }

    async fn game(&self, id: &GameId) -> Option<Game> {
        self.games.get(id).map(|game| game.clone())
    }

    async fn create_game(&self, game: Game) -> Game {
        self.games.insert(game.id.clone(), game.clone());
        game
    }

    async fn update_game(&self, id: &GameId, update: GameUpdate) -> Option<Game> {
        // Read-modify-write under the entry guard; see the trait contract.
        let mut game = self.games.get_mut(id)?;
        game.apply(&update);
        Some(game.clone())
    }

    async fn bet(&self, id: &BetId) -> Option<Bet> {
        self.bets.get(id).map(|bet| bet.clone())
    }

    async fn bets_for_user(&self, user_id: &UserId) -> Vec<Bet> {
        let mut bets: Vec<Bet> = self
            .bets
            .iter()
            .filter(|bet| bet.user_id == *user_id)
            .map(|bet| bet.clone())
            .collect();
        bets.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        bets
    }

    async fn bets_for_parlay(&self, parlay_id: &ParlayId) -> Vec<Bet> {
        self.bets
            .iter()
            .filter(|bet| bet.parlay_id.as_ref() == Some(parlay_id))
            .map(|bet| bet.clone())
            .collect()
    }

    async fn create_bet(&self, bet: Bet) -> Bet {
        self.bets.insert(bet.id.clone(), bet.clone());
        bet
    }

    async fn set_bet_status(&self, id: &BetId, status: WagerStatus) -> Option<Bet> {
        let mut bet = self.bets.get_mut(id)?;
        bet.status = status;
        Some(bet.clone())
    }

    async fn parlay(&self, id: &ParlayId) -> Option<Parlay> {
        self.parlays.get(id).map(|parlay| parlay.clone())
    }

    async fn parlays_for_user(&self, user_id: &UserId) -> Vec<Parlay> {
        let mut parlays: Vec<Parlay> = self
            .parlays
            .iter()
            .filter(|parlay| parlay.user_id == *user_id)
            .map(|parlay| parlay.clone())
            .collect();
        parlays.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        parlays
    }

    async fn create_parlay(&self, parlay: Parlay) -> Parlay {
        self.parlays.insert(parlay.id.clone(), parlay.clone());
        parlay
    }

    async fn set_parlay_status(&self, id: &ParlayId, status: WagerStatus) -> Option<Parlay> {
        let mut parlay = self.parlays.get_mut(id)?;
        parlay.status = status;
        Some(parlay.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sport;
    use crate::testkit::domain::{live_game, user_with_balance};
    use chrono::{Duration, Utc};
    use rust_decimal_macros::dec;

    fn pending_bet(user: &UserId, game: &GameId) -> Bet {
        Bet {
            id: BetId::generate(),
            user_id: user.clone(),
            game_id: game.clone(),
            bet_type: crate::domain::BetType::Moneyline,
            selection: "home".into(),
            odds: crate::domain::AmericanOdds::clamped(150),
            stake: dec!(10),
            potential_payout: dec!(25),
            status: WagerStatus::Pending,
            is_parlay: false,
            parlay_id: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn user_round_trip_and_balance() {
        let store = MemoryStore::new();
        let user = store.create_user(user_with_balance(dec!(1000))).await;

        assert_eq!(store.user(&user.id).await.unwrap().balance, dec!(1000));
        assert!(store.user_by_username(&user.username).await.is_some());

        let updated = store.set_balance(&user.id, dec!(250)).await.unwrap();
        assert_eq!(updated.balance, dec!(250));
        assert!(store.set_balance(&UserId::new("ghost"), dec!(1)).await.is_none());
    }

    #[tokio::test]
    async fn update_game_returns_post_update_snapshot() {
        let store = MemoryStore::new();
        let game = store.create_game(live_game(Sport::Basketball)).await;

        let updated = store
            .update_game(
                &game.id,
                GameUpdate {
                    home_score: Some(game.home_score + 2),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.home_score, game.home_score + 2);

        assert!(store
            .update_game(&GameId::new("ghost"), GameUpdate::default())
            .await
            .is_none());
    }

    #[tokio::test]
    async fn bets_for_user_are_newest_first() {
        let store = MemoryStore::new();
        let user = store.create_user(user_with_balance(dec!(100))).await;
        let game = store.create_game(live_game(Sport::Football)).await;

        let mut older = pending_bet(&user.id, &game.id);
        older.created_at = Utc::now() - Duration::minutes(5);
        let older = store.create_bet(older).await;
        let newer = store.create_bet(pending_bet(&user.id, &game.id)).await;

        let bets = store.bets_for_user(&user.id).await;
        assert_eq!(bets.len(), 2);
        assert_eq!(bets[0].id, newer.id);
        assert_eq!(bets[1].id, older.id);
    }

    #[tokio::test]
    async fn legs_are_found_by_parlay() {
        let store = MemoryStore::new();
        let user = store.create_user(user_with_balance(dec!(100))).await;
        let game = store.create_game(live_game(Sport::Baseball)).await;
        let parlay_id = ParlayId::generate();

        let mut leg = pending_bet(&user.id, &game.id);
        leg.is_parlay = true;
        leg.parlay_id = Some(parlay_id.clone());
        store.create_bet(leg).await;
        store.create_bet(pending_bet(&user.id, &game.id)).await;

        assert_eq!(store.bets_for_parlay(&parlay_id).await.len(), 1);
    }
}
