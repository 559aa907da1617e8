//! Balance, bet, and parlay ledger: placement, cash-out, and quoting.
//!
//! Every operation is atomic with respect to one user's balance and the
//! records it creates: operations on the same user serialize behind a
//! per-user lock, a failed operation leaves no partial side effects, and a
//! wager's odds are frozen at placement so later line movement never touches
//! a booked wager. Cash-out offers are never stored - each read draws a
//! fresh one, and acceptance pays the offer drawn at that moment.

use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;
use tokio::sync::Mutex as UserMutex;
use tracing::info;

use crate::domain::{
    cash_out_value, payout, AmericanOdds, Bet, BetId, BetType, GameId, OddsError, Parlay,
    ParlayId, UserId, WagerStatus,
};
use crate::error::LedgerError;
use crate::store::Storage;

type Result<T> = std::result::Result<T, LedgerError>;

/// A single-wager placement request, as validated by the request boundary.
#[derive(Debug, Clone)]
pub struct PlaceBet {
    pub game_id: GameId,
    pub bet_type: BetType,
    pub selection: String,
    pub odds: AmericanOdds,
    pub stake: Decimal,
    /// Payout agreed at the boundary; computed from the odds when absent.
    pub potential_payout: Option<Decimal>,
}

/// One leg of a parlay request. Legs carry no stake of their own.
#[derive(Debug, Clone)]
pub struct ParlayLeg {
    pub game_id: GameId,
    pub bet_type: BetType,
    pub selection: String,
    pub odds: AmericanOdds,
}

/// A parlay placement request: two or more legs, one stake.
#[derive(Debug, Clone)]
pub struct PlaceParlay {
    pub legs: Vec<ParlayLeg>,
    pub stake: Decimal,
    pub total_odds: AmericanOdds,
    /// Payout agreed at the boundary; computed from the odds when absent.
    pub potential_payout: Option<Decimal>,
}

/// A bet plus the cash-out offer current at read time.
#[derive(Debug, Clone)]
pub struct BetQuote {
    pub bet: Bet,
    /// Fresh offer for pending bets; `None` once settled.
    pub cash_out_value: Option<Decimal>,
}

/// A parlay with its legs and the cash-out offer current at read time.
#[derive(Debug, Clone)]
pub struct ParlayQuote {
    pub parlay: Parlay,
    pub legs: Vec<Bet>,
    /// Fresh offer for pending parlays; `None` once settled.
    pub cash_out_value: Option<Decimal>,
}

/// The wagering ledger.
pub struct Ledger {
    store: Arc<dyn Storage>,
    user_locks: DashMap<UserId, Arc<UserMutex<()>>>,
    rng: Mutex<StdRng>,
}

impl Ledger {
    pub fn new(store: Arc<dyn Storage>) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Use a caller-provided RNG for cash-out pricing (deterministic tests).
    pub fn with_rng(store: Arc<dyn Storage>, rng: StdRng) -> Self {
        Self {
            store,
            user_locks: DashMap::new(),
            rng: Mutex::new(rng),
        }
    }

    fn user_lock(&self, id: &UserId) -> Arc<UserMutex<()>> {
        self.user_locks
            .entry(id.clone())
            .or_insert_with(|| Arc::new(UserMutex::new(())))
            .clone()
    }

    fn draw_cash_out(&self, stake: Decimal, potential_payout: Decimal) -> Decimal {
        let mut rng = self.rng.lock();
        cash_out_value(stake, potential_payout, WagerStatus::Pending, &mut *rng)
    }

    /// Current balance for a user.
    pub async fn balance(&self, user_id: &UserId) -> Result<Decimal> {
        self.store
            .user(user_id)
            .await
            .map(|user| user.balance)
            .ok_or_else(|| not_found("user", user_id.as_str()))
    }

    /// Place a single wager: debit the stake and book the bet as pending.
    ///
    /// The odds in the request are the snapshot the bet is frozen at. No
    /// check is made that the game is still open for wagering.
    pub async fn place_bet(&self, user_id: &UserId, request: PlaceBet) -> Result<Bet> {
        if request.stake <= Decimal::ZERO {
            return Err(OddsError::NonPositiveStake {
                stake: request.stake,
            }
            .into());
        }

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let user = self
            .store
            .user(user_id)
            .await
            .ok_or_else(|| not_found("user", user_id.as_str()))?;
        if request.stake > user.balance {
            return Err(LedgerError::InsufficientBalance {
                stake: request.stake,
                balance: user.balance,
            });
        }
        if self.store.game(&request.game_id).await.is_none() {
            return Err(not_found("game", request.game_id.as_str()));
        }

        let potential_payout = match request.potential_payout {
            Some(agreed) => agreed,
            None => payout(request.stake, request.odds)?,
        };

        let bet = self
            .store
            .create_bet(Bet {
                id: BetId::generate(),
                user_id: user_id.clone(),
                game_id: request.game_id,
                bet_type: request.bet_type,
                selection: request.selection,
                odds: request.odds,
                stake: request.stake,
                potential_payout,
                status: WagerStatus::Pending,
                is_parlay: false,
                parlay_id: None,
                created_at: Utc::now(),
            })
            .await;
        self.store
            .set_balance(user_id, user.balance - request.stake)
            .await;

        info!(bet = %bet.id, user = %user_id, stake = %bet.stake, odds = %bet.odds, "Wager placed");
        Ok(bet)
    }

    /// Place a parlay: one debit, one parlay record, one zero-stake leg per
    /// selection.
    pub async fn place_parlay(&self, user_id: &UserId, request: PlaceParlay) -> Result<Parlay> {
        if request.legs.len() < 2 {
            return Err(LedgerError::TooFewLegs {
                count: request.legs.len(),
            });
        }
        if request.stake <= Decimal::ZERO {
            return Err(OddsError::NonPositiveStake {
                stake: request.stake,
            }
            .into());
        }

        let lock = self.user_lock(user_id);
        let _guard = lock.lock().await;

        let user = self
            .store
            .user(user_id)
            .await
            .ok_or_else(|| not_found("user", user_id.as_str()))?;
        if request.stake > user.balance {
            return Err(LedgerError::InsufficientBalance {
                stake: request.stake,
                balance: user.balance,
            });
        }

        let potential_payout = match request.potential_payout {
            Some(agreed) => agreed,
            None => payout(request.stake, request.total_odds)?,
        };

        let parlay = self
            .store
            .create_parlay(Parlay {
                id: ParlayId::generate(),
                user_id: user_id.clone(),
                total_odds: request.total_odds,
                stake: request.stake,
                potential_payout,
                status: WagerStatus::Pending,
                created_at: Utc::now(),
            })
            .await;

        for leg in request.legs {
            self.store
                .create_bet(Bet {
                    id: BetId::generate(),
                    user_id: user_id.clone(),
                    game_id: leg.game_id,
                    bet_type: leg.bet_type,
                    selection: leg.selection,
                    odds: leg.odds,
                    stake: Decimal::ZERO,
                    potential_payout: Decimal::ZERO,
                    status: WagerStatus::Pending,
                    is_parlay: true,
                    parlay_id: Some(parlay.id.clone()),
                    created_at: Utc::now(),
                })
                .await;
        }

        self.store
            .set_balance(user_id, user.balance - request.stake)
            .await;

        info!(parlay = %parlay.id, user = %user_id, stake = %parlay.stake, odds = %parlay.total_odds, "Parlay placed");
        Ok(parlay)
    }

    /// Cash out a pending bet at a freshly drawn offer, crediting the user.
    pub async fn cash_out_bet(&self, id: &BetId) -> Result<Decimal> {
        let owner = self
            .store
            .bet(id)
            .await
            .ok_or_else(|| not_found("bet", id.as_str()))?
            .user_id;
        let lock = self.user_lock(&owner);
        let _guard = lock.lock().await;

        // Re-read under the lock; a concurrent cash-out may have settled it.
        let bet = self
            .store
            .bet(id)
            .await
            .ok_or_else(|| not_found("bet", id.as_str()))?;
        if !bet.status.is_pending() {
            return Err(LedgerError::AlreadySettled { status: bet.status });
        }
        let user = self
            .store
            .user(&bet.user_id)
            .await
            .ok_or_else(|| not_found("user", bet.user_id.as_str()))?;

        let value = self.draw_cash_out(bet.stake, bet.potential_payout);
        self.store.set_bet_status(id, WagerStatus::CashedOut).await;
        self.store
            .set_balance(&bet.user_id, user.balance + value)
            .await;

        info!(bet = %id, user = %bet.user_id, value = %value, "Bet cashed out");
        Ok(value)
    }

    /// Cash out a pending parlay, forcing every leg to `cashed_out`.
    pub async fn cash_out_parlay(&self, id: &ParlayId) -> Result<Decimal> {
        let owner = self
            .store
            .parlay(id)
            .await
            .ok_or_else(|| not_found("parlay", id.as_str()))?
            .user_id;
        let lock = self.user_lock(&owner);
        let _guard = lock.lock().await;

        let parlay = self
            .store
            .parlay(id)
            .await
            .ok_or_else(|| not_found("parlay", id.as_str()))?;
        if !parlay.status.is_pending() {
            return Err(LedgerError::AlreadySettled {
                status: parlay.status,
            });
        }
        let user = self
            .store
            .user(&parlay.user_id)
            .await
            .ok_or_else(|| not_found("user", parlay.user_id.as_str()))?;

        let value = self.draw_cash_out(parlay.stake, parlay.potential_payout);
        self.store
            .set_parlay_status(id, WagerStatus::CashedOut)
            .await;

        // Legs never settle independently once the parent is cashed out.
        for leg in self.store.bets_for_parlay(id).await {
            self.store
                .set_bet_status(&leg.id, WagerStatus::CashedOut)
                .await;
        }

        self.store
            .set_balance(&parlay.user_id, user.balance + value)
            .await;

        info!(parlay = %id, user = %parlay.user_id, value = %value, "Parlay cashed out");
        Ok(value)
    }

    /// All of a user's bets, newest first, each pending one quoted with a
    /// fresh cash-out offer.
    pub async fn bets_for_user(&self, user_id: &UserId) -> Vec<BetQuote> {
        self.store
            .bets_for_user(user_id)
            .await
            .into_iter()
            .map(|bet| {
                let cash_out_value = bet
                    .status
                    .is_pending()
                    .then(|| self.draw_cash_out(bet.stake, bet.potential_payout));
                BetQuote {
                    bet,
                    cash_out_value,
                }
            })
            .collect()
    }

    /// All of a user's parlays with their legs, newest first, each pending
    /// one quoted with a fresh cash-out offer.
    pub async fn parlays_for_user(&self, user_id: &UserId) -> Vec<ParlayQuote> {
        let parlays = self.store.parlays_for_user(user_id).await;
        let mut quotes = Vec::with_capacity(parlays.len());
        for parlay in parlays {
            let legs = self.store.bets_for_parlay(&parlay.id).await;
            let cash_out_value = parlay
                .status
                .is_pending()
                .then(|| self.draw_cash_out(parlay.stake, parlay.potential_payout));
            quotes.push(ParlayQuote {
                parlay,
                legs,
                cash_out_value,
            });
        }
        quotes
    }
}

fn not_found(entity: &'static str, id: &str) -> LedgerError {
    LedgerError::NotFound {
        entity,
        id: id.to_string(),
    }
}
