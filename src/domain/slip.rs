//! Per-session wager composer: candidate legs and a parlay preview.
//!
//! A [`BetSlip`] is an ephemeral, client-side aggregation - it never touches
//! the ledger. Each session owns its own instance; there is no shared slip
//! state between sessions.

use rust_decimal::Decimal;

use super::ids::GameId;
use super::odds::{combine, AmericanOdds};
use super::payout::payout;
use super::wager::BetType;

/// Uniqueness key for a slip entry: one selection per game, bet type, and side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SlipKey {
    pub game_id: GameId,
    pub bet_type: BetType,
    pub selection: String,
}

/// A candidate leg on the slip, with the display fields a preview needs.
#[derive(Debug, Clone, PartialEq)]
pub struct SlipItem {
    pub game_id: GameId,
    pub home_team: String,
    pub away_team: String,
    pub bet_type: BetType,
    pub selection: String,
    pub display_selection: String,
    pub odds: AmericanOdds,
    pub stake: Decimal,
}

impl SlipItem {
    /// The uniqueness key for this leg.
    #[must_use]
    pub fn key(&self) -> SlipKey {
        SlipKey {
            game_id: self.game_id.clone(),
            bet_type: self.bet_type,
            selection: self.selection.clone(),
        }
    }
}

/// The composer itself: an ordered list of unique candidate legs.
#[derive(Debug, Default)]
pub struct BetSlip {
    items: Vec<SlipItem>,
}

impl BetSlip {
    /// Create an empty slip.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a leg, or remove it when the same key is already selected.
    ///
    /// Newly added legs always start with a zero stake.
    pub fn toggle(&mut self, mut item: SlipItem) {
        let key = item.key();
        if self.is_selected(&key) {
            self.remove(&key);
        } else {
            item.stake = Decimal::ZERO;
            self.items.push(item);
        }
    }

    /// Remove the leg with the given key, if present.
    pub fn remove(&mut self, key: &SlipKey) {
        self.items.retain(|item| item.key() != *key);
    }

    /// Set the stake on one leg. Returns false when the key is not on the slip.
    pub fn set_stake(&mut self, key: &SlipKey, stake: Decimal) -> bool {
        match self.items.iter_mut().find(|item| item.key() == *key) {
            Some(item) => {
                item.stake = stake;
                true
            }
            None => false,
        }
    }

    /// Drop every leg.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// True when a leg with this key is on the slip.
    #[must_use]
    pub fn is_selected(&self, key: &SlipKey) -> bool {
        self.items.iter().any(|item| item.key() == *key)
    }

    /// The current legs, in selection order.
    #[must_use]
    pub fn items(&self) -> &[SlipItem] {
        &self.items
    }

    /// Number of legs on the slip.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the stakes across all legs.
    #[must_use]
    pub fn total_stake(&self) -> Decimal {
        self.items
            .iter()
            .fold(Decimal::ZERO, |acc, item| acc + item.stake)
    }

    /// Combined line over the current legs; `None` on an empty slip.
    #[must_use]
    pub fn parlay_odds(&self) -> Option<AmericanOdds> {
        let legs: Vec<AmericanOdds> = self.items.iter().map(|item| item.odds).collect();
        combine(&legs).ok()
    }

    /// Combined payout preview; zero until there are 2+ legs and stake down.
    #[must_use]
    pub fn parlay_payout(&self) -> Decimal {
        if self.items.len() < 2 {
            return Decimal::ZERO;
        }
        let total = self.total_stake();
        if total <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.parlay_odds()
            .and_then(|odds| payout(total, odds).ok())
            .unwrap_or(Decimal::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Sport;
    use crate::testkit::domain::{live_game, slip_item};
    use rust_decimal_macros::dec;

    #[test]
    fn toggle_adds_then_removes() {
        let game = live_game(Sport::Basketball);
        let mut slip = BetSlip::new();
        let item = slip_item(&game, 150);

        slip.toggle(item.clone());
        assert_eq!(slip.len(), 1);
        assert!(slip.is_selected(&item.key()));

        // Same key toggles it back off.
        slip.toggle(item.clone());
        assert!(slip.is_empty());
        assert!(!slip.is_selected(&item.key()));
    }

    #[test]
    fn toggle_resets_the_incoming_stake() {
        let game = live_game(Sport::Basketball);
        let mut slip = BetSlip::new();
        let mut item = slip_item(&game, 150);
        item.stake = dec!(50);

        slip.toggle(item);
        assert_eq!(slip.items()[0].stake, Decimal::ZERO);
    }

    #[test]
    fn distinct_selections_coexist() {
        let game = live_game(Sport::Basketball);
        let mut slip = BetSlip::new();
        let mut home = slip_item(&game, -110);
        let mut away = slip_item(&game, -110);
        home.selection = "home".into();
        away.selection = "away".into();

        slip.toggle(home);
        slip.toggle(away);
        assert_eq!(slip.len(), 2);
    }

    #[test]
    fn set_stake_and_totals() {
        let game = live_game(Sport::Football);
        let mut slip = BetSlip::new();
        let item = slip_item(&game, 150);
        slip.toggle(item.clone());

        assert!(slip.set_stake(&item.key(), dec!(25)));
        assert_eq!(slip.total_stake(), dec!(25));

        let other = live_game(Sport::Baseball);
        let unknown = slip_item(&other, -110);
        assert!(!slip.set_stake(&unknown.key(), dec!(10)));
    }

    #[test]
    fn parlay_preview_needs_two_legs() {
        let game = live_game(Sport::Basketball);
        let mut slip = BetSlip::new();
        let item = slip_item(&game, 150);
        slip.toggle(item.clone());
        slip.set_stake(&item.key(), dec!(20));

        // A single leg still shows its own line but no parlay payout.
        assert_eq!(slip.parlay_odds().unwrap().value(), 150);
        assert_eq!(slip.parlay_payout(), Decimal::ZERO);
    }

    #[test]
    fn parlay_preview_combines_legs() {
        let first = live_game(Sport::Basketball);
        let second = live_game(Sport::Football);
        let mut slip = BetSlip::new();
        let plus = slip_item(&first, 150);
        let minus = slip_item(&second, -200);
        slip.toggle(plus.clone());
        slip.toggle(minus);
        slip.set_stake(&plus.key(), dec!(20));

        // 2.5 * 1.5 = 3.75 -> +275; $20 at +275 returns $75.00.
        assert_eq!(slip.parlay_odds().unwrap().value(), 275);
        assert_eq!(slip.parlay_payout(), dec!(75.00));
    }

    #[test]
    fn clear_empties_the_slip() {
        let game = live_game(Sport::Soccer);
        let mut slip = BetSlip::new();
        slip.toggle(slip_item(&game, 150));
        slip.clear();
        assert!(slip.is_empty());
        assert_eq!(slip.parlay_odds(), None);
    }
}
