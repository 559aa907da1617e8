//! Stake/payout arithmetic and cash-out valuation.

use rand::Rng;
use rust_decimal::{Decimal, RoundingStrategy};

use super::odds::{AmericanOdds, OddsError};
use super::wager::WagerStatus;

/// Round an amount to cents, half away from zero.
#[must_use]
pub fn round_currency(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Total returned to the bettor when a wager at `odds` wins: the stake plus
/// the profit the line promises.
pub fn payout(stake: Decimal, odds: AmericanOdds) -> Result<Decimal, OddsError> {
    if stake <= Decimal::ZERO {
        return Err(OddsError::NonPositiveStake { stake });
    }
    Ok(round_currency(stake * odds.decimal()))
}

/// Present value offered to settle a pending wager early.
///
/// The factor is drawn fresh from `[0.3, 0.8)` on every call: an offer is
/// only good at the moment it was computed, and two consecutive reads of the
/// same wager will quote differently. Settled wagers price at zero.
pub fn cash_out_value<R: Rng + ?Sized>(
    stake: Decimal,
    potential_payout: Decimal,
    status: WagerStatus,
    rng: &mut R,
) -> Decimal {
    if status != WagerStatus::Pending {
        return Decimal::ZERO;
    }
    // Uniform over [0.3000, 0.8000) at basis-point granularity.
    let factor = Decimal::new(rng.gen_range(3_000..8_000), 4);
    round_currency(stake + (potential_payout - stake) * factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rust_decimal_macros::dec;

    fn odds(value: i32) -> AmericanOdds {
        AmericanOdds::new(value).expect("valid odds")
    }

    #[test]
    fn payout_positive_odds() {
        assert_eq!(payout(dec!(100), odds(150)).unwrap(), dec!(250.00));
    }

    #[test]
    fn payout_negative_odds() {
        assert_eq!(payout(dec!(100), odds(-150)).unwrap(), dec!(166.67));
    }

    #[test]
    fn payout_parlay_line() {
        // +150 and -200 combine to +275; $20 returns $75.00.
        assert_eq!(payout(dec!(20), odds(275)).unwrap(), dec!(75.00));
    }

    #[test]
    fn payout_never_below_stake() {
        for value in [101, 150, 1500, -101, -110, -400] {
            let stake = dec!(37.50);
            assert!(payout(stake, odds(value)).unwrap() >= stake);
        }
    }

    #[test]
    fn payout_rejects_non_positive_stake() {
        assert_eq!(
            payout(dec!(0), odds(150)),
            Err(OddsError::NonPositiveStake { stake: dec!(0) })
        );
        assert!(payout(dec!(-5), odds(150)).is_err());
    }

    #[test]
    fn cash_out_stays_in_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let stake = dec!(50);
        let potential = dec!(150);
        for _ in 0..500 {
            let value = cash_out_value(stake, potential, WagerStatus::Pending, &mut rng);
            // stake + (potential - stake) * [0.3, 0.8)
            assert!(value >= dec!(80.00), "offer {value} below band");
            assert!(value < dec!(130.00), "offer {value} above band");
        }
    }

    #[test]
    fn cash_out_recomputes_per_call() {
        let mut rng = StdRng::seed_from_u64(42);
        let first = cash_out_value(dec!(50), dec!(150), WagerStatus::Pending, &mut rng);
        let second = cash_out_value(dec!(50), dec!(150), WagerStatus::Pending, &mut rng);
        assert_ne!(first, second);
    }

    #[test]
    fn cash_out_zero_unless_pending() {
        let mut rng = StdRng::seed_from_u64(1);
        for status in [
            WagerStatus::Won,
            WagerStatus::Lost,
            WagerStatus::CashedOut,
        ] {
            assert_eq!(
                cash_out_value(dec!(50), dec!(150), status, &mut rng),
                Decimal::ZERO
            );
        }
    }
}
