//! American-odds pricing: validation, decimal conversion, parlay combination.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from odds and payout arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OddsError {
    #[error("odds {value} fall inside the pick'em band (-101, 101)")]
    DeadZone { value: i32 },

    #[error("stake must be positive, got {stake}")]
    NonPositiveStake { stake: Decimal },

    #[error("cannot combine an empty set of legs")]
    NoLegs,

    #[error("decimal odds {value} do not price a payable line")]
    InvalidDecimal { value: Decimal },
}

/// American-style odds: positive is profit per 100 staked, negative is the
/// stake required per 100 profit.
///
/// The magnitude is always at least 101; the pick'em band `(-101, 101)` is
/// unrepresentable. Construction goes through [`AmericanOdds::new`] (which
/// rejects the band) or [`AmericanOdds::clamped`] (which clamps outward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i32", into = "i32")]
pub struct AmericanOdds(i32);

impl AmericanOdds {
    /// Smallest representable odds magnitude.
    pub const MIN_MAGNITUDE: i32 = 101;

    /// Validate a raw line, rejecting the pick'em band.
    pub fn new(value: i32) -> Result<Self, OddsError> {
        if Self::in_dead_zone(value) {
            Err(OddsError::DeadZone { value })
        } else {
            Ok(Self(value))
        }
    }

    /// Clamp a raw line into the valid band.
    ///
    /// Values inside the pick'em band move outward to the boundary on their
    /// side of zero; exact zero falls to -101.
    #[must_use]
    pub fn clamped(value: i32) -> Self {
        if Self::in_dead_zone(value) {
            if value > 0 {
                Self(Self::MIN_MAGNITUDE)
            } else {
                Self(-Self::MIN_MAGNITUDE)
            }
        } else {
            Self(value)
        }
    }

    /// True when `value` lies in `(-101, 101)`.
    #[must_use]
    pub fn in_dead_zone(value: i32) -> bool {
        value > -Self::MIN_MAGNITUDE && value < Self::MIN_MAGNITUDE
    }

    /// Get the underlying signed line.
    #[must_use]
    pub fn value(self) -> i32 {
        self.0
    }

    /// Shift the line by `delta`, clamping the result out of the pick'em band.
    #[must_use]
    pub fn shifted(self, delta: i32) -> Self {
        Self::clamped(self.0 + delta)
    }

    /// Decimal payout multiplier for this line: `1 + odds/100` when positive,
    /// `1 + 100/|odds|` when negative.
    #[must_use]
    pub fn decimal(self) -> Decimal {
        if self.0 > 0 {
            Decimal::ONE + Decimal::from(self.0) / Decimal::ONE_HUNDRED
        } else {
            Decimal::ONE + Decimal::ONE_HUNDRED / Decimal::from(self.0.abs())
        }
    }

    /// Convert a decimal multiplier back to an American line.
    ///
    /// Multipliers of 2.0 and above price as underdog lines
    /// (`round((d-1)*100)`), anything between 1 and 2 as favorite lines
    /// (`round(-100/(d-1))`). A result that rounds into the pick'em band is
    /// clamped outward like any other line. Multipliers at or below 1 cannot
    /// pay and are rejected.
    pub fn from_decimal(value: Decimal) -> Result<Self, OddsError> {
        if value <= Decimal::ONE {
            return Err(OddsError::InvalidDecimal { value });
        }
        let raw = if value >= Decimal::TWO {
            (value - Decimal::ONE) * Decimal::ONE_HUNDRED
        } else {
            -Decimal::ONE_HUNDRED / (value - Decimal::ONE)
        };
        let raw = raw
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i32()
            .ok_or(OddsError::InvalidDecimal { value })?;
        Ok(Self::clamped(raw))
    }
}

impl fmt::Display for AmericanOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 > 0 {
            write!(f, "+{}", self.0)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl TryFrom<i32> for AmericanOdds {
    type Error = OddsError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AmericanOdds> for i32 {
    fn from(odds: AmericanOdds) -> Self {
        odds.value()
    }
}

/// Combine legs into a single parlay line: multiply the legs' decimal
/// multipliers, then convert the product back to American odds.
pub fn combine(legs: &[AmericanOdds]) -> Result<AmericanOdds, OddsError> {
    if legs.is_empty() {
        return Err(OddsError::NoLegs);
    }
    let product = legs
        .iter()
        .fold(Decimal::ONE, |acc, leg| acc * leg.decimal());
    AmericanOdds::from_decimal(product)
}
