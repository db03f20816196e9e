//! Currency-tagged amounts in minor units (cents). Wagers, balances and the
//! dealer's bankroll all speak in `Amount`; combining amounts of different
//! currencies fails rather than silently converting.

use crate::error::GameError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Currency of an `Amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn symbol(&self) -> char {
        match self {
            Currency::Usd => '$',
            Currency::Eur => '€',
            Currency::Gbp => '£',
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A rational scaling factor, used for payout multipliers and the dealer's
/// bankroll reserve. Kept as a ratio so amounts stay in integer minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ratio {
    num: i64,
    den: i64,
}

impl Ratio {
    /// 1:1, an even-money payout.
    pub const ONE_TO_ONE: Ratio = Ratio { num: 1, den: 1 };
    /// 3:2, the natural-blackjack payout.
    pub const THREE_TO_TWO: Ratio = Ratio { num: 3, den: 2 };
    /// 5:2, the default bankroll reserve multiplier.
    pub const FIVE_TO_TWO: Ratio = Ratio { num: 5, den: 2 };

    pub fn new(num: i64, den: i64) -> Result<Ratio, GameError> {
        if den == 0 {
            return Err(GameError::IllegalArgument(
                "ratio denominator must not be zero".to_string(),
            ));
        }
        Ok(Ratio { num, den })
    }

    pub fn num(&self) -> i64 {
        self.num
    }

    pub fn den(&self) -> i64 {
        self.den
    }
}

impl fmt::Display for Ratio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.num, self.den)
    }
}

/// An amount of money in minor units, tagged with its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    minor: i64,
    currency: Currency,
}

impl Amount {
    /// Amount from minor units (cents).
    pub fn new(minor: i64, currency: Currency) -> Amount {
        Amount { minor, currency }
    }

    /// Amount from major units (whole dollars/euros/pounds).
    pub fn from_major(major: i64, currency: Currency) -> Amount {
        Amount {
            minor: major * 100,
            currency,
        }
    }

    pub fn zero(currency: Currency) -> Amount {
        Amount { minor: 0, currency }
    }

    pub fn minor_units(&self) -> i64 {
        self.minor
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn is_zero(&self) -> bool {
        self.minor == 0
    }

    pub fn is_positive(&self) -> bool {
        self.minor > 0
    }

    pub fn is_negative(&self) -> bool {
        self.minor < 0
    }

    fn require_same_currency(&self, other: &Amount) -> Result<(), GameError> {
        if self.currency != other.currency {
            return Err(GameError::ConversionNeeded(self.currency, other.currency));
        }
        Ok(())
    }

    /// Sum of two amounts of the same currency.
    pub fn add(self, other: Amount) -> Result<Amount, GameError> {
        self.require_same_currency(&other)?;
        Ok(Amount {
            minor: self.minor + other.minor,
            currency: self.currency,
        })
    }

    pub fn negated(self) -> Amount {
        Amount {
            minor: -self.minor,
            currency: self.currency,
        }
    }

    /// Scalar multiplication.
    pub fn times(self, factor: i64) -> Amount {
        Amount {
            minor: self.minor * factor,
            currency: self.currency,
        }
    }

    /// Scalar division, truncating toward zero.
    pub fn divided(self, divisor: i64) -> Result<Amount, GameError> {
        if divisor == 0 {
            return Err(GameError::IllegalArgument(
                "cannot divide an amount by zero".to_string(),
            ));
        }
        Ok(Amount {
            minor: self.minor / divisor,
            currency: self.currency,
        })
    }

    /// Scale by a ratio, e.g. a 3:2 payout.
    pub fn scaled(self, ratio: Ratio) -> Amount {
        Amount {
            minor: self.minor * ratio.num / ratio.den,
            currency: self.currency,
        }
    }

    /// Ordering against another amount of the same currency.
    pub fn compare(&self, other: &Amount) -> Result<Ordering, GameError> {
        self.require_same_currency(other)?;
        Ok(self.minor.cmp(&other.minor))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor < 0 { "-" } else { "" };
        let magnitude = self.minor.abs();
        write!(
            f,
            "{}{}{}.{:02}",
            sign,
            self.currency.symbol(),
            magnitude / 100,
            magnitude % 100
        )
    }
}
