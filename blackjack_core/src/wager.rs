//! The wager settlement state machine: unsettled until exactly one
//! [`Wager::settle`] call, with double-down modelled as replacing the wager
//! by a doubled successor.

use crate::error::GameError;
use crate::money::{Amount, Ratio};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a wager resolved. Each outcome maps to a payout delta against the
/// wager's face amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Two-card 21 on the opening deal, paid 3:2.
    NaturalBlackjack,
    /// A 21 reached after the opening deal, paid even money.
    Blackjack,
    /// Beat the dealer's total (or the dealer busted), paid even money.
    BetterScore,
    /// Insurance side bet won, paid even money.
    InsuranceWon,
    /// Tie below 21; no money changes hands.
    Standoff,
    /// Superseded by a double-down; no money changes hands.
    Replaced,
    /// Insurance side bet lost.
    InsuranceLost,
    /// Went over 21.
    Bust,
    /// Lost to the dealer's total.
    LowerScore,
}

impl Outcome {
    /// The payout delta for a wager of `amount`: positive for a win,
    /// negative for a loss, zero for a standoff or a replaced wager.
    pub fn payout(&self, amount: Amount) -> Amount {
        match self {
            Outcome::NaturalBlackjack => amount.scaled(Ratio::THREE_TO_TWO),
            Outcome::Blackjack | Outcome::BetterScore | Outcome::InsuranceWon => amount,
            Outcome::Standoff | Outcome::Replaced => Amount::zero(amount.currency()),
            Outcome::InsuranceLost | Outcome::Bust | Outcome::LowerScore => amount.negated(),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Outcome::NaturalBlackjack => "natural blackjack",
            Outcome::Blackjack => "blackjack",
            Outcome::BetterScore => "better score",
            Outcome::InsuranceWon => "insurance won",
            Outcome::Standoff => "standoff",
            Outcome::Replaced => "replaced",
            Outcome::InsuranceLost => "insurance lost",
            Outcome::Bust => "bust",
            Outcome::LowerScore => "lower score",
        };
        write!(f, "{}", label)
    }
}

/// The result of settling a wager: the outcome and the computed payout
/// delta. A plain value, not a handle into the wager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settlement {
    outcome: Outcome,
    payout: Amount,
}

impl Settlement {
    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn payout(&self) -> Amount {
        self.payout
    }
}

impl fmt::Display for Settlement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.outcome, self.payout)
    }
}

/// A positive amount riding on one hand. Settling is a one-shot transition;
/// doubling down settles the wager with [`Outcome::Replaced`] and hands back
/// a fresh wager of twice the amount.
#[derive(Debug)]
pub struct Wager {
    amount: Amount,
    insurance: bool,
    doubled: bool,
    settlement: Option<Settlement>,
}

impl Wager {
    /// A plain wager. Fails with an illegal-argument kind unless the amount
    /// is positive.
    pub fn new(amount: Amount) -> Result<Wager, GameError> {
        if !amount.is_positive() {
            return Err(GameError::IllegalArgument(format!(
                "wager amount {} must be positive",
                amount
            )));
        }
        Ok(Wager {
            amount,
            insurance: false,
            doubled: false,
            settlement: None,
        })
    }

    /// An insurance side wager.
    pub fn with_insurance(amount: Amount) -> Result<Wager, GameError> {
        let mut wager = Wager::new(amount)?;
        wager.insurance = true;
        Ok(wager)
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn is_insurance(&self) -> bool {
        self.insurance
    }

    pub fn is_settled(&self) -> bool {
        self.settlement.is_some()
    }

    /// Settle the wager. One-shot: a second call fails with an illegal-state
    /// kind.
    pub fn settle(&mut self, outcome: Outcome) -> Result<Settlement, GameError> {
        if self.settlement.is_some() {
            return Err(GameError::IllegalState(
                "wager is already settled".to_string(),
            ));
        }
        let settlement = Settlement {
            outcome,
            payout: outcome.payout(self.amount),
        };
        self.settlement = Some(settlement);
        Ok(settlement)
    }

    /// The settlement, once one exists.
    pub fn settlement(&self) -> Result<Settlement, GameError> {
        self.settlement.ok_or_else(|| {
            GameError::IllegalState("wager has not been settled".to_string())
        })
    }

    /// Replace this wager with one of double the amount. Settles `self` with
    /// [`Outcome::Replaced`] and returns the successor. One-shot per wager
    /// lineage: neither a settled wager nor a doubled successor may double
    /// again.
    pub fn double_down(&mut self) -> Result<Wager, GameError> {
        if self.settlement.is_some() {
            return Err(GameError::IllegalState(
                "cannot double down on a settled wager".to_string(),
            ));
        }
        if self.doubled {
            return Err(GameError::IllegalState(
                "wager was already doubled down".to_string(),
            ));
        }
        self.settle(Outcome::Replaced)?;
        Ok(Wager {
            amount: self.amount.times(2),
            insurance: self.insurance,
            doubled: true,
            settlement: None,
        })
    }
}
