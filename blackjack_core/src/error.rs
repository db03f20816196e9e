use crate::money::Currency;
use thiserror::Error;

/// Error type for every fallible operation in the engine. All failures are
/// local and synchronous; callers are expected to check the matching
/// precondition (`has_next`, `is_open_hand`, `is_splittable_hand`,
/// `is_settled_hand`) when they want to avoid the failure path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    /// Drawing from a shoe with no cards left in play. The only failure mode
    /// of a draw.
    #[error("the shoe is exhausted")]
    Exhausted,

    /// An operation was called on an object whose lifecycle does not permit
    /// it, e.g. adding a card to a closed hand or settling a settled wager.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// A well-formed but unacceptable input, e.g. a non-positive wager amount
    /// or a cutoff larger than the shoe.
    #[error("illegal argument: {0}")]
    IllegalArgument(String),

    /// A malformed quantity, e.g. a negative deck count. Distinct from
    /// `IllegalArgument`, which covers in-domain values that are merely out
    /// of range.
    #[error("invalid size: {0}")]
    InvalidSize(String),

    /// A required collaborator was never supplied, e.g. building a round
    /// without a dealer.
    #[error("missing {0}")]
    Missing(&'static str),

    /// Arithmetic between amounts of different currencies.
    #[error("cannot combine {0} with {1} without conversion")]
    ConversionNeeded(Currency, Currency),
}
