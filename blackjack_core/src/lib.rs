//! Core engine for a casino blackjack table: a multi-deck shoe with a
//! plastic-card cutoff, hands with live soft-ace scoring, wagers with a
//! one-shot settlement state machine (double-down and insurance included),
//! and the dealer/round orchestration around them.
//!
//! The engine is single-threaded, turn-based and free of I/O; the
//! interactive console table and the HTTP card-dealing service live in the
//! `blackjack_table` crate and drive everything through the public
//! contracts here.

pub mod card;
pub mod dealer;
pub mod error;
pub mod hand;
pub mod money;
pub mod player;
pub mod round;
pub mod shoe;
pub mod wager;

pub use card::{Card, CardId, Color, DealtCard, Rank, ShoeId, Suit};
pub use dealer::{Dealer, RankPair, TableRules, MAX_PLAYERS_AT_TABLE, RESERVE_MULTIPLIER};
pub use error::GameError;
pub use hand::{hand_total, shape_of, Hand, HandShape};
pub use money::{Amount, Currency, Ratio};
pub use player::Player;
pub use round::{Round, RoundBuilder};
pub use shoe::{CardSupplier, Deck, Shoe, DECK_SIZE};
pub use wager::{Outcome, Settlement, Wager};

pub mod prelude {
    pub use crate::card::{Card, CardId, DealtCard, Rank, ShoeId, Suit};
    pub use crate::dealer::{Dealer, RankPair, TableRules};
    pub use crate::error::GameError;
    pub use crate::hand::{hand_total, Hand, HandShape};
    pub use crate::money::{Amount, Currency, Ratio};
    pub use crate::player::Player;
    pub use crate::round::{Round, RoundBuilder};
    pub use crate::shoe::{CardSupplier, Shoe, DECK_SIZE};
    pub use crate::wager::{Outcome, Settlement, Wager};
}
