//! The dealer: per-round rules, the shoe it deals from, round-activity
//! exclusivity, and the bankroll reserve it sets aside when a round starts.

use crate::card::{DealtCard, Rank};
use crate::error::GameError;
use crate::hand::Hand;
use crate::money::{Amount, Ratio};
use crate::player::Player;
use crate::shoe::CardSupplier;
use lazy_static::lazy_static;
use std::collections::HashSet;
use std::fmt;

/// Bankroll the dealer reserves per unit of player balance.
pub const RESERVE_MULTIPLIER: Ratio = Ratio::FIVE_TO_TWO;

/// Seats at a single physical table.
pub const MAX_PLAYERS_AT_TABLE: usize = 7;

/// An unordered pair of ranks. `(A, K)` and `(K, A)` are the same pair;
/// `(A, A)` is distinct from both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RankPair {
    low: Rank,
    high: Rank,
}

impl RankPair {
    pub fn new(a: Rank, b: Rank) -> RankPair {
        if a.ordinal() <= b.ordinal() {
            RankPair { low: a, high: b }
        } else {
            RankPair { low: b, high: a }
        }
    }

    /// The pair of a rank with itself.
    pub fn of(rank: Rank) -> RankPair {
        RankPair::new(rank, rank)
    }

    pub fn ranks(&self) -> (Rank, Rank) {
        (self.low, self.high)
    }
}

impl fmt::Display for RankPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.low, self.high)
    }
}

lazy_static! {
    /// Every equal-rank pair, the default split rule.
    static ref EQUAL_RANK_PAIRS: HashSet<RankPair> =
        Rank::ALL.iter().map(|rank| RankPair::of(*rank)).collect();
}

/// The immutable per-table configuration, built once (from parsed options in
/// the binaries) and handed to the dealer's constructor.
#[derive(Debug, Clone)]
pub struct TableRules {
    pub splittable_pairs: HashSet<RankPair>,
    pub reserve_multiplier: Ratio,
    pub max_players: usize,
}

impl Default for TableRules {
    fn default() -> TableRules {
        TableRules {
            splittable_pairs: EQUAL_RANK_PAIRS.clone(),
            reserve_multiplier: RESERVE_MULTIPLIER,
            max_players: MAX_PLAYERS_AT_TABLE,
        }
    }
}

/// A single dealer at a single table. One round may be in flight at a time;
/// callers must finish or abandon a round before starting another.
pub struct Dealer {
    rules: TableRules,
    shoe: Box<dyn CardSupplier>,
    active: bool,
    bankroll: Option<Amount>,
}

impl Dealer {
    pub fn new(rules: TableRules, shoe: Box<dyn CardSupplier>) -> Dealer {
        Dealer {
            rules,
            shoe,
            active: false,
            bankroll: None,
        }
    }

    pub fn rules(&self) -> &TableRules {
        &self.rules
    }

    /// Whether the dealer is currently mid-round.
    pub fn active(&self) -> bool {
        self.active
    }

    /// The bankroll reserve. None before the first round starts.
    pub fn bankroll(&self) -> Option<Amount> {
        self.bankroll
    }

    /// Whether the unordered pair of `a` and `b` is on the split list.
    pub fn is_splittable_pair(&self, a: Rank, b: Rank) -> bool {
        self.rules.splittable_pairs.contains(&RankPair::new(a, b))
    }

    /// Begin a round: reserve a bankroll of the players' summed balances
    /// times the reserve multiplier and mark the dealer active. Fails with an
    /// illegal-state kind while a round is already in flight.
    pub fn start(&mut self, players: &[Player]) -> Result<(), GameError> {
        if self.active {
            return Err(GameError::IllegalState(
                "dealer is already running a round".to_string(),
            ));
        }
        let mut players = players.iter();
        let first = players.next().ok_or_else(|| {
            GameError::IllegalArgument("a round needs at least one player".to_string())
        })?;
        let mut sum = first.balance();
        for player in players {
            sum = sum.add(player.balance())?;
        }
        self.bankroll = Some(sum.scaled(self.rules.reserve_multiplier));
        self.active = true;
        Ok(())
    }

    /// End the current round, making the dealer available again.
    pub fn finish(&mut self) {
        self.active = false;
    }

    /// Draw one card face up, or `None` when no round is active.
    pub fn tell_face_up_card(&mut self) -> Result<Option<DealtCard>, GameError> {
        if !self.active {
            return Ok(None);
        }
        self.shoe.next_card().map(Some)
    }

    /// Draw a card into `hand` face up, returning it for display.
    pub fn deal_face_up(&mut self, hand: &mut Hand) -> Result<DealtCard, GameError> {
        let card = self.shoe.next_card()?;
        hand.add(card)?;
        Ok(card)
    }

    /// Draw a card into `hand` face down: the card stays unshown.
    pub fn deal_face_down(&mut self, hand: &mut Hand) -> Result<(), GameError> {
        let card = self.shoe.next_card()?;
        hand.add(card)
    }

    pub fn shoe(&self) -> &dyn CardSupplier {
        self.shoe.as_ref()
    }
}
