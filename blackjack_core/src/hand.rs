//! The hand engine: an ordered run of cards tied to one wager, with the
//! score recomputed from scratch after every card.

use crate::card::{DealtCard, Rank};
use crate::dealer::Dealer;
use crate::error::GameError;
use crate::wager::{Outcome, Settlement, Wager};

/// Sum of card values with the soft-ace promotion: aces tally 1 each and, if
/// at least one ace is present while the raw sum is below 12, one of them is
/// promoted to 11. The promotion is always beneficial and can never bust a
/// hand whose raw sum is at most 11.
pub fn hand_total(cards: &[DealtCard]) -> u8 {
    let mut total = 0u8;
    let mut aces = 0u8;
    for card in cards {
        total += card.value();
        if card.rank() == Rank::Ace {
            aces += 1;
        }
    }
    if aces > 0 && total < 12 {
        total += 10;
    }
    total
}

/// Status a total maps to: open below 21, won at exactly 21, busted above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandShape {
    Open,
    Won,
    Busted,
}

/// Classify a hand total.
pub fn shape_of(total: u8) -> HandShape {
    if total < 21 {
        HandShape::Open
    } else if total == 21 {
        HandShape::Won
    } else {
        HandShape::Busted
    }
}

/// One player hand: cards in acquisition order, exactly one wager, and an
/// independent settled mark used to exclude the hand from active-hand counts.
#[derive(Debug)]
pub struct Hand {
    cards: Vec<DealtCard>,
    wager: Wager,
    total: u8,
    settled_mark: bool,
}

impl Hand {
    pub fn new(wager: Wager) -> Hand {
        Hand {
            cards: Vec::new(),
            wager,
            total: 0,
            settled_mark: false,
        }
    }

    pub fn cards(&self) -> &[DealtCard] {
        &self.cards
    }

    pub fn wager(&self) -> &Wager {
        &self.wager
    }

    /// Current total, 0 for an empty hand.
    pub fn cards_value(&self) -> u8 {
        self.total
    }

    pub fn is_open_hand(&self) -> bool {
        shape_of(self.total) == HandShape::Open
    }

    pub fn is_winning_hand(&self) -> bool {
        shape_of(self.total) == HandShape::Won
    }

    pub fn is_busted_hand(&self) -> bool {
        shape_of(self.total) == HandShape::Busted
    }

    /// Logical complement of [`Hand::is_open_hand`] in every reachable state.
    pub fn is_closed_hand(&self) -> bool {
        !self.is_open_hand()
    }

    /// A two-card 21: an ace plus a ten-value card off the opening deal.
    pub fn is_natural_blackjack(&self) -> bool {
        self.cards.len() == 2 && self.is_winning_hand()
    }

    /// Take one more card. Fails with an illegal-state kind once the hand has
    /// won or busted, and with an illegal-argument kind if this exact card
    /// instance is already in the hand (a value-equal card from another deck
    /// is fine).
    pub fn add(&mut self, card: DealtCard) -> Result<(), GameError> {
        if !self.is_open_hand() {
            return Err(GameError::IllegalState(
                "cannot add a card to a closed hand".to_string(),
            ));
        }
        if self.cards.iter().any(|held| held.id() == card.id()) {
            return Err(GameError::IllegalArgument(format!(
                "the {} is already in this hand",
                card.card().name()
            )));
        }
        self.cards.push(card);
        self.total = hand_total(&self.cards);
        Ok(())
    }

    /// Whether the dealer's rules allow this hand to split: exactly two
    /// cards whose unordered rank pair is on the dealer's list.
    pub fn is_splittable_hand(&self, dealer: &Dealer) -> bool {
        self.cards.len() == 2
            && dealer.is_splittable_pair(self.cards[0].rank(), self.cards[1].rank())
    }

    /// Split into two one-card hands. The last-acquired card moves into the
    /// returned hand; both hands get fresh unsettled wagers of the original
    /// amount, so the total action on the table doubles.
    pub fn split(&mut self, dealer: &Dealer) -> Result<Hand, GameError> {
        if !self.is_splittable_hand(dealer) {
            return Err(GameError::IllegalState(
                "hand is not splittable".to_string(),
            ));
        }
        let amount = self.wager.amount();
        let moved = self
            .cards
            .pop()
            .ok_or_else(|| GameError::IllegalState("hand is not splittable".to_string()))?;
        self.total = hand_total(&self.cards);
        self.wager = Wager::new(amount)?;

        let mut split_off = Hand::new(Wager::new(amount)?);
        split_off.add(moved)?;
        Ok(split_off)
    }

    /// Replace the wager with its doubled successor. Fails once the wager is
    /// settled or already part of a doubled lineage.
    pub fn double_down(&mut self) -> Result<(), GameError> {
        let doubled = self.wager.double_down()?;
        self.wager = doubled;
        Ok(())
    }

    /// Settle this hand's wager with `outcome`.
    pub fn settle_wager(&mut self, outcome: Outcome) -> Result<Settlement, GameError> {
        self.wager.settle(outcome)
    }

    /// Mark the hand itself as settled. Independent of the wager's own
    /// settlement state.
    pub fn mark_settled(&mut self) {
        self.settled_mark = true;
    }

    pub fn is_settled_hand(&self) -> bool {
        self.settled_mark
    }

    /// The wager's settlement, readable only after the hand has been marked
    /// settled.
    pub fn settlement(&self) -> Result<Settlement, GameError> {
        if !self.settled_mark {
            return Err(GameError::IllegalState(
                "hand has not been marked settled".to_string(),
            ));
        }
        self.wager.settlement()
    }
}
