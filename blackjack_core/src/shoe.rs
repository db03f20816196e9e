//! The multi-deck dispenser. A shoe is built from N independently shuffled
//! decks, shuffled again as a whole, then cut: the last `cutoff` cards sit
//! under the plastic card and never enter play.

use crate::card::{Card, CardId, DealtCard, Rank, ShoeId, Suit};
use crate::error::GameError;
use rand::seq::SliceRandom;
use rand::Rng;

/// Cards in one standard deck.
pub const DECK_SIZE: usize = 52;

/// The boundary contract for anything that can feed cards to a dealer.
/// Implemented by [`Shoe`]; test rigs and alternate suppliers implement it
/// too.
pub trait CardSupplier {
    /// True while at least one card remains in play.
    fn has_next(&self) -> bool;

    /// The next card. Exhaustion is the only failure mode.
    fn next_card(&mut self) -> Result<DealtCard, GameError>;

    /// Cards still available to deal, 0 when exhausted.
    fn count_remaining(&self) -> usize;

    /// Whether this specific card instance originated here, dealt or not.
    fn provenance(&self, card: &DealtCard) -> bool;
}

/// One 52-card deck, shuffled at construction. The card vector doubles as the
/// identity arena: a card's slot index in it is stable for the life of the
/// shoe.
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    fn shuffled(rng: &mut impl Rng) -> Deck {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                cards.push(Card::new(rank, suit));
            }
        }
        cards.shuffle(rng);
        Deck { cards }
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

/// A shoe of `deck_count` decks with a plastic-card cutoff. Draws advance a
/// monotonic cursor; the cards removed by the cutoff stay in the deck arenas
/// (so provenance still recognises them) but are unreachable through
/// [`CardSupplier::next_card`].
pub struct Shoe {
    id: ShoeId,
    decks: Vec<Deck>,
    order: Vec<CardId>,
    cursor: usize,
}

impl Shoe {
    /// Build a shuffled shoe. Fails with an illegal-argument kind when
    /// `deck_count` is zero or `cutoff` exceeds the cards available.
    pub fn new(deck_count: usize, cutoff: usize) -> Result<Shoe, GameError> {
        Shoe::with_rng(deck_count, cutoff, &mut rand::thread_rng())
    }

    /// As [`Shoe::new`], drawing randomness from the caller. Tests pass a
    /// seeded `StdRng` for reproducible orderings.
    pub fn with_rng(deck_count: usize, cutoff: usize, rng: &mut impl Rng) -> Result<Shoe, GameError> {
        if deck_count == 0 {
            return Err(GameError::IllegalArgument(
                "a shoe needs at least one deck".to_string(),
            ));
        }
        let total = deck_count * DECK_SIZE;
        if cutoff > total {
            return Err(GameError::IllegalArgument(format!(
                "cutoff {} exceeds the {} cards available",
                cutoff, total
            )));
        }

        let id = ShoeId::next();
        let decks: Vec<Deck> = (0..deck_count).map(|_| Deck::shuffled(rng)).collect();

        let mut order = Vec::with_capacity(total);
        for deck in 0..deck_count {
            for slot in 0..DECK_SIZE {
                order.push(CardId::new(id, deck as u8, slot as u8));
            }
        }
        order.shuffle(rng);
        order.truncate(total - cutoff);

        Ok(Shoe {
            id,
            decks,
            order,
            cursor: 0,
        })
    }

    /// Validate raw signed quantities, as parsed from user input, before
    /// building. A negative deck count or cutoff is a malformed size, which
    /// is a distinct failure from an in-domain value that is out of range.
    pub fn from_raw_sizes(deck_count: i64, cutoff: i64) -> Result<Shoe, GameError> {
        if deck_count < 0 {
            return Err(GameError::InvalidSize(format!(
                "deck count {} is negative",
                deck_count
            )));
        }
        if cutoff < 0 {
            return Err(GameError::InvalidSize(format!(
                "cutoff {} is negative",
                cutoff
            )));
        }
        Shoe::new(deck_count as usize, cutoff as usize)
    }

    pub fn id(&self) -> ShoeId {
        self.id
    }

    pub fn deck_count(&self) -> usize {
        self.decks.len()
    }

    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }
}

impl CardSupplier for Shoe {
    fn has_next(&self) -> bool {
        self.cursor < self.order.len()
    }

    fn next_card(&mut self) -> Result<DealtCard, GameError> {
        if !self.has_next() {
            return Err(GameError::Exhausted);
        }
        let id = self.order[self.cursor];
        self.cursor += 1;
        let card = self.decks[id.deck() as usize].cards[id.slot() as usize];
        Ok(DealtCard::new(id, card))
    }

    fn count_remaining(&self) -> usize {
        self.order.len() - self.cursor
    }

    fn provenance(&self, card: &DealtCard) -> bool {
        let id = card.id();
        id.shoe() == self.id
            && (id.deck() as usize) < self.decks.len()
            && (id.slot() as usize) < DECK_SIZE
            && self.decks[id.deck() as usize].cards[id.slot() as usize] == card.card()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn seeded(deck_count: usize, cutoff: usize) -> Shoe {
        let mut rng = StdRng::seed_from_u64(42);
        Shoe::with_rng(deck_count, cutoff, &mut rng).unwrap()
    }

    #[test]
    fn each_deck_holds_every_combination_once() {
        let shoe = seeded(3, 0);
        for deck in shoe.decks() {
            let unique: HashSet<Card> = deck.cards().iter().copied().collect();
            assert_eq!(deck.cards().len(), DECK_SIZE);
            assert_eq!(unique.len(), DECK_SIZE);
        }
    }

    #[test]
    fn yields_exactly_total_minus_cutoff_cards() {
        let mut shoe = seeded(2, 17);
        let mut dealt = 0;
        while shoe.has_next() {
            shoe.next_card().unwrap();
            dealt += 1;
        }
        assert_eq!(dealt, 2 * DECK_SIZE - 17);
        assert_eq!(shoe.count_remaining(), 0);
    }

    #[test]
    fn draw_after_exhaustion_fails_exhausted() {
        let mut shoe = seeded(1, 51);
        assert_eq!(shoe.count_remaining(), 1);
        shoe.next_card().unwrap();
        assert!(!shoe.has_next());
        assert_eq!(shoe.next_card(), Err(GameError::Exhausted));
    }

    #[test]
    fn zero_decks_is_an_illegal_argument() {
        assert!(matches!(
            Shoe::new(0, 0),
            Err(GameError::IllegalArgument(_))
        ));
    }

    #[test]
    fn oversized_cutoff_is_an_illegal_argument() {
        assert!(matches!(
            Shoe::new(1, 53),
            Err(GameError::IllegalArgument(_))
        ));
    }

    #[test]
    fn cutoff_equal_to_total_leaves_an_empty_shoe() {
        let mut rng = StdRng::seed_from_u64(7);
        let shoe = Shoe::with_rng(1, DECK_SIZE, &mut rng).unwrap();
        assert!(!shoe.has_next());
        assert_eq!(shoe.count_remaining(), 0);
    }

    #[test]
    fn negative_sizes_are_invalid_not_illegal() {
        assert!(matches!(
            Shoe::from_raw_sizes(-1, 0),
            Err(GameError::InvalidSize(_))
        ));
        assert!(matches!(
            Shoe::from_raw_sizes(2, -5),
            Err(GameError::InvalidSize(_))
        ));
        assert!(matches!(
            Shoe::from_raw_sizes(0, 0),
            Err(GameError::IllegalArgument(_))
        ));
    }

    #[test]
    fn provenance_accepts_dealt_and_rejects_foreign_cards() {
        let mut shoe = seeded(2, 10);
        let dealt = shoe.next_card().unwrap();
        assert!(shoe.provenance(&dealt));

        // Value-equal card minted outside the shoe.
        let forged = DealtCard::new(
            CardId::new(ShoeId::new(u32::MAX), 0, 0),
            dealt.card(),
        );
        assert!(!shoe.provenance(&forged));

        let other = seeded(1, 0);
        assert!(!other.provenance(&dealt));
    }

    #[test]
    fn provenance_covers_cards_held_back_by_the_cutoff() {
        let mut shoe = seeded(1, 40);
        let mut seen = HashSet::new();
        while shoe.has_next() {
            seen.insert(shoe.next_card().unwrap().id());
        }
        // Every arena slot is recognised, dealt or cut off.
        for slot in 0..DECK_SIZE {
            let id = CardId::new(shoe.id(), 0, slot as u8);
            let card = DealtCard::new(id, shoe.decks()[0].cards()[slot]);
            assert!(shoe.provenance(&card));
        }
        assert!(seen.len() < DECK_SIZE);
    }
}
