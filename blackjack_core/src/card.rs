//! The card model: `Rank` and `Suit` value tables, the `Card` value type,
//! and the deck-scoped identity handles (`ShoeId`, `CardId`, `DealtCard`)
//! that let a hand tell two value-equal cards from different decks apart.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

/// Display color of a suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
}

/// One of the four French suits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub fn name(&self) -> &'static str {
        match self {
            Suit::Spades => "Spades",
            Suit::Hearts => "Hearts",
            Suit::Diamonds => "Diamonds",
            Suit::Clubs => "Clubs",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Suit::Spades | Suit::Clubs => Color::Black,
            Suit::Hearts | Suit::Diamonds => Color::Red,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// One of the thirteen ranks. The discriminant is the intrinsic numeric rank
/// (Two = 2 up to Ace = 14); the game value a card contributes to a hand is a
/// separate mapping, see [`Rank::value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Intrinsic numeric rank, Two = 2 through Ace = 14.
    pub fn ordinal(&self) -> u8 {
        *self as u8
    }

    /// Value the card contributes to a hand total before any soft-ace
    /// promotion: court cards count 10, an ace counts 1, the rest count face
    /// value.
    pub fn value(&self) -> u8 {
        match self {
            Rank::Ace => 1,
            Rank::Jack | Rank::Queen | Rank::King => 10,
            numeric => numeric.ordinal(),
        }
    }

    /// Whether the rank is a court card (Jack, Queen or King).
    pub fn is_court(&self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Rank::Ace => "Ace",
            Rank::Two => "Two",
            Rank::Three => "Three",
            Rank::Four => "Four",
            Rank::Five => "Five",
            Rank::Six => "Six",
            Rank::Seven => "Seven",
            Rank::Eight => "Eight",
            Rank::Nine => "Nine",
            Rank::Ten => "Ten",
            Rank::Jack => "Jack",
            Rank::Queen => "Queen",
            Rank::King => "King",
        }
    }

    /// Display glyph: "A", "2" … "10", "J", "Q", "K".
    pub fn glyph(&self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// An immutable rank+suit pair. Equality and hashing depend only on rank and
/// suit; which physical deck a card came from is tracked separately by
/// [`CardId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    /// Long name, e.g. "Ace of Spades".
    pub fn name(&self) -> String {
        format!("{} of {}", self.rank.name(), self.suit.name())
    }

    /// The Unicode playing-card character for this card, e.g. 🂡 for the ace
    /// of spades. The knight slot of each suit block is skipped.
    pub fn unicode_glyph(&self) -> char {
        let base = match self.suit {
            Suit::Spades => 0x1F0A0,
            Suit::Hearts => 0x1F0B0,
            Suit::Diamonds => 0x1F0C0,
            Suit::Clubs => 0x1F0D0,
        };
        let offset = match self.rank {
            Rank::Ace => 0x1,
            Rank::Jack => 0xB,
            Rank::Queen => 0xD,
            Rank::King => 0xE,
            numeric => numeric.ordinal() as u32,
        };
        char::from_u32(base + offset).unwrap_or('🂠')
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

static NEXT_SHOE_ID: AtomicU32 = AtomicU32::new(1);

/// Process-unique identifier of a shoe. Alternate card suppliers may mint
/// their own with [`ShoeId::new`]; provenance checks on a real shoe verify
/// the deck arena contents, so a colliding raw value cannot forge membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ShoeId(u32);

impl ShoeId {
    pub fn new(raw: u32) -> ShoeId {
        ShoeId(raw)
    }

    pub(crate) fn next() -> ShoeId {
        ShoeId(NEXT_SHOE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Stable identity of one physical card: the shoe it was built into, the
/// constituent deck, and the slot in that deck's arena. Identity equality is
/// `CardId` equality; value equality stays on [`Card`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CardId {
    shoe: ShoeId,
    deck: u8,
    slot: u8,
}

impl CardId {
    pub fn new(shoe: ShoeId, deck: u8, slot: u8) -> CardId {
        CardId { shoe, deck, slot }
    }

    pub fn shoe(&self) -> ShoeId {
        self.shoe
    }

    pub fn deck(&self) -> u8 {
        self.deck
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }
}

/// A card as it leaves a supplier: the face value plus the identity handle.
/// This is what hands store, and what the duplicate-card guard compares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DealtCard {
    id: CardId,
    card: Card,
}

impl DealtCard {
    pub fn new(id: CardId, card: Card) -> DealtCard {
        DealtCard { id, card }
    }

    pub fn id(&self) -> CardId {
        self.id
    }

    pub fn card(&self) -> Card {
        self.card
    }

    pub fn rank(&self) -> Rank {
        self.card.rank
    }

    pub fn suit(&self) -> Suit {
        self.card.suit
    }

    pub fn value(&self) -> u8 {
        self.card.value()
    }
}

impl fmt::Display for DealtCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.card)
    }
}
