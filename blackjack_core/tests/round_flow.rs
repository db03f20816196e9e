//! End-to-end round flow against a scripted card supplier, driving the
//! public contracts the way the console table does.

use blackjack_core::prelude::*;

/// A supplier dealing a fixed script of cards, standing in for a shoe.
struct ScriptedShoe {
    cards: Vec<DealtCard>,
    cursor: usize,
}

impl ScriptedShoe {
    fn new(script: &[(Rank, Suit)]) -> ScriptedShoe {
        let id = ShoeId::new(9000);
        let cards = script
            .iter()
            .enumerate()
            .map(|(slot, (rank, suit))| {
                DealtCard::new(CardId::new(id, 0, slot as u8), Card::new(*rank, *suit))
            })
            .collect();
        ScriptedShoe { cards, cursor: 0 }
    }
}

impl CardSupplier for ScriptedShoe {
    fn has_next(&self) -> bool {
        self.cursor < self.cards.len()
    }

    fn next_card(&mut self) -> Result<DealtCard, GameError> {
        if !self.has_next() {
            return Err(GameError::Exhausted);
        }
        let card = self.cards[self.cursor];
        self.cursor += 1;
        Ok(card)
    }

    fn count_remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    fn provenance(&self, card: &DealtCard) -> bool {
        self.cards
            .iter()
            .any(|held| held.id() == card.id() && held.card() == card.card())
    }
}

fn dollars(major: i64) -> Amount {
    Amount::from_major(major, Currency::Usd)
}

fn round_with_script(script: &[(Rank, Suit)], balance: Amount) -> Round {
    let dealer = Dealer::new(TableRules::default(), Box::new(ScriptedShoe::new(script)));
    Round::builder()
        .dealer(dealer)
        .player(Player::new("Ada", balance))
        .build()
        .unwrap()
}

#[test]
fn natural_blackjack_pays_three_to_two() {
    // Player: A♠ K♥ (natural). Dealer: 9♦ up, 7♣ in the hole.
    let mut round = round_with_script(
        &[
            (Rank::Ace, Suit::Spades),
            (Rank::Nine, Suit::Diamonds),
            (Rank::King, Suit::Hearts),
            (Rank::Seven, Suit::Clubs),
        ],
        dollars(500),
    );
    round.begin().unwrap();

    let (dealer, players) = round.parts_mut();
    let player = &mut players[0];
    player.place_wager(dollars(100)).unwrap();

    let hand = &mut player.hands_mut()[0];
    dealer.deal_face_up(hand).unwrap();
    let up = dealer.tell_face_up_card().unwrap().unwrap();
    assert_eq!(up.rank(), Rank::Nine);
    dealer.deal_face_up(hand).unwrap();

    assert!(hand.is_natural_blackjack());
    let settlement = hand.settle_wager(Outcome::NaturalBlackjack).unwrap();
    hand.mark_settled();
    assert_eq!(settlement.payout(), dollars(150));

    player.apply_settlement(&settlement).unwrap();
    assert_eq!(player.balance(), dollars(650));
    assert_eq!(player.active_hand_count(), 0);

    assert!(round.completed());
    round.dealer_mut().finish();
    assert!(!round.dealer().active());
}

#[test]
fn split_eights_play_out_as_two_hands() {
    // Player: 8♠ 8♥, split, then a ten on each. Dealer: up card only.
    let mut round = round_with_script(
        &[
            (Rank::Eight, Suit::Spades),
            (Rank::Six, Suit::Diamonds),
            (Rank::Eight, Suit::Hearts),
            (Rank::Ten, Suit::Clubs),
            (Rank::Ten, Suit::Diamonds),
        ],
        dollars(500),
    );
    round.begin().unwrap();

    let (dealer, players) = round.parts_mut();
    let player = &mut players[0];
    player.place_wager(dollars(50)).unwrap();

    dealer.deal_face_up(&mut player.hands_mut()[0]).unwrap();
    let _up = dealer.tell_face_up_card().unwrap().unwrap();
    dealer.deal_face_up(&mut player.hands_mut()[0]).unwrap();

    assert!(player.hands()[0].is_splittable_hand(dealer));
    let split_off = player.hands_mut()[0].split(dealer).unwrap();
    player.hands_mut().push(split_off);

    for i in 0..2 {
        dealer.deal_face_up(&mut player.hands_mut()[i]).unwrap();
        assert_eq!(player.hands()[i].cards_value(), 18);
        assert_eq!(player.hands()[i].wager().amount(), dollars(50));
    }

    // Dealer ends on 17: both hands win even money.
    for i in 0..2 {
        let settlement = player.hands_mut()[i].settle_wager(Outcome::BetterScore).unwrap();
        player.hands_mut()[i].mark_settled();
        player.apply_settlement(&settlement).unwrap();
    }
    assert_eq!(player.balance(), dollars(600));
    assert!(round.completed());
}

#[test]
fn double_down_rides_a_doubled_wager() {
    // Player: 6♠ 5♥ (11), doubles, draws a ten for 21.
    let mut round = round_with_script(
        &[
            (Rank::Six, Suit::Spades),
            (Rank::Queen, Suit::Diamonds),
            (Rank::Five, Suit::Hearts),
            (Rank::Ten, Suit::Spades),
        ],
        dollars(500),
    );
    round.begin().unwrap();

    let (dealer, players) = round.parts_mut();
    let player = &mut players[0];
    player.place_wager(dollars(100)).unwrap();

    dealer.deal_face_up(&mut player.hands_mut()[0]).unwrap();
    let _up = dealer.tell_face_up_card().unwrap().unwrap();
    dealer.deal_face_up(&mut player.hands_mut()[0]).unwrap();
    assert_eq!(player.hands()[0].cards_value(), 11);

    player.hands_mut()[0].double_down().unwrap();
    dealer.deal_face_up(&mut player.hands_mut()[0]).unwrap();
    assert!(player.hands()[0].is_winning_hand());

    let settlement = player.hands_mut()[0].settle_wager(Outcome::Blackjack).unwrap();
    player.hands_mut()[0].mark_settled();
    player.apply_settlement(&settlement).unwrap();
    // Even money on the doubled $200 wager.
    assert_eq!(player.balance(), dollars(700));
}

#[test]
fn insurance_settles_against_a_dealer_natural() {
    let mut round = round_with_script(
        &[
            (Rank::Nine, Suit::Spades),
            (Rank::Ace, Suit::Diamonds),
            (Rank::Nine, Suit::Hearts),
            (Rank::King, Suit::Clubs),
        ],
        dollars(500),
    );
    round.begin().unwrap();

    let (dealer, players) = round.parts_mut();
    let player = &mut players[0];
    player.place_wager(dollars(100)).unwrap();

    dealer.deal_face_up(&mut player.hands_mut()[0]).unwrap();
    let up = dealer.tell_face_up_card().unwrap().unwrap();
    dealer.deal_face_up(&mut player.hands_mut()[0]).unwrap();

    // The up card is an ace: offer insurance at half the stake.
    assert_eq!(up.rank(), Rank::Ace);
    player.place_insurance_wager(dollars(50)).unwrap();

    // The hole card is a king: dealer natural. Insurance wins even money,
    // the main hand loses.
    let hole = dealer.tell_face_up_card().unwrap().unwrap();
    assert_eq!(hand_total(&[up, hole]), 21);

    let hands = player.hands_mut();
    let insurance = hands[1].settle_wager(Outcome::InsuranceWon).unwrap();
    hands[1].mark_settled();
    let main = hands[0].settle_wager(Outcome::LowerScore).unwrap();
    hands[0].mark_settled();

    player.apply_settlement(&insurance).unwrap();
    player.apply_settlement(&main).unwrap();
    // +50 insurance, -100 main.
    assert_eq!(player.balance(), dollars(450));
    assert!(round.completed());
}

#[test]
fn a_scripted_supplier_reports_provenance_like_a_shoe() {
    let mut supplier = ScriptedShoe::new(&[(Rank::Two, Suit::Clubs)]);
    assert_eq!(supplier.count_remaining(), 1);
    let card = supplier.next_card().unwrap();
    assert!(supplier.provenance(&card));
    assert!(!supplier.has_next());
    assert_eq!(supplier.next_card(), Err(GameError::Exhausted));

    let foreign = DealtCard::new(
        CardId::new(ShoeId::new(1), 0, 0),
        Card::new(Rank::Two, Suit::Clubs),
    );
    assert!(!supplier.provenance(&foreign));
}
