//! The interactive console table: prompts for wagers and
//! hit/stand/double/split/insurance decisions, deals from a real shoe and
//! settles every hand through the engine's contracts.

use blackjack_core::prelude::*;
use clap::Parser;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "blackjack_table", about = "An interactive casino blackjack table")]
struct Options {
    /// Number of decks in the shoe
    #[arg(long, default_value_t = 6)]
    decks: i64,

    /// Cards held back under the plastic card
    #[arg(long, default_value_t = 26)]
    cutoff: i64,

    /// Starting balance in whole dollars
    #[arg(long, default_value_t = 500)]
    balance: i64,

    /// Name to address the player by
    #[arg(long, default_value = "Player")]
    name: String,

    /// Restrict splitting to these ranks, e.g. "A,8". The default allows
    /// any equal-rank pair.
    #[arg(long)]
    split_ranks: Option<String>,

    /// Never offer insurance, even against an ace
    #[arg(long)]
    no_insurance: bool,
}

fn parse_rank(token: &str) -> Option<Rank> {
    match token.trim().to_ascii_uppercase().as_str() {
        "A" => Some(Rank::Ace),
        "2" => Some(Rank::Two),
        "3" => Some(Rank::Three),
        "4" => Some(Rank::Four),
        "5" => Some(Rank::Five),
        "6" => Some(Rank::Six),
        "7" => Some(Rank::Seven),
        "8" => Some(Rank::Eight),
        "9" => Some(Rank::Nine),
        "10" | "T" => Some(Rank::Ten),
        "J" => Some(Rank::Jack),
        "Q" => Some(Rank::Queen),
        "K" => Some(Rank::King),
        _ => None,
    }
}

/// Build the table rules from the parsed options, once. The rules struct is
/// the only carrier of the split configuration from here on.
fn rules_from_options(options: &Options) -> Result<TableRules, GameError> {
    let mut rules = TableRules::default();
    if let Some(ranks) = &options.split_ranks {
        let mut pairs = HashSet::new();
        for token in ranks.split(',') {
            let rank = parse_rank(token).ok_or_else(|| {
                GameError::IllegalArgument(format!("unrecognized rank {:?}", token.trim()))
            })?;
            pairs.insert(RankPair::of(rank));
        }
        rules.splittable_pairs = pairs;
    }
    Ok(rules)
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn show_cards(label: &str, cards: &[DealtCard]) {
    let faces: Vec<String> = cards.iter().map(|card| card.to_string()).collect();
    println!("{label}: {} ({})", faces.join(" "), hand_total(cards));
}

/// One console session: a single round at a single table, played hand by
/// hand until the player quits, goes broke or reaches the plastic card.
struct TableSession {
    round: Round,
    offer_insurance: bool,
}

impl TableSession {
    fn new(round: Round, offer_insurance: bool) -> TableSession {
        TableSession {
            round,
            offer_insurance,
        }
    }

    fn run(&mut self) -> Result<(), GameError> {
        self.round.begin()?;
        loop {
            let player = &self.round.players()[0];
            println!();
            println!("{} has {}", player.name(), player.balance());
            if !player.balance().is_positive() {
                println!("out of funds, the table thanks you");
                break;
            }
            if self.round.dealer().shoe().count_remaining() < 10 {
                println!("the shoe has reached the plastic card");
                break;
            }

            let line = prompt("wager in dollars (q to leave): ").map_err(io_error)?;
            if line.eq_ignore_ascii_case("q") {
                break;
            }
            let stake = match line.parse::<i64>() {
                Ok(dollars) if dollars > 0 => Amount::from_major(dollars, Currency::Usd),
                _ => {
                    println!("enter a positive whole-dollar wager");
                    continue;
                }
            };

            if let Err(error) = self.play_hand(stake) {
                match error {
                    GameError::Exhausted => {
                        println!("the shoe is exhausted");
                        break;
                    }
                    other => {
                        println!("{other}");
                        continue;
                    }
                }
            }
        }
        self.round.dealer_mut().finish();
        Ok(())
    }

    fn play_hand(&mut self, stake: Amount) -> Result<(), GameError> {
        let (dealer, players) = self.round.parts_mut();
        let player = &mut players[0];
        player.clear_hands();
        player.place_wager(stake)?;

        // Opening deal: player up, dealer up, player up, dealer hole.
        dealer.deal_face_up(&mut player.hands_mut()[0])?;
        let up = draw(dealer)?;
        dealer.deal_face_up(&mut player.hands_mut()[0])?;
        let hole = draw(dealer)?;
        let mut dealer_cards = vec![up, hole];

        show_cards("you", player.hands()[0].cards());
        println!("dealer shows: {up}");

        if self.offer_insurance && up.rank() == Rank::Ace {
            let side = stake.divided(2)?;
            if side.is_positive() {
                let answer = prompt(&format!("insurance for {side}? (y/n): ")).map_err(io_error)?;
                if answer.eq_ignore_ascii_case("y") {
                    player.place_insurance_wager(side)?;
                }
            }
        }

        let dealer_natural = hand_total(&dealer_cards) == 21;
        if dealer_natural {
            show_cards("dealer", &dealer_cards);
            settle_against_natural(player)?;
            return Ok(());
        }
        settle_insurance_losses(player)?;

        if player.hands()[0].is_natural_blackjack() {
            println!("natural blackjack!");
            settle_hand(player, 0, Outcome::NaturalBlackjack)?;
            return Ok(());
        }

        // The player plays each hand in front of them; splitting appends.
        let mut index = 0;
        while index < player.hands().len() {
            if player.hands()[index].wager().is_settled() {
                index += 1;
                continue;
            }
            self_play_hand(dealer, player, index)?;
            index += 1;
        }

        // Dealer only draws if anything is still standing.
        let standing: Vec<usize> = (0..player.hands().len())
            .filter(|i| !player.hands()[*i].wager().is_settled())
            .collect();
        if standing.is_empty() {
            return Ok(());
        }

        while hand_total(&dealer_cards) < 17 {
            dealer_cards.push(draw(dealer)?);
        }
        show_cards("dealer", &dealer_cards);

        let dealer_total = hand_total(&dealer_cards);
        for index in standing {
            let outcome = outcome_against(player.hands()[index].cards_value(), dealer_total);
            settle_hand(player, index, outcome)?;
        }
        Ok(())
    }
}

/// Play out one of the player's hands interactively.
fn self_play_hand(
    dealer: &mut Dealer,
    player: &mut Player,
    index: usize,
) -> Result<(), GameError> {
    loop {
        let hand = &player.hands()[index];
        if hand.is_closed_hand() {
            if hand.is_busted_hand() {
                println!("busted");
                settle_hand(player, index, Outcome::Bust)?;
            }
            return Ok(());
        }

        show_cards(&format!("hand {}", index + 1), hand.cards());
        let mut options = vec!["hit", "stand"];
        let wager = hand.wager().amount();
        let can_double = hand.cards().len() == 2
            && player.balance().compare(&wager.times(2))? != Ordering::Less;
        if can_double {
            options.push("double down");
        }
        let can_split = hand.is_splittable_hand(dealer)
            && player.balance().compare(&wager.times(2))? != Ordering::Less;
        if can_split {
            options.push("split");
        }

        let choice = prompt(&format!("[{}]: ", options.join("/"))).map_err(io_error)?;
        match choice.to_ascii_lowercase().as_str() {
            "hit" | "h" => {
                let card = dealer.deal_face_up(&mut player.hands_mut()[index])?;
                println!("drawn: {card}");
            }
            "stand" | "s" => return Ok(()),
            "double down" | "d" if can_double => {
                player.hands_mut()[index].double_down()?;
                let card = dealer.deal_face_up(&mut player.hands_mut()[index])?;
                println!("drawn: {card}");
                let hand = &player.hands()[index];
                if hand.is_busted_hand() {
                    println!("busted");
                    settle_hand(player, index, Outcome::Bust)?;
                }
                return Ok(());
            }
            "split" | "p" if can_split => {
                let mut split_off = player.hands_mut()[index].split(dealer)?;
                dealer.deal_face_up(&mut player.hands_mut()[index])?;
                dealer.deal_face_up(&mut split_off)?;
                player.hands_mut().push(split_off);
                println!("split into two hands");
            }
            _ => println!("not an option right now"),
        }
    }
}

fn draw(dealer: &mut Dealer) -> Result<DealtCard, GameError> {
    dealer
        .tell_face_up_card()?
        .ok_or_else(|| GameError::IllegalState("dealer is not in a round".to_string()))
}

/// Map a standing player total against the dealer's final total.
fn outcome_against(player_total: u8, dealer_total: u8) -> Outcome {
    if dealer_total > 21 || player_total > dealer_total {
        if player_total == 21 {
            Outcome::Blackjack
        } else {
            Outcome::BetterScore
        }
    } else if player_total == dealer_total {
        Outcome::Standoff
    } else {
        Outcome::LowerScore
    }
}

fn settle_hand(player: &mut Player, index: usize, outcome: Outcome) -> Result<(), GameError> {
    let settlement = player.hands_mut()[index].settle_wager(outcome)?;
    player.hands_mut()[index].mark_settled();
    player.apply_settlement(&settlement)?;
    println!("hand {}: {}", index + 1, settlement);
    Ok(())
}

/// Dealer turned over a natural: insurance wins, everything else pushes a
/// player natural and loses otherwise.
fn settle_against_natural(player: &mut Player) -> Result<(), GameError> {
    for index in 0..player.hands().len() {
        if player.hands()[index].wager().is_settled() {
            continue;
        }
        let outcome = if player.hands()[index].wager().is_insurance() {
            Outcome::InsuranceWon
        } else if player.hands()[index].is_natural_blackjack() {
            Outcome::Standoff
        } else {
            Outcome::LowerScore
        };
        settle_hand(player, index, outcome)?;
    }
    Ok(())
}

/// No dealer natural: any insurance side bet is lost immediately.
fn settle_insurance_losses(player: &mut Player) -> Result<(), GameError> {
    for index in 0..player.hands().len() {
        let hand = &player.hands()[index];
        if hand.wager().is_insurance() && !hand.wager().is_settled() {
            settle_hand(player, index, Outcome::InsuranceLost)?;
        }
    }
    Ok(())
}

fn io_error(error: io::Error) -> GameError {
    GameError::IllegalState(format!("console unavailable: {error}"))
}

fn main() {
    let options = Options::parse();

    let rules = match rules_from_options(&options) {
        Ok(rules) => rules,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };

    let shoe = match Shoe::from_raw_sizes(options.decks, options.cutoff) {
        Ok(shoe) => shoe,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };

    let dealer = Dealer::new(rules, Box::new(shoe));
    let player = Player::new(
        options.name.clone(),
        Amount::from_major(options.balance, Currency::Usd),
    );

    let round = match Round::builder().dealer(dealer).player(player).build() {
        Ok(round) => round,
        Err(error) => {
            eprintln!("error: {error}");
            std::process::exit(1);
        }
    };

    let mut session = TableSession::new(round, !options.no_insurance);
    if let Err(error) = session.run() {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}
