//! The round: one dealer and one-or-more players grouped for a play
//! session. A thin lifecycle wrapper; all settlement happens through the
//! hand and wager operations.

use crate::dealer::Dealer;
use crate::error::GameError;
use crate::player::Player;

/// Builder for a [`Round`]. Building without a dealer fails with the
/// missing-reference kind; zero players, or more than the dealer's seat
/// limit, is an illegal argument.
pub struct RoundBuilder {
    dealer: Option<Dealer>,
    players: Vec<Player>,
}

impl RoundBuilder {
    pub fn new() -> RoundBuilder {
        RoundBuilder {
            dealer: None,
            players: Vec::new(),
        }
    }

    pub fn dealer(&mut self, dealer: Dealer) -> &mut Self {
        self.dealer = Some(dealer);
        self
    }

    pub fn player(&mut self, player: Player) -> &mut Self {
        self.players.push(player);
        self
    }

    pub fn build(&mut self) -> Result<Round, GameError> {
        let dealer = self.dealer.take().ok_or(GameError::Missing("dealer"))?;
        let players = std::mem::take(&mut self.players);
        if players.is_empty() {
            return Err(GameError::IllegalArgument(
                "a round needs at least one player".to_string(),
            ));
        }
        if players.len() > dealer.rules().max_players {
            return Err(GameError::IllegalArgument(format!(
                "at most {} players may be seated at this table",
                dealer.rules().max_players
            )));
        }
        Ok(Round {
            dealer,
            players,
            begun: false,
        })
    }
}

impl Default for RoundBuilder {
    fn default() -> Self {
        RoundBuilder::new()
    }
}

/// A play session at one table.
pub struct Round {
    dealer: Dealer,
    players: Vec<Player>,
    begun: bool,
}

impl Round {
    pub fn builder() -> RoundBuilder {
        RoundBuilder::new()
    }

    /// Begin the session: one-shot. Delegates to [`Dealer::start`], which
    /// reserves the bankroll and marks the dealer active.
    pub fn begin(&mut self) -> Result<(), GameError> {
        if self.begun {
            return Err(GameError::IllegalState(
                "round has already begun".to_string(),
            ));
        }
        self.dealer.start(&self.players)?;
        self.begun = true;
        Ok(())
    }

    pub fn has_begun(&self) -> bool {
        self.begun
    }

    /// Bookkeeping only: true once every hand's wager at the table has
    /// reached a settled state.
    pub fn completed(&self) -> bool {
        self.players
            .iter()
            .flat_map(|player| player.hands())
            .all(|hand| hand.wager().is_settled())
    }

    pub fn dealer(&self) -> &Dealer {
        &self.dealer
    }

    pub fn dealer_mut(&mut self) -> &mut Dealer {
        &mut self.dealer
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn players_mut(&mut self) -> &mut [Player] {
        &mut self.players
    }

    /// Split borrow for callers that deal from the dealer into a player's
    /// hand in one expression.
    pub fn parts_mut(&mut self) -> (&mut Dealer, &mut [Player]) {
        (&mut self.dealer, &mut self.players)
    }
}
