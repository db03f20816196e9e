//! A seated player: a balance, the hands in front of them, and the
//! bookkeeping for applying settlements back to the balance.

use crate::error::GameError;
use crate::hand::Hand;
use crate::money::Amount;
use crate::wager::{Settlement, Wager};
use std::cmp::Ordering;
use std::fmt;

/// One player at the table. The balance only moves when a settlement is
/// applied; placing a wager merely checks the player could cover a loss.
#[derive(Debug)]
pub struct Player {
    name: String,
    balance: Amount,
    hands: Vec<Hand>,
}

impl Player {
    pub fn new(name: impl Into<String>, balance: Amount) -> Player {
        Player {
            name: name.into(),
            balance,
            hands: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Amount {
        self.balance
    }

    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    pub fn hands_mut(&mut self) -> &mut Vec<Hand> {
        &mut self.hands
    }

    /// Open a new hand around a fresh wager. Fails if the stake exceeds the
    /// current balance.
    pub fn place_wager(&mut self, amount: Amount) -> Result<(), GameError> {
        self.check_cover(amount)?;
        self.hands.push(Hand::new(Wager::new(amount)?));
        Ok(())
    }

    /// Open a new hand around an insurance side wager.
    pub fn place_insurance_wager(&mut self, amount: Amount) -> Result<(), GameError> {
        self.check_cover(amount)?;
        self.hands.push(Hand::new(Wager::with_insurance(amount)?));
        Ok(())
    }

    fn check_cover(&self, amount: Amount) -> Result<(), GameError> {
        if self.balance.compare(&amount)? == Ordering::Less {
            return Err(GameError::IllegalArgument(format!(
                "wager {} exceeds the available balance {}",
                amount, self.balance
            )));
        }
        Ok(())
    }

    /// Apply a settlement's payout delta to the balance.
    pub fn apply_settlement(&mut self, settlement: &Settlement) -> Result<(), GameError> {
        self.balance = self.balance.add(settlement.payout())?;
        Ok(())
    }

    /// Hands not yet marked settled.
    pub fn active_hand_count(&self) -> usize {
        self.hands
            .iter()
            .filter(|hand| !hand.is_settled_hand())
            .count()
    }

    /// Clear the table in front of the player between hands.
    pub fn clear_hands(&mut self) {
        self.hands.clear();
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.balance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;
    use crate::wager::Outcome;

    fn dollars(major: i64) -> Amount {
        Amount::from_major(major, Currency::Usd)
    }

    #[test]
    fn placing_a_wager_leaves_the_balance_untouched() {
        let mut player = Player::new("Ada", dollars(500));
        player.place_wager(dollars(100)).unwrap();
        assert_eq!(player.balance(), dollars(500));
        assert_eq!(player.hands().len(), 1);
    }

    #[test]
    fn a_wager_beyond_the_balance_is_rejected() {
        let mut player = Player::new("Ada", dollars(50));
        assert!(matches!(
            player.place_wager(dollars(100)),
            Err(GameError::IllegalArgument(_))
        ));
        assert!(player.hands().is_empty());
    }

    #[test]
    fn settlements_move_the_balance() {
        let mut player = Player::new("Ada", dollars(500));
        player.place_wager(dollars(100)).unwrap();

        let settlement = player.hands_mut()[0]
            .settle_wager(Outcome::NaturalBlackjack)
            .unwrap();
        player.apply_settlement(&settlement).unwrap();
        assert_eq!(player.balance(), dollars(650));
    }

    #[test]
    fn losses_come_out_of_the_balance() {
        let mut player = Player::new("Ada", dollars(500));
        player.place_wager(dollars(100)).unwrap();

        let settlement = player.hands_mut()[0].settle_wager(Outcome::Bust).unwrap();
        player.apply_settlement(&settlement).unwrap();
        assert_eq!(player.balance(), dollars(400));
    }

    #[test]
    fn active_hands_exclude_marked_ones() {
        let mut player = Player::new("Ada", dollars(500));
        player.place_wager(dollars(10)).unwrap();
        player.place_wager(dollars(10)).unwrap();
        assert_eq!(player.active_hand_count(), 2);

        player.hands_mut()[0].mark_settled();
        assert_eq!(player.active_hand_count(), 1);
    }

    #[test]
    fn insurance_wagers_are_flagged() {
        let mut player = Player::new("Ada", dollars(500));
        player.place_insurance_wager(dollars(5)).unwrap();
        assert!(player.hands()[0].wager().is_insurance());
    }
}
