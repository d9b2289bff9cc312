use super::card::Card;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Display for Street {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Street::Preflop => write!(f, "Pre Flop"),
            Street::Flop => write!(f, "Flop"),
            Street::Turn => write!(f, "Turn"),
            Street::River => write!(f, "River"),
            Street::Showdown => write!(f, "Showdown"),
        }
    }
}

/// the shared community cards dealt face-up to the table, plus which
/// street they currently represent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
    street: Street,
}

impl Board {
    pub fn new() -> Board {
        Board {
            cards: Vec::with_capacity(5),
            street: Street::Preflop,
        }
    }

    pub fn street(&self) -> Street {
        self.street
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn deal_flop(&mut self, a: Card, b: Card, c: Card) {
        self.cards.extend([a, b, c]);
        self.street = Street::Flop;
    }

    pub fn deal_turn(&mut self, card: Card) {
        self.cards.push(card);
        self.street = Street::Turn;
    }

    pub fn deal_river(&mut self, card: Card) {
        self.cards.push(card);
        self.street = Street::River;
    }

    pub fn mark_showdown(&mut self) {
        self.street = Street::Showdown;
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for card in &self.cards {
            write!(f, "{card} ")?;
        }
        Ok(())
    }
}
