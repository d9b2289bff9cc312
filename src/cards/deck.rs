use super::card::Card;
use rand::seq::SliceRandom;

/// a 52-card deck shuffled with a cryptographically strong, per-hand RNG.
/// never persisted: the shuffle order only exists for the lifetime of the
/// dealing hand and is discarded once the hand completes.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Deck {
        let mut deck = Deck {
            cards: (0..52).map(Card::from).collect(),
        };
        deck.shuffle();
        deck
    }

    /// builds a deck from an already-determined set of remaining cards
    /// (e.g. 52 minus every card already dealt this hand) and shuffles it.
    pub fn from_cards(mut cards: Vec<Card>) -> Deck {
        let mut rng = rand::rng();
        cards.shuffle(&mut rng);
        Deck { cards }
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    fn shuffle(&mut self) {
        let mut rng = rand::rng();
        self.cards.shuffle(&mut rng);
    }
}

impl Default for Deck {
    fn default() -> Self {
        Deck::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deals_all_fifty_two_distinct_cards() {
        let mut deck = Deck::new();
        let mut seen = std::collections::HashSet::new();
        while let Some(card) = deck.draw() {
            assert!(seen.insert(card.to_string()));
        }
        assert_eq!(seen.len(), 52);
    }
}
