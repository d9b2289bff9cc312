use super::card::Card;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};

/// a player's two private hole cards. Stored server-side only; never
/// broadcast to other seats except at showdown or a voluntary show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole(Card, Card);

impl Hole {
    pub fn new(a: Card, b: Card) -> Self {
        Self(a, b)
    }

    pub fn cards(&self) -> [Card; 2] {
        [self.0, self.1]
    }
}

impl Display for Hole {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{} {}", self.0, self.1)
    }
}
