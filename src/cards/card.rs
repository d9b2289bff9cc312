use super::{rank::Rank, suit::Suit};
use crate::errors::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// a single playing card, wire-encoded as `{rank}{suit}` (e.g. `Ah`, `Ts`).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub fn rank(&self) -> Rank {
        self.rank
    }

    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn to_bits(&self) -> u64 {
        1u64 << u8::from(*self)
    }
}

impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        (c.rank as u8) * 4 + (c.suit as u8)
    }
}

impl From<u8> for Card {
    fn from(n: u8) -> Self {
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1u64 << u8::from(c)
    }
}

impl From<u64> for Card {
    fn from(n: u64) -> Self {
        Self {
            rank: Rank::from((n.trailing_zeros() / 4) as u8),
            suit: Suit::from((n.trailing_zeros() % 4) as u8),
        }
    }
}

impl FromStr for Card {
    type Err = EngineError;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (rank, suit) = match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => (r, s),
            _ => return Err(EngineError::InvalidCardEncoding(s.to_string())),
        };
        Ok(Self {
            rank: Rank::try_from(rank)?,
            suit: Suit::try_from(suit)?,
        })
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// (de)serializes as the two-character wire encoding, not a struct, so
/// JSON bodies carry `"Ah"` rather than `{"rank":...,"suit":...}`.
impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        for i in 0..52u8 {
            let card = Card::from(i);
            let text = card.to_string();
            let parsed: Card = text.parse().expect("card parses");
            assert_eq!(card, parsed);
        }
    }

    #[test]
    fn known_encodings() {
        assert_eq!("Ah".parse::<Card>().unwrap().rank(), Rank::Ace);
        assert_eq!("Ts".parse::<Card>().unwrap().rank(), Rank::Ten);
        assert!("Zz".parse::<Card>().is_err());
    }
}
