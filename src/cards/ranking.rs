use super::rank::Rank;

/// a hand's category and the rank(s) that decide it, ignoring kickers.
/// `Ord` gives the correct category ordering because variants are declared
/// weakest to strongest and derive compares by discriminant first.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard(Rank),
    OnePair(Rank),
    TwoPair(Rank, Rank),
    ThreeOAK(Rank),
    Straight(Rank),
    Flush(Rank),
    FullHouse(Rank, Rank),
    FourOAK(Rank),
    StraightFlush(Rank),
}

impl Ranking {
    pub fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::ThreeOAK(_) => 2,
            Ranking::FourOAK(_) | Ranking::TwoPair(_, _) => 1,
            _ => 0,
        }
    }

    pub fn mask(&self) -> u16 {
        match *self {
            Ranking::TwoPair(hi, lo) => u16::from(hi) | u16::from(lo),
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::FourOAK(hi)
            | Ranking::ThreeOAK(hi) => u16::from(hi),
            Ranking::FullHouse(..)
            | Ranking::StraightFlush(..)
            | Ranking::Straight(..)
            | Ranking::Flush(..) => 0,
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::FullHouse(r1, r2) => write!(f, "FullHouse {r1}{r2}"),
            Ranking::TwoPair(r1, r2) => write!(f, "TwoPair {r1}{r2}"),
            Ranking::HighCard(r) => write!(f, "HighCard {r}"),
            Ranking::OnePair(r) => write!(f, "OnePair {r}"),
            Ranking::ThreeOAK(r) => write!(f, "ThreeOfAKind {r}"),
            Ranking::Straight(r) => write!(f, "Straight {r}"),
            Ranking::FourOAK(r) => write!(f, "FourOfAKind {r}"),
            Ranking::Flush(r) => write!(f, "Flush {r}"),
            Ranking::StraightFlush(r) => write!(f, "StraightFlush {r}"),
        }
    }
}
