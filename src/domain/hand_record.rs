use crate::cards::Card;
use crate::ids::{Chips, PlayerId, SeatIndex, TableId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PotShare {
    pub amount: Chips,
    pub eligible: Vec<SeatIndex>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Winner {
    pub player_id: PlayerId,
    pub seat: SeatIndex,
    pub amount: Chips,
    pub hand_name: String,
    pub tiebreakers: Vec<Card>,
    pub winning_cards: Vec<Card>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotableFlags {
    pub large_pot: bool,
    pub premium_hand: bool,
    pub all_in_happened: bool,
    pub last_man_standing: bool,
}

/// an immutable-once-written summary of a completed hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandRecord {
    pub table_id: TableId,
    pub hand_number: u64,
    pub community_cards: Vec<Card>,
    pub action_log: Vec<String>,
    pub pots: Vec<PotShare>,
    pub winners: Vec<Winner>,
    pub flags: NotableFlags,
}
