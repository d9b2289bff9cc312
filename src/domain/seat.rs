use crate::cards::Hole;
use crate::ids::{Chips, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    Active,
    Folded,
    AllIn,
    SittingOut,
    WaitingForHand,
}

impl SeatStatus {
    pub fn contests_pot(&self) -> bool {
        matches!(self, SeatStatus::Active | SeatStatus::AllIn)
    }

    pub fn can_act(&self) -> bool {
        matches!(self, SeatStatus::Active)
    }
}

/// one occupied seat at a table. `hole` is the player's private cards,
/// kept out of any snapshot handed to other seats; `hole_cards_shown` is
/// the public, normally-null field, populated once cards are legally
/// revealed (showdown or a voluntary show).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub player_id: PlayerId,
    pub display_name: String,
    pub chips: Chips,
    pub initial_buy_in: Chips,
    pub status: SeatStatus,
    pub round_bet: Chips,
    pub total_bet: Chips,
    pub turn_acted: bool,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    pub hole_cards_shown: Option<Hole>,
    pub timed_out: bool,

    #[serde(skip)]
    pub hole: Option<Hole>,
}

impl Seat {
    pub fn new(player_id: PlayerId, display_name: String, buy_in: Chips) -> Self {
        Self {
            player_id,
            display_name,
            chips: buy_in,
            initial_buy_in: buy_in,
            status: SeatStatus::WaitingForHand,
            round_bet: 0,
            total_bet: 0,
            turn_acted: false,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
            hole_cards_shown: None,
            timed_out: false,
            hole: None,
        }
    }

    pub fn to_call(&self, current_bet: Chips) -> Chips {
        current_bet.saturating_sub(self.round_bet)
    }

    pub fn reset_for_new_hand(&mut self) {
        self.round_bet = 0;
        self.total_bet = 0;
        self.turn_acted = false;
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
        self.hole_cards_shown = None;
        self.timed_out = false;
        self.hole = None;
        self.status = if self.chips > 0 {
            SeatStatus::WaitingForHand
        } else {
            SeatStatus::SittingOut
        };
    }

    pub fn reset_for_new_round(&mut self) {
        self.round_bet = 0;
        self.turn_acted = false;
    }
}
