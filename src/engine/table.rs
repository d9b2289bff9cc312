use crate::domain::{SeatStatus, Table};

/// consolidates the "is this betting round closed" family of predicates
/// into one spot.
pub struct RoundStatus;

impl RoundStatus {
    /// every ACTIVE seat has acted this round and matched the current bet.
    pub fn is_round_closed(table: &Table) -> bool {
        table
            .occupied_seats()
            .filter(|(_, s)| s.status == SeatStatus::Active)
            .all(|(_, s)| s.turn_acted && s.round_bet == table.current_bet)
    }

    /// at most one non-all-in player remains and there is no outstanding
    /// call to settle: no further voluntary betting is possible this hand.
    pub fn is_effective_all_in(table: &Table) -> bool {
        let contesting: Vec<_> = table.occupied_seats().filter(|(_, s)| s.status.contests_pot()).collect();
        let non_all_in = contesting
            .iter()
            .filter(|(_, s)| s.status == SeatStatus::Active)
            .count();
        non_all_in <= 1 && Self::is_round_closed(table)
    }

    /// exactly one seat remains in the hand; everyone else folded.
    pub fn is_last_man_standing(table: &Table) -> bool {
        table.non_folded_count() == 1
    }
}
