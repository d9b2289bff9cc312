use crate::domain::{Seat, Table};
use crate::ids::Chips;

/// per-seat action-legality predicates and raise math.
pub fn to_call(seat: &Seat, table: &Table) -> Chips {
    seat.to_call(table.current_bet).min(seat.chips)
}

pub fn is_short_call(seat: &Seat, table: &Table) -> bool {
    seat.to_call(table.current_bet) > seat.chips
}

pub fn can_check(seat: &Seat, table: &Table) -> bool {
    table.current_bet.saturating_sub(seat.round_bet) == 0
}

pub fn can_call(seat: &Seat, table: &Table) -> bool {
    table.current_bet.saturating_sub(seat.round_bet) > 0
}

/// minimum legal total-bet-for-the-round a raise must reach to be a full
/// (reopening) raise.
pub fn min_raise_to(table: &Table) -> Chips {
    table.current_bet.saturating_add(table.min_raise.max(1))
}

/// whether raising the round's total bet to `to_amount` is a full raise
/// (reopens action) as opposed to a short all-in raise.
pub fn is_full_raise(table: &Table, to_amount: Chips) -> bool {
    to_amount >= min_raise_to(table)
}
