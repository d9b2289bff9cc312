use super::action::Action;
use super::seat;
use crate::domain::{Table, TableStatus};
use crate::errors::{EngineError, Result};
use crate::ids::PlayerId;
use uuid::Uuid;

/// validates a submitted action against table state, in fixed order:
/// table/status, turn token, seat ownership, then per-action legality.
/// The first failing rule short-circuits.
pub fn validate(
    table: &Table,
    player_id: PlayerId,
    action: Action,
    turn_id: Option<Uuid>,
) -> Result<()> {
    if table.status != TableStatus::Playing {
        return Err(if table.status == TableStatus::Paused {
            EngineError::GamePaused
        } else {
            EngineError::InvalidGameState(format!("table is {:?}", table.status))
        });
    }

    if let Some(provided) = turn_id {
        if Some(provided) != table.current_turn_id {
            return Err(EngineError::StaleAction);
        }
    } else if table.current_turn_id.is_some() {
        return Err(EngineError::StaleAction);
    }

    let current_seat_idx = table.current_turn.ok_or(EngineError::StaleAction)?;
    let current_seat = table
        .seat(current_seat_idx)
        .ok_or(EngineError::StaleAction)?;
    if current_seat.player_id != player_id {
        return Err(EngineError::NotYourTurn);
    }

    match action {
        Action::Fold => {}
        Action::Check => {
            if !seat::can_check(current_seat, table) {
                return Err(EngineError::InvalidAction(
                    "cannot check facing a bet".to_string(),
                ));
            }
        }
        Action::Call => {
            if !seat::can_call(current_seat, table) {
                return Err(EngineError::InvalidAction(
                    "nothing to call".to_string(),
                ));
            }
        }
        Action::Raise(to_amount) => {
            if to_amount <= table.current_bet {
                return Err(EngineError::InvalidAction(
                    "raise must exceed current bet".to_string(),
                ));
            }
            let cost = to_amount.saturating_sub(current_seat.round_bet);
            if cost > current_seat.chips {
                return Err(EngineError::InsufficientChips);
            }
            let is_all_chips = cost == current_seat.chips;
            let increment = to_amount.saturating_sub(table.current_bet);
            if increment < table.min_raise.max(1) && !is_all_chips {
                return Err(EngineError::InvalidAction(
                    "raise increment below minimum raise".to_string(),
                ));
            }
        }
        Action::AllIn => {
            if current_seat.chips == 0 {
                return Err(EngineError::InsufficientChips);
            }
        }
    }

    Ok(())
}
