use crate::domain::{EventKind, Seat, Stage, Table, TableConfig, TableStatus};
use crate::engine::hand::{Effects, ScheduledEffect};
use crate::errors::{EngineError, Result};
use crate::ids::{Chips, PlayerId, SeatIndex, TableId};
use std::time::Duration;
use uuid::Uuid;

/// the table-lifecycle operations that sit outside the hand state machine
/// proper: creating and tearing down tables, seating and unseating players,
/// host controls, and the voluntary post-fold reveal. Grounded in the same
/// "pure function returns `Result<Effects>`, caller persists" shape as
/// `engine::hand::HandMachine` so both go through the one `ops::apply` seam.
pub struct Lifecycle;

impl Lifecycle {
    /// validates a host-supplied config and creates the table. The only
    /// failure mode is a config whose bounds don't make sense together.
    pub fn create_table(config: TableConfig) -> Result<Table> {
        if config.max_seats == 0 || config.max_seats > 10 {
            return Err(EngineError::InvalidConfig("max_seats must be 1..=10".to_string()));
        }
        if config.small_blind == 0 || config.big_blind < config.small_blind {
            return Err(EngineError::InvalidConfig("big_blind must be >= small_blind > 0".to_string()));
        }
        if config.min_buy_in < config.big_blind || config.max_buy_in < config.min_buy_in {
            return Err(EngineError::InvalidConfig("buy-in range is empty or below one big blind".to_string()));
        }
        Ok(Table::new(TableId::new(), config))
    }

    pub fn join_seat(
        table: &mut Table,
        player_id: PlayerId,
        display_name: String,
        seat: SeatIndex,
        buy_in: Chips,
    ) -> Result<Effects> {
        if buy_in < table.config.min_buy_in || buy_in > table.config.max_buy_in {
            return Err(EngineError::BuyinOutOfRange);
        }
        if usize::from(seat) >= table.seats.len() {
            return Err(EngineError::TableFull);
        }
        if table.seat(seat).is_some() {
            return Err(EngineError::SeatTaken);
        }
        if table.find_seat_of(player_id).is_some() {
            return Err(EngineError::SeatTaken);
        }
        table.seats[usize::from(seat)] = Some(Seat::new(player_id, display_name, buy_in));
        let mut effects = Effects::default();
        effects.events.push(EventKind::SpectatorJoined { player_id });
        Ok(effects)
    }

    /// removes a player from their seat. If the hand is in progress and the
    /// seat still contests the pot, it's force-folded first so the dead
    /// money the player already committed stays in the pot rather than
    /// vanishing with the seat.
    pub fn leave_seat(
        table: &mut Table,
        player_id: PlayerId,
        turn_timeout: std::time::Duration,
        showdown_admire: std::time::Duration,
        win_by_fold_reveal: std::time::Duration,
    ) -> Result<Effects> {
        let idx = table.find_seat_of(player_id).ok_or(EngineError::NotSeated)?;
        let mut effects = Effects::default();
        let mid_hand_contestant = table.status == TableStatus::Playing
            && table.seat(idx).is_some_and(|s| s.status.contests_pot());
        if mid_hand_contestant {
            super::hand::HandMachine::force_fold_for_departure(
                table,
                idx,
                turn_timeout,
                showdown_admire,
                win_by_fold_reveal,
                &mut effects,
            );
        }
        table.seats[usize::from(idx)] = None;
        effects.events.push(EventKind::SpectatorLeft { player_id });
        Ok(effects)
    }

    /// legal only during the win-by-fold reveal window, and only for the
    /// seat that just won uncontested — a folded seat's `hole` is still
    /// `Some` until the next hand resets it, so status must be checked too.
    pub fn show_cards(table: &mut Table, player_id: PlayerId) -> Result<Effects> {
        if table.stage != Stage::WinByFold {
            return Err(EngineError::InvalidAction("no reveal window open".to_string()));
        }
        let idx = table.find_seat_of(player_id).ok_or(EngineError::NotSeated)?;
        let seat = table.seat_mut(idx).ok_or(EngineError::NotSeated)?;
        if !seat.status.contests_pot() {
            return Err(EngineError::NotAuthorized);
        }
        let hole = seat.hole.ok_or(EngineError::NotAuthorized)?;
        seat.hole_cards_shown = Some(hole);
        let mut effects = Effects::default();
        effects.events.push(EventKind::ShowdownReveal { player_id, seat: idx });
        Ok(effects)
    }

    /// host-only: pauses a playing table. New hands won't auto-start while
    /// paused; an in-flight hand's open turn is frozen rather than left to
    /// time out, and resumed with whatever time it had left.
    pub fn toggle_pause(
        table: &mut Table,
        requester: PlayerId,
        pause: bool,
        turn_timeout: Duration,
    ) -> Result<Effects> {
        if requester != table.config.creator_id {
            return Err(EngineError::NotAuthorized);
        }
        let mut effects = Effects::default();
        match (pause, table.status) {
            (true, TableStatus::Playing) => {
                table.paused_was_playing = true;
                if table.current_turn.is_some() {
                    let remaining_ms = table
                        .current_turn_deadline
                        .map(|deadline| (deadline - chrono::Utc::now()).num_milliseconds().max(0))
                        .unwrap_or(turn_timeout.as_millis() as i64);
                    table.paused_turn_remaining_ms = Some(remaining_ms);
                    table.current_turn_id = None;
                    table.current_turn_deadline = None;
                }
                table.status = TableStatus::Paused;
                Ok(effects)
            }
            (true, TableStatus::Waiting) => {
                table.paused_was_playing = false;
                table.status = TableStatus::Paused;
                Ok(effects)
            }
            (false, TableStatus::Paused) => {
                if table.paused_was_playing {
                    table.status = TableStatus::Playing;
                    if let Some(remaining_ms) = table.paused_turn_remaining_ms.take() {
                        let remaining = Duration::from_millis(remaining_ms.max(0) as u64);
                        let turn_id = Uuid::new_v4();
                        table.current_turn_id = Some(turn_id);
                        table.current_turn_deadline = chrono::Utc::now().checked_add_signed(
                            chrono::Duration::from_std(remaining).unwrap_or(chrono::Duration::zero()),
                        );
                        effects.schedule.push(ScheduledEffect::TurnTimeout { turn_id, after: remaining });
                    }
                } else {
                    table.status = TableStatus::Waiting;
                }
                Ok(effects)
            }
            _ => Err(EngineError::InvalidConfig("table is not in a pausable/resumable state".to_string())),
        }
    }

    /// host-only one-shot flag: the table lands on ENDED once the hand in
    /// flight (if any) resolves, instead of auto-continuing.
    pub fn set_end_after_hand(table: &mut Table, requester: PlayerId) -> Result<()> {
        if requester != table.config.creator_id {
            return Err(EngineError::NotAuthorized);
        }
        if table.status == TableStatus::Playing {
            table.end_after_hand = true;
        } else {
            table.status = TableStatus::Ended;
        }
        Ok(())
    }

    /// host-only: permanently removes a table. Refused while a hand is in
    /// flight so chips in play are never silently discarded.
    pub fn delete_table(table: &Table, requester: PlayerId) -> Result<()> {
        if requester != table.config.creator_id {
            return Err(EngineError::NotAuthorized);
        }
        if table.status == TableStatus::Playing {
            return Err(EngineError::RoomInPlay);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PlayerId;

    fn config() -> TableConfig {
        TableConfig {
            small_blind: 1,
            big_blind: 2,
            min_buy_in: 40,
            max_buy_in: 200,
            turn_timeout_secs: 30,
            max_seats: 6,
            auto_next: true,
            creator_id: PlayerId::new(),
        }
    }

    #[test]
    fn create_table_rejects_empty_buyin_range() {
        let mut cfg = config();
        cfg.max_buy_in = 10;
        assert!(Lifecycle::create_table(cfg).is_err());
    }

    #[test]
    fn join_seat_rejects_out_of_range_buyin() {
        let mut table = Lifecycle::create_table(config()).unwrap();
        let err = Lifecycle::join_seat(&mut table, PlayerId::new(), "a".into(), SeatIndex::new(0), 5);
        assert_eq!(err.unwrap_err(), EngineError::BuyinOutOfRange);
    }

    #[test]
    fn join_seat_then_leave_frees_the_seat() {
        let mut table = Lifecycle::create_table(config()).unwrap();
        let player = PlayerId::new();
        Lifecycle::join_seat(&mut table, player, "a".into(), SeatIndex::new(0), 100).unwrap();
        assert!(table.seat(SeatIndex::new(0)).is_some());
        let dur = std::time::Duration::from_secs(1);
        Lifecycle::leave_seat(&mut table, player, dur, dur, dur).unwrap();
        assert!(table.seat(SeatIndex::new(0)).is_none());
    }

    #[test]
    fn toggle_pause_refuses_non_host() {
        let mut table = Lifecycle::create_table(config()).unwrap();
        let dur = std::time::Duration::from_secs(30);
        let err = Lifecycle::toggle_pause(&mut table, PlayerId::new(), true, dur);
        assert_eq!(err.unwrap_err(), EngineError::NotAuthorized);
    }

    #[test]
    fn pausing_mid_turn_snapshots_remaining_time_and_resume_re_arms_it() {
        let mut table = Lifecycle::create_table(config()).unwrap();
        let host = table.config.creator_id;
        let dur = std::time::Duration::from_secs(30);
        table.status = TableStatus::Playing;
        table.current_turn = Some(SeatIndex::new(0));
        table.current_turn_id = Some(uuid::Uuid::new_v4());
        table.current_turn_deadline = Some(chrono::Utc::now() + chrono::Duration::seconds(20));

        Lifecycle::toggle_pause(&mut table, host, true, dur).unwrap();
        assert_eq!(table.status, TableStatus::Paused);
        assert!(table.current_turn_id.is_none());
        assert!(table.paused_turn_remaining_ms.is_some());

        let effects = Lifecycle::toggle_pause(&mut table, host, false, dur).unwrap();
        assert_eq!(table.status, TableStatus::Playing);
        assert!(table.current_turn_id.is_some());
        assert!(table.paused_turn_remaining_ms.is_none());
        assert!(effects
            .schedule
            .iter()
            .any(|s| matches!(s, crate::engine::hand::ScheduledEffect::TurnTimeout { .. })));
    }

    #[test]
    fn pausing_a_waiting_table_resumes_to_waiting() {
        let mut table = Lifecycle::create_table(config()).unwrap();
        let host = table.config.creator_id;
        let dur = std::time::Duration::from_secs(30);

        Lifecycle::toggle_pause(&mut table, host, true, dur).unwrap();
        assert_eq!(table.status, TableStatus::Paused);
        Lifecycle::toggle_pause(&mut table, host, false, dur).unwrap();
        assert_eq!(table.status, TableStatus::Waiting);
    }

    #[test]
    fn delete_table_refuses_while_playing() {
        let mut table = Lifecycle::create_table(config()).unwrap();
        table.status = TableStatus::Playing;
        let err = Lifecycle::delete_table(&table, table.config.creator_id);
        assert_eq!(err.unwrap_err(), EngineError::RoomInPlay);
    }
}
