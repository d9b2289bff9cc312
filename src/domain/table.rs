use super::seat::{Seat, SeatStatus};
use crate::cards::{Board, Street};
use crate::ids::{Chips, PlayerId, SeatIndex, TableId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableStatus {
    Waiting,
    Playing,
    Paused,
    Ended,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Round {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl From<Street> for Round {
    fn from(s: Street) -> Self {
        match s {
            Street::Preflop => Round::Preflop,
            Street::Flop => Round::Flop,
            Street::Turn => Round::Turn,
            Street::River => Round::River,
            Street::Showdown => Round::Showdown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    None,
    Showdown,
    ShowdownComplete,
    WinByFold,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
    pub turn_timeout_secs: u64,
    pub max_seats: u8,
    pub auto_next: bool,
    pub creator_id: PlayerId,
}

/// the authoritative per-table aggregate: configuration, public state, and
/// seats. Seats are addressed by `SeatIndex` into a fixed-size arena rather
/// than linked by pointer, per the engine's arena+index data model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub config: TableConfig,
    pub version: u64,
    /// bumped on every committed transaction; the idle-close sweeper closes
    /// a WAITING table once this falls far enough behind `Utc::now()`.
    pub last_activity_at: DateTime<Utc>,

    pub status: TableStatus,
    pub hand_number: u64,
    pub pot: Chips,
    pub board: Board,
    pub current_round: Option<Round>,
    pub dealer_seat: SeatIndex,
    pub current_turn: Option<SeatIndex>,
    pub current_turn_id: Option<Uuid>,
    /// wall-clock deadline for the open turn, used only by the best-effort
    /// sweeper to adjudicate a missed task-queue delivery; the task queue
    /// itself is driven by `ScheduledEffect::after` durations, not this.
    pub current_turn_deadline: Option<DateTime<Utc>>,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub last_aggressor_seat: Option<SeatIndex>,
    pub dead_money: Chips,
    pub stage: Stage,
    pub next_hand_id: Option<Uuid>,
    pub win_by_fold_id: Option<Uuid>,
    pub showdown_id: Option<Uuid>,
    pub consecutive_auto_actions: u32,
    /// one-shot host request (`setEndAfterHand`): when the in-flight hand
    /// resolves, land on ENDED instead of auto-starting or waiting for the
    /// next `startHand`. Cleared once acted on.
    pub end_after_hand: bool,

    /// true if the table was `Playing` (not merely `Waiting`) at the moment
    /// it was paused; tells `toggle_pause` which status to restore on resume.
    pub paused_was_playing: bool,
    /// the open turn's remaining time snapshotted at pause, so resume can
    /// re-arm a `TurnTimeout` for what's left rather than a fresh full turn.
    pub paused_turn_remaining_ms: Option<i64>,

    pub seats: Vec<Option<Seat>>,
}

impl Table {
    pub fn new(id: TableId, config: TableConfig) -> Self {
        let max_seats = config.max_seats as usize;
        Self {
            id,
            config,
            version: 0,
            last_activity_at: Utc::now(),
            status: TableStatus::Waiting,
            hand_number: 0,
            pot: 0,
            board: Board::new(),
            current_round: None,
            dealer_seat: SeatIndex::new(0),
            current_turn: None,
            current_turn_id: None,
            current_turn_deadline: None,
            current_bet: 0,
            min_raise: 0,
            last_aggressor_seat: None,
            dead_money: 0,
            stage: Stage::None,
            next_hand_id: None,
            win_by_fold_id: None,
            showdown_id: None,
            consecutive_auto_actions: 0,
            end_after_hand: false,
            paused_was_playing: false,
            paused_turn_remaining_ms: None,
            seats: vec![None; max_seats],
        }
    }

    pub fn seat(&self, idx: SeatIndex) -> Option<&Seat> {
        self.seats.get(usize::from(idx)).and_then(|s| s.as_ref())
    }

    pub fn seat_mut(&mut self, idx: SeatIndex) -> Option<&mut Seat> {
        self.seats.get_mut(usize::from(idx)).and_then(|s| s.as_mut())
    }

    pub fn occupied_seats(&self) -> impl Iterator<Item = (SeatIndex, &Seat)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|s| (SeatIndex::new(i as u8), s)))
    }

    pub fn find_seat_of(&self, player_id: PlayerId) -> Option<SeatIndex> {
        self.occupied_seats()
            .find(|(_, s)| s.player_id == player_id)
            .map(|(i, _)| i)
    }

    pub fn first_empty_seat(&self) -> Option<SeatIndex> {
        self.seats
            .iter()
            .position(|s| s.is_none())
            .map(|i| SeatIndex::new(i as u8))
    }

    /// seats eligible to be dealt into a hand: occupied, with chips, and
    /// not sitting out.
    pub fn eligible_for_hand(&self) -> Vec<SeatIndex> {
        self.occupied_seats()
            .filter(|(_, s)| s.chips > 0 && !matches!(s.status, SeatStatus::SittingOut))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn seats_contesting_pot(&self) -> Vec<SeatIndex> {
        self.occupied_seats()
            .filter(|(_, s)| s.status.contests_pot())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn non_folded_count(&self) -> usize {
        self.occupied_seats()
            .filter(|(_, s)| s.status.contests_pot())
            .count()
    }

    /// seats that can still voluntarily act this round.
    pub fn actionable_seats(&self) -> Vec<SeatIndex> {
        self.occupied_seats()
            .filter(|(_, s)| s.status.can_act())
            .map(|(i, _)| i)
            .collect()
    }

    /// the next occupied seat index clockwise from `from`, among seats
    /// satisfying `pred`, wrapping around the table exactly once.
    pub fn next_seat_matching(
        &self,
        from: SeatIndex,
        pred: impl Fn(&Seat) -> bool,
    ) -> Option<SeatIndex> {
        let n = self.seats.len();
        let start = usize::from(from);
        for step in 1..=n {
            let idx = (start + step) % n;
            if let Some(seat) = &self.seats[idx] {
                if pred(seat) {
                    return Some(SeatIndex::new(idx as u8));
                }
            }
        }
        None
    }
}
