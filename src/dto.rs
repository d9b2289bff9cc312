//! plain, explicitly (de)serialized request/response bodies for `hosting`.
//! Kept separate from `domain`/`engine` types so a wire-format change never
//! forces a change to the internal model.
use crate::domain::{Event, HandRecord, Seat, Table, TableConfig, TableStatus};
use crate::engine::Action;
use crate::ids::{Chips, PlayerId, SeatIndex, TableId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTableRequest {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub min_buy_in: Chips,
    pub max_buy_in: Chips,
    pub turn_timeout_secs: Option<u64>,
    pub max_seats: u8,
    pub auto_next: bool,
    pub creator_id: PlayerId,
}

impl From<CreateTableRequest> for TableConfig {
    fn from(req: CreateTableRequest) -> Self {
        TableConfig {
            small_blind: req.small_blind,
            big_blind: req.big_blind,
            min_buy_in: req.min_buy_in,
            max_buy_in: req.max_buy_in,
            turn_timeout_secs: req.turn_timeout_secs.unwrap_or(30),
            max_seats: req.max_seats,
            auto_next: req.auto_next,
            creator_id: req.creator_id,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TableCreatedResponse {
    pub table_id: TableId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JoinSeatRequest {
    pub player_id: PlayerId,
    pub display_name: String,
    pub seat: SeatIndex,
    pub buy_in: Chips,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaveSeatRequest {
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlayerActionRequest {
    pub player_id: PlayerId,
    pub action: Action,
    pub turn_id: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ShowCardsRequest {
    pub player_id: PlayerId,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostRequest {
    pub requester_id: PlayerId,
}

/// the table snapshot returned to any caller. Private hole cards never
/// appear here: a seat's `hole` field is `#[serde(skip)]`, so only
/// `hole_cards_shown` (populated by a legal reveal) ever crosses the wire.
/// The owning player's own hand is layered on separately by the handler
/// from `Store::read_private_cards`.
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    pub id: TableId,
    pub status: TableStatus,
    pub hand_number: u64,
    pub pot: Chips,
    pub board: Vec<crate::cards::Card>,
    pub dealer_seat: SeatIndex,
    pub current_turn: Option<SeatIndex>,
    pub current_bet: Chips,
    pub seats: Vec<Option<Seat>>,
}

impl From<&Table> for TableSnapshot {
    fn from(table: &Table) -> Self {
        Self {
            id: table.id,
            status: table.status,
            hand_number: table.hand_number,
            pot: table.pot,
            board: table.board.cards().to_vec(),
            dealer_seat: table.dealer_seat,
            current_turn: table.current_turn,
            current_bet: table.current_bet,
            seats: table.seats.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct EventLogResponse {
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, Serialize)]
pub struct HandRecordResponse {
    pub record: Option<HandRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
}

impl From<crate::errors::EngineError> for ErrorResponse {
    fn from(err: crate::errors::EngineError) -> Self {
        Self { code: err.to_string() }
    }
}
