use crate::ids::{PlayerId, SeatIndex, TableId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// an append-only audit entry. Lives in a logical subcollection under its
/// table rather than an embedded array: the server-assigned timestamp
/// cannot live inside an array element of the parent document, and this
/// crate's persistence layer follows that constraint from the start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub table_id: TableId,
    pub hand_number: u64,
    pub at: DateTime<Utc>,
    pub kind: EventKind,
}

impl Event {
    pub fn new(table_id: TableId, hand_number: u64, kind: EventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            table_id,
            hand_number,
            at: Utc::now(),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    Action {
        round: String,
        player_id: PlayerId,
        seat: SeatIndex,
        action: String,
        amount: u64,
    },
    Timeout {
        player_id: PlayerId,
        seat: SeatIndex,
        action: String,
    },
    SpectatorJoined {
        player_id: PlayerId,
    },
    SpectatorLeft {
        player_id: PlayerId,
    },
    ShowdownReveal {
        player_id: PlayerId,
        seat: SeatIndex,
    },
    HandStarted {
        hand_number: u64,
    },
    HandEnded {
        reason: String,
    },
}
