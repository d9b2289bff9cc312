use crate::cards::Hole;
use crate::ids::{PlayerId, TableId};
use serde::{Deserialize, Serialize};

/// the two hole cards dealt to a seated player during the current hand.
/// Physically isolated from the public `Table`/`Seat` documents: readable
/// only by the owning player or by the engine during showdown reveal, and
/// deleted unconditionally at hand resolution. The in-memory store keeps
/// these alongside `Seat::hole` (which is never serialized); the postgres
/// store keeps them in their own table per the persistence layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrivateHoleCards {
    pub table_id: TableId,
    pub hand_number: u64,
    pub player_id: PlayerId,
    pub hole: Hole,
}
