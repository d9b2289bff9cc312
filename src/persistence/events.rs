use crate::domain::{Event, EventKind};
use crate::ids::TableId;

/// wraps the raw `EventKind`s an `engine::hand::Effects` batch carries into
/// persistable, timestamped `Event`s, stamping them with the table and hand
/// number they belong to. Kept in its own module (rather than folded into
/// `Store`) because it's the one piece of the persistence layer that is
/// pure and needs no storage handle.
pub fn stamp(table_id: TableId, hand_number: u64, kinds: Vec<EventKind>) -> Vec<Event> {
    kinds
        .into_iter()
        .map(|kind| Event::new(table_id, hand_number, kind))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::PlayerId;

    #[test]
    fn stamps_every_event_with_the_same_table_and_hand() {
        let table_id = TableId::new();
        let kinds = vec![
            EventKind::SpectatorJoined { player_id: PlayerId::new() },
            EventKind::HandStarted { hand_number: 4 },
        ];
        let events = stamp(table_id, 4, kinds);
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.table_id == table_id && e.hand_number == 4));
    }
}
