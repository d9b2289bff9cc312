use crate::domain::Table;
use uuid::Uuid;

/// the four independent zombie-prevention tokens a scheduled task can carry.
/// A delivery is adjudicated only if its token still matches the table's
/// live token of the same kind; otherwise it's a benign "zombie ignored".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Turn,
    Showdown,
    WinByFold,
    NextHand,
}

impl TokenKind {
    fn live(self, table: &Table) -> Option<Uuid> {
        match self {
            TokenKind::Turn => table.current_turn_id,
            TokenKind::Showdown => table.showdown_id,
            TokenKind::WinByFold => table.win_by_fold_id,
            TokenKind::NextHand => table.next_hand_id,
        }
    }
}

/// true only if `table`'s live token of `kind` still equals `delivered`.
/// A stale or already-superseded delivery returns false and the caller
/// must treat it as a no-op rather than an error.
pub fn still_live(table: &Table, kind: TokenKind, delivered: Uuid) -> bool {
    kind.live(table) == Some(delivered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TableConfig;
    use crate::ids::{PlayerId, TableId};

    fn table() -> Table {
        Table::new(
            TableId::new(),
            TableConfig {
                small_blind: 1,
                big_blind: 2,
                min_buy_in: 40,
                max_buy_in: 200,
                turn_timeout_secs: 30,
                max_seats: 6,
                auto_next: true,
                creator_id: PlayerId::new(),
            },
        )
    }

    #[test]
    fn mismatched_turn_token_is_not_live() {
        let mut t = table();
        t.current_turn_id = Some(Uuid::new_v4());
        assert!(!still_live(&t, TokenKind::Turn, Uuid::new_v4()));
    }

    #[test]
    fn matching_turn_token_is_live() {
        let mut t = table();
        let id = Uuid::new_v4();
        t.current_turn_id = Some(id);
        assert!(still_live(&t, TokenKind::Turn, id));
    }

    #[test]
    fn no_live_token_rejects_any_delivery() {
        let t = table();
        assert!(!still_live(&t, TokenKind::Showdown, Uuid::new_v4()));
    }
}
