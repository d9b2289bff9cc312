use super::store::Store;
use crate::cards::Hole;
use crate::domain::{Event, HandRecord, Table};
use crate::errors::{EngineError, Result};
use crate::ids::{PlayerId, TableId};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// in-process `Store` backed by a registry of tables behind a lock. Exercises
/// the engine in unit and end-to-end tests without a database.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<TableId, Table>>,
    events: RwLock<HashMap<(TableId, u64), Vec<Event>>>,
    private_cards: RwLock<HashMap<(TableId, u64, PlayerId), Hole>>,
    hand_records: RwLock<HashMap<(TableId, u64), HandRecord>>,
}

#[async_trait::async_trait]
impl Store for MemoryStore {
    async fn create_table(&self, table: Table) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.contains_key(&table.id) {
            return Err(EngineError::Storage("table already exists".to_string()));
        }
        tables.insert(table.id, table);
        Ok(())
    }

    async fn get_table(&self, id: TableId) -> Result<Table> {
        self.tables
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(EngineError::GameNotFound)
    }

    async fn list_table_ids(&self) -> Result<Vec<TableId>> {
        Ok(self.tables.read().await.keys().copied().collect())
    }

    async fn delete_table(&self, id: TableId) -> Result<()> {
        self.tables
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(EngineError::GameNotFound)
    }

    async fn try_commit(&self, table: &Table) -> Result<()> {
        let mut tables = self.tables.write().await;
        let current = tables.get(&table.id).ok_or(EngineError::GameNotFound)?;
        if current.version + 1 != table.version {
            return Err(EngineError::TransactionConflict);
        }
        tables.insert(table.id, table.clone());
        Ok(())
    }

    async fn append_events(&self, events: Vec<Event>) -> Result<()> {
        let mut store = self.events.write().await;
        for event in events {
            store
                .entry((event.table_id, event.hand_number))
                .or_default()
                .push(event);
        }
        Ok(())
    }

    async fn list_events(&self, table_id: TableId, hand_number: u64) -> Result<Vec<Event>> {
        Ok(self
            .events
            .read()
            .await
            .get(&(table_id, hand_number))
            .cloned()
            .unwrap_or_default())
    }

    async fn write_private_cards(
        &self,
        table_id: TableId,
        hand_number: u64,
        player_id: PlayerId,
        hole: Hole,
    ) -> Result<()> {
        self.private_cards
            .write()
            .await
            .insert((table_id, hand_number, player_id), hole);
        Ok(())
    }

    async fn read_private_cards(
        &self,
        table_id: TableId,
        hand_number: u64,
        player_id: PlayerId,
    ) -> Result<Option<Hole>> {
        Ok(self
            .private_cards
            .read()
            .await
            .get(&(table_id, hand_number, player_id))
            .copied())
    }

    async fn clear_private_cards(&self, table_id: TableId, hand_number: u64) -> Result<()> {
        self.private_cards
            .write()
            .await
            .retain(|(t, h, _), _| *t != table_id || *h != hand_number);
        Ok(())
    }

    async fn save_hand_record(&self, record: HandRecord) -> Result<()> {
        self.hand_records
            .write()
            .await
            .insert((record.table_id, record.hand_number), record);
        Ok(())
    }

    async fn get_hand_record(&self, table_id: TableId, hand_number: u64) -> Result<Option<HandRecord>> {
        Ok(self
            .hand_records
            .read()
            .await
            .get(&(table_id, hand_number))
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TableConfig;

    fn table(id: TableId) -> Table {
        Table::new(
            id,
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

    #[tokio::test]
    async fn commit_rejects_stale_version() {
        let store = MemoryStore::default();
        let id = TableId::new();
        store.create_table(table(id)).await.unwrap();

        let mut stale = store.get_table(id).await.unwrap();
        let mut fresh = store.get_table(id).await.unwrap();

        fresh.version += 1;
        store.try_commit(&fresh).await.unwrap();

        stale.version += 1;
        let err = store.try_commit(&stale).await.unwrap_err();
        assert_eq!(err, EngineError::TransactionConflict);
    }

    #[tokio::test]
    async fn private_cards_round_trip_and_clear() {
        let store = MemoryStore::default();
        let table_id = TableId::new();
        let player_id = PlayerId::new();
        let hole = Hole::new(crate::cards::Card::from(0u8), crate::cards::Card::from(1u8));
        store
            .write_private_cards(table_id, 1, player_id, hole)
            .await
            .unwrap();
        assert!(store
            .read_private_cards(table_id, 1, player_id)
            .await
            .unwrap()
            .is_some());
        store.clear_private_cards(table_id, 1).await.unwrap();
        assert!(store
            .read_private_cards(table_id, 1, player_id)
            .await
            .unwrap()
            .is_none());
    }
}
