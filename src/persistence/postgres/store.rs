use crate::cards::Hole;
use crate::domain::{Event, HandRecord, Table};
use crate::errors::{EngineError, Result};
use crate::ids::{PlayerId, TableId};
use crate::persistence::store::Store;
use std::sync::Arc;
use tokio_postgres::Client;

/// `Store` over `tokio-postgres`. Table/event/hand documents are kept as
/// JSONB blobs behind a typed id/version column rather than normalized
/// columns, per the persistence layout's "semantic, not physical" note —
/// the adapter is free to map onto any K/V or document store, and a JSONB
/// column is the closest postgres equivalent to one.
pub struct PostgresStore {
    client: Arc<Client>,
}

impl PostgresStore {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    fn map_pg(e: tokio_postgres::Error) -> EngineError {
        EngineError::Storage(e.to_string())
    }
    fn map_json(e: serde_json::Error) -> EngineError {
        EngineError::Storage(e.to_string())
    }
}

#[async_trait::async_trait]
impl Store for PostgresStore {
    async fn create_table(&self, table: Table) -> Result<()> {
        let data = serde_json::to_value(&table).map_err(Self::map_json)?;
        self.client
            .execute(
                "INSERT INTO tables (id, version, data) VALUES ($1, $2, $3)",
                &[&table.id.as_uuid(), &(table.version as i64), &data],
            )
            .await
            .map_err(Self::map_pg)?;
        Ok(())
    }

    async fn get_table(&self, id: TableId) -> Result<Table> {
        let row = self
            .client
            .query_opt("SELECT data FROM tables WHERE id = $1", &[&id.as_uuid()])
            .await
            .map_err(Self::map_pg)?
            .ok_or(EngineError::GameNotFound)?;
        let data: serde_json::Value = row.get(0);
        serde_json::from_value(data).map_err(Self::map_json)
    }

    async fn list_table_ids(&self) -> Result<Vec<TableId>> {
        let rows = self
            .client
            .query("SELECT id FROM tables", &[])
            .await
            .map_err(Self::map_pg)?;
        Ok(rows
            .into_iter()
            .map(|row| TableId::from(row.get::<_, uuid::Uuid>(0)))
            .collect())
    }

    async fn delete_table(&self, id: TableId) -> Result<()> {
        let affected = self
            .client
            .execute("DELETE FROM tables WHERE id = $1", &[&id.as_uuid()])
            .await
            .map_err(Self::map_pg)?;
        if affected == 0 {
            return Err(EngineError::GameNotFound);
        }
        Ok(())
    }

    async fn try_commit(&self, table: &Table) -> Result<()> {
        let expected_previous = (table.version - 1) as i64;
        let data = serde_json::to_value(table).map_err(Self::map_json)?;
        let affected = self
            .client
            .execute(
                "UPDATE tables SET version = $1, data = $2 WHERE id = $3 AND version = $4",
                &[
                    &(table.version as i64),
                    &data,
                    &table.id.as_uuid(),
                    &expected_previous,
                ],
            )
            .await
            .map_err(Self::map_pg)?;
        if affected == 0 {
            return Err(EngineError::TransactionConflict);
        }
        Ok(())
    }

    async fn append_events(&self, events: Vec<Event>) -> Result<()> {
        for event in events {
            let data = serde_json::to_value(&event.kind).map_err(Self::map_json)?;
            self.client
                .execute(
                    "INSERT INTO events (id, table_id, hand_number, at, data) VALUES ($1, $2, $3, $4, $5)",
                    &[
                        &event.id,
                        &event.table_id.as_uuid(),
                        &(event.hand_number as i64),
                        &event.at,
                        &data,
                    ],
                )
                .await
                .map_err(Self::map_pg)?;
        }
        Ok(())
    }

    async fn list_events(&self, table_id: TableId, hand_number: u64) -> Result<Vec<Event>> {
        let rows = self
            .client
            .query(
                "SELECT id, at, data FROM events WHERE table_id = $1 AND hand_number = $2 ORDER BY at, id",
                &[&table_id.as_uuid(), &(hand_number as i64)],
            )
            .await
            .map_err(Self::map_pg)?;
        rows.into_iter()
            .map(|row| {
                let kind = serde_json::from_value(row.get(2)).map_err(Self::map_json)?;
                Ok(Event {
                    id: row.get(0),
                    table_id,
                    hand_number,
                    at: row.get(1),
                    kind,
                })
            })
            .collect()
    }

    async fn write_private_cards(
        &self,
        table_id: TableId,
        hand_number: u64,
        player_id: PlayerId,
        hole: Hole,
    ) -> Result<()> {
        let data = serde_json::to_value(&hole).map_err(Self::map_json)?;
        self.client
            .execute(
                "INSERT INTO private_cards (table_id, hand_number, player_id, hole)
                 VALUES ($1, $2, $3, $4)
                 ON CONFLICT (table_id, hand_number, player_id) DO UPDATE SET hole = EXCLUDED.hole",
                &[
                    &table_id.as_uuid(),
                    &(hand_number as i64),
                    &player_id.as_uuid(),
                    &data,
                ],
            )
            .await
            .map_err(Self::map_pg)?;
        Ok(())
    }

    async fn read_private_cards(
        &self,
        table_id: TableId,
        hand_number: u64,
        player_id: PlayerId,
    ) -> Result<Option<Hole>> {
        let row = self
            .client
            .query_opt(
                "SELECT hole FROM private_cards WHERE table_id = $1 AND hand_number = $2 AND player_id = $3",
                &[&table_id.as_uuid(), &(hand_number as i64), &player_id.as_uuid()],
            )
            .await
            .map_err(Self::map_pg)?;
        row.map(|row| serde_json::from_value(row.get(0)).map_err(Self::map_json))
            .transpose()
    }

    async fn clear_private_cards(&self, table_id: TableId, hand_number: u64) -> Result<()> {
        self.client
            .execute(
                "DELETE FROM private_cards WHERE table_id = $1 AND hand_number = $2",
                &[&table_id.as_uuid(), &(hand_number as i64)],
            )
            .await
            .map_err(Self::map_pg)?;
        Ok(())
    }

    async fn save_hand_record(&self, record: HandRecord) -> Result<()> {
        let data = serde_json::to_value(&record).map_err(Self::map_json)?;
        self.client
            .execute(
                "INSERT INTO hands (table_id, hand_number, data) VALUES ($1, $2, $3)
                 ON CONFLICT (table_id, hand_number) DO NOTHING",
                &[
                    &record.table_id.as_uuid(),
                    &(record.hand_number as i64),
                    &data,
                ],
            )
            .await
            .map_err(Self::map_pg)?;
        Ok(())
    }

    async fn get_hand_record(&self, table_id: TableId, hand_number: u64) -> Result<Option<HandRecord>> {
        let row = self
            .client
            .query_opt(
                "SELECT data FROM hands WHERE table_id = $1 AND hand_number = $2",
                &[&table_id.as_uuid(), &(hand_number as i64)],
            )
            .await
            .map_err(Self::map_pg)?;
        row.map(|row| serde_json::from_value(row.get(0)).map_err(Self::map_json))
            .transpose()
    }
}
