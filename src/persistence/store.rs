use crate::cards::Hole;
use crate::domain::{Event, HandRecord, Table};
use crate::errors::{EngineError, Result};
use crate::ids::{PlayerId, TableId};
use rand::Rng;
use std::time::Duration;

/// the storage-agnostic seam every engine mutation goes through: per-table
/// optimistic transactions, an append-only event subcollection, and
/// per-player private-card writes that other players cannot read.
///
/// `get_table`/`try_commit` are the two halves of the read-compute-write
/// discipline; callers must not interleave a write to one table with a read
/// of another inside the same logical operation. [[transact]] is the
/// intended entry point rather than calling these directly.
#[async_trait::async_trait]
pub trait Store: Send + Sync {
    async fn create_table(&self, table: Table) -> Result<()>;
    async fn get_table(&self, id: TableId) -> Result<Table>;
    async fn list_table_ids(&self) -> Result<Vec<TableId>>;
    async fn delete_table(&self, id: TableId) -> Result<()>;

    /// conditionally persists `table`, succeeding only if the stored
    /// version still equals `table.version - 1`. Returns
    /// `TRANSACTION_CONFLICT` otherwise.
    async fn try_commit(&self, table: &Table) -> Result<()>;

    async fn append_events(&self, events: Vec<Event>) -> Result<()>;
    async fn list_events(&self, table_id: TableId, hand_number: u64) -> Result<Vec<Event>>;

    async fn write_private_cards(
        &self,
        table_id: TableId,
        hand_number: u64,
        player_id: PlayerId,
        hole: Hole,
    ) -> Result<()>;
    async fn read_private_cards(
        &self,
        table_id: TableId,
        hand_number: u64,
        player_id: PlayerId,
    ) -> Result<Option<Hole>>;
    async fn clear_private_cards(&self, table_id: TableId, hand_number: u64) -> Result<()>;

    async fn save_hand_record(&self, record: HandRecord) -> Result<()>;
    async fn get_hand_record(&self, table_id: TableId, hand_number: u64) -> Result<Option<HandRecord>>;
}

const MAX_RETRIES: u32 = 3;

/// runs `mutate` against the freshest copy of a table, retrying up to
/// `MAX_RETRIES` times with jittered backoff on `TRANSACTION_CONFLICT`, per
/// the bounded-retry contract. `mutate` must be pure with respect to
/// anything but the `&mut Table` it's handed — no interleaved reads of
/// other tables' state.
pub async fn transact<S, T, F>(store: &S, id: TableId, mut mutate: F) -> Result<T>
where
    S: Store + ?Sized,
    F: FnMut(&mut Table) -> Result<T>,
{
    let mut attempt = 0;
    loop {
        let mut table = store.get_table(id).await?;
        let expected = table.version;
        let outcome = mutate(&mut table)?;
        table.version = expected + 1;
        table.last_activity_at = chrono::Utc::now();
        match store.try_commit(&table).await {
            Ok(()) => return Ok(outcome),
            Err(EngineError::TransactionConflict) if attempt < MAX_RETRIES => {
                attempt += 1;
                tokio::time::sleep(backoff(attempt)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

fn backoff(attempt: u32) -> Duration {
    let base = 10u64 * 2u64.pow(attempt);
    let jitter = rand::rng().random_range(0..base);
    Duration::from_millis(base + jitter)
}
