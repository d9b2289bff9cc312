use crate::config::EngineConfig;
use crate::errors::Result;
use crate::persistence::Store;
use crate::scheduler::TaskQueue;
use std::sync::Arc;

/// the shared server state every route handler closes over: the table
/// store, the task queue tables get scheduled into, and the startup
/// configuration. A thin façade over the persistence adapter — table
/// state lives in `Store`, not in this struct.
pub struct Casino {
    pub store: Arc<dyn Store>,
    pub queue: Arc<dyn TaskQueue>,
    pub config: EngineConfig,
}

impl Casino {
    pub fn new(store: Arc<dyn Store>, queue: Arc<dyn TaskQueue>, config: EngineConfig) -> Self {
        Self { store, queue, config }
    }

    pub fn turn_timeout(&self, table: &crate::domain::Table) -> std::time::Duration {
        std::time::Duration::from_secs(table.config.turn_timeout_secs)
    }

    pub async fn table_exists(&self, id: crate::ids::TableId) -> Result<bool> {
        Ok(self.store.list_table_ids().await?.contains(&id))
    }
}
