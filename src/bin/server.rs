//! hosting server binary
//!
//! runs the HTTP server for live poker tables: table lifecycle, player
//! actions, and the scheduled-task delivery endpoints.

use tablestakes::config::{EngineConfig, TaskQueueLocation};
use tablestakes::hosting::{handlers, Casino, Server};
use tablestakes::persistence::{MemoryStore, PostgresStore, Store};
use tablestakes::scheduler::{InProcessQueue, TaskQueue};
use std::sync::Arc;
use tokio::sync::OnceCell;

#[tokio::main]
async fn main() {
    tablestakes::init();
    let config = EngineConfig::from_env();

    let store: Arc<dyn Store> = match &config.database_url {
        Some(url) => Arc::new(PostgresStore::new(tablestakes::db(url).await)),
        None => Arc::new(MemoryStore::default()),
    };

    if config.task_queue_location == TaskQueueLocation::Durable {
        panic!("durable task queue deployment is driven by an external task runner hitting the /tasks/* endpoints, not this binary");
    }

    // the in-process queue's delivery handler needs the `Casino` it's
    // about to become part of, to re-enter `handlers::deliver` on expiry.
    // `Casino` isn't constructible until the queue exists, so the handler
    // closure reads it out of a cell filled in once construction finishes.
    let casino_cell: Arc<OnceCell<Arc<Casino>>> = Arc::new(OnceCell::new());
    let handler_cell = casino_cell.clone();
    let queue: Arc<dyn TaskQueue> = Arc::new(InProcessQueue::new(Arc::new(move |delivery| {
        let cell = handler_cell.clone();
        Box::pin(async move {
            if let Some(casino) = cell.get() {
                if let Err(e) = handlers::deliver(casino, delivery).await {
                    log::warn!("scheduled task delivery failed: {}", e);
                }
            }
        })
    })));

    let casino = Arc::new(Casino::new(store, queue, config));
    casino_cell.set(casino.clone()).ok();

    let sweep_casino = casino.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(5));
        loop {
            ticker.tick().await;
            let result = tablestakes::scheduler::sweeper::sweep_once(
                &*sweep_casino.store,
                &*sweep_casino.queue,
                sweep_casino.config.default_turn_timeout,
                sweep_casino.config.showdown_admire,
                sweep_casino.config.win_by_fold_reveal,
            )
            .await;
            if let Err(e) = result {
                log::warn!("turn sweep failed: {}", e);
            }
        }
    });

    let idle_casino = casino.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(std::time::Duration::from_secs(60));
        loop {
            ticker.tick().await;
            let result = tablestakes::scheduler::sweeper::sweep_idle(
                &*idle_casino.store,
                idle_casino.config.idle_table_close,
            )
            .await;
            if let Err(e) = result {
                log::warn!("idle sweep failed: {}", e);
            }
        }
    });

    Server::run(casino).await.expect("server exited");
}
