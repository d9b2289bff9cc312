use crate::domain::TableStatus;
use crate::engine::HandMachine;
use crate::errors::Result;
use crate::ops;
use crate::persistence::Store;
use crate::scheduler::queue::TaskQueue;
use std::time::Duration;

/// best-effort fallback adjudication: scans every table and force-applies
/// a turn timeout wherever the wall-clock deadline has already elapsed and
/// no task-queue delivery arrived to clear it. Idempotent — if a real
/// delivery beat the sweeper to it, `current_turn_deadline` is already
/// `None` or the turn has moved on, and the table is skipped. Exists
/// because the task queue is a best-effort mechanism: an `enqueue` call
/// failing after a commit must not leave a table stuck forever.
pub async fn sweep_once<S: Store + ?Sized, Q: TaskQueue + ?Sized>(
    store: &S,
    queue: &Q,
    turn_timeout: Duration,
    showdown_admire: Duration,
    win_by_fold_reveal: Duration,
) -> Result<u32> {
    let mut adjudicated = 0;
    for table_id in store.list_table_ids().await? {
        let due = {
            let table = store.get_table(table_id).await?;
            table.status == TableStatus::Playing
                && table
                    .current_turn_deadline
                    .is_some_and(|deadline| deadline <= chrono::Utc::now())
        };
        if !due {
            continue;
        }
        let mut skipped = false;
        ops::apply(store, queue, table_id, |table| {
            if table.status != TableStatus::Playing
                || table.current_turn.is_none()
                || !table
                    .current_turn_deadline
                    .is_some_and(|deadline| deadline <= chrono::Utc::now())
            {
                skipped = true;
                return Ok(Default::default());
            }
            Ok(HandMachine::apply_timeout(
                table,
                turn_timeout,
                showdown_admire,
                win_by_fold_reveal,
            ))
        })
        .await?;
        if !skipped {
            adjudicated += 1;
        }
    }
    Ok(adjudicated)
}

/// closes every WAITING table whose `last_activity_at` is older than
/// `idle_table_close`. Grounded in the same idempotent-rescan shape as
/// [`sweep_once`]; a table that picked back up (`startHand`, a join) before
/// the sweep runs is simply skipped on the re-check inside the transaction.
pub async fn sweep_idle<S: Store + ?Sized>(store: &S, idle_table_close: Duration) -> Result<u32> {
    let mut closed = 0;
    let cutoff = chrono::Utc::now()
        - chrono::Duration::from_std(idle_table_close).unwrap_or(chrono::Duration::hours(1));
    for table_id in store.list_table_ids().await? {
        let due = {
            let table = store.get_table(table_id).await?;
            table.status == TableStatus::Waiting && table.last_activity_at <= cutoff
        };
        if !due {
            continue;
        }
        crate::persistence::store::transact(store, table_id, |table| {
            if table.status == TableStatus::Waiting && table.last_activity_at <= cutoff {
                table.status = TableStatus::Closed;
            }
            Ok(())
        })
        .await?;
        closed += 1;
    }
    Ok(closed)
}
