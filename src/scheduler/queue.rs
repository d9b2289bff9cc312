use crate::engine::ScheduledEffect;
use crate::errors::Result;
use crate::ids::TableId;
use futures::future::BoxFuture;
use futures::StreamExt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::time::DelayQueue;
use uuid::Uuid;

/// what a delivered task carries back to the handler: which table, which
/// kind of deadline, and the token it was minted with.
#[derive(Debug, Clone, Copy)]
pub struct Delivery {
    pub table_id: TableId,
    pub token: Uuid,
    pub kind: super::tokens::TokenKind,
}

impl From<&ScheduledEffect> for (Uuid, super::tokens::TokenKind, Duration) {
    fn from(effect: &ScheduledEffect) -> Self {
        use super::tokens::TokenKind;
        match *effect {
            ScheduledEffect::TurnTimeout { turn_id, after } => (turn_id, TokenKind::Turn, after),
            ScheduledEffect::ShowdownResolve { showdown_id, after } => {
                (showdown_id, TokenKind::Showdown, after)
            }
            ScheduledEffect::WinByFoldTimeout { win_by_fold_id, after } => {
                (win_by_fold_id, TokenKind::WinByFold, after)
            }
            ScheduledEffect::StartNextHand { next_hand_id, after } => {
                (next_hand_id, TokenKind::NextHand, after)
            }
        }
    }
}

pub type TaskHandler = Arc<dyn Fn(Delivery) -> BoxFuture<'static, ()> + Send + Sync>;

/// the durable delayed-delivery queue the task-timer contract requires:
/// enqueue only ever happens after the caller's transaction has committed.
/// This crate ships one concrete implementation (`InProcessQueue`, backed
/// by `tokio_util::time::DelayQueue`) for the `TASK_QUEUE_LOCATION=in_process`
/// deployment mode; the `Durable` mode additionally persists each task to
/// the `scheduled_tasks` table (see `persistence::postgres::schema`) so a
/// restart doesn't lose in-flight deadlines, with `scheduler::sweeper`
/// covering deliveries that are missed regardless.
#[async_trait::async_trait]
pub trait TaskQueue: Send + Sync {
    async fn enqueue(&self, table_id: TableId, effect: ScheduledEffect) -> Result<()>;
}

/// pairs a `tokio::time::timeout` with a channel receive to implement an
/// in-process per-table turn deadline, generalized to arbitrarily many
/// tables and all four token
/// kinds via a single `DelayQueue` dispatcher task.
pub struct InProcessQueue {
    tx: mpsc::UnboundedSender<(Delivery, Duration)>,
}

impl InProcessQueue {
    pub fn new(handler: TaskHandler) -> Self {
        let (tx, mut rx) = mpsc::unbounded_channel::<(Delivery, Duration)>();
        tokio::spawn(async move {
            let mut delay_queue: DelayQueue<Delivery> = DelayQueue::new();
            loop {
                tokio::select! {
                    received = rx.recv() => match received {
                        Some((delivery, after)) => {
                            delay_queue.insert(delivery, after);
                        }
                        None if delay_queue.is_empty() => break,
                        None => {}
                    },
                    expired = delay_queue.next(), if !delay_queue.is_empty() => {
                        if let Some(expired) = expired {
                            (handler)(expired.into_inner()).await;
                        }
                    }
                }
            }
        });
        Self { tx }
    }
}

#[async_trait::async_trait]
impl TaskQueue for InProcessQueue {
    async fn enqueue(&self, table_id: TableId, effect: ScheduledEffect) -> Result<()> {
        let (token, kind, after): (Uuid, super::tokens::TokenKind, Duration) = (&effect).into();
        let delivery = Delivery { table_id, token, kind };
        self.tx
            .send((delivery, after))
            .map_err(|_| crate::errors::EngineError::Storage("task queue closed".to_string()))
    }
}
