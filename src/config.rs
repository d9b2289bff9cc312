use std::env;
use std::time::Duration;

/// startup configuration loaded once from the environment (`BIND_ADDR`,
/// `DATABASE_URL`, and friends).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub bind_addr: String,
    pub database_url: Option<String>,
    pub task_queue_location: TaskQueueLocation,
    pub default_turn_timeout: Duration,
    pub idle_table_close: Duration,
    pub showdown_admire: Duration,
    pub win_by_fold_reveal: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskQueueLocation {
    InProcess,
    Durable,
}

impl EngineConfig {
    pub fn from_env() -> Self {
        Self {
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string()),
            database_url: env::var("DATABASE_URL").ok(),
            task_queue_location: match env::var("TASK_QUEUE_LOCATION").as_deref() {
                Ok("durable") => TaskQueueLocation::Durable,
                _ => TaskQueueLocation::InProcess,
            },
            default_turn_timeout: Duration::from_secs(env_u64("TABLE_DEFAULT_TURN_TIMEOUT", 30)),
            idle_table_close: Duration::from_secs(env_u64("IDLE_TABLE_CLOSE_SECONDS", 3600)),
            showdown_admire: Duration::from_millis(env_u64("SHOWDOWN_ADMIRE_MS", 5000)),
            win_by_fold_reveal: Duration::from_secs(env_u64("WIN_BY_FOLD_REVEAL_SECONDS", 5)),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
            database_url: None,
            task_queue_location: TaskQueueLocation::InProcess,
            default_turn_timeout: Duration::from_secs(30),
            idle_table_close: Duration::from_secs(3600),
            showdown_admire: Duration::from_millis(5000),
            win_by_fold_reveal: Duration::from_secs(5),
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
