/// pure schema definitions for the postgres-backed store. No I/O; every
/// method returns a `&'static str` naming the table's DDL and columns. This
/// adapter does row-level transactional writes, not bulk `COPY` loads, so
/// tables are stored as keyed JSONB blobs rather than typed columns.
pub trait Schema {
    fn name() -> &'static str;
    fn creates() -> &'static str;
    fn indices() -> &'static str;
    fn truncates() -> &'static str;
}

pub struct Tables;
pub struct Events;
pub struct PrivateCards;
pub struct Hands;
pub struct ScheduledTasks;

impl Schema for Tables {
    fn name() -> &'static str {
        "tables"
    }
    fn creates() -> &'static str {
        "CREATE TABLE IF NOT EXISTS tables (
            id      UUID PRIMARY KEY,
            version BIGINT NOT NULL,
            data    JSONB NOT NULL
        )"
    }
    fn indices() -> &'static str {
        ""
    }
    fn truncates() -> &'static str {
        "TRUNCATE TABLE tables"
    }
}

impl Schema for Events {
    fn name() -> &'static str {
        "events"
    }
    fn creates() -> &'static str {
        "CREATE TABLE IF NOT EXISTS events (
            id           UUID PRIMARY KEY,
            table_id     UUID NOT NULL,
            hand_number  BIGINT NOT NULL,
            at           TIMESTAMPTZ NOT NULL,
            data         JSONB NOT NULL
        )"
    }
    fn indices() -> &'static str {
        "CREATE INDEX IF NOT EXISTS events_table_hand_idx ON events (table_id, hand_number, at)"
    }
    fn truncates() -> &'static str {
        "TRUNCATE TABLE events"
    }
}

impl Schema for PrivateCards {
    fn name() -> &'static str {
        "private_cards"
    }
    fn creates() -> &'static str {
        "CREATE TABLE IF NOT EXISTS private_cards (
            table_id    UUID NOT NULL,
            hand_number BIGINT NOT NULL,
            player_id   UUID NOT NULL,
            hole        JSONB NOT NULL,
            PRIMARY KEY (table_id, hand_number, player_id)
        )"
    }
    fn indices() -> &'static str {
        ""
    }
    fn truncates() -> &'static str {
        "TRUNCATE TABLE private_cards"
    }
}

impl Schema for Hands {
    fn name() -> &'static str {
        "hands"
    }
    fn creates() -> &'static str {
        "CREATE TABLE IF NOT EXISTS hands (
            table_id    UUID NOT NULL,
            hand_number BIGINT NOT NULL,
            data        JSONB NOT NULL,
            PRIMARY KEY (table_id, hand_number)
        )"
    }
    fn indices() -> &'static str {
        ""
    }
    fn truncates() -> &'static str {
        "TRUNCATE TABLE hands"
    }
}

/// backing store for the durable task queue (`scheduler::queue`), so a
/// scheduled turn/showdown/win-by-fold/next-hand deadline survives a
/// process restart.
impl Schema for ScheduledTasks {
    fn name() -> &'static str {
        "scheduled_tasks"
    }
    fn creates() -> &'static str {
        "CREATE TABLE IF NOT EXISTS scheduled_tasks (
            id        UUID PRIMARY KEY,
            table_id  UUID NOT NULL,
            token     UUID NOT NULL,
            kind      TEXT NOT NULL,
            run_at    TIMESTAMPTZ NOT NULL,
            delivered BOOLEAN NOT NULL DEFAULT FALSE
        )"
    }
    fn indices() -> &'static str {
        "CREATE INDEX IF NOT EXISTS scheduled_tasks_due_idx ON scheduled_tasks (run_at) WHERE NOT delivered"
    }
    fn truncates() -> &'static str {
        "TRUNCATE TABLE scheduled_tasks"
    }
}
