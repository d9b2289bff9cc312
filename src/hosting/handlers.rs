use super::casino::Casino;
use crate::domain::TableStatus;
use crate::dto::*;
use crate::engine::{HandMachine, Lifecycle};
use crate::errors::{EngineError, Result};
use crate::ids::TableId;
use crate::ops;
use crate::persistence::store;
use crate::scheduler::{Delivery, TokenKind};

pub async fn create_table(casino: &Casino, req: CreateTableRequest) -> Result<TableCreatedResponse> {
    let table = Lifecycle::create_table(req.into())?;
    let table_id = table.id;
    casino.store.create_table(table).await?;
    Ok(TableCreatedResponse { table_id })
}

pub async fn join_seat(casino: &Casino, table_id: TableId, req: JoinSeatRequest) -> Result<TableSnapshot> {
    ops::apply(&*casino.store, &*casino.queue, table_id, move |table| {
        Lifecycle::join_seat(table, req.player_id, req.display_name.clone(), req.seat, req.buy_in)
    })
    .await?;
    let table = casino.store.get_table(table_id).await?;
    Ok(TableSnapshot::from(&table))
}

pub async fn leave_seat(casino: &Casino, table_id: TableId, req: LeaveSeatRequest) -> Result<()> {
    let config = casino.config.clone();
    ops::apply(&*casino.store, &*casino.queue, table_id, move |table| {
        let turn_timeout = std::time::Duration::from_secs(table.config.turn_timeout_secs);
        Lifecycle::leave_seat(table, req.player_id, turn_timeout, config.showdown_admire, config.win_by_fold_reveal)
    })
    .await?;
    Ok(())
}

pub async fn start_hand(casino: &Casino, table_id: TableId) -> Result<()> {
    ops::apply(&*casino.store, &*casino.queue, table_id, move |table| {
        let turn_timeout = std::time::Duration::from_secs(table.config.turn_timeout_secs);
        HandMachine::start_hand(table, turn_timeout)
    })
    .await?;
    Ok(())
}

pub async fn player_action(casino: &Casino, table_id: TableId, req: PlayerActionRequest) -> Result<()> {
    let config = casino.config.clone();
    ops::apply(&*casino.store, &*casino.queue, table_id, move |table| {
        let turn_timeout = std::time::Duration::from_secs(table.config.turn_timeout_secs);
        HandMachine::process_action(
            table,
            req.player_id,
            req.action,
            req.turn_id,
            turn_timeout,
            config.showdown_admire,
            config.win_by_fold_reveal,
        )
    })
    .await?;
    Ok(())
}

pub async fn show_cards(casino: &Casino, table_id: TableId, req: ShowCardsRequest) -> Result<()> {
    ops::apply(&*casino.store, &*casino.queue, table_id, move |table| {
        Lifecycle::show_cards(table, req.player_id)
    })
    .await?;
    Ok(())
}

pub async fn toggle_pause(casino: &Casino, table_id: TableId, req: HostRequest, pause: bool) -> Result<()> {
    ops::apply(&*casino.store, &*casino.queue, table_id, move |table| {
        let turn_timeout = std::time::Duration::from_secs(table.config.turn_timeout_secs);
        Lifecycle::toggle_pause(table, req.requester_id, pause, turn_timeout)
    })
    .await?;
    Ok(())
}

pub async fn set_end_after_hand(casino: &Casino, table_id: TableId, req: HostRequest) -> Result<()> {
    store::transact(&*casino.store, table_id, |table| {
        Lifecycle::set_end_after_hand(table, req.requester_id)
    })
    .await
}

pub async fn delete_table(casino: &Casino, table_id: TableId, req: HostRequest) -> Result<()> {
    let table = casino.store.get_table(table_id).await?;
    Lifecycle::delete_table(&table, req.requester_id)?;
    casino.store.delete_table(table_id).await
}

pub async fn get_snapshot(casino: &Casino, table_id: TableId) -> Result<TableSnapshot> {
    let table = casino.store.get_table(table_id).await?;
    Ok(TableSnapshot::from(&table))
}

/// closes a table that has sat idle (WAITING, no seated activity) past
/// `idle_table_close`. A no-op if something already moved the table on —
/// same benign-zombie shape as the token-checked deliveries, just keyed on
/// wall-clock idleness instead of a minted token.
pub async fn auto_close(casino: &Casino, table_id: TableId) -> Result<()> {
    store::transact(&*casino.store, table_id, |table| {
        if table.status == crate::domain::TableStatus::Waiting {
            table.status = crate::domain::TableStatus::Closed;
        }
        Ok(())
    })
    .await
}

/// the single place a delivered scheduled task gets adjudicated, used both
/// by the in-process `TaskQueue` dispatcher (direct call, no HTTP hop) and
/// by the durable-mode HTTP delivery endpoints in `hosting::server`.
/// Re-reads the table, checks the token is still live, and no-ops as a
/// benign "zombie ignored" if a real action already superseded it.
pub async fn deliver(casino: &Casino, delivery: Delivery) -> Result<()> {
    let config = casino.config.clone();
    let kind = delivery.kind;
    let token = delivery.token;
    let outcome = ops::apply(&*casino.store, &*casino.queue, delivery.table_id, move |table| {
        if !crate::scheduler::tokens::still_live(table, kind, token) {
            return Ok(Default::default());
        }
        // turnId/showdownId/nextHandId deliveries all presuppose the table is
        // still mid-hand; only the win-by-fold reveal window can legitimately
        // close after the table already moved to WAITING or ENDED.
        if kind != TokenKind::WinByFold && table.status != TableStatus::Playing {
            return Ok(Default::default());
        }
        let turn_timeout = std::time::Duration::from_secs(table.config.turn_timeout_secs);
        match kind {
            TokenKind::Turn => Ok(HandMachine::apply_timeout(
                table,
                turn_timeout,
                config.showdown_admire,
                config.win_by_fold_reveal,
            )),
            TokenKind::Showdown => Ok(HandMachine::apply_showdown_resolve(table)),
            TokenKind::WinByFold => {
                table.stage = crate::domain::Stage::None;
                table.win_by_fold_id = None;
                let mut effects = crate::engine::Effects::default();
                effects.clear_private_cards = true;
                Ok(effects)
            }
            TokenKind::NextHand => HandMachine::start_hand(table, turn_timeout),
        }
    })
    .await;
    match outcome {
        Ok(_) => Ok(()),
        Err(EngineError::InsufficientPlayers) => Ok(()),
        Err(e) => Err(e),
    }
}
