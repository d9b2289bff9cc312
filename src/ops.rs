use crate::engine::Effects;
use crate::errors::Result;
use crate::ids::TableId;
use crate::persistence::{events, store, Store};
use crate::scheduler::queue::TaskQueue;
use std::collections::HashMap;

/// the one place an `engine::hand::Effects` batch turns into durable state:
/// run `mutate` inside an optimistic transaction, persist whatever it
/// stamped for the event log and hand-record store, and only once that
/// commit has landed, hand `effects.schedule` to the task queue. Every
/// external call in the hosting layer, and the sweeper's fallback
/// adjudication, goes through this so the "commit before schedule" rule
/// can't be broken by a handler forgetting a step.
///
/// `Table`'s own serialization skips `Seat::hole` — a seat's private cards
/// live only in `Store::write_private_cards`/`read_private_cards`, keyed by
/// hand number. This function hydrates every seat's hole from there before
/// `mutate` runs, and persists/clears whatever `mutate` reports through
/// `Effects::dealt_holes`/`clear_private_cards` once the commit lands, so a
/// hand's cards survive across however many separate transactions the hand
/// spans.
pub async fn apply<S, Q, F>(
    store: &S,
    queue: &Q,
    table_id: TableId,
    mutate: F,
) -> Result<Effects>
where
    S: Store + ?Sized,
    Q: TaskQueue + ?Sized,
    F: FnMut(&mut crate::domain::Table) -> Result<Effects>,
{
    let mut mutate = mutate;
    let snapshot = store.get_table(table_id).await?;
    let expected_hand_number = snapshot.hand_number;
    let mut holes = HashMap::new();
    for (_, seat) in snapshot.occupied_seats() {
        if let Some(hole) = store
            .read_private_cards(table_id, expected_hand_number, seat.player_id)
            .await?
        {
            holes.insert(seat.player_id, hole);
        }
    }

    let (effects, hand_number) = store::transact(store, table_id, |table| {
        if table.hand_number == expected_hand_number {
            for seat in table.seats.iter_mut().flatten() {
                if let Some(hole) = holes.get(&seat.player_id) {
                    seat.hole = Some(*hole);
                }
            }
        }
        let effects = mutate(table)?;
        Ok((effects, table.hand_number))
    })
    .await?;

    if !effects.events.is_empty() {
        let stamped = events::stamp(table_id, hand_number, effects.events.clone());
        store.append_events(stamped).await?;
    }
    if let Some(record) = effects.hand_record.clone() {
        store.save_hand_record(record).await?;
    }
    for &(player_id, hole) in &effects.dealt_holes {
        store.write_private_cards(table_id, hand_number, player_id, hole).await?;
    }
    if effects.clear_private_cards {
        store.clear_private_cards(table_id, hand_number).await?;
    }
    for effect in &effects.schedule {
        queue.enqueue(table_id, effect.clone()).await?;
    }
    Ok(effects)
}
