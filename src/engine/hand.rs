use super::action::Action;
use super::payout;
use super::seat as seat_rules;
use super::showdown;
use super::table::RoundStatus;
use super::validator;
use crate::cards::{evaluator, Card, Deck, Hand, Hole};
use crate::domain::table::Round;
use crate::domain::{EventKind, HandRecord, NotableFlags, SeatStatus, Table, TableStatus};
use crate::errors::{EngineError, Result};
use crate::ids::{Chips, PlayerId, SeatIndex};
use std::time::Duration;
use uuid::Uuid;

/// a pure effect emitted by the state machine: what to log, and what to
/// enqueue once the caller's transaction has committed. Scheduling must
/// never happen before commit, so this crate keeps `ScheduledEffect` data
/// rather than calling a scheduler directly from engine code.
#[derive(Debug, Clone)]
pub enum ScheduledEffect {
    TurnTimeout { turn_id: Uuid, after: Duration },
    ShowdownResolve { showdown_id: Uuid, after: Duration },
    WinByFoldTimeout { win_by_fold_id: Uuid, after: Duration },
    StartNextHand { next_hand_id: Uuid, after: Duration },
}

#[derive(Debug, Clone, Default)]
pub struct Effects {
    pub events: Vec<EventKind>,
    pub schedule: Vec<ScheduledEffect>,
    pub hand_record: Option<HandRecord>,
    /// hole cards freshly dealt this call, for the caller to persist through
    /// `Store::write_private_cards` — `Table`'s own (de)serialization drops
    /// `Seat::hole`, so this is the only path cards survive a commit.
    pub dealt_holes: Vec<(PlayerId, Hole)>,
    /// set once a hand's hole cards are no longer needed, so the caller can
    /// drop them from private-card storage via `Store::clear_private_cards`.
    pub clear_private_cards: bool,
}

impl Effects {
    fn push(&mut self, kind: EventKind) {
        self.events.push(kind);
    }
}

pub struct HandMachine;

impl HandMachine {
    pub fn start_hand(table: &mut Table, turn_timeout: Duration) -> Result<Effects> {
        let startable = table
            .occupied_seats()
            .filter(|(_, s)| {
                matches!(s.status, SeatStatus::Active | SeatStatus::WaitingForHand)
                    && s.chips >= table.config.big_blind
            })
            .count();
        if startable < 2 {
            return Err(EngineError::InsufficientPlayers);
        }

        for (_, seat) in table.seats.iter_mut().enumerate().filter_map(|(i, s)| s.as_mut().map(|s| (i, s))) {
            seat.reset_for_new_hand();
        }

        let dealt_in = table.eligible_for_hand();
        for idx in &dealt_in {
            if let Some(seat) = table.seat_mut(*idx) {
                seat.status = SeatStatus::Active;
            }
        }

        table.hand_number += 1;
        table.dealer_seat = if table.hand_number == 1 {
            dealt_in[0]
        } else {
            table
                .next_seat_matching(table.dealer_seat, |s| s.status == SeatStatus::Active)
                .unwrap_or(dealt_in[0])
        };

        let heads_up = dealt_in.len() == 2;
        let sb_idx = if heads_up {
            table.dealer_seat
        } else {
            table
                .next_seat_matching(table.dealer_seat, |s| s.status == SeatStatus::Active)
                .expect("at least two active seats")
        };
        let bb_idx = table
            .next_seat_matching(sb_idx, |s| s.status == SeatStatus::Active)
            .expect("at least two active seats");

        let small_blind = table.config.small_blind;
        let big_blind = table.config.big_blind;
        let mut effects = Effects::default();

        post_blind(table, sb_idx, small_blind, true, false);
        post_blind(table, bb_idx, big_blind, false, true);
        table.current_bet = table.seat(bb_idx).map(|s| s.round_bet).unwrap_or(big_blind);
        table.min_raise = big_blind;
        table.last_aggressor_seat = Some(bb_idx);

        let mut deck = remaining_deck(table);
        for idx in &dealt_in {
            let a = deck.draw().expect("deck has enough cards");
            let b = deck.draw().expect("deck has enough cards");
            let hole = Hole::new(a, b);
            if let Some(seat) = table.seat_mut(*idx) {
                seat.hole = Some(hole);
                effects.dealt_holes.push((seat.player_id, hole));
            }
        }

        table.board = Default::default();
        table.current_round = Some(Round::Preflop);
        table.pot = 0;
        table.stage = crate::domain::Stage::None;

        let first_to_act = table
            .next_seat_matching(bb_idx, |s| s.status == SeatStatus::Active)
            .expect("at least two active seats");
        begin_turn(table, first_to_act, turn_timeout, &mut effects);

        effects.push(EventKind::HandStarted {
            hand_number: table.hand_number,
        });
        table.status = TableStatus::Playing;
        Ok(effects)
    }

    pub fn process_action(
        table: &mut Table,
        player_id: PlayerId,
        action: Action,
        turn_id: Option<Uuid>,
        turn_timeout: Duration,
        showdown_admire: Duration,
        win_by_fold_reveal: Duration,
    ) -> Result<Effects> {
        validator::validate(table, player_id, action, turn_id)?;
        let idx = table.current_turn.expect("validated turn exists");
        let mut effects = Effects::default();
        apply_action(table, idx, action, &mut effects);
        table.consecutive_auto_actions = 0;
        continue_hand(table, idx, turn_timeout, showdown_admire, win_by_fold_reveal, &mut effects);
        Ok(effects)
    }

    /// invoked by the scheduler on a turn-timeout delivery whose token
    /// still matches. Auto-folds facing a bet, auto-checks otherwise.
    pub fn apply_timeout(
        table: &mut Table,
        turn_timeout: Duration,
        showdown_admire: Duration,
        win_by_fold_reveal: Duration,
    ) -> Effects {
        let idx = table.current_turn.expect("timeout delivered only while a turn is open");
        let action = {
            let seat = table.seat(idx).expect("current turn seat occupied");
            if seat_rules::can_call(seat, table) {
                Action::Fold
            } else {
                Action::Check
            }
        };
        let mut effects = Effects::default();
        apply_action(table, idx, action, &mut effects);
        if let Some(seat) = table.seat_mut(idx) {
            seat.timed_out = true;
        }
        table.consecutive_auto_actions += 1;
        let acting_seats = table
            .occupied_seats()
            .filter(|(_, s)| !matches!(s.status, SeatStatus::Folded | SeatStatus::SittingOut))
            .count() as u32;
        if table.consecutive_auto_actions >= acting_seats {
            table.config.auto_next = false;
        }
        continue_hand(table, idx, turn_timeout, showdown_admire, win_by_fold_reveal, &mut effects);
        effects
    }

    /// invoked by the scheduler on a `ShowdownResolve` delivery whose token
    /// still matches `table.showdownId`: computes pots, determines winners,
    /// and pays out.
    pub fn apply_showdown_resolve(table: &mut Table) -> Effects {
        let mut effects = Effects::default();
        resolve_showdown(table, &mut effects);
        effects
    }

    /// folds a departing seat out of the hand in progress, preserving
    /// whatever it already committed as dead money. Advances the turn (and
    /// checks for hand-ending conditions) if the departing seat held the
    /// open turn; otherwise just checks whether the fold leaves a single
    /// contestant standing.
    pub fn force_fold_for_departure(
        table: &mut Table,
        idx: SeatIndex,
        turn_timeout: Duration,
        showdown_admire: Duration,
        win_by_fold_reveal: Duration,
        effects: &mut Effects,
    ) {
        let player_id = table.seat(idx).map(|s| s.player_id).expect("seat occupied");
        let round = format!("{:?}", table.current_round);
        let was_current_turn = table.current_turn == Some(idx);
        if let Some(seat) = table.seat_mut(idx) {
            seat.status = SeatStatus::Folded;
            seat.turn_acted = true;
        }
        effects.push(EventKind::Action {
            round,
            player_id,
            seat: idx,
            action: "fold".to_string(),
            amount: 0,
        });
        if was_current_turn {
            continue_hand(table, idx, turn_timeout, showdown_admire, win_by_fold_reveal, effects);
        } else if RoundStatus::is_last_man_standing(table) {
            resolve_win_by_fold(table, win_by_fold_reveal, effects);
        }
    }
}

fn post_blind(table: &mut Table, idx: SeatIndex, amount: Chips, is_sb: bool, is_bb: bool) {
    if let Some(seat) = table.seat_mut(idx) {
        let posted = amount.min(seat.chips);
        seat.chips -= posted;
        seat.round_bet += posted;
        seat.total_bet += posted;
        seat.is_small_blind = is_sb;
        seat.is_big_blind = is_bb;
        if seat.chips == 0 {
            seat.status = SeatStatus::AllIn;
        }
        table.pot += posted;
    }
}

fn apply_action(table: &mut Table, idx: SeatIndex, action: Action, effects: &mut Effects) {
    let pre_current_bet = table.current_bet;
    let pre_min_raise = table.min_raise.max(1);
    let round = format!("{:?}", table.current_round);
    let player_id = table.seat(idx).map(|s| s.player_id).expect("seat occupied");

    match action {
        Action::Fold => {
            if let Some(seat) = table.seat_mut(idx) {
                seat.status = SeatStatus::Folded;
                seat.turn_acted = true;
            }
        }
        Action::Check => {
            if let Some(seat) = table.seat_mut(idx) {
                seat.turn_acted = true;
            }
        }
        Action::Call => {
            let to_amount = {
                let seat = table.seat(idx).expect("seat occupied");
                seat.round_bet + seat_rules::to_call(seat, table)
            };
            commit(table, idx, to_amount);
        }
        Action::Raise(to_amount) => {
            let increment = to_amount.saturating_sub(pre_current_bet);
            commit(table, idx, to_amount);
            table.current_bet = to_amount;
            table.last_aggressor_seat = Some(idx);
            if increment >= pre_min_raise {
                table.min_raise = increment;
                reopen_action(table, idx);
            }
        }
        Action::AllIn => {
            let to_amount = {
                let seat = table.seat(idx).expect("seat occupied");
                seat.round_bet + seat.chips
            };
            commit(table, idx, to_amount);
            if to_amount > pre_current_bet {
                let increment = to_amount - pre_current_bet;
                table.current_bet = to_amount;
                table.last_aggressor_seat = Some(idx);
                if increment >= pre_min_raise {
                    table.min_raise = increment;
                    reopen_action(table, idx);
                }
            }
        }
    }
    if let Some(seat) = table.seat_mut(idx) {
        seat.turn_acted = true;
    }

    effects.push(EventKind::Action {
        round,
        player_id,
        seat: idx,
        action: action.label().to_string(),
        amount: match action {
            Action::Raise(a) => a,
            Action::AllIn => table.seat(idx).map(|s| s.round_bet).unwrap_or(0),
            _ => 0,
        },
    });
}

fn commit(table: &mut Table, idx: SeatIndex, to_amount: Chips) {
    if let Some(seat) = table.seat_mut(idx) {
        let cost = to_amount.saturating_sub(seat.round_bet);
        seat.chips -= cost;
        seat.round_bet = to_amount;
        seat.total_bet += cost;
        if seat.chips == 0 && seat.status == SeatStatus::Active {
            seat.status = SeatStatus::AllIn;
        }
        table.pot += cost;
    }
}

fn reopen_action(table: &mut Table, raiser: SeatIndex) {
    for (i, seat) in table.seats.iter_mut().enumerate() {
        if let Some(seat) = seat {
            if SeatIndex::new(i as u8) != raiser && seat.status == SeatStatus::Active {
                seat.turn_acted = false;
            }
        }
    }
}

fn continue_hand(
    table: &mut Table,
    acted: SeatIndex,
    turn_timeout: Duration,
    showdown_admire: Duration,
    win_by_fold_reveal: Duration,
    effects: &mut Effects,
) {
    if RoundStatus::is_last_man_standing(table) {
        resolve_win_by_fold(table, win_by_fold_reveal, effects);
        return;
    }
    if RoundStatus::is_effective_all_in(table) {
        run_out_remaining_streets(table);
        begin_showdown(table, showdown_admire, effects);
        return;
    }
    if RoundStatus::is_round_closed(table) {
        advance_round(table, acted, turn_timeout, showdown_admire, effects);
        return;
    }
    let next = table
        .next_seat_matching(acted, |s| s.status == SeatStatus::Active)
        .expect("round not closed implies another actionable seat");
    begin_turn(table, next, turn_timeout, effects);
}

fn begin_turn(table: &mut Table, idx: SeatIndex, turn_timeout: Duration, effects: &mut Effects) {
    table.current_turn = Some(idx);
    let turn_id = Uuid::new_v4();
    table.current_turn_id = Some(turn_id);
    table.current_turn_deadline = chrono::Utc::now().checked_add_signed(
        chrono::Duration::from_std(turn_timeout).unwrap_or(chrono::Duration::seconds(30)),
    );
    effects.schedule.push(ScheduledEffect::TurnTimeout {
        turn_id,
        after: turn_timeout,
    });
}

fn advance_round(
    table: &mut Table,
    _acted: SeatIndex,
    turn_timeout: Duration,
    showdown_admire: Duration,
    effects: &mut Effects,
) {
    for seat in table.seats.iter_mut().flatten() {
        seat.reset_for_new_round();
    }
    table.current_bet = 0;
    table.min_raise = table.config.big_blind;
    table.last_aggressor_seat = None;

    deal_next_street(table);
    table.current_round = Some(Round::from(table.board.street()));

    if table.board.street() == crate::cards::Street::Showdown {
        begin_showdown(table, showdown_admire, effects);
        return;
    }

    let next = table
        .next_seat_matching(table.dealer_seat, |s| s.status == SeatStatus::Active)
        .expect("at least two active seats to advance a round");
    begin_turn(table, next, turn_timeout, effects);
}

/// deals every street the board hasn't seen yet, up to and including the
/// showdown marker, without waiting for betting — the effective all-in
/// runout.
fn run_out_remaining_streets(table: &mut Table) {
    while table.board.street() != crate::cards::Street::River {
        deal_next_street(table);
    }
    deal_next_street(table);
}

/// reveals the board/hole cards and mints a fresh `showdownId`, but defers
/// pot distribution to `apply_showdown_resolve` once the admire window's
/// `ScheduledEffect::ShowdownResolve` is delivered — mirrors the win-by-fold
/// path's reveal-then-resolve split instead of paying out instantly.
fn begin_showdown(table: &mut Table, showdown_admire: Duration, effects: &mut Effects) {
    table.board.mark_showdown();
    table.current_round = Some(Round::Showdown);
    table.current_turn = None;
    table.current_turn_id = None;
    table.current_turn_deadline = None;
    table.stage = crate::domain::Stage::Showdown;
    let showdown_id = Uuid::new_v4();
    table.showdown_id = Some(showdown_id);
    effects.schedule.push(ScheduledEffect::ShowdownResolve {
        showdown_id,
        after: showdown_admire,
    });
}

fn deal_next_street(table: &mut Table) {
    let mut deck = remaining_deck(table);
    match table.board.street() {
        crate::cards::Street::Preflop => {
            let a = deck.draw().expect("cards remain");
            let b = deck.draw().expect("cards remain");
            let c = deck.draw().expect("cards remain");
            table.board.deal_flop(a, b, c);
        }
        crate::cards::Street::Flop => {
            table.board.deal_turn(deck.draw().expect("cards remain"));
        }
        crate::cards::Street::Turn => {
            table.board.deal_river(deck.draw().expect("cards remain"));
        }
        crate::cards::Street::River => {
            table.board.mark_showdown();
        }
        crate::cards::Street::Showdown => {}
    }
}

/// builds the remaining deck as the complement of every card already
/// dealt (hole cards + board), freshly shuffled. The deck is never
/// persisted, so each draw call reconstructs it from currently-known
/// public/private state rather than carrying mutable deck state across
/// transactions.
fn remaining_deck(table: &Table) -> Deck {
    let mut known = Hand::default();
    for seat in table.seats.iter().flatten() {
        if let Some(hole) = &seat.hole {
            known = known.union(Hand::from(hole.cards().to_vec()));
        }
    }
    known = known.union(Hand::from(table.board.cards().to_vec()));
    let remaining: Vec<Card> = (0..52u8)
        .map(Card::from)
        .filter(|c| !known.contains(*c))
        .collect();
    Deck::from_cards(remaining)
}

fn resolve_win_by_fold(table: &mut Table, win_by_fold_reveal: Duration, effects: &mut Effects) {
    let winner_idx = table
        .occupied_seats()
        .find(|(_, s)| s.status.contests_pot())
        .map(|(i, _)| i)
        .expect("at least one contestant remains");
    let pot = table.pot;
    if let Some(seat) = table.seat_mut(winner_idx) {
        seat.chips += pot;
    }
    table.pot = 0;
    table.stage = crate::domain::Stage::WinByFold;
    let win_by_fold_id = Uuid::new_v4();
    table.win_by_fold_id = Some(win_by_fold_id);
    table.current_turn = None;
    table.current_turn_id = None;
    table.current_turn_deadline = None;

    let winner = table.seat(winner_idx).expect("winner seat occupied");
    let record = HandRecord {
        table_id: table.id,
        hand_number: table.hand_number,
        community_cards: table.board.cards().to_vec(),
        action_log: Vec::new(),
        pots: vec![crate::domain::hand_record::PotShare {
            amount: pot,
            eligible: vec![winner_idx],
        }],
        winners: vec![crate::domain::Winner {
            player_id: winner.player_id,
            seat: winner_idx,
            amount: pot,
            hand_name: "uncontested".to_string(),
            tiebreakers: Vec::new(),
            winning_cards: Vec::new(),
        }],
        flags: NotableFlags {
            large_pot: pot >= table.config.big_blind.saturating_mul(50),
            premium_hand: false,
            all_in_happened: table.seats.iter().flatten().any(|s| s.status == SeatStatus::AllIn),
            last_man_standing: true,
        },
    };
    effects.hand_record = Some(record);
    effects.push(EventKind::HandEnded {
        reason: "win_by_fold".to_string(),
    });
    effects
        .schedule
        .push(ScheduledEffect::WinByFoldTimeout {
            win_by_fold_id,
            after: win_by_fold_reveal,
        });
    if table.config.auto_next && !table.end_after_hand {
        let next_hand_id = Uuid::new_v4();
        table.next_hand_id = Some(next_hand_id);
        effects.schedule.push(ScheduledEffect::StartNextHand {
            next_hand_id,
            after: win_by_fold_reveal,
        });
    } else {
        table.status = if table.end_after_hand { TableStatus::Ended } else { TableStatus::Waiting };
        table.end_after_hand = false;
    }
}

/// computes pots, determines winners, and pays out — invoked once the
/// `ShowdownResolve` task for the table's current `showdownId` is
/// delivered (see `HandMachine::apply_showdown_resolve`), never inline
/// with the reveal, so spectators see the board/hole cards for the admire
/// window before chips move.
fn resolve_showdown(table: &mut Table, effects: &mut Effects) {
    let contributors: Vec<showdown::Contributor> = table
        .occupied_seats()
        .filter(|(_, s)| s.total_bet > 0)
        .map(|(i, s)| showdown::Contributor {
            seat: i,
            total_bet: s.total_bet,
            contests_pot: s.status.contests_pot(),
        })
        .collect();
    let pots = showdown::compute_pots(&contributors);

    let mut pot_shares = Vec::new();
    let mut winners = Vec::new();
    let board_cards = table.board.cards().to_vec();
    let mut best_category_overall = None;

    for pot in &pots {
        let mut best: Option<(crate::cards::Strength, SeatIndex, Vec<Card>)> = None;
        for &seat_idx in &pot.eligible {
            let Some(seat) = table.seat(seat_idx) else { continue };
            let Some(hole) = &seat.hole else { continue };
            let mut cards = hole.cards().to_vec();
            cards.extend(board_cards.iter().copied());
            let (category, kicks, five) = evaluator::evaluate(&cards);
            let strength = crate::cards::Strength::from((category, kicks));
            if best.as_ref().is_none_or(|(s, _, _)| strength > *s) {
                best = Some((strength, seat_idx, five));
            }
        }
        let Some((strength, _, _)) = &best else { continue };
        best_category_overall = Some(best_category_overall.map_or(strength.category(), |c: crate::cards::Ranking| c.max(strength.category())));

        let winning_seats: Vec<SeatIndex> = pot
            .eligible
            .iter()
            .copied()
            .filter(|&seat_idx| {
                table
                    .seat(seat_idx)
                    .and_then(|s| s.hole.as_ref())
                    .map(|hole| {
                        let mut cards = hole.cards().to_vec();
                        cards.extend(board_cards.iter().copied());
                        let (category, kicks, _) = evaluator::evaluate(&cards);
                        crate::cards::Strength::from((category, kicks)) == *strength
                    })
                    .unwrap_or(false)
            })
            .collect();

        let shares = payout::distribute(pot.amount, &winning_seats, table.dealer_seat, table.seats.len());
        for (&seat_idx, &amount) in winning_seats.iter().zip(shares.iter()) {
            if let Some(seat) = table.seat_mut(seat_idx) {
                seat.chips += amount;
            }
            let seat = table.seat(seat_idx).expect("winner seat occupied");
            let hole = seat.hole.as_ref();
            let five = hole
                .map(|h| {
                    let mut cards = h.cards().to_vec();
                    cards.extend(board_cards.iter().copied());
                    evaluator::evaluate(&cards).2
                })
                .unwrap_or_default();
            winners.push(crate::domain::Winner {
                player_id: seat.player_id,
                seat: seat_idx,
                amount,
                hand_name: strength.category().to_string(),
                tiebreakers: Vec::new(),
                winning_cards: five,
            });
        }
        pot_shares.push(crate::domain::hand_record::PotShare {
            amount: pot.amount,
            eligible: pot.eligible.clone(),
        });
    }

    table.pot = 0;
    for (_, seat) in table.seats.iter_mut().enumerate().filter_map(|(i, s)| s.as_mut().map(|s| (i, s))) {
        if seat.chips == 0 && seat.status != SeatStatus::SittingOut {
            seat.status = SeatStatus::SittingOut;
        }
    }

    let record = HandRecord {
        table_id: table.id,
        hand_number: table.hand_number,
        community_cards: board_cards,
        action_log: Vec::new(),
        pots: pot_shares,
        winners,
        flags: NotableFlags {
            large_pot: pots.iter().map(|p| p.amount).sum::<Chips>() >= table.config.big_blind.saturating_mul(50),
            premium_hand: best_category_overall.is_some_and(|c| {
                c >= crate::cards::Ranking::FullHouse(crate::cards::Rank::Two, crate::cards::Rank::Two)
            }),
            all_in_happened: table.seats.iter().flatten().any(|s| s.status == SeatStatus::AllIn),
            last_man_standing: false,
        },
    };
    effects.hand_record = Some(record);
    effects.push(EventKind::HandEnded {
        reason: "showdown".to_string(),
    });
    effects.clear_private_cards = true;
    table.stage = crate::domain::Stage::ShowdownComplete;
    table.showdown_id = None;

    if table.config.auto_next && !table.end_after_hand {
        let next_hand_id = Uuid::new_v4();
        table.next_hand_id = Some(next_hand_id);
        effects.schedule.push(ScheduledEffect::StartNextHand {
            next_hand_id,
            after: Duration::ZERO,
        });
    } else {
        table.status = if table.end_after_hand { TableStatus::Ended } else { TableStatus::Waiting };
        table.end_after_hand = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stage;
    use crate::engine::lifecycle::Lifecycle;
    use crate::ids::{PlayerId, TableId};

    const TURN: Duration = Duration::from_secs(30);
    const ADMIRE: Duration = Duration::from_secs(5);
    const REVEAL: Duration = Duration::from_secs(10);

    fn config(max_seats: u8) -> crate::domain::TableConfig {
        crate::domain::TableConfig {
            small_blind: 1,
            big_blind: 2,
            min_buy_in: 20,
            max_buy_in: 1000,
            turn_timeout_secs: 30,
            max_seats,
            auto_next: true,
            creator_id: PlayerId::new(),
        }
    }

    fn seated_table(stacks: &[Chips]) -> Table {
        let mut table = Table::new(TableId::new(), config(stacks.len() as u8));
        for (i, &chips) in stacks.iter().enumerate() {
            let player = PlayerId::new();
            Lifecycle::join_seat(&mut table, player, format!("p{i}"), SeatIndex::new(i as u8), chips).unwrap();
        }
        table
    }

    fn current_player(table: &Table) -> PlayerId {
        table
            .seat(table.current_turn.expect("turn open"))
            .expect("seated")
            .player_id
    }

    #[test]
    fn heads_up_blinds_assign_dealer_as_small_blind() {
        let mut table = seated_table(&[200, 200]);
        HandMachine::start_hand(&mut table, TURN).unwrap();
        let dealer = table.dealer_seat;
        let dealer_seat = table.seat(dealer).unwrap();
        assert!(dealer_seat.is_small_blind);
        assert_eq!(table.pot, 3);
        assert_eq!(table.current_bet, 2);
        // heads-up preflop action starts on the dealer/small blind.
        assert_eq!(table.current_turn, Some(dealer));
    }

    #[test]
    fn three_way_all_in_creates_a_side_pot() {
        // seat 0 is the dealer and first to act three-handed; seat 1 posts
        // the small blind, seat 2 the big blind.
        let mut table = seated_table(&[20, 200, 200]);
        HandMachine::start_hand(&mut table, TURN).unwrap();

        let act = |table: &mut Table, action: Action| {
            let player = current_player(table);
            let turn_id = table.current_turn_id;
            HandMachine::process_action(table, player, action, turn_id, TURN, ADMIRE, REVEAL).unwrap();
        };

        // preflop: the short stack shoves for its remaining 20, the other
        // two call it off.
        act(&mut table, Action::AllIn);
        act(&mut table, Action::Call);
        act(&mut table, Action::Call);
        assert_eq!(table.current_round, Some(Round::Flop));

        // flop: the two remaining active seats keep building the pot
        // between themselves, past what the short stack could ever win.
        act(&mut table, Action::Raise(10));
        act(&mut table, Action::Call);
        assert_eq!(table.current_round, Some(Round::Turn));

        act(&mut table, Action::Check);
        act(&mut table, Action::Check);
        assert_eq!(table.current_round, Some(Round::River));

        act(&mut table, Action::Check);
        act(&mut table, Action::Check);

        assert_eq!(table.stage, Stage::Showdown);

        let effects = HandMachine::apply_showdown_resolve(&mut table);
        let record = effects.hand_record.expect("showdown settles a hand record");
        // the short stack's contribution caps one pot tier; the other two
        // players' extra chips form a side pot the short stack isn't in.
        assert_eq!(record.pots.len(), 2);
        let side_pot = record
            .pots
            .iter()
            .find(|p| p.eligible.len() == 2)
            .expect("a two-way side pot exists");
        assert!(!side_pot.eligible.contains(&SeatIndex::new(0)));
    }

    #[test]
    fn min_raise_reopens_action_for_other_seats() {
        let mut table = seated_table(&[500, 500, 500]);
        HandMachine::start_hand(&mut table, TURN).unwrap();

        let utg = table.current_turn.unwrap();
        let raiser = current_player(&table);
        let turn_id = table.current_turn_id;
        // a full raise to 6 (current bet 2 + min_raise 2 -> at least 4 increment)
        HandMachine::process_action(&mut table, raiser, Action::Raise(6), turn_id, TURN, ADMIRE, REVEAL).unwrap();
        assert_eq!(table.current_bet, 6);
        assert_eq!(table.min_raise, 4);

        // everyone except the raiser must be allowed to act again.
        for (idx, seat) in table.occupied_seats() {
            if idx != utg && seat.status == SeatStatus::Active {
                assert!(!seat.turn_acted);
            }
        }
    }

    #[test]
    fn short_all_in_under_min_raise_does_not_reopen_action() {
        // the short stack's post-blind remainder, if shoved, raises by less
        // than a full min-raise increment.
        let mut table = seated_table(&[500, 500, 3]);
        HandMachine::start_hand(&mut table, TURN).unwrap();

        // drive the short stack's turn: go all-in for less than a full raise.
        while current_player(&table) != table.seats[2].as_ref().unwrap().player_id {
            let player = current_player(&table);
            let turn_id = table.current_turn_id;
            HandMachine::process_action(&mut table, player, Action::Call, turn_id, TURN, ADMIRE, REVEAL).unwrap();
        }
        let short_stack_player = table.seats[2].as_ref().unwrap().player_id;
        let pre_min_raise = table.min_raise;
        let turn_id = table.current_turn_id;
        HandMachine::process_action(&mut table, short_stack_player, Action::AllIn, turn_id, TURN, ADMIRE, REVEAL).unwrap();
        // the short all-in didn't cover a full raise, so min_raise is unchanged
        // and the seats that already acted remain closed out.
        assert_eq!(table.min_raise, pre_min_raise);
    }

    #[test]
    fn effective_all_in_runs_the_board_out_to_showdown() {
        // both short stacks shove preflop; the big stack's call leaves no
        // further voluntary betting possible, so the remaining streets are
        // dealt straight through without any more turns.
        let mut table = seated_table(&[20, 20, 500]);
        HandMachine::start_hand(&mut table, TURN).unwrap();

        let act = |table: &mut Table, action: Action| {
            let player = current_player(table);
            let turn_id = table.current_turn_id;
            HandMachine::process_action(table, player, action, turn_id, TURN, ADMIRE, REVEAL).unwrap();
        };

        act(&mut table, Action::AllIn);
        act(&mut table, Action::AllIn);
        act(&mut table, Action::Call);

        assert!(table.current_turn.is_none());
        assert_eq!(table.board.street(), crate::cards::Street::Showdown);
        assert_eq!(table.stage, Stage::Showdown);
    }

    #[test]
    fn win_by_fold_opens_a_reveal_window_then_pays_the_pot() {
        let mut table = seated_table(&[200, 200]);
        HandMachine::start_hand(&mut table, TURN).unwrap();
        let folder = current_player(&table);
        let turn_id = table.current_turn_id;
        let pot_before = table.pot;
        let effects = HandMachine::process_action(&mut table, folder, Action::Fold, turn_id, TURN, ADMIRE, REVEAL).unwrap();

        assert_eq!(table.stage, Stage::WinByFold);
        assert_eq!(table.pot, 0);
        // the pot moves to the remaining contestant; total chips at the
        // table are conserved.
        let total_chips: Chips = table.seats.iter().flatten().map(|s| s.chips).sum();
        assert_eq!(total_chips, 400);
        let winner_seat = table.occupied_seats().find(|(_, s)| s.status.contests_pot()).unwrap();
        assert!(winner_seat.1.chips >= pot_before);
        assert!(effects.hand_record.is_some());
        assert!(effects
            .schedule
            .iter()
            .any(|s| matches!(s, ScheduledEffect::WinByFoldTimeout { .. })));

        // the winner can voluntarily show cards during the reveal window.
        let winner_id = winner_seat.1.player_id;
        let reveal = Lifecycle::show_cards(&mut table, winner_id).unwrap();
        assert!(!reveal.events.is_empty());
    }

    #[test]
    fn showdown_resolves_in_two_phases() {
        let mut table = seated_table(&[500, 500]);
        HandMachine::start_hand(&mut table, TURN).unwrap();

        loop {
            let player = current_player(&table);
            let turn_id = table.current_turn_id;
            HandMachine::process_action(&mut table, player, Action::AllIn, turn_id, TURN, ADMIRE, REVEAL).unwrap();
            if table.current_round == Some(Round::Showdown) || table.current_turn.is_none() {
                break;
            }
        }

        assert_eq!(table.stage, Stage::Showdown);
        assert!(table.showdown_id.is_some());
        // chips haven't moved yet: pot distribution awaits the resolve delivery.
        assert!(table.pot > 0 || table.seats.iter().flatten().any(|s| s.status == SeatStatus::AllIn));

        let effects = HandMachine::apply_showdown_resolve(&mut table);
        assert_eq!(table.stage, Stage::ShowdownComplete);
        assert_eq!(table.pot, 0);
        assert!(effects.hand_record.is_some());
        assert!(!effects.hand_record.unwrap().winners.is_empty());
    }

    #[test]
    fn leaving_mid_hand_force_folds_and_keeps_dead_money_in_the_pot() {
        let mut table = seated_table(&[200, 200, 200]);
        HandMachine::start_hand(&mut table, TURN).unwrap();
        let pot_before = table.pot;

        // the player not currently on turn leaves; their committed blind/ante
        // stays in the pot as dead money rather than vanishing with the seat.
        let current = table.current_turn.unwrap();
        let departing = table
            .occupied_seats()
            .find(|(idx, s)| *idx != current && s.status.contests_pot())
            .map(|(_, s)| s.player_id)
            .unwrap();

        Lifecycle::leave_seat(&mut table, departing, TURN, ADMIRE, REVEAL).unwrap();
        assert!(table.find_seat_of(departing).is_none());
        assert!(table.pot >= pot_before);
    }

    #[test]
    fn set_end_after_hand_is_immediate_outside_a_hand() {
        let mut table = seated_table(&[200, 200]);
        let host = table.config.creator_id;
        Lifecycle::set_end_after_hand(&mut table, host).unwrap();
        // no hand is in flight, so there's nothing to let finish first.
        assert_eq!(table.status, TableStatus::Ended);
    }

    #[test]
    fn set_end_after_hand_waits_for_the_in_flight_hand_to_resolve() {
        let mut table = seated_table(&[200, 200]);
        let host = table.config.creator_id;
        HandMachine::start_hand(&mut table, TURN).unwrap();

        Lifecycle::set_end_after_hand(&mut table, host).unwrap();
        assert!(table.end_after_hand);
        assert_eq!(table.status, TableStatus::Playing);

        let folder = current_player(&table);
        let turn_id = table.current_turn_id;
        HandMachine::process_action(&mut table, folder, Action::Fold, turn_id, TURN, ADMIRE, REVEAL).unwrap();

        assert_eq!(table.status, TableStatus::Ended);
        assert!(!table.end_after_hand);
    }
}
