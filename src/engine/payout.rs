use crate::ids::{Chips, SeatIndex};
use std::collections::HashMap;

/// splits a pot equally among its winners, allocating any odd-chip
/// remainder one chip at a time starting at the winner seated closest
/// clockwise to the dealer. Applies to every pot, not just the main pot.
///
/// Returns amounts aligned index-for-index with `winners`.
pub fn distribute(
    amount: Chips,
    winners: &[SeatIndex],
    dealer_seat: SeatIndex,
    num_seats: usize,
) -> Vec<Chips> {
    if winners.is_empty() {
        return Vec::new();
    }
    let share = amount / winners.len() as Chips;
    let remainder = (amount % winners.len() as Chips) as usize;

    let mut by_clockwise_distance: Vec<SeatIndex> = winners.to_vec();
    by_clockwise_distance.sort_by_key(|&seat| clockwise_distance(dealer_seat, seat, num_seats));

    let mut bonus: HashMap<SeatIndex, Chips> = HashMap::new();
    for &seat in by_clockwise_distance.iter().take(remainder) {
        bonus.insert(seat, 1);
    }

    winners
        .iter()
        .map(|seat| share + bonus.get(seat).copied().unwrap_or(0))
        .collect()
}

fn clockwise_distance(dealer_seat: SeatIndex, seat: SeatIndex, num_seats: usize) -> usize {
    let dealer = usize::from(dealer_seat);
    let target = usize::from(seat);
    if target > dealer {
        target - dealer
    } else {
        target + num_seats - dealer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_evenly_with_no_remainder() {
        let winners = vec![SeatIndex::new(1), SeatIndex::new(3)];
        let shares = distribute(200, &winners, SeatIndex::new(0), 6);
        assert_eq!(shares, vec![100, 100]);
    }

    #[test]
    fn remainder_goes_to_winner_closest_clockwise_of_dealer() {
        // dealer at seat 0, winners at seats 4 and 2: seat 2 is closer
        // clockwise (distance 2) than seat 4 (distance 4).
        let winners = vec![SeatIndex::new(4), SeatIndex::new(2)];
        let shares = distribute(201, &winners, SeatIndex::new(0), 6);
        // seat 4 gets the base share, seat 2 gets the extra chip.
        assert_eq!(shares[0], 100);
        assert_eq!(shares[1], 101);
    }

    #[test]
    fn single_winner_takes_entire_pot() {
        let winners = vec![SeatIndex::new(5)];
        let shares = distribute(777, &winners, SeatIndex::new(2), 9);
        assert_eq!(shares, vec![777]);
    }
}
