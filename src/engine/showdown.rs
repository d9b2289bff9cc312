use crate::ids::{Chips, SeatIndex};

/// one contributor to the pot this hand, including folded "dead money".
#[derive(Debug, Clone, Copy)]
pub struct Contributor {
    pub seat: SeatIndex,
    pub total_bet: Chips,
    pub contests_pot: bool,
}

#[derive(Debug, Clone)]
pub struct Pot {
    pub amount: Chips,
    pub eligible: Vec<SeatIndex>,
}

/// tiered-stake side-pot computation, accepting dead money from
/// folded/left players. Sorts contributors by `totalBet` ascending and
/// peels off one tier of pot per distinct stake level; a tier's
/// eligibility set is every still-in contributor whose `totalBet` reached
/// that tier.
pub fn compute_pots(contributors: &[Contributor]) -> Vec<Pot> {
    let mut sorted: Vec<&Contributor> = contributors.iter().filter(|c| c.total_bet > 0).collect();
    sorted.sort_by_key(|c| c.total_bet);

    let mut pots = Vec::new();
    let mut prev: Chips = 0;
    let mut tiers: Vec<Chips> = sorted.iter().map(|c| c.total_bet).collect();
    tiers.dedup();

    for &tier in &tiers {
        let amount: Chips = sorted
            .iter()
            .filter(|c| c.total_bet > prev)
            .map(|c| (c.total_bet - prev).min(tier - prev))
            .sum();
        if amount == 0 {
            prev = tier;
            continue;
        }
        let eligible: Vec<SeatIndex> = sorted
            .iter()
            .filter(|c| c.contests_pot && c.total_bet >= tier)
            .map(|c| c.seat)
            .collect();
        if !eligible.is_empty() {
            match pots.last_mut() {
                Some(last) if last.eligible == eligible => last.amount += amount,
                _ => pots.push(Pot { amount, eligible }),
            }
        }
        prev = tier;
    }
    pots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(seat: u8, total_bet: Chips, contests: bool) -> Contributor {
        Contributor {
            seat: SeatIndex::new(seat),
            total_bet,
            contests_pot: contests,
        }
    }

    #[test]
    fn three_way_side_pot() {
        let contributors = vec![c(0, 100, true), c(1, 200, true), c(2, 200, true)];
        let pots = compute_pots(&contributors);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 300);
        assert_eq!(pots[0].eligible.len(), 3);
        assert_eq!(pots[1].amount, 200);
        assert_eq!(pots[1].eligible.len(), 2);
    }

    #[test]
    fn folded_dead_money_inflates_pot_without_eligibility() {
        let contributors = vec![c(0, 50, false), c(1, 100, true), c(2, 100, true)];
        let pots = compute_pots(&contributors);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 250);
        assert_eq!(pots[0].eligible.len(), 2);
    }

    #[test]
    fn single_eligible_pot_is_degenerate_but_still_awarded() {
        let contributors = vec![c(0, 500, true), c(1, 100, false), c(2, 100, false)];
        let pots = compute_pots(&contributors);
        assert_eq!(pots.len(), 1);
        let main = &pots[0];
        assert_eq!(main.eligible, vec![SeatIndex::new(0)]);
        assert_eq!(main.amount, 700);
    }
}
