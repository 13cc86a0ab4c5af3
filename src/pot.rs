//! Chip accounting for one hand: per-seat contributions, main and side pots, payouts.

use crate::player::Player;
use log::debug;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// A pot slice and the seats that can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pot {
    pub amount: u64,
    pub eligible: BTreeSet<usize>,
}

/// Main pot plus side pots in the order they were built (lowest tier first).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotBreakdown {
    pub main: u64,
    pub main_eligible: BTreeSet<usize>,
    pub side_pots: Vec<Pot>,
}

impl PotBreakdown {
    fn from_pots(mut pots: Vec<Pot>) -> Self {
        if pots.is_empty() {
            return Self::default();
        }
        let main = pots.remove(0);
        Self { main: main.amount, main_eligible: main.eligible, side_pots: pots }
    }

    /// All pots, main first.
    pub fn pots(&self) -> Vec<Pot> {
        let main = Pot { amount: self.main, eligible: self.main_eligible.clone() };
        std::iter::once(main).chain(self.side_pots.iter().cloned()).filter(|p| p.amount > 0).collect()
    }

    pub fn total(&self) -> u64 {
        self.main + self.side_pots.iter().map(|p| p.amount).sum::<u64>()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PotLedger {
    street: BTreeMap<usize, u64>,
    hand: BTreeMap<usize, u64>,
    /// Chips swept in from finished streets.
    collected: u64,
}

impl PotLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move up to `amount` from the player's stack into the pot. A short stack contributes
    /// what it has and goes all-in. Returns the chips actually moved.
    pub fn contribute(&mut self, seat: usize, player: &mut Player, amount: u64) -> u64 {
        let paid = player.take_chips(amount);
        if paid > 0 {
            *self.street.entry(seat).or_default() += paid;
            *self.hand.entry(seat).or_default() += paid;
        }
        paid
    }

    pub fn street_contribution(&self, seat: usize) -> u64 {
        self.street.get(&seat).copied().unwrap_or(0)
    }

    pub fn hand_contribution(&self, seat: usize) -> u64 {
        self.hand.get(&seat).copied().unwrap_or(0)
    }

    /// Chips put in on the current street, all seats.
    pub fn street_total(&self) -> u64 {
        self.street.values().sum()
    }

    /// Chips swept from earlier streets.
    pub fn collected(&self) -> u64 {
        self.collected
    }

    /// Everything contributed this hand.
    pub fn total(&self) -> u64 {
        self.collected + self.street_total()
    }

    /// Sweep street contributions into the pot and start a new street.
    pub fn end_street(&mut self) {
        self.collected += self.street_total();
        self.street.clear();
    }

    /// Slice the hand's contributions into pots by tier.
    ///
    /// For each distinct contribution level, ascending, the slice is
    /// `(level - previous) * (seats that put in at least level)`. A contender can win the
    /// slice unless it is `capped` (all-in) below the level. Slices nobody can win are folded
    /// into the previous pot (or the next one when there is no previous), and neighbouring
    /// slices with the same eligible seats are merged.
    pub fn build_side_pots(
        &self,
        contenders: &BTreeSet<usize>,
        capped: &BTreeSet<usize>,
    ) -> PotBreakdown {
        let mut levels: Vec<u64> = self.hand.values().copied().filter(|&c| c > 0).collect();
        levels.sort_unstable();
        levels.dedup();

        let mut pots: Vec<Pot> = Vec::new();
        let mut orphaned = 0u64;
        let mut prev = 0u64;
        for level in levels {
            let contributors = self.hand.values().filter(|&&c| c >= level).count() as u64;
            let amount = (level - prev) * contributors;
            prev = level;
            let eligible: BTreeSet<usize> = contenders
                .iter()
                .copied()
                .filter(|&s| !capped.contains(&s) || self.hand_contribution(s) >= level)
                .collect();

            if eligible.is_empty() {
                match pots.last_mut() {
                    Some(last) => last.amount += amount,
                    None => orphaned += amount,
                }
                continue;
            }
            let amount = amount + std::mem::take(&mut orphaned);
            match pots.last_mut() {
                Some(last) if last.eligible == eligible => last.amount += amount,
                _ => pots.push(Pot { amount, eligible }),
            }
        }
        if orphaned > 0 {
            pots.push(Pot { amount: orphaned, eligible: BTreeSet::new() });
        }
        if pots.len() > 1 {
            debug!("built {} pots: {:?}", pots.len(), pots.iter().map(|p| p.amount).collect::<Vec<_>>());
        }
        PotBreakdown::from_pots(pots)
    }
}

/// Split `amount` among `winners`, which must already be in odd-chip order.
/// Every winner gets an equal share; the remainder goes one chip at a time from the front.
pub fn split_pot(amount: u64, winners: &[usize]) -> Vec<(usize, u64)> {
    if winners.is_empty() {
        return Vec::new();
    }
    let n = winners.len() as u64;
    let per = amount / n;
    let mut rem = amount % n;
    winners
        .iter()
        .map(|&seat| {
            let mut share = per;
            if rem > 0 {
                share += 1;
                rem -= 1;
            }
            (seat, share)
        })
        .collect()
}
