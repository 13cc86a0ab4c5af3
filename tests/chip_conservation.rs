use holdem_core::action::PlayerAction;
use holdem_core::config::TableConfig;
use holdem_core::player::Player;
use holdem_core::pot::{split_pot, PotLedger};
use holdem_core::table::Table;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn chips_on_table(t: &Table) -> u64 {
    let stacks: u64 = t.seats().players().map(|(_, p)| p.stack()).sum();
    let in_pot = match t.hand() {
        Some(h) if !h.is_finished() => h.ledger().total(),
        _ => 0,
    };
    stacks + in_pot
}

/// Pick a legal action for the active seat from a random byte.
fn choose(t: &Table, seat: usize, pick: u8) -> PlayerAction {
    let hand = t.hand().unwrap();
    let legal = hand.legal_actions(t.seats(), seat).unwrap();
    match pick % 6 {
        0 => PlayerAction::Fold,
        1 | 2 if legal.can_check => PlayerAction::Check,
        1 | 2 => PlayerAction::Call,
        3 => match legal.min_raise_to {
            Some(min) => PlayerAction::Raise(min),
            None => PlayerAction::Call,
        },
        4 => match legal.min_raise_to {
            Some(min) => PlayerAction::Raise(min + (legal.max_raise_to - min) / 2),
            None => PlayerAction::Call,
        },
        _ if legal.min_raise_to.is_some() => PlayerAction::AllIn,
        _ => PlayerAction::Call,
    }
}

proptest! {
    #[test]
    fn pots_account_for_every_contributed_chip(
        bets in prop::collection::vec((1usize..=6, 1u64..400), 1..30),
        folded in prop::collection::btree_set(1usize..=6, 0..5),
    ) {
        let mut players: Vec<Player> =
            (1..=6).map(|i| Player::new(format!("p{i}"), "", 300)).collect();
        let mut ledger = PotLedger::new();
        for (seat, amount) in bets {
            ledger.contribute(seat, &mut players[seat - 1], amount);
        }
        let contenders: BTreeSet<usize> = (1..=6).filter(|s| !folded.contains(s)).collect();
        let capped: BTreeSet<usize> =
            contenders.iter().copied().filter(|&s| players[s - 1].is_all_in()).collect();

        let pots = ledger.build_side_pots(&contenders, &capped);
        prop_assert_eq!(pots.total(), ledger.total());
        prop_assert_eq!(players.iter().map(Player::stack).sum::<u64>() + ledger.total(), 1800);

        for pot in pots.pots() {
            prop_assert!(pot.eligible.is_subset(&contenders));
        }
        // an all-in seat never shares in chips bet above its own level, as long as
        // someone uncapped is left to claim them
        let uncapped_left = contenders.len() > capped.len();
        for &seat in capped.iter().filter(|_| uncapped_left) {
            let mine = ledger.hand_contribution(seat);
            let reachable: u64 = pots.pots().iter()
                .filter(|p| p.eligible.contains(&seat))
                .map(|p| p.amount)
                .sum();
            let cap: u64 = (1..=6).map(|s| ledger.hand_contribution(s).min(mine)).sum();
            prop_assert!(reachable <= cap, "seat {} can reach {} of at most {}", seat, reachable, cap);
        }
    }

    #[test]
    fn split_pot_hands_out_everything(amount in 0u64..10_000, winners in 1usize..=9) {
        let seats: Vec<usize> = (1..=winners).collect();
        let shares = split_pot(amount, &seats);
        prop_assert_eq!(shares.iter().map(|&(_, a)| a).sum::<u64>(), amount);
        let max = shares.iter().map(|&(_, a)| a).max().unwrap();
        let min = shares.iter().map(|&(_, a)| a).min().unwrap();
        prop_assert!(max - min <= 1);
        prop_assert!(shares.windows(2).all(|w| w[0].1 >= w[1].1), "odd chips go to the front");
    }

    #[test]
    fn random_play_never_creates_or_destroys_chips(
        seed in any::<u64>(),
        players in 2usize..=6,
        picks in prop::collection::vec(any::<u8>(), 1..400),
    ) {
        let config = TableConfig { starting_stack: 200, ..TableConfig::with_blinds(5, 10) };
        let mut t = Table::with_seed("fuzz", config, seed).unwrap();
        for seat in 1..=players {
            t.join(seat, format!("p{seat}"), "fuzz").unwrap();
        }
        let total = 200 * players as u64;

        let mut now = 0u64;
        for pick in picks {
            now += 1_000;
            let active = t.hand().and_then(|h| h.active_seat());
            match active {
                Some(seat) if pick == 255 => {
                    // let the clock run out instead of acting
                    now += 60_000;
                    let applied = t.expire_turn(now).unwrap();
                    prop_assert_eq!(applied.map(|a| a.seat), Some(seat));
                }
                Some(seat) => {
                    let action = choose(&t, seat, pick);
                    t.act(seat, action, now).unwrap();
                }
                None => {
                    if t.start_hand(now).is_err() {
                        break;
                    }
                }
            }
            prop_assert_eq!(chips_on_table(&t), total);
            if let Some(hand) = t.hand() {
                prop_assert_eq!(hand.pots(t.seats()).total(), hand.ledger().total());
            }
        }
    }
}
