use holdem_core::action::PlayerAction;
use holdem_core::betting::LegalActions;
use holdem_core::cards::parse_cards;
use holdem_core::config::TableConfig;
use holdem_core::deck::Deck;
use holdem_core::table::{Table, TablePhase};
use serde_json::Value;

fn mk_table(players: usize) -> Table {
    let config = TableConfig { big_blind_option: false, ..TableConfig::with_blinds(5, 10) };
    let mut t = Table::with_seed("snap", config, 17).unwrap();
    for seat in 1..=players {
        t.join(seat, format!("p{seat}"), format!("Player {seat}")).unwrap();
    }
    t
}

#[test]
fn waiting_table_has_no_hand_fields() {
    let t = mk_table(1);
    let snap = t.snapshot(None);
    assert_eq!(snap.phase, TablePhase::Waiting);
    assert_eq!(snap.stage, None);
    assert_eq!(snap.active_seat, None);
    assert_eq!(snap.pot_total, 0);
    assert_eq!(snap.seats.len(), 6);
    assert_eq!(snap.seats[0].player_id.as_deref(), Some("p1"));
    assert!(snap.seats[1].player_id.is_none());
}

#[test]
fn viewers_only_see_their_own_hole_cards() {
    let mut t = mk_table(3);
    t.start_hand(0).unwrap();

    let mine = t.snapshot(Some(2));
    assert_eq!(mine.seats[1].hole_cards, t.player(2).unwrap().hole());
    assert!(mine.seats[1].hole_cards.is_some());
    for other in [0, 2] {
        assert!(mine.seats[other].hole_cards.is_none());
        assert_eq!(mine.seats[other].card_count, 2);
    }

    let spectator = t.snapshot(None);
    assert!(spectator.seats.iter().all(|s| s.hole_cards.is_none()));
}

#[test]
fn legal_actions_only_for_the_seat_to_act() {
    let mut t = mk_table(3);
    t.start_hand(0).unwrap();

    let snap = t.snapshot(Some(1));
    assert_eq!(snap.active_seat, Some(1));
    assert_eq!(snap.current_bet, 10);
    assert_eq!(snap.min_raise_to, 20);
    assert_eq!(snap.pot_total, 15);
    assert_eq!(
        snap.legal_actions,
        Some(LegalActions { to_call: 10, can_check: false, min_raise_to: Some(20), max_raise_to: 1000 })
    );
    assert!(t.snapshot(Some(2)).legal_actions.is_none());
    assert!(t.snapshot(None).legal_actions.is_none());
}

#[test]
fn street_bets_and_pots_follow_the_action() {
    let mut t = mk_table(3);
    t.start_hand(0).unwrap();
    t.act(1, PlayerAction::Raise(30), 0).unwrap();

    let snap = t.snapshot(None);
    let bets: Vec<u64> = snap.seats.iter().take(3).map(|s| s.street_bet).collect();
    assert_eq!(bets, vec![30, 5, 10]);
    assert_eq!(snap.pots.main, 45);
    assert_eq!(snap.min_raise_to, 50);
    assert_eq!(snap.seats[0].stack, 970);
}

#[test]
fn showdown_reveals_winners_and_shown_losers() {
    // seat 2 is dealt 2c 7d, seat 1 the aces
    let mut t = mk_table(2);
    let deck = Deck::with_top(parse_cards("2c 7d As Ad Kc 9h 5s 3d Jc").unwrap());
    t.start_hand_with_deck(deck, 0).unwrap();
    t.act(1, PlayerAction::Call, 0).unwrap();
    for _ in 0..3 {
        t.act(2, PlayerAction::Check, 0).unwrap();
        t.act(1, PlayerAction::Check, 0).unwrap();
    }

    let snap = t.snapshot(None);
    assert_eq!(snap.phase, TablePhase::Finished);
    assert_eq!(snap.board.len(), 5);
    assert!(snap.seats[0].hole_cards.is_some(), "winner is shown");
    assert!(snap.seats[1].hole_cards.is_none(), "loser has not decided yet");
    assert_eq!(snap.reveal_requests.len(), 1);
    let result = snap.result.expect("hand result");
    assert_eq!(result.pots[0].description.as_deref(), Some("Pair of Aces"));

    t.reveal(2, true).unwrap();
    let snap = t.snapshot(None);
    assert_eq!(snap.seats[1].hole_cards, Some("2c 7d".parse().unwrap()));
}

#[test]
fn json_uses_camel_case_keys() {
    let mut t = mk_table(2);
    t.start_hand(0).unwrap();
    let json = t.snapshot(Some(1)).to_json().unwrap();
    let v: Value = serde_json::from_str(&json).unwrap();

    assert_eq!(v["tableId"], "snap");
    assert_eq!(v["phase"], "inHand");
    assert_eq!(v["stage"], "preflop");
    assert_eq!(v["activeSeat"], 1);
    assert_eq!(v["turnDeadlineMs"], 30_000);
    assert_eq!(v["legalActions"]["toCall"], 5);
    assert_eq!(v["seats"][0]["streetBet"], 5);
    assert!(v["seats"][1]["holeCards"].is_null());
    assert!(v["seats"][1]["bustDeadlineMs"].is_null());
}

#[test]
fn finished_hand_reports_an_empty_pot() {
    let mut t = mk_table(2);
    t.start_hand(0).unwrap();
    t.act(1, PlayerAction::Fold, 0).unwrap();

    let snap = t.snapshot(None);
    assert_eq!(snap.phase, TablePhase::Finished);
    assert_eq!(snap.pot_total, 0);
    assert_eq!(snap.pots.total(), 0);
    assert_eq!(snap.seats.iter().map(|s| s.stack).sum::<u64>(), 2000);
    assert_eq!(snap.seats[1].stack, 1005);
    let result = snap.result.expect("hand result");
    assert_eq!(result.pots.iter().map(|p| p.amount).sum::<u64>(), 15);
}
