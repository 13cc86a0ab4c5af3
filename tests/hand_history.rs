use holdem_core::action::{ActionKind, PlayerAction};
use holdem_core::config::TableConfig;
use holdem_core::hand_state::{HandEvent, Stage};
use holdem_core::table::Table;
use serde_json::json;

fn mk_heads_up() -> Table {
    let config = TableConfig { big_blind_option: false, ..TableConfig::with_blinds(5, 10) };
    let mut t = Table::with_seed("history", config, 9).unwrap();
    t.join(1, "a", "A").unwrap();
    t.join(2, "b", "B").unwrap();
    t
}

#[test]
fn history_records_blinds_and_actions() {
    let mut t = mk_heads_up();
    t.start_hand(0).unwrap();

    let history = t.hand().unwrap().history();
    assert_eq!(history.len(), 4);
    assert_eq!(
        history[0],
        HandEvent::HandStarted { number: 1, dealer: 1, small_blind: 1, big_blind: 2 }
    );
    assert_eq!(history[1], HandEvent::BlindPosted { seat: 1, amount: 5, big: false });
    assert_eq!(history[2], HandEvent::BlindPosted { seat: 2, amount: 10, big: true });
    assert_eq!(history[3], HandEvent::HoleCardsDealt { seats: vec![2, 1] });

    t.act(1, PlayerAction::Call, 0).unwrap();
    let history = t.hand().unwrap().history();
    match &history[4] {
        HandEvent::Acted { stage, action, timed_out } => {
            assert_eq!(*stage, Stage::Preflop);
            assert_eq!(action.kind, ActionKind::Call);
            assert_eq!(action.paid, 5);
            assert_eq!(action.street_total, 10);
            assert!(!timed_out);
        }
        other => panic!("expected an action, got {other:?}"),
    }
    assert!(
        matches!(&history[5], HandEvent::StreetDealt { stage: Stage::Flop, cards } if cards.len() == 3)
    );
}

#[test]
fn history_ends_with_pot_awards() {
    let mut t = mk_heads_up();
    t.start_hand(0).unwrap();
    t.act(1, PlayerAction::Fold, 0).unwrap();

    let history = t.hand().unwrap().history();
    assert_eq!(history.last(), Some(&HandEvent::PotAwarded { pot: 0, seat: 2, amount: 15 }));
    assert!(!history.iter().any(|e| matches!(e, HandEvent::StreetDealt { .. })));
}

#[test]
fn events_serialize_with_a_tag() {
    let mut t = mk_heads_up();
    t.start_hand(0).unwrap();
    let history = t.hand().unwrap().history();
    assert_eq!(
        serde_json::to_value(&history[0]).unwrap(),
        json!({"event": "handStarted", "number": 1, "dealer": 1, "smallBlind": 1, "bigBlind": 2})
    );
    assert_eq!(
        serde_json::to_value(&history[2]).unwrap(),
        json!({"event": "blindPosted", "seat": 2, "amount": 10, "big": true})
    );
}

#[test]
fn each_hand_starts_a_fresh_history() {
    let mut t = mk_heads_up();
    t.start_hand(0).unwrap();
    t.act(1, PlayerAction::Fold, 0).unwrap();
    t.start_hand(0).unwrap();

    let history = t.hand().unwrap().history();
    assert_eq!(
        history[0],
        HandEvent::HandStarted { number: 2, dealer: 2, small_blind: 2, big_blind: 1 }
    );
    assert_eq!(history.len(), 4);
}
