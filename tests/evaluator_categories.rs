use holdem_core::cards::{parse_cards, Card, Rank, Suit};
use holdem_core::evaluator::{evaluate_best_hand, evaluate_five, evaluate_holdem, Category, EvalError};
use holdem_core::hand::{Board, HoleCards};

fn five(s: &str) -> [Card; 5] {
    let v = parse_cards(s).expect("valid cards");
    [v[0], v[1], v[2], v[3], v[4]]
}

#[test]
fn category_royal_flush() {
    let xs = [
        Card::new(Rank::Ace, Suit::Spades),
        Card::new(Rank::King, Suit::Spades),
        Card::new(Rank::Queen, Suit::Spades),
        Card::new(Rank::Jack, Suit::Spades),
        Card::new(Rank::Ten, Suit::Spades),
    ];
    let e = evaluate_five(&xs);
    assert_eq!(e.category, Category::RoyalFlush);
    assert_eq!(e.category.position(), 1);
}

#[test]
fn category_straight_flush() {
    let e = evaluate_five(&five("9c 8c 7c 6c 5c"));
    assert_eq!(e.category, Category::StraightFlush);
    assert_eq!(e.category.position(), 2);
    assert_eq!(e.tiebreak_cards()[0].rank(), Rank::Nine);
}

#[test]
fn wheel_straight_flush_is_five_high() {
    let e = evaluate_five(&five("Ah 2h 3h 4h 5h"));
    assert_eq!(e.category, Category::StraightFlush);
    assert_eq!(e.tiebreak_cards()[0].rank(), Rank::Five, "wheel references the five, not the ace");
    assert_eq!(e.description(), "Straight Flush, Five high");
    assert!(e < evaluate_five(&five("6h 2h 3h 4h 5h")));
}

#[test]
fn category_four_of_a_kind() {
    let xs = [
        Card::new(Rank::Nine, Suit::Clubs),
        Card::new(Rank::Nine, Suit::Diamonds),
        Card::new(Rank::Nine, Suit::Hearts),
        Card::new(Rank::Nine, Suit::Spades),
        Card::new(Rank::Ace, Suit::Clubs),
    ];
    let e = evaluate_five(&xs);
    assert_eq!(e.category, Category::FourOfAKind);
    assert!(e.defining_cards().iter().all(|c| c.rank() == Rank::Nine));
}

#[test]
fn category_full_house() {
    let e = evaluate_five(&five("3c 3d 3h Js Jc"));
    assert_eq!(e.category, Category::FullHouse);
    assert_eq!(e.description(), "Threes full of Jacks");
}

#[test]
fn category_flush() {
    let e = evaluate_five(&five("Kh 10h 8h 6h 3h"));
    assert_eq!(e.category, Category::Flush);
    assert_eq!(e.description(), "Flush, King high");
}

#[test]
fn category_straight() {
    let e = evaluate_five(&five("Ac 5c 4d 3h 2s"));
    assert_eq!(e.category, Category::Straight);
    assert_eq!(e.tiebreak_cards()[4].rank(), Rank::Ace);
}

#[test]
fn category_three_of_a_kind() {
    let e = evaluate_five(&five("Qc Qd Qh 10s 2c"));
    assert_eq!(e.category, Category::ThreeOfAKind);
    assert_eq!(e.description(), "Three Queens");
}

#[test]
fn category_two_pair() {
    let e = evaluate_five(&five("Jc Jd 9c 9h 2s"));
    assert_eq!(e.category, Category::TwoPair);
    assert_eq!(e.defining_cards().len(), 4);
}

#[test]
fn category_pair() {
    let e = evaluate_five(&five("Ah Ad 10s 9c 2d"));
    assert_eq!(e.category, Category::Pair);
}

#[test]
fn category_high_card() {
    let e = evaluate_five(&five("Ah Kd 7s 5c 2d"));
    assert_eq!(e.category, Category::HighCard);
    assert_eq!(e.category.position(), 10);
}

#[test]
fn pair_kickers_decide_ties() {
    let a = evaluate_five(&five("8h 8d Ks 9c 3d"));
    let b = evaluate_five(&five("8s 8c Ks 9d 2h"));
    assert!(a > b, "third kicker breaks the tie");
}

#[test]
fn two_pair_kicker_decides_ties() {
    let a = evaluate_five(&five("Jc Jd 9c 9h As"));
    let b = evaluate_five(&five("Js Jh 9d 9s Ks"));
    assert!(a > b);
}

#[test]
fn identical_ranks_split() {
    let hole_a: HoleCards = "Ac 2d".parse().unwrap();
    let hole_b: HoleCards = "Ad 3c".parse().unwrap();
    let board: Board = "Kh Qs Js 10d 4c".parse().unwrap();
    let a = evaluate_holdem(&hole_a, &board).unwrap();
    let b = evaluate_holdem(&hole_b, &board).unwrap();
    assert_eq!(a.category, Category::Straight);
    assert_eq!(a, b, "both play the board straight");
}

#[test]
fn royal_flush_on_board_beats_anything() {
    let royal: HoleCards = "Ah Kh".parse().unwrap();
    let board: Board = "Qh Jh 10h 2c 3d".parse().unwrap();
    let best = evaluate_holdem(&royal, &board).unwrap();
    assert_eq!(best.category, Category::RoyalFlush);

    for other in ["Qc Qd", "9h 8h", "2h 2d", "Ac Kc"] {
        let hole: HoleCards = other.parse().unwrap();
        assert!(best > evaluate_holdem(&hole, &board).unwrap(), "royal flush beats {other}");
    }
}

#[test]
fn six_cards_are_accepted() {
    let cards = parse_cards("2c 2d 2h 9s 9c Kd").unwrap();
    let e = evaluate_best_hand(&cards).unwrap();
    assert_eq!(e.category, Category::FullHouse);
}

#[test]
fn fewer_than_five_cards_is_an_error() {
    let hole: HoleCards = "Ah Kh".parse().unwrap();
    let board = Board::new();
    assert_eq!(evaluate_holdem(&hole, &board), Err(EvalError::InvalidHandSize(2)));
}
