//! Best-hand evaluation for 5 to 7 cards.
//!
//! [`evaluate_five`] classifies exactly five cards; [`evaluate_best_hand`] enumerates every
//! five-card subset of a 5..=7 card input and keeps the strongest.

pub(crate) mod combinations;
pub(crate) mod detector;
pub(crate) mod hand_analysis;

use crate::cards::{Card, Rank};
use crate::hand::{Board, HoleCards};
use core::cmp::Ordering;
use serde::Serialize;
use std::collections::HashSet;

/// A hand's strength as one integer: the category in the top byte, then five 6-bit rank
/// slots, most significant first. Comparing two values compares the hands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u64);

impl HandValue {
    const CATEGORY_SHIFT: u32 = 48;
    const RANK_BITS: u32 = 6;

    pub const fn raw(self) -> u64 {
        self.0
    }

    pub fn from_parts(category: Category, ranks: &[Rank; 5]) -> Self {
        let packed = ranks.iter().fold(u64::from(category as u8), |acc, r| {
            (acc << Self::RANK_BITS) | u64::from(r.value())
        });
        HandValue(packed << (Self::CATEGORY_SHIFT - 5 * Self::RANK_BITS))
    }
}

/// Hand category. Declared weakest to strongest so the derived `Ord` means "better is greater".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::RoyalFlush,
        Category::StraightFlush,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::Flush,
        Category::Straight,
        Category::ThreeOfAKind,
        Category::TwoPair,
        Category::Pair,
        Category::HighCard,
    ];

    /// Table position: 1 for Royal Flush (best) through 10 for High Card (worst).
    pub const fn position(self) -> u8 {
        10 - self as u8
    }

    pub const fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::Pair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }

    /// Number of leading tie-break cards that make up the category itself.
    pub const fn defining_len(self) -> usize {
        match self {
            Category::HighCard => 1,
            Category::Pair => 2,
            Category::ThreeOfAKind => 3,
            Category::TwoPair | Category::FourOfAKind => 4,
            Category::Straight
            | Category::Flush
            | Category::FullHouse
            | Category::StraightFlush
            | Category::RoyalFlush => 5,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The best five-card hand found for a player.
///
/// `tiebreak_cards` always holds all five cards ordered by significance: category-defining
/// groups first (larger group, then higher rank), then kickers high to low. Straights are
/// ordered from their top card down, so a wheel ends with the Ace. Two hands compare by
/// category first and then positionally by the ranks of these cards.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedHand {
    pub category: Category,
    tiebreak_cards: [Card; 5],
    description: String,
    #[serde(skip)]
    value: HandValue,
}

impl EvaluatedHand {
    pub(crate) fn new(category: Category, tiebreak_cards: [Card; 5], description: String) -> Self {
        let ranks = tiebreak_cards.map(Card::rank);
        let value = HandValue::from_parts(category, &ranks);
        Self { category, tiebreak_cards, description, value }
    }

    pub fn tiebreak_cards(&self) -> &[Card; 5] {
        &self.tiebreak_cards
    }

    /// Only the cards that define the category (e.g. the four cards of a quad).
    pub fn defining_cards(&self) -> &[Card] {
        &self.tiebreak_cards[..self.category.defining_len()]
    }

    /// Human-readable summary such as "Kings full of Sevens".
    pub fn description(&self) -> &str {
        &self.description
    }

    pub const fn value(&self) -> HandValue {
        self.value
    }
}

impl Ord for EvaluatedHand {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl PartialOrd for EvaluatedHand {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for EvaluatedHand {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for EvaluatedHand {}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("hand evaluation needs 5 to 7 cards, got {0}")]
    InvalidHandSize(usize),
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// Classify exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> EvaluatedHand {
    let analysis = hand_analysis::HandAnalysis::new(cards);
    detector::classify(&analysis).build(&analysis)
}

/// Evaluate 5, 6 or 7 cards and return the strongest five-card hand among them.
///
/// ```
/// use holdem_core::cards::parse_cards;
/// use holdem_core::evaluator::{evaluate_best_hand, Category};
///
/// let cards = parse_cards("Ah Kh Qh Jh 10h 2c 3d").unwrap();
/// let best = evaluate_best_hand(&cards).unwrap();
/// assert_eq!(best.category, Category::RoyalFlush);
/// ```
pub fn evaluate_best_hand(cards: &[Card]) -> Result<EvaluatedHand, EvalError> {
    use combinations::FiveCardSubsets;

    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::InvalidHandSize(cards.len()));
    }
    let mut seen = HashSet::with_capacity(cards.len());
    if let Some(dup) = cards.iter().find(|c| !seen.insert(**c)) {
        return Err(EvalError::DuplicateCard(*dup));
    }

    let best = FiveCardSubsets::new(cards.len())
        .map(|idx| evaluate_five(&idx.map(|i| cards[i])))
        .max()
        .ok_or(EvalError::InvalidHandSize(cards.len()))?;
    Ok(best)
}

/// Evaluate a Hold'em player's hand: hole cards plus a board of at least three cards.
pub fn evaluate_holdem(hole: &HoleCards, board: &Board) -> Result<EvaluatedHand, EvalError> {
    let mut cards = Vec::with_capacity(7);
    cards.extend_from_slice(&hole.as_array());
    cards.extend_from_slice(board.as_slice());
    evaluate_best_hand(&cards)
}
