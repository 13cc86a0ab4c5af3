//! Hole cards and the community board.

use crate::cards::{parse_cards, Card};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest board in hold'em: flop, turn and river.
pub const MAX_BOARD: usize = 5;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum HandError {
    #[error("hole cards repeat {0}")]
    DuplicateHoleCards(Card),
    #[error("a board holds at most 5 cards, got {0}")]
    TooManyBoardCards(usize),
    #[error("board repeats {0}")]
    DuplicateBoardCards(Card),
    #[error("hole cards come in pairs, got {0}")]
    HoleCount(usize),
    #[error("unreadable cards: {0}")]
    CardParse(String),
}

fn read_cards(s: &str) -> Result<Vec<Card>, HandError> {
    parse_cards(s).map_err(|e| HandError::CardParse(e.to_string()))
}

/// First card that appears twice in `cards`, if any.
fn first_repeat(cards: &[Card]) -> Option<Card> {
    cards.iter().enumerate().find_map(|(i, c)| cards[..i].contains(c).then_some(*c))
}

/// The two private cards dealt to one seat, kept in deal order.
///
/// ```
/// use holdem_core::cards::{Card, Rank, Suit};
/// use holdem_core::hand::HoleCards;
///
/// let hole = HoleCards::try_new(
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Spades),
/// ).unwrap();
/// assert_eq!(hole.to_string(), "As Ks");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "[Card; 2]", try_from = "[Card; 2]")]
pub struct HoleCards {
    cards: [Card; 2],
}

impl HoleCards {
    pub fn try_new(a: Card, b: Card) -> Result<Self, HandError> {
        Self::try_from([a, b])
    }

    pub fn from_slice(slice: &[Card]) -> Result<Self, HandError> {
        match *slice {
            [a, b] => Self::try_new(a, b),
            _ => Err(HandError::HoleCount(slice.len())),
        }
    }

    pub fn first(&self) -> Card {
        self.cards[0]
    }

    pub fn second(&self) -> Card {
        self.cards[1]
    }

    pub fn as_array(&self) -> [Card; 2] {
        self.cards
    }
}

impl TryFrom<[Card; 2]> for HoleCards {
    type Error = HandError;

    fn try_from(cards: [Card; 2]) -> Result<Self, Self::Error> {
        if cards[0] == cards[1] {
            return Err(HandError::DuplicateHoleCards(cards[0]));
        }
        Ok(Self { cards })
    }
}

impl From<HoleCards> for [Card; 2] {
    fn from(hole: HoleCards) -> Self {
        hole.cards
    }
}

impl fmt::Display for HoleCards {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.cards[0], self.cards[1])
    }
}

impl FromStr for HoleCards {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(&read_cards(s)?)
    }
}

/// Community cards. A hand's board only grows, through 0, 3, 4 and 5 cards.
///
/// ```
/// use holdem_core::hand::Board;
///
/// let board: Board = "2c 3c 4c".parse().unwrap();
/// assert_eq!(board.len(), 3);
/// assert_eq!(board.to_string(), "2c 3c 4c");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Board(Vec<Card>);

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn try_new(cards: Vec<Card>) -> Result<Self, HandError> {
        if cards.len() > MAX_BOARD {
            return Err(HandError::TooManyBoardCards(cards.len()));
        }
        match first_repeat(&cards) {
            Some(card) => Err(HandError::DuplicateBoardCards(card)),
            None => Ok(Self(cards)),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.0
    }

    /// Cards come straight off the deck, so they are never repeats.
    pub(crate) fn extend(&mut self, cards: impl IntoIterator<Item = Card>) {
        self.0.extend(cards);
        debug_assert!(self.0.len() <= MAX_BOARD);
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = HandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_new(read_cards(s)?)
    }
}
