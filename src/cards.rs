//! Card model: ranks, suits and cards, with short-form text ("As", "10d", "Q♣").
//!
//! Cards travel over the wire as their short form, so a snapshot shows `"Kh"` rather than a
//! rank/suit object.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Short letter, singular name and plural name, indexed by `value - 2`.
const RANK_TEXT: [(char, &str, &str); 13] = [
    ('2', "Two", "Twos"),
    ('3', "Three", "Threes"),
    ('4', "Four", "Fours"),
    ('5', "Five", "Fives"),
    ('6', "Six", "Sixes"),
    ('7', "Seven", "Sevens"),
    ('8', "Eight", "Eights"),
    ('9', "Nine", "Nines"),
    ('T', "Ten", "Tens"),
    ('J', "Jack", "Jacks"),
    ('Q', "Queen", "Queens"),
    ('K', "King", "Kings"),
    ('A', "Ace", "Aces"),
];

/// Ranks from Two (low) to Ace (high); the discriminant is the ordinal 2..=14.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Ascending.
    pub const ALL: [Rank; 13] = {
        use Rank::*;
        [Two, Three, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace]
    };

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Rank::value`]; `None` outside 2..=14.
    pub const fn from_value(v: u8) -> Option<Rank> {
        if v < 2 || v > 14 {
            return None;
        }
        Some(Self::ALL[(v - 2) as usize])
    }

    const fn index(self) -> usize {
        (self as u8 - 2) as usize
    }

    pub const fn to_char(self) -> char {
        RANK_TEXT[self.index()].0
    }

    /// English name, e.g. "Queen".
    pub const fn name(self) -> &'static str {
        RANK_TEXT[self.index()].1
    }

    /// e.g. "Sixes".
    pub const fn plural(self) -> &'static str {
        RANK_TEXT[self.index()].2
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("invalid rank: '{0}'")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    /// Accepts the single-letter form (`T`, `q`, `7`) and `10`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t == "10" {
            return Ok(Rank::Ten);
        }
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::try_from(c).map_err(|_| RankParseError::Invalid(s.to_string())),
            _ => Err(RankParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let upper = c.to_ascii_uppercase();
        RANK_TEXT
            .iter()
            .position(|&(letter, _, _)| letter == upper)
            .map(|i| Rank::ALL[i])
            .ok_or_else(|| RankParseError::Invalid(c.to_string()))
    }
}

/// Letter, face symbol and name for each suit, in `Suit` order.
const SUIT_TEXT: [(char, char, &str); 4] =
    [('c', '♣', "clubs"), ('d', '♦', "diamonds"), ('h', '♥', "hearts"), ('s', '♠', "spades")];

/// Suits carry no hand strength; the order C < D < H < S only makes sorting stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    pub const fn to_char(self) -> char {
        SUIT_TEXT[self as usize].0
    }

    /// ♣ ♦ ♥ ♠
    pub const fn symbol(self) -> char {
        SUIT_TEXT[self as usize].1
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("invalid suit: '{0}'")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;

    /// A letter, a symbol, or the full name in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let mut chars = t.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Suit::try_from(c);
        }
        let lower = t.to_ascii_lowercase();
        SUIT_TEXT
            .iter()
            .position(|&(_, _, name)| name == lower)
            .map(|i| Suit::ALL[i])
            .ok_or_else(|| SuitParseError::Invalid(s.to_string()))
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        let lower = c.to_ascii_lowercase();
        SUIT_TEXT
            .iter()
            .position(|&(letter, symbol, _)| letter == lower || symbol == c)
            .map(|i| Suit::ALL[i])
            .ok_or_else(|| SuitParseError::Invalid(c.to_string()))
    }
}

/// A playing card. Immutable; equality is by (rank, suit), ordering by rank first.
///
/// ```
/// use holdem_core::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::Ace, Suit::Spades);
/// assert_eq!(card.to_string(), "As");
/// assert_eq!("A♠".parse::<Card>().unwrap(), card);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn rank(self) -> Rank {
        self.rank
    }

    pub const fn suit(self) -> Suit {
        self.suit
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        // the suit is the last char, possibly a multi-byte symbol
        let (split, suit) = t.char_indices().last().ok_or_else(|| CardParseError::Invalid(s.to_string()))?;
        if split == 0 {
            return Err(CardParseError::Invalid(s.to_string()));
        }
        Ok(Card::new(t[..split].parse()?, Suit::try_from(suit)?))
    }
}

/// Parse cards separated by whitespace and/or commas.
///
/// ```
/// use holdem_core::cards::{parse_cards, Card, Rank, Suit};
///
/// let cards = parse_cards("As, Kd 10c").unwrap();
/// assert_eq!(cards, vec![
///     Card::new(Rank::Ace, Suit::Spades),
///     Card::new(Rank::King, Suit::Diamonds),
///     Card::new(Rank::Ten, Suit::Clubs),
/// ]);
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_text_forms() {
        assert_eq!(Rank::Ace.to_string(), "A");
        assert_eq!(Rank::Six.plural(), "Sixes");
        assert_eq!(Rank::Queen.name(), "Queen");
        assert_eq!("T".parse::<Rank>(), Ok(Rank::Ten));
        assert_eq!("10".parse::<Rank>(), Ok(Rank::Ten));
        assert_eq!("7".parse::<Rank>(), Ok(Rank::Seven));
        assert!("1".parse::<Rank>().is_err());
        assert!("11".parse::<Rank>().is_err());
    }

    #[test]
    fn rank_values_cover_two_to_ace() {
        for (i, r) in Rank::ALL.into_iter().enumerate() {
            assert_eq!(r.value() as usize, i + 2);
            assert_eq!(Rank::from_value(r.value()), Some(r));
        }
        assert_eq!(Rank::from_value(1), None);
        assert_eq!(Rank::from_value(15), None);
    }

    #[test]
    fn suit_text_forms() {
        assert_eq!(Suit::Spades.to_string(), "s");
        assert_eq!(Suit::Hearts.symbol(), '♥');
        assert_eq!("S".parse::<Suit>(), Ok(Suit::Spades));
        assert_eq!("♥".parse::<Suit>(), Ok(Suit::Hearts));
        assert_eq!("Diamonds".parse::<Suit>(), Ok(Suit::Diamonds));
        assert!("x".parse::<Suit>().is_err());
    }

    #[test]
    fn card_parsing() {
        assert_eq!("10d".parse::<Card>(), Ok(Card::new(Rank::Ten, Suit::Diamonds)));
        assert_eq!("ah".parse::<Card>(), Ok(Card::new(Rank::Ace, Suit::Hearts)));
        assert_eq!("Q♣".parse::<Card>(), Ok(Card::new(Rank::Queen, Suit::Clubs)));
        assert!("h".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
        assert!("1h".parse::<Card>().is_err());
    }

    #[test]
    fn cards_order_by_rank_first() {
        let mut cards = parse_cards("Kd As Ah 2s").unwrap();
        cards.sort();
        assert_eq!(cards, parse_cards("2s Kd Ah As").unwrap());
    }

    #[test]
    fn cards_serialize_as_short_text() {
        let card = Card::new(Rank::Jack, Suit::Clubs);
        assert_eq!(serde_json::to_string(&card).unwrap(), "\"Jc\"");
        assert_eq!(serde_json::from_str::<Card>("\"J♣\"").unwrap(), card);
        assert!(serde_json::from_str::<Card>("\"Zz\"").is_err());
    }
}
