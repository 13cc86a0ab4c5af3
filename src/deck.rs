use crate::cards::{Card, Rank, Suit};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;

/// The 52 cards a hand is dealt from.
///
/// The top of the deck is the end of the inner vector, so dealing is a `pop`.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Unshuffled, suit by suit.
    ///
    /// ```
    /// use holdem_core::deck::Deck;
    ///
    /// assert_eq!(Deck::standard().len(), 52);
    /// ```
    pub fn standard() -> Self {
        let cards = Suit::ALL
            .into_iter()
            .flat_map(|suit| Rank::ALL.into_iter().map(move |rank| Card::new(rank, suit)))
            .collect();
        Self { cards }
    }

    pub fn shuffled<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_with(rng);
        deck
    }

    /// Only `order` is dealt, first element first. Lets a recorded hand be replayed.
    pub fn stacked(order: Vec<Card>) -> Self {
        Self { cards: order.into_iter().rev().collect() }
    }

    /// `order` is dealt first, then the rest of an unshuffled deck.
    pub fn with_top(order: Vec<Card>) -> Self {
        let mut deck = Self::standard();
        deck.cards.retain(|c| !order.contains(c));
        deck.cards.extend(order.into_iter().rev());
        deck
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// In deal order, the first card that turns up a second time.
    pub fn repeated_card(&self) -> Option<Card> {
        let mut seen = HashSet::with_capacity(self.cards.len());
        self.cards.iter().rev().copied().find(|c| !seen.insert(*c))
    }

    /// Same seed, same order.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        self.shuffle_with(&mut ChaCha20Rng::seed_from_u64(seed));
    }

    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Up to `n` cards, fewer if the deck runs out.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let keep = self.cards.len().saturating_sub(n);
        self.cards.split_off(keep).into_iter().rev().collect()
    }
}
