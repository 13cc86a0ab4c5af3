use crate::hand::HoleCards;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a player across hands and tables.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(String);

impl PlayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PlayerId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for PlayerId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A seated player. Stack and flags are mutated only by the hand engine.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct Player {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) stack: u64,
    pub(crate) hole: Option<HoleCards>,
    pub(crate) folded: bool,
    pub(crate) all_in: bool,
    pub(crate) busted: bool,
    /// When a busted player who has not rebought loses the seat.
    pub(crate) bust_deadline_ms: Option<u64>,
    /// Leave requested mid-hand; the seat is vacated when the hand ends.
    pub(crate) leaving: bool,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, stack: u64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stack,
            hole: None,
            folded: false,
            all_in: false,
            busted: stack == 0,
            bust_deadline_ms: None,
            leaving: false,
        }
    }

    pub fn id(&self) -> &PlayerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn stack(&self) -> u64 {
        self.stack
    }

    /// Retained after folding, but never evaluated once folded.
    pub fn hole(&self) -> Option<HoleCards> {
        self.hole
    }

    pub fn is_folded(&self) -> bool {
        self.folded
    }

    pub fn is_all_in(&self) -> bool {
        self.all_in
    }

    pub fn is_busted(&self) -> bool {
        self.busted
    }

    pub fn bust_deadline_ms(&self) -> Option<u64> {
        self.bust_deadline_ms
    }

    pub fn is_leaving(&self) -> bool {
        self.leaving
    }

    /// Dealt into the current hand.
    pub fn in_hand(&self) -> bool {
        self.hole.is_some()
    }

    /// Still contesting the pot: dealt in and not folded (all-in players contest).
    pub fn is_contending(&self) -> bool {
        self.in_hand() && !self.folded
    }

    /// Can still take betting actions this hand.
    pub fn can_act(&self) -> bool {
        self.is_contending() && !self.all_in
    }

    /// Take up to `amount` chips from the stack; a short stack goes all-in for what it has.
    pub(crate) fn take_chips(&mut self, amount: u64) -> u64 {
        let paid = self.stack.min(amount);
        self.stack -= paid;
        if self.stack == 0 && paid > 0 {
            self.all_in = true;
        }
        paid
    }

    /// Out of chips. A deadline already running is kept.
    pub(crate) fn bust(&mut self, deadline_ms: u64) {
        self.busted = true;
        self.bust_deadline_ms.get_or_insert(deadline_ms);
    }

    pub(crate) fn rebuy(&mut self, amount: u64) {
        self.stack = amount;
        self.busted = false;
        self.bust_deadline_ms = None;
    }

    pub(crate) fn reset_for_hand(&mut self) {
        self.hole = None;
        self.folded = false;
        self.all_in = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn take_chips_clamps_and_marks_all_in() {
        let mut p = Player::new("p1", "Ann", 30);
        assert_eq!(p.take_chips(10), 10);
        assert!(!p.is_all_in());
        assert_eq!(p.take_chips(50), 20);
        assert_eq!(p.stack(), 0);
        assert!(p.is_all_in());
    }

    #[test]
    fn zero_stack_player_starts_busted() {
        assert!(Player::new("p1", "Ann", 0).is_busted());
        assert!(!Player::new("p2", "Bob", 1).is_busted());
    }

    #[test]
    fn bust_keeps_the_first_deadline_until_rebuy() {
        let mut p = Player::new("p1", "Ann", 10);
        p.take_chips(10);
        p.bust(30_000);
        p.bust(90_000);
        assert!(p.is_busted());
        assert_eq!(p.bust_deadline_ms(), Some(30_000));
        p.rebuy(500);
        assert!(!p.is_busted());
        assert_eq!(p.bust_deadline_ms(), None);
        assert_eq!(p.stack(), 500);
    }

    #[test]
    fn not_dealt_in_means_cannot_act() {
        let p = Player::new("p1", "Ann", 100);
        assert!(!p.in_hand());
        assert!(!p.can_act());
    }
}
