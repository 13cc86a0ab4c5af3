//! One street of betting: whose turn it is, what they may do, and when the street is over.

use crate::action::{ActionKind, PlayerAction};
use crate::error::IllegalAction;
use crate::pot::PotLedger;
use crate::seats::SeatRing;
use serde::Serialize;
use std::collections::BTreeSet;

/// What the active seat may do right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalActions {
    pub to_call: u64,
    pub can_check: bool,
    /// Smallest full raise, as a street total. `None` when raising is closed.
    pub min_raise_to: Option<u64>,
    /// Largest possible street total (all-in).
    pub max_raise_to: u64,
}

/// An accepted action as it hit the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedAction {
    pub seat: usize,
    pub kind: ActionKind,
    /// Chips moved from the stack by this action.
    pub paid: u64,
    /// The seat's street total afterwards.
    pub street_total: u64,
    pub all_in: bool,
    /// A full raise that reopened action for everyone else.
    pub reopened: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Move {
    Fold,
    Check,
    PutIn { to: u64 },
}

#[derive(Debug, Clone)]
pub struct BettingRound {
    current_bet: u64,
    min_raise: u64,
    acted: BTreeSet<usize>,
    /// Seats that acted before an incomplete all-in raise: they may call or fold, not raise.
    locked: BTreeSet<usize>,
    active: Option<usize>,
    deadline_ms: Option<u64>,
    timeout_ms: u64,
}

impl BettingRound {
    pub fn new(current_bet: u64, min_raise: u64, timeout_ms: u64) -> Self {
        Self {
            current_bet,
            min_raise,
            acted: BTreeSet::new(),
            locked: BTreeSet::new(),
            active: None,
            deadline_ms: None,
            timeout_ms,
        }
    }

    pub fn current_bet(&self) -> u64 {
        self.current_bet
    }

    /// Size of the last full raise; the next raise must be at least this much more.
    pub fn min_raise(&self) -> u64 {
        self.min_raise
    }

    pub fn min_raise_to(&self) -> u64 {
        self.current_bet + self.min_raise
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.deadline_ms
    }

    pub fn is_complete(&self) -> bool {
        self.active.is_none()
    }

    pub fn has_acted(&self, seat: usize) -> bool {
        self.acted.contains(&seat)
    }

    /// Treat a seat as having acted already (a big blind without the option).
    pub(crate) fn mark_acted(&mut self, seat: usize) {
        self.acted.insert(seat);
    }

    pub fn to_call(&self, ledger: &PotLedger, seat: usize) -> u64 {
        self.current_bet.saturating_sub(ledger.street_contribution(seat))
    }

    /// Whether `seat` still owes the street an action.
    pub fn needs_action(&self, seats: &SeatRing, ledger: &PotLedger, seat: usize) -> bool {
        if !seats.player(seat).is_some_and(|p| p.can_act()) {
            return false;
        }
        let owes = ledger.street_contribution(seat) < self.current_bet;
        if seats.count_active() <= 1 {
            return owes;
        }
        owes || !self.acted.contains(&seat)
    }

    /// Hand the turn to the first seat after `from` that still needs to act.
    pub(crate) fn advance(
        &mut self,
        seats: &SeatRing,
        ledger: &PotLedger,
        from: Option<usize>,
        now_ms: u64,
    ) {
        self.active = seats.order_after(from).find(|&s| self.needs_action(seats, ledger, s));
        self.deadline_ms = self.active.map(|_| now_ms.saturating_add(self.timeout_ms));
    }

    /// Re-check the turn after a seat left the round out of turn. The active seat keeps
    /// its deadline if it still has to act.
    pub(crate) fn recheck(&mut self, seats: &SeatRing, ledger: &PotLedger, now_ms: u64) {
        match self.active {
            Some(seat) if self.needs_action(seats, ledger, seat) => {}
            from => self.advance(seats, ledger, from, now_ms),
        }
    }

    pub fn legal_actions(&self, seats: &SeatRing, ledger: &PotLedger, seat: usize) -> Option<LegalActions> {
        if self.active != Some(seat) {
            return None;
        }
        let player = seats.player(seat)?;
        let contributed = ledger.street_contribution(seat);
        let to_call = self.to_call(ledger, seat);
        let max_raise_to = contributed + player.stack();
        let can_raise = !self.locked.contains(&seat) && max_raise_to > self.current_bet;
        Some(LegalActions {
            to_call,
            can_check: to_call == 0,
            min_raise_to: can_raise.then(|| self.min_raise_to().min(max_raise_to)),
            max_raise_to,
        })
    }

    /// What a timed-out seat does: check when free, fold otherwise.
    pub fn timeout_action(&self, ledger: &PotLedger, now_ms: u64) -> Option<(usize, PlayerAction)> {
        let seat = self.active?;
        let deadline = self.deadline_ms?;
        if now_ms < deadline {
            return None;
        }
        let action =
            if self.to_call(ledger, seat) == 0 { PlayerAction::Check } else { PlayerAction::Fold };
        Some((seat, action))
    }

    fn resolve(
        &self,
        seats: &SeatRing,
        ledger: &PotLedger,
        seat: usize,
        action: PlayerAction,
    ) -> Result<Move, IllegalAction> {
        let expected = self.active.ok_or(IllegalAction::NoHandInProgress)?;
        if seat != expected {
            return Err(IllegalAction::NotYourTurn { expected, got: seat });
        }
        let player =
            seats.player(seat).filter(|p| p.can_act()).ok_or(IllegalAction::SeatNotInHand(seat))?;
        let contributed = ledger.street_contribution(seat);
        let owed = self.current_bet.saturating_sub(contributed);
        let max_total = contributed + player.stack();
        let locked = self.locked.contains(&seat);

        let all_in = || {
            if max_total > self.current_bet && locked {
                Err(IllegalAction::RaiseNotAllowed)
            } else {
                Ok(Move::PutIn { to: max_total })
            }
        };

        match action {
            PlayerAction::Fold => Ok(Move::Fold),
            PlayerAction::Check if owed == 0 => Ok(Move::Check),
            PlayerAction::Check => Err(IllegalAction::CannotCheck { to_call: owed }),
            PlayerAction::Call if owed == 0 => Ok(Move::Check),
            PlayerAction::Call => Ok(Move::PutIn { to: self.current_bet.min(max_total) }),
            PlayerAction::AllIn => all_in(),
            PlayerAction::Raise(to) => {
                if to > max_total {
                    return Err(IllegalAction::RaiseExceedsStack { max: max_total, got: to });
                }
                if to == max_total {
                    return all_in();
                }
                if locked {
                    return Err(IllegalAction::RaiseNotAllowed);
                }
                let min = self.min_raise_to();
                if to < min {
                    return Err(IllegalAction::RaiseTooSmall { min, got: to });
                }
                Ok(Move::PutIn { to })
            }
        }
    }

    /// Validate and apply an action from the active seat, then pass the turn on.
    /// Nothing changes when the action is rejected.
    pub fn apply(
        &mut self,
        seats: &mut SeatRing,
        ledger: &mut PotLedger,
        seat: usize,
        action: PlayerAction,
        now_ms: u64,
    ) -> Result<AppliedAction, IllegalAction> {
        let mv = self.resolve(seats, ledger, seat, action)?;
        let player = seats.player_mut(seat).ok_or(IllegalAction::SeatNotInHand(seat))?;
        let before = ledger.street_contribution(seat);

        let mut applied = AppliedAction {
            seat,
            kind: ActionKind::Fold,
            paid: 0,
            street_total: before,
            all_in: false,
            reopened: false,
        };
        match mv {
            Move::Fold => player.folded = true,
            Move::Check => applied.kind = ActionKind::Check,
            Move::PutIn { to } => {
                let paid = ledger.contribute(seat, player, to.saturating_sub(before));
                let total = before + paid;
                applied.paid = paid;
                applied.street_total = total;
                applied.all_in = player.is_all_in();
                applied.kind = if applied.all_in { ActionKind::AllIn } else { ActionKind::Call };
                if total > self.current_bet {
                    let increment = total - self.current_bet;
                    if increment >= self.min_raise {
                        self.min_raise = increment;
                        self.acted.clear();
                        self.locked.clear();
                        applied.reopened = true;
                    } else {
                        self.locked.extend(self.acted.iter().copied());
                    }
                    self.current_bet = total;
                    if !applied.all_in {
                        applied.kind = ActionKind::Raise;
                    }
                }
            }
        }
        self.acted.insert(seat);
        self.advance(seats, ledger, Some(seat), now_ms);
        Ok(applied)
    }
}
