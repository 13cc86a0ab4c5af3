//! A single hand from blinds to payout.
//!
//! [`HandState`] owns the deck, board, pot ledger and the current [`BettingRound`]. It reads
//! and updates players through the table's [`SeatRing`], which it borrows for each call.

use crate::action::{ActionKind, PlayerAction};
use crate::betting::{AppliedAction, BettingRound, LegalActions};
use crate::cards::Card;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::error::{IllegalAction, TableError};
use crate::evaluator::{evaluate_holdem, EvaluatedHand};
use crate::hand::{Board, HoleCards, MAX_BOARD};
use crate::pot::{split_pot, PotBreakdown, PotLedger};
use crate::seats::SeatRing;
use crate::snapshot::{HandResult, Payout, PotAward, RevealRequest, ShowdownHand};
use log::{debug, info, trace, warn};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Stage {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Stage {
    /// Community cards on the table at this stage.
    pub const fn board_len(self) -> usize {
        match self {
            Stage::Preflop => 0,
            Stage::Flop => 3,
            Stage::Turn => 4,
            Stage::River | Stage::Showdown => 5,
        }
    }

    fn next_street(self) -> Option<(Stage, usize)> {
        match self {
            Stage::Preflop => Some((Stage::Flop, 3)),
            Stage::Flop => Some((Stage::Turn, 1)),
            Stage::Turn => Some((Stage::River, 1)),
            Stage::River | Stage::Showdown => None,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Preflop => "Preflop",
            Stage::Flop => "Flop",
            Stage::Turn => "Turn",
            Stage::River => "River",
            Stage::Showdown => "Showdown",
        };
        f.write_str(s)
    }
}

/// One entry of the hand history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "camelCase", rename_all_fields = "camelCase")]
#[non_exhaustive]
pub enum HandEvent {
    HandStarted { number: u64, dealer: usize, small_blind: usize, big_blind: usize },
    BlindPosted { seat: usize, amount: u64, big: bool },
    HoleCardsDealt { seats: Vec<usize> },
    Acted { stage: Stage, action: AppliedAction, timed_out: bool },
    StreetDealt { stage: Stage, cards: Vec<Card> },
    PotAwarded { pot: usize, seat: usize, amount: u64 },
    Revealed { seat: usize, shown: bool },
}

#[derive(Debug, Clone)]
pub struct HandState {
    number: u64,
    stage: Stage,
    board: Board,
    deck: Deck,
    dealer: usize,
    small_blind: usize,
    big_blind: usize,
    ledger: PotLedger,
    round: BettingRound,
    config: TableConfig,
    history: Vec<HandEvent>,
    result: Option<HandResult>,
    reveals: BTreeMap<usize, RevealRequest>,
}

impl HandState {
    /// Rotate the button, post blinds, deal hole cards and open preflop betting.
    ///
    /// Every seated player who is not busted is dealt in. Cards come off `deck` two at a
    /// time per seat, starting left of the dealer, then three for the flop and one each for
    /// turn and river.
    pub fn start(
        number: u64,
        seats: &mut SeatRing,
        previous_dealer: Option<usize>,
        config: &TableConfig,
        deck: Deck,
        now_ms: u64,
    ) -> Result<Self, TableError> {
        let seated = seats.players().filter(|(_, p)| !p.is_busted() && p.stack() > 0).count();
        let not_enough = || TableError::NotEnoughPlayers { seated };
        if seated < 2 {
            return Err(not_enough());
        }
        let needed = 2 * seated + MAX_BOARD;
        if deck.len() < needed {
            return Err(TableError::ShortDeck { needed, available: deck.len() });
        }
        if let Some(card) = deck.repeated_card() {
            return Err(TableError::DuplicateDeckCard(card));
        }
        for (_, p) in seats.players_mut() {
            p.reset_for_hand();
            if p.stack == 0 {
                p.bust(now_ms.saturating_add(config.bustout_timeout_ms));
            }
        }
        let dealer = seats.next_occupied(previous_dealer).ok_or_else(not_enough)?;
        let (small_blind, big_blind) = if seated == 2 {
            let bb = seats.next_occupied(Some(dealer)).ok_or_else(not_enough)?;
            (dealer, bb)
        } else {
            let sb = seats.next_occupied(Some(dealer)).ok_or_else(not_enough)?;
            let bb = seats.next_occupied(Some(sb)).ok_or_else(not_enough)?;
            (sb, bb)
        };

        let mut hand = HandState {
            number,
            stage: Stage::Preflop,
            board: Board::new(),
            deck,
            dealer,
            small_blind,
            big_blind,
            ledger: PotLedger::new(),
            round: BettingRound::new(0, config.big_blind, config.action_timeout_ms),
            config: config.clone(),
            history: Vec::new(),
            result: None,
            reveals: BTreeMap::new(),
        };
        info!(
            "hand #{number}: dealer seat {dealer}, blinds {}/{} from seats {small_blind}/{big_blind}",
            config.small_blind, config.big_blind
        );
        hand.record(HandEvent::HandStarted { number, dealer, small_blind, big_blind });

        let sb_paid = hand.post_blind(seats, small_blind, config.small_blind, false);
        let bb_paid = hand.post_blind(seats, big_blind, config.big_blind, true);
        hand.deal_hole_cards(seats)?;

        hand.round =
            BettingRound::new(sb_paid.max(bb_paid), config.big_blind, config.action_timeout_ms);
        if !config.big_blind_option {
            hand.round.mark_acted(big_blind);
        }
        hand.round.advance(seats, &hand.ledger, Some(big_blind), now_ms);
        hand.settle(seats, now_ms)?;
        Ok(hand)
    }

    fn post_blind(&mut self, seats: &mut SeatRing, seat: usize, amount: u64, big: bool) -> u64 {
        let Some(player) = seats.player_mut(seat) else {
            return 0;
        };
        let paid = self.ledger.contribute(seat, player, amount);
        if paid < amount {
            debug!("seat {seat} posts a short blind of {paid} and is all-in");
        }
        self.record(HandEvent::BlindPosted { seat, amount: paid, big });
        paid
    }

    fn deal_hole_cards(&mut self, seats: &mut SeatRing) -> Result<(), TableError> {
        let order: Vec<usize> = seats
            .order_after(Some(self.dealer))
            .filter(|&s| seats.player(s).is_some_and(|p| !p.is_busted()))
            .collect();
        for &seat in &order {
            let cards = self.draw(2)?;
            let hole = HoleCards::from_slice(&cards)
                .map_err(|_| TableError::DuplicateDeckCard(cards[0]))?;
            if let Some(p) = seats.player_mut(seat) {
                p.hole = Some(hole);
            }
        }
        self.record(HandEvent::HoleCardsDealt { seats: order });
        Ok(())
    }

    fn draw(&mut self, count: usize) -> Result<Vec<Card>, TableError> {
        let available = self.deck.len();
        if available < count {
            return Err(TableError::ShortDeck { needed: count, available });
        }
        Ok(self.deck.draw_n(count))
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn dealer(&self) -> usize {
        self.dealer
    }

    pub fn small_blind_seat(&self) -> usize {
        self.small_blind
    }

    pub fn big_blind_seat(&self) -> usize {
        self.big_blind
    }

    pub fn active_seat(&self) -> Option<usize> {
        self.round.active()
    }

    pub fn deadline_ms(&self) -> Option<u64> {
        self.round.deadline_ms()
    }

    pub fn current_bet(&self) -> u64 {
        self.round.current_bet()
    }

    pub fn round(&self) -> &BettingRound {
        &self.round
    }

    pub fn ledger(&self) -> &PotLedger {
        &self.ledger
    }

    pub fn history(&self) -> &[HandEvent] {
        &self.history
    }

    pub fn result(&self) -> Option<&HandResult> {
        self.result.as_ref()
    }

    pub fn is_finished(&self) -> bool {
        self.stage == Stage::Showdown
    }

    /// Main and side pots built from every chip bet this hand, including the current street.
    /// Once the hand is finished these are the pots that were paid out.
    pub fn pots(&self, seats: &SeatRing) -> PotBreakdown {
        let (contenders, capped) = contender_sets(seats);
        self.ledger.build_side_pots(&contenders, &capped)
    }

    pub fn legal_actions(&self, seats: &SeatRing, seat: usize) -> Option<LegalActions> {
        if self.is_finished() {
            return None;
        }
        self.round.legal_actions(seats, &self.ledger, seat)
    }

    pub fn act(
        &mut self,
        seats: &mut SeatRing,
        seat: usize,
        action: PlayerAction,
        now_ms: u64,
    ) -> Result<AppliedAction, TableError> {
        self.apply_action(seats, seat, action, now_ms, false)
    }

    /// Act for the active seat if its deadline has passed: check when free, otherwise fold.
    pub fn expire_turn(
        &mut self,
        seats: &mut SeatRing,
        now_ms: u64,
    ) -> Result<Option<AppliedAction>, TableError> {
        if self.is_finished() {
            return Ok(None);
        }
        let Some((seat, action)) = self.round.timeout_action(&self.ledger, now_ms) else {
            return Ok(None);
        };
        debug!("seat {seat} timed out on the {}, acting {action}", self.stage);
        self.apply_action(seats, seat, action, now_ms, true).map(Some)
    }

    fn apply_action(
        &mut self,
        seats: &mut SeatRing,
        seat: usize,
        action: PlayerAction,
        now_ms: u64,
        timed_out: bool,
    ) -> Result<AppliedAction, TableError> {
        if self.is_finished() {
            return Err(IllegalAction::NoHandInProgress.into());
        }
        let applied = match self.round.apply(seats, &mut self.ledger, seat, action, now_ms) {
            Ok(applied) => applied,
            Err(e) => {
                warn!("hand #{}: seat {seat} {action} rejected: {e}", self.number);
                return Err(e.into());
            }
        };
        debug!(
            "hand #{} {}: seat {seat} {action} (paid {}, street total {})",
            self.number, self.stage, applied.paid, applied.street_total
        );
        self.record(HandEvent::Acted { stage: self.stage, action: applied, timed_out });
        self.settle(seats, now_ms)?;
        Ok(applied)
    }

    /// Fold a seat that is leaving. On its turn this is a normal fold; otherwise the seat is
    /// folded in place and the turn stays where it was.
    pub(crate) fn forfeit(
        &mut self,
        seats: &mut SeatRing,
        seat: usize,
        now_ms: u64,
    ) -> Result<(), TableError> {
        if self.is_finished() {
            return Ok(());
        }
        if self.round.active() == Some(seat) {
            return self.act(seats, seat, PlayerAction::Fold, now_ms).map(|_| ());
        }
        let Some(player) = seats.player_mut(seat).filter(|p| p.is_contending()) else {
            return Ok(());
        };
        player.folded = true;
        let applied = AppliedAction {
            seat,
            kind: ActionKind::Fold,
            paid: 0,
            street_total: self.ledger.street_contribution(seat),
            all_in: player.is_all_in(),
            reopened: false,
        };
        debug!("hand #{}: seat {seat} folds out of turn", self.number);
        self.record(HandEvent::Acted { stage: self.stage, action: applied, timed_out: false });
        self.round.recheck(seats, &self.ledger, now_ms);
        self.settle(seats, now_ms)
    }

    /// Move the hand forward until someone has to act or the hand is over.
    fn settle(&mut self, seats: &mut SeatRing, now_ms: u64) -> Result<(), TableError> {
        loop {
            if self.is_finished() {
                return Ok(());
            }
            if seats.contenders().len() <= 1 {
                return self.finish(seats, now_ms);
            }
            if !self.round.is_complete() {
                return Ok(());
            }
            match self.stage.next_street() {
                Some((next, count)) => self.deal_street(seats, next, count, now_ms)?,
                None => return self.finish(seats, now_ms),
            }
        }
    }

    fn deal_street(
        &mut self,
        seats: &SeatRing,
        next: Stage,
        count: usize,
        now_ms: u64,
    ) -> Result<(), TableError> {
        let cards = self.draw(count)?;
        self.ledger.end_street();
        self.board.extend(cards.iter().copied());
        self.stage = next;
        debug!(
            "hand #{} {next}: {}",
            self.number,
            cards.iter().map(Card::to_string).collect::<Vec<_>>().join(" ")
        );
        self.record(HandEvent::StreetDealt { stage: next, cards });
        self.round = BettingRound::new(0, self.config.big_blind, self.config.action_timeout_ms);
        self.round.advance(seats, &self.ledger, Some(self.dealer), now_ms);
        Ok(())
    }

    /// Resolve every pot, pay the winners and mark anyone left with no chips as busted.
    fn finish(&mut self, seats: &mut SeatRing, now_ms: u64) -> Result<(), TableError> {
        self.ledger.end_street();
        let contenders = seats.contenders();
        let contested = contenders.len() > 1;
        let (eligible, capped) = contender_sets(seats);
        let pots = self.ledger.build_side_pots(&eligible, &capped);

        let mut hands: BTreeMap<usize, EvaluatedHand> = BTreeMap::new();
        let mut showdown = Vec::new();
        if contested {
            for &seat in &contenders {
                let hole = seats
                    .player(seat)
                    .and_then(|p| p.hole())
                    .ok_or(IllegalAction::SeatNotInHand(seat))?;
                let eval = evaluate_holdem(&hole, &self.board)?;
                trace!("hand #{}: seat {seat} has {}", self.number, eval.description());
                showdown.push(ShowdownHand { seat, hole, hand: eval.clone() });
                hands.insert(seat, eval);
            }
        }

        let odd_chip_order: Vec<usize> = seats.order_after(Some(self.dealer)).collect();
        let mut awards = Vec::new();
        for (index, pot) in pots.pots().into_iter().enumerate() {
            let candidates: Vec<usize> = if pot.eligible.is_empty() {
                contenders.clone()
            } else {
                pot.eligible.iter().copied().collect()
            };
            let best = candidates.iter().filter_map(|s| hands.get(s)).max().cloned();
            let mut winners: Vec<usize> = match &best {
                Some(best) => {
                    candidates.into_iter().filter(|s| hands.get(s) == Some(best)).collect()
                }
                None => candidates,
            };
            winners.sort_by_key(|s| odd_chip_order.iter().position(|o| o == s));

            let mut payouts = Vec::with_capacity(winners.len());
            for (seat, amount) in split_pot(pot.amount, &winners) {
                if let Some(p) = seats.player_mut(seat) {
                    p.stack += amount;
                }
                info!("hand #{}: seat {seat} wins {amount} from pot {index}", self.number);
                self.record(HandEvent::PotAwarded { pot: index, seat, amount });
                payouts.push(Payout { seat, amount });
            }
            awards.push(PotAward {
                amount: pot.amount,
                eligible: pot.eligible.iter().copied().collect(),
                winners: payouts,
                category: best.as_ref().map(|b| b.category),
                description: best.as_ref().map(|b| b.description().to_string()),
            });
        }

        let result = HandResult {
            hand_number: self.number,
            board: self.board.as_slice().to_vec(),
            pots: awards,
            showdown,
            uncontested: !contested,
        };
        if contested {
            let winners = result.winners();
            let deadline_ms = now_ms.saturating_add(self.config.reveal_timeout_ms);
            for &seat in contenders.iter().filter(|s| !winners.contains(s)) {
                self.reveals.insert(seat, RevealRequest { seat, deadline_ms, shown: None });
            }
        }
        self.result = Some(result);

        let bust_deadline_ms = now_ms.saturating_add(self.config.bustout_timeout_ms);
        for (seat, p) in seats.players_mut() {
            if p.in_hand() && p.stack == 0 && !p.busted {
                p.bust(bust_deadline_ms);
                info!("seat {seat} ({}) is busted, rebuy by {bust_deadline_ms}", p.id());
            }
        }
        self.stage = Stage::Showdown;
        self.round = BettingRound::new(0, self.config.big_blind, self.config.action_timeout_ms);
        Ok(())
    }

    /// Answer a show/muck request after showdown.
    pub fn reveal(&mut self, seat: usize, show: bool) -> Result<(), TableError> {
        let request = self
            .reveals
            .get_mut(&seat)
            .filter(|r| r.shown.is_none())
            .ok_or(TableError::NoRevealPending(seat))?;
        request.shown = Some(show);
        debug!("hand #{}: seat {seat} {}", self.number, if show { "shows" } else { "mucks" });
        self.record(HandEvent::Revealed { seat, shown: show });
        Ok(())
    }

    /// Muck every unanswered request whose deadline has passed. Returns the seats mucked.
    pub fn expire_reveals(&mut self, now_ms: u64) -> Vec<usize> {
        let expired: Vec<usize> = self
            .reveals
            .values()
            .filter(|r| r.shown.is_none() && now_ms >= r.deadline_ms)
            .map(|r| r.seat)
            .collect();
        for &seat in &expired {
            if let Some(r) = self.reveals.get_mut(&seat) {
                r.shown = Some(false);
            }
            self.record(HandEvent::Revealed { seat, shown: false });
        }
        expired
    }

    pub fn reveal_requests(&self) -> Vec<RevealRequest> {
        self.reveals.values().copied().collect()
    }

    /// Whether a seat's hole cards are public: winners at showdown and losers who chose to show.
    pub fn is_revealed(&self, seat: usize) -> bool {
        let Some(result) = &self.result else {
            return false;
        };
        if result.uncontested {
            return false;
        }
        result.winners().contains(&seat)
            || self.reveals.get(&seat).is_some_and(|r| r.shown == Some(true))
    }

    fn record(&mut self, event: HandEvent) {
        self.history.push(event);
    }
}

/// Contending seats, and the subset of them that are all-in.
fn contender_sets(seats: &SeatRing) -> (BTreeSet<usize>, BTreeSet<usize>) {
    seats
        .players()
        .filter(|(_, p)| p.is_contending())
        .map(|(s, p)| (s, p.is_all_in()))
        .fold((BTreeSet::new(), BTreeSet::new()), |(mut all, mut capped), (s, all_in)| {
            all.insert(s);
            if all_in {
                capped.insert(s);
            }
            (all, capped)
        })
}
