//! Public views of a table, safe to send to any client.
//!
//! A snapshot is built for one viewer: their own hole cards are included, everyone else's
//! only as a count until they are shown at showdown.

use crate::betting::LegalActions;
use crate::cards::Card;
use crate::evaluator::{Category, EvaluatedHand};
use crate::hand::HoleCards;
use crate::hand_state::{HandState, Stage};
use crate::pot::PotBreakdown;
use crate::table::{Table, TablePhase};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payout {
    pub seat: usize,
    pub amount: u64,
}

/// How one pot was resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PotAward {
    pub amount: u64,
    pub eligible: Vec<usize>,
    /// Winners in odd-chip order.
    pub winners: Vec<Payout>,
    /// Winning hand; `None` when nobody had to show.
    pub category: Option<Category>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowdownHand {
    pub seat: usize,
    pub hole: HoleCards,
    pub hand: EvaluatedHand,
}

/// Terminal-hand event: who won what.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HandResult {
    pub hand_number: u64,
    pub board: Vec<Card>,
    pub pots: Vec<PotAward>,
    /// Every contender's best hand, empty when the hand ended without a showdown.
    pub showdown: Vec<ShowdownHand>,
    pub uncontested: bool,
}

impl HandResult {
    /// Distinct winning seats across all pots.
    pub fn winners(&self) -> Vec<usize> {
        let mut seats: Vec<usize> =
            self.pots.iter().flat_map(|p| p.winners.iter().map(|w| w.seat)).collect();
        seats.sort_unstable();
        seats.dedup();
        seats
    }

    /// Total chips won by `seat` over all pots.
    pub fn won_by(&self, seat: usize) -> u64 {
        self.pots
            .iter()
            .flat_map(|p| p.winners.iter())
            .filter(|w| w.seat == seat)
            .map(|w| w.amount)
            .sum()
    }
}

/// A losing contender's show-or-muck decision. Unanswered requests muck at the deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealRequest {
    pub seat: usize,
    pub deadline_ms: u64,
    pub shown: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatView {
    pub seat: usize,
    pub player_id: Option<String>,
    pub name: Option<String>,
    pub stack: u64,
    pub street_bet: u64,
    pub folded: bool,
    pub all_in: bool,
    pub busted: bool,
    /// When a busted seat that has not rebought is vacated.
    pub bust_deadline_ms: Option<u64>,
    /// Seated but not dealt into the current hand.
    pub sitting_out: bool,
    pub card_count: u8,
    pub hole_cards: Option<HoleCards>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    pub table_id: String,
    pub phase: TablePhase,
    pub hand_number: u64,
    pub stage: Option<Stage>,
    pub board: Vec<Card>,
    pub dealer_seat: Option<usize>,
    pub small_blind_seat: Option<usize>,
    pub big_blind_seat: Option<usize>,
    pub active_seat: Option<usize>,
    pub turn_deadline_ms: Option<u64>,
    pub current_bet: u64,
    pub min_raise_to: u64,
    pub pot_total: u64,
    pub pots: PotBreakdown,
    pub seats: Vec<SeatView>,
    /// Present only when it is the viewer's turn.
    pub legal_actions: Option<LegalActions>,
    pub result: Option<HandResult>,
    pub reveal_requests: Vec<RevealRequest>,
}

impl TableSnapshot {
    pub fn capture(table: &Table, viewer: Option<usize>) -> Self {
        let hand = table.hand();
        // Chips of a finished hand already sit in the winners' stacks.
        let live = hand.filter(|h| !h.is_finished());
        let seats = table
            .seats()
            .iter()
            .map(|seat| seat_view(hand, seat.index(), seat.occupant(), viewer))
            .collect();

        TableSnapshot {
            table_id: table.id().to_string(),
            phase: table.phase(),
            hand_number: table.hands_played(),
            stage: hand.map(HandState::stage),
            board: hand.map(|h| h.board().as_slice().to_vec()).unwrap_or_default(),
            dealer_seat: hand.map(HandState::dealer),
            small_blind_seat: hand.map(HandState::small_blind_seat),
            big_blind_seat: hand.map(HandState::big_blind_seat),
            active_seat: hand.and_then(HandState::active_seat),
            turn_deadline_ms: hand.and_then(HandState::deadline_ms),
            current_bet: hand.map_or(0, HandState::current_bet),
            min_raise_to: hand.map_or(0, |h| h.round().min_raise_to()),
            pot_total: live.map_or(0, |h| h.ledger().total()),
            pots: live.map(|h| h.pots(table.seats())).unwrap_or_default(),
            seats,
            legal_actions: viewer.and_then(|v| hand?.legal_actions(table.seats(), v)),
            result: hand.and_then(HandState::result).cloned(),
            reveal_requests: hand.map(HandState::reveal_requests).unwrap_or_default(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

fn seat_view(
    hand: Option<&HandState>,
    seat: usize,
    player: Option<&crate::player::Player>,
    viewer: Option<usize>,
) -> SeatView {
    let Some(p) = player else {
        return SeatView {
            seat,
            player_id: None,
            name: None,
            stack: 0,
            street_bet: 0,
            folded: false,
            all_in: false,
            busted: false,
            bust_deadline_ms: None,
            sitting_out: false,
            card_count: 0,
            hole_cards: None,
        };
    };
    let visible = viewer == Some(seat) || hand.is_some_and(|h| h.is_revealed(seat));
    SeatView {
        seat,
        player_id: Some(p.id().to_string()),
        name: Some(p.name().to_string()),
        stack: p.stack(),
        street_bet: hand.map_or(0, |h| h.ledger().street_contribution(seat)),
        folded: p.is_folded(),
        all_in: p.is_all_in(),
        busted: p.is_busted(),
        bust_deadline_ms: p.bust_deadline_ms(),
        sitting_out: hand.is_some() && !p.in_hand(),
        card_count: if p.in_hand() { 2 } else { 0 },
        hole_cards: if visible { p.hole() } else { None },
    }
}
