use crate::action::PlayerAction;
use crate::betting::AppliedAction;
use crate::config::TableConfig;
use crate::deck::Deck;
use crate::error::{ConfigError, IllegalAction, TableError};
use crate::hand_state::HandState;
use crate::player::{Player, PlayerId};
use crate::seats::SeatRing;
use crate::snapshot::{HandResult, TableSnapshot};
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TablePhase {
    /// No hand has been dealt since the table opened.
    Waiting,
    InHand,
    /// The last hand is over; its result stays visible until the next deal.
    Finished,
}

/// Seat occupancy changes coming from the transport layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SeatEvent {
    Join { seat: usize, player_id: String, name: String },
    Leave { seat: usize },
    Rebuy { seat: usize, amount: Option<u64> },
}

/// One table: seats, settings and the hand in progress (or the last one played).
#[derive(Debug, Clone)]
pub struct Table {
    id: String,
    config: TableConfig,
    seats: SeatRing,
    hand: Option<HandState>,
    hands_played: u64,
    rng: ChaCha20Rng,
}

impl Table {
    pub fn new(id: impl Into<String>, config: TableConfig) -> Result<Self, ConfigError> {
        Self::with_rng(id, config, ChaCha20Rng::from_rng(&mut rand::rng()))
    }

    /// Deterministic shuffles, for tests and replays.
    pub fn with_seed(id: impl Into<String>, config: TableConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(id, config, ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(id: impl Into<String>, config: TableConfig, rng: ChaCha20Rng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            id: id.into(),
            seats: SeatRing::new(config.max_seats),
            config,
            hand: None,
            hands_played: 0,
            rng,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn seats(&self) -> &SeatRing {
        &self.seats
    }

    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.seats.player(seat)
    }

    /// The hand in progress, or the last finished one.
    pub fn hand(&self) -> Option<&HandState> {
        self.hand.as_ref()
    }

    pub fn hands_played(&self) -> u64 {
        self.hands_played
    }

    pub fn last_result(&self) -> Option<&HandResult> {
        self.hand.as_ref().and_then(HandState::result)
    }

    pub fn phase(&self) -> TablePhase {
        match &self.hand {
            None => TablePhase::Waiting,
            Some(h) if h.is_finished() => TablePhase::Finished,
            Some(_) => TablePhase::InHand,
        }
    }

    fn hand_in_progress(&self) -> bool {
        self.phase() == TablePhase::InHand
    }

    /// Seat a player with the configured starting stack.
    pub fn join(
        &mut self,
        seat: usize,
        id: impl Into<PlayerId>,
        name: impl Into<String>,
    ) -> Result<(), TableError> {
        let stack = self.config.starting_stack;
        self.join_with_stack(seat, id, name, stack)
    }

    /// Seat a player. A player joining mid-hand sits out until the next deal.
    pub fn join_with_stack(
        &mut self,
        seat: usize,
        id: impl Into<PlayerId>,
        name: impl Into<String>,
        stack: u64,
    ) -> Result<(), TableError> {
        let id = id.into();
        if self.seats.seat_of(&id).is_some() {
            return Err(TableError::PlayerAlreadySeated(id.to_string()));
        }
        let slot = self.seats.get_mut(seat).ok_or(TableError::NoSuchSeat(seat))?;
        if slot.occupant.is_some() {
            return Err(TableError::SeatOccupied(seat));
        }
        info!("table {}: {id} sits at seat {seat} with {stack}", self.id);
        slot.occupant = Some(Player::new(id, name, stack));
        Ok(())
    }

    /// Leave the table. Mid-hand the seat folds now and is vacated when the hand ends.
    pub fn leave(&mut self, seat: usize, now_ms: u64) -> Result<(), TableError> {
        let player = self.seats.player(seat).ok_or(TableError::SeatEmpty(seat))?;
        info!("table {}: {} leaves seat {seat}", self.id, player.id());
        if self.hand_in_progress() && player.in_hand() {
            if let Some(p) = self.seats.player_mut(seat) {
                p.leaving = true;
            }
            if let Some(hand) = self.hand.as_mut() {
                hand.forfeit(&mut self.seats, seat, now_ms)?;
            }
            self.vacate_leavers();
            return Ok(());
        }
        if let Some(slot) = self.seats.get_mut(seat) {
            slot.occupant = None;
        }
        Ok(())
    }

    /// Top up a busted seat. `None` rebuys for the starting stack.
    pub fn rebuy(&mut self, seat: usize, amount: Option<u64>) -> Result<u64, TableError> {
        let amount = amount.unwrap_or(self.config.starting_stack);
        if amount == 0 {
            return Err(TableError::InvalidRebuy(amount));
        }
        let player = self.seats.player_mut(seat).ok_or(TableError::SeatEmpty(seat))?;
        if !player.busted {
            return Err(TableError::NotBusted(seat));
        }
        player.rebuy(amount);
        info!("table {}: seat {seat} rebuys for {amount}", self.id);
        Ok(amount)
    }

    pub fn apply_seat_event(&mut self, event: SeatEvent, now_ms: u64) -> Result<(), TableError> {
        match event {
            SeatEvent::Join { seat, player_id, name } => self.join(seat, player_id, name),
            SeatEvent::Leave { seat } => self.leave(seat, now_ms),
            SeatEvent::Rebuy { seat, amount } => self.rebuy(seat, amount).map(|_| ()),
        }
    }

    /// Deal the next hand from a freshly shuffled deck.
    pub fn start_hand(&mut self, now_ms: u64) -> Result<(), TableError> {
        let deck = Deck::shuffled(&mut self.rng);
        self.start_hand_with_deck(deck, now_ms)
    }

    /// Deal the next hand from a prepared deck (replays and tests).
    pub fn start_hand_with_deck(&mut self, deck: Deck, now_ms: u64) -> Result<(), TableError> {
        if self.hand_in_progress() {
            return Err(TableError::HandInProgress);
        }
        let previous_dealer = self.hand.as_ref().map(HandState::dealer);
        let number = self.hands_played + 1;
        let hand =
            HandState::start(number, &mut self.seats, previous_dealer, &self.config, deck, now_ms)?;
        self.hands_played = number;
        self.hand = Some(hand);
        self.vacate_leavers();
        Ok(())
    }

    pub fn act(
        &mut self,
        seat: usize,
        action: PlayerAction,
        now_ms: u64,
    ) -> Result<AppliedAction, TableError> {
        let hand = self.hand.as_mut().ok_or(IllegalAction::NoHandInProgress)?;
        let applied = hand.act(&mut self.seats, seat, action, now_ms)?;
        self.vacate_leavers();
        Ok(applied)
    }

    /// Time out the active seat if its deadline has passed. Does nothing otherwise.
    pub fn expire_turn(&mut self, now_ms: u64) -> Result<Option<AppliedAction>, TableError> {
        let Some(hand) = self.hand.as_mut() else {
            return Ok(None);
        };
        let applied = hand.expire_turn(&mut self.seats, now_ms)?;
        self.vacate_leavers();
        Ok(applied)
    }

    pub fn reveal(&mut self, seat: usize, show: bool) -> Result<(), TableError> {
        let hand = self.hand.as_mut().ok_or(TableError::NoRevealPending(seat))?;
        hand.reveal(seat, show)
    }

    pub fn expire_reveals(&mut self, now_ms: u64) -> Vec<usize> {
        self.hand.as_mut().map(|h| h.expire_reveals(now_ms)).unwrap_or_default()
    }

    /// Vacate busted seats whose rebuy window has closed. Returns the seats freed.
    pub fn expire_bustouts(&mut self, now_ms: u64) -> Vec<usize> {
        let mut freed = Vec::new();
        for seat in 1..=self.seats.len() {
            let Some(slot) = self.seats.get_mut(seat) else { continue };
            let expired = slot
                .occupant
                .as_ref()
                .is_some_and(|p| p.is_busted() && p.bust_deadline_ms().is_some_and(|d| d <= now_ms));
            if expired {
                info!("table {}: seat {seat} did not rebuy in time and is vacated", self.id);
                slot.occupant = None;
                freed.push(seat);
            }
        }
        freed
    }

    pub fn snapshot(&self, viewer: Option<usize>) -> TableSnapshot {
        TableSnapshot::capture(self, viewer)
    }

    /// Once a hand is over, free the seats of players who left during it.
    fn vacate_leavers(&mut self) {
        if self.hand_in_progress() {
            return;
        }
        for seat in 1..=self.seats.len() {
            if let Some(slot) = self.seats.get_mut(seat) {
                if slot.occupant.as_ref().is_some_and(Player::is_leaving) {
                    debug!("table {}: vacating seat {seat}", self.id);
                    slot.occupant = None;
                }
            }
        }
    }
}
