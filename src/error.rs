use crate::cards::Card;
use crate::evaluator::EvalError;

/// Why an action was rejected. A rejected action leaves the hand untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IllegalAction {
    #[error("no hand is in progress")]
    NoHandInProgress,
    #[error("not your turn: waiting on seat {expected}, got seat {got}")]
    NotYourTurn { expected: usize, got: usize },
    #[error("seat {0} is not in the hand")]
    SeatNotInHand(usize),
    #[error("cannot check, {to_call} to call")]
    CannotCheck { to_call: u64 },
    #[error("raise too small: min {min}, got {got}")]
    RaiseTooSmall { min: u64, got: u64 },
    #[error("raise exceeds stack: max {max}, got {got}")]
    RaiseExceedsStack { max: u64, got: u64 },
    #[error("raising is not allowed: action was not reopened")]
    RaiseNotAllowed,
    #[error("raise requires an amount")]
    MissingAmount,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error("seat {0} does not exist")]
    NoSuchSeat(usize),
    #[error("seat {0} is already occupied")]
    SeatOccupied(usize),
    #[error("seat {0} is empty")]
    SeatEmpty(usize),
    #[error("player {0} is already seated")]
    PlayerAlreadySeated(String),
    #[error("a hand is in progress")]
    HandInProgress,
    #[error("not enough players to start a hand: {seated} seated")]
    NotEnoughPlayers { seated: usize },
    #[error("seat {0} is not busted")]
    NotBusted(usize),
    #[error("invalid rebuy amount {0}")]
    InvalidRebuy(u64),
    #[error("seat {0} has no pending reveal decision")]
    NoRevealPending(usize),
    #[error("deck holds {available} cards, the hand needs {needed}")]
    ShortDeck { needed: usize, available: usize },
    #[error("deck holds {0} more than once")]
    DuplicateDeckCard(Card),
    #[error(transparent)]
    Illegal(#[from] IllegalAction),
    #[error("showdown evaluation failed: {0}")]
    Evaluation(#[from] EvalError),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("max_seats must be between 2 and 10, got {0}")]
    SeatCount(usize),
    #[error("big blind {big} must exceed small blind {small}")]
    BlindOrder { small: u64, big: u64 },
    #[error("small blind must be positive")]
    ZeroBlind,
    #[error("starting stack must be positive")]
    ZeroStack,
    #[error("{0} must be positive")]
    ZeroTimeout(&'static str),
    #[error("invalid config json: {0}")]
    Parse(String),
}
