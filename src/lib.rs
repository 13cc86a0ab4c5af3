//! holdem-core: an authoritative Texas Hold'em hand engine
//!
//! Goals:
//! - One source of truth per table: clients render [`snapshot::TableSnapshot`]s, never a copy of the rules
//! - Strictly sequential: one action at a time, out-of-turn actions are rejected, not queued
//! - No clocks inside: callers pass `now_ms` and poll [`table::Table::expire_turn`]
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_core::cards::{Card, Rank, Suit};
//! use holdem_core::evaluator::{evaluate_holdem, Category};
//! use holdem_core::hand::{Board, HoleCards};
//!
//! let hole = HoleCards::try_new(
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::Ace, Suit::Hearts),
//! ).unwrap();
//! let board: Board = "Kc Qd Jh 3s 2c".parse().unwrap();
//!
//! let eval = evaluate_holdem(&hole, &board).unwrap();
//! assert_eq!(eval.category, Category::Pair);
//! assert_eq!(eval.description(), "Pair of Aces");
//! ```
//!
//! ## Running a table
//! ```
//! use holdem_core::action::PlayerAction;
//! use holdem_core::config::TableConfig;
//! use holdem_core::table::Table;
//!
//! let mut table = Table::with_seed("main", TableConfig::default(), 42).unwrap();
//! table.join(1, "ann", "Ann").unwrap();
//! table.join(2, "bob", "Bob").unwrap();
//! table.start_hand(0).unwrap();
//!
//! let seat = table.hand().unwrap().active_seat().unwrap();
//! table.act(seat, PlayerAction::Fold, 1_000).unwrap();
//! assert_eq!(table.last_result().unwrap().winners().len(), 1);
//! ```

pub mod action;
pub mod betting;
pub mod cards;
pub mod config;
pub mod deck;
pub mod error;
pub mod evaluator;
pub mod hand;
pub mod hand_state;
pub mod player;
pub mod pot;
pub mod registry;
pub mod seats;
pub mod snapshot;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
