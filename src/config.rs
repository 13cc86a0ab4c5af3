use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const MIN_SEATS: usize = 2;
pub const MAX_SEATS: usize = 10;

/// Per-table settings. Missing JSON fields fall back to [`TableConfig::default`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub max_seats: usize,
    pub small_blind: u64,
    pub big_blind: u64,
    /// Chips given on join and on a rebuy without an explicit amount.
    pub starting_stack: u64,
    pub action_timeout_ms: u64,
    pub reveal_timeout_ms: u64,
    /// How long a busted player has to rebuy before losing the seat.
    pub bustout_timeout_ms: u64,
    /// When nobody raised preflop the big blind still gets to check or raise.
    ///
    /// Set it to `false` for the heads-up flow where the small blind's call alone closes
    /// preflop; with the default the big blind acts once more before the flop.
    pub big_blind_option: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_seats: 6,
            small_blind: 10,
            big_blind: 20,
            starting_stack: 1000,
            action_timeout_ms: 30_000,
            reveal_timeout_ms: 10_000,
            bustout_timeout_ms: 30_000,
            big_blind_option: true,
        }
    }
}

impl TableConfig {
    pub fn with_blinds(small_blind: u64, big_blind: u64) -> Self {
        Self { small_blind, big_blind, ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_SEATS..=MAX_SEATS).contains(&self.max_seats) {
            return Err(ConfigError::SeatCount(self.max_seats));
        }
        if self.small_blind == 0 {
            return Err(ConfigError::ZeroBlind);
        }
        if self.big_blind <= self.small_blind {
            return Err(ConfigError::BlindOrder { small: self.small_blind, big: self.big_blind });
        }
        if self.starting_stack == 0 {
            return Err(ConfigError::ZeroStack);
        }
        if self.action_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout("action_timeout_ms"));
        }
        if self.reveal_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout("reveal_timeout_ms"));
        }
        if self.bustout_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout("bustout_timeout_ms"));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
