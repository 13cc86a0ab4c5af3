use crate::error::IllegalAction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A betting decision. `Raise` carries the street total to raise to, not the increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Raise(u64),
    AllIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

/// Wire form of an action: `{"type": "raise", "amount": 120}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRequest {
    #[serde(rename = "type")]
    pub kind: ActionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
}

impl PlayerAction {
    pub fn kind(self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::AllIn => ActionKind::AllIn,
        }
    }
}

impl TryFrom<ActionRequest> for PlayerAction {
    type Error = IllegalAction;

    fn try_from(req: ActionRequest) -> Result<Self, Self::Error> {
        Ok(match req.kind {
            ActionKind::Fold => PlayerAction::Fold,
            ActionKind::Check => PlayerAction::Check,
            ActionKind::Call => PlayerAction::Call,
            ActionKind::Raise => PlayerAction::Raise(req.amount.ok_or(IllegalAction::MissingAmount)?),
            ActionKind::AllIn => PlayerAction::AllIn,
        })
    }
}

impl From<PlayerAction> for ActionRequest {
    fn from(action: PlayerAction) -> Self {
        let amount = match action {
            PlayerAction::Raise(to) => Some(to),
            _ => None,
        };
        ActionRequest { kind: action.kind(), amount }
    }
}

impl fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerAction::Fold => f.write_str("Fold"),
            PlayerAction::Check => f.write_str("Check"),
            PlayerAction::Call => f.write_str("Call"),
            PlayerAction::Raise(to) => write!(f, "Raise to {to}"),
            PlayerAction::AllIn => f.write_str("All-in"),
        }
    }
}
