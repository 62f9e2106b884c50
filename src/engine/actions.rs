use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex};

/// Тип действия игрока (имена на проводе: fold/check/call/raise/all-in).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    /// Повышение до суммы `amount` (итоговая ставка за раунд, не прибавка).
    Raise,
    /// Поставить весь стек.
    AllIn,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all-in",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(ActionKind::Fold),
            "check" => Ok(ActionKind::Check),
            "call" => Ok(ActionKind::Call),
            "raise" | "bet" => Ok(ActionKind::Raise),
            "all-in" | "allin" | "all_in" | "all in" => Ok(ActionKind::AllIn),
            other => Err(format!("Unknown action: {other}")),
        }
    }
}

/// Запрошенное действие. `amount` имеет смысл только для raise.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    pub kind: ActionKind,
    #[serde(default)]
    pub amount: Option<Chips>,
}

impl PlayerAction {
    pub fn new(kind: ActionKind, amount: Option<Chips>) -> Self {
        Self { kind, amount }
    }

    pub fn fold() -> Self {
        Self::new(ActionKind::Fold, None)
    }

    pub fn check() -> Self {
        Self::new(ActionKind::Check, None)
    }

    pub fn call() -> Self {
        Self::new(ActionKind::Call, None)
    }

    pub fn raise_to(amount: Chips) -> Self {
        Self::new(ActionKind::Raise, Some(amount))
    }

    pub fn all_in() -> Self {
        Self::new(ActionKind::AllIn, None)
    }
}

/// Что реально применилось после зажима сумм.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppliedAction {
    pub seat: SeatIndex,
    /// Итоговый тип: raise на весь стек записывается как all-in.
    pub kind: ActionKind,
    /// Сколько фишек ушло из стека этим действием.
    pub paid: Chips,
    /// Ставка места в раунде после действия.
    pub bet_after: Chips,
    pub stack_after: Chips,
    /// Место осталось без фишек (в том числе call на весь стек).
    pub went_all_in: bool,
}
