use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;

/// Кто принимает решения за место.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    /// Живой игрок: решение приходит снаружи (`submit_human_action`).
    Human,
    /// Встроенная эвристика.
    Scripted,
    /// Внешний сервис рассуждений.
    Remote,
}

impl AgentKind {
    pub fn is_human(self) -> bool {
        matches!(self, AgentKind::Human)
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AgentKind::Human => "human",
            AgentKind::Scripted => "scripted",
            AgentKind::Remote => "remote",
        };
        f.write_str(s)
    }
}

/// Статус игрока в контексте раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Участвует и может ходить.
    Active,
    /// Сфолдил, больше не участвует в банке.
    Folded,
    /// Поставил весь стек – больше не ходит, но участвует в шоудауне.
    AllIn,
}

/// Состояние игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAtTable {
    pub name: String,
    pub kind: AgentKind,
    /// Стек (фишки, ещё не поставленные).
    pub stack: Chips,
    /// Ставка в текущем раунде ставок.
    pub current_bet: Chips,
    pub status: PlayerStatus,
    /// Ходил ли игрок в текущем раунде ставок с момента последнего рейза.
    pub has_acted: bool,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Видны ли карманные карты снаружи. У не-людей открываются только в конце раздачи.
    pub hand_visible: bool,
}

impl PlayerAtTable {
    pub fn new(name: impl Into<String>, kind: AgentKind, stack: Chips) -> Self {
        Self {
            name: name.into(),
            kind,
            stack,
            current_bet: Chips::ZERO,
            status: PlayerStatus::Active,
            has_acted: false,
            hole_cards: Vec::new(),
            hand_visible: kind.is_human(),
        }
    }

    /// Сбросить всё, что относится к прошлой раздаче.
    pub fn reset_for_hand(&mut self) {
        self.current_bet = Chips::ZERO;
        self.status = PlayerStatus::Active;
        self.has_acted = false;
        self.hole_cards.clear();
        self.hand_visible = self.kind.is_human();
    }

    pub fn is_folded(&self) -> bool {
        matches!(self.status, PlayerStatus::Folded)
    }

    pub fn is_all_in(&self) -> bool {
        matches!(self.status, PlayerStatus::AllIn)
    }

    /// Не сфолдил (участвует в банке).
    pub fn is_in_hand(&self) -> bool {
        !self.is_folded()
    }

    /// Может ходить: не сфолдил и не в олл-ине.
    pub fn is_live(&self) -> bool {
        matches!(self.status, PlayerStatus::Active)
    }

    /// Сколько нужно доплатить до `table_bet`.
    pub fn to_call(&self, table_bet: Chips) -> Chips {
        table_bet.saturating_sub(self.current_bet)
    }

    /// Снять со стека не более `amount` в текущую ставку. Возвращает реально поставленное.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.stack);
        self.stack -= real;
        self.current_bet += real;
        if self.stack.is_zero() && !self.is_folded() {
            self.status = PlayerStatus::AllIn;
        }
        real
    }
}
