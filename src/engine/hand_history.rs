use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandOutcome, HandRank, Stage};
use crate::domain::{HandId, SeatIndex};
use crate::engine::actions::{ActionKind, PlayerAction};

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum HandEventKind {
    HandStarted {
        hand_id: HandId,
        seats: usize,
    },

    /// Места, убранные перед раздачей (0 фишек).
    SeatsRemoved {
        names: Vec<String>,
    },

    BlindsPosted {
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
    },

    HoleCardsDealt {
        seat: SeatIndex,
        cards: Vec<Card>,
    },

    /// Действие применено. `requested` – что просили, `applied` – что записано
    /// (например, raise на весь стек превращается в all-in).
    PlayerActed {
        seat: SeatIndex,
        requested: PlayerAction,
        applied: ActionKind,
        bet_after: Chips,
        stack_after: Chips,
    },

    /// Источник решений не ответил или ответил мусором – место фолдит.
    DecisionFailed {
        seat: SeatIndex,
        reason: String,
    },

    StageChanged {
        stage: Stage,
        board: Vec<Card>,
    },

    ShowdownReveal {
        seat: SeatIndex,
        hole_cards: Vec<Card>,
        rank: HandRank,
    },

    PotAwarded {
        seat: SeatIndex,
        amount: Chips,
    },

    /// Раздача прервана фатальной ошибкой; вклады возвращены.
    HandAborted {
        reason: String,
    },

    HandFinished {
        hand_id: HandId,
        outcome: HandOutcome,
    },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    /// Применённые действия по порядку: (место, записанный тип).
    pub fn actions(&self) -> Vec<(SeatIndex, ActionKind)> {
        self.events
            .iter()
            .filter_map(|e| match &e.kind {
                HandEventKind::PlayerActed { seat, applied, .. } => Some((*seat, *applied)),
                _ => None,
            })
            .collect()
    }

    /// Копия без `HoleCardsDealt` для мест, чьи карты скрыты.
    /// Номера событий сохраняются, поэтому в копии бывают пропуски.
    pub fn redacted(&self, visible: impl Fn(SeatIndex) -> bool) -> HandHistory {
        let events = self
            .events
            .iter()
            .filter(|e| match &e.kind {
                HandEventKind::HoleCardsDealt { seat, .. } => visible(*seat),
                _ => true,
            })
            .cloned()
            .collect();
        HandHistory { events }
    }
}
