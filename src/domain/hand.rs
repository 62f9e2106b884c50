use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, SeatIndex};

/// Стадия раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Ни одной раздачи ещё не было.
    Idle,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Stage {
    /// Следующая стадия после закрытия раунда ставок.
    /// `None` для Idle/Showdown – из них раундом ставок не выходят.
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::PreFlop => Some(Stage::Flop),
            Stage::Flop => Some(Stage::Turn),
            Stage::Turn => Some(Stage::River),
            Stage::River => Some(Stage::Showdown),
            Stage::Idle | Stage::Showdown => None,
        }
    }

    /// Сколько общих карт открывается при входе в стадию.
    pub fn board_cards_dealt(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            _ => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Idle => "idle",
            Stage::PreFlop => "pre-flop",
            Stage::Flop => "flop",
            Stage::Turn => "turn",
            Stage::River => "river",
            Stage::Showdown => "showdown",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ранг руки: категория + пять значений для тай-брейка, упакованные в u32.
/// Сравнение u32 = сравнение категории, затем значений слева направо.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);

/// Как закончилась раздача.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandOutcome {
    /// Остался один несфолдивший.
    WonByFold,
    /// Вскрытие.
    Showdown,
}

/// Результат конкретного места в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub seat: SeatIndex,
    pub name: String,
    /// Ранг руки, если место дошло до вскрытия.
    pub rank: Option<HandRank>,
    /// Сколько выиграно из банка.
    pub won: Chips,
    pub is_winner: bool,
}

/// Краткое описание завершённой раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub outcome: HandOutcome,
    pub stage_reached: Stage,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub results: Vec<PlayerHandResult>,
}

impl HandSummary {
    pub fn winners(&self) -> impl Iterator<Item = &PlayerHandResult> {
        self.results.iter().filter(|r| r.is_winner)
    }
}
