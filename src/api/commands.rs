use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::SeatingConfig;
use crate::engine::actions::{ActionKind, PlayerAction};

use super::errors::ApiError;

/// Команда верхнего уровня.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    /// Создать стол с рассадкой и начать первую раздачу.
    StartGame(StartGameCommand),

    /// Действие живого игрока.
    PlayerAction(PlayerActionCommand),

    /// Следующая раздача (после завершения текущей).
    NextHand,

    /// Только чтение: снимок стола.
    GetState,
}

/// Создание игры: имя живого игрока и количество мест каждого вида.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StartGameCommand {
    pub name: String,
    #[serde(default = "default_cpu_players")]
    pub cpu_players: usize,
    #[serde(default)]
    pub gemini_players: usize,
}

fn default_cpu_players() -> usize {
    2
}

impl StartGameCommand {
    /// Рассадка: игрок, затем `CPU n`, затем `Gemini n`.
    pub fn seating(&self) -> Result<SeatingConfig, ApiError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ApiError::BadRequest("пустое имя игрока".into()));
        }
        Ok(SeatingConfig::standard(name, self.cpu_players, self.gemini_players))
    }
}

/// Действие игрока в раздаче, как оно приходит по проводу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerActionCommand {
    pub action: String,
    #[serde(default)]
    pub amount: Option<f64>,
}

impl PlayerActionCommand {
    pub fn to_action(&self) -> Result<PlayerAction, ApiError> {
        let kind: ActionKind = self
            .action
            .parse()
            .map_err(|_| ApiError::BadRequest(format!("неизвестное действие {:?}", self.action)))?;

        // Отрицательные и дробные суммы приводятся к ближайшему целому >= 0;
        // дальше движок сам зажмёт их в допустимые границы.
        let amount = match kind {
            ActionKind::Raise => self
                .amount
                .filter(|a| a.is_finite())
                .map(|a| Chips(a.max(0.0).round() as u64)),
            _ => None,
        };

        Ok(PlayerAction::new(kind, amount))
    }
}
