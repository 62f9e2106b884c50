use crate::domain::SeatIndex;
use crate::eval::EvalError;

use thiserror::Error;

/// Ошибки движка стола.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Некорректная конфигурация стола: {0}")]
    InvalidConfig(String),

    #[error("Недостаточно игроков с фишками для раздачи")]
    NotEnoughPlayers,

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Сейчас не ход живого игрока")]
    NotAwaitingHuman,

    #[error("Место {0} не может ходить (сфолдил или в олл-ине)")]
    SeatCannotAct(SeatIndex),

    #[error("Решение по месту {0} уже запрошено")]
    DecisionInFlight(SeatIndex),

    #[error("Колода закончилась во время раздачи")]
    DeckExhausted,

    #[error("Ошибка оценки руки: {0}")]
    Eval(#[from] EvalError),

    #[error("Внутренняя ошибка: {0}")]
    Internal(&'static str),
}
