use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::engine::EngineError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (битая команда, неизвестное действие).
    #[error("Некорректный запрос: {0}")]
    BadRequest(String),

    /// Игра ещё не создана.
    #[error("Игра не начата")]
    NoSession,

    /// Команда не может быть выполнена в текущем состоянии.
    #[error("Команда отклонена: {0}")]
    InvalidCommand(String),

    /// Ошибка движка.
    #[error("Ошибка движка: {0}")]
    EngineError(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP-код для транспортного слоя.
    pub fn http_status(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NoSession => 404,
            ApiError::InvalidCommand(_) => 409,
            ApiError::EngineError(_) | ApiError::Internal(_) => 500,
        }
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::InvalidConfig(_) => ApiError::BadRequest(err.to_string()),
            EngineError::NotEnoughPlayers
            | EngineError::HandAlreadyInProgress
            | EngineError::NoActiveHand
            | EngineError::NotAwaitingHuman
            | EngineError::SeatCannotAct(_)
            | EngineError::DecisionInFlight(_) => ApiError::InvalidCommand(err.to_string()),
            EngineError::DeckExhausted | EngineError::Eval(_) | EngineError::Internal(_) => {
                ApiError::EngineError(err.to_string())
            }
        }
    }
}
