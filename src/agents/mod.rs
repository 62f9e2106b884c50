//! Источники решений для мест, которые ходят сами (Scripted / Remote).
//!
//! Human-место решений не производит: движок останавливается и ждёт
//! внешнего `submit_human_action`.

pub mod remote;
pub mod scripted;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{AgentKind, Card, Chips, SeatIndex, Stage};
use crate::engine::actions::PlayerAction;

pub use remote::RemoteSource;
pub use scripted::ScriptedSource;

/// Что видит место в момент решения. Чужие карманные карты не передаются.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct DecisionRequest {
    pub seat: SeatIndex,
    pub name: String,
    pub stage: Stage,
    pub hole_cards: Vec<Card>,
    pub community_cards: Vec<Card>,
    /// Банк без ставок текущего раунда.
    pub pot: Chips,
    pub current_bet: Chips,
    pub own_bet: Chips,
    pub own_chips: Chips,
    pub amount_to_call: Chips,
    /// Минимальная сумма raise «до».
    pub min_raise_to: Chips,
    pub seats: Vec<SeatSnapshot>,
}

/// Публичная часть места.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatSnapshot {
    pub name: String,
    pub kind: AgentKind,
    pub chips: Chips,
    pub bet: Chips,
    pub has_acted: bool,
    pub folded: bool,
    pub all_in: bool,
}

#[derive(Debug, Error)]
pub enum DecisionError {
    #[error("Сетевая ошибка: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Сервис ответил {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Некорректный ответ: {0}")]
    Malformed(String),

    #[error("Неизвестное действие: {0:?}")]
    UnknownAction(String),

    #[error("Нет источника решений для мест вида {0}")]
    Unavailable(AgentKind),
}

/// Асинхронный источник решений. Вызывается без блокировки стола.
#[async_trait]
pub trait DecisionSource: Send + Sync {
    async fn decide(&self, request: &DecisionRequest) -> Result<PlayerAction, DecisionError>;
}

/// Таблица диспетчеризации по `AgentKind`.
#[derive(Clone)]
pub struct Providers {
    pub scripted: Arc<dyn DecisionSource>,
    pub remote: Option<Arc<dyn DecisionSource>>,
}

impl Providers {
    pub fn new(scripted: Arc<dyn DecisionSource>) -> Self {
        Self {
            scripted,
            remote: None,
        }
    }

    /// Только встроенная эвристика.
    pub fn scripted_only() -> Self {
        Self::new(Arc::new(ScriptedSource::new()))
    }

    pub fn with_remote(mut self, remote: Arc<dyn DecisionSource>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// `None` для Human и для Remote без настроенного сервиса.
    pub fn for_kind(&self, kind: AgentKind) -> Option<Arc<dyn DecisionSource>> {
        match kind {
            AgentKind::Human => None,
            AgentKind::Scripted => Some(self.scripted.clone()),
            AgentKind::Remote => self.remote.clone(),
        }
    }
}
