use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::agents::{DecisionError, Providers};
use crate::api::dto::{build_table_view, TableStateDto};
use crate::domain::chips::Chips;
use crate::domain::hand::HandSummary;
use crate::domain::player::AgentKind;
use crate::domain::table::{SeatingConfig, Table, TableConfig};
use crate::engine::actions::{AppliedAction, PlayerAction};
use crate::engine::errors::EngineError;
use crate::engine::game_loop::{self, HandEngine, TurnStep};
use crate::engine::hand_history::HandHistory;
use crate::engine::RandomSource;
use crate::infra::rng::SystemRng;

/// Один стол + опционально активный движок раздачи + RNG для колод.
pub struct ManagedTable<R> {
    pub table: Table,
    pub engine: Option<HandEngine>,
    pub rng: R,
}

impl<R: RandomSource> ManagedTable<R> {
    fn new(table: Table, rng: R) -> Self {
        Self {
            table,
            engine: None,
            rng,
        }
    }

    /// Фишки стола вместе с банком текущей раздачи.
    pub fn chips_in_play(&self) -> Chips {
        match &self.engine {
            Some(engine) => game_loop::chips_in_play(&self.table, engine),
            None => self.table.chips_on_table(),
        }
    }
}

/// Игровая сессия одного стола.
///
/// Все изменения стола идут под одним `tokio::sync::Mutex`. Цикл ходов
/// работает в отдельной задаче и отпускает блокировку на время запроса
/// решения у Scripted/Remote-источника.
pub struct TableSession<R: RandomSource + Send + 'static = SystemRng> {
    inner: Arc<Mutex<ManagedTable<R>>>,
    providers: Providers,
    driver: Mutex<Option<JoinHandle<()>>>,
}

impl TableSession<SystemRng> {
    /// Сессия с системным RNG.
    pub fn create(
        config: TableConfig,
        seating: SeatingConfig,
        providers: Providers,
    ) -> Result<Self, EngineError> {
        Self::create_with_rng(config, seating, providers, SystemRng)
    }
}

impl<R: RandomSource + Send + 'static> TableSession<R> {
    /// Рассадка + стол. Remote-места без настроенного сервиса убираются.
    pub fn create_with_rng(
        config: TableConfig,
        seating: SeatingConfig,
        providers: Providers,
        rng: R,
    ) -> Result<Self, EngineError> {
        let seating = if providers.remote.is_none() && seating.count_of(AgentKind::Remote) > 0 {
            log::warn!("remote decision service is not configured; remote seats are removed");
            seating.without_kind(AgentKind::Remote)
        } else {
            seating
        };

        let table = Table::with_seating(config, &seating).map_err(EngineError::InvalidConfig)?;
        Ok(Self::from_table(table, providers, rng))
    }

    /// Сессия поверх готового стола (стеки/места уже выставлены).
    pub fn from_table(table: Table, providers: Providers, rng: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ManagedTable::new(table, rng))),
            providers,
            driver: Mutex::new(None),
        }
    }

    /// Первая раздача сессии.
    pub async fn start(&self) -> Result<(), EngineError> {
        self.start_next_hand().await
    }

    /// Новая раздача; отклоняется, пока идёт предыдущая.
    pub async fn start_next_hand(&self) -> Result<(), EngineError> {
        {
            let mut guard = self.inner.lock().await;
            let mt = &mut *guard;
            let engine = game_loop::start_hand(&mut mt.table, &mut mt.rng)?;
            log::info!(
                "hand {} started with {} seats",
                engine.hand_id,
                mt.table.seat_count()
            );
            mt.engine = Some(engine);
        }

        self.spawn_driver().await;
        Ok(())
    }

    /// Ход живого игрока. Принимается только в состоянии AwaitingHuman;
    /// после применения цикл ходов запускается заново.
    pub async fn submit_human_action(&self, action: PlayerAction) -> Result<AppliedAction, EngineError> {
        let applied = {
            let mut guard = self.inner.lock().await;
            let mt = &mut *guard;
            let engine = mt.engine.as_mut().ok_or(EngineError::NoActiveHand)?;
            game_loop::submit_human_action(&mut mt.table, engine, action)?
        };

        self.spawn_driver().await;
        Ok(applied)
    }

    /// Снимок для клиента.
    pub async fn state(&self) -> TableStateDto {
        let guard = self.inner.lock().await;
        build_table_view(&guard.table, guard.engine.as_ref())
    }

    /// Копия стола (для тестов и отладки).
    pub async fn table_snapshot(&self) -> Table {
        self.inner.lock().await.table.clone()
    }

    pub async fn chips_in_play(&self) -> Chips {
        self.inner.lock().await.chips_in_play()
    }

    /// Итог последней завершённой раздачи.
    pub async fn last_summary(&self) -> Option<HandSummary> {
        let guard = self.inner.lock().await;
        guard.engine.as_ref().and_then(|e| e.summary.clone())
    }

    /// История текущей (или последней) раздачи. Пока раздача идёт, чужие
    /// карманные карты скрыты так же, как в `state()`.
    pub async fn history(&self) -> Option<HandHistory> {
        let guard = self.inner.lock().await;
        let engine = guard.engine.as_ref()?;
        let table = &guard.table;
        if !table.hand_in_progress {
            return Some(engine.history.clone());
        }
        Some(
            engine
                .history
                .redacted(|seat| table.seats.get(seat).is_some_and(|p| p.hand_visible)),
        )
    }

    /// Дождаться, пока цикл ходов остановится (ход человека или конец раздачи).
    pub async fn settle(&self) {
        loop {
            let handle = self.driver.lock().await.take();
            let Some(handle) = handle else {
                return;
            };
            if let Err(err) = handle.await {
                log::error!("turn driver task failed: {err}");
            }
        }
    }

    async fn spawn_driver(&self) {
        let handle = tokio::spawn(drive(self.inner.clone(), self.providers.clone()));
        // Предыдущая задача к этому моменту уже вышла или выйдет сама:
        // её билет будет отброшен как устаревший.
        *self.driver.lock().await = Some(handle);
    }
}

/// Цикл ходов: под блокировкой – до следующего решения, без неё – запрос
/// решения, снова под блокировкой – применение.
async fn drive<R: RandomSource + Send + 'static>(inner: Arc<Mutex<ManagedTable<R>>>, providers: Providers) {
    loop {
        let ticket = {
            let mut guard = inner.lock().await;
            let mt = &mut *guard;
            let Some(engine) = mt.engine.as_mut() else {
                return;
            };

            match game_loop::next_turn(&mut mt.table, engine) {
                Ok(TurnStep::Decide(ticket)) => ticket,
                Ok(TurnStep::AwaitHuman(seat)) => {
                    log::debug!("waiting for human action at seat {seat}");
                    return;
                }
                Ok(TurnStep::HandOver) => return,
                Err(EngineError::DecisionInFlight(seat)) => {
                    log::debug!("decision for seat {seat} is already requested");
                    return;
                }
                Err(err) => {
                    game_loop::abort_hand(&mut mt.table, engine, &err);
                    return;
                }
            }
        };

        let outcome = match providers.for_kind(ticket.kind) {
            Some(source) => source.decide(&ticket.request).await,
            None => Err(DecisionError::Unavailable(ticket.kind)),
        };

        let mut guard = inner.lock().await;
        let mt = &mut *guard;
        let Some(engine) = mt.engine.as_mut() else {
            return;
        };

        match game_loop::commit_decision(&mut mt.table, engine, &ticket, outcome) {
            Ok(Some(_)) => {}
            Ok(None) => return,
            Err(err) => {
                game_loop::abort_hand(&mut mt.table, engine, &err);
                return;
            }
        }
    }
}
