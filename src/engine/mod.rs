//! Движок раздачи: ставки, переход улиц, шоудаун, сессия стола.
//!
//! Высокоуровневые объекты: `HandEngine` (одна раздача) и `TableSession`
//! (стол + источники решений + цикл ходов).
//! Основные операции:
//!   - `start_hand` – запустить новую раздачу
//!   - `next_turn` – продвинуть раздачу до следующего решения
//!   - `apply_action` – применить действие текущего игрока

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod session;
pub mod validation;

pub use actions::{ActionKind, AppliedAction, PlayerAction};
pub use errors::EngineError;
pub use game_loop::{
    abort_hand, apply_action, chips_in_play, commit_decision, next_turn, start_hand,
    submit_human_action, DecisionTicket, HandEngine, TurnState, TurnStep,
};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::Pot;
pub use session::{ManagedTable, TableSession};

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
