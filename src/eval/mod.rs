//! Оценка силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `evaluate_best_hand(hole, board) -> Result<HandRank, EvalError>`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_5card_hand, evaluate_best_hand, EvalError};
pub use hand_rank::{describe_hand, HandCategory};
