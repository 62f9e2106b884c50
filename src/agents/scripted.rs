use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::Chips;
use crate::engine::actions::{ActionKind, PlayerAction};

use super::{DecisionError, DecisionRequest, DecisionSource};

/// Вероятность call, когда есть что доплачивать.
pub const DEFAULT_CALL_PROBABILITY: f64 = 0.7;

/// Встроенная эвристика: check, если должен 0; иначе call с вероятностью 0.7
/// (и всегда call, если call съедает весь стек), иначе fold. Никогда не рейзит.
pub struct ScriptedSource {
    rng: Mutex<StdRng>,
    call_probability: f64,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_entropy())
    }

    /// Детерминированная эвристика для тестов и реплея.
    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Mutex::new(rng),
            call_probability: DEFAULT_CALL_PROBABILITY,
        }
    }

    pub fn with_call_probability(mut self, p: f64) -> Self {
        self.call_probability = p.clamp(0.0, 1.0);
        self
    }

    fn roll(&self) -> f64 {
        match self.rng.lock() {
            Ok(mut rng) => rng.gen::<f64>(),
            // Отравленный мьютекс: генератор всё равно в рабочем состоянии.
            Err(poisoned) => poisoned.into_inner().gen::<f64>(),
        }
    }
}

impl Default for ScriptedSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Чистая часть эвристики: `roll` – равномерное число из [0, 1).
pub fn scripted_choice(to_call: Chips, own_chips: Chips, roll: f64, call_probability: f64) -> ActionKind {
    if to_call.is_zero() {
        ActionKind::Check
    } else if roll < call_probability || to_call >= own_chips {
        ActionKind::Call
    } else {
        ActionKind::Fold
    }
}

#[async_trait]
impl DecisionSource for ScriptedSource {
    async fn decide(&self, request: &DecisionRequest) -> Result<PlayerAction, DecisionError> {
        let kind = scripted_choice(
            request.amount_to_call,
            request.own_chips,
            self.roll(),
            self.call_probability,
        );
        Ok(PlayerAction::new(kind, None))
    }
}
