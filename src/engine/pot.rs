use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Банк раздачи (один, без сайд-потов).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
}

impl Pot {
    pub fn new() -> Self {
        Self { total: Chips::ZERO }
    }

    pub fn add(&mut self, amount: Chips) {
        self.total += amount;
    }

    /// Забрать весь банк (банк обнуляется).
    pub fn take(&mut self) -> Chips {
        std::mem::replace(&mut self.total, Chips::ZERO)
    }

    /// Поделить `amount` между победителями поровну.
    ///
    /// Остаток от деления раздаётся по одной фишке победителям
    /// в порядке `winners` (порядок мест за столом).
    pub fn split(amount: Chips, winners: &[SeatIndex]) -> Vec<(SeatIndex, Chips)> {
        let (share, remainder) = amount.split(winners.len() as u64);
        winners
            .iter()
            .enumerate()
            .map(|(i, &seat)| {
                let bonus = if (i as u64) < remainder.0 { Chips(1) } else { Chips::ZERO };
                (seat, share + bonus)
            })
            .collect()
    }
}
