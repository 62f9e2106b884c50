use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{SeatIndex, Table};

/// Состояние раунда ставок (на конкретной стадии).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Максимальная ставка раунда, до которой должны дотянуться живые места.
    pub current_bet: Chips,
}

impl BettingState {
    pub fn new(current_bet: Chips) -> Self {
        Self { current_bet }
    }

    /// Ставка выросла – все остальные живые места обязаны ответить снова.
    pub fn on_raise(&mut self, table: &mut Table, raiser: SeatIndex, new_bet: Chips) {
        self.current_bet = new_bet;
        for (idx, p) in table.seats.iter_mut().enumerate() {
            if idx != raiser && p.is_live() {
                p.has_acted = false;
            }
        }
    }

    /// Новый раунд: ставка 0, живые места снова должны походить.
    pub fn reopen(&mut self, table: &mut Table) {
        self.current_bet = Chips::ZERO;
        for p in table.seats.iter_mut().filter(|p| p.is_live()) {
            p.has_acted = false;
        }
    }
}

/// Раунд закрыт, когда каждое живое место (не сфолдил, не олл-ин) походило
/// и у всех живых одинаковая ставка. Ноль живых мест – тоже закрыт.
pub fn is_round_complete(table: &Table) -> bool {
    let mut live = table.seats.iter().filter(|p| p.is_live());
    let Some(first) = live.clone().next() else {
        return true;
    };
    live.all(|p| p.has_acted && p.current_bet == first.current_bet)
}

/// Собрать ставки раунда: обнулить `current_bet` у всех мест, вернуть сумму.
pub fn sweep_bets(table: &mut Table) -> Chips {
    table
        .seats
        .iter_mut()
        .map(|p| std::mem::replace(&mut p.current_bet, Chips::ZERO))
        .sum()
}
