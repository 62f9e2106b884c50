//! Зажим сумм. Суммы вне допустимых границ не отклоняются,
//! а приводятся к ближайшему допустимому значению.

use crate::domain::chips::Chips;
use crate::domain::player::PlayerAtTable;

/// Минимальное повышение «до»: удвоенная текущая ставка, либо BB, если ставки нет.
pub fn min_raise_to(current_bet: Chips, big_blind: Chips) -> Chips {
    if current_bet.is_zero() {
        big_blind
    } else {
        current_bet + current_bet
    }
}

/// Итоговая ставка рейза: не меньше минимального, не больше стек + уже поставленное.
pub fn clamp_raise_target(
    requested: Chips,
    current_bet: Chips,
    big_blind: Chips,
    player: &PlayerAtTable,
) -> Chips {
    let ceiling = player.stack + player.current_bet;
    requested.max(min_raise_to(current_bet, big_blind)).min(ceiling)
}
