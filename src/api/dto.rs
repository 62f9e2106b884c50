use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandOutcome, HandSummary, Stage};
use crate::domain::player::{AgentKind, PlayerAtTable};
use crate::domain::table::{Table, LOG_TAIL};
use crate::domain::{HandId, SeatIndex};
use crate::engine::HandEngine;
use crate::eval::describe_hand;

/// DTO места за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatDto {
    pub seat_index: SeatIndex,
    pub name: String,
    pub kind: AgentKind,
    pub chips: Chips,
    pub current_bet: Chips,
    pub has_acted: bool,
    pub folded: bool,
    pub all_in: bool,
    /// Карманные карты – только если рука открыта (свой игрок или вскрытие).
    pub hand: Option<Vec<Card>>,
}

/// Снимок стола для клиента.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStateDto {
    pub seats: Vec<SeatDto>,
    pub community_cards: Vec<Card>,
    /// Банк без ставок текущего раунда.
    pub pot: Chips,
    /// Банк плюс ставки текущего раунда.
    pub pot_total: Chips,
    pub current_bet: Chips,
    pub current_player: Option<SeatIndex>,
    pub game_stage: Stage,
    pub hand_in_progress: bool,
    pub waiting_for_human: bool,
    /// Последние строки лога (не больше 10).
    pub log: Vec<String>,
    /// Итог последней завершённой раздачи.
    pub last_hand: Option<HandHistoryItemDto>,
}

/// DTO одной сыгранной раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistoryItemDto {
    pub hand_id: HandId,
    pub outcome: HandOutcome,
    pub stage_reached: Stage,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub players: Vec<HandPlayerResultDto>,
}

/// Результат одного места в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandPlayerResultDto {
    pub seat_index: SeatIndex,
    pub name: String,
    pub won: Chips,
    pub is_winner: bool,
    /// Название комбинации, если место дошло до вскрытия.
    pub hand_name: Option<String>,
}

impl From<&HandSummary> for HandHistoryItemDto {
    fn from(summary: &HandSummary) -> Self {
        Self {
            hand_id: summary.hand_id,
            outcome: summary.outcome,
            stage_reached: summary.stage_reached,
            board: summary.board.clone(),
            total_pot: summary.total_pot,
            players: summary
                .results
                .iter()
                .map(|r| HandPlayerResultDto {
                    seat_index: r.seat,
                    name: r.name.clone(),
                    won: r.won,
                    is_winner: r.is_winner,
                    hand_name: r.rank.map(|rank| describe_hand(rank).to_string()),
                })
                .collect(),
        }
    }
}

fn seat_dto(seat_index: SeatIndex, p: &PlayerAtTable) -> SeatDto {
    SeatDto {
        seat_index,
        name: p.name.clone(),
        kind: p.kind,
        chips: p.stack,
        current_bet: p.current_bet,
        has_acted: p.has_acted,
        folded: p.is_folded(),
        all_in: p.is_all_in(),
        hand: p.hand_visible.then(|| p.hole_cards.clone()),
    }
}

/// Сформировать DTO стола на основе `Table` + опционального `HandEngine`.
/// `current_player` берём из engine, если раздача идёт.
pub fn build_table_view(table: &Table, engine: Option<&HandEngine>) -> TableStateDto {
    let pot = engine.map_or(Chips::ZERO, |e| e.pot.total);
    let in_progress = table.hand_in_progress;

    TableStateDto {
        seats: table
            .seats
            .iter()
            .enumerate()
            .map(|(idx, p)| seat_dto(idx, p))
            .collect(),
        community_cards: table.board.clone(),
        pot,
        pot_total: pot + table.outstanding_bets(),
        current_bet: engine.map_or(Chips::ZERO, |e| e.betting.current_bet),
        current_player: engine.filter(|_| in_progress).and_then(|e| e.current_actor),
        game_stage: table.stage,
        hand_in_progress: in_progress,
        waiting_for_human: engine.is_some_and(|e| e.waiting_for_human()),
        log: table.log.tail(LOG_TAIL),
        last_hand: engine
            .and_then(|e| e.summary.as_ref())
            .map(HandHistoryItemDto::from),
    }
}
