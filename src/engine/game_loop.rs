use serde::{Deserialize, Serialize};

use crate::agents::{DecisionError, DecisionRequest, SeatSnapshot};
use crate::domain::card::format_cards;
use crate::domain::chips::Chips;
use crate::domain::deck::Deck;
use crate::domain::hand::{HandOutcome, HandRank, HandSummary, PlayerHandResult, Stage};
use crate::domain::player::{AgentKind, PlayerStatus};
use crate::domain::table::Table;
use crate::domain::{HandId, SeatIndex};
use crate::engine::actions::{ActionKind, AppliedAction, PlayerAction};
use crate::engine::betting::{is_round_complete, sweep_bets, BettingState};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{next_live_seat, next_seat};
use crate::engine::pot::Pot;
use crate::engine::validation::{clamp_raise_target, min_raise_to};
use crate::engine::RandomSource;
use crate::eval::evaluate_best_hand;

/// Чья сейчас очередь и кто её держит.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TurnState {
    /// Движок сам продвигает раздачу.
    Driving,
    /// Ход живого игрока: движок остановлен до `submit_human_action`.
    /// `turn` – номер хода в раздаче.
    AwaitingHuman { seat: SeatIndex, turn: u64 },
    /// Решение запрошено у внешнего источника, ответ ещё не применён.
    Deciding { seat: SeatIndex, turn: u64 },
    Finished,
}

/// Запрос решения, выданный под блокировкой и применяемый под ней же.
/// Пока он «в полёте», стол не заблокирован.
#[derive(Clone, Debug)]
pub struct DecisionTicket {
    pub hand_id: HandId,
    pub seat: SeatIndex,
    pub turn: u64,
    pub kind: AgentKind,
    pub request: DecisionRequest,
}

/// Что делать вызывающему коду после `next_turn`.
#[derive(Debug)]
pub enum TurnStep {
    /// Ждём живого игрока – цикл ходов завершается.
    AwaitHuman(SeatIndex),
    /// Нужно решение Scripted/Remote-места.
    Decide(DecisionTicket),
    /// Раздача закончена.
    HandOver,
}

/// Внутреннее состояние раздачи.
#[derive(Clone, Debug)]
pub struct HandEngine {
    pub hand_id: HandId,
    pub deck: Deck,
    pub betting: BettingState,
    /// Банк: ставки прошлых раундов. Ставки текущего раунда лежат у мест.
    pub pot: Pot,
    /// Сколько всего внесло каждое место за раздачу (для возврата при аварии).
    pub contributions: Vec<Chips>,
    pub current_actor: Option<SeatIndex>,
    pub turn: TurnState,
    /// Сколько действий применено в раздаче.
    pub actions_applied: u64,
    pub history: HandHistory,
    pub summary: Option<HandSummary>,
}

impl HandEngine {
    fn new(hand_id: HandId, deck: Deck, seats: usize) -> Self {
        Self {
            hand_id,
            deck,
            betting: BettingState::default(),
            pot: Pot::new(),
            contributions: vec![Chips::ZERO; seats],
            current_actor: None,
            turn: TurnState::Driving,
            actions_applied: 0,
            history: HandHistory::new(),
            summary: None,
        }
    }

    pub fn waiting_for_human(&self) -> bool {
        matches!(self.turn, TurnState::AwaitingHuman { .. })
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.turn, TurnState::Finished)
    }
}

/// Все фишки раздачи: стеки + ставки + банк. Постоянно до выплаты.
pub fn chips_in_play(table: &Table, engine: &HandEngine) -> Chips {
    table.chips_on_table() + engine.pot.total
}

/// Старт новой раздачи:
/// - убирает места без фишек;
/// - сдвигает блайнды на одно место;
/// - раздаёт карманные карты и постит блайнды;
/// - первый ход – место после BB.
pub fn start_hand<R: RandomSource>(table: &mut Table, rng: &mut R) -> Result<HandEngine, EngineError> {
    if table.hand_in_progress {
        return Err(EngineError::HandAlreadyInProgress);
    }

    table.log.clear();

    let busted: Vec<String> = table
        .seats
        .iter()
        .filter(|p| p.stack.is_zero())
        .map(|p| p.name.clone())
        .collect();
    table.seats.retain(|p| !p.stack.is_zero());
    for name in &busted {
        table.log.push(format!("{name} is out of chips and leaves the table."));
    }

    if table.seats.len() < 2 {
        table
            .log
            .push("Fewer than two players have chips left; the game cannot continue.");
        return Err(EngineError::NotEnoughPlayers);
    }

    let seat_count = table.seats.len();
    table.hands_started += 1;
    let hand_id = table.hands_started;

    let mut engine = HandEngine::new(hand_id, Deck::shuffled(rng), seat_count);
    engine.history.push(HandEventKind::HandStarted {
        hand_id,
        seats: seat_count,
    });
    if !busted.is_empty() {
        engine
            .history
            .push(HandEventKind::SeatsRemoved { names: busted });
    }

    table.board.clear();
    table.stage = Stage::PreFlop;
    for p in table.seats.iter_mut() {
        p.reset_for_hand();
    }

    // Первая раздача: SB – место 0, дальше +1.
    let sb_seat = table.small_blind_seat.map_or(0, |s| (s + 1) % seat_count);
    let bb_seat = (sb_seat + 1) % seat_count;

    deal_hole_cards(table, &mut engine, sb_seat)?;

    table.small_blind_seat = Some(sb_seat);
    table.big_blind_seat = Some(bb_seat);
    post_blinds(table, &mut engine, sb_seat, bb_seat);

    engine.current_actor = Some(next_seat(table, bb_seat));
    table.hand_in_progress = true;

    Ok(engine)
}

/// Раздача карманных карт – по 2 карты, по кругу начиная с SB.
fn deal_hole_cards(table: &mut Table, engine: &mut HandEngine, first: SeatIndex) -> Result<(), EngineError> {
    let n = table.seat_count();
    for _round in 0..2 {
        for offset in 0..n {
            let seat = (first + offset) % n;
            let card = engine.deck.deal().ok_or(EngineError::DeckExhausted)?;
            table.seats[seat].hole_cards.push(card);
        }
    }

    for offset in 0..n {
        let seat = (first + offset) % n;
        engine.history.push(HandEventKind::HoleCardsDealt {
            seat,
            cards: table.seats[seat].hole_cards.clone(),
        });
    }
    Ok(())
}

/// Блайнды: каждый не больше стека; обнулившийся стек – олл-ин.
fn post_blinds(table: &mut Table, engine: &mut HandEngine, sb_seat: SeatIndex, bb_seat: SeatIndex) {
    let stakes = table.config.stakes.clone();

    let sb_paid = commit_chips(table, engine, sb_seat, stakes.small_blind);
    table.log.push(format!(
        "{} posts the small blind {}.",
        table.seats[sb_seat].name, sb_paid
    ));

    let bb_paid = commit_chips(table, engine, bb_seat, stakes.big_blind);
    table.log.push(format!(
        "{} posts the big blind {}.",
        table.seats[bb_seat].name, bb_paid
    ));

    engine.betting = BettingState::new(stakes.big_blind);
    engine.history.push(HandEventKind::BlindsPosted {
        small_blind: (sb_seat, sb_paid),
        big_blind: (bb_seat, bb_paid),
    });
}

fn commit_chips(table: &mut Table, engine: &mut HandEngine, seat: SeatIndex, amount: Chips) -> Chips {
    let paid = table.seats[seat].commit(amount);
    engine.contributions[seat] += paid;
    paid
}

/// Продвинуть раздачу до ближайшей точки, где нужен внешний ввод:
/// закрывает раунды, открывает борд, доводит до шоудауна/победы фолдом.
///
/// Выполняется под блокировкой стола и никогда не ждёт источник решений.
pub fn next_turn(table: &mut Table, engine: &mut HandEngine) -> Result<TurnStep, EngineError> {
    loop {
        match engine.turn {
            TurnState::Finished => return Ok(TurnStep::HandOver),
            TurnState::AwaitingHuman { seat, .. } => return Ok(TurnStep::AwaitHuman(seat)),
            TurnState::Deciding { seat, .. } => return Err(EngineError::DecisionInFlight(seat)),
            TurnState::Driving => {}
        }
        if !table.hand_in_progress {
            return Ok(TurnStep::HandOver);
        }

        if table.in_hand_count() <= 1 {
            settle_fold_win(table, engine)?;
            return Ok(TurnStep::HandOver);
        }

        if is_round_complete(table) {
            close_round(table, engine)?;
            continue;
        }

        let start = engine.current_actor.unwrap_or(0);
        let seat = next_live_seat(table, start)
            .ok_or(EngineError::Internal("раунд открыт, но ходить некому"))?;
        engine.current_actor = Some(seat);

        let turn = engine.actions_applied;
        let player = &table.seats[seat];
        let kind = player.kind;

        if kind.is_human() {
            engine.turn = TurnState::AwaitingHuman { seat, turn };
            let line = format!("{}, it's your turn.", player.name);
            table.log.push(line);
            return Ok(TurnStep::AwaitHuman(seat));
        }

        if kind == AgentKind::Remote {
            let line = format!("{} is thinking...", player.name);
            table.log.push(line);
        }

        engine.turn = TurnState::Deciding { seat, turn };
        let request = build_decision_request(table, engine, seat);
        return Ok(TurnStep::Decide(DecisionTicket {
            hand_id: engine.hand_id,
            seat,
            turn,
            kind,
            request,
        }));
    }
}

/// Данные для решения места `seat`.
pub fn build_decision_request(table: &Table, engine: &HandEngine, seat: SeatIndex) -> DecisionRequest {
    let player = &table.seats[seat];
    let current_bet = engine.betting.current_bet;

    DecisionRequest {
        seat,
        name: player.name.clone(),
        stage: table.stage,
        hole_cards: player.hole_cards.clone(),
        community_cards: table.board.clone(),
        pot: engine.pot.total,
        current_bet,
        own_bet: player.current_bet,
        own_chips: player.stack,
        amount_to_call: player.to_call(current_bet),
        min_raise_to: min_raise_to(current_bet, table.config.stakes.big_blind),
        seats: table
            .seats
            .iter()
            .map(|p| SeatSnapshot {
                name: p.name.clone(),
                kind: p.kind,
                chips: p.stack,
                bet: p.current_bet,
                has_acted: p.has_acted,
                folded: p.is_folded(),
                all_in: p.is_all_in(),
            })
            .collect(),
    }
}

/// Применить ответ источника решений.
///
/// Устаревший билет (другая раздача или ход уже сменился) отбрасывается: `Ok(None)`.
/// Ошибка источника превращается в fold и пишется в лог; раздача продолжается.
pub fn commit_decision(
    table: &mut Table,
    engine: &mut HandEngine,
    ticket: &DecisionTicket,
    outcome: Result<PlayerAction, DecisionError>,
) -> Result<Option<AppliedAction>, EngineError> {
    let expected = TurnState::Deciding {
        seat: ticket.seat,
        turn: ticket.turn,
    };
    if engine.hand_id != ticket.hand_id || engine.turn != expected {
        log::warn!(
            "stale decision for seat {} (hand {}, turn {}) dropped",
            ticket.seat,
            ticket.hand_id,
            ticket.turn
        );
        return Ok(None);
    }

    let action = match outcome {
        Ok(action) => action,
        Err(err) => {
            let name = table.seats[ticket.seat].name.clone();
            log::warn!("{name}: decision source failed: {err}");
            table.log.push(format!("{name} could not decide ({err}) and folds."));
            engine.history.push(HandEventKind::DecisionFailed {
                seat: ticket.seat,
                reason: err.to_string(),
            });
            PlayerAction::fold()
        }
    };

    engine.turn = TurnState::Driving;
    apply_action(table, engine, action).map(Some)
}

/// Действие живого игрока. Принимается только если движок ждёт именно его;
/// переход AwaitingHuman → Driving происходит здесь же, под той же блокировкой.
pub fn submit_human_action(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
) -> Result<AppliedAction, EngineError> {
    let previous = engine.turn;
    match previous {
        TurnState::AwaitingHuman { seat, .. } if engine.current_actor == Some(seat) => {}
        _ => return Err(EngineError::NotAwaitingHuman),
    }

    engine.turn = TurnState::Driving;
    match apply_action(table, engine, action) {
        Ok(applied) => Ok(applied),
        Err(err) => {
            engine.turn = previous;
            Err(err)
        }
    }
}

/// Применить действие текущего игрока (fold/check/call/raise/all-in).
///
/// Суммы не отклоняются, а зажимаются: raise не меньше минимального
/// и не больше стека; raise на весь стек записывается как all-in.
pub fn apply_action(
    table: &mut Table,
    engine: &mut HandEngine,
    action: PlayerAction,
) -> Result<AppliedAction, EngineError> {
    if !table.hand_in_progress || engine.is_finished() {
        return Err(EngineError::NoActiveHand);
    }

    let seat = engine
        .current_actor
        .ok_or(EngineError::Internal("нет текущего игрока"))?;
    if !table.seats[seat].is_live() {
        return Err(EngineError::SeatCannotAct(seat));
    }

    let current_bet = engine.betting.current_bet;
    let big_blind = table.config.stakes.big_blind;

    let player = &mut table.seats[seat];
    let stack_before = player.stack;

    let (kind, line) = match action.kind {
        ActionKind::Fold => {
            player.status = PlayerStatus::Folded;
            (ActionKind::Fold, format!("{} folds.", player.name))
        }

        // Check при долге не фильтруется здесь: это забота источника решений.
        ActionKind::Check => (ActionKind::Check, format!("{} checks.", player.name)),

        ActionKind::Call => {
            let owed = player.to_call(current_bet);
            if owed >= player.stack {
                let stack = player.stack;
                player.commit(stack);
                (ActionKind::Call, format!("{} goes all-in to call.", player.name))
            } else {
                player.commit(owed);
                (ActionKind::Call, format!("{} calls {}.", player.name, owed))
            }
        }

        ActionKind::Raise => {
            let requested = action.amount.unwrap_or(Chips::ZERO);
            let target = clamp_raise_target(requested, current_bet, big_blind, player);
            let whole_stack = target == player.stack + player.current_bet;
            let extra = target - player.current_bet;
            player.commit(extra);
            if whole_stack {
                (ActionKind::AllIn, format!("{} raises all-in to {}!", player.name, target))
            } else {
                (ActionKind::Raise, format!("{} raises to {}.", player.name, target))
            }
        }

        ActionKind::AllIn => {
            let stack = player.stack;
            player.commit(stack);
            (
                ActionKind::AllIn,
                format!("{} goes all-in for {}!", player.name, player.current_bet),
            )
        }
    };

    player.has_acted = true;
    let paid = stack_before - player.stack;
    let bet_after = player.current_bet;
    let stack_after = player.stack;
    let went_all_in = player.is_all_in();

    engine.contributions[seat] += paid;

    // Повышение переоткрывает торговлю для всех остальных живых мест.
    if bet_after > current_bet {
        engine.betting.on_raise(table, seat, bet_after);
    }

    table.log.push(line);
    engine.history.push(HandEventKind::PlayerActed {
        seat,
        requested: action,
        applied: kind,
        bet_after,
        stack_after,
    });

    engine.current_actor = Some(next_seat(table, seat));
    engine.actions_applied += 1;
    engine.turn = TurnState::Driving;

    Ok(AppliedAction {
        seat,
        kind,
        paid,
        bet_after,
        stack_after,
        went_all_in,
    })
}

/// Закрыть раунд ставок: ставки в банк, следующая стадия, борд, новый раунд.
fn close_round(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    let swept = sweep_bets(table);
    engine.pot.add(swept);

    let next = table
        .stage
        .next()
        .ok_or(EngineError::Internal("раунд ставок закрыт вне игровой стадии"))?;
    table.stage = next;

    if next == Stage::Showdown {
        engine.history.push(HandEventKind::StageChanged {
            stage: next,
            board: table.board.clone(),
        });
        return settle_showdown(table, engine);
    }

    for _ in 0..next.board_cards_dealt() {
        let card = engine.deck.deal().ok_or(EngineError::DeckExhausted)?;
        table.board.push(card);
    }

    let title = match next {
        Stage::Flop => "Flop",
        Stage::Turn => "Turn",
        _ => "River",
    };
    table.log.push(format!("--- {title} ---"));
    table
        .log
        .push(format!("Community Cards: {}", format_cards(&table.board)));
    engine.history.push(HandEventKind::StageChanged {
        stage: next,
        board: table.board.clone(),
    });

    engine.betting.reopen(table);
    let start = table.small_blind_seat.unwrap_or(0);
    engine.current_actor = next_live_seat(table, start);
    Ok(())
}

/// Остался один несфолдивший: он забирает банк и все ставки, стадия не меняется.
fn settle_fold_win(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    let swept = sweep_bets(table);
    engine.pot.add(swept);

    let winner = table
        .seats
        .iter()
        .position(|p| p.is_in_hand())
        .ok_or(EngineError::Internal("все места сфолдили"))?;

    let amount = engine.pot.take();
    table.seats[winner].stack += amount;

    table.log.push("--- Hand End ---");
    table.log.push(format!(
        "{} wins the pot ({})!",
        table.seats[winner].name, amount
    ));
    engine.history.push(HandEventKind::PotAwarded {
        seat: winner,
        amount,
    });

    let results = table
        .seats
        .iter()
        .enumerate()
        .map(|(seat, p)| PlayerHandResult {
            seat,
            name: p.name.clone(),
            rank: None,
            won: if seat == winner { amount } else { Chips::ZERO },
            is_winner: seat == winner,
        })
        .collect();

    finish_hand(table, engine, HandOutcome::WonByFold, amount, results);
    Ok(())
}

/// Вскрытие: лучшая рука 5 из 7 у каждого несфолдившего, банк делится
/// между всеми, у кого лучший результат.
fn settle_showdown(table: &mut Table, engine: &mut HandEngine) -> Result<(), EngineError> {
    let total = engine.pot.take();

    let mut ranked: Vec<(SeatIndex, HandRank)> = Vec::new();
    for (seat, p) in table.seats.iter().enumerate().filter(|(_, p)| p.is_in_hand()) {
        let rank = evaluate_best_hand(&p.hole_cards, &table.board)?;
        engine.history.push(HandEventKind::ShowdownReveal {
            seat,
            hole_cards: p.hole_cards.clone(),
            rank,
        });
        ranked.push((seat, rank));
    }

    let best = ranked
        .iter()
        .map(|&(_, rank)| rank)
        .max()
        .ok_or(EngineError::Internal("на вскрытии нет рук"))?;
    let winners: Vec<SeatIndex> = ranked
        .iter()
        .filter(|&&(_, rank)| rank == best)
        .map(|&(seat, _)| seat)
        .collect();

    let payouts = Pot::split(total, &winners);
    for &(seat, amount) in &payouts {
        table.seats[seat].stack += amount;
        engine.history.push(HandEventKind::PotAwarded { seat, amount });
    }

    let names = winners
        .iter()
        .map(|&s| table.seats[s].name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    table.log.push("--- Hand End ---");
    table.log.push(format!(
        "{} win(s) the pot ({}) with {}!",
        names,
        total,
        best.category()
    ));

    let results = table
        .seats
        .iter()
        .enumerate()
        .map(|(seat, p)| {
            let won = payouts
                .iter()
                .find(|&&(s, _)| s == seat)
                .map_or(Chips::ZERO, |&(_, amount)| amount);
            PlayerHandResult {
                seat,
                name: p.name.clone(),
                rank: ranked.iter().find(|&&(s, _)| s == seat).map(|&(_, r)| r),
                won,
                is_winner: winners.contains(&seat),
            }
        })
        .collect();

    finish_hand(table, engine, HandOutcome::Showdown, total, results);
    Ok(())
}

fn finish_hand(
    table: &mut Table,
    engine: &mut HandEngine,
    outcome: HandOutcome,
    total_pot: Chips,
    results: Vec<PlayerHandResult>,
) {
    for p in table.seats.iter_mut() {
        p.hand_visible = true;
    }

    table.hand_in_progress = false;
    engine.turn = TurnState::Finished;
    engine.current_actor = None;
    engine.history.push(HandEventKind::HandFinished {
        hand_id: engine.hand_id,
        outcome,
    });
    engine.summary = Some(HandSummary {
        hand_id: engine.hand_id,
        outcome,
        stage_reached: table.stage,
        board: table.board.clone(),
        total_pot,
        results,
    });

    table
        .log
        .push("Hand over. Start the next hand when you are ready.");
}

/// Аварийное завершение: каждому месту возвращается всё, что оно внесло.
pub fn abort_hand(table: &mut Table, engine: &mut HandEngine, reason: &EngineError) {
    for (seat, p) in table.seats.iter_mut().enumerate() {
        p.current_bet = Chips::ZERO;
        if let Some(contributed) = engine.contributions.get_mut(seat) {
            p.stack += std::mem::replace(contributed, Chips::ZERO);
        }
    }
    engine.pot.take();

    log::error!("hand {} aborted: {reason}", engine.hand_id);
    table.log.push(format!("Hand aborted ({reason}); all bets returned."));
    engine.history.push(HandEventKind::HandAborted {
        reason: reason.to_string(),
    });

    table.hand_in_progress = false;
    engine.turn = TurnState::Finished;
    engine.current_actor = None;
}
