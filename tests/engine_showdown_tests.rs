// tests/engine_showdown_tests.rs

//! Шоудаун и выплаты:
//! - лучшая рука забирает банк, строка лога называет комбинацию
//! - делёж с остатком (лишняя фишка – первым по порядку мест)
//! - победа фолдом без открытия борда
//! - олл-ин всех – борд докладывается без решений

use holdem_table::agents::DecisionRequest;
use holdem_table::domain::{
    card::Card,
    chips::Chips,
    deck::Deck,
    hand::{HandOutcome, Stage},
    player::{AgentKind, PlayerAtTable},
    table::{Table, TableConfig, TableStakes},
};
use holdem_table::engine::{
    apply_action, commit_decision, next_turn, start_hand, HandEngine, PlayerAction, Pot, TurnStep,
};
use holdem_table::eval::HandCategory;
use holdem_table::infra::DeterministicRng;

fn make_table(config: TableConfig, stacks: &[u64]) -> Table {
    let mut table = Table::new(config);
    table.seats = stacks
        .iter()
        .enumerate()
        .map(|(i, &s)| PlayerAtTable::new(format!("CPU {}", i + 1), AgentKind::Scripted, Chips(s)))
        .collect();
    table
}

fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace().map(|c| c.parse().unwrap()).collect()
}

/// Подложить карманные карты и колоду так, чтобы борд был `board` (флоп, тёрн, ривер).
fn rig(table: &mut Table, engine: &mut HandEngine, holes: &[&str], board: &str) {
    for (seat, hole) in holes.iter().enumerate() {
        table.seats[seat].hole_cards = cards(hole);
    }
    // deal() берёт с конца колоды.
    let mut deck = cards(board);
    deck.reverse();
    engine.deck = Deck { cards: deck };
}

fn passive(req: &DecisionRequest) -> PlayerAction {
    if req.amount_to_call.is_zero() {
        PlayerAction::check()
    } else {
        PlayerAction::call()
    }
}

fn play_out(table: &mut Table, engine: &mut HandEngine) {
    for _ in 0..200 {
        match next_turn(table, engine).unwrap() {
            TurnStep::Decide(ticket) => {
                let action = passive(&ticket.request);
                commit_decision(table, engine, &ticket, Ok(action)).unwrap();
            }
            TurnStep::AwaitHuman(_) => unreachable!(),
            TurnStep::HandOver => return,
        }
    }
    panic!("раздача не завершилась");
}

#[test]
fn pot_split_gives_remainder_to_first_winner() {
    let payouts = Pot::split(Chips(101), &[1, 3]);
    assert_eq!(payouts, vec![(1, Chips(51)), (3, Chips(50))]);

    let payouts = Pot::split(Chips(100), &[0, 2, 4]);
    assert_eq!(payouts, vec![(0, Chips(34)), (2, Chips(33)), (4, Chips(33))]);

    let total: Chips = payouts.iter().map(|&(_, c)| c).sum();
    assert_eq!(total, Chips(100));
}

#[test]
fn best_hand_takes_the_pot() {
    let mut table = make_table(TableConfig::default(), &[1000, 1000, 1000]);
    let mut rng = DeterministicRng::from_u64(1);
    let mut engine = start_hand(&mut table, &mut rng).unwrap();

    rig(
        &mut table,
        &mut engine,
        &["Ah Kd", "7c 7d", "2c 3d"],
        "7h 7s Kc 9d 4s",
    );
    play_out(&mut table, &mut engine);

    assert_eq!(table.seats[0].stack, Chips(980));
    assert_eq!(table.seats[1].stack, Chips(1040));
    assert_eq!(table.seats[2].stack, Chips(980));

    let summary = engine.summary.as_ref().unwrap();
    assert_eq!(summary.outcome, HandOutcome::Showdown);
    let winners: Vec<usize> = summary.winners().map(|r| r.seat).collect();
    assert_eq!(winners, vec![1]);
    assert_eq!(
        summary.results[1].rank.map(|r| r.category()),
        Some(HandCategory::FourOfAKind)
    );

    assert!(table
        .log
        .tail(10)
        .iter()
        .any(|l| l == "CPU 2 win(s) the pot (60) with Four of a Kind!"));
    assert!(table.seats.iter().all(|p| p.hand_visible));
}

/// Банк 5 делится на двоих: 3 и 2, лишняя фишка – раньше сидящему.
#[test]
fn tied_hands_split_with_remainder() {
    let config = TableConfig {
        stakes: TableStakes::new(Chips(1), Chips(2)),
        ..TableConfig::default()
    };
    let mut table = make_table(config, &[1000, 1000, 1000]);
    let mut rng = DeterministicRng::from_u64(2);
    let mut engine = start_hand(&mut table, &mut rng).unwrap();

    rig(
        &mut table,
        &mut engine,
        &["Qc Qs", "2c 3d", "4c 5d"],
        "Th Js Qd Kc Ah",
    );

    // seat 2 коллирует, SB фолдит, BB чекает.
    apply_action(&mut table, &mut engine, PlayerAction::call()).unwrap();
    apply_action(&mut table, &mut engine, PlayerAction::fold()).unwrap();
    play_out(&mut table, &mut engine);

    let summary = engine.summary.as_ref().unwrap();
    assert_eq!(summary.total_pot, Chips(5));
    let winners: Vec<usize> = summary.winners().map(|r| r.seat).collect();
    assert_eq!(winners, vec![1, 2]);

    assert_eq!(table.seats[0].stack, Chips(999));
    assert_eq!(table.seats[1].stack, Chips(1001));
    assert_eq!(table.seats[2].stack, Chips(1000));
    assert!(table
        .log
        .tail(10)
        .iter()
        .any(|l| l == "CPU 2, CPU 3 win(s) the pot (5) with Straight!"));
}

/// Два места, префлоп: второе фолдит – первое сразу забирает банк,
/// стадия остаётся префлопом, обе руки открыты.
#[test]
fn fold_win_ends_hand_before_flop() {
    let mut table = make_table(TableConfig::default(), &[1000, 1000]);
    let mut rng = DeterministicRng::from_u64(3);
    let mut engine = start_hand(&mut table, &mut rng).unwrap();

    // Хедз-ап: SB (seat 0) ходит первым на префлопе.
    assert_eq!(engine.current_actor, Some(0));
    apply_action(&mut table, &mut engine, PlayerAction::raise_to(Chips(60))).unwrap();
    apply_action(&mut table, &mut engine, PlayerAction::fold()).unwrap();

    assert!(matches!(next_turn(&mut table, &mut engine), Ok(TurnStep::HandOver)));

    assert!(!table.hand_in_progress);
    assert_eq!(table.stage, Stage::PreFlop);
    assert!(table.board.is_empty());
    assert_eq!(table.seats[0].stack, Chips(1020));
    assert_eq!(table.seats[1].stack, Chips(980));
    assert_eq!(engine.pot.total, Chips::ZERO);
    assert!(table.seats.iter().all(|p| p.hand_visible));

    let summary = engine.summary.as_ref().unwrap();
    assert_eq!(summary.outcome, HandOutcome::WonByFold);
    assert_eq!(summary.total_pot, Chips(80));
    assert!(summary.results.iter().all(|r| r.rank.is_none()));
    assert!(table
        .log
        .tail(10)
        .iter()
        .any(|l| l == "CPU 1 wins the pot (80)!"));
}

/// Все в олл-ине: движок сам открывает борд до конца, решений не просит.
#[test]
fn all_in_runs_out_the_board() {
    let mut table = make_table(TableConfig::default(), &[500, 300]);
    let mut rng = DeterministicRng::from_u64(4);
    let mut engine = start_hand(&mut table, &mut rng).unwrap();

    rig(&mut table, &mut engine, &["Ac Ad", "Kc Kd"], "2h 7s 9d Jc 3h");

    apply_action(&mut table, &mut engine, PlayerAction::all_in()).unwrap();
    apply_action(&mut table, &mut engine, PlayerAction::call()).unwrap();

    assert!(matches!(next_turn(&mut table, &mut engine), Ok(TurnStep::HandOver)));
    assert_eq!(table.board.len(), 5);
    assert_eq!(table.stage, Stage::Showdown);

    // Один банк без сайд-потов: тузы забирают всё.
    assert_eq!(table.seats[0].stack, Chips(800));
    assert_eq!(table.seats[1].stack, Chips::ZERO);
}
