//! Интеграционные тесты для доменной модели (crate::domain).

use std::collections::HashSet;

use holdem_table::domain::*;
use holdem_table::infra::DeterministicRng;

/// Свежая колода: 52 уникальные карты.
#[test]
fn fresh_deck_has_52_unique_cards() {
    let deck = Deck::standard_52();
    assert_eq!(deck.len(), Deck::SIZE);

    let unique: HashSet<Card> = deck.cards.iter().copied().collect();
    assert_eq!(unique.len(), 52);
}

/// Каждый deal уменьшает колоду на 1; все 52 карты без повторов; 53-й карты нет.
#[test]
fn dealing_whole_deck_yields_no_duplicates() {
    let mut rng = DeterministicRng::from_u64(7);
    let mut deck = Deck::shuffled(&mut rng);

    let mut seen = HashSet::new();
    for remaining in (0..52).rev() {
        let card = deck.deal().expect("карта должна быть");
        assert_eq!(deck.len(), remaining);
        assert!(seen.insert(card), "повтор карты {card}");
    }

    assert!(deck.is_empty());
    assert_eq!(deck.deal(), None);
}

#[test]
fn same_seed_same_shuffle() {
    let a = Deck::shuffled(&mut DeterministicRng::from_u64(99));
    let b = Deck::shuffled(&mut DeterministicRng::from_u64(99));
    let c = Deck::shuffled(&mut DeterministicRng::from_u64(100));

    assert_eq!(a.cards, b.cards);
    assert_ne!(a.cards, c.cards);
}

#[test]
fn card_parsing_and_display() {
    let ace: Card = "Ah".parse().unwrap();
    assert_eq!(ace, Card::new(Rank::Ace, Suit::Hearts));
    assert_eq!(ace.to_string(), "♥A");

    let ten: Card = "10c".parse().unwrap();
    assert_eq!(ten, Card::new(Rank::Ten, Suit::Clubs));
    assert_eq!("Tc".parse::<Card>().unwrap(), ten);
    assert_eq!("♣10".parse::<Card>().unwrap(), ten);
    assert_eq!(ten.to_string(), "♣10");

    assert!("1x".parse::<Card>().is_err());
    assert!("".parse::<Card>().is_err());
    assert!("Zs".parse::<Card>().is_err());

    let cards = [ace, ten];
    assert_eq!(format_cards(&cards), "♥A ♣10");
}

#[test]
fn rank_values() {
    assert_eq!(Rank::Two.value(), 2);
    assert_eq!(Rank::Ace.value(), 14);
    assert_eq!(Rank::from_value(11), Some(Rank::Jack));
    assert_eq!(Rank::from_value(1), None);
    assert_eq!(Rank::ALL.len(), 13);
}

#[test]
fn chips_arithmetic_is_saturating() {
    assert_eq!(Chips(10) - Chips(30), Chips::ZERO);
    assert_eq!(Chips(10) + Chips(30), Chips(40));
    assert_eq!(Chips(101).split(2), (Chips(50), Chips(1)));
    assert_eq!(Chips(7).split(0), (Chips::ZERO, Chips(7)));

    let total: Chips = [Chips(1), Chips(2), Chips(3)].into_iter().sum();
    assert_eq!(total, Chips(6));
}

#[test]
fn player_commit_caps_at_stack_and_marks_all_in() {
    let mut p = PlayerAtTable::new("CPU 1", AgentKind::Scripted, Chips(50));

    assert_eq!(p.commit(Chips(20)), Chips(20));
    assert_eq!(p.stack, Chips(30));
    assert_eq!(p.current_bet, Chips(20));
    assert!(p.is_live());

    assert_eq!(p.commit(Chips(100)), Chips(30));
    assert_eq!(p.stack, Chips::ZERO);
    assert_eq!(p.current_bet, Chips(50));
    assert!(p.is_all_in());
    assert!(p.is_in_hand());
    assert!(!p.is_live());
}

#[test]
fn only_human_hands_are_visible_before_showdown() {
    let human = PlayerAtTable::new("You", AgentKind::Human, Chips(1000));
    let cpu = PlayerAtTable::new("CPU 1", AgentKind::Scripted, Chips(1000));
    assert!(human.hand_visible);
    assert!(!cpu.hand_visible);
}

#[test]
fn standard_seating_names() {
    let seating = SeatingConfig::standard("Alice", 2, 1);
    let names: Vec<&str> = seating.seats.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Alice", "CPU 1", "CPU 2", "Gemini 1"]);
    assert_eq!(seating.count_of(AgentKind::Remote), 1);

    let without = seating.without_kind(AgentKind::Remote);
    assert_eq!(without.seats.len(), 3);
}

#[test]
fn table_config_validation() {
    assert!(TableConfig::default().validate().is_ok());

    let mut cfg = TableConfig::default();
    cfg.stakes = TableStakes::new(Chips(20), Chips(20));
    assert!(cfg.validate().is_err());

    let mut cfg = TableConfig::default();
    cfg.max_seats = MAX_SEATS + 1;
    assert!(cfg.validate().is_err());

    let too_many = (0..11).fold(SeatingConfig::default(), |s, i| {
        s.with_seat(format!("CPU {i}"), AgentKind::Scripted)
    });
    assert!(Table::with_seating(TableConfig::default(), &too_many).is_err());
}

#[test]
fn table_log_is_bounded() {
    let mut log = TableLog::new(3);
    for i in 0..5 {
        log.push(format!("line {i}"));
    }
    assert_eq!(log.len(), 3);
    assert_eq!(log.tail(10), vec!["line 2", "line 3", "line 4"]);
    assert_eq!(log.tail(2), vec!["line 3", "line 4"]);

    log.clear();
    assert!(log.is_empty());
}

#[test]
fn stage_progression() {
    assert_eq!(Stage::PreFlop.next(), Some(Stage::Flop));
    assert_eq!(Stage::River.next(), Some(Stage::Showdown));
    assert_eq!(Stage::Showdown.next(), None);
    assert_eq!(Stage::Flop.board_cards_dealt(), 3);
    assert_eq!(Stage::Turn.board_cards_dealt(), 1);
    assert_eq!(Stage::PreFlop.to_string(), "pre-flop");
}
