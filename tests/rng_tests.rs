//! RNG tests
//!
//! Эти тесты проверяют:
//! - детерминированность DeterministicRng
//! - различие seed → различие колод
//! - shuffle() не теряет и не дублирует элементы
//! - SystemRng через тот же интерфейс RandomSource

use std::collections::HashSet;

use holdem_table::domain::deck::Deck;
use holdem_table::engine::RandomSource;
use holdem_table::infra::{DeterministicRng, SystemRng};

#[test]
fn deterministic_rng_same_seed_same_shuffle() {
    let mut r1 = DeterministicRng::from_u64(123);
    let mut r2 = DeterministicRng::from_u64(123);

    let mut a: Vec<u32> = (0..52).collect();
    let mut b: Vec<u32> = (0..52).collect();
    r1.shuffle(&mut a);
    r2.shuffle(&mut b);

    assert_eq!(a, b);
    assert_ne!(a, (0..52).collect::<Vec<u32>>());
}

#[test]
fn different_seeds_give_different_decks() {
    let d1 = Deck::shuffled(&mut DeterministicRng::from_u64(1));
    let d2 = Deck::shuffled(&mut DeterministicRng::from_u64(2));
    assert_ne!(d1.cards, d2.cards);
}

#[test]
fn shuffle_keeps_every_card() {
    let mut rng = SystemRng;
    let deck = Deck::shuffled(&mut rng);

    assert_eq!(deck.len(), 52);
    let unique: HashSet<_> = deck.cards.iter().collect();
    assert_eq!(unique.len(), 52);
}

#[test]
fn shuffle_of_empty_slice_is_fine() {
    let mut rng = DeterministicRng::from_u64(0);
    let mut empty: Vec<u8> = Vec::new();
    rng.shuffle(&mut empty);
    assert!(empty.is_empty());
}
