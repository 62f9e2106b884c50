use thiserror::Error;

use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandRank;

use super::hand_rank::HandCategory;
use super::lookup_tables::{detect_straight, mask_of};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Для оценки нужно от 5 до 7 карт, получено {0}")]
    WrongCardCount(usize),
}

/// Вычислить лучшую 5-карточную руку из hole + board.
///
/// Штатный вызов – 2 карманные + 5 общих (перебор C(7,5) = 21 комбинации).
/// Меньше 5 общих карт на вскрытии – ошибка вызывающего; функция при этом
/// корректно работает для любых 5–7 карт.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Result<HandRank, EvalError> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);

    if !(5..=7).contains(&all_cards.len()) {
        return Err(EvalError::WrongCardCount(all_cards.len()));
    }

    Ok(best_of_all_5card_combinations(&all_cards))
}

/// Перебираем все комбинации 5 из N и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> HandRank {
    let n = cards.len();
    let mut best = HandRank(0);

    for a in 0..n {
        for b in (a + 1)..n {
            for c in (b + 1)..n {
                for d in (c + 1)..n {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        best = best.max(evaluate_5card_hand(&five));
                    }
                }
            }
        }
    }

    best
}

/// Оценка строго 5-карточной комбинации.
pub fn evaluate_5card_hand(cards: &[Card; 5]) -> HandRank {
    let first_suit = cards[0].suit;
    let is_flush = cards.iter().all(|c| c.suit == first_suit);
    // 5 карт закрывают 5 бит маски стрита только при попарно разных рангах.
    let straight_high = detect_straight(mask_of(cards.iter().map(|c| c.rank)));

    if let Some(high) = straight_high {
        let values = straight_values(high);
        let category = match (is_flush, high) {
            (true, 14) => HandCategory::RoyalFlush,
            (true, _) => HandCategory::StraightFlush,
            (false, _) => HandCategory::Straight,
        };
        return HandRank::from_category_and_values(category, values);
    }

    // Группы (значение, сколько раз), сначала по количеству, затем по значению – по убыванию.
    let groups = value_groups(cards);
    let values = flatten_groups(&groups);
    let pattern: Vec<u8> = groups.iter().map(|&(_, count)| count).collect();

    let category = match pattern.as_slice() {
        [4, 1] => HandCategory::FourOfAKind,
        [3, 2] => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    HandRank::from_category_and_values(category, values)
}

fn value_groups(cards: &[Card; 5]) -> Vec<(u8, u8)> {
    let mut counts = [0u8; 15];
    for card in cards {
        counts[card.value() as usize] += 1;
    }

    let mut groups: Vec<(u8, u8)> = (Rank::Two.value()..=Rank::Ace.value())
        .filter(|&v| counts[v as usize] > 0)
        .map(|v| (v, counts[v as usize]))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));
    groups
}

/// Карты, определяющие категорию, идут первыми: [QQQQK], [TTTPP], [HHLLK] и т.д.
fn flatten_groups(groups: &[(u8, u8)]) -> [u8; 5] {
    let mut out = [0u8; 5];
    let expanded = groups
        .iter()
        .flat_map(|&(value, count)| std::iter::repeat(value).take(count as usize));
    for (slot, value) in out.iter_mut().zip(expanded) {
        *slot = value;
    }
    out
}

/// Значения стрита по убыванию; в wheel туз считается единицей.
fn straight_values(high: u8) -> [u8; 5] {
    if high == Rank::Five.value() {
        return [5, 4, 3, 2, 1];
    }
    [high, high - 1, high - 2, high - 3, high - 4]
}
