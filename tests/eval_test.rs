// tests/eval_test.rs

use holdem_table::{
    domain::{
        card::{Card, Rank, Suit},
        hand::HandRank,
    },
    eval::{describe_hand, evaluate_5card_hand, evaluate_best_hand, EvalError, HandCategory},
};

use holdem_table::eval::lookup_tables::{detect_straight, mask_of, rank_to_bit, STRAIGHT_MASKS};

/// Утилита: карты из строки вида "As Ks Qs".
fn cards(s: &str) -> Vec<Card> {
    s.split_whitespace()
        .map(|c| c.parse().expect("валидная карта"))
        .collect()
}

fn best(hole: &str, board: &str) -> HandRank {
    evaluate_best_hand(&cards(hole), &cards(board)).expect("5..7 карт")
}

//
// ---- lookup_tables ----
//

#[test]
fn rank_to_bit_basic() {
    assert_eq!(rank_to_bit(Rank::Two), 1u16 << 0);
    assert_eq!(rank_to_bit(Rank::Ace), 1u16 << 12);
}

#[test]
fn straight_masks_cover_wheel_and_broadway() {
    assert_eq!(STRAIGHT_MASKS.len(), 10);

    let wheel = mask_of([Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]);
    assert_eq!(detect_straight(wheel), Some(5));

    let broadway = mask_of([Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]);
    assert_eq!(detect_straight(broadway), Some(14));

    // 6-high стрит вместе с тузом: берётся старший.
    let six_high = mask_of([Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]);
    assert_eq!(detect_straight(six_high), Some(6));

    let nothing = mask_of([Rank::Two, Rank::Four, Rank::Six, Rank::Eight, Rank::Ten]);
    assert_eq!(detect_straight(nothing), None);
}

//
// ---- категории ----
//

#[test]
fn royal_flush_with_irrelevant_cards() {
    let rank = best("As Ks", "Qs Js 10s 2h 7d");
    assert_eq!(rank.category(), HandCategory::RoyalFlush);
    assert_eq!(rank.category() as u8, 9);
    assert_eq!(describe_hand(rank), "Royal Flush");
}

#[test]
fn straight_flush_below_royal() {
    let sf = best("9h 8h", "7h 6h 5h Kc Kd");
    let royal = best("Ah Kh", "Qh Jh Th 2c 3d");
    assert_eq!(sf.category(), HandCategory::StraightFlush);
    assert!(royal > sf);
}

#[test]
fn quads_beat_full_house() {
    let full_house = best("2s 2h", "2d 5s 5h 9c Jd");
    let quads = best("9s 9h", "9d 9c Ks 3h 4d");

    assert_eq!(full_house.category(), HandCategory::FullHouse);
    assert_eq!(full_house.values(), [2, 2, 2, 5, 5]);
    assert_eq!(quads.category(), HandCategory::FourOfAKind);
    assert!(quads > full_house);
}

#[test]
fn wheel_is_five_high_straight() {
    let wheel = best("Ah 2c", "3d 4s 5h 9c Jd");
    assert_eq!(wheel.category(), HandCategory::Straight);
    assert_eq!(wheel.values(), [5, 4, 3, 2, 1]);

    let six_high = best("6h 2c", "3d 4s 5h 9c Jd");
    assert!(six_high > wheel);
}

#[test]
fn kickers_break_ties() {
    let pair_ace_king = best("As Kd", "Ah 7c 5d 3s 2h");
    let pair_ace_queen = best("Ac Qd", "Ah 7c 5d 3s 2h");
    assert_eq!(pair_ace_king.category(), HandCategory::OnePair);
    assert!(pair_ace_king > pair_ace_queen);

    let two_pair_high = best("Kd Ks", "Qh Qc 5d 3s 2h");
    let two_pair_low = best("Jd Js", "Qh Qc 5d 3s 2h");
    assert_eq!(two_pair_high.category(), HandCategory::TwoPair);
    assert!(two_pair_high > two_pair_low);
}

#[test]
fn identical_board_plays_split() {
    // Борд – стрит; карманные карты не улучшают.
    let a = best("2c 3d", "Th Js Qd Kc Ah");
    let b = best("4c 4d", "Th Js Qd Kc Ah");
    assert_eq!(a, b);
}

#[test]
fn flush_uses_top_five_cards() {
    let rank = best("Ah 3h", "Kh 9h 7h 2h Qc");
    assert_eq!(rank.category(), HandCategory::Flush);
    assert_eq!(rank.values(), [14, 13, 9, 7, 3]);
}

#[test]
fn three_of_a_kind_and_high_card() {
    let trips = evaluate_5card_hand(&[
        Card::new(Rank::Seven, Suit::Spades),
        Card::new(Rank::Seven, Suit::Hearts),
        Card::new(Rank::Seven, Suit::Clubs),
        Card::new(Rank::King, Suit::Diamonds),
        Card::new(Rank::Two, Suit::Spades),
    ]);
    assert_eq!(trips.category(), HandCategory::ThreeOfAKind);
    assert_eq!(trips.values(), [7, 7, 7, 13, 2]);

    let high = best("Ac 9d", "7h 5s 3c 2d Jh");
    assert_eq!(high.category(), HandCategory::HighCard);
    assert!(trips > high);
}

#[test]
fn wrong_card_count_is_an_error() {
    assert_eq!(
        evaluate_best_hand(&cards("As Ks"), &cards("Qs Js")),
        Err(EvalError::WrongCardCount(4))
    );
    assert!(evaluate_best_hand(&cards("As Ks"), &cards("Qs Js Ts 9s 8s 7s")).is_err());
}
