use crate::domain::card::Rank;

/// Битовая маска рангов: бит 0 = двойка, бит 12 = туз.
pub type RankMask = u16;

const WHEEL: RankMask = 0b1_0000_0000_1111; // A,5,4,3,2

/// Маски всех стритов, индекс = старшая карта − 5 (0 = wheel, 9 = бродвей).
pub const STRAIGHT_MASKS: [RankMask; 10] = build_straight_masks();

const fn build_straight_masks() -> [RankMask; 10] {
    let mut masks = [0u16; 10];
    masks[0] = WHEEL;
    let mut i = 1;
    while i < 10 {
        // стрит от (i+2) до (i+6): пять бит начиная с i-1
        masks[i] = 0b1_1111 << (i - 1);
        i += 1;
    }
    masks
}

pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank.value() - 2)
}

pub fn mask_of(ranks: impl IntoIterator<Item = Rank>) -> RankMask {
    ranks.into_iter().fold(0, |m, r| m | rank_to_bit(r))
}

/// Старшая карта стрита в маске (значение 5..=14), если стрит есть.
/// Wheel (A2345) даёт 5: туз в нём младший.
pub fn detect_straight(rank_mask: RankMask) -> Option<u8> {
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|(_, sm)| rank_mask & **sm == **sm)
        .map(|(i, _)| i as u8 + 5)
}
