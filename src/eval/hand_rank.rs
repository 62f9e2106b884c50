use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    pub fn from_id(id: u8) -> Option<HandCategory> {
        use HandCategory::*;
        Some(match id {
            0 => HighCard,
            1 => OnePair,
            2 => TwoPair,
            3 => ThreeOfAKind,
            4 => Straight,
            5 => Flush,
            6 => FullHouse,
            7 => FourOfAKind,
            8 => StraightFlush,
            9 => RoyalFlush,
            _ => return None,
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl HandRank {
    /// Собрать HandRank из категории и 5 значений тай-брейка.
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][v0:4][v1:4][v2:4][v3:4][v4:4]
    /// Значения 1..14 (1 – туз в wheel) влазят в 4 бита.
    pub fn from_category_and_values(category: HandCategory, values: [u8; 5]) -> Self {
        let packed = values
            .iter()
            .fold((category as u32) & 0x0F, |acc, v| (acc << 4) | (*v as u32 & 0x0F));
        HandRank(packed)
    }

    pub fn category(&self) -> HandCategory {
        HandCategory::from_id(((self.0 >> 20) & 0x0F) as u8).unwrap_or(HandCategory::HighCard)
    }

    /// Значения тай-брейка, от определяющих категорию к кикерам.
    pub fn values(&self) -> [u8; 5] {
        let mut out = [0u8; 5];
        for (i, v) in out.iter_mut().enumerate() {
            *v = ((self.0 >> (16 - 4 * i as u32)) & 0x0F) as u8;
        }
        out
    }
}

/// Человеческое описание руки по категории.
pub fn describe_hand(rank: HandRank) -> &'static str {
    rank.category().name()
}
