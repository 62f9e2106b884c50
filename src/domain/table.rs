use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Stage;
use crate::domain::player::{AgentKind, PlayerAtTable};
use crate::domain::{HandId, SeatIndex};

/// Больше мест не берём: 2·10 карманных + 5 общих всегда помещаются в колоду.
pub const MAX_SEATS: usize = 10;

/// Сколько строк лога отдаём в снапшоте.
pub const LOG_TAIL: usize = 10;

/// Стейки стола (SB/BB).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
        }
    }
}

/// Конфиг стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Максимальное количество мест (2..=MAX_SEATS).
    pub max_seats: usize,
    pub stakes: TableStakes,
    /// Стек, с которым садится каждое место.
    pub starting_stack: Chips,
    /// Сколько строк лога держим в памяти.
    pub log_capacity: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_seats: MAX_SEATS,
            stakes: TableStakes::new(Chips(10), Chips(20)),
            starting_stack: Chips(1000),
            log_capacity: 50,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.stakes.small_blind.is_zero() {
            return Err("TableConfig: small_blind = 0".into());
        }
        if self.stakes.big_blind <= self.stakes.small_blind {
            return Err(format!(
                "TableConfig: big_blind ({}) <= small_blind ({})",
                self.stakes.big_blind, self.stakes.small_blind
            ));
        }
        if !(2..=MAX_SEATS).contains(&self.max_seats) {
            return Err(format!(
                "TableConfig: max_seats = {}, expected 2..={MAX_SEATS}",
                self.max_seats
            ));
        }
        if self.log_capacity < LOG_TAIL {
            return Err(format!(
                "TableConfig: log_capacity = {}, expected at least {LOG_TAIL}",
                self.log_capacity
            ));
        }
        Ok(())
    }
}

/// Одно место в рассадке.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatConfig {
    pub name: String,
    pub kind: AgentKind,
}

impl SeatConfig {
    pub fn new(name: impl Into<String>, kind: AgentKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Рассадка: порядок мест = порядок хода и ротации блайндов.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatingConfig {
    pub seats: Vec<SeatConfig>,
}

impl SeatingConfig {
    /// Человек на первом месте, затем `CPU n`, затем `Gemini n`.
    pub fn standard(human_name: &str, scripted: usize, remote: usize) -> Self {
        let mut seats = vec![SeatConfig::new(human_name, AgentKind::Human)];
        seats.extend((1..=scripted).map(|i| SeatConfig::new(format!("CPU {i}"), AgentKind::Scripted)));
        seats.extend((1..=remote).map(|i| SeatConfig::new(format!("Gemini {i}"), AgentKind::Remote)));
        Self { seats }
    }

    pub fn with_seat(mut self, name: impl Into<String>, kind: AgentKind) -> Self {
        self.seats.push(SeatConfig::new(name, kind));
        self
    }

    /// Убрать места заданного вида (например, Remote без настроенного сервиса).
    pub fn without_kind(mut self, kind: AgentKind) -> Self {
        self.seats.retain(|s| s.kind != kind);
        self
    }

    pub fn count_of(&self, kind: AgentKind) -> usize {
        self.seats.iter().filter(|s| s.kind == kind).count()
    }
}

/// Ограниченный лог стола: старые строки вытесняются.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableLog {
    capacity: usize,
    lines: VecDeque<String>,
}

impl TableLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            lines: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        log::info!(target: "table", "{line}");
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
        }
        self.lines.push_back(line);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Последние `n` строк, от старых к новым.
    pub fn tail(&self, n: usize) -> Vec<String> {
        let skip = self.lines.len().saturating_sub(n);
        self.lines.iter().skip(skip).cloned().collect()
    }
}

/// Состояние стола между раздачами и внутри раздачи
/// (колода/банк/очередь хода – в `HandEngine`).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Table {
    pub config: TableConfig,

    /// Места по порядку. Порядок не меняется внутри раздачи;
    /// вылетевшие (0 фишек) убираются только перед следующей.
    pub seats: Vec<PlayerAtTable>,

    /// Общие карты (0, 3, 4 или 5).
    pub board: Vec<Card>,

    pub stage: Stage,

    pub small_blind_seat: Option<SeatIndex>,
    pub big_blind_seat: Option<SeatIndex>,

    /// Идёт ли раздача.
    pub hand_in_progress: bool,

    /// Счётчик раздач (id последней начатой).
    pub hands_started: HandId,

    pub log: TableLog,
}

impl Table {
    pub fn new(config: TableConfig) -> Self {
        let log = TableLog::new(config.log_capacity);
        Self {
            config,
            seats: Vec::new(),
            board: Vec::new(),
            stage: Stage::Idle,
            small_blind_seat: None,
            big_blind_seat: None,
            hand_in_progress: false,
            hands_started: 0,
            log,
        }
    }

    /// Стол с рассадкой; каждому месту – стартовый стек из конфига.
    pub fn with_seating(config: TableConfig, seating: &SeatingConfig) -> Result<Self, String> {
        config.validate()?;
        if seating.seats.len() > config.max_seats {
            return Err(format!(
                "Seating has {} seats, table allows {}",
                seating.seats.len(),
                config.max_seats
            ));
        }
        let stack = config.starting_stack;
        let mut table = Table::new(config);
        table.seats = seating
            .seats
            .iter()
            .map(|s| PlayerAtTable::new(s.name.clone(), s.kind, stack))
            .collect();
        Ok(table)
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Несфолдившие места.
    pub fn in_hand_count(&self) -> usize {
        self.seats.iter().filter(|p| p.is_in_hand()).count()
    }

    /// Максимальная ставка среди несфолдивших.
    pub fn max_bet(&self) -> Chips {
        self.seats
            .iter()
            .filter(|p| p.is_in_hand())
            .map(|p| p.current_bet)
            .max()
            .unwrap_or(Chips::ZERO)
    }

    /// Сумма стеков и ставок за столом (без банка).
    pub fn chips_on_table(&self) -> Chips {
        self.seats.iter().map(|p| p.stack + p.current_bet).sum()
    }

    pub fn outstanding_bets(&self) -> Chips {
        self.seats.iter().map(|p| p.current_bet).sum()
    }
}
