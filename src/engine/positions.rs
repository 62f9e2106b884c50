use crate::domain::{SeatIndex, Table};

/// Следующее место по кругу.
pub fn next_seat(table: &Table, seat: SeatIndex) -> SeatIndex {
    match table.seat_count() {
        0 => 0,
        n => (seat + 1) % n,
    }
}

/// Первое место, которое может ходить (не сфолдил, не в олл-ине),
/// начиная со `start` включительно, по кругу.
pub fn next_live_seat(table: &Table, start: SeatIndex) -> Option<SeatIndex> {
    let n = table.seat_count();
    (0..n)
        .map(|offset| (start + offset) % n)
        .find(|&idx| table.seats[idx].is_live())
}

/// Места, которые могут ходить, в порядке обхода от `start`.
pub fn live_seats_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let n = table.seat_count();
    (0..n)
        .map(|offset| (start + offset) % n)
        .filter(|&idx| table.seats[idx].is_live())
        .collect()
}
