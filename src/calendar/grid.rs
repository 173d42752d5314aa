use crate::calendar::date::WeekStart;
use crate::calendar::math::{days_in_month, first_weekday_of_month};

/// Day layout of one month: leading blanks for the weekdays before day 1,
/// followed by every day of the month in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u8,
    pub week_start: WeekStart,
    slots: Vec<Option<u8>>,
}

impl MonthGrid {
    pub fn new(year: i32, month: u8, week_start: WeekStart) -> Self {
        let leading = first_weekday_of_month(year, month, week_start) as usize;
        let days = days_in_month(year, month);
        let mut slots = Vec::with_capacity(leading + days as usize);
        slots.extend(std::iter::repeat_n(None, leading));
        slots.extend((1..=days).map(Some));
        Self {
            year,
            month,
            week_start,
            slots,
        }
    }

    pub fn leading_blanks(&self) -> usize {
        self.slots.iter().take_while(|slot| slot.is_none()).count()
    }

    /// Unpadded slots: `leading_blanks() + days_in_month` entries.
    pub fn slots(&self) -> &[Option<u8>] {
        &self.slots
    }

    /// Slots padded with trailing blanks to whole weeks.
    pub fn weeks(&self) -> Vec<[Option<u8>; 7]> {
        self.slots
            .chunks(7)
            .map(|chunk| {
                let mut week = [None; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }

    /// Row and column of `day`, if the month has it.
    pub fn position_of(&self, day: u8) -> Option<(usize, usize)> {
        let idx = self.slots.iter().position(|slot| *slot == Some(day))?;
        Some((idx / 7, idx % 7))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_count_is_leading_blanks_plus_days() {
        for year in [1900, 2000, 2023, 2024, 2025] {
            for month in 1..=12u8 {
                for week_start in [WeekStart::Monday, WeekStart::Sunday] {
                    let grid = MonthGrid::new(year, month, week_start);
                    let leading = first_weekday_of_month(year, month, week_start) as usize;
                    let days = days_in_month(year, month) as usize;
                    assert_eq!(grid.slots().len(), leading + days);
                    assert_eq!(grid.leading_blanks(), leading);

                    let listed: Vec<u8> = grid.slots().iter().flatten().copied().collect();
                    let expected: Vec<u8> = (1..=days as u8).collect();
                    assert_eq!(listed, expected, "{year}-{month}");
                }
            }
        }
    }

    #[test]
    fn weeks_are_padded_to_seven() {
        // June 2025 starts on Sunday: 6 blanks + 30 days = 36 -> 6 rows.
        let grid = MonthGrid::new(2025, 6, WeekStart::Monday);
        let weeks = grid.weeks();
        assert_eq!(weeks.len(), 6);
        assert_eq!(weeks[0][6], Some(1));
        assert_eq!(weeks[5][0], Some(30));
        assert!(weeks[5][1..].iter().all(Option::is_none));
    }

    #[test]
    fn february_that_fills_four_rows() {
        // Feb 2026 starts on Sunday with a Sunday-first week: exactly 4 rows.
        let grid = MonthGrid::new(2026, 2, WeekStart::Sunday);
        assert_eq!(grid.leading_blanks(), 0);
        assert_eq!(grid.weeks().len(), 4);
    }

    #[test]
    fn position_of_day() {
        let grid = MonthGrid::new(2025, 6, WeekStart::Monday);
        assert_eq!(grid.position_of(1), Some((0, 6)));
        assert_eq!(grid.position_of(2), Some((1, 0)));
        assert_eq!(grid.position_of(31), None);
    }
}
