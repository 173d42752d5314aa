use chrono::{Datelike, Local};

use crate::calendar::date::CalendarDate;

/// Source of "today" as a local wall-clock date.
pub trait Clock {
    fn today(&self) -> CalendarDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> CalendarDate {
        let now = Local::now().date_naive();
        CalendarDate::new(now.year(), now.month() as u8, now.day() as u8)
            .unwrap_or_else(|| CalendarDate::from_day_number(0))
    }
}

/// A clock frozen on one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub CalendarDate);

impl Clock for FixedClock {
    fn today(&self) -> CalendarDate {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> CalendarDate {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_clock_matches_chrono_local_date() {
        let before = Local::now().date_naive();
        let today = SystemClock.today();
        let after = Local::now().date_naive();
        let as_tuple = (today.year(), today.month() as u32, today.day() as u32);
        assert!(
            as_tuple == (before.year(), before.month(), before.day())
                || as_tuple == (after.year(), after.month(), after.day())
        );
    }

    #[test]
    fn fixed_clock_is_fixed() {
        let d = CalendarDate::new(2025, 6, 15).expect("date");
        assert_eq!(FixedClock(d).today(), d);
    }
}
