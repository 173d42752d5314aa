use crate::calendar::{CalendarDate, MAX_YEAR, MIN_YEAR};

/// The (year, month) shown in the grid, independent of the selection.
/// Navigation stops at the first and last month of the date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct DisplayCursor {
    pub year: i32,
    pub month: u8,
}

impl DisplayCursor {
    pub fn of(date: CalendarDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month <= 1 {
            if self.year <= MIN_YEAR {
                return self;
            }
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn next(self) -> Self {
        if self.month >= 12 {
            if self.year >= MAX_YEAR {
                return self;
            }
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn contains(self, date: CalendarDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn date(self, day: u8) -> Option<CalendarDate> {
        CalendarDate::new(self.year, self.month, day)
    }
}
