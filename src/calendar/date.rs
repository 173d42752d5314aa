use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calendar::format;
use crate::calendar::math::{civil_from_days, days_from_civil, days_in_month};
use crate::error::DateParseError;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Earliest year a [`CalendarDate`] can hold.
pub const MIN_YEAR: i32 = 0;
/// Latest year a [`CalendarDate`] can hold. Years always format as four digits.
pub const MAX_YEAR: i32 = 9999;

const MIN_DAY_NUMBER: i64 = days_from_civil(MIN_YEAR, 1, 1);
const MAX_DAY_NUMBER: i64 = days_from_civil(MAX_YEAR, 12, 31);

/// A Gregorian calendar day in years `MIN_YEAR..=MAX_YEAR`. Months are 1-based.
///
/// Values can only be built through checked constructors, so every
/// `CalendarDate` names a day that exists. Arithmetic saturates at the
/// ends of the year range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: i32,
    month: u8,
    day: u8,
}

impl CalendarDate {
    pub fn new(year: i32, month: u8, day: u8) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
            return None;
        }
        if day < 1 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u8 {
        self.month
    }

    pub fn day(self) -> u8 {
        self.day
    }

    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[self.month as usize - 1]
    }

    /// Days since 1970-01-01.
    pub fn to_day_number(self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// Day `days` after 1970-01-01, clamped into the representable range.
    pub fn from_day_number(days: i64) -> Self {
        let (year, month, day) = civil_from_days(days.clamp(MIN_DAY_NUMBER, MAX_DAY_NUMBER));
        Self { year, month, day }
    }

    pub fn add_days(self, delta: i64) -> Self {
        Self::from_day_number(self.to_day_number().saturating_add(delta))
    }

    /// Shifts by whole months, clamping the day to the target month's length.
    pub fn add_months(self, delta: i32) -> Self {
        let first = MIN_YEAR as i64 * 12;
        let last = MAX_YEAR as i64 * 12 + 11;
        let total = (self.year as i64 * 12 + self.month as i64 - 1 + delta as i64)
            .clamp(first, last);
        let year = total.div_euclid(12) as i32;
        let month = (total.rem_euclid(12) + 1) as u8;
        let day = self.day.min(days_in_month(year, month));
        Self { year, month, day }
    }

    pub fn first_of_month(self) -> Self {
        Self { day: 1, ..self }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format::format(*self))
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        format::parse(s).ok_or_else(|| DateParseError {
            input: s.to_string(),
        })
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = DateParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        format::format(date)
    }
}

/// Which weekday occupies the first grid column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    /// Two-letter weekday headers in grid column order.
    pub fn short_names(self) -> [&'static str; 7] {
        match self {
            WeekStart::Monday => ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"],
            WeekStart::Sunday => ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"],
        }
    }
}
