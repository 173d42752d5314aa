use std::cmp::Ordering;

use crate::calendar::date::{CalendarDate, WeekStart};

/// Days between 0000-03-01 and 1970-01-01 in the proleptic Gregorian calendar.
const UNIX_EPOCH_SHIFT: i64 = 719_468;
const DAYS_PER_ERA: i64 = 146_097;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Number of days in `month` (1-based). Out-of-range months have no days.
pub fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Column (0..=6) of day 1 of the month, where 0 is `week_start`.
pub fn first_weekday_of_month(year: i32, month: u8, week_start: WeekStart) -> u8 {
    weekday_index(days_from_civil(year, month, 1), week_start)
}

pub fn weekday_of(date: CalendarDate, week_start: WeekStart) -> u8 {
    weekday_index(date.to_day_number(), week_start)
}

pub fn compare_dates(a: CalendarDate, b: CalendarDate) -> Ordering {
    (a.year(), a.month(), a.day()).cmp(&(b.year(), b.month(), b.day()))
}

/// Pulls `date` into `[min, max]`. `min` wins if the window is inverted.
pub fn clamp_to_bounds(
    date: CalendarDate,
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
) -> CalendarDate {
    let mut out = date;
    if let Some(max) = max {
        if compare_dates(out, max) == Ordering::Greater {
            out = max;
        }
    }
    if let Some(min) = min {
        if compare_dates(out, min) == Ordering::Less {
            out = min;
        }
    }
    out
}

fn weekday_index(day_number: i64, week_start: WeekStart) -> u8 {
    // 1970-01-01 was a Thursday.
    let offset = match week_start {
        WeekStart::Monday => 3,
        WeekStart::Sunday => 4,
    };
    (day_number + offset).rem_euclid(7) as u8
}

/// Days since 1970-01-01 for a (year, month, day) triple.
pub(crate) const fn days_from_civil(year: i32, month: u8, day: u8) -> i64 {
    let m = month as i64;
    let y = if m <= 2 { year as i64 - 1 } else { year as i64 };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = (m + 9) % 12;
    let doy = (153 * mp + 2) / 5 + day as i64 - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * DAYS_PER_ERA + doe - UNIX_EPOCH_SHIFT
}

/// Inverse of [`days_from_civil`].
pub(crate) fn civil_from_days(days: i64) -> (i32, u8, u8) {
    let z = days + UNIX_EPOCH_SHIFT;
    let era = z.div_euclid(DAYS_PER_ERA);
    let doe = z - era * DAYS_PER_ERA;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y as i32, m as u8, d as u8)
}
