pub mod clock;
pub mod date;
pub mod format;
pub mod grid;
pub mod math;

pub use clock::{Clock, FixedClock, SystemClock};
pub use date::{CalendarDate, MAX_YEAR, MIN_YEAR, MONTH_ABBREVIATIONS, MONTH_NAMES, WeekStart};
pub use format::{format, parse};
pub use grid::MonthGrid;
pub use math::{
    clamp_to_bounds, compare_dates, days_in_month, first_weekday_of_month, is_leap_year,
    weekday_of,
};
