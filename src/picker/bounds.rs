use std::cmp::Ordering;

use crate::calendar::{CalendarDate, clamp_to_bounds, compare_dates};
use crate::error::BoundsError;

/// Inclusive window of selectable dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    min: CalendarDate,
    max: Option<CalendarDate>,
}

impl Bounds {
    pub fn new(min: CalendarDate, max: Option<CalendarDate>) -> Result<Self, BoundsError> {
        if let Some(max) = max {
            if compare_dates(min, max) == Ordering::Greater {
                return Err(BoundsError::Inverted { min, max });
            }
        }
        Ok(Self { min, max })
    }

    /// Floor of `min`, no ceiling.
    pub fn starting(min: CalendarDate) -> Self {
        Self { min, max: None }
    }

    /// Window whose floor may lie past its ceiling; it contains no dates.
    pub(crate) fn empty(min: CalendarDate, max: Option<CalendarDate>) -> Self {
        Self { min, max }
    }

    pub fn min(&self) -> CalendarDate {
        self.min
    }

    pub fn max(&self) -> Option<CalendarDate> {
        self.max
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        if compare_dates(date, self.min) == Ordering::Less {
            return false;
        }
        !matches!(self.max, Some(max) if compare_dates(date, max) == Ordering::Greater)
    }

    pub fn clamp(&self, date: CalendarDate) -> CalendarDate {
        clamp_to_bounds(date, Some(self.min), self.max)
    }
}
