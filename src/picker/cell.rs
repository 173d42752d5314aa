use serde::Serialize;

use crate::calendar::{CalendarDate, MonthGrid, WeekStart};
use crate::picker::bounds::Bounds;
use crate::picker::cursor::DisplayCursor;

/// Render-only status of one calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: CalendarDate,
    pub day: u8,
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GridCell {
    Blank,
    Day(DayCell),
}

impl GridCell {
    pub fn day(&self) -> Option<&DayCell> {
        match self {
            GridCell::Blank => None,
            GridCell::Day(cell) => Some(cell),
        }
    }
}

/// Derived grid for one render pass. Never stored by the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayGrid {
    pub cursor: DisplayCursor,
    pub week_start: WeekStart,
    pub cells: Vec<GridCell>,
}

impl DayGrid {
    pub fn derive(
        cursor: DisplayCursor,
        selection: Option<CalendarDate>,
        bounds: &Bounds,
        today: CalendarDate,
        week_start: WeekStart,
    ) -> Self {
        let layout = MonthGrid::new(cursor.year, cursor.month, week_start);
        let cells = layout
            .slots()
            .iter()
            .map(|&slot| {
                let Some(date) = slot.and_then(|day| cursor.date(day)) else {
                    return GridCell::Blank;
                };
                GridCell::Day(DayCell {
                    date,
                    day: date.day(),
                    is_today: date == today,
                    is_selected: selection == Some(date),
                    is_disabled: !bounds.contains(date),
                })
            })
            .collect();

        Self {
            cursor,
            week_start,
            cells,
        }
    }

    pub fn days(&self) -> impl Iterator<Item = &DayCell> {
        self.cells.iter().filter_map(GridCell::day)
    }

    pub fn cell_for(&self, date: CalendarDate) -> Option<&DayCell> {
        self.days().find(|cell| cell.date == date)
    }

    /// Cells padded with trailing blanks to whole weeks.
    pub fn weeks(&self) -> Vec<[GridCell; 7]> {
        self.cells
            .chunks(7)
            .map(|chunk| {
                let mut week = [GridCell::Blank; 7];
                week[..chunk.len()].copy_from_slice(chunk);
                week
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{days_in_month, first_weekday_of_month};

    fn date(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::new(y, m, d).expect("valid date")
    }

    fn june_2025() -> DisplayCursor {
        DisplayCursor {
            year: 2025,
            month: 6,
        }
    }

    #[test]
    fn grid_has_one_cell_per_day_after_leading_blanks() {
        let bounds = Bounds::starting(date(2000, 1, 1));
        let today = date(2025, 6, 10);
        for (year, month) in [(2024, 2), (2023, 2), (2025, 6), (2025, 12), (1900, 2)] {
            let cursor = DisplayCursor { year, month };
            let grid = DayGrid::derive(cursor, None, &bounds, today, WeekStart::Monday);
            let leading = first_weekday_of_month(year, month, WeekStart::Monday) as usize;
            let days = days_in_month(year, month) as usize;
            assert_eq!(grid.cells.len(), leading + days);
            assert!(grid.cells[..leading].iter().all(|c| *c == GridCell::Blank));
            let listed: Vec<u8> = grid.days().map(|c| c.day).collect();
            assert_eq!(listed, (1..=days as u8).collect::<Vec<_>>());
        }
    }

    #[test]
    fn min_date_disables_earlier_days() {
        let bounds = Bounds::starting(date(2025, 6, 1));
        let may = DayGrid::derive(
            DisplayCursor {
                year: 2025,
                month: 5,
            },
            None,
            &bounds,
            date(2025, 1, 1),
            WeekStart::Monday,
        );
        let june = DayGrid::derive(june_2025(), None, &bounds, date(2025, 1, 1), WeekStart::Monday);
        assert!(may.cell_for(date(2025, 5, 31)).expect("cell").is_disabled);
        assert!(!june.cell_for(date(2025, 6, 1)).expect("cell").is_disabled);
    }

    #[test]
    fn max_date_disables_later_days() {
        let bounds = Bounds::new(date(2025, 6, 1), Some(date(2025, 6, 20))).expect("bounds");
        let grid = DayGrid::derive(june_2025(), None, &bounds, date(2025, 6, 1), WeekStart::Monday);
        assert!(!grid.cell_for(date(2025, 6, 20)).expect("cell").is_disabled);
        assert!(grid.cell_for(date(2025, 6, 21)).expect("cell").is_disabled);
    }

    #[test]
    fn today_and_selection_flags() {
        let bounds = Bounds::starting(date(2025, 6, 1));
        let grid = DayGrid::derive(
            june_2025(),
            Some(date(2025, 6, 15)),
            &bounds,
            date(2025, 6, 10),
            WeekStart::Monday,
        );
        let today: Vec<_> = grid.days().filter(|c| c.is_today).map(|c| c.day).collect();
        let selected: Vec<_> = grid.days().filter(|c| c.is_selected).map(|c| c.day).collect();
        assert_eq!(today, vec![10]);
        assert_eq!(selected, vec![15]);
    }

    #[test]
    fn selection_in_other_month_is_not_flagged() {
        let bounds = Bounds::starting(date(2025, 1, 1));
        let grid = DayGrid::derive(
            june_2025(),
            Some(date(2025, 7, 15)),
            &bounds,
            date(2025, 7, 10),
            WeekStart::Monday,
        );
        assert!(grid.days().all(|c| !c.is_selected && !c.is_today));
    }

    #[test]
    fn weeks_pad_trailing_blanks() {
        let bounds = Bounds::starting(date(2025, 1, 1));
        let grid = DayGrid::derive(june_2025(), None, &bounds, date(2025, 6, 1), WeekStart::Sunday);
        let weeks = grid.weeks();
        // June 2025 begins on a Sunday: 30 days fill 5 rows.
        assert_eq!(weeks.len(), 5);
        assert_eq!(weeks[0][0].day().map(|c| c.day), Some(1));
        assert!(weeks[4][2..].iter().all(|c| *c == GridCell::Blank));
    }

    #[test]
    fn grid_serializes_cells_with_kind_tag() {
        let bounds = Bounds::starting(date(2025, 6, 1));
        let grid = DayGrid::derive(june_2025(), None, &bounds, date(2025, 6, 1), WeekStart::Monday);
        let json = serde_json::to_value(&grid).expect("json");
        assert_eq!(json["cells"][0]["kind"], "blank");
        assert_eq!(json["cells"][6]["kind"], "day");
        assert_eq!(json["cells"][6]["date"], "01 Jun 2025");
        assert_eq!(json["cells"][6]["is_today"], true);
    }
}
