pub mod app;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod picker;
pub mod terminal;
pub mod ui;
pub mod widgets;

pub use calendar::{CalendarDate, Clock, FixedClock, SystemClock, WeekStart};
pub use error::{BoundsError, ConfigError, DateParseError};
pub use picker::{
    DayCell, DayGrid, DisplayCursor, GridCell, OpenState, PickerController, PickerEffect,
    PickerEvent, PickerProps,
};
