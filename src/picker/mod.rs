pub mod bounds;
pub mod cell;
pub mod controller;
pub mod cursor;
pub mod outside;

pub use bounds::Bounds;
pub use cell::{DayCell, DayGrid, GridCell};
pub use controller::{
    ChangeHandler, OpenState, PickerController, PickerEffect, PickerEvent, PickerProps,
    Transition,
};
pub use cursor::DisplayCursor;
pub use outside::{ListenerId, OutsideClickSignal, OutsideClickSubscription};
