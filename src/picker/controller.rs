use std::cmp::Ordering;
use std::fmt;

use crate::calendar::{self, CalendarDate, Clock, SystemClock, WeekStart, compare_dates};
use crate::error::BoundsError;
use crate::picker::bounds::Bounds;
use crate::picker::cell::DayGrid;
use crate::picker::cursor::DisplayCursor;
use crate::picker::outside::{ListenerId, OutsideClickSignal, OutsideClickSubscription};

pub type ChangeHandler = Box<dyn FnMut(&str)>;

/// Host-supplied inputs of one picker instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerProps {
    /// Canonical formatted date, or empty for no selection.
    pub value: String,
    /// Inclusive floor. `None` means today.
    pub min_date: Option<CalendarDate>,
    pub max_date: Option<CalendarDate>,
    pub disabled: bool,
    pub week_start: WeekStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEvent {
    TriggerClick,
    OutsideClick,
    SelectDay(CalendarDate),
    NavigatePrev,
    NavigateNext,
    Reset,
    JumpToToday,
    Close,
}

/// Side effects the host must apply after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerEffect {
    /// The grid just opened; scroll it fully into view.
    EnsureVisible,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    pub handled: bool,
    pub effects: Vec<PickerEffect>,
}

impl Transition {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            effects: Vec::new(),
        }
    }

    fn opened() -> Self {
        Self {
            handled: true,
            effects: vec![PickerEffect::EnsureVisible],
        }
    }
}

/// Interaction state of one date-picker widget.
///
/// The controller owns the open flag, the displayed month and the selected
/// date. Every user action goes through [`PickerController::handle`]; the
/// host is told about new values only through the change handler.
pub struct PickerController<C: Clock = SystemClock> {
    clock: C,
    open: OpenState,
    cursor: DisplayCursor,
    selection: Option<CalendarDate>,
    min_date: Option<CalendarDate>,
    max_date: Option<CalendarDate>,
    disabled: bool,
    week_start: WeekStart,
    signal: OutsideClickSignal,
    listener: Option<OutsideClickSubscription>,
    on_change: Option<ChangeHandler>,
}

impl PickerController<SystemClock> {
    pub fn new(props: PickerProps) -> Result<Self, BoundsError> {
        Self::with_clock(props, SystemClock)
    }
}

impl<C: Clock> PickerController<C> {
    pub fn with_clock(props: PickerProps, clock: C) -> Result<Self, BoundsError> {
        check_explicit_bounds(props.min_date, props.max_date)?;
        let selection = parse_value(&props.value);
        let mut controller = Self {
            clock,
            open: OpenState::Closed,
            cursor: DisplayCursor {
                year: 1970,
                month: 1,
            },
            selection,
            min_date: props.min_date,
            max_date: props.max_date,
            disabled: props.disabled,
            week_start: props.week_start,
            signal: OutsideClickSignal::new(),
            listener: None,
            on_change: None,
        };
        controller.cursor = controller.home_cursor();
        Ok(controller)
    }

    /// Registers outside clicks with a signal shared across the host's widgets.
    pub fn with_outside_signal(mut self, signal: OutsideClickSignal) -> Self {
        self.signal = signal;
        self
    }

    pub fn on_change(mut self, handler: impl FnMut(&str) + 'static) -> Self {
        self.on_change = Some(Box::new(handler));
        self
    }

    // ── Queries ───────────────────────────────────────────────────────────────

    pub fn open_state(&self) -> OpenState {
        self.open
    }

    pub fn is_open(&self) -> bool {
        self.open == OpenState::Open
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn cursor(&self) -> DisplayCursor {
        self.cursor
    }

    pub fn selection(&self) -> Option<CalendarDate> {
        self.selection
    }

    pub fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub fn today(&self) -> CalendarDate {
        self.clock.today()
    }

    /// Current value in canonical form, empty when nothing is selected.
    pub fn value(&self) -> String {
        self.selection.map(calendar::format).unwrap_or_default()
    }

    pub fn bounds(&self) -> Bounds {
        let min = self.min_date.unwrap_or_else(|| self.clock.today());
        // Only a defaulted floor can land past the ceiling; that window is empty.
        Bounds::new(min, self.max_date).unwrap_or_else(|_| Bounds::empty(min, self.max_date))
    }

    pub fn is_selectable(&self, date: CalendarDate) -> bool {
        self.bounds().contains(date)
    }

    /// Listener currently registered for outside clicks, present only while open.
    pub fn outside_listener(&self) -> Option<ListenerId> {
        self.listener.as_ref().map(OutsideClickSubscription::id)
    }

    pub fn grid(&self) -> DayGrid {
        DayGrid::derive(
            self.cursor,
            self.selection,
            &self.bounds(),
            self.clock.today(),
            self.week_start,
        )
    }

    // ── Host prop sync ────────────────────────────────────────────────────────

    /// Applies a controlled value from the host. Does not fire the change handler.
    pub fn set_value(&mut self, value: &str) {
        self.selection = parse_value(value);
    }

    pub fn set_bounds(
        &mut self,
        min_date: Option<CalendarDate>,
        max_date: Option<CalendarDate>,
    ) -> Result<(), BoundsError> {
        check_explicit_bounds(min_date, max_date)?;
        self.min_date = min_date;
        self.max_date = max_date;
        Ok(())
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        if disabled && self.is_open() {
            self.close("disabled");
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────────

    pub fn handle(&mut self, event: PickerEvent) -> Transition {
        match (self.open, event) {
            (OpenState::Closed, PickerEvent::TriggerClick) => {
                if self.disabled {
                    return Transition::ignored();
                }
                self.open();
                Transition::opened()
            }
            (OpenState::Closed, _) => Transition::ignored(),
            (OpenState::Open, PickerEvent::TriggerClick | PickerEvent::Close) => {
                self.close("close");
                Transition::handled()
            }
            (OpenState::Open, PickerEvent::OutsideClick) => {
                self.close("outside click");
                Transition::handled()
            }
            (OpenState::Open, PickerEvent::SelectDay(date)) => self.commit(date),
            (OpenState::Open, PickerEvent::JumpToToday) => self.commit(self.clock.today()),
            (OpenState::Open, PickerEvent::NavigatePrev) => self.show(self.cursor.previous()),
            (OpenState::Open, PickerEvent::NavigateNext) => self.show(self.cursor.next()),
            (OpenState::Open, PickerEvent::Reset) => {
                self.selection = None;
                self.close("reset");
                self.emit(String::new());
                Transition::handled()
            }
        }
    }

    fn open(&mut self) {
        self.cursor = self.home_cursor();
        self.open = OpenState::Open;
        self.listener = Some(self.signal.subscribe());
        tracing::debug!(
            year = self.cursor.year,
            month = self.cursor.month,
            "date picker opened"
        );
    }

    fn close(&mut self, reason: &'static str) {
        self.open = OpenState::Closed;
        self.listener = None;
        tracing::debug!(reason, "date picker closed");
    }

    fn show(&mut self, cursor: DisplayCursor) -> Transition {
        if cursor == self.cursor {
            tracing::trace!(
                year = cursor.year,
                month = cursor.month,
                "no month past range end"
            );
            return Transition::ignored();
        }
        self.cursor = cursor;
        Transition::handled()
    }

    fn commit(&mut self, date: CalendarDate) -> Transition {
        if !self.is_selectable(date) {
            tracing::trace!(%date, "ignoring selection outside bounds");
            return Transition::ignored();
        }
        self.selection = Some(date);
        self.close("selection");
        self.emit(calendar::format(date));
        Transition::handled()
    }

    fn emit(&mut self, value: String) {
        if let Some(handler) = self.on_change.as_mut() {
            handler(&value);
        }
    }

    /// Month to show on open: the selection, else today pulled into bounds.
    fn home_cursor(&self) -> DisplayCursor {
        match self.selection {
            Some(date) => DisplayCursor::of(date),
            None => DisplayCursor::of(self.bounds().clamp(self.clock.today())),
        }
    }
}

impl<C: Clock> fmt::Debug for PickerController<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PickerController")
            .field("open", &self.open)
            .field("cursor", &self.cursor)
            .field("selection", &self.selection)
            .field("min_date", &self.min_date)
            .field("max_date", &self.max_date)
            .field("disabled", &self.disabled)
            .field("listener", &self.outside_listener())
            .finish_non_exhaustive()
    }
}

fn parse_value(value: &str) -> Option<CalendarDate> {
    if value.trim().is_empty() {
        return None;
    }
    let parsed = calendar::parse(value);
    if parsed.is_none() {
        tracing::debug!(value, "discarding unparseable date value");
    }
    parsed
}

fn check_explicit_bounds(
    min_date: Option<CalendarDate>,
    max_date: Option<CalendarDate>,
) -> Result<(), BoundsError> {
    match (min_date, max_date) {
        (Some(min), Some(max)) if compare_dates(min, max) == Ordering::Greater => {
            Err(BoundsError::Inverted { min, max })
        }
        _ => Ok(()),
    }
}
