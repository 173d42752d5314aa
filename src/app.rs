//! Booking form hosting a departure and a return date picker.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::calendar::{self, CalendarDate, Clock, SystemClock};
use crate::config::{AppConfig, FieldConfig};
use crate::error::BoundsError;
use crate::picker::{OutsideClickSignal, PickerController};
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use crate::ui::span::{Span, SpanLine};
use crate::ui::theme::Theme;
use crate::widgets::{
    DatePicker, DrawOutput, Drawable, InteractionResult, Interactive, RenderContext,
};

pub const DEPARTURE_ID: &str = "departure";
pub const RETURN_ID: &str = "return";

const HISTORY_LIMIT: usize = 5;

const KEY_HINT: &str = "tab: switch field  enter: open/select  arrows: move  \
    pgup/pgdn: month  t: today  r: clear  q: quit";

/// A value reported through a picker's change handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueChange {
    pub id: String,
    pub value: String,
}

type ChangeQueue = Rc<RefCell<VecDeque<ValueChange>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct WidgetSlot {
    top: usize,
    height: usize,
}

pub struct BookingApp<C: Clock + Clone = SystemClock> {
    title: String,
    pickers: Vec<DatePicker<C>>,
    focus: usize,
    signal: OutsideClickSignal,
    changes: ChangeQueue,
    history: VecDeque<String>,
    theme: Theme,
    link_return: bool,
    return_floor: Option<CalendarDate>,
    return_ceiling: Option<CalendarDate>,
    slots: Vec<WidgetSlot>,
    draws: Vec<DrawOutput>,
    visible_request: Option<usize>,
    should_exit: bool,
}

impl BookingApp<SystemClock> {
    pub fn new(config: &AppConfig) -> Result<Self, BoundsError> {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock + Clone> BookingApp<C> {
    pub fn with_clock(config: &AppConfig, clock: C) -> Result<Self, BoundsError> {
        let signal = OutsideClickSignal::new();
        let changes: ChangeQueue = Rc::default();
        let build = |id: &str, field: &FieldConfig| -> Result<DatePicker<C>, BoundsError> {
            let sink = Rc::clone(&changes);
            let owner = id.to_string();
            let controller =
                PickerController::with_clock(field.props(config.week_start), clock.clone())?
                    .with_outside_signal(signal.clone())
                    .on_change(move |value| {
                        sink.borrow_mut().push_back(ValueChange {
                            id: owner.clone(),
                            value: value.to_string(),
                        });
                    });
            let mut picker = DatePicker::new(id, field.label.clone(), controller);
            if let Some(placeholder) = &field.placeholder {
                picker = picker.with_placeholder(placeholder.clone());
            }
            Ok(picker)
        };

        let pickers = vec![
            build(DEPARTURE_ID, &config.departure)?,
            build(RETURN_ID, &config.return_trip)?,
        ];

        let mut app = Self {
            title: config.title.clone(),
            pickers,
            focus: 0,
            signal,
            changes,
            history: VecDeque::new(),
            theme: Theme::default_theme(),
            link_return: config.link_return_to_departure,
            return_floor: config.return_trip.min_date,
            return_ceiling: config.return_trip.max_date,
            slots: Vec::new(),
            draws: Vec::new(),
            visible_request: None,
            should_exit: false,
        };
        app.sync_return_floor();
        Ok(app)
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn value_of(&self, id: &str) -> Option<String> {
        self.picker(id).and_then(Interactive::value)
    }

    pub fn picker(&self, id: &str) -> Option<&DatePicker<C>> {
        self.pickers.iter().find(|picker| picker.id() == id)
    }

    pub fn focused_id(&self) -> &str {
        self.pickers[self.focus].id()
    }

    pub fn history(&self) -> impl Iterator<Item = &str> {
        self.history.iter().map(String::as_str)
    }

    /// Label and chosen value of every field, empty values included.
    pub fn summary(&self) -> Vec<(String, String)> {
        self.pickers
            .iter()
            .map(|picker| {
                (
                    picker.label().to_string(),
                    picker.value().unwrap_or_default(),
                )
            })
            .collect()
    }

    pub fn outside_signal(&self) -> &OutsideClickSignal {
        &self.signal
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_exit = true;
            return true;
        }

        let focused_open = self.pickers[self.focus].is_open();
        match key.code {
            KeyCode::Tab => return self.cycle_focus(1),
            KeyCode::BackTab => return self.cycle_focus(-1),
            KeyCode::Char('q') | KeyCode::Esc if !focused_open => {
                self.should_exit = true;
                return true;
            }
            _ => {}
        }

        let result = self.pickers[self.focus].on_key(key);
        self.finish(self.focus, result)
    }

    /// Routes a click at a frame position. Uses the layout of the last render.
    pub fn handle_click(&mut self, row: usize, col: u16) -> bool {
        let hit = self
            .slots
            .iter()
            .position(|slot| row >= slot.top && row < slot.top + slot.height);

        let mut changed = false;
        for idx in 0..self.pickers.len() {
            if Some(idx) == hit {
                continue;
            }
            let listening = self.pickers[idx]
                .controller()
                .outside_listener()
                .is_some_and(|id| self.signal.is_listening(id));
            if listening {
                let result = self.pickers[idx].on_outside_click();
                changed |= self.finish(idx, result);
            }
        }

        let Some(idx) = hit else {
            return changed;
        };
        self.focus = idx;
        let local_row = row - self.slots[idx].top;
        let target = self.draws.get(idx).and_then(|draw| draw.hit_at(local_row, col));
        if let Some(target) = target {
            let result = self.pickers[idx].on_click(target);
            self.finish(idx, result);
        }
        true
    }

    fn cycle_focus(&mut self, delta: isize) -> bool {
        let current = self.focus;
        if self.pickers[current].is_open() {
            let result = self.pickers[current].close();
            self.finish(current, result);
        }
        let len = self.pickers.len() as isize;
        self.focus = (current as isize + delta).rem_euclid(len) as usize;
        true
    }

    fn finish(&mut self, idx: usize, result: InteractionResult) -> bool {
        if result.wants_visible() {
            self.visible_request = Some(idx);
        }
        let drained = self.drain_changes();
        result.request_render || drained
    }

    fn drain_changes(&mut self) -> bool {
        let pending: Vec<ValueChange> = self.changes.borrow_mut().drain(..).collect();
        if pending.is_empty() {
            return false;
        }
        for change in pending {
            let shown = if change.value.is_empty() {
                "cleared".to_string()
            } else {
                change.value.clone()
            };
            tracing::info!(field = %change.id, value = %change.value, "date changed");
            self.push_history(format!("{}: {}", change.id, shown));
            if change.id == DEPARTURE_ID {
                self.sync_return_floor();
            }
        }
        true
    }

    /// Keeps the return picker's floor on the departure date.
    fn sync_return_floor(&mut self) {
        if !self.link_return {
            return;
        }
        let departure = self
            .value_of(DEPARTURE_ID)
            .and_then(|value| calendar::parse(&value));
        let floor = match (departure, self.return_floor) {
            (Some(dep), Some(configured)) => Some(dep.max(configured)),
            (dep, configured) => dep.or(configured),
        };
        let ceiling = self.return_ceiling;
        let Some(ret) = self.pickers.iter_mut().find(|p| p.id() == RETURN_ID) else {
            return;
        };

        if let Err(err) = ret.controller_mut().set_bounds(floor, ceiling) {
            tracing::warn!(error = %err, "departure is past the return ceiling");
            // Fall back to the configured window.
            if let Err(err) = ret.controller_mut().set_bounds(self.return_floor, ceiling) {
                tracing::error!(error = %err, "configured return window is inverted");
            }
        }

        let stale = ret
            .controller()
            .selection()
            .is_some_and(|date| !ret.controller().is_selectable(date));
        if stale {
            ret.set_value("");
            self.push_history(format!("{RETURN_ID}: cleared (before departure)"));
        }
    }

    fn push_history(&mut self, entry: String) {
        self.history.push_back(entry);
        while self.history.len() > HISTORY_LIMIT {
            self.history.pop_front();
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&mut self) -> Vec<SpanLine> {
        let mut lines: Vec<SpanLine> = vec![
            vec![Span::styled(self.title.clone(), self.theme.title)],
            Vec::new(),
        ];

        let focused_id = self.pickers[self.focus].id().to_string();
        let ctx = RenderContext {
            focused_id: Some(focused_id.as_str()),
            theme: &self.theme,
        };

        self.slots.clear();
        self.draws.clear();
        for picker in &self.pickers {
            let out = picker.draw(&ctx);
            self.slots.push(WidgetSlot {
                top: lines.len(),
                height: out.lines.len(),
            });
            lines.extend(out.lines.iter().cloned());
            lines.push(Vec::new());
            self.draws.push(out);
        }

        lines.push(vec![Span::styled(KEY_HINT, self.theme.hint)]);
        if !self.history.is_empty() {
            lines.push(Vec::new());
            for entry in &self.history {
                lines.push(vec![Span::styled(format!("  {entry}"), self.theme.hint)]);
            }
        }
        lines
    }

    /// Frame rows of the picker that just opened, if any. Call after `render`.
    pub fn take_visible_request(&mut self) -> Option<(usize, usize)> {
        let idx = self.visible_request.take()?;
        let slot = self.slots.get(idx)?;
        Some((slot.top, slot.top + slot.height.saturating_sub(1)))
    }
}
