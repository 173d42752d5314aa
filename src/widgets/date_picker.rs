use crate::calendar::{CalendarDate, Clock, MONTH_NAMES, SystemClock, days_in_month};
use crate::picker::{GridCell, PickerController, PickerEvent};
use crate::terminal::{KeyCode, KeyEvent};
use crate::ui::span::{Span, line_width};
use crate::widgets::base::WidgetBase;
use crate::widgets::traits::{
    DrawOutput, Drawable, HitArea, HitTarget, InteractionResult, Interactive, RenderContext,
};

const GRID_INDENT: u16 = 2;
const CELL_WIDTH: u16 = 4;
const TITLE_WIDTH: usize = 25;

/// Terminal date-picker: a trigger line that expands into a month grid.
pub struct DatePicker<C: Clock = SystemClock> {
    base: WidgetBase,
    controller: PickerController<C>,
    placeholder: String,
    /// Keyboard focus inside the grid; always within the displayed month while open.
    focus_day: CalendarDate,
}

impl<C: Clock> DatePicker<C> {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        controller: PickerController<C>,
    ) -> Self {
        let focus_day = controller.today();
        Self {
            base: WidgetBase::new(id, label),
            controller,
            placeholder: "Select date".to_string(),
            focus_day,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn controller(&self) -> &PickerController<C> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut PickerController<C> {
        &mut self.controller
    }

    pub fn is_open(&self) -> bool {
        self.controller.is_open()
    }

    pub fn focus_day(&self) -> CalendarDate {
        self.focus_day
    }

    pub fn close(&mut self) -> InteractionResult {
        self.controller.handle(PickerEvent::Close).into()
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn dispatch(&mut self, event: PickerEvent) -> InteractionResult {
        let was_open = self.controller.is_open();
        let result: InteractionResult = self.controller.handle(event).into();
        if !was_open && self.controller.is_open() {
            self.reset_focus();
        }
        result
    }

    fn reset_focus(&mut self) {
        let cursor = self.controller.cursor();
        self.focus_day = match self.controller.selection() {
            Some(date) if cursor.contains(date) => date,
            _ => {
                let bounds = self.controller.bounds();
                let preferred = bounds.clamp(self.controller.today());
                if cursor.contains(preferred) {
                    preferred
                } else {
                    cursor.date(1).unwrap_or(preferred)
                }
            }
        };
    }

    fn navigate(&mut self, delta: i32) -> InteractionResult {
        let event = if delta < 0 {
            PickerEvent::NavigatePrev
        } else {
            PickerEvent::NavigateNext
        };
        let result = self.dispatch(event);
        if result.handled {
            self.focus_day = self.focus_day.add_months(delta.signum());
        }
        result
    }

    fn move_focus(&mut self, days: i64) -> InteractionResult {
        self.focus_day = self.focus_day.add_days(days);
        let mut result = InteractionResult::handled();
        loop {
            let cursor = self.controller.cursor();
            let target = (self.focus_day.year(), self.focus_day.month());
            let shown = (cursor.year, cursor.month);
            if target == shown {
                break;
            }
            let event = if target < shown {
                PickerEvent::NavigatePrev
            } else {
                PickerEvent::NavigateNext
            };
            let step = self.dispatch(event);
            if !step.handled {
                break;
            }
            result.merge(step);
        }
        result
    }

    fn focus_month_edge(&mut self, last: bool) -> InteractionResult {
        let cursor = self.controller.cursor();
        let day = if last {
            days_in_month(cursor.year, cursor.month)
        } else {
            1
        };
        if let Some(date) = cursor.date(day) {
            self.focus_day = date;
        }
        InteractionResult::handled()
    }

    fn trigger_text(&self) -> String {
        let value = self.controller.value();
        if value.is_empty() {
            self.placeholder.clone()
        } else {
            value
        }
    }
}

// ── Drawable ──────────────────────────────────────────────────────────────────

impl<C: Clock> Drawable for DatePicker<C> {
    fn id(&self) -> &str {
        self.base.id()
    }

    fn label(&self) -> &str {
        self.base.label()
    }

    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput {
        let theme = ctx.theme;
        let focused = ctx.is_focused(self.base.id());
        let mut out = DrawOutput::default();

        // ── Trigger ───────────────────────────────────────────────────────────
        let value_style = if self.controller.selection().is_some() {
            theme.day
        } else {
            theme.placeholder
        };
        let arrow = if self.controller.is_open() { " ▴" } else { " ▾" };
        let mut trigger = vec![
            Span::styled(self.base.prefixed_label(focused), theme.label),
            Span::styled(self.trigger_text(), value_style),
            Span::styled(arrow, theme.hint),
        ];
        if self.controller.is_disabled() {
            trigger.push(Span::styled("  (unavailable)", theme.disabled));
        }
        out.hits.push(HitArea {
            row: 0,
            start_col: 0,
            end_col: line_width(&trigger) as u16,
            target: HitTarget::Trigger,
        });
        out.lines.push(trigger);

        if !self.controller.is_open() {
            return out;
        }

        // ── Month header ──────────────────────────────────────────────────────
        let cursor = self.controller.cursor();
        let title = format!("{} {}", MONTH_NAMES[cursor.month as usize - 1], cursor.year);
        let header_row = out.lines.len();
        out.lines.push(vec![
            Span::new("  "),
            Span::styled("‹", theme.action),
            Span::styled(format!("{:^width$}", title, width = TITLE_WIDTH), theme.header),
            Span::styled("›", theme.action),
        ]);
        let next_col = GRID_INDENT + 1 + TITLE_WIDTH as u16;
        out.hits.push(HitArea {
            row: header_row,
            start_col: GRID_INDENT - 1,
            end_col: GRID_INDENT + 2,
            target: HitTarget::PrevMonth,
        });
        out.hits.push(HitArea {
            row: header_row,
            start_col: next_col - 1,
            end_col: next_col + 2,
            target: HitTarget::NextMonth,
        });

        // ── Weekday header ────────────────────────────────────────────────────
        let grid = self.controller.grid();
        let mut weekdays = vec![Span::new("  ")];
        weekdays.extend(
            grid.week_start
                .short_names()
                .iter()
                .map(|name| Span::styled(format!(" {name} "), theme.weekday)),
        );
        out.lines.push(weekdays);

        // ── Day grid ──────────────────────────────────────────────────────────
        for week in grid.weeks() {
            let row = out.lines.len();
            let mut line = vec![Span::new("  ")];
            for (col, cell) in week.iter().enumerate() {
                let GridCell::Day(cell) = cell else {
                    line.push(Span::new("    "));
                    continue;
                };
                let has_focus = focused && cell.date == self.focus_day;
                let (l, r) = if has_focus { ("[", "]") } else { (" ", " ") };
                line.push(Span::new(l));
                line.push(Span::styled(
                    format!("{:>2}", cell.day),
                    theme.day_style(cell, has_focus),
                ));
                line.push(Span::new(r));

                let start_col = GRID_INDENT + col as u16 * CELL_WIDTH;
                out.hits.push(HitArea {
                    row,
                    start_col,
                    end_col: start_col + CELL_WIDTH,
                    target: HitTarget::Day(cell.date),
                });
            }
            out.lines.push(line);
        }

        // ── Actions ───────────────────────────────────────────────────────────
        let actions_row = out.lines.len();
        out.lines.push(vec![
            Span::new("  "),
            Span::styled("[Today]", theme.action),
            Span::new("  "),
            Span::styled("[Clear]", theme.action),
        ]);
        out.hits.push(HitArea {
            row: actions_row,
            start_col: 2,
            end_col: 9,
            target: HitTarget::Today,
        });
        out.hits.push(HitArea {
            row: actions_row,
            start_col: 11,
            end_col: 18,
            target: HitTarget::Clear,
        });

        out
    }
}

// ── Interactive ───────────────────────────────────────────────────────────────

impl<C: Clock> Interactive for DatePicker<C> {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult {
        if !self.controller.is_open() {
            return match key.code {
                KeyCode::Enter | KeyCode::Down | KeyCode::Char(' ') => {
                    self.dispatch(PickerEvent::TriggerClick)
                }
                _ => InteractionResult::ignored(),
            };
        }

        match key.code {
            KeyCode::Left => self.move_focus(-1),
            KeyCode::Right => self.move_focus(1),
            KeyCode::Up => self.move_focus(-7),
            KeyCode::Down => self.move_focus(7),
            KeyCode::PageUp => self.navigate(-1),
            KeyCode::PageDown => self.navigate(1),
            KeyCode::Home => self.focus_month_edge(false),
            KeyCode::End => self.focus_month_edge(true),
            KeyCode::Enter | KeyCode::Char(' ') => {
                let result = self.dispatch(PickerEvent::SelectDay(self.focus_day));
                if result.handled {
                    result
                } else {
                    // Disabled day: swallow the key so the host does not act on it.
                    InteractionResult::consumed()
                }
            }
            KeyCode::Char('t') => {
                let result = self.dispatch(PickerEvent::JumpToToday);
                if result.handled {
                    result
                } else {
                    InteractionResult::consumed()
                }
            }
            KeyCode::Char('r') | KeyCode::Delete | KeyCode::Backspace => {
                self.dispatch(PickerEvent::Reset)
            }
            KeyCode::Esc => self.dispatch(PickerEvent::Close),
            _ => InteractionResult::ignored(),
        }
    }

    fn on_click(&mut self, target: HitTarget) -> InteractionResult {
        match target {
            HitTarget::Trigger => self.dispatch(PickerEvent::TriggerClick),
            HitTarget::PrevMonth => self.navigate(-1),
            HitTarget::NextMonth => self.navigate(1),
            HitTarget::Day(date) => {
                self.focus_day = date;
                let result = self.dispatch(PickerEvent::SelectDay(date));
                if result.handled {
                    result
                } else {
                    InteractionResult::handled()
                }
            }
            HitTarget::Today => self.dispatch(PickerEvent::JumpToToday),
            HitTarget::Clear => self.dispatch(PickerEvent::Reset),
        }
    }

    fn on_outside_click(&mut self) -> InteractionResult {
        self.dispatch(PickerEvent::OutsideClick)
    }

    fn value(&self) -> Option<String> {
        let value = self.controller.value();
        if value.is_empty() { None } else { Some(value) }
    }

    fn set_value(&mut self, value: &str) {
        self.controller.set_value(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FixedClock;
    use crate::picker::{PickerEffect, PickerProps};
    use crate::ui::span::line_text;
    use crate::ui::theme::Theme;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn date(y: i32, m: u8, d: u8) -> CalendarDate {
        CalendarDate::new(y, m, d).expect("valid date")
    }

    type Calls = Rc<RefCell<Vec<String>>>;

    fn widget(props: PickerProps, today: CalendarDate) -> (DatePicker<FixedClock>, Calls) {
        let calls: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = Rc::clone(&calls);
        let controller = PickerController::with_clock(props, FixedClock(today))
            .expect("bounds")
            .on_change(move |v| sink.borrow_mut().push(v.to_string()));
        (DatePicker::new("departure", "Departure", controller), calls)
    }

    fn draw(widget: &DatePicker<FixedClock>, focused: bool) -> DrawOutput {
        let theme = Theme::default_theme();
        let ctx = RenderContext {
            focused_id: focused.then_some("departure"),
            theme: &theme,
        };
        widget.draw(&ctx)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::plain(code)
    }

    #[test]
    fn closed_widget_draws_trigger_only() {
        let (w, _) = widget(PickerProps::default(), date(2025, 6, 10));
        let out = draw(&w, true);
        assert_eq!(out.lines.len(), 1);
        assert_eq!(line_text(&out.lines[0]), "> Departure: Select date ▾");
        assert_eq!(out.hit_at(0, 3), Some(HitTarget::Trigger));
    }

    #[test]
    fn enter_opens_and_requests_visibility() {
        let (mut w, _) = widget(PickerProps::default(), date(2025, 6, 10));
        let result = w.on_key(key(KeyCode::Enter));
        assert!(w.is_open());
        assert_eq!(result.effects, vec![PickerEffect::EnsureVisible]);
        assert!(result.wants_visible());
        assert_eq!(w.focus_day(), date(2025, 6, 10));
    }

    #[test]
    fn open_grid_layout_and_hits() {
        let (mut w, _) = widget(PickerProps::default(), date(2025, 6, 10));
        w.on_key(key(KeyCode::Enter));
        let out = draw(&w, true);
        let text: Vec<String> = out.lines.iter().map(|l| line_text(l)).collect();

        assert_eq!(text[1].trim(), "‹        June 2025        ›");
        assert_eq!(text[2], "   Mo  Tu  We  Th  Fr  Sa  Su ");
        // June 2025 starts on Sunday: day 1 in the last column of the first week.
        assert_eq!(text[3], format!("  {}  1 ", " ".repeat(24)));
        assert!(text[5].contains("[10]"));
        assert_eq!(text.last().map(String::as_str), Some("  [Today]  [Clear]"));

        // Column of day 1 is the 7th cell.
        let first_week_row = 3;
        assert_eq!(
            out.hit_at(first_week_row, GRID_INDENT + 6 * CELL_WIDTH + 1),
            Some(HitTarget::Day(date(2025, 6, 1)))
        );
        assert_eq!(out.hit_at(first_week_row, GRID_INDENT + 1), None);
        assert_eq!(out.hit_at(1, 2), Some(HitTarget::PrevMonth));
        assert_eq!(out.hit_at(1, 28), Some(HitTarget::NextMonth));
        let actions = out.lines.len() - 1;
        assert_eq!(out.hit_at(actions, 4), Some(HitTarget::Today));
        assert_eq!(out.hit_at(actions, 12), Some(HitTarget::Clear));
    }

    #[test]
    fn clicking_day_selects_and_closes() {
        let (mut w, calls) = widget(PickerProps::default(), date(2025, 6, 10));
        w.on_click(HitTarget::Trigger);
        let result = w.on_click(HitTarget::Day(date(2025, 6, 15)));
        assert!(result.handled);
        assert!(!w.is_open());
        assert_eq!(*calls.borrow(), vec!["15 Jun 2025".to_string()]);
        assert_eq!(w.value().as_deref(), Some("15 Jun 2025"));
        let out = draw(&w, false);
        assert_eq!(line_text(&out.lines[0]), "  Departure: 15 Jun 2025 ▾");
    }

    #[test]
    fn clicking_disabled_day_keeps_picker_open() {
        let (mut w, calls) = widget(PickerProps::default(), date(2025, 6, 10));
        w.on_click(HitTarget::Trigger);
        w.on_click(HitTarget::Day(date(2025, 6, 9)));
        assert!(w.is_open());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn arrow_keys_cross_month_edges() {
        let (mut w, _) = widget(PickerProps::default(), date(2025, 6, 30));
        w.on_key(key(KeyCode::Enter));
        w.on_key(key(KeyCode::Right));
        assert_eq!(w.focus_day(), date(2025, 7, 1));
        assert_eq!(w.controller().cursor().month, 7);
        w.on_key(key(KeyCode::Up));
        assert_eq!(w.focus_day(), date(2025, 6, 24));
        assert_eq!(w.controller().cursor().month, 6);
    }

    #[test]
    fn page_keys_navigate_months() {
        let (mut w, _) = widget(PickerProps::default(), date(2025, 12, 15));
        w.on_key(key(KeyCode::Enter));
        w.on_key(key(KeyCode::PageDown));
        let cursor = w.controller().cursor();
        assert_eq!((cursor.year, cursor.month), (2026, 1));
        assert_eq!(w.focus_day(), date(2026, 1, 15));
        w.on_key(key(KeyCode::End));
        assert_eq!(w.focus_day(), date(2026, 1, 31));
    }

    #[test]
    fn enter_on_focused_day_selects() {
        let (mut w, calls) = widget(PickerProps::default(), date(2025, 6, 10));
        w.on_key(key(KeyCode::Enter));
        w.on_key(key(KeyCode::Down));
        w.on_key(key(KeyCode::Enter));
        assert_eq!(*calls.borrow(), vec!["17 Jun 2025".to_string()]);
        assert!(!w.is_open());
    }

    #[test]
    fn enter_on_disabled_focus_is_consumed() {
        let (mut w, calls) = widget(PickerProps::default(), date(2025, 6, 10));
        w.on_key(key(KeyCode::Enter));
        w.on_key(key(KeyCode::Left));
        let result = w.on_key(key(KeyCode::Enter));
        assert!(result.handled);
        assert!(w.is_open());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn reset_and_today_keys() {
        let props = PickerProps {
            value: "20 Jun 2025".to_string(),
            ..PickerProps::default()
        };
        let (mut w, calls) = widget(props, date(2025, 6, 10));
        w.on_key(key(KeyCode::Enter));
        w.on_key(key(KeyCode::Char('r')));
        assert!(!w.is_open());
        w.on_key(key(KeyCode::Enter));
        w.on_key(key(KeyCode::Char('t')));
        assert_eq!(
            *calls.borrow(),
            vec![String::new(), "10 Jun 2025".to_string()]
        );
    }

    #[test]
    fn escape_and_outside_click_close_without_change() {
        let (mut w, calls) = widget(PickerProps::default(), date(2025, 6, 10));
        w.on_key(key(KeyCode::Enter));
        w.on_key(key(KeyCode::Esc));
        assert!(!w.is_open());
        w.on_click(HitTarget::Trigger);
        w.on_outside_click();
        assert!(!w.is_open());
        assert!(calls.borrow().is_empty());
    }

    #[test]
    fn reopening_focuses_selection() {
        let props = PickerProps {
            value: "03 Aug 2025".to_string(),
            ..PickerProps::default()
        };
        let (mut w, _) = widget(props, date(2025, 6, 10));
        w.on_key(key(KeyCode::Enter));
        assert_eq!(w.focus_day(), date(2025, 8, 3));
    }

    #[test]
    fn keys_at_the_last_month_do_not_overflow() {
        let props = PickerProps {
            value: "01 Dec 9999".to_string(),
            ..PickerProps::default()
        };
        let (mut w, calls) = widget(props, date(2025, 6, 10));
        w.on_key(key(KeyCode::Enter));
        assert_eq!(w.focus_day(), date(9999, 12, 1));

        assert!(!w.on_key(key(KeyCode::PageDown)).handled);
        w.on_key(key(KeyCode::End));
        w.on_key(key(KeyCode::Right));
        w.on_key(key(KeyCode::Down));
        assert!(w.is_open());
        assert_eq!(w.focus_day(), date(9999, 12, 31));
        assert_eq!(w.controller().cursor().year, 9999);
        assert_eq!(w.controller().cursor().month, 12);

        w.on_key(key(KeyCode::Enter));
        assert_eq!(calls.borrow().as_slice(), ["31 Dec 9999"]);
    }
}
