use crate::calendar::CalendarDate;
use crate::picker::{PickerEffect, Transition};
use crate::terminal::KeyEvent;
use crate::ui::span::SpanLine;
use crate::ui::theme::Theme;

// ---------------------------------------------------------------------------
// Render context & output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RenderContext<'a> {
    pub focused_id: Option<&'a str>,
    pub theme: &'a Theme,
}

impl RenderContext<'_> {
    pub fn is_focused(&self, id: &str) -> bool {
        self.focused_id == Some(id)
    }
}

/// Clickable part of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Trigger,
    PrevMonth,
    NextMonth,
    Day(CalendarDate),
    Today,
    Clear,
}

/// A clickable column range on one of the widget's own lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitArea {
    pub row: usize,
    pub start_col: u16,
    pub end_col: u16,
    pub target: HitTarget,
}

impl HitArea {
    pub fn contains(&self, row: usize, col: u16) -> bool {
        self.row == row && col >= self.start_col && col < self.end_col
    }
}

#[derive(Debug, Clone, Default)]
pub struct DrawOutput {
    pub lines: Vec<SpanLine>,
    pub hits: Vec<HitArea>,
}

impl DrawOutput {
    pub fn hit_at(&self, row: usize, col: u16) -> Option<HitTarget> {
        self.hits
            .iter()
            .find(|hit| hit.contains(row, col))
            .map(|hit| hit.target)
    }
}

// ---------------------------------------------------------------------------
// Drawable / Interactive
// ---------------------------------------------------------------------------

pub trait Drawable {
    fn id(&self) -> &str;
    fn label(&self) -> &str {
        ""
    }
    fn draw(&self, ctx: &RenderContext<'_>) -> DrawOutput;
}

pub trait Interactive: Drawable {
    fn on_key(&mut self, key: KeyEvent) -> InteractionResult;
    fn on_click(&mut self, target: HitTarget) -> InteractionResult;
    /// A click landed somewhere outside this widget.
    fn on_outside_click(&mut self) -> InteractionResult;
    fn value(&self) -> Option<String>;
    fn set_value(&mut self, value: &str);
}

// ---------------------------------------------------------------------------
// InteractionResult
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionResult {
    pub handled: bool,
    pub request_render: bool,
    pub effects: Vec<PickerEffect>,
}

impl InteractionResult {
    pub fn ignored() -> Self {
        Self::default()
    }

    /// Handled without a visible change.
    pub fn consumed() -> Self {
        Self {
            handled: true,
            request_render: false,
            effects: Vec::new(),
        }
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            request_render: true,
            effects: Vec::new(),
        }
    }

    pub fn wants_visible(&self) -> bool {
        self.effects.contains(&PickerEffect::EnsureVisible)
    }

    pub fn merge(&mut self, other: Self) {
        self.handled |= other.handled;
        self.request_render |= other.request_render;
        self.effects.extend(other.effects);
    }
}

impl From<Transition> for InteractionResult {
    fn from(transition: Transition) -> Self {
        Self {
            handled: transition.handled,
            request_render: transition.handled,
            effects: transition.effects,
        }
    }
}
