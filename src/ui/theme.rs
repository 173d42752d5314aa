use crate::picker::DayCell;
use crate::ui::style::{Color, Style};

#[derive(Debug, Clone)]
pub struct Theme {
    pub title: Style,
    pub label: Style,
    pub placeholder: Style,
    pub header: Style,
    pub weekday: Style,
    pub day: Style,
    pub today: Style,
    pub selected: Style,
    pub disabled: Style,
    pub focus: Style,
    pub action: Style,
    pub hint: Style,
}

impl Theme {
    pub fn default_theme() -> Self {
        Self {
            title: Style::new().color(Color::Cyan).bold(),
            label: Style::new().bold(),
            placeholder: Style::new().color(Color::DarkGrey),
            header: Style::new().bold(),
            weekday: Style::new().color(Color::DarkGrey),
            day: Style::new(),
            today: Style::new().color(Color::Green).underline(),
            selected: Style::new().color(Color::Black).background(Color::Cyan).bold(),
            disabled: Style::new().color(Color::DarkGrey).dim(),
            focus: Style::new().color(Color::Yellow).bold(),
            action: Style::new().color(Color::Blue),
            hint: Style::new().color(Color::DarkGrey),
        }
    }

    /// Style for a day cell. Keyboard focus wins over selection, selection
    /// over today; disabled days never look selectable.
    pub fn day_style(&self, cell: &DayCell, focused: bool) -> Style {
        if cell.is_disabled {
            let mut style = self.disabled;
            if focused {
                style = style.underline();
            }
            return style;
        }
        if focused {
            self.focus
        } else if cell.is_selected {
            self.selected
        } else if cell.is_today {
            self.today
        } else {
            self.day
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_theme()
    }
}
