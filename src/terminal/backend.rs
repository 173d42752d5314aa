use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event as CrosstermEvent,
    KeyCode as CrosstermKeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind,
    KeyModifiers as CrosstermKeyModifiers, MouseButton, MouseEventKind,
};
use crossterm::style::{
    Attribute, Color as CrosstermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use crossterm::terminal::{
    self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
    EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::terminal::event::{
    KeyCode, KeyEvent, KeyModifiers, ScreenPos, TerminalEvent, TerminalSize,
};
use crate::terminal::viewport::Viewport;
use crate::ui::span::SpanLine;
use crate::ui::style::Color;

/// Alternate-screen terminal with mouse capture and a scrollable viewport.
pub struct Terminal {
    stdout: Stdout,
    size: TerminalSize,
    viewport: Viewport,
    entered: bool,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        Ok(Self::with_size(TerminalSize { width, height }))
    }

    fn with_size(size: TerminalSize) -> Self {
        Self {
            stdout: io::stdout(),
            size,
            viewport: Viewport::new(size.height as usize),
            entered: false,
        }
    }

    pub fn enter(&mut self) -> io::Result<()> {
        self.enter_with(terminal::enable_raw_mode, |out| {
            execute!(
                out,
                EnterAlternateScreen,
                EnableMouseCapture,
                DisableLineWrap,
                Hide
            )
        })?;
        self.refresh_size()
    }

    /// Marks the terminal entered as soon as raw mode is on, so `exit` (and
    /// `Drop`) restore it even when the screen setup fails.
    fn enter_with(
        &mut self,
        raw_mode: impl FnOnce() -> io::Result<()>,
        setup: impl FnOnce(&mut Stdout) -> io::Result<()>,
    ) -> io::Result<()> {
        raw_mode()?;
        self.entered = true;
        setup(&mut self.stdout)
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.entered {
            return Ok(());
        }
        self.entered = false;
        execute!(
            self.stdout,
            Show,
            EnableLineWrap,
            DisableMouseCapture,
            LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn size(&self) -> TerminalSize {
        self.size
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn refresh_size(&mut self) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        self.set_size(TerminalSize { width, height });
        Ok(())
    }

    pub fn set_size(&mut self, size: TerminalSize) {
        self.size = size;
        self.viewport.height = size.height as usize;
    }

    pub fn poll_event(&mut self, timeout: Duration) -> io::Result<TerminalEvent> {
        if !event::poll(timeout)? {
            return Ok(TerminalEvent::Tick);
        }
        let event = match event::read()? {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                TerminalEvent::Key(map_key_event(key))
            }
            CrosstermEvent::Resize(width, height) => {
                let size = TerminalSize { width, height };
                self.set_size(size);
                TerminalEvent::Resize(size)
            }
            CrosstermEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => TerminalEvent::Click(ScreenPos {
                    col: mouse.column,
                    row: mouse.row,
                }),
                MouseEventKind::ScrollUp => TerminalEvent::Scroll(-3),
                MouseEventKind::ScrollDown => TerminalEvent::Scroll(3),
                _ => TerminalEvent::Tick,
            },
            _ => TerminalEvent::Tick,
        };
        Ok(event)
    }

    pub fn render(&mut self, lines: &[SpanLine]) -> io::Result<()> {
        let height = self.size.height as usize;
        let width = self.size.width;
        if height == 0 || width == 0 {
            return Ok(());
        }

        self.viewport.clamp_to(lines.len());
        let offset = self.viewport.offset;

        queue!(
            self.stdout,
            BeginSynchronizedUpdate,
            MoveTo(0, 0),
            Clear(ClearType::All)
        )?;
        for (row_idx, line) in lines.iter().skip(offset).take(height).enumerate() {
            queue!(self.stdout, MoveTo(0, row_idx as u16))?;
            self.write_span_line(line, width)?;
        }
        queue!(self.stdout, EndSynchronizedUpdate)?;
        self.stdout.flush()
    }

    fn write_span_line(&mut self, line: &SpanLine, width: u16) -> io::Result<()> {
        let render_width = width.saturating_sub(1).max(1) as usize;
        let mut used = 0usize;
        for span in line {
            if used >= render_width {
                break;
            }
            let clipped = clip_to_width(&span.text, render_width - used);
            if clipped.is_empty() {
                continue;
            }
            if let Some(color) = span.style.color {
                queue!(self.stdout, SetForegroundColor(map_color(color)))?;
            }
            if let Some(background) = span.style.background {
                queue!(self.stdout, SetBackgroundColor(map_color(background)))?;
            }
            if span.style.bold {
                queue!(self.stdout, SetAttribute(Attribute::Bold))?;
            }
            if span.style.dim {
                queue!(self.stdout, SetAttribute(Attribute::Dim))?;
            }
            if span.style.underline {
                queue!(self.stdout, SetAttribute(Attribute::Underlined))?;
            }
            queue!(self.stdout, Print(clipped.as_str()))?;
            if !span.style.is_plain() {
                queue!(self.stdout, SetAttribute(Attribute::Reset), ResetColor)?;
            }
            used = used.saturating_add(UnicodeWidthStr::width(clipped.as_str()));
        }
        Ok(())
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = self.exit();
    }
}

fn map_color(color: Color) -> CrosstermColor {
    match color {
        Color::Reset => CrosstermColor::Reset,
        Color::Black => CrosstermColor::Black,
        Color::DarkGrey => CrosstermColor::DarkGrey,
        Color::Red => CrosstermColor::Red,
        Color::Green => CrosstermColor::Green,
        Color::Yellow => CrosstermColor::Yellow,
        Color::Blue => CrosstermColor::Blue,
        Color::Magenta => CrosstermColor::Magenta,
        Color::Cyan => CrosstermColor::Cyan,
        Color::White => CrosstermColor::White,
    }
}

fn map_key_event(key: CrosstermKeyEvent) -> KeyEvent {
    KeyEvent {
        code: map_key_code(key.code),
        modifiers: map_key_modifiers(key.modifiers),
    }
}

fn map_key_code(code: CrosstermKeyCode) -> KeyCode {
    match code {
        CrosstermKeyCode::Char(ch) => KeyCode::Char(ch),
        CrosstermKeyCode::Enter => KeyCode::Enter,
        CrosstermKeyCode::Tab => KeyCode::Tab,
        CrosstermKeyCode::BackTab => KeyCode::BackTab,
        CrosstermKeyCode::Esc => KeyCode::Esc,
        CrosstermKeyCode::Backspace => KeyCode::Backspace,
        CrosstermKeyCode::Delete => KeyCode::Delete,
        CrosstermKeyCode::Home => KeyCode::Home,
        CrosstermKeyCode::End => KeyCode::End,
        CrosstermKeyCode::Left => KeyCode::Left,
        CrosstermKeyCode::Right => KeyCode::Right,
        CrosstermKeyCode::Up => KeyCode::Up,
        CrosstermKeyCode::Down => KeyCode::Down,
        CrosstermKeyCode::PageUp => KeyCode::PageUp,
        CrosstermKeyCode::PageDown => KeyCode::PageDown,
        _ => KeyCode::Unknown,
    }
}

fn map_key_modifiers(modifiers: CrosstermKeyModifiers) -> KeyModifiers {
    let mut out = KeyModifiers::NONE;
    if modifiers.contains(CrosstermKeyModifiers::SHIFT) {
        out = out.union(KeyModifiers::SHIFT);
    }
    if modifiers.contains(CrosstermKeyModifiers::CONTROL) {
        out = out.union(KeyModifiers::CONTROL);
    }
    if modifiers.contains(CrosstermKeyModifiers::ALT) {
        out = out.union(KeyModifiers::ALT);
    }
    out
}

fn clip_to_width(text: &str, max_width: usize) -> String {
    if max_width == 0 {
        return String::new();
    }
    let mut used = 0usize;
    let mut out = String::new();
    for ch in text.chars().filter(|ch| !matches!(ch, '\n' | '\r')) {
        let ch_width = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used.saturating_add(ch_width) > max_width {
            break;
        }
        out.push(ch);
        used = used.saturating_add(ch_width);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clip_respects_column_budget() {
        assert_eq!(clip_to_width("15 Jun 2025", 6), "15 Jun");
        assert_eq!(clip_to_width("‹ June ›", 3), "‹ J");
        assert_eq!(clip_to_width("abc", 0), "");
        assert_eq!(clip_to_width("a\r\nb", 5), "ab");
    }

    #[test]
    fn modifiers_map_bitwise() {
        let mapped =
            map_key_modifiers(CrosstermKeyModifiers::SHIFT | CrosstermKeyModifiers::CONTROL);
        assert!(mapped.contains(KeyModifiers::SHIFT));
        assert!(mapped.contains(KeyModifiers::CONTROL));
        assert!(!mapped.contains(KeyModifiers::ALT));
    }

    fn detached() -> Terminal {
        Terminal::with_size(TerminalSize {
            width: 80,
            height: 24,
        })
    }

    #[test]
    fn failed_screen_setup_still_restores_on_exit() {
        let mut term = detached();
        let result = term.enter_with(|| Ok(()), |_| Err(io::Error::other("no alt screen")));
        assert!(result.is_err());
        assert!(term.entered);
        // Raw mode was never really enabled here; skip the restore on drop.
        term.entered = false;
    }

    #[test]
    fn failed_raw_mode_is_not_entered() {
        let mut term = detached();
        let result = term.enter_with(|| Err(io::Error::other("not a tty")), |_| Ok(()));
        assert!(result.is_err());
        assert!(!term.entered);
    }
}
