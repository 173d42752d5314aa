/// Vertical window of the frame shown on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub offset: usize,
    pub height: usize,
}

impl Viewport {
    pub fn new(height: usize) -> Self {
        Self { offset: 0, height }
    }

    pub fn clamp_to(&mut self, frame_len: usize) {
        self.offset = self.offset.min(frame_len.saturating_sub(self.height));
    }

    pub fn scroll(&mut self, delta: i32, frame_len: usize) {
        let next = (self.offset as i64 + delta as i64).max(0) as usize;
        self.offset = next;
        self.clamp_to(frame_len);
    }

    /// Scrolls the minimum amount so frame rows `top..=bottom` are on screen.
    /// If the block is taller than the screen its top row wins. Applying the
    /// same request twice changes nothing.
    pub fn ensure_visible(&mut self, top: usize, bottom: usize) {
        if self.height == 0 {
            return;
        }
        let bottom = bottom.max(top);
        if bottom >= self.offset + self.height {
            self.offset = bottom + 1 - self.height;
        }
        if top < self.offset {
            self.offset = top;
        }
    }

    /// Frame row under a screen row.
    pub fn frame_row(&self, screen_row: u16) -> usize {
        self.offset + screen_row as usize
    }
}
