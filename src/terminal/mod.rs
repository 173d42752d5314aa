pub mod backend;
pub mod event;
pub mod viewport;

pub use backend::Terminal;
pub use event::{KeyCode, KeyEvent, KeyModifiers, ScreenPos, TerminalEvent, TerminalSize};
pub use viewport::Viewport;
