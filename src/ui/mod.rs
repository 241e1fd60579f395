//! Prompt window: the seam to the outside world and its terminal backend

mod terminal;
pub mod theme;
mod widgets;
mod window;

pub use terminal::TerminalWindow;
pub use theme::ThemeColors;
pub use widgets::PromptPanel;
pub use window::{Prompt, Window, WindowGuard};
