//! Input events delivered by the window

use super::{KeyCode, Modifiers};

/// One input callback from the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Key went down, with the modifiers the platform reported
    KeyPress { symbol: KeyCode, modifiers: Modifiers },
    /// Key went up
    KeyRelease { symbol: KeyCode, modifiers: Modifiers },
    /// Text produced by the keyboard
    Text(String),
}

impl InputEvent {
    pub fn press(symbol: KeyCode, modifiers: Modifiers) -> Self {
        Self::KeyPress { symbol, modifiers }
    }

    pub fn release(symbol: KeyCode, modifiers: Modifiers) -> Self {
        Self::KeyRelease { symbol, modifiers }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }
}
