//! Keyboard symbols, modifiers and input events

mod event;
mod held;
pub mod keymap;
pub mod modifiers;

pub use event::InputEvent;
pub use held::HeldKeys;
pub use keymap::{key, symbol_string, KeyCode, LETTERS};
pub use modifiers::{meta_alt_alias, modifiers_string, ModifierKeys, Modifiers};
