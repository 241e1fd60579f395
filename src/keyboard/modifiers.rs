//! Modifier bitmasks and the keys that produce them

use super::keymap::{key, KeyCode};
use crossterm::event::KeyModifiers;
use bitflags::bitflags;
use std::fmt;

bitflags! {
    /// Bit flags for the modifiers held during a key event
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        const SHIFT = 0b0000_0001;
        const CTRL  = 0b0000_0010;
        const ALT   = 0b0000_0100;
        const META  = 0b0000_1000;
    }
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers::empty();

    /// Shift, Ctrl and Alt: the lowest bits, so every value in `1..=7` is
    /// one of their combinations
    pub const COMBINABLE: Modifiers = Modifiers::SHIFT.union(Modifiers::CTRL).union(Modifiers::ALT);

    const NAMES: [(Modifiers, &'static str); 4] = [
        (Self::SHIFT, "MOD_SHIFT"),
        (Self::CTRL, "MOD_CTRL"),
        (Self::ALT, "MOD_ALT"),
        (Self::META, "MOD_META"),
    ];

    /// Names of the set flags, in SHIFT, CTRL, ALT, META order
    pub fn names(self) -> Vec<&'static str> {
        Self::NAMES
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.names().join("|"))
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(m: KeyModifiers) -> Self {
        let mut mods = Modifiers::empty();
        if m.intersects(KeyModifiers::SHIFT) {
            mods.insert(Modifiers::SHIFT);
        }
        if m.intersects(KeyModifiers::CONTROL) {
            mods.insert(Modifiers::CTRL);
        }
        if m.intersects(KeyModifiers::ALT) {
            mods.insert(Modifiers::ALT);
        }
        if m.intersects(KeyModifiers::SUPER | KeyModifiers::META) {
            mods.insert(Modifiers::META);
        }
        mods
    }
}

/// Render a modifier mask as "MOD_SHIFT|MOD_ALT", empty when no flag is set
pub fn modifiers_string(modifiers: Modifiers) -> String {
    modifiers.to_string()
}

/// Physical keys that play each modifier role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModifierKeys {
    pub shift: Vec<KeyCode>,
    pub ctrl: Vec<KeyCode>,
    pub alt: Vec<KeyCode>,
    pub meta: Vec<KeyCode>,
}

impl Default for ModifierKeys {
    fn default() -> Self {
        Self {
            shift: vec![key::LSHIFT, key::RSHIFT],
            ctrl: vec![key::LCTRL, key::RCTRL],
            alt: vec![key::LALT, key::RALT],
            meta: vec![key::LMETA, key::RMETA],
        }
    }
}

impl ModifierKeys {
    /// Modifier role of a symbol, empty for ordinary keys
    pub fn role_of(&self, symbol: KeyCode) -> Modifiers {
        if self.shift.contains(&symbol) {
            Modifiers::SHIFT
        } else if self.alt.contains(&symbol) {
            Modifiers::ALT
        } else if self.ctrl.contains(&symbol) {
            Modifiers::CTRL
        } else if self.meta.contains(&symbol) {
            Modifiers::META
        } else {
            Modifiers::NONE
        }
    }

    /// Combined mask the given held keys should produce
    pub fn derive<'a>(&self, held: impl IntoIterator<Item = &'a KeyCode>) -> Modifiers {
        held.into_iter()
            .fold(Modifiers::NONE, |acc, symbol| acc | self.role_of(*symbol))
    }

    /// Left-hand key for each role in `modifiers`, Shift, Ctrl, Alt, Meta order
    pub fn keys_for(&self, modifiers: Modifiers) -> Vec<KeyCode> {
        [
            (Modifiers::SHIFT, &self.shift),
            (Modifiers::CTRL, &self.ctrl),
            (Modifiers::ALT, &self.alt),
            (Modifiers::META, &self.meta),
        ]
        .into_iter()
        .filter(|(flag, _)| modifiers.contains(*flag))
        .filter_map(|(_, keys)| keys.first().copied())
        .collect()
    }
}

/// Platforms report Meta as Alt and vice versa; this is the other half of
/// each pair.
pub fn meta_alt_alias(symbol: KeyCode) -> Option<KeyCode> {
    match symbol {
        key::LMETA => Some(key::LALT),
        key::LALT => Some(key::LMETA),
        key::RMETA => Some(key::RALT),
        key::RALT => Some(key::RMETA),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combinable_covers_shift_ctrl_alt() {
        assert!(Modifiers::COMBINABLE.contains(Modifiers::SHIFT | Modifiers::CTRL | Modifiers::ALT));
        assert!(!Modifiers::COMBINABLE.intersects(Modifiers::META));
        assert_eq!(Modifiers::COMBINABLE.bits(), 7);
    }

    #[test]
    fn truncation_drops_unknown_bits() {
        assert_eq!(Modifiers::from_bits_truncate(0b1_0011), Modifiers::SHIFT | Modifiers::CTRL);
        assert_eq!(Modifiers::from_bits(0b1_0000), None);
    }

    #[test]
    fn display_joins_flag_names() {
        assert_eq!(modifiers_string(Modifiers::SHIFT | Modifiers::ALT), "MOD_SHIFT|MOD_ALT");
        assert_eq!(modifiers_string(Modifiers::NONE), "");
    }

    #[test]
    fn role_lookup() {
        let keys = ModifierKeys::default();
        assert_eq!(keys.role_of(key::RSHIFT), Modifiers::SHIFT);
        assert_eq!(keys.role_of(key::LCTRL), Modifiers::CTRL);
        assert_eq!(keys.role_of(key::RALT), Modifiers::ALT);
        assert_eq!(keys.role_of(key::LMETA), Modifiers::META);
        assert_eq!(keys.role_of(key::A), Modifiers::NONE);
        assert!(keys.role_of(key::SPACE).is_empty());
    }

    #[test]
    fn derive_ignores_ordinary_keys() {
        let keys = ModifierKeys::default();
        let held = [key::LSHIFT, key::A, key::RCTRL];
        assert_eq!(keys.derive(held.iter()), Modifiers::SHIFT | Modifiers::CTRL);
    }

    #[test]
    fn keys_for_uses_left_hand_keys() {
        let keys = ModifierKeys::default();
        assert_eq!(
            keys.keys_for(Modifiers::ALT | Modifiers::SHIFT),
            vec![key::LSHIFT, key::LALT]
        );
        assert!(keys.keys_for(Modifiers::NONE).is_empty());
    }

    #[test]
    fn crossterm_modifiers_translate() {
        let mods = Modifiers::from(KeyModifiers::SHIFT | KeyModifiers::SUPER);
        assert_eq!(mods, Modifiers::SHIFT | Modifiers::META);
    }

    #[test]
    fn meta_and_alt_alias_each_other() {
        assert_eq!(meta_alt_alias(key::LALT), Some(key::LMETA));
        assert_eq!(meta_alt_alias(key::RMETA), Some(key::RALT));
        assert_eq!(meta_alt_alias(key::LSHIFT), None);
    }
}
