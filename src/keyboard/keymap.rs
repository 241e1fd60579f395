//! Key symbol definitions and display names

use crossterm::event::{KeyCode as CtKeyCode, ModifierKeyCode};
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// Opaque key symbol, numbered like Linux evdev scancodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u16);

impl KeyCode {
    /// Display name of the symbol ("A", "LSHIFT", ...)
    pub fn name(&self) -> &'static str {
        symbol_string(*self)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Named symbols
pub mod key {
    use super::KeyCode;

    pub const UNKNOWN: KeyCode = KeyCode(0);
    pub const ESCAPE: KeyCode = KeyCode(1);

    pub const KEY_1: KeyCode = KeyCode(2);
    pub const KEY_2: KeyCode = KeyCode(3);
    pub const KEY_3: KeyCode = KeyCode(4);
    pub const KEY_4: KeyCode = KeyCode(5);
    pub const KEY_5: KeyCode = KeyCode(6);
    pub const KEY_6: KeyCode = KeyCode(7);
    pub const KEY_7: KeyCode = KeyCode(8);
    pub const KEY_8: KeyCode = KeyCode(9);
    pub const KEY_9: KeyCode = KeyCode(10);
    pub const KEY_0: KeyCode = KeyCode(11);

    pub const BACKSPACE: KeyCode = KeyCode(14);
    pub const TAB: KeyCode = KeyCode(15);
    pub const ENTER: KeyCode = KeyCode(28);
    pub const SPACE: KeyCode = KeyCode(57);

    pub const Q: KeyCode = KeyCode(16);
    pub const W: KeyCode = KeyCode(17);
    pub const E: KeyCode = KeyCode(18);
    pub const R: KeyCode = KeyCode(19);
    pub const T: KeyCode = KeyCode(20);
    pub const Y: KeyCode = KeyCode(21);
    pub const U: KeyCode = KeyCode(22);
    pub const I: KeyCode = KeyCode(23);
    pub const O: KeyCode = KeyCode(24);
    pub const P: KeyCode = KeyCode(25);
    pub const A: KeyCode = KeyCode(30);
    pub const S: KeyCode = KeyCode(31);
    pub const D: KeyCode = KeyCode(32);
    pub const F: KeyCode = KeyCode(33);
    pub const G: KeyCode = KeyCode(34);
    pub const H: KeyCode = KeyCode(35);
    pub const J: KeyCode = KeyCode(36);
    pub const K: KeyCode = KeyCode(37);
    pub const L: KeyCode = KeyCode(38);
    pub const Z: KeyCode = KeyCode(44);
    pub const X: KeyCode = KeyCode(45);
    pub const C: KeyCode = KeyCode(46);
    pub const V: KeyCode = KeyCode(47);
    pub const B: KeyCode = KeyCode(48);
    pub const N: KeyCode = KeyCode(49);
    pub const M: KeyCode = KeyCode(50);

    pub const LCTRL: KeyCode = KeyCode(29);
    pub const LSHIFT: KeyCode = KeyCode(42);
    pub const RSHIFT: KeyCode = KeyCode(54);
    pub const LALT: KeyCode = KeyCode(56);
    pub const RCTRL: KeyCode = KeyCode(97);
    pub const RALT: KeyCode = KeyCode(100);
    pub const LMETA: KeyCode = KeyCode(125);
    pub const RMETA: KeyCode = KeyCode(126);
}

/// The 26 letter symbols, in alphabetical order
pub const LETTERS: [KeyCode; 26] = [
    key::A, key::B, key::C, key::D, key::E, key::F, key::G, key::H, key::I, key::J, key::K,
    key::L, key::M, key::N, key::O, key::P, key::Q, key::R, key::S, key::T, key::U, key::V,
    key::W, key::X, key::Y, key::Z,
];

const DIGITS: [KeyCode; 10] = [
    key::KEY_0, key::KEY_1, key::KEY_2, key::KEY_3, key::KEY_4, key::KEY_5, key::KEY_6,
    key::KEY_7, key::KEY_8, key::KEY_9,
];

/// Static name table for every named symbol
pub static KEYMAP: LazyLock<HashMap<KeyCode, &'static str>> = LazyLock::new(|| {
    let mut map = HashMap::new();

    for (i, code) in LETTERS.iter().enumerate() {
        map.insert(*code, &"ABCDEFGHIJKLMNOPQRSTUVWXYZ"[i..=i]);
    }
    for (i, code) in DIGITS.iter().enumerate() {
        map.insert(*code, &"0123456789"[i..=i]);
    }

    map.insert(key::ESCAPE, "ESCAPE");
    map.insert(key::BACKSPACE, "BACKSPACE");
    map.insert(key::TAB, "TAB");
    map.insert(key::ENTER, "ENTER");
    map.insert(key::SPACE, "SPACE");

    map.insert(key::LSHIFT, "LSHIFT");
    map.insert(key::RSHIFT, "RSHIFT");
    map.insert(key::LCTRL, "LCTRL");
    map.insert(key::RCTRL, "RCTRL");
    map.insert(key::LALT, "LALT");
    map.insert(key::RALT, "RALT");
    map.insert(key::LMETA, "LMETA");
    map.insert(key::RMETA, "RMETA");

    map
});

/// Display name for a symbol, "UNKNOWN" if it has none
pub fn symbol_string(code: KeyCode) -> &'static str {
    KEYMAP.get(&code).copied().unwrap_or("UNKNOWN")
}

/// Reverse lookup of [`symbol_string`]
pub fn symbol_from_name(name: &str) -> Option<KeyCode> {
    KEYMAP
        .iter()
        .find(|(_, n)| n.eq_ignore_ascii_case(name))
        .map(|(code, _)| *code)
}

/// Letter symbol for a character, ignoring case
pub fn letter(c: char) -> Option<KeyCode> {
    let upper = c.to_ascii_uppercase();
    if !upper.is_ascii_uppercase() {
        return None;
    }
    LETTERS.get(usize::from(upper as u8 - b'A')).copied()
}

/// Shifted characters of a US layout and the character on the same key
const SHIFTED_PAIRS: [(char, char); 21] = [
    ('~', '`'),
    ('!', '1'),
    ('@', '2'),
    ('#', '3'),
    ('$', '4'),
    ('%', '5'),
    ('^', '6'),
    ('&', '7'),
    ('*', '8'),
    ('(', '9'),
    (')', '0'),
    ('_', '-'),
    ('+', '='),
    ('{', '['),
    ('}', ']'),
    ('|', '\\'),
    (':', ';'),
    ('"', '\''),
    ('<', ','),
    ('>', '.'),
    ('?', '/'),
];

/// Whether a punctuation character needs Shift on a US layout
pub fn is_shifted_symbol(c: char) -> bool {
    SHIFTED_PAIRS.iter().any(|(shifted, _)| *shifted == c)
}

/// Character on the same key without Shift
fn unshifted(c: char) -> char {
    SHIFTED_PAIRS
        .iter()
        .find(|(shifted, _)| *shifted == c)
        .map_or(c, |(_, base)| *base)
}

fn digit(c: char) -> Option<KeyCode> {
    c.to_digit(10).map(|d| DIGITS[d as usize])
}

impl From<ModifierKeyCode> for KeyCode {
    fn from(code: ModifierKeyCode) -> Self {
        use ModifierKeyCode as MK;
        match code {
            MK::LeftShift => key::LSHIFT,
            MK::RightShift => key::RSHIFT,
            MK::LeftControl => key::LCTRL,
            MK::RightControl => key::RCTRL,
            MK::LeftAlt => key::LALT,
            MK::RightAlt => key::RALT,
            MK::LeftSuper | MK::LeftMeta => key::LMETA,
            MK::RightSuper | MK::RightMeta => key::RMETA,
            _ => key::UNKNOWN,
        }
    }
}

impl From<CtKeyCode> for KeyCode {
    fn from(code: CtKeyCode) -> Self {
        match code {
            CtKeyCode::Char(' ') => key::SPACE,
            CtKeyCode::Char(c) => {
                let c = unshifted(c);
                letter(c).or_else(|| digit(c)).unwrap_or(key::UNKNOWN)
            }
            CtKeyCode::Enter => key::ENTER,
            CtKeyCode::Tab | CtKeyCode::BackTab => key::TAB,
            CtKeyCode::Backspace => key::BACKSPACE,
            CtKeyCode::Esc => key::ESCAPE,
            CtKeyCode::Modifier(m) => m.into(),
            _ => key::UNKNOWN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_named_by_their_character() {
        assert_eq!(symbol_string(key::A), "A");
        assert_eq!(symbol_string(key::Z), "Z");
        assert_eq!(key::M.to_string(), "M");
    }

    #[test]
    fn modifier_keys_have_names() {
        assert_eq!(symbol_string(key::LSHIFT), "LSHIFT");
        assert_eq!(symbol_string(key::RMETA), "RMETA");
    }

    #[test]
    fn unmapped_code_is_unknown() {
        assert_eq!(symbol_string(KeyCode(999)), "UNKNOWN");
    }

    #[test]
    fn letter_lookup_ignores_case() {
        assert_eq!(letter('a'), Some(key::A));
        assert_eq!(letter('Q'), Some(key::Q));
        assert_eq!(letter('$'), None);
    }

    #[test]
    fn name_lookup_reverses_symbol_string() {
        assert_eq!(symbol_from_name("LALT"), Some(key::LALT));
        assert_eq!(symbol_from_name("x"), Some(key::X));
        assert_eq!(symbol_from_name("NOPE"), None);
    }

    #[test]
    fn crossterm_codes_translate() {
        assert_eq!(KeyCode::from(CtKeyCode::Char('b')), key::B);
        assert_eq!(KeyCode::from(CtKeyCode::Char('B')), key::B);
        assert_eq!(KeyCode::from(CtKeyCode::Char('7')), key::KEY_7);
        assert_eq!(KeyCode::from(CtKeyCode::Char('%')), key::KEY_5);
        assert_eq!(KeyCode::from(CtKeyCode::Char(')')), key::KEY_0);
        assert_eq!(KeyCode::from(CtKeyCode::Char('?')), key::UNKNOWN);
        assert_eq!(
            KeyCode::from(CtKeyCode::Modifier(ModifierKeyCode::LeftSuper)),
            key::LMETA
        );
        assert_eq!(
            KeyCode::from(CtKeyCode::Modifier(ModifierKeyCode::RightControl)),
            key::RCTRL
        );
    }

    #[test]
    fn shifted_symbols_on_us_layout() {
        assert!(is_shifted_symbol('$'));
        assert!(is_shifted_symbol('"'));
        assert!(!is_shifted_symbol('4'));
        assert!(!is_shifted_symbol('A'));
        assert_eq!(unshifted('{'), '[');
        assert_eq!(unshifted('a'), 'a');
    }

    #[test]
    fn alphabet_has_26_distinct_letters() {
        let mut sorted = LETTERS.to_vec();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 26);
    }
}
