//! Tracking of keys currently held down

use super::keymap::KeyCode;
use super::modifiers::meta_alt_alias;

/// Keys currently held, in press order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    keys: Vec<KeyCode>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a press. Returns false if the key was already held.
    pub fn press(&mut self, key: KeyCode) -> bool {
        if self.keys.contains(&key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Record a release. Returns false if the key was not held.
    pub fn release(&mut self, key: KeyCode) -> bool {
        let before = self.keys.len();
        self.keys.retain(|k| *k != key);
        self.keys.len() != before
    }

    /// Symbol a release should be matched against.
    ///
    /// A released Meta or Alt key that is not held resolves to its alias
    /// when the alias is held.
    pub fn resolve_release(&self, symbol: KeyCode) -> KeyCode {
        if self.contains(symbol) {
            return symbol;
        }
        match meta_alt_alias(symbol) {
            Some(alias) if self.contains(alias) => alias,
            _ => symbol,
        }
    }

    pub fn contains(&self, key: KeyCode) -> bool {
        self.keys.contains(&key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &KeyCode> {
        self.keys.iter()
    }

    pub fn clear(&mut self) {
        self.keys.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::key;

    #[test]
    fn press_keeps_order_and_rejects_duplicates() {
        let mut held = HeldKeys::new();
        assert!(held.press(key::LSHIFT));
        assert!(held.press(key::A));
        assert!(!held.press(key::LSHIFT));
        assert_eq!(held.iter().copied().collect::<Vec<_>>(), vec![key::LSHIFT, key::A]);
    }

    #[test]
    fn release_reports_missing_keys() {
        let mut held = HeldKeys::new();
        held.press(key::A);
        assert!(!held.release(key::B));
        assert!(held.release(key::A));
        assert!(held.is_empty());
    }

    #[test]
    fn release_resolves_meta_alt_alias() {
        let mut held = HeldKeys::new();
        held.press(key::LMETA);
        assert_eq!(held.resolve_release(key::LALT), key::LMETA);

        held.clear();
        held.press(key::RALT);
        assert_eq!(held.resolve_release(key::RMETA), key::RALT);
    }

    #[test]
    fn release_keeps_symbol_when_it_is_held() {
        let mut held = HeldKeys::new();
        held.press(key::LALT);
        held.press(key::LMETA);
        assert_eq!(held.resolve_release(key::LALT), key::LALT);
    }

    #[test]
    fn release_keeps_symbol_without_held_alias() {
        let held = HeldKeys::new();
        assert_eq!(held.resolve_release(key::LALT), key::LALT);
        assert_eq!(held.resolve_release(key::A), key::A);
    }
}
