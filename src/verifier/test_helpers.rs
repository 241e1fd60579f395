//! Shared test utilities for verifier modules
//!
//! Event constructors and scripted operator input.

use super::{ComboChallenge, Verdict, VerifierContext};
use crate::keyboard::{InputEvent, KeyCode, ModifierKeys, Modifiers};

/// Seed used by tests that need reproducible challenges
pub const TEST_SEED: u64 = 7;

pub fn seeded_context() -> VerifierContext {
    VerifierContext::seeded(TEST_SEED)
}

/// Key press with no modifiers reported
pub fn press(symbol: KeyCode) -> InputEvent {
    InputEvent::press(symbol, Modifiers::NONE)
}

pub fn press_with(symbol: KeyCode, modifiers: Modifiers) -> InputEvent {
    InputEvent::press(symbol, modifiers)
}

pub fn release(symbol: KeyCode) -> InputEvent {
    InputEvent::release(symbol, Modifiers::NONE)
}

pub fn text(s: &str) -> InputEvent {
    InputEvent::text(s)
}

/// Events a careful operator produces for a challenge: modifiers down,
/// key down, key up, modifiers up.
pub fn combo_events(challenge: ComboChallenge) -> Vec<InputEvent> {
    let modifier_keys = ModifierKeys::default().keys_for(challenge.modifiers);
    let mut events: Vec<InputEvent> = modifier_keys.iter().map(|k| press(*k)).collect();
    events.push(press_with(challenge.symbol, challenge.modifiers));
    events.push(release(challenge.symbol));
    events.extend(modifier_keys.iter().rev().map(|k| release(*k)));
    events
}

/// Message of a failing verdict, empty otherwise
pub fn failure_message(verdict: Option<Verdict>) -> String {
    match verdict {
        Some(Verdict::Fail(failure)) => failure.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::key;

    #[test]
    fn combo_events_wrap_key_in_modifiers() {
        let events = combo_events(ComboChallenge::new(key::A, Modifiers::SHIFT | Modifiers::CTRL));
        assert_eq!(
            events,
            vec![
                press(key::LSHIFT),
                press(key::LCTRL),
                press_with(key::A, Modifiers::SHIFT | Modifiers::CTRL),
                release(key::A),
                release(key::LCTRL),
                release(key::LSHIFT),
            ]
        );
    }

    #[test]
    fn combo_events_without_modifiers() {
        let events = combo_events(ComboChallenge::new(key::Z, Modifiers::NONE));
        assert_eq!(events, vec![press(key::Z), release(key::Z)]);
    }

    #[test]
    fn failure_message_is_empty_for_pass() {
        assert_eq!(failure_message(Some(Verdict::Pass)), "");
        assert_eq!(failure_message(None), "");
    }
}
