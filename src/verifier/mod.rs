//! Interactive verifiers for keyboard event delivery
//!
//! Each verifier is an event-driven state machine: the window feeds it
//! [`InputEvent`]s one at a time and it answers with an optional
//! [`Verdict`]. Nothing here touches a real window, so whole rounds can be
//! driven from scripted event sequences.

mod key_combo;
mod text_input;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use key_combo::{ComboChallenge, ComboPhase, KeyComboVerifier};
pub use text_input::{TextChallenge, TextInputVerifier, TEXT_CHARACTERS};

use crate::config::VerifierConfig;
use crate::keyboard::{InputEvent, KeyCode, ModifierKeys, Modifiers, LETTERS};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;

/// Common trait for all verifiers
pub trait Verifier {
    /// Name of the verifier
    fn name(&self) -> &'static str;

    /// Reset progress and pick the first challenge
    fn start(&mut self);

    /// Prompt for the current challenge
    fn question(&self) -> String;

    /// Process one input event
    fn handle(&mut self, event: &InputEvent) -> Option<Verdict>;

    /// Rounds completed so far
    fn checks_passed(&self) -> u32;

    /// Rounds needed to pass
    fn number_of_checks(&self) -> u32;
}

/// Outcome of a verifier step that ends the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(Failure),
}

/// Mismatch between what the operator was asked to do and what arrived
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Failure {
    #[error("Key already pressed, no release received.")]
    AlreadyPressed,
    #[error("Unexpected modifier key \"{0}\"")]
    UnexpectedModifierKey(KeyCode),
    #[error("Received modifiers \"{received}\" do not match pressed keys \"{derived}\"")]
    ModifierMismatch {
        received: Modifiers,
        derived: Modifiers,
    },
    #[error("No more key presses/releases expected.")]
    NoMoreKeysExpected,
    #[error("Received key \"{received}\", but expected \"{expected}\"")]
    WrongKey { received: KeyCode, expected: KeyCode },
    #[error("Released key \"{0}\" was not pressed before.")]
    NotPressed(KeyCode),
    #[error("No more text input expected.")]
    NoMoreTextExpected,
    #[error("Expected \"{expected}\", received \"{received}\"")]
    TextMismatch { expected: char, received: String },
}

/// Everything a verifier needs that would otherwise be global state
#[derive(Debug, Clone)]
pub struct VerifierContext {
    /// Symbols a key-combo challenge may target
    pub alphabet: Vec<KeyCode>,
    /// Characters a text challenge may ask for
    pub characters: Vec<char>,
    /// Which physical keys play which modifier role
    pub modifier_keys: ModifierKeys,
    pub number_of_checks: u32,
    pub no_modifier_weight: u32,
    pub strict_modifier_keys: bool,
    pub rng: StdRng,
}

impl VerifierContext {
    pub fn from_config(config: &VerifierConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            alphabet: LETTERS.to_vec(),
            characters: TEXT_CHARACTERS.chars().collect(),
            modifier_keys: ModifierKeys::default(),
            number_of_checks: config.number_of_checks,
            no_modifier_weight: config.no_modifier_weight,
            strict_modifier_keys: config.strict_modifier_keys,
            rng,
        }
    }

    /// Default settings with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self::from_config(&VerifierConfig {
            seed: Some(seed),
            ..VerifierConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::key;

    #[test]
    fn failure_messages_name_symbols() {
        let failure = Failure::WrongKey {
            received: key::B,
            expected: key::A,
        };
        assert_eq!(failure.to_string(), "Received key \"B\", but expected \"A\"");

        let failure = Failure::NotPressed(key::LSHIFT);
        assert_eq!(
            failure.to_string(),
            "Released key \"LSHIFT\" was not pressed before."
        );
    }

    #[test]
    fn modifier_mismatch_names_both_sets() {
        let failure = Failure::ModifierMismatch {
            received: Modifiers::SHIFT,
            derived: Modifiers::SHIFT | Modifiers::CTRL,
        };
        assert_eq!(
            failure.to_string(),
            "Received modifiers \"MOD_SHIFT\" do not match pressed keys \"MOD_SHIFT|MOD_CTRL\""
        );
    }

    #[test]
    fn text_mismatch_quotes_both_strings() {
        let failure = Failure::TextMismatch {
            expected: '$',
            received: "%".to_string(),
        };
        assert_eq!(failure.to_string(), "Expected \"$\", received \"%\"");
    }

    #[test]
    fn context_from_config_copies_settings() {
        let config = VerifierConfig {
            number_of_checks: 4,
            no_modifier_weight: 1,
            strict_modifier_keys: true,
            seed: Some(9),
        };
        let context = VerifierContext::from_config(&config);
        assert_eq!(context.number_of_checks, 4);
        assert_eq!(context.no_modifier_weight, 1);
        assert!(context.strict_modifier_keys);
        assert_eq!(context.alphabet.len(), 26);
        assert_eq!(context.characters.len(), 94);
    }
}
