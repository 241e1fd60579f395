//! Key combination verifier
//!
//! Asks the operator to press and release a random letter, optionally with
//! Shift, Alt and Ctrl, and checks the press/release sequence and the
//! modifier mask reported with the letter.

use super::{Failure, Verdict, Verifier, VerifierContext};
use crate::keyboard::{HeldKeys, InputEvent, KeyCode, Modifiers};
use log::debug;
use rand::seq::IndexedRandom;
use rand::Rng;

/// One round's target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboChallenge {
    pub symbol: KeyCode,
    pub modifiers: Modifiers,
}

impl ComboChallenge {
    pub fn new(symbol: KeyCode, modifiers: Modifiers) -> Self {
        Self { symbol, modifiers }
    }

    /// Prompt naming the modifiers and the symbol
    pub fn question(&self) -> String {
        let mut parts = Vec::new();
        if self.modifiers.contains(Modifiers::SHIFT) {
            parts.push("<Shift>");
        }
        if self.modifiers.contains(Modifiers::ALT) {
            parts.push("<Alt>");
        }
        if self.modifiers.contains(Modifiers::CTRL) {
            parts.push("<Ctrl>");
        }
        parts.push(self.symbol.name());

        format!(
            "Please press and release:\n\n{}\n\n\nPress Esc if test does not pass.",
            parts.join(" ")
        )
    }
}

/// Where the current round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboPhase {
    /// Target shown, primary key not pressed yet
    AwaitingPress,
    /// Primary key pressed with matching modifiers; only releases are valid
    /// until every key is up
    FullyPressed,
    /// All rounds done
    Complete,
}

/// Verifier for key press/release events and their modifiers
#[derive(Debug)]
pub struct KeyComboVerifier {
    context: VerifierContext,
    challenge: Option<ComboChallenge>,
    held: HeldKeys,
    phase: ComboPhase,
    checks_passed: u32,
}

impl KeyComboVerifier {
    pub fn new(context: VerifierContext) -> Self {
        Self {
            context,
            challenge: None,
            held: HeldKeys::new(),
            phase: ComboPhase::AwaitingPress,
            checks_passed: 0,
        }
    }

    pub fn challenge(&self) -> Option<ComboChallenge> {
        self.challenge
    }

    pub fn phase(&self) -> ComboPhase {
        self.phase
    }

    pub fn held_keys(&self) -> &HeldKeys {
        &self.held
    }

    /// Replace the current round's target. Held keys from the previous
    /// round are dropped.
    pub fn set_challenge(&mut self, challenge: ComboChallenge) {
        self.challenge = Some(challenge);
        self.held.clear();
        self.phase = ComboPhase::AwaitingPress;
    }

    fn select_next(&mut self) {
        let symbol = self.context.alphabet.choose(&mut self.context.rng).copied();
        let modifiers = self.random_modifiers();
        match symbol {
            Some(symbol) => self.set_challenge(ComboChallenge::new(symbol, modifiers)),
            None => self.challenge = None,
        }
    }

    /// Uniform over Shift/Ctrl/Alt combinations, with `no_modifier_weight`
    /// extra chances of none at all.
    fn random_modifiers(&mut self) -> Modifiers {
        let weight = self.context.no_modifier_weight;
        let draw = self
            .context
            .rng
            .random_range(0..weight.saturating_add(u32::from(Modifiers::COMBINABLE.bits())));
        if draw < weight {
            Modifiers::NONE
        } else {
            Modifiers::from_bits_truncate((draw - weight + 1) as u8)
        }
    }

    fn on_press(&mut self, symbol: KeyCode, modifiers: Modifiers) -> Option<Verdict> {
        debug!("Press {} ({})", symbol, modifiers);
        self.held.press(symbol);

        if self.phase == ComboPhase::FullyPressed {
            return fail(Failure::AlreadyPressed);
        }

        let role = self.context.modifier_keys.role_of(symbol);
        if !role.is_empty() {
            // The mask reported with a modifier key's own press is not
            // consistent across platforms, so it is never checked.
            if self.context.strict_modifier_keys {
                if let Some(challenge) = self.challenge {
                    if !challenge.modifiers.intersects(role) {
                        return fail(Failure::UnexpectedModifierKey(symbol));
                    }
                }
            }
            return None;
        }

        let Some(challenge) = self.challenge else {
            return fail(Failure::NoMoreKeysExpected);
        };
        if symbol != challenge.symbol {
            return fail(Failure::WrongKey {
                received: symbol,
                expected: challenge.symbol,
            });
        }

        let derived = self.context.modifier_keys.derive(self.held.iter());
        if modifiers != derived {
            return fail(Failure::ModifierMismatch {
                received: modifiers,
                derived,
            });
        }

        self.phase = ComboPhase::FullyPressed;
        None
    }

    fn on_release(&mut self, symbol: KeyCode) -> Option<Verdict> {
        debug!("Release {}", symbol);
        let symbol = self.held.resolve_release(symbol);
        if !self.held.release(symbol) {
            return fail(Failure::NotPressed(symbol));
        }

        if self.held.is_empty() && self.phase == ComboPhase::FullyPressed {
            self.checks_passed += 1;
            if self.checks_passed >= self.context.number_of_checks {
                self.phase = ComboPhase::Complete;
                self.challenge = None;
                return Some(Verdict::Pass);
            }
            self.select_next();
        }
        None
    }
}

fn fail(failure: Failure) -> Option<Verdict> {
    Some(Verdict::Fail(failure))
}

impl Verifier for KeyComboVerifier {
    fn name(&self) -> &'static str {
        "Key Press/Release"
    }

    fn start(&mut self) {
        self.checks_passed = 0;
        self.select_next();
    }

    fn question(&self) -> String {
        match &self.challenge {
            Some(challenge) => challenge.question(),
            None => "All key combinations verified.".to_string(),
        }
    }

    fn handle(&mut self, event: &InputEvent) -> Option<Verdict> {
        match event {
            InputEvent::KeyPress { symbol, modifiers } => self.on_press(*symbol, *modifiers),
            InputEvent::KeyRelease { symbol, .. } => self.on_release(*symbol),
            InputEvent::Text(_) => None,
        }
    }

    fn checks_passed(&self) -> u32 {
        self.checks_passed
    }

    fn number_of_checks(&self) -> u32 {
        self.context.number_of_checks
    }
}
