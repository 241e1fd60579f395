//! Text input verifier

use super::{Failure, Verdict, Verifier, VerifierContext};
use crate::keyboard::InputEvent;
use log::debug;
use rand::seq::IndexedRandom;

/// Printable characters reachable on a US layout, with and without Shift
pub const TEXT_CHARACTERS: &str = "`1234567890-=~!@#$%^&*()_+qwertyuiop[]\\QWERTYUIOP{}|asdfghjkl;'ASDFGHJKL:\"zxcvbnm,./ZXCVBNM<>?";

/// One round's target character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextChallenge {
    pub character: char,
}

impl TextChallenge {
    pub fn new(character: char) -> Self {
        Self { character }
    }

    pub fn question(&self) -> String {
        format!(
            "Please type:\n\n{}\n\n\nPress Esc if test does not pass.",
            self.character
        )
    }

    fn matches(&self, text: &str) -> bool {
        let mut chars = text.chars();
        chars.next() == Some(self.character) && chars.next().is_none()
    }
}

/// Verifier for text events
#[derive(Debug)]
pub struct TextInputVerifier {
    context: VerifierContext,
    challenge: Option<TextChallenge>,
    checks_passed: u32,
}

impl TextInputVerifier {
    pub fn new(context: VerifierContext) -> Self {
        Self {
            context,
            challenge: None,
            checks_passed: 0,
        }
    }

    pub fn challenge(&self) -> Option<TextChallenge> {
        self.challenge
    }

    pub fn set_challenge(&mut self, challenge: TextChallenge) {
        self.challenge = Some(challenge);
    }

    fn select_next(&mut self) {
        self.challenge = self
            .context
            .characters
            .choose(&mut self.context.rng)
            .map(|c| TextChallenge::new(*c));
    }

    fn on_text(&mut self, text: &str) -> Option<Verdict> {
        debug!("Text {:?}", text);
        let Some(challenge) = self.challenge else {
            return Some(Verdict::Fail(Failure::NoMoreTextExpected));
        };

        if !challenge.matches(text) {
            return Some(Verdict::Fail(Failure::TextMismatch {
                expected: challenge.character,
                received: text.to_string(),
            }));
        }

        self.checks_passed += 1;
        if self.checks_passed >= self.context.number_of_checks {
            self.challenge = None;
            return Some(Verdict::Pass);
        }
        self.select_next();
        None
    }
}

impl Verifier for TextInputVerifier {
    fn name(&self) -> &'static str {
        "Text Input"
    }

    fn start(&mut self) {
        self.checks_passed = 0;
        self.select_next();
    }

    fn question(&self) -> String {
        match &self.challenge {
            Some(challenge) => challenge.question(),
            None => "All characters verified.".to_string(),
        }
    }

    fn handle(&mut self, event: &InputEvent) -> Option<Verdict> {
        match event {
            InputEvent::Text(text) => self.on_text(text),
            _ => None,
        }
    }

    fn checks_passed(&self) -> u32 {
        self.checks_passed
    }

    fn number_of_checks(&self) -> u32 {
        self.context.number_of_checks
    }
}
