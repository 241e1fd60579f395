//! Session controller
//!
//! Owns pass/fail bookkeeping for one verifier and drives the
//! draw-then-poll loop until the verifier decides or the operator leaves.

use crate::keyboard::InputEvent;
use crate::ui::{Prompt, Window, WindowGuard};
use crate::verifier::{Failure, Verdict, Verifier};
use anyhow::Result;
use log::{info, warn};
use std::time::{Duration, Instant};
use thiserror::Error;

/// Final result of a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    Passed,
    Failed(Failure),
    /// The window was closed before a verdict
    Aborted,
}

impl SessionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed(_) => "failed",
            Self::Aborted => "aborted",
        }
    }

    pub fn into_result(self) -> Result<(), SessionError> {
        match self {
            Self::Passed => Ok(()),
            Self::Failed(failure) => Err(SessionError::Failed(failure)),
            Self::Aborted => Err(SessionError::Aborted),
        }
    }
}

/// A session that did not pass
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Test aborted")]
    Aborted,
    #[error("{0}")]
    Failed(Failure),
}

/// One run of a verifier
#[derive(Debug)]
pub struct Session<V: Verifier> {
    verifier: V,
    finished: bool,
    failure: Option<Failure>,
    question: String,
    start_time: Instant,
    events_processed: u64,
}

impl<V: Verifier> Session<V> {
    /// Start the verifier and show its first challenge
    pub fn new(mut verifier: V) -> Self {
        verifier.start();
        let question = verifier.question();
        Self {
            verifier,
            finished: false,
            failure: None,
            question,
            start_time: Instant::now(),
            events_processed: 0,
        }
    }

    /// Record a failure and finish. Only the first failure is kept.
    pub fn fail(&mut self, failure: Failure) {
        if self.finished {
            return;
        }
        warn!("{}: {}", self.verifier.name(), failure);
        self.failure = Some(failure);
        self.finished = true;
    }

    pub fn pass(&mut self) {
        info!(
            "{}: all {} checks passed",
            self.verifier.name(),
            self.verifier.number_of_checks()
        );
        self.failure = None;
        self.finished = true;
    }

    /// Feed one event to the verifier. Ignored once finished.
    pub fn dispatch(&mut self, event: &InputEvent) {
        if self.finished {
            return;
        }
        self.events_processed += 1;
        match self.verifier.handle(event) {
            Some(Verdict::Pass) => self.pass(),
            Some(Verdict::Fail(failure)) => self.fail(failure),
            None => {}
        }
        self.question = self.verifier.question();
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn failure(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    pub fn verifier_mut(&mut self) -> &mut V {
        &mut self.verifier
    }

    pub fn events_processed(&self) -> u64 {
        self.events_processed
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Current frame contents
    pub fn prompt(&self) -> Prompt {
        Prompt {
            title: self.verifier.name().to_string(),
            question: self.question.clone(),
            checks_passed: self.verifier.checks_passed(),
            number_of_checks: self.verifier.number_of_checks(),
        }
    }

    /// Outcome as of now; unfinished counts as aborted
    pub fn outcome(&self) -> SessionOutcome {
        match (&self.failure, self.finished) {
            (_, false) => SessionOutcome::Aborted,
            (Some(failure), true) => SessionOutcome::Failed(failure.clone()),
            (None, true) => SessionOutcome::Passed,
        }
    }
}

/// Show the window and run the session until it finishes or the window
/// signals exit. The window is closed on every path out.
pub fn run<W: Window, V: Verifier>(window: &mut W, session: &mut Session<V>) -> Result<SessionOutcome> {
    let mut window = WindowGuard::new(window);
    info!("Starting {} session", session.verifier().name());

    window.set_visible(true)?;
    while !session.is_finished() && !window.has_exit() {
        window.draw(&session.prompt())?;
        window.dispatch_events(&mut |event: InputEvent| session.dispatch(&event))?;
    }
    window.close()?;

    let outcome = session.outcome();
    info!(
        "Session {} after {} events ({:.1}s)",
        outcome.as_str(),
        session.events_processed(),
        session.elapsed().as_secs_f64()
    );
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::key;
    use crate::verifier::test_helpers::*;
    use crate::verifier::{TextChallenge, TextInputVerifier};

    fn text_session() -> Session<TextInputVerifier> {
        let mut session = Session::new(TextInputVerifier::new(seeded_context()));
        session.verifier_mut().set_challenge(TextChallenge::new('$'));
        session
    }

    #[test]
    fn new_session_shows_first_challenge() {
        let session = Session::new(TextInputVerifier::new(seeded_context()));
        assert!(!session.is_finished());
        assert!(session.question().starts_with("Please type:"));
        assert_eq!(session.outcome(), SessionOutcome::Aborted);
    }

    #[test]
    fn fail_records_first_failure_only() {
        let mut session = text_session();
        session.fail(Failure::NoMoreTextExpected);
        session.fail(Failure::AlreadyPressed);
        assert!(session.is_finished());
        assert_eq!(session.failure(), Some(&Failure::NoMoreTextExpected));
    }

    #[test]
    fn pass_clears_failure() {
        let mut session = text_session();
        session.pass();
        assert!(session.is_finished());
        assert_eq!(session.failure(), None);
        assert_eq!(session.outcome(), SessionOutcome::Passed);
    }

    #[test]
    fn dispatch_applies_failing_verdict() {
        let mut session = text_session();
        session.dispatch(&text("%"));
        assert_eq!(
            session.outcome(),
            SessionOutcome::Failed(Failure::TextMismatch {
                expected: '$',
                received: "%".to_string(),
            })
        );
    }

    #[test]
    fn dispatch_ignores_events_after_finish() {
        let mut session = text_session();
        session.dispatch(&text("%"));
        let events = session.events_processed();
        session.dispatch(&text("$"));
        assert_eq!(session.events_processed(), events);
        assert_eq!(session.verifier().checks_passed(), 0);
    }

    #[test]
    fn dispatch_refreshes_question() {
        let mut session = text_session();
        session.dispatch(&press(key::KEY_4));
        assert!(session.question().contains('$'));
        session.dispatch(&text("$"));
        assert_eq!(session.question(), session.verifier().question());
        assert_eq!(session.prompt().checks_passed, 1);
    }

    #[test]
    fn outcome_converts_to_result() {
        assert_eq!(SessionOutcome::Passed.into_result(), Ok(()));
        let err = SessionOutcome::Aborted.into_result().unwrap_err();
        assert_eq!(err.to_string(), "Test aborted");
        let err = SessionOutcome::Failed(Failure::AlreadyPressed)
            .into_result()
            .unwrap_err();
        assert_eq!(err.to_string(), "Key already pressed, no release received.");
    }
}
