//! Key Event Harness - interactive keyboard event verification
//!
//! Shows a prompt, waits for a human operator to press key combinations or
//! type characters, and checks that the press, release and text events the
//! window delivers match what was asked for.

pub mod config;
pub mod keyboard;
pub mod report;
pub mod session;
pub mod ui;
pub mod verifier;

pub use config::Config;
pub use session::{run, Session, SessionError, SessionOutcome};
pub use verifier::{KeyComboVerifier, TextInputVerifier, Verifier, VerifierContext};
