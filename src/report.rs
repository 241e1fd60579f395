//! Session report and export functionality

use crate::session::{Session, SessionOutcome};
use crate::verifier::Verifier;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Complete session report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    /// Report metadata
    pub metadata: ReportMetadata,
    /// What happened
    pub summary: SessionSummary,
}

/// Report metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Report generation timestamp
    pub generated_at: String,
    /// Application version
    pub version: String,
    /// Session duration in seconds
    pub duration_secs: f64,
}

/// Session summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummary {
    /// Verifier that ran
    pub verifier: String,
    /// "passed", "failed" or "aborted"
    pub outcome: String,
    /// Failure message when the outcome is "failed"
    pub failure: Option<String>,
    pub checks_passed: u32,
    pub number_of_checks: u32,
    /// Input events the verifier saw
    pub events_processed: u64,
}

impl SessionReport {
    pub fn new<V: Verifier>(session: &Session<V>, outcome: &SessionOutcome) -> Self {
        let now: DateTime<Utc> = Utc::now();
        let verifier = session.verifier();
        let failure = match outcome {
            SessionOutcome::Failed(failure) => Some(failure.to_string()),
            _ => None,
        };

        Self {
            metadata: ReportMetadata {
                generated_at: now.to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                duration_secs: session.elapsed().as_secs_f64(),
            },
            summary: SessionSummary {
                verifier: verifier.name().to_string(),
                outcome: outcome.as_str().to_string(),
                failure,
                checks_passed: verifier.checks_passed(),
                number_of_checks: verifier.number_of_checks(),
                events_processed: session.events_processed(),
            },
        }
    }

    /// Export report to JSON file
    pub fn export_json(&self, path: &Path) -> std::io::Result<()> {
        let json = self
            .to_json()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Export report to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::test_helpers::*;
    use crate::verifier::{TextChallenge, TextInputVerifier};

    #[test]
    fn failed_session_report_carries_message() {
        let mut session = Session::new(TextInputVerifier::new(seeded_context()));
        session.verifier_mut().set_challenge(TextChallenge::new('a'));
        session.dispatch(&text("b"));
        let report = SessionReport::new(&session, &session.outcome());

        assert_eq!(report.summary.verifier, "Text Input");
        assert_eq!(report.summary.outcome, "failed");
        assert_eq!(
            report.summary.failure.as_deref(),
            Some("Expected \"a\", received \"b\"")
        );
        assert_eq!(report.summary.events_processed, 1);
        assert_eq!(report.summary.number_of_checks, 10);
    }

    #[test]
    fn report_serializes_to_json() {
        let session = Session::new(TextInputVerifier::new(seeded_context()));
        let report = SessionReport::new(&session, &SessionOutcome::Aborted);
        let json = report.to_json().expect("serialize");

        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["summary"]["outcome"], "aborted");
        assert!(value["summary"]["failure"].is_null());
        assert_eq!(value["metadata"]["version"], env!("CARGO_PKG_VERSION"));
    }
}
