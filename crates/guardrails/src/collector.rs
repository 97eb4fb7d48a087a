//! Issue accumulation with monotonic severity

use medvoice_core::{Severity, ValidationResult};

/// Collects issues across one validation pass.
///
/// Severity only ratchets upward: once a check raises `critical`, no later
/// check can lower it. Confidence degrades with each issue found.
#[derive(Debug, Default)]
pub(crate) struct IssueCollector {
    issues: Vec<String>,
    severity: Severity,
}

const VALID_CONFIDENCE: f32 = 0.95;
const BASE_INVALID_CONFIDENCE: f32 = 0.9;
const CONFIDENCE_STEP: f32 = 0.1;
const MIN_CONFIDENCE: f32 = 0.3;

impl IssueCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: impl Into<String>, at_least: Severity) {
        self.issues.push(issue.into());
        self.severity = self.severity.max(at_least);
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }

    fn confidence(&self) -> f32 {
        if self.issues.is_empty() {
            VALID_CONFIDENCE
        } else {
            (BASE_INVALID_CONFIDENCE - CONFIDENCE_STEP * self.issues.len() as f32)
                .max(MIN_CONFIDENCE)
        }
    }

    /// Finish the pass. `substitute` is consulted only when issues exist.
    pub fn into_result(self, substitute: Option<String>) -> ValidationResult {
        let confidence = self.confidence();
        if self.issues.is_empty() {
            return ValidationResult::valid(confidence);
        }
        match substitute {
            Some(text) => ValidationResult::invalid(self.issues, self.severity, text, confidence),
            None => {
                ValidationResult::invalid_without_substitute(self.issues, self.severity, confidence)
            }
        }
    }
}
