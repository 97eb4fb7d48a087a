//! Validation result types
//!
//! A failed validation is a normal value, not an error. `is_valid` is true
//! exactly when `issues` is empty, and the constructors make any other
//! combination unrepresentable.

use serde::{Deserialize, Serialize};

/// Ordinal severity of a validation issue. `critical` dominates; severity
/// never downgrades within one validation pass.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
            Severity::Critical => "critical",
        }
    }
}

/// Outcome of one guardrails validation call. Produced per call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub issues: Vec<String>,
    pub severity: Severity,
    /// Populated iff `!is_valid`: deterministic rule-based substitution of
    /// the offending text, always usable.
    pub sanitized_response: Option<String>,
    pub confidence: f32,
}

impl ValidationResult {
    pub fn valid(confidence: f32) -> Self {
        Self {
            is_valid: true,
            issues: Vec::new(),
            severity: Severity::Low,
            sanitized_response: None,
            confidence,
        }
    }

    pub fn invalid(
        issues: Vec<String>,
        severity: Severity,
        sanitized_response: impl Into<String>,
        confidence: f32,
    ) -> Self {
        debug_assert!(!issues.is_empty());
        Self {
            is_valid: false,
            issues,
            severity,
            sanitized_response: Some(sanitized_response.into()),
            confidence,
        }
    }

    /// Invalid result with no substitute text, for structural feedback checks
    /// where the correction merge supplies the replacement instead.
    pub fn invalid_without_substitute(
        issues: Vec<String>,
        severity: Severity,
        confidence: f32,
    ) -> Self {
        debug_assert!(!issues.is_empty());
        Self {
            is_valid: false,
            issues,
            severity,
            sanitized_response: None,
            confidence,
        }
    }

    pub fn is_critical(&self) -> bool {
        self.severity == Severity::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
        assert_eq!(Severity::Critical.max(Severity::Low), Severity::Critical);
    }

    #[test]
    fn valid_result_has_no_issues_or_substitute() {
        let result = ValidationResult::valid(0.95);
        assert!(result.is_valid);
        assert!(result.issues.is_empty());
        assert!(result.sanitized_response.is_none());
    }

    #[test]
    fn invalid_result_carries_substitute() {
        let result = ValidationResult::invalid(
            vec!["Response too short (minimum 10 words)".into()],
            Severity::Medium,
            "I see. Could you tell me more about that?",
            0.8,
        );
        assert!(!result.is_valid);
        assert_eq!(result.is_valid, result.issues.is_empty());
        assert!(result.sanitized_response.is_some());
    }
}
