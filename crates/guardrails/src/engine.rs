//! Guardrails engine entry point

use std::sync::Arc;

use regex::Regex;
use tracing::{debug, warn};

use medvoice_config::CoachConfig;
use medvoice_core::{ComponentHealth, FeedbackDraft, PatientPersona, Turn, ValidationResult};

use crate::feedback::{self, RejectedFields};
use crate::patient::PatientChecks;
use crate::sanitizer::Sanitizer;
use crate::ResponseKind;

/// Outcome of feedback validation: the structural verdict plus the fields
/// whose content must not survive the correction merge.
#[derive(Debug, Clone)]
pub struct FeedbackValidation {
    pub result: ValidationResult,
    pub rejected_fields: RejectedFields,
}

/// Stateless validator over immutable configuration.
///
/// All pattern tables are compiled once at construction; invalid patterns
/// are skipped with a warning. Every method is pure with respect to the
/// engine's state and safe to call from concurrent requests.
pub struct GuardrailsEngine {
    config: Arc<CoachConfig>,
    advice: Vec<Regex>,
    pii: Vec<Regex>,
    role_markers: Vec<Regex>,
    profanity: Vec<Regex>,
    harsh_words: Vec<Regex>,
    rewrites: Vec<(Regex, String)>,
}

impl GuardrailsEngine {
    pub fn new(config: Arc<CoachConfig>) -> Self {
        let lexicon = &config.guardrail_lexicon;
        let advice = compile_patterns(&lexicon.advice_patterns, "advice");
        let pii = compile_patterns(&lexicon.pii_patterns, "pii");
        let role_markers = compile_patterns(&lexicon.role_marker_patterns, "role_marker");
        let profanity = compile_word_patterns(&lexicon.profanity, "profanity");
        let harsh_words = compile_word_patterns(&lexicon.harsh_feedback_words, "harsh_feedback");
        let rewrites = lexicon
            .plain_language_rewrites
            .iter()
            .filter_map(|rewrite| {
                let pattern = format!(r"(?i)\b{}\b", regex::escape(&rewrite.from));
                match Regex::new(&pattern) {
                    Ok(re) => Some((re, rewrite.to.clone())),
                    Err(error) => {
                        warn!(term = %rewrite.from, %error, "skipping invalid rewrite");
                        None
                    }
                }
            })
            .collect();
        Self {
            config,
            advice,
            pii,
            role_markers,
            profanity,
            harsh_words,
            rewrites,
        }
    }

    /// Validate a simulated patient's reply against its persona and the
    /// conversation so far. Invalid results carry a sanitized substitute.
    pub fn validate_patient_response(
        &self,
        response: &str,
        persona: &PatientPersona,
        history: &[Turn],
    ) -> ValidationResult {
        let checks = PatientChecks {
            lexicon: &self.config.guardrail_lexicon,
            advice: &self.advice,
            pii: &self.pii,
        };
        let issues = checks.run(response, persona, history);
        let substitute = (!issues.is_empty())
            .then(|| self.sanitize_response(response, ResponseKind::PatientVoice));
        let result = issues.into_result(substitute);
        debug!(
            is_valid = result.is_valid,
            severity = result.severity.as_str(),
            issue_count = result.issues.len(),
            "validated patient response"
        );
        result
    }

    /// Validation of AI-authored feedback: structure, score ranges, quote
    /// verification, and the constructive-phrasing filter. Invalid results
    /// carry no substitute; the correction merge supplies the replacement,
    /// guided by `rejected_fields`.
    pub fn validate_feedback_response(
        &self,
        draft: &FeedbackDraft,
        transcript: &str,
    ) -> FeedbackValidation {
        let (issues, rejected_fields) =
            feedback::run_checks(draft, transcript, &self.config.guardrail_lexicon);
        let result = issues.into_result(None);
        debug!(
            is_valid = result.is_valid,
            severity = result.severity.as_str(),
            issue_count = result.issues.len(),
            "validated feedback draft"
        );
        FeedbackValidation {
            result,
            rejected_fields,
        }
    }

    /// Deterministic rule-based cleanup of text for the given voice.
    pub fn sanitize_response(&self, text: &str, kind: ResponseKind) -> String {
        let sanitizer = Sanitizer {
            role_markers: &self.role_markers,
            pii: &self.pii,
            advice: &self.advice,
            profanity: &self.profanity,
            harsh_words: &self.harsh_words,
            rewrites: &self.rewrites,
            patient_fallback: &self.config.pipeline.fallback_patient_reply,
        };
        sanitizer.sanitize(text, kind)
    }

    /// Self-test against embedded fixtures: a clean reply must pass and a
    /// gutted feedback draft must fail closed.
    pub fn health_check(&self) -> ComponentHealth {
        let mut persona = PatientPersona::new("Fixture", 55, "hypertension");
        persona.current_symptoms = vec!["headache".to_string()];
        let clean = self.validate_patient_response(
            "The headache has been bothering me since Monday, doctor, mostly in the mornings.",
            &persona,
            &[],
        );
        let gutted = self.validate_feedback_response(&FeedbackDraft::default(), "");
        if clean.is_valid && gutted.result.is_critical() {
            ComponentHealth::ok()
        } else {
            ComponentHealth::failing("fixture validation produced unexpected outcomes")
        }
    }
}

fn compile_patterns(patterns: &[String], table: &'static str) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(error) => {
                warn!(%pattern, table, %error, "skipping invalid pattern");
                None
            }
        })
        .collect()
}

fn compile_word_patterns(words: &[String], table: &'static str) -> Vec<Regex> {
    let patterns: Vec<String> = words
        .iter()
        .map(|w| format!(r"(?i)\b{}\b", regex::escape(w)))
        .collect();
    compile_patterns(&patterns, table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medvoice_core::Severity;

    fn engine() -> GuardrailsEngine {
        GuardrailsEngine::new(Arc::new(CoachConfig::default()))
    }

    fn persona() -> PatientPersona {
        let mut p = PatientPersona::new("Ana", 55, "hypertension");
        p.current_symptoms = vec!["headache".into(), "dizziness".into()];
        p
    }

    #[test]
    fn advice_is_critical_and_substituted() {
        let engine = engine();
        let response = "Honestly doctor, you should take aspirin every day like I do at home.";
        let result = engine.validate_patient_response(response, &persona(), &[]);
        assert!(!result.is_valid);
        assert_eq!(result.severity, Severity::Critical);
        let substitute = result.sanitized_response.unwrap();
        assert!(!substitute.to_lowercase().contains("you should take"));
    }

    #[test]
    fn is_valid_iff_issues_empty() {
        let engine = engine();
        let good = engine.validate_patient_response(
            "The headache has been bothering me since Monday, doctor, mostly in the mornings.",
            &persona(),
            &[],
        );
        assert_eq!(good.is_valid, good.issues.is_empty());
        assert!(good.is_valid);

        let bad = engine.validate_patient_response("Too short.", &persona(), &[]);
        assert_eq!(bad.is_valid, bad.issues.is_empty());
        assert!(!bad.is_valid);
        assert!(bad.sanitized_response.is_some());
    }

    #[test]
    fn pii_detected_and_redacted() {
        let engine = engine();
        let response =
            "My social security number is 123-45-6789, doctor, my headache is awful today.";
        let result = engine.validate_patient_response(response, &persona(), &[]);
        assert_eq!(result.severity, Severity::Critical);
        assert!(result.sanitized_response.unwrap().contains("[redacted]"));
    }

    #[test]
    fn feedback_validation_has_no_substitute() {
        let engine = engine();
        let validation = engine.validate_feedback_response(&FeedbackDraft::default(), "");
        assert!(!validation.result.is_valid);
        assert!(validation.result.sanitized_response.is_none());
        assert_eq!(validation.result.issues.len(), 5);
        assert_eq!(validation.rejected_fields, RejectedFields::default());
    }

    #[test]
    fn health_check_passes() {
        assert!(engine().health_check().healthy);
    }
}
