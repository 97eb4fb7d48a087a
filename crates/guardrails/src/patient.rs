//! Patient-response checks
//!
//! Six check groups run in fixed order against a simulated patient's reply.
//! Each contributes issues at a minimum severity; the collector keeps the
//! pass monotonic so a critical safety hit dominates everything after it.

use once_cell::sync::Lazy;
use regex::Regex;

use medvoice_config::GuardrailLexicon;
use medvoice_core::{PatientPersona, Severity, Turn, TurnRole};

use crate::collector::IssueCollector;
use crate::{contains_any, count_hits};

const MIN_WORDS: usize = 10;
const MAX_WORDS: usize = 100;

static AGE_CLAIM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:i am|i'm)\s+(\d{1,3})\s*(?:years?\s*old)?\b")
        .expect("valid age-claim pattern")
});

/// Denial phrasings checked against prior patient turns, per symptom.
const DENIAL_FORMS: [&str; 3] = ["no {}", "don't have {}", "haven't had {}"];

pub(crate) struct PatientChecks<'a> {
    pub lexicon: &'a GuardrailLexicon,
    pub advice: &'a [Regex],
    pub pii: &'a [Regex],
}

#[derive(Debug, PartialEq, Eq)]
enum DetectedTone {
    Anxious,
    Calm,
    Frustrated,
    Neutral,
}

impl PatientChecks<'_> {
    pub fn run(
        &self,
        response: &str,
        persona: &PatientPersona,
        history: &[Turn],
    ) -> IssueCollector {
        let mut issues = IssueCollector::new();
        let lower = response.to_lowercase();

        self.check_length(response, &mut issues);
        self.check_prohibited(response, &lower, &mut issues);
        self.check_persona_consistency(&lower, persona, history, &mut issues);
        self.check_medical_consistency(&lower, persona, &mut issues);
        self.check_tone(&lower, persona, &mut issues);
        self.check_context(&lower, &mut issues);

        issues
    }

    fn check_length(&self, response: &str, issues: &mut IssueCollector) {
        let words = response.split_whitespace().count();
        if words < MIN_WORDS {
            issues.push(
                format!("Response too short (minimum {MIN_WORDS} words)"),
                Severity::Medium,
            );
        } else if words > MAX_WORDS {
            issues.push(
                format!("Response too long (maximum {MAX_WORDS} words)"),
                Severity::Medium,
            );
        }
    }

    fn check_prohibited(&self, response: &str, lower: &str, issues: &mut IssueCollector) {
        if self.advice.iter().any(|re| re.is_match(response)) {
            issues.push(
                "Contains prohibited advice-giving language",
                Severity::Critical,
            );
        }
        if self.pii.iter().any(|re| re.is_match(response)) {
            issues.push(
                "Contains personal identifying information",
                Severity::Critical,
            );
        }
        if let Some(phrase) = contains_any(lower, &self.lexicon.boundary_violation_phrases) {
            issues.push(
                format!("Crosses the patient-professional boundary: \"{phrase}\""),
                Severity::Medium,
            );
        }
    }

    fn check_persona_consistency(
        &self,
        lower: &str,
        persona: &PatientPersona,
        history: &[Turn],
        issues: &mut IssueCollector,
    ) {
        if persona.is_minor() {
            if let Some(phrase) = contains_any(lower, &self.lexicon.adult_register_phrases) {
                issues.push(
                    format!("Adult-register language for a minor patient: \"{phrase}\""),
                    Severity::High,
                );
            }
        }
        if let Some(phrase) = contains_any(lower, &self.lexicon.cultural_blocklist) {
            issues.push(
                format!("Contains culturally insensitive language: \"{phrase}\""),
                Severity::High,
            );
        }
        if let Some(claim) = AGE_CLAIM
            .captures(lower)
            .and_then(|c| c.get(1)?.as_str().parse::<u32>().ok())
        {
            if claim != u32::from(persona.age) {
                issues.push(
                    format!(
                        "Stated age {claim} contradicts the patient's age {}",
                        persona.age
                    ),
                    Severity::High,
                );
            }
        }

        let prior: String = history
            .iter()
            .filter(|t| t.role == TurnRole::Patient)
            .map(|t| t.text.to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");
        for symptom in &self.lexicon.symptom_vocabulary {
            if !lower.contains(symptom.as_str()) {
                continue;
            }
            let denied = DENIAL_FORMS
                .iter()
                .any(|form| prior.contains(form.replace("{}", symptom).as_str()));
            if denied {
                issues.push(
                    format!("Affirms \"{symptom}\" after denying it in an earlier turn"),
                    Severity::High,
                );
            }
        }
    }

    /// Symptoms and medications mentioned must be a subset of the persona's
    /// declared sets; an invented complaint breaks the simulation.
    fn check_medical_consistency(
        &self,
        lower: &str,
        persona: &PatientPersona,
        issues: &mut IssueCollector,
    ) {
        let declared_symptoms: Vec<String> = persona
            .current_symptoms
            .iter()
            .map(|s| s.to_lowercase())
            .collect();
        for symptom in &self.lexicon.symptom_vocabulary {
            if lower.contains(symptom.as_str())
                && !declared_symptoms
                    .iter()
                    .any(|d| d == symptom || d.contains(symptom.as_str()))
            {
                issues.push(
                    format!("Mentions symptom not in the patient profile: \"{symptom}\""),
                    Severity::Medium,
                );
            }
        }

        let declared_medications: Vec<String> = persona
            .medications
            .iter()
            .map(|m| m.to_lowercase())
            .collect();
        for medication in &self.lexicon.medication_vocabulary {
            if lower.contains(medication.as_str())
                && !declared_medications
                    .iter()
                    .any(|d| d == medication || d.contains(medication.as_str()))
            {
                issues.push(
                    format!("Mentions medication not in the patient profile: \"{medication}\""),
                    Severity::Medium,
                );
            }
        }
    }

    fn check_tone(&self, lower: &str, persona: &PatientPersona, issues: &mut IssueCollector) {
        let detected = self.detect_tone(lower);
        let expects_distress = persona.expects_distressed_tone();
        match detected {
            DetectedTone::Calm if expects_distress => issues.push(
                "Calm, untroubled tone is inconsistent with the patient's emotional state",
                Severity::Medium,
            ),
            DetectedTone::Anxious if !expects_distress => issues.push(
                "Anxious tone is inconsistent with a calm patient",
                Severity::Medium,
            ),
            DetectedTone::Frustrated
                if persona.emotional_state != medvoice_core::EmotionalState::Frustrated =>
            {
                issues.push(
                    "Frustrated tone is inconsistent with the patient's emotional state",
                    Severity::Medium,
                )
            }
            _ => {}
        }
    }

    fn detect_tone(&self, lower: &str) -> DetectedTone {
        let anxious = count_hits(lower, &self.lexicon.anxious_tone_words);
        let calm = count_hits(lower, &self.lexicon.calm_tone_words);
        let frustrated = count_hits(lower, &self.lexicon.frustrated_tone_words);
        let top = anxious.max(calm).max(frustrated);
        if top == 0 {
            DetectedTone::Neutral
        } else if anxious == top {
            DetectedTone::Anxious
        } else if frustrated == top {
            DetectedTone::Frustrated
        } else {
            DetectedTone::Calm
        }
    }

    fn check_context(&self, lower: &str, issues: &mut IssueCollector) {
        if contains_any(lower, &self.lexicon.healthcare_context_terms).is_none() {
            issues.push(
                "Response lacks healthcare context",
                Severity::Medium,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medvoice_core::EmotionalState;

    fn checks(lexicon: &GuardrailLexicon) -> PatientChecks<'_> {
        PatientChecks {
            lexicon,
            advice: &[],
            pii: &[],
        }
    }

    fn persona() -> PatientPersona {
        let mut p = PatientPersona::new("Ana", 55, "hypertension");
        p.current_symptoms = vec!["headache".into(), "dizziness".into()];
        p.medications = vec!["lisinopril".into()];
        p
    }

    #[test]
    fn short_response_issue_wording() {
        let lexicon = GuardrailLexicon::default();
        let issues = checks(&lexicon).run("I feel sick today.", &persona(), &[]);
        let result = issues.into_result(Some("sub".into()));
        assert!(result
            .issues
            .contains(&"Response too short (minimum 10 words)".to_string()));
        assert!(result.severity >= Severity::Medium);
    }

    #[test]
    fn clean_response_passes() {
        let lexicon = GuardrailLexicon::default();
        let response =
            "Doctor, the headache has been bothering me since Monday and I feel quite unwell.";
        let result = checks(&lexicon)
            .run(response, &persona(), &[])
            .into_result(None);
        assert!(result.is_valid, "unexpected issues: {:?}", result.issues);
    }

    #[test]
    fn undeclared_symptom_is_flagged() {
        let lexicon = GuardrailLexicon::default();
        let response =
            "Doctor, I have had chest pain and a headache since my appointment last week.";
        let result = checks(&lexicon)
            .run(response, &persona(), &[])
            .into_result(Some("sub".into()));
        assert!(!result.is_valid);
        assert!(result
            .issues
            .iter()
            .any(|i| i.contains("chest pain")));
    }

    #[test]
    fn age_contradiction_detected() {
        let lexicon = GuardrailLexicon::default();
        let response = "I'm 30 years old and my headache medicine has not helped me at all.";
        let result = checks(&lexicon)
            .run(response, &persona(), &[])
            .into_result(Some("sub".into()));
        assert!(result.issues.iter().any(|i| i.contains("Stated age 30")));
        assert_eq!(result.severity, Severity::High);
    }

    #[test]
    fn denied_then_affirmed_symptom() {
        let lexicon = GuardrailLexicon::default();
        let history = vec![
            Turn::professional("Any nausea?"),
            Turn::patient("No nausea at all, doctor, just the headache bothering me."),
        ];
        let mut persona = persona();
        persona.current_symptoms.push("nausea".into());
        let response = "The nausea has been terrible since this morning, doctor, I feel sick.";
        let result = checks(&lexicon)
            .run(response, &persona, &history)
            .into_result(Some("sub".into()));
        assert!(result
            .issues
            .iter()
            .any(|i| i.contains("after denying")));
    }

    #[test]
    fn calm_tone_flagged_for_worried_persona() {
        let lexicon = GuardrailLexicon::default();
        let mut p = persona();
        p.emotional_state = EmotionalState::Worried;
        let response =
            "Everything is fine doctor, I feel relaxed and comfortable about the headache.";
        let result = checks(&lexicon).run(response, &p, &[]).into_result(None);
        assert!(result
            .issues
            .iter()
            .any(|i| i.contains("inconsistent with the patient's emotional state")));
    }

    #[test]
    fn minor_with_adult_register() {
        let lexicon = GuardrailLexicon::default();
        let mut p = PatientPersona::new("Sam", 14, "asthma");
        p.current_symptoms = vec!["wheezing".into()];
        let response = "My wife says the wheezing gets worse at night when I try to sleep.";
        let result = checks(&lexicon).run(response, &p, &[]).into_result(None);
        assert!(result.issues.iter().any(|i| i.contains("minor")));
        assert_eq!(result.severity, Severity::High);
    }
}
