//! Feedback-object checks
//!
//! Structural validation of AI-authored feedback: required fields, score
//! ranges, verbatim quote verification against the transcript, and a lexical
//! constructive-phrasing filter. A failure here routes the draft into the
//! correction merge, so no substitute text is produced.

use std::collections::HashSet;

use medvoice_config::GuardrailLexicon;
use medvoice_core::{FeedbackDraft, Severity};

use crate::collector::IssueCollector;
use crate::contains_any;

const SCORE_NAMES: [&str; 6] = [
    "pronunciation",
    "grammar",
    "vocabulary",
    "clinical_communication",
    "empathy",
    "patient_education",
];

/// Fields whose content failed a check. The correction merge must replace a
/// rejected field even when it is structurally present, otherwise fabricated
/// quotes or harsh phrasing would reach the learner verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectedFields {
    pub strengths: bool,
    pub improvements: bool,
}

pub(crate) fn run_checks(
    draft: &FeedbackDraft,
    transcript: &str,
    lexicon: &GuardrailLexicon,
) -> (IssueCollector, RejectedFields) {
    let mut issues = IssueCollector::new();
    let mut rejected = RejectedFields::default();

    for field in draft.missing_fields() {
        issues.push(format!("Missing required field: {field}"), Severity::Critical);
    }

    if let Some(score) = draft.overall_score {
        if !(0..=100).contains(&score) {
            issues.push(
                format!("Score out of range: overall_score ({score})"),
                Severity::High,
            );
        }
    }
    if let Some(scores) = &draft.detailed_scores {
        let present: HashSet<&str> = scores.present().map(|(name, _)| name).collect();
        for name in SCORE_NAMES {
            if !present.contains(name) {
                issues.push(format!("Missing detailed score: {name}"), Severity::High);
            }
        }
        for (name, value) in scores.present() {
            if !(0..=100).contains(&value) {
                issues.push(
                    format!("Score out of range: {name} ({value})"),
                    Severity::High,
                );
            }
        }
    }

    let transcript_lower = transcript.to_lowercase();
    if let Some(strengths) = &draft.strengths {
        for strength in strengths {
            for example in &strength.examples {
                if !transcript_lower.contains(example.to_lowercase().as_str()) {
                    issues.push(
                        format!("Example quote not found in transcript: \"{example}\""),
                        Severity::Medium,
                    );
                    rejected.strengths = true;
                }
            }
            if check_phrasing(&strength.observation, lexicon, &mut issues) {
                rejected.strengths = true;
            }
        }
    }
    if let Some(improvements) = &draft.improvements {
        for improvement in improvements {
            let harsh_observation = check_phrasing(&improvement.observation, lexicon, &mut issues);
            let harsh_suggestion = check_phrasing(&improvement.suggestion, lexicon, &mut issues);
            if harsh_observation || harsh_suggestion {
                rejected.improvements = true;
            }
        }
    }

    (issues, rejected)
}

fn check_phrasing(text: &str, lexicon: &GuardrailLexicon, issues: &mut IssueCollector) -> bool {
    if let Some(word) = contains_any(&text.to_lowercase(), &lexicon.harsh_feedback_words) {
        issues.push(
            format!("Feedback phrasing is not constructive: contains \"{word}\""),
            Severity::Medium,
        );
        return true;
    }
    false
}
