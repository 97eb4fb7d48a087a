//! Rule-based guardrails engine
//!
//! Two pure, stateless validation contracts plus a deterministic sanitizer.
//! Patient-response validation keeps simulated-patient dialogue safe and
//! in character; feedback validation checks the structure and honesty of
//! AI-authored feedback before it reaches a learner. A failed validation is
//! a normal return value, never an error.

mod collector;
mod engine;
mod feedback;
mod patient;
mod sanitizer;

pub use engine::{FeedbackValidation, GuardrailsEngine};
pub use feedback::RejectedFields;
pub use sanitizer::ResponseKind;

/// First phrase from `phrases` found in `text`, if any.
///
/// `text` must already be lowercase; phrase tables are stored lowercase.
pub(crate) fn contains_any<'a>(text: &str, phrases: &'a [String]) -> Option<&'a str> {
    phrases
        .iter()
        .find(|p| text.contains(p.as_str()))
        .map(|p| p.as_str())
}

/// Total whole-word occurrences of all phrases, counting repeats. A hit must
/// sit on non-alphanumeric boundaries so short words like "fine" do not
/// match inside "refined".
pub(crate) fn count_hits(text: &str, phrases: &[String]) -> usize {
    phrases
        .iter()
        .map(|p| {
            text.match_indices(p.as_str())
                .filter(|(start, matched)| {
                    let before = text[..*start].chars().next_back();
                    let after = text[start + matched.len()..].chars().next();
                    before.map_or(true, |c| !c.is_alphanumeric())
                        && after.map_or(true, |c| !c.is_alphanumeric())
                })
                .count()
        })
        .sum()
}
