//! Keyword and pattern lexicons
//!
//! Both engines match against these fixed tables instead of embedded
//! constants, so a deployment can localize them or tests can inject
//! controlled vocabularies.

mod guardrail;
mod scoring;

pub use guardrail::{GuardrailLexicon, TermRewrite};
pub use scoring::{ChecklistItem, ScoringLexicon};

pub(crate) fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
