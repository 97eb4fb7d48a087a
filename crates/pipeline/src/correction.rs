//! Correction merge for AI-authored feedback
//!
//! Parsed model feedback is untrusted; the scoring engine's deterministic
//! result is always available. This merge keeps each top-level field of the
//! draft only when it is present, structurally sound, and not rejected by a
//! content check (fabricated quotes, harsh phrasing), and replaces it with
//! the deterministic counterpart otherwise. Pure and total: any draft,
//! including none at all, yields complete feedback.

use tracing::debug;

use medvoice_core::{FeedbackContent, FeedbackDraft, ScoringResult};
use medvoice_guardrails::RejectedFields;

const MAX_STRENGTHS: usize = 3;
const MAX_IMPROVEMENTS: usize = 3;

pub fn correct(
    draft: Option<&FeedbackDraft>,
    scoring: &ScoringResult,
    rejected: RejectedFields,
) -> FeedbackContent {
    let deterministic = FeedbackContent::from(scoring);
    let Some(draft) = draft else {
        return deterministic;
    };

    let mut replaced: Vec<&str> = Vec::new();

    let overall_score = match draft.overall_score {
        Some(score) if (0..=100).contains(&score) => score as u8,
        _ => {
            replaced.push("overall_score");
            deterministic.overall_score
        }
    };

    let detailed_scores = match draft.detailed_scores.as_ref().and_then(|s| s.to_detailed()) {
        Some(scores) => scores,
        None => {
            replaced.push("detailed_scores");
            deterministic.detailed_scores
        }
    };

    let strengths = match &draft.strengths {
        Some(strengths) if !rejected.strengths => {
            let mut strengths = strengths.clone();
            strengths.truncate(MAX_STRENGTHS);
            strengths
        }
        _ => {
            replaced.push("strengths");
            deterministic.strengths
        }
    };

    let improvements = match &draft.improvements {
        Some(improvements) if !improvements.is_empty() && !rejected.improvements => {
            let mut improvements = improvements.clone();
            improvements.truncate(MAX_IMPROVEMENTS);
            improvements
        }
        _ => {
            replaced.push("improvements");
            deterministic.improvements
        }
    };

    let transcript_analysis = match &draft.transcript_analysis {
        Some(analysis) => analysis.clone(),
        None => {
            replaced.push("transcript_analysis");
            deterministic.transcript_analysis
        }
    };

    if !replaced.is_empty() {
        debug!(?replaced, "correction merge replaced draft fields");
    }

    FeedbackContent {
        overall_score,
        detailed_scores,
        strengths,
        improvements,
        transcript_analysis,
    }
}
