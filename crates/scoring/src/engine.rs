//! Scoring engine entry point

use std::sync::Arc;

use regex::Regex;
use tracing::{debug, warn};

use medvoice_config::CoachConfig;
use medvoice_core::{ComponentHealth, PatientPersona, Profession, ScoringResult};

use crate::analysis::{self, ProfessionalSpeech};
use crate::dimensions::{self, DimensionContext};
use crate::narrative;

/// Deterministic transcript scorer.
///
/// Holds immutable configuration and the pattern tables compiled from it.
/// Invalid patterns are skipped with a warning at construction; everything
/// after that is pure and infallible.
pub struct ScoringEngine {
    config: Arc<CoachConfig>,
    grammar_errors: Vec<Regex>,
    complex_structures: Vec<Regex>,
}

impl ScoringEngine {
    pub fn new(config: Arc<CoachConfig>) -> Self {
        let grammar_errors =
            compile_patterns(&config.scoring_lexicon.grammar_error_patterns, "grammar_error");
        let complex_structures = compile_patterns(
            &config.scoring_lexicon.complex_structure_patterns,
            "complex_structure",
        );
        Self {
            config,
            grammar_errors,
            complex_structures,
        }
    }

    /// Score a transcript against a persona.
    ///
    /// Pure and idempotent: identical inputs return identical results.
    /// `duration_seconds` is recorded for observability but does not enter
    /// the score arithmetic; text evidence alone drives the rubric.
    pub fn calculate_scores(
        &self,
        transcript: &str,
        persona: &PatientPersona,
        duration_seconds: u32,
        profession: Profession,
    ) -> ScoringResult {
        let lexicon = &self.config.scoring_lexicon;
        let speech = ProfessionalSpeech::isolate(transcript, profession);
        let transcript_analysis = analysis::analyze(transcript, &speech, persona, lexicon);

        let detailed_scores = dimensions::score_all(&DimensionContext {
            speech: &speech,
            analysis: &transcript_analysis,
            persona,
            lexicon,
            tuning: &self.config.tuning,
            grammar_errors: &self.grammar_errors,
            complex_structures: &self.complex_structures,
        });
        let overall_score = self.config.weights.overall(&detailed_scores);

        // An empty professional side gives the narrative nothing to coach on.
        let (strengths, improvements) = if speech.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            (
                narrative::build_strengths(
                    &detailed_scores,
                    &speech,
                    lexicon,
                    &self.config.templates,
                    &self.config.tuning.narrative,
                ),
                narrative::build_improvements(
                    &detailed_scores,
                    &transcript_analysis,
                    &self.config.templates,
                    &self.config.tuning.narrative,
                ),
            )
        };

        debug!(
            overall_score,
            duration_seconds,
            total_words = transcript_analysis.total_words,
            professional_lines = speech.lines.len(),
            "scored transcript"
        );

        ScoringResult {
            overall_score,
            detailed_scores,
            strengths,
            improvements,
            transcript_analysis,
        }
    }

    /// End-to-end self-test against an embedded fixture.
    pub fn health_check(&self) -> ComponentHealth {
        let persona = PatientPersona::new("Fixture", 52, "hypertension");
        let result = self.calculate_scores(
            "Doctor: Hello, what brings you in today?\n\
             Patient: My blood pressure readings have been high.\n\
             Doctor: I understand, that must be worrying. Let me explain what we can do.",
            &persona,
            60,
            Profession::Doctor,
        );
        if result.overall_score <= 100 && result.detailed_scores.all_in_range() {
            ComponentHealth::ok()
        } else {
            ComponentHealth::failing("fixture scoring produced out-of-range values")
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
