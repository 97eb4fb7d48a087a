//! Strengths and improvements
//!
//! Dimensions are ranked by score; ties resolve to the fixed presentation
//! order so output stays deterministic. Slots that no dimension qualifies
//! for are backfilled from missed opportunities and then from generic
//! templates, keeping the output shape stable for consumers.

use medvoice_config::{FeedbackTemplates, NarrativeTuning, ScoringLexicon};
use medvoice_core::{DetailedScores, Improvement, ScoreDimension, Strength, TranscriptAnalysis};

use crate::analysis::ProfessionalSpeech;

const MAX_STRENGTHS: usize = 3;
const IMPROVEMENT_COUNT: usize = 3;

pub(crate) fn build_strengths(
    scores: &DetailedScores,
    speech: &ProfessionalSpeech,
    lexicon: &ScoringLexicon,
    templates: &FeedbackTemplates,
    tuning: &NarrativeTuning,
) -> Vec<Strength> {
    let mut ranked: Vec<(ScoreDimension, u8)> = ScoreDimension::ALL
        .iter()
        .map(|d| (*d, scores.get(*d)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    let mut strengths: Vec<Strength> = ranked
        .iter()
        .filter(|(_, score)| i32::from(*score) >= tuning.strength_min_score)
        .take(MAX_STRENGTHS)
        .map(|(dimension, _)| Strength {
            category: dimension.label().to_string(),
            observation: templates.strength_observation(*dimension).to_string(),
            examples: evidence_quotes(*dimension, speech, lexicon, tuning.max_strength_examples),
        })
        .collect();

    for generic in &templates.generic_strengths {
        if strengths.len() >= MAX_STRENGTHS {
            break;
        }
        if !strengths.iter().any(|s| s.category == generic.category) {
            strengths.push(generic.clone());
        }
    }
    strengths
}

pub(crate) fn build_improvements(
    scores: &DetailedScores,
    analysis: &TranscriptAnalysis,
    templates: &FeedbackTemplates,
    tuning: &NarrativeTuning,
) -> Vec<Improvement> {
    let mut ranked: Vec<(ScoreDimension, u8)> = ScoreDimension::ALL
        .iter()
        .map(|d| (*d, scores.get(*d)))
        .collect();
    ranked.sort_by(|a, b| a.1.cmp(&b.1));

    let mut improvements: Vec<Improvement> = ranked
        .iter()
        .filter(|(_, score)| i32::from(*score) <= tuning.improvement_max_score)
        .take(IMPROVEMENT_COUNT)
        .filter_map(|(dimension, _)| {
            templates.improvement_for(*dimension).map(|t| Improvement {
                category: t.category.clone(),
                observation: t.observation.clone(),
                suggestion: t.suggestion.clone(),
                example: t.example.clone(),
            })
        })
        .collect();

    for opportunity in &analysis.missed_opportunities {
        if improvements.len() >= IMPROVEMENT_COUNT {
            break;
        }
        improvements.push(templates.improvement_from_opportunity(opportunity));
    }

    for generic in &templates.generic_improvements {
        if improvements.len() >= IMPROVEMENT_COUNT {
            break;
        }
        if !improvements.iter().any(|i| i.category == generic.category) {
            improvements.push(Improvement {
                category: generic.category.clone(),
                observation: generic.observation.clone(),
                suggestion: generic.suggestion.clone(),
                example: generic.example.clone(),
            });
        }
    }
    improvements
}

/// Verbatim professional-line quotes evidencing a strong dimension.
fn evidence_quotes(
    dimension: ScoreDimension,
    speech: &ProfessionalSpeech,
    lexicon: &ScoringLexicon,
    limit: usize,
) -> Vec<String> {
    let phrase_tables: Vec<&[String]> = match dimension {
        ScoreDimension::ClinicalCommunication => {
            vec![&lexicon.explanation_markers, &lexicon.decision_phrases]
        }
        ScoreDimension::Empathy => vec![&lexicon.empathy_indicators, &lexicon.warm_phrases],
        ScoreDimension::Grammar => vec![&lexicon.formal_register_markers],
        ScoreDimension::PatientEducation => {
            vec![&lexicon.instruction_markers, &lexicon.understanding_checks]
        }
        ScoreDimension::Pronunciation => {
            vec![&lexicon.connector_words, &lexicon.confidence_words]
        }
        ScoreDimension::Vocabulary => {
            vec![&lexicon.general_medical_terms, &lexicon.simple_language_markers]
        }
    };

    speech
        .lines
        .iter()
        .filter(|line| {
            let lower = line.to_lowercase();
            phrase_tables
                .iter()
                .any(|table| table.iter().any(|p| lower.contains(p.as_str())))
        })
        .take(limit)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use medvoice_core::Profession;

    fn fixtures() -> (ScoringLexicon, FeedbackTemplates, NarrativeTuning) {
        (
            ScoringLexicon::default(),
            FeedbackTemplates::default(),
            NarrativeTuning::default(),
        )
    }

    #[test]
    fn high_scores_become_strengths_with_quotes() {
        let (lexicon, templates, tuning) = fixtures();
        let scores = DetailedScores {
            pronunciation: 60,
            grammar: 60,
            vocabulary: 60,
            clinical_communication: 60,
            empathy: 92,
            patient_education: 60,
        };
        let speech = ProfessionalSpeech::isolate(
            "Doctor: I understand how hard this is.\nDoctor: Please take your time.",
            Profession::Doctor,
        );
        let strengths = build_strengths(&scores, &speech, &lexicon, &templates, &tuning);
        assert_eq!(strengths.len(), 3);
        assert_eq!(strengths[0].category, "Empathy");
        assert_eq!(
            strengths[0].examples,
            vec![
                "I understand how hard this is.".to_string(),
                "Please take your time.".to_string(),
            ]
        );
        // Backfill entries carry no quotes.
        assert!(strengths[1].examples.is_empty());
    }

    #[test]
    fn strengths_never_exceed_three() {
        let (lexicon, templates, tuning) = fixtures();
        let scores = DetailedScores {
            pronunciation: 95,
            grammar: 95,
            vocabulary: 95,
            clinical_communication: 95,
            empathy: 95,
            patient_education: 95,
        };
        let speech = ProfessionalSpeech::isolate("Doctor: Hello.", Profession::Doctor);
        let strengths = build_strengths(&scores, &speech, &lexicon, &templates, &tuning);
        assert_eq!(strengths.len(), 3);
        // Ties resolve to fixed presentation order.
        assert_eq!(strengths[0].category, "Clinical Communication");
        assert_eq!(strengths[1].category, "Empathy");
    }

    #[test]
    fn weak_dimensions_lead_improvements() {
        let (_, templates, tuning) = fixtures();
        let scores = DetailedScores {
            pronunciation: 85,
            grammar: 85,
            vocabulary: 85,
            clinical_communication: 85,
            empathy: 50,
            patient_education: 85,
        };
        let analysis = TranscriptAnalysis {
            missed_opportunities: vec![
                "Missed chance to acknowledge the patient's anxiety".to_string(),
                "No check of the patient's understanding before closing".to_string(),
            ],
            ..TranscriptAnalysis::default()
        };
        let improvements = build_improvements(&scores, &analysis, &templates, &tuning);
        assert_eq!(improvements.len(), 3);
        assert_eq!(improvements[0].category, "Empathy");
        assert_eq!(improvements[1].category, "Missed Opportunity");
        assert!(improvements[1].example.contains("concerned"));
    }

    #[test]
    fn generic_backfill_fills_to_exactly_three() {
        let (_, templates, tuning) = fixtures();
        let scores = DetailedScores {
            pronunciation: 90,
            grammar: 90,
            vocabulary: 90,
            clinical_communication: 90,
            empathy: 90,
            patient_education: 90,
        };
        let analysis = TranscriptAnalysis::default();
        let improvements = build_improvements(&scores, &analysis, &templates, &tuning);
        assert_eq!(improvements.len(), 3);
        assert_eq!(improvements[0].category, "Active Listening");
    }
}
