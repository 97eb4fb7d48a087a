//! The six sub-scores
//!
//! Each dimension starts from a fixed base and is adjusted by additive
//! bonuses and penalties from keyword and pattern hit-counts, then clamped
//! to [0, 100] independently of the others. All constants come from
//! `ScoringTuning` so the rubric stays adjustable without code changes.

use std::collections::HashSet;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use medvoice_config::{ScoringLexicon, ScoringTuning};
use medvoice_core::{DetailedScores, HealthLiteracy, PatientPersona, TranscriptAnalysis};

use crate::analysis::{occurrences, phrases_present, ProfessionalSpeech};

pub(crate) struct DimensionContext<'a> {
    pub speech: &'a ProfessionalSpeech,
    pub analysis: &'a TranscriptAnalysis,
    pub persona: &'a PatientPersona,
    pub lexicon: &'a ScoringLexicon,
    pub tuning: &'a ScoringTuning,
    pub grammar_errors: &'a [Regex],
    pub complex_structures: &'a [Regex],
}

pub(crate) fn score_all(ctx: &DimensionContext<'_>) -> DetailedScores {
    DetailedScores {
        pronunciation: pronunciation(ctx),
        grammar: grammar(ctx),
        vocabulary: vocabulary(ctx),
        clinical_communication: clinical_communication(ctx),
        empathy: empathy(ctx),
        patient_education: patient_education(ctx),
    }
}

fn clamp(score: i32) -> u8 {
    score.clamp(0, 100) as u8
}

fn clinical_communication(ctx: &DimensionContext<'_>) -> u8 {
    let t = &ctx.tuning.clinical;
    let text = &ctx.speech.lowercase;
    let mut score = ctx.tuning.base_score;

    let covered = ctx
        .lexicon
        .checklist
        .iter()
        .filter(|item| item.phrases.iter().any(|p| text.contains(p.as_str())))
        .count();
    let coverage = covered as f32 / ctx.lexicon.checklist.len() as f32;
    if coverage >= t.checklist_high_coverage {
        score += t.checklist_bonus;
    } else if coverage >= t.checklist_mid_coverage {
        score += t.checklist_partial_bonus;
    } else if coverage < t.checklist_low_coverage {
        score -= t.checklist_penalty;
    }

    let questions = ctx.analysis.question_types;
    if questions.open_ended >= 1 && questions.total() >= 3 {
        score += t.questioning_balance_bonus;
    } else if questions.total() > 0 && questions.open_ended == 0 {
        score -= t.questioning_balance_penalty;
    }

    score += tiered(
        phrases_present(text, &ctx.lexicon.explanation_markers),
        &t.explanation_tiers,
    );
    score += tiered(
        phrases_present(text, &ctx.lexicon.decision_phrases),
        &t.decision_tiers,
    );

    clamp(score)
}

fn empathy(ctx: &DimensionContext<'_>) -> u8 {
    let t = &ctx.tuning.empathy;
    let text = &ctx.speech.lowercase;
    let mut score = ctx.tuning.base_score;

    let acknowledgments = phrases_present(text, &ctx.lexicon.empathy_indicators);
    if acknowledgments >= 3 {
        score += t.acknowledgment_bonus;
    } else if acknowledgments >= 1 {
        score += t.acknowledgment_partial_bonus;
    } else {
        score -= t.acknowledgment_penalty;
    }

    let warm = phrases_present(text, &ctx.lexicon.warm_phrases);
    if warm >= 2 {
        score += t.warm_tone_bonus;
    } else if warm == 1 {
        score += t.warm_tone_partial_bonus;
    }
    let informal = occurrences(text, &ctx.lexicon.informal_phrases) as i32;
    score -= (informal * t.informal_penalty_per_hit).min(t.informal_penalty_cap);

    score += tiered(
        phrases_present(text, &ctx.lexicon.reassurance_phrases),
        &t.reassurance_tiers,
    );

    let sensitive = phrases_present(text, &ctx.lexicon.cultural_sensitivity_phrases) as i32;
    let insensitive = phrases_present(text, &ctx.lexicon.cultural_insensitive_phrases) as i32;
    score += sensitive * t.cultural_bonus_per_hit;
    score -= insensitive * t.cultural_penalty_per_hit;

    let mut score = clamp(score);
    // Without a single acknowledgment the dimension is capped: warmth alone
    // does not demonstrate empathy toward a distressed patient.
    if acknowledgments == 0 {
        score = score.min(clamp(t.no_acknowledgment_ceiling));
    }
    score
}

fn grammar(ctx: &DimensionContext<'_>) -> u8 {
    let t = &ctx.tuning.grammar;
    let text = &ctx.speech.lowercase;
    let mut score = ctx.tuning.base_score;

    let errors: i32 = ctx
        .grammar_errors
        .iter()
        .map(|re| re.find_iter(text).count() as i32)
        .sum();
    score -= (errors * t.error_penalty_per_hit).min(t.error_penalty_cap);

    let complex: i32 = ctx
        .complex_structures
        .iter()
        .map(|re| re.find_iter(text).count() as i32)
        .sum();
    score += (complex * t.complex_bonus_per_hit).min(t.complex_bonus_cap);

    let formal = phrases_present(text, &ctx.lexicon.formal_register_markers);
    let informal = phrases_present(text, &ctx.lexicon.informal_register_markers);
    if formal > informal {
        score += t.register_bonus;
    } else if informal > formal {
        score -= t.register_bonus;
    }

    clamp(score)
}

fn vocabulary(ctx: &DimensionContext<'_>) -> u8 {
    let t = &ctx.tuning.vocabulary;
    let usage = &ctx.analysis.medical_terminology_usage;
    let mut score = ctx.tuning.base_score;

    score += (usage.appropriate.len() as i32 * t.appropriate_bonus_per_term)
        .min(t.appropriate_bonus_cap);
    score -= usage.inappropriate.len() as i32 * t.inappropriate_penalty_per_term;
    score -= (usage.missing.len() as i32 * t.missing_penalty_per_term).min(t.missing_penalty_cap);

    let words: Vec<&str> = ctx.speech.lowercase.unicode_words().collect();
    if !words.is_empty() {
        let distinct: HashSet<&str> = words.iter().copied().collect();
        let ratio = distinct.len() as f32 / words.len() as f32;
        if let Some(tier) = t.ttr_tiers.iter().find(|tier| ratio >= tier.min) {
            score += tier.bonus;
        }

        let density = usage.appropriate.len() as f32 * 100.0 / words.len() as f32;
        if let Some(tier) = t
            .density_tiers
            .iter()
            .find(|tier| density >= tier.min && density <= tier.max)
        {
            score += tier.bonus;
        }
    }

    clamp(score)
}

fn pronunciation(ctx: &DimensionContext<'_>) -> u8 {
    let t = &ctx.tuning.pronunciation;
    let text = &ctx.speech.lowercase;
    let mut score = ctx.tuning.pronunciation_base;

    let sentences: Vec<&str> = text
        .split(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();
    if !sentences.is_empty() {
        let avg = ctx.speech.word_count as f32 / sentences.len() as f32;
        if avg >= t.min_avg_sentence_words && avg <= t.max_avg_sentence_words {
            score += t.sentence_length_bonus;
        }
    }

    if occurrences(text, &ctx.lexicon.connector_words) as u32 >= t.connector_min_hits {
        score += t.connector_bonus;
    }

    let confidence = occurrences(text, &ctx.lexicon.confidence_words) as i32;
    score += (confidence * t.confidence_bonus_per_hit).min(t.confidence_bonus_cap);

    let hesitations = occurrences(text, &ctx.lexicon.hesitation_words) as i32;
    score -= hesitations * t.hesitation_penalty_per_hit;

    clamp(score)
}

fn patient_education(ctx: &DimensionContext<'_>) -> u8 {
    let t = &ctx.tuning.education;
    let text = &ctx.speech.lowercase;
    let mut score = ctx.tuning.base_score;

    let instructions = occurrences(text, &ctx.lexicon.instruction_markers) as i32;
    score += (instructions * t.instruction_bonus_per_hit).min(t.instruction_bonus_cap);

    match phrases_present(text, &ctx.lexicon.understanding_checks) {
        0 => score -= t.no_understanding_check_penalty,
        1 => score += t.one_understanding_check_bonus,
        _ => score += t.many_understanding_checks_bonus,
    }

    match ctx.persona.health_literacy {
        HealthLiteracy::Low => {
            let simple = phrases_present(text, &ctx.lexicon.simple_language_markers) as u32;
            if simple >= t.simple_marker_min_hits {
                score += t.literacy_adapted_bonus;
            }
            if !ctx.analysis.medical_terminology_usage.inappropriate.is_empty() {
                score -= t.literacy_mismatch_penalty;
            }
        }
        HealthLiteracy::High => {
            if ctx.analysis.medical_terminology_usage.appropriate.len()
                >= t.high_literacy_min_terms
            {
                score += t.high_literacy_bonus;
            }
        }
        HealthLiteracy::Moderate => {}
    }

    clamp(score)
}

/// Bonus for `hits` against ascending one-indexed tiers: `tiers[0]` at one
/// hit, `tiers[1]` at two, the last tier at or beyond its position.
fn tiered(hits: usize, tiers: &[i32]) -> i32 {
    if hits == 0 || tiers.is_empty() {
        return 0;
    }
    tiers[hits.min(tiers.len()) - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use medvoice_core::{EmotionalState, Profession};

    fn context<'a>(
        speech: &'a ProfessionalSpeech,
        analysis: &'a TranscriptAnalysis,
        persona: &'a PatientPersona,
        lexicon: &'a ScoringLexicon,
        tuning: &'a ScoringTuning,
    ) -> DimensionContext<'a> {
        DimensionContext {
            speech,
            analysis,
            persona,
            lexicon,
            tuning,
            grammar_errors: &[],
            complex_structures: &[],
        }
    }

    fn speech_for(transcript: &str) -> ProfessionalSpeech {
        ProfessionalSpeech::isolate(transcript, Profession::Doctor)
    }

    #[test]
    fn tiered_lookup() {
        assert_eq!(tiered(0, &[4, 7, 10]), 0);
        assert_eq!(tiered(1, &[4, 7, 10]), 4);
        assert_eq!(tiered(2, &[4, 7, 10]), 7);
        assert_eq!(tiered(5, &[4, 7, 10]), 10);
        assert_eq!(tiered(3, &[3, 5]), 5);
    }

    #[test]
    fn empathy_capped_without_acknowledgment() {
        let lexicon = ScoringLexicon::default();
        let tuning = ScoringTuning::default();
        let mut persona = PatientPersona::new("Maria", 67, "copd");
        persona.emotional_state = EmotionalState::Worried;
        // Warm and reassuring but never acknowledges the emotion.
        let speech = speech_for(
            "Doctor: Please don't worry, this is common and it's treatable. \
             Thank you for coming in today.",
        );
        let analysis = TranscriptAnalysis::default();
        let ctx = context(&speech, &analysis, &persona, &lexicon, &tuning);
        assert!(empathy(&ctx) <= 60);
    }

    #[test]
    fn empathy_rises_with_acknowledgment() {
        let lexicon = ScoringLexicon::default();
        let tuning = ScoringTuning::default();
        let persona = PatientPersona::new("Maria", 67, "copd");
        let speech = speech_for(
            "Doctor: I understand, and that must be difficult. I can see you are concerned.",
        );
        let analysis = TranscriptAnalysis::default();
        let ctx = context(&speech, &analysis, &persona, &lexicon, &tuning);
        assert!(empathy(&ctx) > 70);
    }

    #[test]
    fn informal_penalty_is_capped() {
        let lexicon = ScoringLexicon::default();
        let tuning = ScoringTuning::default();
        let persona = PatientPersona::new("Maria", 67, "copd");
        let analysis = TranscriptAnalysis::default();

        let flooded = speech_for("Doctor: I understand. yeah nope gonna wanna chill dude.");
        let at_cap = speech_for("Doctor: I understand. yeah nope.");
        let single = speech_for("Doctor: I understand. yeah.");
        let flooded_score = empathy(&context(&flooded, &analysis, &persona, &lexicon, &tuning));
        let at_cap_score = empathy(&context(&at_cap, &analysis, &persona, &lexicon, &tuning));
        let single_score = empathy(&context(&single, &analysis, &persona, &lexicon, &tuning));
        // Six hits cost no more than the two that already reach the cap.
        assert_eq!(flooded_score, at_cap_score);
        assert!(single_score > flooded_score);
    }

    #[test]
    fn hesitations_pull_pronunciation_down() {
        let lexicon = ScoringLexicon::default();
        let tuning = ScoringTuning::default();
        let persona = PatientPersona::new("Ana", 40, "asthma");
        let analysis = TranscriptAnalysis::default();

        let fluent = speech_for("Doctor: Firstly we will check your breathing, then your peak flow readings today.");
        let halting = speech_for("Doctor: Um, so, uh, we will, um, check your, uh, breathing.");
        let fluent_score = pronunciation(&context(&fluent, &analysis, &persona, &lexicon, &tuning));
        let halting_score =
            pronunciation(&context(&halting, &analysis, &persona, &lexicon, &tuning));
        assert!(fluent_score > halting_score);
    }

    #[test]
    fn low_literacy_mismatch_penalised() {
        let lexicon = ScoringLexicon::default();
        let tuning = ScoringTuning::default();
        let mut persona = PatientPersona::new("Raj", 58, "diabetes");
        persona.health_literacy = HealthLiteracy::Low;

        let speech = speech_for("Doctor: Your prophylaxis is contraindicated.");
        let mut analysis = TranscriptAnalysis::default();
        analysis.medical_terminology_usage.inappropriate =
            vec!["prophylaxis".to_string(), "contraindicated".to_string()];
        let penalised =
            patient_education(&context(&speech, &analysis, &persona, &lexicon, &tuning));

        let plain = speech_for(
            "Doctor: In simple terms, that means your blood sugar is high. \
             Put simply, we will adjust your diet.",
        );
        let plain_analysis = TranscriptAnalysis::default();
        let adapted =
            patient_education(&context(&plain, &plain_analysis, &persona, &lexicon, &tuning));
        assert!(adapted > penalised);
    }

    #[test]
    fn all_scores_in_range_on_extreme_input() {
        let lexicon = ScoringLexicon::default();
        let tuning = ScoringTuning::default();
        let persona = PatientPersona::new("Ana", 40, "asthma");
        let speech = speech_for(&format!("Doctor: {}", "um uh er ".repeat(60)));
        let analysis = TranscriptAnalysis::default();
        let scores = score_all(&context(&speech, &analysis, &persona, &lexicon, &tuning));
        assert!(scores.all_in_range());
        assert_eq!(scores.pronunciation, 0);
    }
}
