//! Structural transcript analysis
//!
//! Everything downstream keys off the professional speaker's lines, isolated
//! by the `"Doctor:"` / `"Nurse:"` style tag prefix. Patient lines only count
//! toward the whole-transcript word totals.

use medvoice_config::ScoringLexicon;
use medvoice_core::{
    HealthLiteracy, MedicalTerminologyUsage, PatientPersona, Profession, QuestionTypes,
    TranscriptAnalysis,
};

/// Markers that classify a professional question as open-ended.
const OPEN_ENDED_MARKERS: [&str; 5] = ["how", "what", "why", "describe", "tell me"];

/// Markers that classify a non-open question as clarifying.
const CLARIFYING_MARKERS: [&str; 3] = ["can you", "could you", "clarify"];

const MAX_MISSING_TERMS: usize = 3;
const MAX_MISSED_OPPORTUNITIES: usize = 3;

/// The professional speaker's lines, isolated once per scoring call.
#[derive(Debug, Clone)]
pub(crate) struct ProfessionalSpeech {
    /// Original-case lines with the speaker tag stripped, for verbatim quotes.
    pub lines: Vec<String>,
    /// All professional text, lowercased and newline-joined, for matching.
    pub lowercase: String,
    pub word_count: usize,
}

impl ProfessionalSpeech {
    /// Tag matching is ASCII case-insensitive (`Doctor:` and `doctor:` are the
    /// same speaker); the stripped lines keep their original casing.
    pub fn isolate(transcript: &str, profession: Profession) -> Self {
        let tag = format!("{}:", profession.speaker_tag());
        let lines: Vec<String> = transcript
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                line.get(..tag.len())
                    .filter(|prefix| prefix.eq_ignore_ascii_case(&tag))
                    .map(|_| line[tag.len()..].trim().to_string())
            })
            .filter(|rest| !rest.is_empty())
            .collect();
        let lowercase = lines.join("\n").to_lowercase();
        let word_count = lines
            .iter()
            .map(|line| line.split_whitespace().count())
            .sum();
        Self {
            lines,
            lowercase,
            word_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Number of distinct phrases from `phrases` present in `text`.
///
/// `text` must already be lowercase; phrase tables are stored lowercase.
pub(crate) fn phrases_present(text: &str, phrases: &[String]) -> usize {
    phrases.iter().filter(|p| text.contains(p.as_str())).count()
}

/// Total whole-word occurrences of all phrases, counting repeats. A hit must
/// sit on non-alphanumeric boundaries so fillers like "er" do not match
/// inside "better".
pub(crate) fn occurrences(text: &str, phrases: &[String]) -> usize {
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

pub(crate) fn analyze(
    transcript: &str,
    speech: &ProfessionalSpeech,
    persona: &PatientPersona,
    lexicon: &ScoringLexicon,
) -> TranscriptAnalysis {
    let transcript_lower = transcript.to_lowercase();
    let total_words = transcript.split_whitespace().count();

    let speaking_time_percentage = if total_words == 0 {
        0
    } else {
        ((speech.word_count as f64 / total_words as f64) * 100.0).round() as u32
    };

    let question_types = classify_questions(speech);

    let key_phrases_used: Vec<String> = lexicon
        .key_phrases
        .iter()
        .filter(|p| speech.lowercase.contains(p.as_str()))
        .cloned()
        .collect();

    let medical_terminology_usage =
        terminology_usage(&transcript_lower, &speech.lowercase, persona, lexicon);

    let missed_opportunities = missed_opportunities(
        &transcript_lower,
        speech,
        persona,
        lexicon,
        &question_types,
    );

    let average_response_length = if speech.lines.is_empty() {
        0.0
    } else {
        speech.word_count as f32 / speech.lines.len() as f32
    };

    TranscriptAnalysis {
        total_words: total_words as u32,
        speaking_time_percentage,
        question_types,
        key_phrases_used,
        medical_terminology_usage,
        missed_opportunities,
        average_response_length,
    }
}

/// Classify each professional question sentence into open/clarifying/closed.
fn classify_questions(speech: &ProfessionalSpeech) -> QuestionTypes {
    let mut types = QuestionTypes::default();
    for line in &speech.lines {
        for sentence in line.split_inclusive(['.', '!', '?']) {
            if !sentence.ends_with('?') {
                continue;
            }
            let lower = sentence.to_lowercase();
            let words: Vec<&str> = lower
                .split_whitespace()
                .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
                .collect();
            if OPEN_ENDED_MARKERS.iter().any(|m| matches_marker(&lower, &words, m)) {
                types.open_ended += 1;
            } else if CLARIFYING_MARKERS.iter().any(|m| matches_marker(&lower, &words, m)) {
                types.clarifying += 1;
            } else {
                types.closed_ended += 1;
            }
        }
    }
    types
}

/// Single-word markers match whole words; multi-word markers match substrings.
fn matches_marker(sentence: &str, words: &[&str], marker: &str) -> bool {
    if marker.contains(' ') {
        sentence.contains(marker)
    } else {
        words.contains(&marker)
    }
}

fn terminology_usage(
    transcript_lower: &str,
    professional_lower: &str,
    persona: &PatientPersona,
    lexicon: &ScoringLexicon,
) -> MedicalTerminologyUsage {
    let mut usage = MedicalTerminologyUsage::default();

    let expected = lexicon
        .terms_for_condition(&persona.primary_condition)
        .iter()
        .chain(lexicon.general_medical_terms.iter());
    for term in expected {
        if transcript_lower.contains(term.as_str()) {
            usage.appropriate.push(term.clone());
        } else if usage.missing.len() < MAX_MISSING_TERMS {
            usage.missing.push(term.clone());
        }
    }

    usage.inappropriate = lexicon
        .complex_terms
        .iter()
        .filter(|t| professional_lower.contains(t.as_str()))
        .cloned()
        .collect();

    usage
}

/// Persona-conditioned coaching opportunities, checked in fixed order.
fn missed_opportunities(
    transcript_lower: &str,
    speech: &ProfessionalSpeech,
    persona: &PatientPersona,
    lexicon: &ScoringLexicon,
    questions: &QuestionTypes,
) -> Vec<String> {
    let mut found = Vec::new();
    let text = &speech.lowercase;

    if persona.expects_distressed_tone() && phrases_present(text, &lexicon.empathy_indicators) == 0
    {
        found.push("Missed chance to acknowledge the patient's anxiety".to_string());
    }
    if phrases_present(text, &lexicon.understanding_checks) == 0 {
        found.push("No check of the patient's understanding before closing".to_string());
    }
    if questions.open_ended == 0 {
        found.push("No open-ended questions to explore the patient's story".to_string());
    }
    if !persona.medications.is_empty()
        && !persona
            .medications
            .iter()
            .any(|m| transcript_lower.contains(m.to_lowercase().as_str()))
    {
        found.push("The patient's current medication was never discussed".to_string());
    }
    if persona.health_literacy == HealthLiteracy::Low
        && phrases_present(text, &lexicon.simple_language_markers) == 0
    {
        found.push("Language was not simplified for a patient with low health literacy".to_string());
    }

    found.truncate(MAX_MISSED_OPPORTUNITIES);
    found
}
