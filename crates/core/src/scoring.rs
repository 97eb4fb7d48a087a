//! Scoring result types
//!
//! These are the deterministic outputs of the scoring engine. All scores are
//! integers clamped to [0, 100]; `ScoringResult` is a pure function of
//! (transcript, persona, duration, profession) and carries no identity.

use serde::{Deserialize, Serialize};

/// Counts of professional questions by type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuestionTypes {
    pub open_ended: u32,
    pub closed_ended: u32,
    pub clarifying: u32,
}

impl QuestionTypes {
    pub fn total(&self) -> u32 {
        self.open_ended + self.closed_ended + self.clarifying
    }
}

/// How the professional used medical terminology, measured against the
/// persona's condition-specific term list plus a general-medicine list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MedicalTerminologyUsage {
    /// Expected terms the professional actually used.
    pub appropriate: Vec<String>,
    /// Overly complex terms that should have been simplified for the patient.
    pub inappropriate: Vec<String>,
    /// Expected terms never mentioned (capped at 3).
    pub missing: Vec<String>,
}

/// Structural analysis of a transcript. Derived, recomputed per call.
///
/// Deserialization is lenient: this shape also arrives inside untrusted
/// model-authored feedback, where fields may be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptAnalysis {
    /// Whitespace-token count of the full transcript.
    pub total_words: u32,
    /// Professional words as a rounded percentage of total words.
    pub speaking_time_percentage: u32,
    pub question_types: QuestionTypes,
    pub key_phrases_used: Vec<String>,
    pub medical_terminology_usage: MedicalTerminologyUsage,
    /// At most 3, derived from persona-conditioned rules.
    pub missed_opportunities: Vec<String>,
    /// Average words per professional line.
    pub average_response_length: f32,
}

/// The six scored dimensions, each independently clamped to [0, 100].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedScores {
    pub pronunciation: u8,
    pub grammar: u8,
    pub vocabulary: u8,
    pub clinical_communication: u8,
    pub empathy: u8,
    pub patient_education: u8,
}

impl DetailedScores {
    pub fn get(&self, dimension: ScoreDimension) -> u8 {
        match dimension {
            ScoreDimension::Pronunciation => self.pronunciation,
            ScoreDimension::Grammar => self.grammar,
            ScoreDimension::Vocabulary => self.vocabulary,
            ScoreDimension::ClinicalCommunication => self.clinical_communication,
            ScoreDimension::Empathy => self.empathy,
            ScoreDimension::PatientEducation => self.patient_education,
        }
    }

    /// True when every sub-score is in [0, 100].
    ///
    /// `u8` already forbids negatives; this guards the upper bound for
    /// values that crossed the untrusted feedback boundary.
    pub fn all_in_range(&self) -> bool {
        ScoreDimension::ALL.iter().all(|d| self.get(*d) <= 100)
    }
}

/// Named scoring dimension, in fixed presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreDimension {
    ClinicalCommunication,
    Empathy,
    Grammar,
    PatientEducation,
    Pronunciation,
    Vocabulary,
}

impl ScoreDimension {
    /// All dimensions in fixed order. Ties in ranking resolve to this order.
    pub const ALL: [ScoreDimension; 6] = [
        ScoreDimension::ClinicalCommunication,
        ScoreDimension::Empathy,
        ScoreDimension::Grammar,
        ScoreDimension::PatientEducation,
        ScoreDimension::Pronunciation,
        ScoreDimension::Vocabulary,
    ];

    /// Human-readable category name used in strengths/improvements.
    pub fn label(&self) -> &'static str {
        match self {
            ScoreDimension::ClinicalCommunication => "Clinical Communication",
            ScoreDimension::Empathy => "Empathy",
            ScoreDimension::Grammar => "Grammar",
            ScoreDimension::PatientEducation => "Patient Education",
            ScoreDimension::Pronunciation => "Pronunciation",
            ScoreDimension::Vocabulary => "Vocabulary",
        }
    }
}

/// A recognised strength, with up to 2 verbatim quotes from professional lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Strength {
    pub category: String,
    pub observation: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// A suggested improvement from the fixed per-category template table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    pub category: String,
    pub observation: String,
    pub suggestion: String,
    pub example: String,
}

/// Full output of the scoring engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    /// Weighted sum of the six sub-scores, rounded, in [0, 100].
    pub overall_score: u8,
    pub detailed_scores: DetailedScores,
    /// At most 3.
    pub strengths: Vec<Strength>,
    /// Exactly 3 whenever the transcript has at least one professional line.
    pub improvements: Vec<Improvement>,
    pub transcript_analysis: TranscriptAnalysis,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_order_is_stable() {
        assert_eq!(ScoreDimension::ALL[0], ScoreDimension::ClinicalCommunication);
        assert_eq!(ScoreDimension::ALL[5], ScoreDimension::Vocabulary);
    }

    #[test]
    fn detailed_scores_lookup() {
        let scores = DetailedScores {
            pronunciation: 75,
            grammar: 70,
            vocabulary: 80,
            clinical_communication: 85,
            empathy: 55,
            patient_education: 65,
        };
        assert_eq!(scores.get(ScoreDimension::Empathy), 55);
        assert!(scores.all_in_range());
    }

    #[test]
    fn question_total() {
        let q = QuestionTypes {
            open_ended: 2,
            closed_ended: 3,
            clarifying: 1,
        };
        assert_eq!(q.total(), 6);
    }
}
