//! AI-authored feedback shapes
//!
//! `FeedbackDraft` is the untrusted parse target for model output; every
//! top-level field is optional because the model may omit or mangle any of
//! them. It must pass feedback validation, or be repaired by the correction
//! merge, before it becomes a trusted `FeedbackContent`.

use serde::{Deserialize, Serialize};

use crate::scoring::{DetailedScores, Improvement, ScoringResult, Strength, TranscriptAnalysis};

/// Trusted, fully-populated feedback as returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackContent {
    pub overall_score: u8,
    pub detailed_scores: DetailedScores,
    pub strengths: Vec<Strength>,
    pub improvements: Vec<Improvement>,
    pub transcript_analysis: TranscriptAnalysis,
}

impl From<&ScoringResult> for FeedbackContent {
    fn from(scoring: &ScoringResult) -> Self {
        Self {
            overall_score: scoring.overall_score,
            detailed_scores: scoring.detailed_scores,
            strengths: scoring.strengths.clone(),
            improvements: scoring.improvements.clone(),
            transcript_analysis: scoring.transcript_analysis.clone(),
        }
    }
}

/// Untrusted parse of model-authored feedback JSON.
///
/// Scores are widened to `i64` so out-of-range values survive parsing and
/// can be reported by the validator rather than failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedbackDraft {
    #[serde(default)]
    pub overall_score: Option<i64>,
    #[serde(default)]
    pub detailed_scores: Option<DraftScores>,
    #[serde(default)]
    pub strengths: Option<Vec<Strength>>,
    #[serde(default)]
    pub improvements: Option<Vec<Improvement>>,
    #[serde(default)]
    pub transcript_analysis: Option<TranscriptAnalysis>,
}

/// Untrusted counterpart of [`DetailedScores`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftScores {
    #[serde(default)]
    pub pronunciation: Option<i64>,
    #[serde(default)]
    pub grammar: Option<i64>,
    #[serde(default)]
    pub vocabulary: Option<i64>,
    #[serde(default)]
    pub clinical_communication: Option<i64>,
    #[serde(default)]
    pub empathy: Option<i64>,
    #[serde(default)]
    pub patient_education: Option<i64>,
}

impl DraftScores {
    /// Iterate (field name, value) for every present score.
    pub fn present(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        [
            ("pronunciation", self.pronunciation),
            ("grammar", self.grammar),
            ("vocabulary", self.vocabulary),
            ("clinical_communication", self.clinical_communication),
            ("empathy", self.empathy),
            ("patient_education", self.patient_education),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
    }

    /// True when all six scores are present and within [0, 100].
    pub fn is_complete_and_in_range(&self) -> bool {
        let mut count = 0;
        for (_, value) in self.present() {
            if !(0..=100).contains(&value) {
                return false;
            }
            count += 1;
        }
        count == 6
    }

    /// Convert to trusted scores. Only valid when
    /// [`is_complete_and_in_range`](Self::is_complete_and_in_range) holds.
    pub fn to_detailed(&self) -> Option<DetailedScores> {
        if !self.is_complete_and_in_range() {
            return None;
        }
        Some(DetailedScores {
            pronunciation: self.pronunciation? as u8,
            grammar: self.grammar? as u8,
            vocabulary: self.vocabulary? as u8,
            clinical_communication: self.clinical_communication? as u8,
            empathy: self.empathy? as u8,
            patient_education: self.patient_education? as u8,
        })
    }
}

impl FeedbackDraft {
    /// Names of the five required top-level fields, in wire order.
    pub const REQUIRED_FIELDS: [&'static str; 5] = [
        "overall_score",
        "detailed_scores",
        "strengths",
        "improvements",
        "transcript_analysis",
    ];

    /// Required fields absent from this draft.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.overall_score.is_none() {
            missing.push("overall_score");
        }
        if self.detailed_scores.is_none() {
            missing.push("detailed_scores");
        }
        if self.strengths.is_none() {
            missing.push("strengths");
        }
        if self.improvements.is_none() {
            missing.push("improvements");
        }
        if self.transcript_analysis.is_none() {
            missing.push("transcript_analysis");
        }
        missing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_reported_in_wire_order() {
        let draft = FeedbackDraft {
            overall_score: Some(82),
            ..Default::default()
        };
        assert_eq!(
            draft.missing_fields(),
            vec![
                "detailed_scores",
                "strengths",
                "improvements",
                "transcript_analysis"
            ]
        );
    }

    #[test]
    fn draft_scores_range_check() {
        let mut scores = DraftScores {
            pronunciation: Some(75),
            grammar: Some(70),
            vocabulary: Some(80),
            clinical_communication: Some(85),
            empathy: Some(60),
            patient_education: Some(65),
        };
        assert!(scores.is_complete_and_in_range());
        assert!(scores.to_detailed().is_some());

        scores.empathy = Some(140);
        assert!(!scores.is_complete_and_in_range());
        assert!(scores.to_detailed().is_none());
    }

    #[test]
    fn draft_parses_partial_json() {
        let draft: FeedbackDraft =
            serde_json::from_str(r#"{"overall_score": 77, "strengths": []}"#).unwrap();
        assert_eq!(draft.overall_score, Some(77));
        assert!(draft.strengths.is_some());
        assert!(draft.missing_fields().contains(&"improvements"));
    }
}
