//! Scoring weights
//!
//! Invariant: the six weights sum to 1.0 and
//! `overall_score = round(Σ weight · sub_score)`.

use medvoice_core::{DetailedScores, ScoreDimension};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Relative weight of each scored dimension in the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub clinical_communication: f64,
    pub empathy: f64,
    pub grammar: f64,
    pub patient_education: f64,
    pub pronunciation: f64,
    pub vocabulary: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            clinical_communication: 0.20,
            empathy: 0.20,
            grammar: 0.15,
            patient_education: 0.15,
            pronunciation: 0.15,
            vocabulary: 0.15,
        }
    }
}

impl ScoringWeights {
    const SUM_TOLERANCE: f64 = 1e-6;

    pub fn get(&self, dimension: ScoreDimension) -> f64 {
        match dimension {
            ScoreDimension::ClinicalCommunication => self.clinical_communication,
            ScoreDimension::Empathy => self.empathy,
            ScoreDimension::Grammar => self.grammar,
            ScoreDimension::PatientEducation => self.patient_education,
            ScoreDimension::Pronunciation => self.pronunciation,
            ScoreDimension::Vocabulary => self.vocabulary,
        }
    }

    pub fn sum(&self) -> f64 {
        ScoreDimension::ALL.iter().map(|d| self.get(*d)).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sum = self.sum();
        if (sum - 1.0).abs() > Self::SUM_TOLERANCE {
            return Err(ConfigError::InvalidValue {
                field: "weights".to_string(),
                message: format!("scoring weights must sum to 1.0, got {sum}"),
            });
        }
        Ok(())
    }

    /// Weighted overall score, rounded, clamped to [0, 100].
    pub fn overall(&self, scores: &DetailedScores) -> u8 {
        let weighted: f64 = ScoreDimension::ALL
            .iter()
            .map(|d| self.get(*d) * f64::from(scores.get(*d)))
            .sum();
        weighted.round().clamp(0.0, 100.0) as u8
    }
}
