//! Bonus/penalty tuning for the six scored dimensions
//!
//! These are empirically chosen policy constants, not structural contracts,
//! so they live in configuration. Defaults match the shipped rubric: every
//! sub-score starts from a fixed base and is adjusted by tiered, capped
//! bonuses from keyword and pattern hit-counts.

use serde::{Deserialize, Serialize};

/// All per-dimension tuning, plus the shared base scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringTuning {
    /// Starting score for every dimension except pronunciation.
    #[serde(default = "default_base")]
    pub base_score: i32,
    /// Pronunciation starts slightly higher: text evidence for it is weaker.
    #[serde(default = "default_pronunciation_base")]
    pub pronunciation_base: i32,
    #[serde(default)]
    pub clinical: ClinicalTuning,
    #[serde(default)]
    pub empathy: EmpathyTuning,
    #[serde(default)]
    pub grammar: GrammarTuning,
    #[serde(default)]
    pub vocabulary: VocabularyTuning,
    #[serde(default)]
    pub pronunciation: PronunciationTuning,
    #[serde(default)]
    pub education: EducationTuning,
    #[serde(default)]
    pub narrative: NarrativeTuning,
}

/// Thresholds for turning ranked dimensions into strengths and improvements.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NarrativeTuning {
    /// A dimension becomes a strength at or above this score.
    pub strength_min_score: i32,
    /// A dimension becomes an improvement at or below this score.
    pub improvement_max_score: i32,
    /// Verbatim quotes attached to each strength.
    pub max_strength_examples: usize,
}

impl Default for NarrativeTuning {
    fn default() -> Self {
        Self {
            strength_min_score: 80,
            improvement_max_score: 75,
            max_strength_examples: 2,
        }
    }
}

fn default_base() -> i32 {
    70
}

fn default_pronunciation_base() -> i32 {
    75
}

impl Default for ScoringTuning {
    fn default() -> Self {
        Self {
            base_score: default_base(),
            pronunciation_base: default_pronunciation_base(),
            clinical: ClinicalTuning::default(),
            empathy: EmpathyTuning::default(),
            grammar: GrammarTuning::default(),
            vocabulary: VocabularyTuning::default(),
            pronunciation: PronunciationTuning::default(),
            education: EducationTuning::default(),
            narrative: NarrativeTuning::default(),
        }
    }
}

/// Clinical-communication bonuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicalTuning {
    /// Checklist coverage ratio at or above which the full bonus applies.
    pub checklist_high_coverage: f32,
    /// Coverage ratio for the partial bonus.
    pub checklist_mid_coverage: f32,
    /// Coverage ratio below which the penalty applies.
    pub checklist_low_coverage: f32,
    pub checklist_bonus: i32,
    pub checklist_partial_bonus: i32,
    pub checklist_penalty: i32,
    pub questioning_balance_bonus: i32,
    pub questioning_balance_penalty: i32,
    /// Tiered by explanation-marker hits: one hit, two hits, three or more.
    pub explanation_tiers: [i32; 3],
    /// Tiered by shared-decision phrase hits: one hit, two or more.
    pub decision_tiers: [i32; 2],
}

impl Default for ClinicalTuning {
    fn default() -> Self {
        Self {
            checklist_high_coverage: 0.75,
            checklist_mid_coverage: 0.5,
            checklist_low_coverage: 0.3,
            checklist_bonus: 15,
            checklist_partial_bonus: 8,
            checklist_penalty: 15,
            questioning_balance_bonus: 10,
            questioning_balance_penalty: 10,
            explanation_tiers: [4, 7, 10],
            decision_tiers: [3, 5],
        }
    }
}

/// Empathy bonuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmpathyTuning {
    /// Full bonus at three or more acknowledgment hits, partial at one.
    pub acknowledgment_bonus: i32,
    pub acknowledgment_partial_bonus: i32,
    pub acknowledgment_penalty: i32,
    /// With zero acknowledgment phrases the dimension cannot exceed this.
    pub no_acknowledgment_ceiling: i32,
    pub warm_tone_bonus: i32,
    pub warm_tone_partial_bonus: i32,
    pub informal_penalty_per_hit: i32,
    /// Total informal-language penalty never exceeds this.
    pub informal_penalty_cap: i32,
    /// Tiered by reassurance-phrase hits: one, two, three or more.
    pub reassurance_tiers: [i32; 3],
    pub cultural_bonus_per_hit: i32,
    pub cultural_penalty_per_hit: i32,
}

impl Default for EmpathyTuning {
    fn default() -> Self {
        Self {
            acknowledgment_bonus: 15,
            acknowledgment_partial_bonus: 8,
            acknowledgment_penalty: 15,
            no_acknowledgment_ceiling: 60,
            warm_tone_bonus: 10,
            warm_tone_partial_bonus: 5,
            informal_penalty_per_hit: 5,
            informal_penalty_cap: 10,
            reassurance_tiers: [4, 7, 10],
            cultural_bonus_per_hit: 3,
            cultural_penalty_per_hit: 5,
        }
    }
}

/// Grammar bonuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrammarTuning {
    pub error_penalty_per_hit: i32,
    pub error_penalty_cap: i32,
    pub complex_bonus_per_hit: i32,
    pub complex_bonus_cap: i32,
    pub register_bonus: i32,
}

impl Default for GrammarTuning {
    fn default() -> Self {
        Self {
            error_penalty_per_hit: 2,
            error_penalty_cap: 20,
            complex_bonus_per_hit: 1,
            complex_bonus_cap: 15,
            register_bonus: 5,
        }
    }
}

/// One type-token-ratio tier: ratios at or above `min` earn `bonus`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TtrTier {
    pub min: f32,
    pub bonus: i32,
}

/// One medical-term-density tier (terms per 100 professional words).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DensityTier {
    pub min: f32,
    pub max: f32,
    pub bonus: i32,
}

/// Vocabulary bonuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyTuning {
    pub appropriate_bonus_per_term: i32,
    pub appropriate_bonus_cap: i32,
    pub inappropriate_penalty_per_term: i32,
    pub missing_penalty_per_term: i32,
    pub missing_penalty_cap: i32,
    /// Checked in order; first matching tier wins.
    pub ttr_tiers: Vec<TtrTier>,
    pub density_tiers: Vec<DensityTier>,
}

impl Default for VocabularyTuning {
    fn default() -> Self {
        Self {
            appropriate_bonus_per_term: 2,
            appropriate_bonus_cap: 8,
            inappropriate_penalty_per_term: 3,
            missing_penalty_per_term: 1,
            missing_penalty_cap: 5,
            ttr_tiers: vec![
                TtrTier { min: 0.70, bonus: 10 },
                TtrTier { min: 0.60, bonus: 7 },
                TtrTier { min: 0.52, bonus: 5 },
                TtrTier { min: 0.45, bonus: 3 },
            ],
            density_tiers: vec![
                DensityTier {
                    min: 2.0,
                    max: 8.0,
                    bonus: 5,
                },
                DensityTier {
                    min: 0.5,
                    max: 12.0,
                    bonus: 3,
                },
            ],
        }
    }
}

/// Pronunciation proxies derived from text structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PronunciationTuning {
    pub sentence_length_bonus: i32,
    pub min_avg_sentence_words: f32,
    pub max_avg_sentence_words: f32,
    pub connector_bonus: i32,
    pub connector_min_hits: u32,
    pub confidence_bonus_per_hit: i32,
    pub confidence_bonus_cap: i32,
    pub hesitation_penalty_per_hit: i32,
}

impl Default for PronunciationTuning {
    fn default() -> Self {
        Self {
            sentence_length_bonus: 5,
            min_avg_sentence_words: 8.0,
            max_avg_sentence_words: 20.0,
            connector_bonus: 5,
            connector_min_hits: 3,
            confidence_bonus_per_hit: 2,
            confidence_bonus_cap: 6,
            hesitation_penalty_per_hit: 2,
        }
    }
}

/// Patient-education bonuses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationTuning {
    pub instruction_bonus_per_hit: i32,
    pub instruction_bonus_cap: i32,
    pub no_understanding_check_penalty: i32,
    pub one_understanding_check_bonus: i32,
    pub many_understanding_checks_bonus: i32,
    /// Low-literacy persona, language kept simple.
    pub literacy_adapted_bonus: i32,
    /// Low-literacy persona, overly complex terms used.
    pub literacy_mismatch_penalty: i32,
    /// High-literacy persona given appropriately precise terminology.
    pub high_literacy_bonus: i32,
    /// Simple-language marker hits needed to count as adapted.
    pub simple_marker_min_hits: u32,
    /// Appropriate terms needed for the high-literacy bonus.
    pub high_literacy_min_terms: usize,
}

impl Default for EducationTuning {
    fn default() -> Self {
        Self {
            instruction_bonus_per_hit: 2,
            instruction_bonus_cap: 10,
            no_understanding_check_penalty: 5,
            one_understanding_check_bonus: 5,
            many_understanding_checks_bonus: 10,
            literacy_adapted_bonus: 10,
            literacy_mismatch_penalty: 10,
            high_literacy_bonus: 5,
            simple_marker_min_hits: 2,
            high_literacy_min_terms: 3,
        }
    }
}
