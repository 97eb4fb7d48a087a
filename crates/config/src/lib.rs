//! Configuration for the medvoice engines
//!
//! The scoring and guardrails engines are driven entirely by immutable,
//! injected configuration: keyword lexicons, regex pattern tables, scoring
//! weights, and bonus tuning. Everything here ships with complete embedded
//! defaults and can be overridden from a YAML file, which enables
//! localization and deterministic test doubles with controlled vocabularies.
//!
//! ```ignore
//! let config = CoachConfig::load("config/coach.yaml")?;
//! let engine = ScoringEngine::new(Arc::new(config));
//! ```

pub mod lexicon;
pub mod pipeline;
pub mod templates;
pub mod tuning;
pub mod weights;

pub use lexicon::{GuardrailLexicon, ScoringLexicon, TermRewrite};
pub use pipeline::{CriticalResponsePolicy, PipelineSettings};
pub use templates::{FeedbackTemplates, ImprovementTemplate, OpportunityExample};
pub use tuning::{
    ClinicalTuning, DensityTier, EducationTuning, EmpathyTuning, GrammarTuning, NarrativeTuning,
    PronunciationTuning, ScoringTuning, TtrTier, VocabularyTuning,
};
pub use weights::ScoringWeights;

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("configuration file not found: {0}: {1}")]
    FileNotFound(String, String),

    #[error("failed to parse configuration: {0}")]
    ParseError(String),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Top-level configuration consumed by both engines and the orchestrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoachConfig {
    #[serde(default)]
    pub weights: ScoringWeights,
    #[serde(default)]
    pub tuning: ScoringTuning,
    #[serde(default)]
    pub scoring_lexicon: ScoringLexicon,
    #[serde(default)]
    pub guardrail_lexicon: GuardrailLexicon,
    #[serde(default)]
    pub templates: FeedbackTemplates,
    #[serde(default)]
    pub pipeline: PipelineSettings,
}

impl CoachConfig {
    /// Load from a YAML file. Missing sections fall back to embedded defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::FileNotFound(path.as_ref().display().to_string(), e.to_string())
        })?;
        let config: Self =
            serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants. The scoring weights must sum to 1.0.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.weights.validate()?;
        if self.scoring_lexicon.checklist.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "scoring_lexicon.checklist".to_string(),
                message: "systematic-approach checklist must not be empty".to_string(),
            });
        }
        Ok(())
    }
}
