//! Prompt templating interface
//!
//! Deterministic templating only: the pipeline depends on embedded-data
//! fidelity, not on exact wording, so the methods are synchronous and
//! infallible.

use serde::{Deserialize, Serialize};

use crate::persona::{PatientPersona, Profession};
use crate::traits::health::ComponentHealth;

/// Where in the scenario a turn sits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TurnContext {
    pub scenario_type: String,
    pub difficulty: String,
    pub turn_index: u32,
}

/// Everything the feedback prompt template needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackPromptContext {
    pub transcript: String,
    pub persona: PatientPersona,
    pub profession: Profession,
    pub duration_seconds: u32,
    pub difficulty: String,
    pub scenario_type: String,
}

/// Prompt builder seam.
pub trait PromptBuilder: Send + Sync + 'static {
    /// Prompt that keeps the model in the patient's voice for one turn.
    fn build_persona_prompt(
        &self,
        persona: &PatientPersona,
        context: &TurnContext,
        utterance: &str,
    ) -> String;

    /// Prompt asking the model to author structured feedback JSON.
    fn build_feedback_prompt(&self, context: &FeedbackPromptContext) -> String;

    /// Local self-check: templates render against a fixture without panicking.
    fn health_check(&self) -> ComponentHealth;

    fn name(&self) -> &str;
}
