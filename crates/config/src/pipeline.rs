//! Orchestrator settings

use serde::{Deserialize, Serialize};

/// What the turn pipeline does when a patient response fails validation at
/// `critical` severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CriticalResponsePolicy {
    /// Return the deterministically sanitized text (never raw model output).
    #[default]
    Sanitize,
    /// Discard the model output entirely and return the fixed fallback reply.
    FailClosed,
}

/// Settings threaded into the pipeline controller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSettings {
    #[serde(default)]
    pub critical_policy: CriticalResponsePolicy,
    /// Safe scripted patient reply used under `FailClosed`.
    #[serde(default = "default_fallback_reply")]
    pub fallback_patient_reply: String,
    #[serde(default = "default_turn_temperature")]
    pub llm_temperature: f32,
    #[serde(default = "default_turn_max_tokens")]
    pub llm_max_tokens: u32,
    /// Feedback generation runs colder and longer than dialogue turns.
    #[serde(default = "default_feedback_temperature")]
    pub feedback_temperature: f32,
    #[serde(default = "default_feedback_max_tokens")]
    pub feedback_max_tokens: u32,
    #[serde(default)]
    pub tts_voice: Option<String>,
}

fn default_fallback_reply() -> String {
    "I'm sorry, could you say that again? I lost my train of thought.".to_string()
}

fn default_turn_temperature() -> f32 {
    0.7
}

fn default_turn_max_tokens() -> u32 {
    256
}

fn default_feedback_temperature() -> f32 {
    0.2
}

fn default_feedback_max_tokens() -> u32 {
    1024
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            critical_policy: CriticalResponsePolicy::default(),
            fallback_patient_reply: default_fallback_reply(),
            llm_temperature: default_turn_temperature(),
            llm_max_tokens: default_turn_max_tokens(),
            feedback_temperature: default_feedback_temperature(),
            feedback_max_tokens: default_feedback_max_tokens(),
            tts_voice: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_favor_sanitize() {
        let settings = PipelineSettings::default();
        assert_eq!(settings.critical_policy, CriticalResponsePolicy::Sanitize);
        assert!(!settings.fallback_patient_reply.is_empty());
    }
}
