//! Provider bundle and stub implementations
//!
//! The orchestrator is constructed with one implementation per seam and
//! never swaps them afterwards. Stubs are deterministic stand-ins with the
//! same interface: useful in tests and wherever a deployment runs without
//! a real provider behind a seam.

use std::sync::Arc;

use async_trait::async_trait;

use medvoice_core::{
    AudioClip, ComponentHealth, Completion, CompletionRequest, FeedbackPromptContext,
    LanguageModel, PatientPersona, PromptBuilder, Result, SpeechToText, SynthesisRequest,
    SynthesizedAudio, TextToSpeech, TokenUsage, Transcription, TurnContext,
};

/// Readiness of one provider after initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderStatus {
    Ready,
    /// Initialization failed; calls through this seam will error until the
    /// orchestrator is re-initialized.
    Unavailable(String),
}

impl ProviderStatus {
    pub fn is_ready(&self) -> bool {
        matches!(self, ProviderStatus::Ready)
    }
}

/// One implementation per external seam.
#[derive(Clone)]
pub struct Providers {
    pub stt: Arc<dyn SpeechToText>,
    pub tts: Arc<dyn TextToSpeech>,
    pub llm: Arc<dyn LanguageModel>,
    pub prompts: Arc<dyn PromptBuilder>,
}

impl Providers {
    /// Fully stubbed bundle: deterministic, offline, always healthy.
    pub fn stubbed() -> Self {
        Self {
            stt: Arc::new(StubSpeechToText),
            tts: Arc::new(StubTextToSpeech),
            llm: Arc::new(StubLanguageModel),
            prompts: Arc::new(TemplatePromptBuilder),
        }
    }
}

/// Returns a fixed professional utterance for any audio.
pub struct StubSpeechToText;

#[async_trait]
impl SpeechToText for StubSpeechToText {
    async fn transcribe(&self, _audio: &AudioClip, _session_id: &str) -> Result<Transcription> {
        Ok(Transcription {
            text: "Good morning, what brings you in today?".to_string(),
            confidence: 0.9,
            segments: Vec::new(),
            language: "en".to_string(),
            processing_time_ms: 1,
        })
    }

    async fn health_check(&self) -> ComponentHealth {
        ComponentHealth::ok()
    }

    fn name(&self) -> &str {
        "stub-stt"
    }
}

/// Returns a silent clip sized to the requested text.
pub struct StubTextToSpeech;

#[async_trait]
impl TextToSpeech for StubTextToSpeech {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio> {
        Ok(SynthesizedAudio {
            audio: vec![0u8; request.text.len().max(1)],
            format: "audio/wav".to_string(),
            duration_seconds: request.text.split_whitespace().count() as f32 * 0.4,
            processing_time_ms: 1,
        })
    }

    async fn health_check(&self) -> ComponentHealth {
        ComponentHealth::ok()
    }

    fn name(&self) -> &str {
        "stub-tts"
    }
}

/// Canned completions: an in-character patient reply for dialogue prompts,
/// a well-formed feedback object for feedback prompts.
pub struct StubLanguageModel;

const STUB_PATIENT_REPLY: &str =
    "Well doctor, it has been difficult since my last appointment, and I would like some help today.";

const STUB_FEEDBACK_JSON: &str = r#"{
  "overall_score": 78,
  "detailed_scores": {
    "pronunciation": 75, "grammar": 72, "vocabulary": 80,
    "clinical_communication": 82, "empathy": 76, "patient_education": 74
  },
  "strengths": [
    {"category": "Clinical Communication", "observation": "You kept a clear structure through the consultation.", "examples": []}
  ],
  "improvements": [
    {"category": "Empathy", "observation": "The patient's feelings were not always acknowledged.", "suggestion": "Name the emotion you observe before moving on.", "example": "I can see this has been worrying you."},
    {"category": "Patient Education", "observation": "Instructions were not always checked for understanding.", "suggestion": "Ask the patient to repeat the key point back.", "example": "Could you tell me how you will take this?"},
    {"category": "Vocabulary", "observation": "Some terms were too technical for the patient.", "suggestion": "Pair each medical term with a plain explanation.", "example": "Your blood pressure is higher than it should be."}
  ],
  "transcript_analysis": {}
}"#;

#[async_trait]
impl LanguageModel for StubLanguageModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<Completion> {
        let text = if request.prompt.contains("JSON") {
            STUB_FEEDBACK_JSON.to_string()
        } else {
            STUB_PATIENT_REPLY.to_string()
        };
        Ok(Completion {
            text,
            confidence: Some(0.9),
            token_usage: TokenUsage::default(),
        })
    }

    async fn health_check(&self) -> ComponentHealth {
        ComponentHealth::ok()
    }

    fn name(&self) -> &str {
        "stub-llm"
    }
}

/// Deterministic prompt templating over embedded strings.
pub struct TemplatePromptBuilder;

impl PromptBuilder for TemplatePromptBuilder {
    fn build_persona_prompt(
        &self,
        persona: &PatientPersona,
        context: &TurnContext,
        utterance: &str,
    ) -> String {
        let symptoms = if persona.current_symptoms.is_empty() {
            "none declared".to_string()
        } else {
            persona.current_symptoms.join(", ")
        };
        let medications = if persona.medications.is_empty() {
            "none declared".to_string()
        } else {
            persona.medications.join(", ")
        };
        format!(
            "You are role-playing a patient in a healthcare communication practice session.\n\
             Patient: {name}, age {age}, main condition: {condition}.\n\
             Current symptoms: {symptoms}. Medications: {medications}.\n\
             Emotional state: {emotional_state:?}, anxiety: {anxiety:?}, health literacy: {literacy:?}.\n\
             Scenario: {scenario} (difficulty {difficulty}, turn {turn}).\n\
             Stay in character, speak only as the patient, never give clinical advice,\n\
             and keep your reply between 10 and 100 words.\n\n\
             The professional just said: \"{utterance}\"\n\
             Reply as the patient.",
            name = persona.name,
            age = persona.age,
            condition = persona.primary_condition,
            symptoms = symptoms,
            medications = medications,
            emotional_state = persona.emotional_state,
            anxiety = persona.anxiety_level,
            literacy = persona.health_literacy,
            scenario = context.scenario_type,
            difficulty = context.difficulty,
            turn = context.turn_index,
        )
    }

    fn build_feedback_prompt(&self, context: &FeedbackPromptContext) -> String {
        format!(
            "You are an examiner assessing a healthcare professional's communication in a\n\
             practice consultation ({scenario}, difficulty {difficulty}, {duration} seconds).\n\
             The professional is a {profession:?}; the patient's main condition is {condition}.\n\n\
             Transcript:\n{transcript}\n\n\
             Return only a JSON object with these fields: overall_score, detailed_scores\n\
             (pronunciation, grammar, vocabulary, clinical_communication, empathy,\n\
             patient_education, each 0-100), strengths, improvements, transcript_analysis.\n\
             Quote only lines the professional actually said.",
            scenario = context.scenario_type,
            difficulty = context.difficulty,
            duration = context.duration_seconds,
            profession = context.profession,
            condition = context.persona.primary_condition,
            transcript = context.transcript,
        )
    }

    fn health_check(&self) -> ComponentHealth {
        let persona = PatientPersona::new("Fixture", 50, "asthma");
        let prompt = self.build_persona_prompt(&persona, &TurnContext::default(), "Hello");
        if prompt.contains("Fixture") {
            ComponentHealth::ok()
        } else {
            ComponentHealth::failing("persona template did not render")
        }
    }

    fn name(&self) -> &str {
        "template-prompts"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medvoice_core::Profession;

    #[tokio::test]
    async fn stub_llm_distinguishes_prompt_kinds() {
        let llm = StubLanguageModel;
        let turn = llm
            .complete(&CompletionRequest::new("Reply as the patient."))
            .await
            .unwrap();
        assert!(turn.text.contains("doctor"));

        let feedback = llm
            .complete(&CompletionRequest::new("Return only a JSON object"))
            .await
            .unwrap();
        assert!(feedback.text.trim_start().starts_with('{'));
    }

    #[test]
    fn feedback_prompt_mentions_every_required_field() {
        let persona = PatientPersona::new("Ana", 55, "hypertension");
        let prompt = TemplatePromptBuilder.build_feedback_prompt(&FeedbackPromptContext {
            transcript: "Doctor: Hello.".to_string(),
            persona,
            profession: Profession::Doctor,
            duration_seconds: 300,
            difficulty: "intermediate".to_string(),
            scenario_type: "consultation".to_string(),
        });
        for field in medvoice_core::FeedbackDraft::REQUIRED_FIELDS {
            assert!(prompt.contains(field), "prompt missing {field}");
        }
    }

    #[test]
    fn prompt_builder_health_check() {
        assert!(TemplatePromptBuilder.health_check().healthy);
    }
}
