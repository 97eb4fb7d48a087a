//! Conversation pipeline controller
//!
//! Sequences the per-turn pipeline (audio, transcription, persona prompt,
//! model reply, guardrails, synthesis) and the feedback pipeline (scoring,
//! feedback prompt, model output, validation, correction merge), and owns
//! startup and health aggregation across every seam.

pub mod correction;
mod orchestrator;
mod providers;

pub use orchestrator::{
    CallOptions, ConversationOrchestrator, FeedbackReport, HealthReport, TurnOutcome,
};
pub use providers::{
    Providers, ProviderStatus, StubLanguageModel, StubSpeechToText, StubTextToSpeech,
    TemplatePromptBuilder,
};
