//! Provider traits consumed by the pipeline controller
//!
//! These are the narrow seams to external collaborators. Their internals are
//! not this crate's concern; the orchestrator selects a real or stub
//! implementation of each at construction time.

mod health;
mod llm;
mod prompt;
mod speech;

pub use health::ComponentHealth;
pub use llm::{Completion, CompletionRequest, LanguageModel, Message, Role, TokenUsage};
pub use prompt::{FeedbackPromptContext, PromptBuilder, TurnContext};
pub use speech::{
    AudioClip, SpeechToText, SynthesisRequest, SynthesizedAudio, TextToSpeech,
    TranscriptSegment, Transcription,
};
