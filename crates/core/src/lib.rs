//! Core types and traits for the medvoice conversation pipeline
//!
//! This crate provides foundational types used across all other crates:
//! - Provider traits for pluggable backends (STT, TTS, LLM, prompt templating)
//! - The patient persona and conversation data model
//! - Scoring and validation result types
//! - Error types

pub mod conversation;
pub mod error;
pub mod feedback;
pub mod persona;
pub mod scoring;
pub mod traits;
pub mod validation;

pub use conversation::{Turn, TurnRole};
pub use error::{Error, Result};
pub use feedback::{DraftScores, FeedbackContent, FeedbackDraft};
pub use persona::{
    AnxietyLevel, EmotionalState, HealthLiteracy, PatientPersona, Profession,
};
pub use scoring::{
    DetailedScores, Improvement, MedicalTerminologyUsage, QuestionTypes, ScoreDimension,
    ScoringResult, Strength, TranscriptAnalysis,
};
pub use validation::{Severity, ValidationResult};

pub use traits::{
    AudioClip, Completion, CompletionRequest, ComponentHealth, FeedbackPromptContext,
    LanguageModel, Message, PromptBuilder, Role, SpeechToText, SynthesisRequest,
    SynthesizedAudio, TextToSpeech, TokenUsage, Transcription, TranscriptSegment, TurnContext,
};
