//! Speech provider interfaces

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::traits::health::ComponentHealth;

/// Encoded audio handed to the pipeline by the caller or produced by TTS.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioClip {
    pub data: Vec<u8>,
    /// MIME type, e.g. `audio/webm` or `audio/wav`.
    pub mime_type: String,
}

impl AudioClip {
    pub fn new(data: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            data,
            mime_type: mime_type.into(),
        }
    }
}

/// Word- or phrase-level segment of a transcription.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start_ms: u64,
    pub end_ms: u64,
}

/// Result of a speech-to-text call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transcription {
    pub text: String,
    pub confidence: f32,
    #[serde(default)]
    pub segments: Vec<TranscriptSegment>,
    pub language: String,
    pub processing_time_ms: u64,
}

/// Speech-to-Text provider adapter.
#[async_trait]
pub trait SpeechToText: Send + Sync + 'static {
    /// Transcribe one utterance.
    async fn transcribe(&self, audio: &AudioClip, session_id: &str) -> Result<Transcription>;

    /// One-time startup work (model load, connection warm-up).
    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn health_check(&self) -> ComponentHealth;

    /// Adapter name for logging and health reports.
    fn name(&self) -> &str;
}

/// Input to a text-to-speech call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SynthesisRequest {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
    #[serde(default)]
    pub speed: Option<f32>,
}

impl SynthesisRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            voice: None,
            speed: None,
        }
    }
}

/// Result of a text-to-speech call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesizedAudio {
    pub audio: Vec<u8>,
    pub format: String,
    pub duration_seconds: f32,
    pub processing_time_ms: u64,
}

/// Text-to-Speech provider adapter.
#[async_trait]
pub trait TextToSpeech: Send + Sync + 'static {
    async fn synthesize(&self, request: &SynthesisRequest) -> Result<SynthesizedAudio>;

    async fn initialize(&self) -> Result<()> {
        Ok(())
    }

    async fn health_check(&self) -> ComponentHealth;

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct EchoStt;

    #[async_trait]
    impl SpeechToText for EchoStt {
        async fn transcribe(
            &self,
            _audio: &AudioClip,
            _session_id: &str,
        ) -> Result<Transcription> {
            Ok(Transcription {
                text: "Doctor: How are you feeling today?".to_string(),
                confidence: 0.92,
                segments: Vec::new(),
                language: "en".to_string(),
                processing_time_ms: 3,
            })
        }

        async fn health_check(&self) -> ComponentHealth {
            ComponentHealth::ok()
        }

        fn name(&self) -> &str {
            "echo-stt"
        }
    }

    #[tokio::test]
    async fn trait_object_dispatch() {
        let stt: Box<dyn SpeechToText> = Box::new(EchoStt);
        let clip = AudioClip::new(vec![0u8; 16], "audio/wav");
        let transcript = stt.transcribe(&clip, "sess-1").await.unwrap();
        assert!(transcript.text.starts_with("Doctor:"));
        assert!(stt.health_check().await.healthy);
    }
}
