//! End-to-end pipeline tests over stubbed providers.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use medvoice_config::{CoachConfig, CriticalResponsePolicy};
use medvoice_core::{
    AudioClip, ComponentHealth, Completion, CompletionRequest, Error, LanguageModel,
    PatientPersona, Profession, Result, SpeechToText, TokenUsage, Transcription, TurnContext,
};
use medvoice_pipeline::{CallOptions, ConversationOrchestrator, Providers};

fn persona() -> PatientPersona {
    let mut p = PatientPersona::new("Ana", 55, "hypertension");
    p.current_symptoms = vec!["headache".into(), "dizziness".into()];
    p.medications = vec!["lisinopril".into()];
    p
}

fn audio() -> AudioClip {
    AudioClip::new(vec![0u8; 64], "audio/webm")
}

async fn ready_orchestrator(config: CoachConfig, providers: Providers) -> ConversationOrchestrator {
    let orchestrator = ConversationOrchestrator::new(Arc::new(config), providers);
    orchestrator.initialize().await.unwrap();
    orchestrator
}

/// Model that replies with clinical advice, which a patient must never give.
struct UnsafeLanguageModel;

#[async_trait]
impl LanguageModel for UnsafeLanguageModel {
    async fn complete(&self, _request: &CompletionRequest) -> Result<Completion> {
        Ok(Completion {
            text: "Honestly doctor, you should take aspirin every day, it fixed my headache for good."
                .to_string(),
            confidence: Some(0.9),
            token_usage: TokenUsage::default(),
        })
    }

    async fn health_check(&self) -> ComponentHealth {
        ComponentHealth::ok()
    }

    fn name(&self) -> &str {
        "unsafe-llm"
    }
}

/// Model that answers every prompt with prose instead of JSON.
struct ProseLanguageModel;

#[async_trait]
impl LanguageModel for ProseLanguageModel {
    async fn complete(&self, _request: &CompletionRequest) -> Result<Completion> {
        Ok(Completion {
            text: "The session went quite well overall, keep practising your questions."
                .to_string(),
            confidence: Some(0.8),
            token_usage: TokenUsage::default(),
        })
    }

    async fn health_check(&self) -> ComponentHealth {
        ComponentHealth::ok()
    }

    fn name(&self) -> &str {
        "prose-llm"
    }
}

/// Model that authors well-formed feedback with an invented strength quote.
struct FabricatingLanguageModel;

#[async_trait]
impl LanguageModel for FabricatingLanguageModel {
    async fn complete(&self, _request: &CompletionRequest) -> Result<Completion> {
        let text = serde_json::json!({
            "overall_score": 82,
            "detailed_scores": {
                "pronunciation": 80, "grammar": 78, "vocabulary": 84,
                "clinical_communication": 85, "empathy": 83, "patient_education": 80
            },
            "strengths": [{
                "category": "Empathy",
                "observation": "Acknowledged the patient's concern warmly",
                "examples": ["I completely understand your worry"]
            }],
            "improvements": [
                {"category": "Grammar", "observation": "Tense slips", "suggestion": "Review past tense", "example": "I examined"},
                {"category": "Vocabulary", "observation": "Repetition", "suggestion": "Vary phrasing", "example": "In addition"},
                {"category": "Pronunciation", "observation": "Pace", "suggestion": "Slow down", "example": "pausing"}
            ],
            "transcript_analysis": {}
        })
        .to_string();
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
        "fabricating-llm"
    }
}

/// STT whose initialization fails, for degraded-mode coverage.
struct OfflineSpeechToText;

#[async_trait]
impl SpeechToText for OfflineSpeechToText {
    async fn initialize(&self) -> Result<()> {
        Err(Error::provider_unavailable(
            "offline-stt",
            "initialize",
            "startup",
            "no credentials configured",
        ))
    }

    async fn transcribe(&self, _audio: &AudioClip, _session_id: &str) -> Result<Transcription> {
        unreachable!("transcribe must be gated by the readiness check");
    }

    async fn health_check(&self) -> ComponentHealth {
        ComponentHealth::failing("no credentials configured")
    }

    fn name(&self) -> &str {
        "offline-stt"
    }
}

/// STT that never completes, for timeout coverage.
struct HangingSpeechToText;

#[async_trait]
impl SpeechToText for HangingSpeechToText {
    async fn transcribe(&self, _audio: &AudioClip, _session_id: &str) -> Result<Transcription> {
        tokio::time::sleep(Duration::from_secs(3600)).await;
        unreachable!("sleep outlives every test timeout");
    }

    async fn health_check(&self) -> ComponentHealth {
        ComponentHealth::ok()
    }

    fn name(&self) -> &str {
        "hanging-stt"
    }
}

#[tokio::test]
async fn turn_pipeline_returns_approved_text_and_appends_history() {
    let orchestrator = ready_orchestrator(CoachConfig::default(), Providers::stubbed()).await;
    let mut history = Vec::new();
    let outcome = orchestrator
        .process_turn(
            &audio(),
            "sess-1",
            &persona(),
            &TurnContext::default(),
            &mut history,
            &CallOptions::default(),
        )
        .await
        .unwrap();

    assert!(outcome.validation.is_valid);
    assert!(!outcome.approved_response.is_empty());
    assert!(outcome.audio.is_some());
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].text, outcome.transcript.text);
    assert_eq!(history[1].text, outcome.approved_response);
}

#[tokio::test]
async fn unsafe_model_output_is_never_returned_raw() {
    let providers = Providers {
        llm: Arc::new(UnsafeLanguageModel),
        ..Providers::stubbed()
    };
    let orchestrator = ready_orchestrator(CoachConfig::default(), providers).await;
    let mut history = Vec::new();
    let outcome = orchestrator
        .process_turn(
            &audio(),
            "sess-2",
            &persona(),
            &TurnContext::default(),
            &mut history,
            &CallOptions::default(),
        )
        .await
        .unwrap();

    assert!(!outcome.validation.is_valid);
    assert!(outcome.validation.is_critical());
    assert!(!outcome
        .approved_response
        .to_lowercase()
        .contains("you should take"));
    // History records the approved text, not the raw model output.
    assert_eq!(history[1].text, outcome.approved_response);
}

#[tokio::test]
async fn fail_closed_policy_returns_scripted_fallback() {
    let mut config = CoachConfig::default();
    config.pipeline.critical_policy = CriticalResponsePolicy::FailClosed;
    let fallback = config.pipeline.fallback_patient_reply.clone();
    let providers = Providers {
        llm: Arc::new(UnsafeLanguageModel),
        ..Providers::stubbed()
    };
    let orchestrator = ready_orchestrator(config, providers).await;
    let mut history = Vec::new();
    let outcome = orchestrator
        .process_turn(
            &audio(),
            "sess-3",
            &persona(),
            &TurnContext::default(),
            &mut history,
            &CallOptions::default(),
        )
        .await
        .unwrap();
    assert_eq!(outcome.approved_response, fallback);
}

#[tokio::test]
async fn provider_timeout_surfaces_as_retryable_error() {
    let providers = Providers {
        stt: Arc::new(HangingSpeechToText),
        ..Providers::stubbed()
    };
    let orchestrator = ready_orchestrator(CoachConfig::default(), providers).await;
    let mut history = Vec::new();
    let err = orchestrator
        .process_turn(
            &audio(),
            "sess-4",
            &persona(),
            &TurnContext::default(),
            &mut history,
            &CallOptions {
                timeout: Some(Duration::from_millis(50)),
            },
        )
        .await
        .unwrap_err();

    assert!(err.is_retryable());
    match err {
        Error::ProviderUnavailable { stage, session_id, .. } => {
            assert_eq!(stage, "transcribe");
            assert_eq!(session_id, "sess-4");
        }
        other => panic!("expected ProviderUnavailable, got {other}"),
    }
    assert!(history.is_empty());
}

#[tokio::test]
async fn feedback_from_well_formed_model_output_is_kept() {
    let orchestrator = ready_orchestrator(CoachConfig::default(), Providers::stubbed()).await;
    let report = orchestrator
        .generate_feedback(
            "Doctor: Hello, what brings you in today?\nPatient: My blood pressure worries me.",
            &persona(),
            300,
            Profession::Doctor,
            "intermediate",
            "consultation",
            &CallOptions::default(),
        )
        .await
        .unwrap();

    assert!(report.correction.is_none());
    // The stub authors a 78; the deterministic baseline is something else.
    assert_eq!(report.feedback.overall_score, 78);
    assert_eq!(report.feedback.improvements.len(), 3);
}

#[tokio::test]
async fn prose_feedback_falls_back_to_deterministic_scoring() {
    let providers = Providers {
        llm: Arc::new(ProseLanguageModel),
        ..Providers::stubbed()
    };
    let orchestrator = ready_orchestrator(CoachConfig::default(), providers).await;
    let transcript = "Doctor: Hello, what brings you in today?\n\
                      Patient: My blood pressure worries me.\n\
                      Doctor: I understand, that must be stressful. Let me explain the plan.";
    let report = orchestrator
        .generate_feedback(
            transcript,
            &persona(),
            300,
            Profession::Doctor,
            "intermediate",
            "consultation",
            &CallOptions::default(),
        )
        .await
        .unwrap();

    let correction = report.correction.expect("merge must be reported");
    assert!(!correction.is_valid);
    assert_eq!(report.feedback.overall_score, report.scoring.overall_score);
    assert_eq!(report.feedback.improvements, report.scoring.improvements);
}

#[tokio::test]
async fn fabricated_quote_is_replaced_not_just_flagged() {
    let providers = Providers {
        llm: Arc::new(FabricatingLanguageModel),
        ..Providers::stubbed()
    };
    let orchestrator = ready_orchestrator(CoachConfig::default(), providers).await;
    let report = orchestrator
        .generate_feedback(
            "Doctor: Hello, what brings you in today?\nPatient: My blood pressure worries me.",
            &persona(),
            300,
            Profession::Doctor,
            "intermediate",
            "consultation",
            &CallOptions::default(),
        )
        .await
        .unwrap();

    let correction = report.correction.expect("fabricated quote must be reported");
    assert!(correction
        .issues
        .iter()
        .any(|i| i.contains("Example quote not found")));
    // The flagged strengths are replaced with the deterministic ones, so the
    // invented quote never reaches the learner.
    assert_eq!(report.feedback.strengths, report.scoring.strengths);
    assert!(!report
        .feedback
        .strengths
        .iter()
        .flat_map(|s| &s.examples)
        .any(|e| e.contains("I completely understand your worry")));
    // Fields that passed content checks are still kept from the draft.
    assert_eq!(report.feedback.overall_score, 82);
}

#[tokio::test]
async fn failed_provider_init_degrades_instead_of_failing() {
    let providers = Providers {
        stt: Arc::new(OfflineSpeechToText),
        ..Providers::stubbed()
    };
    let orchestrator = ready_orchestrator(CoachConfig::default(), providers).await;

    let report = orchestrator.health_check().await;
    assert!(!report.overall);
    assert!(!report.components["stt"].healthy);
    assert!(report.components["llm"].healthy);
    assert!(report.components["tts"].healthy);

    let mut history = Vec::new();
    let err = orchestrator
        .process_turn(
            &audio(),
            "sess-5",
            &persona(),
            &TurnContext::default(),
            &mut history,
            &CallOptions::default(),
        )
        .await
        .unwrap_err();
    assert!(err.is_retryable());
    match err {
        Error::ProviderUnavailable { stage, .. } => assert_eq!(stage, "transcribe"),
        other => panic!("expected ProviderUnavailable, got {other}"),
    }
    assert!(history.is_empty());
}

#[tokio::test]
async fn health_check_aggregates_all_components() {
    let orchestrator = ready_orchestrator(CoachConfig::default(), Providers::stubbed()).await;
    let report = orchestrator.health_check().await;
    assert!(report.overall);
    for component in ["stt", "tts", "llm", "prompt_builder", "scoring", "guardrails"] {
        assert!(
            report.components.get(component).is_some_and(|c| c.healthy),
            "{component} missing or unhealthy"
        );
    }
}
