//! Conversation orchestrator
//!
//! Owns the lifecycle (initialize, per-turn pipeline, feedback pipeline,
//! health aggregation) over the two local engines and the four provider
//! seams. Within one request every stage runs strictly sequentially;
//! distinct requests are independent and may run concurrently.

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use medvoice_config::{CoachConfig, CriticalResponsePolicy};
use medvoice_core::{
    AudioClip, ComponentHealth, CompletionRequest, Error, FeedbackDraft, FeedbackPromptContext,
    Message, PatientPersona, Profession, Result, ScoringResult, Severity, SynthesisRequest,
    SynthesizedAudio, Transcription, Turn, TurnContext, TurnRole, ValidationResult,
};
use medvoice_guardrails::{GuardrailsEngine, RejectedFields, ResponseKind};
use medvoice_scoring::ScoringEngine;

use crate::correction;
use crate::providers::{Providers, ProviderStatus};

/// Caller-supplied limits threaded through provider calls unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallOptions {
    /// Applied to each individual provider call, not to the whole pipeline.
    pub timeout: Option<Duration>,
}

/// Result of one conversation turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub transcript: Transcription,
    /// Guardrails-approved text, never raw model output.
    pub approved_response: String,
    pub validation: ValidationResult,
    /// `None` when the TTS seam is unavailable; the turn still succeeds.
    pub audio: Option<SynthesizedAudio>,
}

/// Result of the feedback pipeline.
#[derive(Debug, Clone)]
pub struct FeedbackReport {
    pub feedback: medvoice_core::FeedbackContent,
    pub scoring: ScoringResult,
    /// The validation outcome that triggered the correction merge. `None`
    /// means the feedback is AI-authored and passed validation untouched.
    pub correction: Option<ValidationResult>,
}

/// Aggregated component health.
#[derive(Debug, Clone)]
pub struct HealthReport {
    pub overall: bool,
    pub components: BTreeMap<String, ComponentHealth>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Uninitialized,
    Initializing,
    Ready,
    Failed,
}

/// Provider seams gated by a readiness check before each call.
#[derive(Debug, Clone, Copy)]
enum Seam {
    Stt,
    Llm,
}

struct ProviderReadiness {
    stt: ProviderStatus,
    tts: ProviderStatus,
    llm: ProviderStatus,
}

impl Default for ProviderReadiness {
    fn default() -> Self {
        Self {
            stt: ProviderStatus::Ready,
            tts: ProviderStatus::Ready,
            llm: ProviderStatus::Ready,
        }
    }
}

pub struct ConversationOrchestrator {
    config: Arc<CoachConfig>,
    scoring: ScoringEngine,
    guardrails: GuardrailsEngine,
    providers: Providers,
    state: Mutex<Lifecycle>,
    readiness: Mutex<ProviderReadiness>,
}

impl ConversationOrchestrator {
    /// Build over a provider bundle. No I/O happens until `initialize`.
    pub fn new(config: Arc<CoachConfig>, providers: Providers) -> Self {
        Self {
            scoring: ScoringEngine::new(config.clone()),
            guardrails: GuardrailsEngine::new(config.clone()),
            config,
            providers,
            state: Mutex::new(Lifecycle::Uninitialized),
            readiness: Mutex::new(ProviderReadiness::default()),
        }
    }

    /// Initialize engines and providers.
    ///
    /// Local self-checks are conjunctive and fail-fast: the engines and the
    /// prompt builder are pure, so a failure there is a defect. Provider
    /// initialization fans out concurrently with an all-settled policy; an
    /// individual failure only marks that seam unavailable.
    pub async fn initialize(&self) -> Result<()> {
        *self.state.lock() = Lifecycle::Initializing;
        *self.readiness.lock() = ProviderReadiness::default();

        for (name, health) in [
            ("scoring", self.scoring.health_check()),
            ("guardrails", self.guardrails.health_check()),
            ("prompt_builder", self.providers.prompts.health_check()),
        ] {
            if !health.healthy {
                *self.state.lock() = Lifecycle::Failed;
                return Err(Error::Configuration(format!(
                    "{name} self-check failed: {}",
                    health.detail.unwrap_or_default()
                )));
            }
        }

        let (stt, tts, llm) = futures::join!(
            self.providers.stt.initialize(),
            self.providers.tts.initialize(),
            self.providers.llm.initialize(),
        );
        let mut readiness = self.readiness.lock();
        readiness.stt = settle("stt", self.providers.stt.name(), stt);
        readiness.tts = settle("tts", self.providers.tts.name(), tts);
        readiness.llm = settle("llm", self.providers.llm.name(), llm);
        drop(readiness);

        *self.state.lock() = Lifecycle::Ready;
        info!("orchestrator ready");
        Ok(())
    }

    /// One conversation turn: audio in, approved patient reply (and audio) out.
    ///
    /// Appends the professional's transcript and the approved reply to the
    /// caller-owned `history`. The returned text has always passed guardrails.
    pub async fn process_turn(
        &self,
        audio: &AudioClip,
        session_id: &str,
        persona: &PatientPersona,
        turn_context: &TurnContext,
        history: &mut Vec<Turn>,
        options: &CallOptions,
    ) -> Result<TurnOutcome> {
        self.ensure_ready("process_turn")?;
        let request_id = Uuid::new_v4();
        debug!(%request_id, session_id, turn = turn_context.turn_index, "processing turn");

        self.require_provider(Seam::Stt, "stt", "transcribe", session_id)?;
        let transcript = self
            .bounded(
                self.providers.stt.transcribe(audio, session_id),
                self.providers.stt.name(),
                "transcribe",
                session_id,
                options,
            )
            .await?;

        let prompt = self
            .providers
            .prompts
            .build_persona_prompt(persona, turn_context, &transcript.text);
        self.require_provider(Seam::Llm, "llm", "complete_turn", session_id)?;
        let settings = &self.config.pipeline;
        let request = CompletionRequest::new(prompt)
            .with_temperature(settings.llm_temperature)
            .with_max_tokens(settings.llm_max_tokens)
            .with_context(context_messages(history));
        let completion = self
            .bounded(
                self.providers.llm.complete(&request),
                self.providers.llm.name(),
                "complete_turn",
                session_id,
                options,
            )
            .await?;

        let validation =
            self.guardrails
                .validate_patient_response(&completion.text, persona, history);
        let approved_response = self.approve(&completion.text, &validation);

        let audio_result = if self.readiness.lock().tts.is_ready() {
            let mut synthesis = SynthesisRequest::new(approved_response.clone());
            synthesis.voice = settings.tts_voice.clone();
            Some(
                self.bounded(
                    self.providers.tts.synthesize(&synthesis),
                    self.providers.tts.name(),
                    "synthesize",
                    session_id,
                    options,
                )
                .await?,
            )
        } else {
            warn!(session_id, "tts unavailable, returning text-only turn");
            None
        };

        history.push(Turn::professional(transcript.text.clone()));
        history.push(Turn::patient(approved_response.clone()));

        Ok(TurnOutcome {
            transcript,
            approved_response,
            validation,
            audio: audio_result,
        })
    }

    /// Feedback pipeline: deterministic scoring first, then AI-authored
    /// feedback, validated and repaired through the correction merge.
    #[allow(clippy::too_many_arguments)]
    pub async fn generate_feedback(
        &self,
        transcript: &str,
        persona: &PatientPersona,
        duration_seconds: u32,
        profession: Profession,
        difficulty: &str,
        scenario_type: &str,
        options: &CallOptions,
    ) -> Result<FeedbackReport> {
        self.ensure_ready("generate_feedback")?;
        let session_id = "feedback";

        let scoring =
            self.scoring
                .calculate_scores(transcript, persona, duration_seconds, profession);

        self.require_provider(Seam::Llm, "llm", "complete_feedback", session_id)?;
        let prompt = self
            .providers
            .prompts
            .build_feedback_prompt(&FeedbackPromptContext {
                transcript: transcript.to_string(),
                persona: persona.clone(),
                profession,
                duration_seconds,
                difficulty: difficulty.to_string(),
                scenario_type: scenario_type.to_string(),
            });
        let settings = &self.config.pipeline;
        let request = CompletionRequest::new(prompt)
            .with_temperature(settings.feedback_temperature)
            .with_max_tokens(settings.feedback_max_tokens);
        let completion = self
            .bounded(
                self.providers.llm.complete(&request),
                self.providers.llm.name(),
                "complete_feedback",
                session_id,
                options,
            )
            .await?;

        let (feedback, correction) = match parse_feedback(&completion.text) {
            Some(draft) => {
                let validation = self.guardrails.validate_feedback_response(&draft, transcript);
                let feedback =
                    correction::correct(Some(&draft), &scoring, validation.rejected_fields);
                let correction = (!validation.result.is_valid).then_some(validation.result);
                (feedback, correction)
            }
            None => {
                let synthesized = ValidationResult::invalid_without_substitute(
                    vec!["Model feedback was not parseable JSON".to_string()],
                    Severity::Critical,
                    0.3,
                );
                (
                    correction::correct(None, &scoring, RejectedFields::default()),
                    Some(synthesized),
                )
            }
        };
        if correction.is_some() {
            debug!("feedback repaired via correction merge");
        }

        Ok(FeedbackReport {
            feedback,
            scoring,
            correction,
        })
    }

    /// Aggregate every component's health probe. `overall` is true only when
    /// every component, including degraded providers, reports healthy.
    pub async fn health_check(&self) -> HealthReport {
        let (stt, tts, llm) = futures::join!(
            self.providers.stt.health_check(),
            self.providers.tts.health_check(),
            self.providers.llm.health_check(),
        );

        let mut components = BTreeMap::new();
        {
            let readiness = self.readiness.lock();
            components.insert("stt".to_string(), merge_status(stt, &readiness.stt));
            components.insert("tts".to_string(), merge_status(tts, &readiness.tts));
            components.insert("llm".to_string(), merge_status(llm, &readiness.llm));
        }
        components.insert(
            "prompt_builder".to_string(),
            self.providers.prompts.health_check(),
        );
        components.insert("scoring".to_string(), self.scoring.health_check());
        components.insert("guardrails".to_string(), self.guardrails.health_check());

        let overall = components.values().all(|c| c.healthy);
        HealthReport {
            overall,
            components,
        }
    }

    fn ensure_ready(&self, operation: &'static str) -> Result<()> {
        match *self.state.lock() {
            Lifecycle::Ready => Ok(()),
            _ => Err(Error::NotInitialized(operation)),
        }
    }

    fn require_provider(
        &self,
        seam: Seam,
        provider: &str,
        stage: &str,
        session_id: &str,
    ) -> Result<()> {
        let readiness = self.readiness.lock();
        let status = match seam {
            Seam::Stt => &readiness.stt,
            Seam::Llm => &readiness.llm,
        };
        match status {
            ProviderStatus::Ready => Ok(()),
            ProviderStatus::Unavailable(message) => Err(Error::provider_unavailable(
                provider,
                stage,
                session_id,
                message.clone(),
            )),
        }
    }

    /// The approved text favors sanitized output over failing closed, except
    /// under the fail-closed policy for critical severity.
    fn approve(&self, raw: &str, validation: &ValidationResult) -> String {
        if validation.is_valid {
            return raw.to_string();
        }
        if validation.is_critical()
            && self.config.pipeline.critical_policy == CriticalResponsePolicy::FailClosed
        {
            warn!("critical validation failure, returning scripted fallback");
            return self.config.pipeline.fallback_patient_reply.clone();
        }
        validation
            .sanitized_response
            .clone()
            .unwrap_or_else(|| self.guardrails.sanitize_response(raw, ResponseKind::PatientVoice))
    }

    /// Apply the caller's timeout to one provider call.
    async fn bounded<T>(
        &self,
        call: impl Future<Output = Result<T>>,
        provider: &str,
        stage: &str,
        session_id: &str,
        options: &CallOptions,
    ) -> Result<T> {
        match options.timeout {
            Some(limit) => match tokio::time::timeout(limit, call).await {
                Ok(result) => result,
                Err(_) => Err(Error::provider_unavailable(
                    provider,
                    stage,
                    session_id,
                    format!("timed out after {}ms", limit.as_millis()),
                )),
            },
            None => call.await,
        }
    }
}

fn settle(seam: &str, name: &str, outcome: Result<()>) -> ProviderStatus {
    match outcome {
        Ok(()) => ProviderStatus::Ready,
        Err(error) => {
            warn!(seam, provider = name, %error, "provider unavailable after initialization");
            ProviderStatus::Unavailable(error.to_string())
        }
    }
}

fn merge_status(probe: ComponentHealth, status: &ProviderStatus) -> ComponentHealth {
    match status {
        ProviderStatus::Ready => probe,
        ProviderStatus::Unavailable(message) => ComponentHealth::failing(message.clone()),
    }
}

fn context_messages(history: &[Turn]) -> Vec<Message> {
    history
        .iter()
        .map(|turn| match turn.role {
            TurnRole::Professional => Message::user(turn.text.clone()),
            TurnRole::Patient => Message::assistant(turn.text.clone()),
        })
        .collect()
}

fn parse_feedback(text: &str) -> Option<FeedbackDraft> {
    let json = extract_json(text)?;
    match serde_json::from_str::<FeedbackDraft>(json) {
        Ok(draft) => Some(draft),
        Err(error) => {
            warn!(%error, "malformed model feedback, falling back to deterministic scoring");
            None
        }
    }
}

/// Models often wrap JSON in prose or code fences; take the outermost braces.
fn extract_json(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end >= start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_json_from_fenced_output() {
        let wrapped = "Here you go:\n```json\n{\"overall_score\": 80}\n```";
        assert_eq!(extract_json(wrapped), Some("{\"overall_score\": 80}"));
        assert_eq!(extract_json("no json here"), None);
    }

    #[test]
    fn context_messages_preserve_roles() {
        let history = vec![Turn::professional("Hello"), Turn::patient("Hi doctor")];
        let messages = context_messages(&history);
        assert_eq!(messages[0], Message::user("Hello"));
        assert_eq!(messages[1], Message::assistant("Hi doctor"));
    }

    #[tokio::test]
    async fn operations_require_initialization() {
        let orchestrator = ConversationOrchestrator::new(
            Arc::new(CoachConfig::default()),
            Providers::stubbed(),
        );
        let persona = PatientPersona::new("Ana", 55, "hypertension");
        let err = orchestrator
            .generate_feedback(
                "Doctor: Hello.",
                &persona,
                60,
                Profession::Doctor,
                "easy",
                "consultation",
                &CallOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotInitialized("generate_feedback")));
    }
}
