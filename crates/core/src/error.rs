//! Error taxonomy for the conversation pipeline
//!
//! A failed validation is *not* an error: `ValidationResult { is_valid: false }`
//! is a normal, first-class return value. Errors here cover provider outages,
//! programmer-error guards, and internal defects.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A provider adapter failed or timed out. Transient; the caller may retry.
    #[error("provider '{provider}' unavailable at stage '{stage}' (session {session_id}): {message}")]
    ProviderUnavailable {
        provider: String,
        stage: String,
        session_id: String,
        message: String,
    },

    /// Model output could not be parsed into the expected shape.
    ///
    /// Inside the feedback pipeline this is recovered locally via the
    /// correction merge and never surfaced to the caller.
    #[error("malformed model output: {0}")]
    MalformedModelOutput(String),

    /// Invalid or inconsistent configuration. Fatal at initialize time only.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The orchestrator was used before a successful `initialize()`.
    #[error("not initialized: initialize() must succeed before calling {0}")]
    NotInitialized(&'static str),

    /// A defect inside a pure engine (guardrails/scoring), not bad input.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Annotate a provider failure with its pipeline stage and session.
    pub fn provider_unavailable(
        provider: impl Into<String>,
        stage: impl Into<String>,
        session_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            stage: stage.into(),
            session_id: session_id.into(),
            message: message.into(),
        }
    }

    /// True for errors the caller can meaningfully retry.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ProviderUnavailable { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_carries_stage_and_session() {
        let err = Error::provider_unavailable("whisper", "stt", "sess-42", "timeout");
        let msg = err.to_string();
        assert!(msg.contains("stt"));
        assert!(msg.contains("sess-42"));
        assert!(err.is_retryable());
    }

    #[test]
    fn local_errors_are_not_retryable() {
        assert!(!Error::NotInitialized("process_turn").is_retryable());
        assert!(!Error::Internal("defect".into()).is_retryable());
    }
}
