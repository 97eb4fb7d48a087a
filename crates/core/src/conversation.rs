//! Conversation turns
//!
//! The history is owned by the caller; the pipeline only ever appends to it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who spoke a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// The practising healthcare professional (the human learner).
    Professional,
    /// The simulated patient (model-generated, guardrails-approved).
    Patient,
}

/// One utterance in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn professional(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Professional,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn patient(text: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Patient,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_roles() {
        assert_eq!(Turn::professional("hello").role, TurnRole::Professional);
        assert_eq!(Turn::patient("hi").role, TurnRole::Patient);
    }
}
