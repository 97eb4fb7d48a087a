//! Patient persona and profession types
//!
//! A persona is the structured description of a simulated patient. It is
//! supplied by the caller, immutable for the lifetime of a session, and is
//! consulted by both the scoring and guardrails engines to keep generated
//! dialogue consistent.

use serde::{Deserialize, Serialize};

/// Emotional state declared for a persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalState {
    #[default]
    Calm,
    Worried,
    Anxious,
    Frustrated,
    Withdrawn,
}

impl EmotionalState {
    /// States where the patient is expected to voice distress or concern.
    pub fn expects_distress(&self) -> bool {
        matches!(self, Self::Worried | Self::Anxious | Self::Frustrated)
    }
}

/// Anxiety level declared for a persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnxietyLevel {
    #[default]
    Low,
    Moderate,
    High,
}

/// Health literacy level, used to judge whether the professional adapted
/// their language to the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HealthLiteracy {
    Low,
    #[default]
    Moderate,
    High,
}

/// Structured description of a simulated patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientPersona {
    pub name: String,
    pub age: u8,
    #[serde(default)]
    pub gender: Option<String>,
    /// Keys the condition-specific medical-term list during scoring.
    pub primary_condition: String,
    #[serde(default)]
    pub medical_history: Vec<String>,
    #[serde(default)]
    pub current_symptoms: Vec<String>,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub emotional_state: EmotionalState,
    #[serde(default)]
    pub anxiety_level: AnxietyLevel,
    #[serde(default)]
    pub health_literacy: HealthLiteracy,
    #[serde(default)]
    pub cultural_background: Option<String>,
}

impl PatientPersona {
    /// Minimal persona for tests and health-check fixtures.
    pub fn new(name: impl Into<String>, age: u8, primary_condition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            age,
            gender: None,
            primary_condition: primary_condition.into(),
            medical_history: Vec::new(),
            current_symptoms: Vec::new(),
            medications: Vec::new(),
            emotional_state: EmotionalState::default(),
            anxiety_level: AnxietyLevel::default(),
            health_literacy: HealthLiteracy::default(),
            cultural_background: None,
        }
    }

    pub fn is_minor(&self) -> bool {
        self.age < 18
    }

    /// True when the persona should come across as distressed in dialogue.
    pub fn expects_distressed_tone(&self) -> bool {
        self.emotional_state.expects_distress() || self.anxiety_level == AnxietyLevel::High
    }
}

/// Healthcare profession of the practising user.
///
/// Drives speaker-tag isolation in transcripts: professional lines are
/// prefixed `"Doctor:"`, `"Nurse:"`, and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    #[default]
    Doctor,
    Nurse,
    Pharmacist,
    Physiotherapist,
    Dentist,
}

impl Profession {
    /// Speaker tag used at the start of transcript lines, without the colon.
    pub fn speaker_tag(&self) -> &'static str {
        match self {
            Profession::Doctor => "Doctor",
            Profession::Nurse => "Nurse",
            Profession::Pharmacist => "Pharmacist",
            Profession::Physiotherapist => "Physiotherapist",
            Profession::Dentist => "Dentist",
        }
    }
}
