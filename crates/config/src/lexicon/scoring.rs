//! Scoring-engine lexicon
//!
//! All matching is lowercase substring or word-boundary regex against the
//! professional speaker's lines unless noted otherwise.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::strings;

/// One item of the systematic-approach checklist, matched by any of its phrases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub name: String,
    pub phrases: Vec<String>,
}

impl ChecklistItem {
    fn new(name: &str, phrases: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            phrases: strings(phrases),
        }
    }
}

/// Keyword tables driving the six sub-scores and the structural analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringLexicon {
    /// Fixed vocabulary for `key_phrases_used` (substring match).
    pub key_phrases: Vec<String>,
    /// Consultation-structure checklist for clinical communication.
    pub checklist: Vec<ChecklistItem>,
    pub explanation_markers: Vec<String>,
    pub decision_phrases: Vec<String>,
    /// Emotional-acknowledgment phrases; also the empathy indicators used by
    /// the missed-opportunity rules.
    pub empathy_indicators: Vec<String>,
    pub warm_phrases: Vec<String>,
    pub informal_phrases: Vec<String>,
    pub reassurance_phrases: Vec<String>,
    pub cultural_sensitivity_phrases: Vec<String>,
    pub cultural_insensitive_phrases: Vec<String>,
    /// Regex patterns for frequent learner grammar errors.
    pub grammar_error_patterns: Vec<String>,
    /// Regex patterns for complex grammatical structures.
    pub complex_structure_patterns: Vec<String>,
    pub formal_register_markers: Vec<String>,
    pub informal_register_markers: Vec<String>,
    pub connector_words: Vec<String>,
    pub confidence_words: Vec<String>,
    pub hesitation_words: Vec<String>,
    pub instruction_markers: Vec<String>,
    pub understanding_checks: Vec<String>,
    pub simple_language_markers: Vec<String>,
    /// Condition-specific expected terms, keyed by lowercase `primary_condition`.
    pub condition_terms: HashMap<String, Vec<String>>,
    /// Fallback expected terms when the condition has no dedicated list.
    pub generic_condition_terms: Vec<String>,
    pub general_medical_terms: Vec<String>,
    /// Overly complex for patients; counted as inappropriate terminology.
    pub complex_terms: Vec<String>,
}

impl Default for ScoringLexicon {
    fn default() -> Self {
        let mut condition_terms = HashMap::new();
        condition_terms.insert(
            "diabetes".to_string(),
            strings(&[
                "blood sugar",
                "glucose",
                "insulin",
                "diet",
                "exercise",
                "monitoring",
                "hba1c",
            ]),
        );
        condition_terms.insert(
            "hypertension".to_string(),
            strings(&[
                "blood pressure",
                "salt",
                "sodium",
                "medication",
                "lifestyle",
                "monitoring",
            ]),
        );
        condition_terms.insert(
            "asthma".to_string(),
            strings(&[
                "inhaler",
                "breathing",
                "trigger",
                "wheezing",
                "peak flow",
                "preventer",
            ]),
        );
        condition_terms.insert(
            "copd".to_string(),
            strings(&[
                "breathing",
                "inhaler",
                "oxygen",
                "smoking",
                "exercise",
                "flare-up",
            ]),
        );
        condition_terms.insert(
            "arthritis".to_string(),
            strings(&[
                "joint",
                "pain",
                "stiffness",
                "movement",
                "exercise",
                "anti-inflammatory",
            ]),
        );

        Self {
            key_phrases: strings(&[
                "tell me more",
                "how are you feeling",
                "i understand",
                "let me explain",
                "do you have any questions",
                "is there anything else",
                "that must be",
                "we can work together",
                "your treatment plan",
                "follow up",
            ]),
            checklist: vec![
                ChecklistItem::new(
                    "greeting",
                    &["hello", "good morning", "good afternoon", "my name is", "nice to meet"],
                ),
                ChecklistItem::new(
                    "presenting_complaint",
                    &["what brings you", "how can i help", "what seems to be", "tell me about"],
                ),
                ChecklistItem::new(
                    "history_taking",
                    &["how long", "when did", "have you had", "any history", "previously"],
                ),
                ChecklistItem::new(
                    "explanation",
                    &["let me explain", "this means", "what happens is", "the reason"],
                ),
                ChecklistItem::new(
                    "management_plan",
                    &["plan", "next step", "we will", "treatment", "i suggest", "recommend"],
                ),
                ChecklistItem::new(
                    "closing",
                    &["any questions", "anything else", "follow up", "take care", "see you"],
                ),
            ],
            explanation_markers: strings(&[
                "this means",
                "in other words",
                "to put it simply",
                "what happens is",
                "the reason is",
                "because of this",
            ]),
            decision_phrases: strings(&[
                "what do you think",
                "would you prefer",
                "we can decide together",
                "your choice",
                "how does that sound",
            ]),
            empathy_indicators: strings(&[
                "i understand",
                "that must be",
                "i can see",
                "it sounds like",
                "i hear you",
                "that's understandable",
                "i appreciate",
                "thank you for sharing",
            ]),
            warm_phrases: strings(&[
                "please",
                "thank you",
                "take your time",
                "i'm here to help",
                "we'll get through",
            ]),
            informal_phrases: strings(&[
                "yeah",
                "nope",
                "gonna",
                "wanna",
                "no biggie",
                "chill",
                "dude",
            ]),
            reassurance_phrases: strings(&[
                "don't worry",
                "you're not alone",
                "this is common",
                "we can manage this",
                "there are good options",
                "it's treatable",
            ]),
            cultural_sensitivity_phrases: strings(&[
                "your preferences",
                "your beliefs",
                "what matters to you",
                "your family",
                "if you are comfortable",
            ]),
            cultural_insensitive_phrases: strings(&[
                "your people",
                "where you come from",
                "you people",
                "that's just your culture",
            ]),
            grammar_error_patterns: strings(&[
                r"\bhe don't\b",
                r"\bshe don't\b",
                r"\bit don't\b",
                r"\bhave went\b",
                r"\bhas went\b",
                r"\bmore better\b",
                r"\bmost easiest\b",
                r"\byou was\b",
                r"\bthey was\b",
                r"\bdidn't went\b",
                r"\bdidn't had\b",
                r"\bdoesn't has\b",
                r"\ban (?:[bcdfghjklmnpqrstvwxz]\w+)\b",
            ]),
            complex_structure_patterns: strings(&[
                r"\balthough\b",
                r"\bwhereas\b",
                r"\bhowever\b",
                r"\bwhich\b",
                r"\bunless\b",
                r"\bprovided that\b",
                r"\bin order to\b",
                r"\bnot only\b",
                r"\bhaving \w+ed\b",
                r"\bif you were to\b",
            ]),
            formal_register_markers: strings(&[
                "would you mind",
                "may i",
                "i would suggest",
                "certainly",
                "of course",
            ]),
            informal_register_markers: strings(&["kinda", "sorta", "stuff", "things like that", "whatever"]),
            connector_words: strings(&[
                "firstly",
                "secondly",
                "then",
                "next",
                "finally",
                "therefore",
                "also",
                "additionally",
                "meanwhile",
            ]),
            confidence_words: strings(&["certainly", "definitely", "clearly", "absolutely", "precisely"]),
            hesitation_words: strings(&["um", "uh", "er", "hmm", "like i said", "you know"]),
            instruction_markers: strings(&[
                "you can",
                "try to",
                "make sure",
                "remember to",
                "it's important to",
                "avoid",
                "keep",
                "take this",
            ]),
            understanding_checks: strings(&[
                "do you understand",
                "does that make sense",
                "any questions",
                "is that clear",
                "would you like me to repeat",
                "can you tell me back",
            ]),
            simple_language_markers: strings(&[
                "in simple terms",
                "put simply",
                "in other words",
                "that means",
                "think of it as",
            ]),
            condition_terms,
            generic_condition_terms: strings(&[
                "symptoms",
                "treatment",
                "medication",
                "follow up",
                "test results",
            ]),
            general_medical_terms: strings(&[
                "diagnosis",
                "examination",
                "prescription",
                "dosage",
                "side effects",
                "referral",
                "specialist",
            ]),
            complex_terms: strings(&[
                "myocardial infarction",
                "cerebrovascular accident",
                "hyperlipidemia",
                "idiopathic",
                "iatrogenic",
                "prophylaxis",
                "contraindicated",
                "etiology",
                "comorbidity",
            ]),
        }
    }
}

impl ScoringLexicon {
    /// Expected terms for a condition, falling back to the generic list.
    pub fn terms_for_condition(&self, condition: &str) -> &[String] {
        self.condition_terms
            .get(&condition.to_lowercase())
            .map(|v| v.as_slice())
            .unwrap_or(&self.generic_condition_terms)
    }
}
