//! Guardrails-engine lexicon
//!
//! Pattern entries are regexes compiled once by the engine; phrase entries
//! are lowercase substring matches.

use serde::{Deserialize, Serialize};

use super::strings;

/// One technical-term rewrite applied by the sanitizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRewrite {
    pub from: String,
    pub to: String,
}

impl TermRewrite {
    fn new(from: &str, to: &str) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Pattern tables driving patient-response validation and sanitization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailLexicon {
    /// Advice-giving and dangerous-advice regexes. A simulated patient must
    /// never give clinical advice; hits are critical.
    pub advice_patterns: Vec<String>,
    /// PII / credential leakage regexes. Hits are critical.
    pub pii_patterns: Vec<String>,
    /// Adult-register phrases implausible for a minor persona.
    pub adult_register_phrases: Vec<String>,
    /// Culturally insensitive phrases, blocked at high severity.
    pub cultural_blocklist: Vec<String>,
    /// Known symptom tokens for subset-of-persona extraction.
    pub symptom_vocabulary: Vec<String>,
    /// Known medication tokens for subset-of-persona extraction.
    pub medication_vocabulary: Vec<String>,
    pub anxious_tone_words: Vec<String>,
    pub calm_tone_words: Vec<String>,
    pub frustrated_tone_words: Vec<String>,
    /// At least one of these must appear for a response to count as
    /// healthcare-relevant.
    pub healthcare_context_terms: Vec<String>,
    /// A patient speaking like the clinician crosses the professional boundary.
    pub boundary_violation_phrases: Vec<String>,
    pub profanity: Vec<String>,
    /// Role-marker / system-prompt leakage regexes stripped by the sanitizer.
    pub role_marker_patterns: Vec<String>,
    /// Overly technical terms rewritten to patient-friendly synonyms.
    pub plain_language_rewrites: Vec<TermRewrite>,
    /// Non-constructive words that fail the feedback phrasing filter.
    pub harsh_feedback_words: Vec<String>,
}

impl Default for GuardrailLexicon {
    fn default() -> Self {
        Self {
            advice_patterns: strings(&[
                r"(?i)\byou should take\b",
                r"(?i)\bi recommend\b",
                r"(?i)\byou need to take\b",
                r"(?i)\bincrease your dose\b",
                r"(?i)\bstop taking (?:your |the )?medication\b",
                r"(?i)\bignore (?:your |the )?symptoms\b",
                r"(?i)\bavoid medical care\b",
                r"(?i)\byou don't need a doctor\b",
            ]),
            pii_patterns: strings(&[
                r"\b\d{3}-\d{2}-\d{4}\b",
                r"\b\d{3}-\d{3}-\d{4}\b",
                r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b",
                r"(?i)\bmy password is\b",
                r"(?i)\bmy social security\b",
                r"\b(?:\d[ -]*?){13,16}\b",
            ]),
            adult_register_phrases: strings(&[
                "my wife",
                "my husband",
                "my grandchildren",
                "back in my day",
                "when i was your age",
                "my mortgage",
                "at the office",
            ]),
            cultural_blocklist: strings(&[
                "you people",
                "your kind",
                "those people",
                "not from here",
                "that's just your culture",
            ]),
            symptom_vocabulary: strings(&[
                "headache",
                "nausea",
                "dizziness",
                "fatigue",
                "chest pain",
                "shortness of breath",
                "cough",
                "fever",
                "rash",
                "swelling",
                "numbness",
                "palpitations",
                "wheezing",
                "insomnia",
                "back pain",
            ]),
            medication_vocabulary: strings(&[
                "metformin",
                "insulin",
                "lisinopril",
                "amlodipine",
                "salbutamol",
                "ventolin",
                "aspirin",
                "ibuprofen",
                "paracetamol",
                "atorvastatin",
                "warfarin",
                "omeprazole",
            ]),
            anxious_tone_words: strings(&[
                "worried",
                "scared",
                "afraid",
                "nervous",
                "anxious",
                "panicking",
                "terrified",
                "can't stop thinking",
            ]),
            calm_tone_words: strings(&[
                "fine",
                "okay",
                "no problem",
                "relaxed",
                "not worried",
                "comfortable",
                "all good",
            ]),
            frustrated_tone_words: strings(&[
                "fed up",
                "annoyed",
                "frustrated",
                "sick of",
                "angry",
                "waste of time",
            ]),
            healthcare_context_terms: strings(&[
                "doctor",
                "nurse",
                "pain",
                "symptom",
                "medication",
                "medicine",
                "hospital",
                "appointment",
                "treatment",
                "health",
                "feel",
                "feeling",
                "sick",
                "better",
                "worse",
                "test",
            ]),
            boundary_violation_phrases: strings(&[
                "as your doctor",
                "my diagnosis is",
                "i'm prescribing",
                "my medical opinion",
                "let me examine you",
            ]),
            profanity: strings(&["damn", "hell", "crap", "bloody", "stupid idiot"]),
            role_marker_patterns: strings(&[
                r"(?im)^\s*(?:system|assistant|user)\s*:\s*",
                r"(?i)\bas an ai(?: language model)?\b[^.!?]*[.!?]?",
                r"(?i)\[/?inst\]",
                r"(?i)<\|[a-z_]+\|>",
                r"(?i)\bmy instructions say\b[^.!?]*[.!?]?",
            ]),
            plain_language_rewrites: vec![
                TermRewrite::new("myocardial infarction", "heart attack"),
                TermRewrite::new("cerebrovascular accident", "stroke"),
                TermRewrite::new("hypertension", "high blood pressure"),
                TermRewrite::new("hyperlipidemia", "high cholesterol"),
                TermRewrite::new("analgesic", "pain reliever"),
                TermRewrite::new("antipyretic", "fever reducer"),
                TermRewrite::new("renal", "kidney"),
                TermRewrite::new("hepatic", "liver"),
            ],
            harsh_feedback_words: strings(&[
                "terrible",
                "awful",
                "hopeless",
                "useless",
                "pathetic",
                "failure",
                "incompetent",
                "worst",
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_tables_are_populated() {
        let lexicon = GuardrailLexicon::default();
        assert!(!lexicon.advice_patterns.is_empty());
        assert!(!lexicon.pii_patterns.is_empty());
        assert!(!lexicon.plain_language_rewrites.is_empty());
    }

    #[test]
    fn rewrites_are_lowercase_keys() {
        for rewrite in GuardrailLexicon::default().plain_language_rewrites {
            assert_eq!(rewrite.from, rewrite.from.to_lowercase());
        }
    }
}
