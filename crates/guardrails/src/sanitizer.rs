//! Deterministic text sanitization
//!
//! Pure string surgery, never fails: strips role-marker leakage, redacts
//! PII, censors the profanity blocklist, rewrites overly technical terms,
//! normalizes tone for the target voice, and truncates to a hard ceiling.
//! If nothing survives, a fixed fallback line is returned so the caller
//! always gets usable text.

use regex::Regex;

const PATIENT_CEILING: usize = 500;
const FEEDBACK_CEILING: usize = 2000;
const TRUNCATION_MARKER: &str = " [truncated]";
const REDACTION: &str = "[redacted]";
const PROFANITY_MASK: &str = "****";
const HARSH_REPLACEMENT: &str = "still developing";
const FEEDBACK_FALLBACK: &str =
    "Keep practising; your detailed scores show where to focus next.";

/// Which voice the sanitized text will be delivered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Spoken by the simulated patient; short, advice stripped.
    PatientVoice,
    /// Shown to the learner as coaching; harsh wording softened.
    FeedbackVoice,
}

impl ResponseKind {
    fn ceiling(self) -> usize {
        match self {
            ResponseKind::PatientVoice => PATIENT_CEILING,
            ResponseKind::FeedbackVoice => FEEDBACK_CEILING,
        }
    }
}

pub(crate) struct Sanitizer<'a> {
    pub role_markers: &'a [Regex],
    pub pii: &'a [Regex],
    pub advice: &'a [Regex],
    pub profanity: &'a [Regex],
    pub harsh_words: &'a [Regex],
    /// Compiled technical-term pattern paired with its plain replacement.
    pub rewrites: &'a [(Regex, String)],
    pub patient_fallback: &'a str,
}

impl Sanitizer<'_> {
    pub fn sanitize(&self, text: &str, kind: ResponseKind) -> String {
        let mut out = text.to_string();

        for re in self.role_markers {
            out = re.replace_all(&out, "").into_owned();
        }
        for re in self.pii {
            out = re.replace_all(&out, REDACTION).into_owned();
        }
        for re in self.profanity {
            out = re.replace_all(&out, PROFANITY_MASK).into_owned();
        }
        for (re, replacement) in self.rewrites {
            out = re.replace_all(&out, replacement.as_str()).into_owned();
        }

        match kind {
            ResponseKind::PatientVoice => {
                // A simulated patient must never be heard giving advice.
                for re in self.advice {
                    out = re.replace_all(&out, "").into_owned();
                }
            }
            ResponseKind::FeedbackVoice => {
                for re in self.harsh_words {
                    out = re.replace_all(&out, HARSH_REPLACEMENT).into_owned();
                }
            }
        }

        let out = collapse_whitespace(&out);
        let out = truncate(&out, kind.ceiling());
        if out.is_empty() {
            return match kind {
                ResponseKind::PatientVoice => self.patient_fallback.to_string(),
                ResponseKind::FeedbackVoice => FEEDBACK_FALLBACK.to_string(),
            };
        }
        out
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cut on a character boundary so the marker fits inside the ceiling.
fn truncate(text: &str, ceiling: usize) -> String {
    if text.chars().count() <= ceiling {
        return text.to_string();
    }
    let keep = ceiling.saturating_sub(TRUNCATION_MARKER.chars().count());
    let mut out: String = text.chars().take(keep).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}
