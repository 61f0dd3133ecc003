use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// A compiled emergency phrase with its description.
struct EmergencyPattern {
    regex: Regex,
    description: &'static str,
}

/// Symptom phrases that warrant emergency care regardless of model output.
static EMERGENCY_PATTERNS: LazyLock<Vec<EmergencyPattern>> = LazyLock::new(|| {
    vec![
        pattern(r"(?i)\bchest\s+(?:pain|pressure|tightness)\b", "Chest pain"),
        pattern(
            r"(?i)\b(?:difficulty|trouble)\s+breathing\b|\b(?:can'?t|cannot|unable\s+to)\s+breathe\b",
            "Difficulty breathing",
        ),
        pattern(
            r"(?i)\bsevere\s+bleeding\b|\bbleeding\s+(?:heavily|profusely)\b",
            "Severe bleeding",
        ),
        pattern(r"(?i)\bunconscious(?:ness)?\b|\bpassed\s+out\b", "Loss of consciousness"),
        pattern(r"(?i)\bstroke\b", "Stroke"),
    ]
});

fn pattern(regex_str: &str, description: &'static str) -> EmergencyPattern {
    EmergencyPattern {
        regex: Regex::new(regex_str).expect("Invalid emergency regex pattern"),
        description,
    }
}

/// First emergency phrase found in the user's own words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmergencyMatch {
    pub matched_text: String,
    pub offset: usize,
    pub reason: &'static str,
}

/// Scan symptom text for emergency phrases. Returns the earliest match.
pub fn detect_emergency(symptoms: &str) -> Option<EmergencyMatch> {
    EMERGENCY_PATTERNS
        .iter()
        .filter_map(|ep| {
            ep.regex.find(symptoms).map(|m| EmergencyMatch {
                matched_text: m.as_str().to_string(),
                offset: m.start(),
                reason: ep.description,
            })
        })
        .min_by_key(|m| m.offset)
}
