use serde::{Deserialize, Serialize};

use super::TriageError;

/// Lowest urgency on the 1-5 scale.
pub const MIN_URGENCY: u8 = 1;
/// Highest urgency on the 1-5 scale (5 = emergency).
pub const MAX_URGENCY: u8 = 5;
/// Upper bound for condition confidence (percent).
pub const MAX_CONFIDENCE: u8 = 100;

/// Supported response languages. Anything unrecognized maps to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Hindi,
    Telugu,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::English, Language::Hindi, Language::Telugu];

    /// Permissive lookup: accepts full names and ISO 639-1 codes,
    /// case-insensitively. Unknown values coerce to the default locale.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "hindi" | "hi" => Language::Hindi,
            "telugu" | "te" => Language::Telugu,
            _ => Language::English,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::English => "english",
            Language::Hindi => "hindi",
            Language::Telugu => "telugu",
        }
    }
}

/// Recommended next step for a single condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CareAction {
    Rest,
    Otc,
    Doctor,
    Emergency,
}

impl CareAction {
    /// Exact, case-sensitive match against the wire names.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "rest" => Some(CareAction::Rest),
            "otc" => Some(CareAction::Otc),
            "doctor" => Some(CareAction::Doctor),
            "emergency" => Some(CareAction::Emergency),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CareAction::Rest => "rest",
            CareAction::Otc => "otc",
            CareAction::Doctor => "doctor",
            CareAction::Emergency => "emergency",
        }
    }
}

/// One possible diagnosis, already bounded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub name: String,
    /// 0-100.
    pub confidence: u8,
    pub overview: String,
    pub action: CareAction,
    /// 1-5.
    pub urgency: u8,
}

/// Top-level assessment handed to the UI. Always safe to render as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub possible_conditions: Vec<Condition>,
    pub recommended_action: String,
    pub disclaimer: String,
    /// 1-5.
    pub urgency_level: u8,
}

impl AnalysisResult {
    /// Highest urgency across the overall level and every condition.
    pub fn peak_urgency(&self) -> u8 {
        self.possible_conditions
            .iter()
            .map(|c| c.urgency)
            .fold(self.urgency_level, u8::max)
    }

    pub fn requires_emergency_care(&self) -> bool {
        self.peak_urgency() == MAX_URGENCY
            || self
                .possible_conditions
                .iter()
                .any(|c| c.action == CareAction::Emergency)
    }
}

/// Text-generation capability (allows mocking).
pub trait LlmClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, TriageError>;

    fn is_model_available(&self, model: &str) -> Result<bool, TriageError>;
}
