use crate::triage::{FallbackPolicy, Language};

/// Application-level constants
pub const APP_NAME: &str = "MedMind";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "medgemma";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

pub const ENV_OLLAMA_URL: &str = "MEDMIND_OLLAMA_URL";
pub const ENV_MODEL: &str = "MEDMIND_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "MEDMIND_TIMEOUT_SECS";
pub const ENV_FALLBACK_POLICY: &str = "MEDMIND_FALLBACK_POLICY";
pub const ENV_LANGUAGE: &str = "MEDMIND_LANGUAGE";

/// Log filter used when `RUST_LOG` is not set.
pub fn default_log_filter() -> &'static str {
    "medmind=info,medmind_lib=info"
}

/// Runtime settings for the triage service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageConfig {
    pub ollama_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub fallback_policy: FallbackPolicy,
    pub language: Language,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            ollama_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            fallback_policy: FallbackPolicy::default(),
            language: Language::default(),
        }
    }
}

impl TriageConfig {
    /// Defaults overridden by `MEDMIND_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns. Blank values are
    /// ignored; unparseable values keep the default and log a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(url) = get(ENV_OLLAMA_URL) {
            config.ollama_url = url.trim().to_string();
        }
        if let Some(model) = get(ENV_MODEL) {
            config.model = model.trim().to_string();
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.timeout_secs = secs,
                _ => tracing::warn!(
                    key = ENV_TIMEOUT_SECS,
                    value = %raw,
                    "Invalid timeout, keeping default"
                ),
            }
        }
        if let Some(raw) = get(ENV_FALLBACK_POLICY) {
            match FallbackPolicy::parse(&raw) {
                Some(policy) => config.fallback_policy = policy,
                None => tracing::warn!(
                    key = ENV_FALLBACK_POLICY,
                    value = %raw,
                    "Unknown fallback policy, keeping default"
                ),
            }
        }
        if let Some(raw) = get(ENV_LANGUAGE) {
            config.language = Language::from_code(&raw);
        }

        config
    }
}
