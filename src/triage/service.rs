//! Symptom analysis and chat orchestration.
//!
//! Sanitize -> build prompt -> generate -> normalize. Upstream failures never
//! surface as errors: they route to the normalizer's fallback content. The
//! only error a caller sees is `TriageError::EmptyInput`.

use serde::{Deserialize, Serialize};

use super::emergency::detect_emergency;
use super::normalizer::{
    emergency_fallback_analysis, extract_and_validate, extract_chat_reply, fallback_analysis,
};
use super::prompt::{
    build_analysis_prompt, build_chat_prompt, ANALYSIS_SYSTEM_PROMPT, CHAT_SYSTEM_PROMPT,
};
use super::sanitize::sanitize_user_text;
use super::types::{AnalysisResult, Language, LlmClient};
use super::TriageError;
use crate::config::TriageConfig;

/// How the service picks a fallback when the generation call fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Always the generic low-urgency fallback.
    Generic,
    /// Emergency-tier fallback when the user's own words match the
    /// emergency screen, generic otherwise.
    #[default]
    EmergencyAware,
}

impl FallbackPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "generic" => Some(FallbackPolicy::Generic),
            "emergency_aware" | "emergency-aware" => Some(FallbackPolicy::EmergencyAware),
            _ => None,
        }
    }
}

/// Fallback used when no model output exists at all.
pub fn policy_fallback(policy: FallbackPolicy, symptoms: &str, language: Language) -> AnalysisResult {
    match policy {
        FallbackPolicy::Generic => fallback_analysis(language),
        FallbackPolicy::EmergencyAware => match detect_emergency(symptoms) {
            Some(m) => {
                tracing::info!(reason = m.reason, "Emergency phrase in symptoms, escalating fallback");
                emergency_fallback_analysis(language)
            }
            None => fallback_analysis(language),
        },
    }
}

/// Triage entry point. Holds the text-generation capability explicitly.
pub struct TriageService<C: LlmClient> {
    client: C,
    config: TriageConfig,
}

impl<C: LlmClient> TriageService<C> {
    pub fn new(client: C, config: TriageConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &TriageConfig {
        &self.config
    }

    /// Confirm the configured model is served before generating.
    pub fn ensure_model_available(&self) -> Result<(), TriageError> {
        if self.client.is_model_available(&self.config.model)? {
            tracing::info!(model = %self.config.model, "Model confirmed");
            Ok(())
        } else {
            Err(TriageError::ModelUnavailable(self.config.model.clone()))
        }
    }

    /// Analyze free-text symptoms. Always yields a renderable result unless
    /// the input is blank.
    pub fn analyze_symptoms(
        &self,
        symptoms: &str,
        language: Language,
    ) -> Result<AnalysisResult, TriageError> {
        let cleaned = sanitize_user_text(symptoms);
        if cleaned.is_empty() {
            return Err(TriageError::EmptyInput);
        }

        let prompt = build_analysis_prompt(&cleaned, language);
        match self
            .client
            .generate(&self.config.model, &prompt, ANALYSIS_SYSTEM_PROMPT)
        {
            Ok(raw) => Ok(extract_and_validate(&raw, language)),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    model = %self.config.model,
                    "Symptom analysis call failed, using fallback"
                );
                Ok(self.upstream_fallback(&cleaned, language))
            }
        }
    }

    /// Fallback for a failed generation call, per the configured policy.
    pub fn upstream_fallback(&self, symptoms: &str, language: Language) -> AnalysisResult {
        policy_fallback(self.config.fallback_policy, symptoms, language)
    }

    /// Reply to a chat message. `history` holds prior transcript lines
    /// ("User: ..." / "Bot: ..."), oldest first.
    pub fn chat_response(
        &self,
        message: &str,
        language: Language,
        history: &[String],
    ) -> Result<String, TriageError> {
        let cleaned = sanitize_user_text(message);
        if cleaned.is_empty() {
            return Err(TriageError::EmptyInput);
        }

        let history: Vec<String> = history.iter().map(|line| sanitize_user_text(line)).collect();
        let prompt = build_chat_prompt(&cleaned, language, &history);

        let raw = match self
            .client
            .generate(&self.config.model, &prompt, CHAT_SYSTEM_PROMPT)
        {
            Ok(raw) => Some(raw),
            Err(e) => {
                tracing::warn!(error = %e, model = %self.config.model, "Chat call failed");
                None
            }
        };

        Ok(extract_chat_reply(raw.as_deref(), language))
    }
}
