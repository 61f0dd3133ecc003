pub mod config;
pub mod triage; // Symptom analysis, normalization, chat
pub mod hospitals; // Nearby hospital lookup

use tracing_subscriber::EnvFilter;

use crate::config::TriageConfig;
use crate::triage::locale::action_label;
use crate::triage::{
    policy_fallback, sanitize_user_text, AnalysisResult, LlmClient, OllamaClient, TriageError,
    TriageService,
};

pub fn run() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);

    let symptoms = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    let config = TriageConfig::from_env();
    let language = config.language;

    let outcome = match OllamaClient::new(&config.ollama_url, config.timeout_secs) {
        Ok(client) => analyze_once(&TriageService::new(client, config), &symptoms),
        Err(e) => {
            tracing::warn!(error = %e, "Cannot build Ollama client, using fallback");
            offline_analysis(&symptoms, &config)
        }
    };

    match outcome {
        Ok(result) => {
            log_summary(&result, language);
            match serde_json::to_string_pretty(&result) {
                Ok(json) => println!("{json}"),
                Err(e) => tracing::error!(error = %e, "Failed to serialize analysis"),
            }
        }
        Err(TriageError::EmptyInput) => {
            eprintln!("usage: medmind <symptoms...>");
            std::process::exit(2);
        }
        Err(e) => {
            tracing::error!(error = %e, "Symptom analysis failed");
            std::process::exit(1);
        }
    }
}

/// One-shot analysis. The model is confirmed available first; a missing
/// model or unreachable server goes straight to the policy fallback.
fn analyze_once<C: LlmClient>(
    service: &TriageService<C>,
    symptoms: &str,
) -> Result<AnalysisResult, TriageError> {
    if let Err(e) = service.ensure_model_available() {
        tracing::warn!(error = %e, "Model preflight failed, using fallback");
        return offline_analysis(symptoms, service.config());
    }

    service.analyze_symptoms(symptoms, service.config().language)
}

/// Fallback analysis when no model can be reached at all.
fn offline_analysis(symptoms: &str, config: &TriageConfig) -> Result<AnalysisResult, TriageError> {
    let cleaned = sanitize_user_text(symptoms);
    if cleaned.is_empty() {
        return Err(TriageError::EmptyInput);
    }
    Ok(policy_fallback(config.fallback_policy, &cleaned, config.language))
}

fn log_summary(result: &AnalysisResult, language: triage::Language) {
    for condition in &result.possible_conditions {
        tracing::info!(
            confidence = condition.confidence,
            urgency = condition.urgency,
            action = action_label(condition.action, language),
            "Possible condition"
        );
    }
    if result.requires_emergency_care() {
        tracing::warn!(
            peak_urgency = result.peak_urgency(),
            "Assessment calls for emergency care"
        );
    }
}
