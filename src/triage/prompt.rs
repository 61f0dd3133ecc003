use super::locale;
use super::types::Language;

pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"
You are a medical AI assistant that triages symptoms described by a patient.
You suggest possible conditions and an urgency level. You never claim to
diagnose. Output ONLY the JSON object requested, with the exact field names
given, and nothing else.
"#;

pub const CHAT_SYSTEM_PROMPT: &str = r#"
You are a compassionate medical AI assistant. You help people understand
their symptoms and encourage professional care when appropriate.
"#;

/// Number of most recent history lines included in a chat prompt.
pub const MAX_HISTORY_LINES: usize = 20;

/// Build the symptom analysis prompt. `symptoms` must already be sanitized.
///
/// The JSON field names stay in English whatever the response language;
/// only the free-text values follow the language directive.
pub fn build_analysis_prompt(symptoms: &str, language: Language) -> String {
    let directive = locale::strings(language).language_directive;

    format!(
        r#"Analyze these symptoms: "{symptoms}".

{directive}

Provide a JSON response with this exact structure (keep the field names in English):
{{
  "possible_conditions": [
    {{
      "name": "Condition Name",
      "confidence": 75,
      "overview": "Brief 2-sentence medical explanation",
      "action": "rest|otc|doctor|emergency",
      "urgency": 3
    }}
  ],
  "recommended_action": "Clear recommendation",
  "disclaimer": "AI suggestion disclaimer",
  "urgency_level": 3
}}

Rules:
1. Provide 1-3 most likely conditions
2. Confidence: 0-100%
3. Urgency: 1-5 scale (5 = emergency)
4. For emergency symptoms (chest pain, severe bleeding, difficulty breathing), set urgency=5
5. Be accurate, not speculative
6. Include proper medical disclaimer"#
    )
}

/// Build a chat prompt. `message` and `history` lines must already be sanitized.
pub fn build_chat_prompt(message: &str, language: Language, history: &[String]) -> String {
    let directive = locale::strings(language).language_directive;
    let start = history.len().saturating_sub(MAX_HISTORY_LINES);
    let history_context = if history.is_empty() {
        String::new()
    } else {
        format!("\nConversation history: {}", history[start..].join(" | "))
    };

    format!(
        r#"Respond to: "{message}"

{directive}{history_context}

Guidelines:
1. Be empathetic and supportive
2. Ask relevant follow-up questions about symptoms
3. Provide helpful health information
4. Always recommend professional medical care for serious concerns
5. If emergency symptoms mentioned (chest pain, severe bleeding, difficulty breathing), immediately advise seeking emergency care
6. Keep responses conversational and under 100 words"#
    )
}
