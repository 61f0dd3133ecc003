// Bridges untrusted model output to the bounded `AnalysisResult` contract.
// Nothing in here returns an error: malformed payloads route to the
// locale fallback, partially malformed ones are repaired field by field.

use serde::Deserialize;
use serde_json::Value;

use super::locale;
use super::types::{
    AnalysisResult, CareAction, Condition, Language, MAX_CONFIDENCE, MAX_URGENCY, MIN_URGENCY,
};

pub const DEFAULT_CONDITION_NAME: &str = "Unknown Condition";
pub const DEFAULT_OVERVIEW: &str = "Medical evaluation needed";
pub const DEFAULT_RECOMMENDED_ACTION: &str = "Consult healthcare professional";
pub const DEFAULT_DISCLAIMER: &str = "AI suggestion, not medical diagnosis";
pub const DEFAULT_CONFIDENCE: u8 = 50;
pub const DEFAULT_URGENCY: u8 = 2;
pub const DEFAULT_ACTION: CareAction = CareAction::Doctor;

const FALLBACK_CONFIDENCE: u8 = 60;
const EMERGENCY_CONFIDENCE: u8 = 95;

/// Expected top-level shape. Every field is read as an untyped value so a
/// wrong type on one field never rejects the rest of the object.
#[derive(Debug, Default, Deserialize)]
struct RawAnalysis {
    possible_conditions: Option<Value>,
    recommended_action: Option<Value>,
    disclaimer: Option<Value>,
    urgency_level: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct RawCondition {
    name: Option<Value>,
    confidence: Option<Value>,
    overview: Option<Value>,
    action: Option<Value>,
    urgency: Option<Value>,
}

/// Extract the embedded JSON object from `raw_text` and validate it.
/// Falls back to the fixed result for `language` when no usable object is found.
pub fn extract_and_validate(raw_text: &str, language: Language) -> AnalysisResult {
    let Some(span) = extract_json_span(raw_text) else {
        tracing::warn!(
            payload_len = raw_text.len(),
            "No JSON object in model response, using fallback analysis"
        );
        return fallback_analysis(language);
    };

    match serde_json::from_str::<Value>(span) {
        Ok(value) if value.is_object() => validate(&value),
        Ok(_) => {
            tracing::warn!(
                payload_len = raw_text.len(),
                "Model response JSON is not an object, using fallback analysis"
            );
            fallback_analysis(language)
        }
        Err(e) => {
            tracing::warn!(
                payload_len = raw_text.len(),
                error = %e,
                "Model response JSON failed to parse, using fallback analysis"
            );
            fallback_analysis(language)
        }
    }
}

/// Greedy brace scan: first `{` through last `}`. Not a parser.
pub fn extract_json_span(raw_text: &str) -> Option<&str> {
    let start = raw_text.find('{')?;
    let end = raw_text.rfind('}')?;
    (end > start).then(|| &raw_text[start..=end])
}

/// Schema step: apply presence/type/range rules to a parsed value.
/// Non-object input yields an all-default result.
pub fn validate(value: &Value) -> AnalysisResult {
    let raw: RawAnalysis = read_object(value);

    let possible_conditions = match raw.possible_conditions {
        Some(Value::Array(items)) => items.iter().map(validate_condition).collect(),
        _ => Vec::new(),
    };

    AnalysisResult {
        possible_conditions,
        recommended_action: read_text(raw.recommended_action.as_ref())
            .unwrap_or_else(|| DEFAULT_RECOMMENDED_ACTION.to_string()),
        disclaimer: read_text(raw.disclaimer.as_ref())
            .unwrap_or_else(|| DEFAULT_DISCLAIMER.to_string()),
        urgency_level: read_bounded(
            raw.urgency_level.as_ref(),
            MIN_URGENCY,
            MAX_URGENCY,
            DEFAULT_URGENCY,
        ),
    }
}

fn validate_condition(value: &Value) -> Condition {
    let raw: RawCondition = read_object(value);

    Condition {
        name: read_text(raw.name.as_ref()).unwrap_or_else(|| DEFAULT_CONDITION_NAME.to_string()),
        confidence: read_bounded(raw.confidence.as_ref(), 0, MAX_CONFIDENCE, DEFAULT_CONFIDENCE),
        overview: read_text(raw.overview.as_ref()).unwrap_or_else(|| DEFAULT_OVERVIEW.to_string()),
        action: raw
            .action
            .as_ref()
            .and_then(Value::as_str)
            .and_then(CareAction::parse)
            .unwrap_or(DEFAULT_ACTION),
        urgency: read_bounded(raw.urgency.as_ref(), MIN_URGENCY, MAX_URGENCY, DEFAULT_URGENCY),
    }
}

/// Deserialize an object into its raw shape; anything else becomes the
/// empty shape. Arrays are rejected up front since serde would otherwise
/// map them onto fields positionally.
fn read_object<T: Default + for<'de> Deserialize<'de>>(value: &Value) -> T {
    if !value.is_object() {
        return T::default();
    }
    T::deserialize(value).unwrap_or_default()
}

/// Non-blank string, kept as the model wrote it.
fn read_text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Numeric value rounded and clamped into `[min, max]`. Strings, booleans,
/// and other non-numbers yield `default`.
fn read_bounded(value: Option<&Value>, min: u8, max: u8, default: u8) -> u8 {
    match value.and_then(Value::as_f64).filter(|n| n.is_finite()) {
        Some(n) => n.round().clamp(f64::from(min), f64::from(max)) as u8,
        None => default,
    }
}

/// Fixed single-condition result for `language`. Pure in `language`.
pub fn fallback_analysis(language: Language) -> AnalysisResult {
    let strings = locale::strings(language);
    AnalysisResult {
        possible_conditions: vec![Condition {
            name: strings.fallback_condition.to_string(),
            confidence: FALLBACK_CONFIDENCE,
            overview: strings.fallback_overview.to_string(),
            action: CareAction::Doctor,
            urgency: DEFAULT_URGENCY,
        }],
        recommended_action: strings.fallback_action.to_string(),
        disclaimer: strings.fallback_disclaimer.to_string(),
        urgency_level: DEFAULT_URGENCY,
    }
}

/// Emergency-tier counterpart of `fallback_analysis`, used when the caller
/// has independent evidence of emergent symptoms.
pub fn emergency_fallback_analysis(language: Language) -> AnalysisResult {
    let strings = locale::strings(language);
    AnalysisResult {
        possible_conditions: vec![Condition {
            name: strings.emergency_condition.to_string(),
            confidence: EMERGENCY_CONFIDENCE,
            overview: strings.emergency_overview.to_string(),
            action: CareAction::Emergency,
            urgency: MAX_URGENCY,
        }],
        recommended_action: strings.emergency_action.to_string(),
        disclaimer: strings.emergency_disclaimer.to_string(),
        urgency_level: MAX_URGENCY,
    }
}

/// Chat replies are prose: pass any non-empty text through verbatim.
/// `None` means the generation call itself failed.
pub fn extract_chat_reply(raw_text: Option<&str>, language: Language) -> String {
    let strings = locale::strings(language);
    match raw_text {
        Some(text) if !text.is_empty() => text.to_string(),
        Some(_) => strings.chat_fallback.to_string(),
        None => strings.chat_error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn assert_bounded(result: &AnalysisResult) {
        assert!((MIN_URGENCY..=MAX_URGENCY).contains(&result.urgency_level));
        assert!(!result.recommended_action.is_empty());
        assert!(!result.disclaimer.is_empty());
        for c in &result.possible_conditions {
            assert!(c.confidence <= MAX_CONFIDENCE);
            assert!((MIN_URGENCY..=MAX_URGENCY).contains(&c.urgency));
            assert!(!c.name.is_empty());
            assert!(!c.overview.is_empty());
        }
    }

    fn well_formed() -> Value {
        json!({
            "possible_conditions": [{
                "name": "Migraine",
                "confidence": 72,
                "overview": "Recurring headache.",
                "action": "otc",
                "urgency": 3
            }],
            "recommended_action": "Rest in a dark room",
            "disclaimer": "Not a diagnosis",
            "urgency_level": 3
        })
    }

    #[test]
    fn clamps_out_of_range_values_and_coerces_action() {
        let raw = r#"{"possible_conditions":[{"name":"Flu","confidence":150,"urgency":0,"action":"xyz","overview":"x"}],"recommended_action":"rest","disclaimer":"d","urgency_level":9}"#;
        let result = extract_and_validate(raw, Language::English);

        assert_eq!(result.possible_conditions.len(), 1);
        let c = &result.possible_conditions[0];
        assert_eq!(c.name, "Flu");
        assert_eq!(c.confidence, 100);
        assert_eq!(c.urgency, 1);
        assert_eq!(c.action, CareAction::Doctor);
        assert_eq!(c.overview, "x");
        assert_eq!(result.urgency_level, 5);
        assert_eq!(result.recommended_action, "rest");
        assert_eq!(result.disclaimer, "d");
    }

    #[test]
    fn extracts_json_from_prose_and_fences() {
        let raw = "Sure, here you go: ```json {\"possible_conditions\":[],\"recommended_action\":\"see doctor\",\"disclaimer\":\"d\",\"urgency_level\":3} ``` ";
        let result = extract_and_validate(raw, Language::English);

        assert!(result.possible_conditions.is_empty());
        assert_eq!(result.recommended_action, "see doctor");
        assert_eq!(result.urgency_level, 3);
    }

    #[test]
    fn non_json_uses_default_locale_fallback() {
        let result = extract_and_validate("not json at all", Language::English);
        assert_eq!(result, fallback_analysis(Language::English));
        assert_eq!(result.urgency_level, 2);
        assert_eq!(result.possible_conditions.len(), 1);
        assert_eq!(result.possible_conditions[0].name, "General Health Concern");
        assert_eq!(result.possible_conditions[0].confidence, 60);
        assert_eq!(result.possible_conditions[0].action, CareAction::Doctor);
    }

    #[test]
    fn unsupported_locale_falls_back_to_english() {
        let language = Language::from_code("klingon");
        let first = extract_and_validate("", language);
        let second = extract_and_validate("", language);
        assert_eq!(first, fallback_analysis(Language::English));
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn fallback_is_localized() {
        let hindi = extract_and_validate("garbage", Language::Hindi);
        assert_eq!(hindi.possible_conditions[0].name, "सामान्य स्वास्थ्य चिंता");
        let telugu = extract_and_validate("garbage", Language::Telugu);
        assert_eq!(telugu.possible_conditions[0].name, "సాధారణ ఆరోగ్య ఆందోళన");
    }

    #[test]
    fn fallback_ignores_alarming_raw_text() {
        let result = extract_and_validate("chest pain and severe bleeding", Language::English);
        assert_eq!(result, fallback_analysis(Language::English));
        assert_eq!(result.urgency_level, 2);
    }

    #[test]
    fn truncated_json_falls_back() {
        let raw = r#"{"possible_conditions":[{"name":"Flu","confidence":70}"#;
        assert_eq!(
            extract_and_validate(raw, Language::English),
            fallback_analysis(Language::English)
        );
    }

    #[test]
    fn reversed_braces_fall_back() {
        assert_eq!(
            extract_and_validate("} nothing here {", Language::Telugu),
            fallback_analysis(Language::Telugu)
        );
    }

    #[test]
    fn greedy_span_covers_first_to_last_brace() {
        assert_eq!(extract_json_span("a {x} b {y} c"), Some("{x} b {y}"));
        assert_eq!(extract_json_span("no braces"), None);
        assert_eq!(extract_json_span("{"), None);
    }

    #[test]
    fn greedy_span_with_two_objects_is_unparseable() {
        let raw = r#"{"urgency_level": 3} and also {"urgency_level": 4}"#;
        assert_eq!(
            extract_and_validate(raw, Language::English),
            fallback_analysis(Language::English)
        );
    }

    #[test]
    fn well_formed_input_passes_through() {
        let result = validate(&well_formed());
        assert_eq!(result.possible_conditions[0].name, "Migraine");
        assert_eq!(result.possible_conditions[0].confidence, 72);
        assert_eq!(result.possible_conditions[0].action, CareAction::Otc);
        assert_eq!(result.possible_conditions[0].urgency, 3);
        assert_eq!(result.recommended_action, "Rest in a dark room");
        assert_eq!(result.disclaimer, "Not a diagnosis");
        assert_eq!(result.urgency_level, 3);
    }

    #[test]
    fn omitting_one_top_level_field_defaults_only_that_field() {
        let base = validate(&well_formed());

        let cases: [(&str, fn(&AnalysisResult, &AnalysisResult)); 4] = [
            ("possible_conditions", |r, b| {
                assert!(r.possible_conditions.is_empty());
                assert_eq!(r.recommended_action, b.recommended_action);
            }),
            ("recommended_action", |r, b| {
                assert_eq!(r.recommended_action, DEFAULT_RECOMMENDED_ACTION);
                assert_eq!(r.possible_conditions, b.possible_conditions);
            }),
            ("disclaimer", |r, b| {
                assert_eq!(r.disclaimer, DEFAULT_DISCLAIMER);
                assert_eq!(r.urgency_level, b.urgency_level);
            }),
            ("urgency_level", |r, b| {
                assert_eq!(r.urgency_level, DEFAULT_URGENCY);
                assert_eq!(r.disclaimer, b.disclaimer);
            }),
        ];

        for (field, check) in cases {
            let mut value = well_formed();
            value.as_object_mut().unwrap().remove(field);
            let result = validate(&value);
            check(&result, &base);
        }
    }

    #[test]
    fn omitting_one_condition_field_defaults_only_that_field() {
        let base = validate(&well_formed()).possible_conditions[0].clone();

        for field in ["name", "confidence", "overview", "action", "urgency"] {
            let mut value = well_formed();
            value["possible_conditions"][0]
                .as_object_mut()
                .unwrap()
                .remove(field);
            let c = validate(&value).possible_conditions[0].clone();

            let expected = match field {
                "name" => Condition { name: DEFAULT_CONDITION_NAME.into(), ..base.clone() },
                "confidence" => Condition { confidence: DEFAULT_CONFIDENCE, ..base.clone() },
                "overview" => Condition { overview: DEFAULT_OVERVIEW.into(), ..base.clone() },
                "action" => Condition { action: DEFAULT_ACTION, ..base.clone() },
                _ => Condition { urgency: DEFAULT_URGENCY, ..base.clone() },
            };
            assert_eq!(c, expected, "field {field}");
        }
    }

    #[test]
    fn wrong_types_are_defaulted() {
        let value = json!({
            "possible_conditions": "not a list",
            "recommended_action": 42,
            "disclaimer": ["d"],
            "urgency_level": "high"
        });
        let result = validate(&value);
        assert!(result.possible_conditions.is_empty());
        assert_eq!(result.recommended_action, DEFAULT_RECOMMENDED_ACTION);
        assert_eq!(result.disclaimer, DEFAULT_DISCLAIMER);
        assert_eq!(result.urgency_level, DEFAULT_URGENCY);
    }

    #[test]
    fn condition_with_wrong_types_is_defaulted() {
        let value = json!({
            "possible_conditions": [{
                "name": 7,
                "confidence": "75",
                "overview": null,
                "action": 3,
                "urgency": true
            }, "bare string", null]
        });
        let result = validate(&value);
        assert_eq!(result.possible_conditions.len(), 3);
        for c in &result.possible_conditions {
            assert_eq!(c.name, DEFAULT_CONDITION_NAME);
            assert_eq!(c.confidence, DEFAULT_CONFIDENCE);
            assert_eq!(c.overview, DEFAULT_OVERVIEW);
            assert_eq!(c.action, DEFAULT_ACTION);
            assert_eq!(c.urgency, DEFAULT_URGENCY);
        }
    }

    #[test]
    fn numeric_edges_clamp_into_range() {
        let cases = [
            (json!(-40), 0, 1),
            (json!(0), 0, 1),
            (json!(1), 1, 1),
            (json!(3.6), 4, 4),
            (json!(5), 5, 5),
            (json!(100), 100, 5),
            (json!(1e308), 100, 5),
            (json!(-1e308), 0, 1),
        ];
        for (input, confidence, urgency) in cases {
            let value = json!({
                "possible_conditions": [{"confidence": input, "urgency": input}],
                "urgency_level": input
            });
            let result = validate(&value);
            assert_eq!(result.possible_conditions[0].confidence, confidence, "{input}");
            assert_eq!(result.possible_conditions[0].urgency, urgency, "{input}");
            assert_eq!(result.urgency_level, urgency, "{input}");
        }
    }

    #[test]
    fn valid_actions_are_preserved() {
        for action in ["rest", "otc", "doctor", "emergency"] {
            let value = json!({"possible_conditions": [{"action": action}]});
            let result = validate(&value);
            assert_eq!(result.possible_conditions[0].action.as_str(), action);
        }
        for action in ["", "REST", "hospital", "Doctor "] {
            let value = json!({"possible_conditions": [{"action": action}]});
            assert_eq!(validate(&value).possible_conditions[0].action, CareAction::Doctor);
        }
    }

    #[test]
    fn blank_strings_are_defaulted() {
        let value = json!({
            "possible_conditions": [{"name": "   ", "overview": ""}],
            "recommended_action": "",
            "disclaimer": "\n"
        });
        let result = validate(&value);
        assert_eq!(result.possible_conditions[0].name, DEFAULT_CONDITION_NAME);
        assert_eq!(result.possible_conditions[0].overview, DEFAULT_OVERVIEW);
        assert_eq!(result.recommended_action, DEFAULT_RECOMMENDED_ACTION);
        assert_eq!(result.disclaimer, DEFAULT_DISCLAIMER);
    }

    #[test]
    fn valid_text_keeps_surrounding_whitespace() {
        let value = json!({
            "possible_conditions": [{"name": "  Flu  ", "overview": "Viral.\n"}],
            "recommended_action": " Rest ",
            "disclaimer": "Not a diagnosis."
        });
        let result = validate(&value);
        assert_eq!(result.possible_conditions[0].name, "  Flu  ");
        assert_eq!(result.possible_conditions[0].overview, "Viral.\n");
        assert_eq!(result.recommended_action, " Rest ");
        assert_eq!(result.disclaimer, "Not a diagnosis.");
    }

    #[test]
    fn validate_non_object_is_all_default() {
        for value in [json!([1, 2, 3, 4]), json!("x"), json!(null), json!(12)] {
            let result = validate(&value);
            assert!(result.possible_conditions.is_empty());
            assert_eq!(result.urgency_level, DEFAULT_URGENCY);
            assert_eq!(result.recommended_action, DEFAULT_RECOMMENDED_ACTION);
        }
    }

    #[test]
    fn totality_over_hostile_inputs() {
        let inputs = [
            "",
            "{",
            "}",
            "{}",
            "{{}}",
            "null",
            "{\"possible_conditions\": null}",
            "{\"possible_conditions\": [[], {}, 1]}",
            "{\"urgency_level\": -0.0}",
            "{\"urgency_level\": 2.5e2}",
            "```json\n{\"disclaimer\": \"ok\"}\n```",
            "{\"possible_conditions\": [{\"confidence\": 12345678901234567890}]}",
            "\u{FEFF}{\"urgency_level\": 4}",
            "{\"a\": \"unterminated}",
        ];
        for input in inputs {
            for language in Language::ALL {
                assert_bounded(&extract_and_validate(input, language));
            }
        }
    }

    #[test]
    fn empty_object_is_validated_not_fallback() {
        let result = extract_and_validate("{}", Language::Hindi);
        assert!(result.possible_conditions.is_empty());
        assert_eq!(result.recommended_action, DEFAULT_RECOMMENDED_ACTION);
        assert_eq!(result.urgency_level, DEFAULT_URGENCY);
    }

    #[test]
    fn emergency_fallback_is_top_tier() {
        for language in Language::ALL {
            let result = emergency_fallback_analysis(language);
            assert_eq!(result.urgency_level, MAX_URGENCY);
            assert_eq!(result.possible_conditions[0].action, CareAction::Emergency);
            assert!(result.requires_emergency_care());
            assert_bounded(&result);
        }
    }

    #[test]
    fn chat_reply_passes_text_through() {
        let reply = "  Drink water and rest.  ";
        assert_eq!(extract_chat_reply(Some(reply), Language::Hindi), reply);
    }

    #[test]
    fn chat_reply_without_response_is_error_sentinel() {
        for language in Language::ALL {
            assert_eq!(
                extract_chat_reply(None, language),
                locale::strings(language).chat_error
            );
        }
        assert_eq!(
            extract_chat_reply(None, Language::from_code("xx")),
            locale::strings(Language::English).chat_error
        );
    }

    #[test]
    fn chat_reply_empty_is_fallback_prompt() {
        assert_eq!(
            extract_chat_reply(Some(""), Language::Telugu),
            locale::strings(Language::Telugu).chat_fallback
        );
    }

    #[test]
    fn chat_reply_whitespace_is_returned_verbatim() {
        for reply in ["   ", "\n", " \t "] {
            assert_eq!(extract_chat_reply(Some(reply), Language::English), reply);
        }
    }
}
