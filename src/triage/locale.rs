//! Static per-language strings used by the fallback path and prompt builder.
//!
//! Every `Language` variant has an entry, so lookups cannot miss. Unknown
//! locale codes are coerced to English by `Language::from_code` before they
//! ever reach this table.

use super::types::{CareAction, Language};

/// Fixed strings for one language.
#[derive(Debug)]
pub struct LocaleStrings {
    /// Directive embedded in prompts so the model answers in this language.
    pub language_directive: &'static str,
    pub fallback_condition: &'static str,
    pub fallback_overview: &'static str,
    pub fallback_action: &'static str,
    pub fallback_disclaimer: &'static str,
    pub emergency_condition: &'static str,
    pub emergency_overview: &'static str,
    pub emergency_action: &'static str,
    pub emergency_disclaimer: &'static str,
    /// Chat reply used when the model answered with nothing.
    pub chat_fallback: &'static str,
    /// Chat reply used when the generation call failed outright.
    pub chat_error: &'static str,
    pub chat_welcome: &'static str,
}

static ENGLISH: LocaleStrings = LocaleStrings {
    language_directive: "Respond in English",
    fallback_condition: "General Health Concern",
    fallback_overview:
        "Based on your symptoms, monitoring and professional evaluation may be needed.",
    fallback_action: "Monitor symptoms and consult healthcare professional if they persist",
    fallback_disclaimer:
        "This is an AI suggestion, not a medical diagnosis. Always consult healthcare professionals.",
    emergency_condition: "Medical Emergency",
    emergency_overview: "Critical symptoms requiring immediate medical intervention.",
    emergency_action: "Go to emergency room immediately",
    emergency_disclaimer: "AI suggestion, not medical diagnosis",
    chat_fallback:
        "I'm here to help with your health concerns. Could you tell me more about what you're experiencing?",
    chat_error: "Sorry, I'm having trouble responding right now. Please try again.",
    chat_welcome: "Hello! I'm your AI health assistant. I'm here to help with your health concerns and questions. How can I assist you today?",
};

static HINDI: LocaleStrings = LocaleStrings {
    language_directive: "Respond in Hindi (हिंदी में उत्तर दें)",
    fallback_condition: "सामान्य स्वास्थ्य चिंता",
    fallback_overview:
        "आपके लक्षणों के आधार पर, निगरानी और पेशेवर मूल्यांकन की आवश्यकता हो सकती है।",
    fallback_action: "लक्षणों की निगरानी करें और यदि वे बने रहें तो स्वास्थ्य पेशेवर से सलाह लें",
    fallback_disclaimer: "यह AI सुझाव है, चिकित्सा निदान नहीं। हमेशा स्वास्थ्य पेशेवरों से सलाह लें।",
    emergency_condition: "तत्काल चिकित्सा आपातकाल",
    emergency_overview: "गंभीर लक्षण जिसमें तत्काल चिकित्सा हस्तक्षेप की आवश्यकता है।",
    emergency_action: "तुरंत आपातकालीन कक्ष में जाएं",
    emergency_disclaimer: "यह AI सुझाव है, चिकित्सा निदान नहीं",
    chat_fallback: "मैं आपकी स्वास्थ्य संबंधी चिंताओं में मदद करने के लिए यहां हूं। क्या आप बता सकते हैं कि आप क्या अनुभव कर रहे हैं?",
    chat_error: "क्षमा करें, मुझे अभी जवाब देने में परेशानी हो रही है। कृपया पुनः प्रयास करें।",
    chat_welcome: "नमस्ते! मैं आपका AI स्वास्थ्य सहायक हूं। मैं आपकी स्वास्थ्य संबंधी चिंताओं और प्रश्नों में मदद करने के लिए यहां हूं। आज मैं आपकी कैसे सहायता कर सकता हूं?",
};

static TELUGU: LocaleStrings = LocaleStrings {
    language_directive: "Respond in Telugu (తెలుగులో సమాధానం ఇవ్వండి)",
    fallback_condition: "సాధారణ ఆరోగ్య ఆందోళన",
    fallback_overview:
        "మీ లక్షణాల ఆధారంగా, పర్యవేక్షణ మరియు వృత్తిపరమైన మూల్యాంకనం అవసరం కావచ్చు.",
    fallback_action:
        "లక్షణాలను పర్యవేక్షించండి మరియు అవి కొనసాగితే ఆరోగ్య నిపుణుడిని సంప్రదించండి",
    fallback_disclaimer: "ఇది AI సలహా, వైద్య నిర్ధారణ కాదు. ఎల్లప్పుడూ ఆరోగ్య నిపుణులను సంప్రదించండి.",
    emergency_condition: "తక్షణ వైద్య అత్యవసరం",
    emergency_overview: "తక్షణ వైద్య జోక్యం అవసరమైన తీవ్రమైన లక్షణాలు.",
    emergency_action: "వెంటనే అత్యవసర గదికి వెళ్లండి",
    emergency_disclaimer: "ఇది AI సలహా, వైద్య నిర్ధారణ కాదు",
    chat_fallback: "మీ ఆరోగ్య సమస్యలతో సహాయం చేయడానికి నేను ఇక్కడ ఉన్నాను. మీరు ఏమి అనుభవిస్తున్నారో చెప్పగలరా?",
    chat_error: "క్షమించండి, నేను ప్రస్తుతం ప్రతిస్పందించడంలో ఇబ్బంది పడుతున్నాను. దయచేసి మళ్లీ ప్రయత్నించండి.",
    chat_welcome: "హలో! నేను మీ AI ఆరోగ్య సహాయకుడను. మీ ఆరోగ్య సమస్యలు మరియు ప్రశ్నలతో సహాయం చేయడానికి నేను ఇక్కడ ఉన్నాను. ఈరోజు నేను మీకు ఎలా సహాయం చేయగలను?",
};

/// Look up the fixed strings for a language.
pub fn strings(language: Language) -> &'static LocaleStrings {
    match language {
        Language::English => &ENGLISH,
        Language::Hindi => &HINDI,
        Language::Telugu => &TELUGU,
    }
}

/// Short display label for a care action.
pub fn action_label(action: CareAction, language: Language) -> &'static str {
    match (action, language) {
        (CareAction::Emergency, Language::English) => "Emergency Care",
        (CareAction::Emergency, Language::Hindi) => "आपातकालीन देखभाल",
        (CareAction::Emergency, Language::Telugu) => "అత్యవసర సంరక్షణ",
        (CareAction::Doctor, Language::English) => "See Doctor",
        (CareAction::Doctor, Language::Hindi) => "डॉक्टर से मिलें",
        (CareAction::Doctor, Language::Telugu) => "వైద్యుడిని చూడండి",
        (CareAction::Otc, Language::English) => "Over-the-Counter",
        (CareAction::Otc, Language::Hindi) => "ओवर-द-काउंटर",
        (CareAction::Otc, Language::Telugu) => "ఓవర్-ది-కౌంటర్",
        (CareAction::Rest, Language::English) => "Rest & Monitor",
        (CareAction::Rest, Language::Hindi) => "आराम और निगरानी",
        (CareAction::Rest, Language::Telugu) => "విశ్రాంతి మరియు పర్యవేక్షణ",
    }
}
