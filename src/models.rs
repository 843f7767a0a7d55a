use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One knowledge-base entry, loaded verbatim from the data file.
///
/// Records are opaque field-name → value mappings; the only field with
/// defined semantics is `emergency_type`, which the lookup engine matches
/// against. Field order follows the file and is preserved when the record is
/// rendered into a prompt.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EmergencyRecord(pub serde_json::Map<String, Value>);

impl EmergencyRecord {
    /// The category field used for matching. A missing or non-string value is
    /// treated as the empty string.
    pub fn emergency_type(&self) -> &str {
        self.0
            .get("emergency_type")
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

/// The two languages the assistant supports. Detection collapses everything
/// that is not Urdu to English, so every downstream consumer (templates,
/// voice codes, text direction) can switch on this enum alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Urdu,
}

impl Language {
    /// Locale code used by the speech service.
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Urdu => "ur",
        }
    }

    /// Urdu renders right-to-left; the presentation layer needs this.
    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Urdu)
    }
}

// Groq chat message format
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

// Groq API request format
#[derive(Debug, Serialize, Clone)]
pub struct GroqRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: i32,
    pub top_p: f32,
    pub stream: bool,
}

// Groq API response format
#[derive(Debug, Deserialize)]
pub struct GroqResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChatMessage,
}
