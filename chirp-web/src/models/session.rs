use crate::config::RealtimeSettings;
use serde::Serialize;

/// Modalities requested when the caller names none.
pub const DEFAULT_MODALITIES: [&str; 2] = ["text", "audio"];

/// Fallback values for parameters the caller leaves out.
#[derive(Debug, Clone)]
pub struct SessionDefaults {
    pub model: String,
    pub voice: String,
}

impl From<&RealtimeSettings> for SessionDefaults {
    fn from(settings: &RealtimeSettings) -> Self {
        Self {
            model: settings.default_model.clone(),
            voice: settings.default_voice.clone(),
        }
    }
}

/// Body of the upstream session-creation call.
///
/// `instructions` is omitted from the JSON entirely when absent; the upstream
/// treats an explicit `null` differently from a missing key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionRequest {
    pub model: String,
    pub voice: String,
    pub modalities: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

impl SessionRequest {
    /// Build a request from a raw query string, filling in defaults.
    ///
    /// `model`, `voice` and `instructions` take their first occurrence,
    /// `modalities` collects every occurrence in order. An empty
    /// `instructions` value counts as absent. Malformed percent escapes are
    /// decoded lossily rather than rejected.
    pub fn from_query(query: Option<&str>, defaults: &SessionDefaults) -> Self {
        // Form decoding into string pairs never fails; bad escapes pass through verbatim.
        let pairs: Vec<(String, String)> =
            serde_urlencoded::from_str(query.unwrap_or_default()).unwrap_or_default();

        let first = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        };

        let mut modalities: Vec<String> = pairs
            .iter()
            .filter(|(k, _)| k == "modalities")
            .map(|(_, v)| v.clone())
            .collect();
        if modalities.is_empty() {
            modalities = DEFAULT_MODALITIES.iter().map(|m| m.to_string()).collect();
        }

        Self {
            model: first("model").unwrap_or_else(|| defaults.model.clone()),
            voice: first("voice").unwrap_or_else(|| defaults.voice.clone()),
            modalities,
            instructions: first("instructions").filter(|i| !i.is_empty()),
        }
    }
}
