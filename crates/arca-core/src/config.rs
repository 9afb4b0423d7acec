//! Configuration model.
//!
//! Values are resolved by the infrastructure layer from the environment and
//! an optional `config.toml`; this module only defines shapes and defaults.

use serde::{Deserialize, Serialize};

/// Backend base URL used when nothing is configured.
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000";

/// Gemini model targeted by the assistant.
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

/// Base of the Gemini `generateContent` endpoints.
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const ENV_API_BASE_URL: &str = "ARCA_API_BASE_URL";
pub const ENV_GEMINI_API_KEY: &str = "ARCA_GEMINI_API_KEY";
pub const ENV_GEMINI_MODEL: &str = "ARCA_GEMINI_MODEL";

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArcaConfig {
    /// Base URL of the library backend, without trailing slash
    pub api_base_url: String,
    /// Default Gemini API key; a persisted user override takes precedence
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
}

impl Default for ArcaConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            gemini_api_key: None,
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
        }
    }
}

/// On-disk shape of `config.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gemini: Option<GeminiSection>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}
