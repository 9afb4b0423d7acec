//! GeminiAssistant - persona-framed questions against the Gemini REST API.
//!
//! The assistant owns the API credential and an in-memory transcript. Each
//! call composes a single prompt (see [`crate::prompt`]) and issues one
//! `generateContent` request; there is no retry and no streaming.

use crate::prompt::{PromptComposer, ResponseStyle};
use arca_core::config::{ArcaConfig, DEFAULT_GEMINI_ENDPOINT};
use arca_core::conversation::ConversationTurn;
use arca_core::persona::Persona;
use arca_core::preference::{PreferenceKey, PreferenceStore};
use arca_core::{ArcaError, Result};
use arca_infrastructure::{ConfigService, FilePreferenceStore};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, RwLock};

/// Message used when Gemini reports an error without a message.
const GENERIC_GEMINI_ERROR: &str = "Error en Gemini API";

/// Assistant that talks to the Gemini HTTP API on behalf of a persona.
pub struct GeminiAssistant {
    client: Client,
    endpoint: String,
    model: String,
    api_key: RwLock<String>,
    key_update: Mutex<()>,
    preferences: Arc<dyn PreferenceStore>,
    history: tokio::sync::Mutex<Vec<ConversationTurn>>,
    composer: PromptComposer,
}

impl GeminiAssistant {
    /// Creates an assistant, resolving the credential from the persisted
    /// override first and the configured default second.
    pub fn new(config: &ArcaConfig, preferences: Arc<dyn PreferenceStore>) -> Self {
        let api_key = resolve_api_key(config, preferences.as_ref());

        Self {
            client: Client::new(),
            endpoint: DEFAULT_GEMINI_ENDPOINT.to_string(),
            model: config.gemini_model.clone(),
            api_key: RwLock::new(api_key),
            key_update: Mutex::new(()),
            preferences,
            history: tokio::sync::Mutex::new(Vec::new()),
            composer: PromptComposer::new(),
        }
    }

    /// Loads configuration and preferences from their default locations.
    pub fn try_from_env() -> Result<Self> {
        let config = ConfigService::default().get_config();
        let preferences = FilePreferenceStore::new()?;
        Ok(Self::new(&config, Arc::new(preferences)))
    }

    /// Overrides the models base URL (for proxies and tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Current credential; empty when none is configured.
    pub fn api_key(&self) -> String {
        self.api_key
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key().is_empty()
    }

    /// Replaces the credential in the preference store and in memory.
    ///
    /// The persisted entry is written first; if the write fails neither copy
    /// changes. Readers are only blocked for the in-memory swap, while
    /// concurrent setters are serialized so both copies end up equal.
    pub fn set_api_key(&self, key: &str) -> Result<()> {
        let _update = self.key_update.lock().unwrap_or_else(|e| e.into_inner());
        self.preferences.set(PreferenceKey::ApiKey, key)?;
        *self.api_key.write().unwrap_or_else(|e| e.into_inner()) = key.to_string();
        tracing::info!("Gemini API key updated");
        Ok(())
    }

    /// Instruction text for a free-text persona id, with default fallback.
    pub fn get_persona_prompt(&self, persona_id: &str) -> &'static str {
        Persona::from_id(persona_id).instruction()
    }

    /// Asks `message` as `persona`, with `context` embedded in the prompt.
    pub async fn send_message(
        &self,
        message: &str,
        persona: Persona,
        context: &str,
    ) -> Result<String> {
        self.send_message_styled(message, persona, context, &ResponseStyle::default())
            .await
    }

    /// Like [`send_message`](Self::send_message), adding response-style
    /// directives to the prompt.
    pub async fn send_message_styled(
        &self,
        message: &str,
        persona: Persona,
        context: &str,
        style: &ResponseStyle,
    ) -> Result<String> {
        let api_key = self.api_key();
        if api_key.is_empty() {
            return Err(ArcaError::MissingApiKey);
        }

        let prompt = self.composer.compose(persona, context, message, style)?;
        tracing::debug!(
            persona = %persona,
            model = %self.model,
            prompt_chars = prompt.chars().count(),
            "Sending prompt to Gemini"
        );

        let answer = self
            .generate(&api_key, prompt)
            .await
            .inspect_err(|e| tracing::error!("Gemini Error: {}", e))?;

        let mut history = self.history.lock().await;
        history.push(ConversationTurn::user(message));
        history.push(ConversationTurn::model(answer.clone()));

        Ok(answer)
    }

    /// Snapshot of the transcript.
    pub async fn history(&self) -> Vec<ConversationTurn> {
        self.history.lock().await.clone()
    }

    pub async fn clear_history(&self) {
        self.history.lock().await.clear();
    }

    async fn generate(&self, api_key: &str, prompt: String) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.endpoint, self.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                ArcaError::transport(format!("Gemini API request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| {
                ArcaError::transport(format!("Failed to read Gemini response: {}", e.without_url()))
            })?;

        if !status.is_success() {
            return Err(ArcaError::generation(status.as_u16(), gemini_error_message(&bytes)));
        }

        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes).map_err(|e| {
            ArcaError::unexpected_response(format!("Failed to parse Gemini response: {}", e))
        })?;

        extract_text_response(parsed)
    }
}

fn resolve_api_key(config: &ArcaConfig, preferences: &dyn PreferenceStore) -> String {
    let persisted = match preferences.get(PreferenceKey::ApiKey) {
        Ok(value) => value.filter(|key| !key.is_empty()),
        Err(e) => {
            tracing::warn!("Could not read persisted API key: {}", e);
            None
        }
    };

    persisted
        .or_else(|| config.gemini_api_key.clone())
        .unwrap_or_default()
}

#[derive(Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Reads `candidates[0].content.parts[0].text`.
fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| {
            ArcaError::unexpected_response("Gemini API returned no text in the first candidate")
        })
}

fn gemini_error_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_GEMINI_ERROR.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use arca_infrastructure::InMemoryPreferenceStore;
    use std::sync::mpsc;

    fn config_with_key(key: Option<&str>) -> ArcaConfig {
        ArcaConfig {
            gemini_api_key: key.map(str::to_string),
            ..ArcaConfig::default()
        }
    }

    #[test]
    fn test_persisted_key_wins_over_config() {
        let prefs = Arc::new(InMemoryPreferenceStore::with_entries([(
            PreferenceKey::ApiKey,
            "user-key",
        )]));
        let assistant = GeminiAssistant::new(&config_with_key(Some("env-key")), prefs);
        assert_eq!(assistant.api_key(), "user-key");
    }

    #[test]
    fn test_config_key_used_without_override() {
        let prefs = Arc::new(InMemoryPreferenceStore::new());
        let assistant = GeminiAssistant::new(&config_with_key(Some("env-key")), prefs);
        assert_eq!(assistant.api_key(), "env-key");
    }

    #[test]
    fn test_empty_key_without_any_source() {
        let prefs = Arc::new(InMemoryPreferenceStore::new());
        let assistant = GeminiAssistant::new(&config_with_key(None), prefs);
        assert!(!assistant.has_api_key());
        assert_eq!(assistant.model(), "gemini-2.5-flash");
    }

    /// Store whose `set` blocks until the test releases it.
    struct GatedStore {
        entered: Mutex<mpsc::Sender<()>>,
        release: Mutex<mpsc::Receiver<()>>,
    }

    impl PreferenceStore for GatedStore {
        fn get(&self, _key: PreferenceKey) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: PreferenceKey, _value: &str) -> Result<()> {
            self.entered.lock().unwrap().send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
            Ok(())
        }

        fn remove(&self, _key: PreferenceKey) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_api_key_readable_while_new_key_persists() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let store = Arc::new(GatedStore {
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
        });
        let assistant = Arc::new(GeminiAssistant::new(&config_with_key(Some("old-key")), store));

        let writer = {
            let assistant = assistant.clone();
            std::thread::spawn(move || assistant.set_api_key("new-key"))
        };

        entered_rx.recv().unwrap();
        assert_eq!(assistant.api_key(), "old-key");
        assert!(assistant.has_api_key());

        release_tx.send(()).unwrap();
        writer.join().unwrap().unwrap();
        assert_eq!(assistant.api_key(), "new-key");
    }

    #[test]
    fn test_unknown_persona_prompt_is_default() {
        let prefs = Arc::new(InMemoryPreferenceStore::new());
        let assistant = GeminiAssistant::new(&config_with_key(None), prefs);
        assert_eq!(
            assistant.get_persona_prompt("luterano"),
            Persona::Neofito.instruction()
        );
        assert_eq!(
            assistant.get_persona_prompt("puritano"),
            Persona::Puritano.instruction()
        );
    }

    #[test]
    fn test_extract_text_response_requires_first_part_text() {
        let ok: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Respuesta X"},{"text":"otra"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text_response(ok).unwrap(), "Respuesta X");

        for body in [
            r#"{}"#,
            r#"{"candidates":[]}"#,
            r#"{"candidates":[{"content":{"parts":[]}}]}"#,
        ] {
            let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
            let err = extract_text_response(parsed).unwrap_err();
            assert_eq!(err.kind(), arca_core::ErrorKind::ResponseShape, "body: {body}");
        }
    }

    #[test]
    fn test_gemini_error_message_fallback() {
        assert_eq!(
            gemini_error_message(br#"{"error":{"code":400,"message":"API key not valid."}}"#),
            "API key not valid."
        );
        assert_eq!(gemini_error_message(b"upstream timeout"), GENERIC_GEMINI_ERROR);
        assert_eq!(gemini_error_message(br#"{"error":{}}"#), GENERIC_GEMINI_ERROR);
    }
}
