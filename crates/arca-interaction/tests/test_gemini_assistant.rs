use arca_core::config::ArcaConfig;
use arca_core::conversation::TurnRole;
use arca_core::persona::Persona;
use arca_core::preference::{PreferenceKey, PreferenceStore};
use arca_core::{ArcaError, ErrorKind, Result};
use arca_infrastructure::InMemoryPreferenceStore;
use arca_interaction::{GeminiAssistant, MAX_CONTEXT_CHARS, ResponseStyle};
use serde_json::{Value, json};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/gemini-2.5-flash:generateContent";

fn answer(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }], "role": "model" } }]
    }))
}

fn assistant_with_key(server: &MockServer, key: &str) -> GeminiAssistant {
    let prefs = Arc::new(InMemoryPreferenceStore::with_entries([(PreferenceKey::ApiKey, key)]));
    GeminiAssistant::new(&ArcaConfig::default(), prefs).with_endpoint(server.uri())
}

async fn sent_prompt(server: &MockServer) -> String {
    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Store whose writes always fail.
struct ReadOnlyStore;

impl PreferenceStore for ReadOnlyStore {
    fn get(&self, _key: PreferenceKey) -> Result<Option<String>> {
        Ok(Some("original-key".to_string()))
    }

    fn set(&self, _key: PreferenceKey, _value: &str) -> Result<()> {
        Err(ArcaError::io("preferences are read-only"))
    }

    fn remove(&self, _key: PreferenceKey) -> Result<()> {
        Err(ArcaError::io("preferences are read-only"))
    }
}

#[tokio::test]
async fn pastoral_question_returns_first_candidate_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(query_param("key", "test-key"))
        .respond_with(answer("Respuesta X"))
        .expect(1)
        .mount(&server)
        .await;

    let assistant = assistant_with_key(&server, "test-key");
    let reply = assistant
        .send_message("¿Qué significa 'nada me faltará'?", Persona::Pastoral, "Salmo 23")
        .await
        .unwrap();

    assert_eq!(reply, "Respuesta X");

    let prompt = sent_prompt(&server).await;
    assert!(prompt.contains("\"Salmo 23\""));
    assert!(prompt.contains(Persona::Pastoral.instruction()));
    assert!(prompt.ends_with("¿Qué significa 'nada me faltará'?"));

    let history = assistant.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, TurnRole::User);
    assert_eq!(history[0].text, "¿Qué significa 'nada me faltará'?");
    assert_eq!(history[1].role, TurnRole::Model);
    assert_eq!(history[1].text, "Respuesta X");
    server.verify().await;
}

#[tokio::test]
async fn missing_key_fails_without_network() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(answer("no debería llegar"))
        .expect(0)
        .mount(&server)
        .await;

    let prefs = Arc::new(InMemoryPreferenceStore::new());
    let assistant = GeminiAssistant::new(&ArcaConfig::default(), prefs).with_endpoint(server.uri());
    let err = assistant
        .send_message("Hola", Persona::Neofito, "")
        .await
        .unwrap_err();

    assert!(err.is_missing_api_key());
    assert_eq!(err.kind(), ErrorKind::MissingCredential);
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(assistant.history().await.is_empty());
}

#[tokio::test]
async fn long_context_is_cut_to_leading_characters() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(answer("ok"))
        .mount(&server)
        .await;

    let mut context = "α".repeat(MAX_CONTEXT_CHARS - 1);
    context.push_str("βγδ");

    let assistant = assistant_with_key(&server, "test-key");
    assistant
        .send_message("¿Resumen?", Persona::Academico, &context)
        .await
        .unwrap();

    let prompt = sent_prompt(&server).await;
    let expected = format!("\"{}β\"", "α".repeat(MAX_CONTEXT_CHARS - 1));
    assert!(prompt.contains(&expected));
    assert!(!prompt.contains('γ'));
}

#[tokio::test]
async fn style_directives_reach_the_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(answer("ok"))
        .mount(&server)
        .await;

    let assistant = assistant_with_key(&server, "test-key");
    let style = ResponseStyle::default().concise().addressing("Ana");
    assistant
        .send_message_styled("¿Qué es la gracia?", Persona::Reformado, "", &style)
        .await
        .unwrap();

    let prompt = sent_prompt(&server).await;
    assert!(prompt.contains("ESTILO DE RESPUESTA:"));
    assert!(prompt.contains("Dirígete al usuario por su nombre: Ana."));
}

#[tokio::test]
async fn gemini_error_message_is_surfaced() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        })))
        .mount(&server)
        .await;

    let assistant = assistant_with_key(&server, "bad-key");
    let err = assistant
        .send_message("Hola", Persona::Bautista, "")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.to_string(), "API key not valid. Please pass a valid API key.");
    assert!(assistant.history().await.is_empty());
}

#[tokio::test]
async fn missing_candidate_text_is_a_shape_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })))
        .mount(&server)
        .await;

    let assistant = assistant_with_key(&server, "test-key");
    let err = assistant
        .send_message("Hola", Persona::Puritano, "")
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ResponseShape);
    assert!(assistant.history().await.is_empty());
}

#[tokio::test]
async fn clear_history_empties_the_transcript() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(answer("Amén"))
        .mount(&server)
        .await;

    let assistant = assistant_with_key(&server, "test-key");
    assistant.send_message("uno", Persona::Pentecostal, "").await.unwrap();
    assistant.send_message("dos", Persona::Pentecostal, "").await.unwrap();
    assert_eq!(assistant.history().await.len(), 4);

    assistant.clear_history().await;
    assert!(assistant.history().await.is_empty());
}

#[test]
fn set_api_key_updates_memory_and_store() {
    let prefs = Arc::new(InMemoryPreferenceStore::new());
    let assistant = GeminiAssistant::new(&ArcaConfig::default(), prefs.clone());

    assistant.set_api_key("nueva-clave").unwrap();

    assert_eq!(assistant.api_key(), "nueva-clave");
    assert_eq!(
        prefs.get(PreferenceKey::ApiKey).unwrap().as_deref(),
        Some("nueva-clave")
    );

    let reopened = GeminiAssistant::new(&ArcaConfig::default(), prefs);
    assert_eq!(reopened.api_key(), "nueva-clave");
}

#[test]
fn failed_persist_leaves_key_unchanged() {
    let assistant = GeminiAssistant::new(&ArcaConfig::default(), Arc::new(ReadOnlyStore));
    assert_eq!(assistant.api_key(), "original-key");

    let err = assistant.set_api_key("otra").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Local);
    assert_eq!(assistant.api_key(), "original-key");
}
