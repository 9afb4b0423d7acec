//! Response models for the dictionary, assistant and status endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Interpretive perspective used by dictionary lookups when none is given.
pub const DEFAULT_PERSPECTIVE: &str = "reformado";

/// A theological dictionary definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DictionaryEntry {
    pub termino: String,
    pub definicion: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Answer from the backend's retrieval-augmented assistant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantAnswer {
    pub respuesta: String,
    /// Metadata of the library fragments used as context
    pub fuentes: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Acknowledgement body returned by background jobs and deletions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendMessage {
    pub mensaje: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Liveness payload of the backend root endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceStatus {
    pub estado: String,
    pub mensaje: String,
    pub version: String,
}

/// Connectivity report of the backend's dependencies.
///
/// Entries are either a plain status string or an object with `estado` and
/// `mensaje`, so the report is kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Diagnostics(pub Map<String, Value>);

impl Diagnostics {
    /// Returns the status text of one component.
    pub fn component_status(&self, name: &str) -> Option<String> {
        match self.0.get(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Object(obj) => obj
                .get("estado")
                .and_then(Value::as_str)
                .map(str::to_string),
            other => Some(other.to_string()),
        }
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_diagnostics_component_status() {
        let diagnostics: Diagnostics = serde_json::from_value(json!({
            "base_datos": "conectada",
            "google_drive": { "estado": "ok", "mensaje": "Credenciales configuradas" },
            "vector_store": "no inicializado"
        }))
        .unwrap();

        assert_eq!(diagnostics.component_status("base_datos").as_deref(), Some("conectada"));
        assert_eq!(diagnostics.component_status("google_drive").as_deref(), Some("ok"));
        assert!(diagnostics.component_status("missing").is_none());
        assert_eq!(diagnostics.components().count(), 3);
    }

    #[test]
    fn test_assistant_answer_defaults_sources() {
        let answer: AssistantAnswer =
            serde_json::from_value(json!({ "respuesta": "La gracia es..." })).unwrap();
        assert_eq!(answer.respuesta, "La gracia es...");
        assert!(answer.fuentes.is_empty());
    }
}
