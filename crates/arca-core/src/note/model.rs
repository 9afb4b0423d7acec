//! Note domain models.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A notebook entry stored by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Note {
    pub id: i64,
    pub titulo: String,
    pub contenido_html: String,
    #[serde(rename = "previsualización", alias = "previsualizacion")]
    pub previsualizacion: Option<String>,
    pub palabras_clave: Option<String>,
    pub fecha_creacion: Option<String>,
    pub fecha_actualizacion: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for creating or replacing a note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewNote {
    pub titulo: String,
    pub contenido_html: String,
    #[serde(
        rename = "previsualización",
        alias = "previsualizacion",
        skip_serializing_if = "Option::is_none"
    )]
    pub previsualizacion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub palabras_clave: Option<String>,
}

impl NewNote {
    pub fn new(titulo: impl Into<String>, contenido_html: impl Into<String>) -> Self {
        Self {
            titulo: titulo.into(),
            contenido_html: contenido_html.into(),
            previsualizacion: None,
            palabras_clave: None,
        }
    }

    pub fn with_keywords(mut self, palabras_clave: impl Into<String>) -> Self {
        self.palabras_clave = Some(palabras_clave.into());
        self
    }
}

impl From<&Note> for NewNote {
    fn from(note: &Note) -> Self {
        Self {
            titulo: note.titulo.clone(),
            contenido_html: note.contenido_html.clone(),
            previsualizacion: note.previsualizacion.clone(),
            palabras_clave: note.palabras_clave.clone(),
        }
    }
}
