//! Book domain models.
//!
//! Models mirror the backend's JSON bodies. They are deliberately lenient:
//! missing fields take their defaults and unknown fields are kept in `extra`,
//! so a backend schema change never turns a listing into a parse failure.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ui::OpenDocument;

/// A digital book indexed by the backend (local file or Drive).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DigitalBook {
    pub id: i64,
    pub ruta: String,
    pub nombre_archivo: String,
    pub titulo: Option<String>,
    pub autor: Option<String>,
    pub formato: String,
    pub tamano_bytes: i64,
    pub categoria: String,
    pub etiquetas: Option<String>,
    pub hash_md5: String,
    pub num_paginas: Option<i64>,
    pub descripcion: Option<String>,
    /// Drive file id when the book lives in the cloud
    pub ubicacion_nube: Option<String>,
    pub fecha_creacion: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DigitalBook {
    /// Title to show, falling back to the file name.
    pub fn display_title(&self) -> &str {
        self.titulo
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(&self.nombre_archivo)
    }

    /// Builds the reader descriptor for this book.
    pub fn to_open_document(&self) -> OpenDocument {
        OpenDocument {
            id: self.id,
            ruta: self.ruta.clone(),
            nombre: self.display_title().to_string(),
            formato: self.formato.clone(),
        }
    }
}

/// A physical book in the personal catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalBook {
    pub id: i64,
    pub isbn: Option<String>,
    pub titulo: String,
    pub autor: Option<String>,
    pub editorial: Option<String>,
    pub ano_publicacion: Option<i64>,
    pub categoria: Option<String>,
    pub estanteria: Option<String>,
    pub leido: Option<bool>,
    pub notas_personales: Option<String>,
    pub tiene_version_digital: Option<bool>,
    pub id_libro_digital: Option<i64>,
    pub fecha_agregado: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Payload for adding a physical book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPhysicalBook {
    pub titulo: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editorial: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ano_publicacion: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estanteria: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leido: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notas_personales: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tiene_version_digital: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_libro_digital: Option<i64>,
}

impl NewPhysicalBook {
    pub fn new(titulo: impl Into<String>) -> Self {
        Self {
            titulo: titulo.into(),
            ..Self::default()
        }
    }

    /// Pre-fills a new catalog entry from an ISBN lookup.
    pub fn from_lookup(isbn: impl Into<String>, lookup: &IsbnLookup) -> Self {
        Self {
            titulo: lookup.titulo.clone().unwrap_or_default(),
            isbn: Some(isbn.into()),
            autor: lookup.autor.clone(),
            editorial: lookup.editorial.clone(),
            ano_publicacion: lookup.year(),
            categoria: lookup.categoria.clone(),
            ..Self::default()
        }
    }
}

/// Metadata returned by the ISBN lookup endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsbnLookup {
    pub titulo: Option<String>,
    pub autor: Option<String>,
    pub editorial: Option<String>,
    /// Free-form publication date as reported by the upstream catalog
    pub ano_publicacion: Option<Value>,
    pub categoria: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IsbnLookup {
    /// Extracts a four-digit year from the publication date, if any.
    pub fn year(&self) -> Option<i64> {
        match self.ano_publicacion.as_ref()? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s
                .split(|c: char| !c.is_ascii_digit())
                .find(|part| part.len() == 4)
                .and_then(|part| part.parse().ok()),
            _ => None,
        }
    }
}
