//! UI-facing state models held by the reactive store.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Color theme preference.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
    /// Follow the operating system
    #[default]
    Auto,
    Light,
    Dark,
}

impl Theme {
    /// Parses a persisted value, falling back to [`Theme::Auto`].
    pub fn from_persisted(value: &str) -> Self {
        Self::from_str(value).unwrap_or_default()
    }
}

/// Top-level section of the application.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tab {
    #[default]
    Biblioteca,
    Notas,
    Asistente,
    Biblia,
}

/// The document currently open in the reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenDocument {
    pub id: i64,
    pub ruta: String,
    pub nombre: String,
    pub formato: String,
}
