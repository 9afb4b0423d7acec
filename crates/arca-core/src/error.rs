//! Error types for the El Arca client core.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Broad classification of every failure the client core can surface.
///
/// Callers that only need to decide how to present a failure can match on
/// the kind instead of the individual variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    /// The request never produced an HTTP response.
    Transport,
    /// A remote service answered with a non-success status.
    BackendReported,
    /// The Gemini credential is not configured.
    MissingCredential,
    /// A success response did not have the expected shape.
    ResponseShape,
    /// Local storage, configuration or rendering failed.
    Local,
}

/// A shared error type for the entire client core.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum ArcaError {
    /// Network-level failure (connection refused, DNS, timeout)
    #[error("Transport error: {message}")]
    Transport { message: String },

    /// The library backend answered with a non-success status
    #[error("{message}")]
    Backend { status: u16, message: String },

    /// The generative-language API answered with a non-success status
    #[error("{message}")]
    Generation { status: u16, message: String },

    /// No Gemini API key is configured
    #[error("API_KEY_MISSING")]
    MissingApiKey,

    /// A success response could not be interpreted
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Prompt template rendering error
    #[error("Template error: {0}")]
    Template(String),
}

impl ArcaError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Creates a Backend error
    pub fn backend(status: u16, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    /// Creates a Generation error
    pub fn generation(status: u16, message: impl Into<String>) -> Self {
        Self::Generation {
            status,
            message: message.into(),
        }
    }

    /// Creates an UnexpectedResponse error
    pub fn unexpected_response(message: impl Into<String>) -> Self {
        Self::UnexpectedResponse(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Classification
    // ============================================================================

    /// Returns the broad kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Backend { .. } | Self::Generation { .. } => ErrorKind::BackendReported,
            Self::MissingApiKey => ErrorKind::MissingCredential,
            Self::UnexpectedResponse(_) => ErrorKind::ResponseShape,
            Self::Io { .. } | Self::Serialization { .. } | Self::Config(_) | Self::Template(_) => {
                ErrorKind::Local
            }
        }
    }

    /// Check if this is the missing-credential sentinel
    pub fn is_missing_api_key(&self) -> bool {
        matches!(self, Self::MissingApiKey)
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// Returns the HTTP status reported by a remote service, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } | Self::Generation { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ArcaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ArcaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ArcaError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for ArcaError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, ArcaError>`.
pub type Result<T> = std::result::Result<T, ArcaError>;
