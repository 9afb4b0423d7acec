//! Persisted local preferences.
//!
//! Only three values survive a restart: the user's Gemini API key override,
//! the theme and the display name. Everything else lives in memory.

use strum::{AsRefStr, Display, EnumIter};

use crate::error::Result;

/// Key of a persisted preference entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Display, EnumIter)]
pub enum PreferenceKey {
    /// User-chosen Gemini API key, overriding the configured default
    #[strum(serialize = "arca_ai_key")]
    ApiKey,
    #[strum(serialize = "arca_tema")]
    Theme,
    /// Display name used to address the user
    #[strum(serialize = "arca_usuario")]
    DisplayName,
}

/// Key-value storage for [`PreferenceKey`] entries.
///
/// A successful `set` must be durable before it returns; callers keep
/// in-memory copies in sync by writing here first.
pub trait PreferenceStore: Send + Sync {
    /// Reads an entry. Missing entries are `Ok(None)`.
    fn get(&self, key: PreferenceKey) -> Result<Option<String>>;

    /// Writes an entry, replacing any previous value.
    fn set(&self, key: PreferenceKey, value: &str) -> Result<()>;

    /// Deletes an entry. Deleting a missing entry is not an error.
    fn remove(&self, key: PreferenceKey) -> Result<()>;
}
