//! Preference store implementations.
//!
//! [`FilePreferenceStore`] persists entries in `preferences.toml`;
//! [`InMemoryPreferenceStore`] keeps them for the process lifetime only.

use crate::paths::ArcaPaths;
use crate::storage::AtomicTomlFile;
use arca_core::Result;
use arca_core::preference::{PreferenceKey, PreferenceStore};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;
use std::sync::RwLock;

type PreferenceDocument = BTreeMap<String, String>;

/// Preference store backed by a TOML file.
///
/// Every `set` is a locked read-modify-write followed by an atomic rename, so
/// the file never holds a partially written document.
pub struct FilePreferenceStore {
    file: AtomicTomlFile<PreferenceDocument>,
}

impl FilePreferenceStore {
    /// Opens the store at the default location.
    pub fn new() -> Result<Self> {
        let path = ArcaPaths::new(None).preferences_file()?;
        Ok(Self::with_path(path))
    }

    /// Opens the store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            file: AtomicTomlFile::new(path),
        }
    }

    pub fn path(&self) -> &std::path::Path {
        self.file.path()
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn get(&self, key: PreferenceKey) -> Result<Option<String>> {
        let document = self.file.load()?.unwrap_or_default();
        Ok(document.get(key.as_ref()).cloned())
    }

    fn set(&self, key: PreferenceKey, value: &str) -> Result<()> {
        self.file.update(PreferenceDocument::new(), |document| {
            document.insert(key.as_ref().to_string(), value.to_string());
            Ok(())
        })?;
        tracing::debug!(key = %key, "Preference saved");
        Ok(())
    }

    fn remove(&self, key: PreferenceKey) -> Result<()> {
        self.file.update(PreferenceDocument::new(), |document| {
            document.remove(key.as_ref());
            Ok(())
        })
    }
}

/// Preference store that never touches the disk.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    entries: RwLock<HashMap<PreferenceKey, String>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with entries.
    pub fn with_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (PreferenceKey, S)>,
        S: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, value.into()))
                    .collect(),
            ),
        }
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: PreferenceKey) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| arca_core::ArcaError::io("preference lock poisoned"))?;
        Ok(entries.get(&key).cloned())
    }

    fn set(&self, key: PreferenceKey, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| arca_core::ArcaError::io("preference lock poisoned"))?;
        entries.insert(key, value.to_string());
        Ok(())
    }

    fn remove(&self, key: PreferenceKey) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| arca_core::ArcaError::io("preference lock poisoned"))?;
        entries.remove(&key);
        Ok(())
    }
}
