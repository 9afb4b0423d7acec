//! Unified path management for El Arca local files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/arca/              # Config directory (platform default)
//! ├── config.toml              # Optional configuration overrides
//! └── preferences.toml         # Persisted preferences (API key, theme, name)
//! ```
//!
//! Tests and portable installs pass an explicit base directory instead.

use arca_core::ArcaError;
use std::path::PathBuf;

const APP_DIR_NAME: &str = "arca";
const CONFIG_FILE_NAME: &str = "config.toml";
const PREFERENCES_FILE_NAME: &str = "preferences.toml";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for ArcaError {
    fn from(err: PathError) -> Self {
        ArcaError::config(err.to_string())
    }
}

/// Resolves the locations of El Arca's local files.
#[derive(Debug, Clone, Default)]
pub struct ArcaPaths {
    base: Option<PathBuf>,
}

impl ArcaPaths {
    /// Creates a resolver. `None` uses the platform config directory.
    pub fn new(base: Option<PathBuf>) -> Self {
        Self { base }
    }

    /// Returns the El Arca configuration directory.
    pub fn config_dir(&self) -> Result<PathBuf, PathError> {
        match &self.base {
            Some(base) => Ok(base.clone()),
            None => dirs::config_dir()
                .map(|dir| dir.join(APP_DIR_NAME))
                .ok_or(PathError::ConfigDirNotFound),
        }
    }

    /// Returns the path to `config.toml`.
    pub fn config_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Returns the path to `preferences.toml`.
    pub fn preferences_file(&self) -> Result<PathBuf, PathError> {
        Ok(self.config_dir()?.join(PREFERENCES_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_base_is_used_verbatim() {
        let paths = ArcaPaths::new(Some(PathBuf::from("/tmp/arca-test")));
        assert_eq!(paths.config_dir().unwrap(), PathBuf::from("/tmp/arca-test"));
        assert_eq!(
            paths.preferences_file().unwrap(),
            PathBuf::from("/tmp/arca-test/preferences.toml")
        );
        assert_eq!(
            paths.config_file().unwrap(),
            PathBuf::from("/tmp/arca-test/config.toml")
        );
    }
}
