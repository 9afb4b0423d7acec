//! Configuration service implementation.
//!
//! Resolves [`ArcaConfig`] from, in order of precedence: environment
//! variables, `~/.config/arca/config.toml`, built-in defaults. Empty
//! environment values count as unset.

use crate::paths::ArcaPaths;
use crate::storage::AtomicTomlFile;
use arca_core::config::{
    ArcaConfig, ConfigFile, DEFAULT_API_BASE_URL, DEFAULT_GEMINI_MODEL, ENV_API_BASE_URL,
    ENV_GEMINI_API_KEY, ENV_GEMINI_MODEL,
};
use std::sync::{Arc, RwLock};

/// Configuration service that resolves and caches the runtime configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: ArcaPaths,
    /// Cached configuration, resolved lazily on first access.
    config: Arc<RwLock<Option<ArcaConfig>>>,
}

impl ConfigService {
    pub fn new(paths: ArcaPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, resolving it if not cached.
    pub fn get_config(&self) -> ArcaConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let file = self.load_file();
        let resolved = Self::resolve(file, |name| std::env::var(name).ok());

        tracing::debug!(
            api_base_url = %resolved.api_base_url,
            gemini_model = %resolved.gemini_model,
            has_default_key = resolved.gemini_api_key.is_some(),
            "Configuration resolved"
        );

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(resolved.clone());
        resolved
    }

    /// Invalidates the cache, forcing a re-resolve on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Merges a config file and an environment lookup over the defaults.
    pub fn resolve<F>(file: Option<ConfigFile>, env: F) -> ArcaConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.unwrap_or_default();
        let gemini = file.gemini.unwrap_or_default();
        let lookup = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        let api_base_url = lookup(ENV_API_BASE_URL)
            .or(file.api_base_url.filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());

        let gemini_api_key =
            lookup(ENV_GEMINI_API_KEY).or(gemini.api_key.filter(|v| !v.is_empty()));

        let gemini_model = lookup(ENV_GEMINI_MODEL)
            .or(gemini.model.filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        ArcaConfig {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            gemini_api_key,
            gemini_model,
        }
    }

    fn load_file(&self) -> Option<ConfigFile> {
        let path = match self.paths.config_file() {
            Ok(path) => path,
            Err(e) => {
                tracing::warn!("Config directory unavailable, using defaults: {}", e);
                return None;
            }
        };

        match AtomicTomlFile::<ConfigFile>::new(path.clone()).load() {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!("Ignoring unreadable config file {}: {}", path.display(), e);
                None
            }
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(ArcaPaths::default())
    }
}
