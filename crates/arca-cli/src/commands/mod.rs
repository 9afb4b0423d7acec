pub mod assistant;
pub mod config;
pub mod library;
pub mod notes;
pub mod system;

use anyhow::{Context as _, Result};
use arca_application::AppStore;
use arca_core::config::ArcaConfig;
use arca_core::preference::PreferenceStore;
use arca_infrastructure::FilePreferenceStore;
use arca_interaction::ArcaApiClient;
use serde::Serialize;
use std::sync::Arc;

/// Resolved configuration plus the clients built from it.
pub struct Context {
    config: ArcaConfig,
    client: ArcaApiClient,
}

impl Context {
    pub fn new(config: ArcaConfig) -> Self {
        let client = ArcaApiClient::from_config(&config);
        Self { config, client }
    }

    pub fn config(&self) -> &ArcaConfig {
        &self.config
    }

    pub fn client(&self) -> &ArcaApiClient {
        &self.client
    }

    /// Application store over the HTTP client and the preference file.
    pub fn store(&self) -> Result<AppStore> {
        Ok(AppStore::new(Arc::new(self.client.clone()), self.preferences()?))
    }

    pub fn preferences(&self) -> Result<Arc<dyn PreferenceStore>> {
        let store = FilePreferenceStore::new().context("Failed to open the preference file")?;
        Ok(Arc::new(store))
    }
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
