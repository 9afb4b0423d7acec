//! Local persistence for the El Arca client core: paths, atomic TOML files,
//! preference stores and configuration resolution.

pub mod config_service;
pub mod paths;
pub mod preference_store;
pub mod storage;

pub use crate::config_service::ConfigService;
pub use crate::paths::ArcaPaths;
pub use crate::preference_store::{FilePreferenceStore, InMemoryPreferenceStore};
