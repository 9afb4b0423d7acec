//! Domain layer for the El Arca client core.
//!
//! Holds the models shared by every other crate, the error type, and the
//! traits at the seams between layers. Nothing here performs I/O.

pub mod assistant;
pub mod config;
pub mod conversation;
pub mod error;
pub mod library;
pub mod note;
pub mod persona;
pub mod preference;
pub mod ui;

// Re-export common error type
pub use error::{ArcaError, ErrorKind, Result};
