//! Application layer for El Arca.
//!
//! [`AppStore`] owns the reactive containers the UI reads from and runs the
//! orchestration actions that refresh them from the backend.

pub mod container;
pub mod store;

pub use container::{Container, Subscription};
pub use store::{AppStore, RefreshOutcome};
