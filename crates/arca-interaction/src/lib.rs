//! Network layer for the El Arca client core.
//!
//! - [`gateway`]: JSON request gateway for the library backend
//! - [`api`]: typed resource client built on the gateway
//! - [`prompt`] and [`gemini_assistant`]: persona-framed Gemini questions

pub mod api;
pub mod gateway;
pub mod gemini_assistant;
pub mod prompt;

pub use api::ArcaApiClient;
pub use gateway::{ApiGateway, RequestOptions};
pub use gemini_assistant::GeminiAssistant;
pub use prompt::{MAX_CONTEXT_CHARS, PromptComposer, ResponseStyle};
