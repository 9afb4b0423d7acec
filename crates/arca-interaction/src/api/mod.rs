//! Resource client for the El Arca backend.
//!
//! [`ArcaApiClient`] is a stateless façade: each group exposes one method per
//! backend capability and adds nothing beyond path templating and JSON body
//! serialization.

mod books;
mod notes;
mod reference;

pub use books::{DigitalBooksApi, PhysicalBooksApi};
pub use notes::NotesApi;
pub use reference::{AssistantApi, DictionaryApi, SystemApi};

use crate::gateway::ApiGateway;
use arca_core::Result;
use arca_core::assistant::BackendMessage;
use arca_core::config::ArcaConfig;
use arca_core::library::{DigitalBook, LibraryBackend, PhysicalBook};
use arca_core::note::{NewNote, Note};
use async_trait::async_trait;

/// Typed entry point to every backend capability.
#[derive(Debug, Clone)]
pub struct ArcaApiClient {
    gateway: ApiGateway,
}

impl ArcaApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_gateway(ApiGateway::new(base_url))
    }

    pub fn with_gateway(gateway: ApiGateway) -> Self {
        Self { gateway }
    }

    pub fn from_config(config: &ArcaConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    pub fn gateway(&self) -> &ApiGateway {
        &self.gateway
    }

    /// Digital library operations.
    pub fn books(&self) -> DigitalBooksApi<'_> {
        DigitalBooksApi::new(&self.gateway)
    }

    /// Physical catalog operations.
    pub fn physical_books(&self) -> PhysicalBooksApi<'_> {
        PhysicalBooksApi::new(&self.gateway)
    }

    /// Notebook operations on legacy notes without an owner.
    pub fn notes(&self) -> NotesApi<'_> {
        NotesApi::new(&self.gateway, None)
    }

    /// Notebook operations scoped to `owner` when given.
    pub fn notes_for<'a>(&'a self, owner: Option<&'a str>) -> NotesApi<'a> {
        NotesApi::new(&self.gateway, owner)
    }

    /// Theological dictionary.
    pub fn dictionary(&self) -> DictionaryApi<'_> {
        DictionaryApi::new(&self.gateway)
    }

    /// Backend retrieval-augmented assistant.
    pub fn assistant(&self) -> AssistantApi<'_> {
        AssistantApi::new(&self.gateway)
    }

    /// Liveness and diagnostics.
    pub fn system(&self) -> SystemApi<'_> {
        SystemApi::new(&self.gateway)
    }
}

#[async_trait]
impl LibraryBackend for ArcaApiClient {
    async fn list_digital_books(&self) -> Result<Vec<DigitalBook>> {
        self.books().list().await
    }

    async fn list_physical_books(&self) -> Result<Vec<PhysicalBook>> {
        self.physical_books().list().await
    }

    async fn list_notes(&self, owner: Option<&str>) -> Result<Vec<Note>> {
        self.notes_for(owner).list().await
    }

    async fn create_note(&self, owner: Option<&str>, note: &NewNote) -> Result<Note> {
        self.notes_for(owner).create(note).await
    }

    async fn update_note(&self, owner: Option<&str>, id: i64, note: &NewNote) -> Result<Note> {
        self.notes_for(owner).update(id, note).await
    }

    async fn delete_note(&self, owner: Option<&str>, id: i64) -> Result<BackendMessage> {
        self.notes_for(owner).delete(id).await
    }
}
