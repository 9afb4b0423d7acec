//! Backend seam used by the reactive store.

use async_trait::async_trait;

use crate::assistant::BackendMessage;
use crate::error::Result;
use crate::library::{DigitalBook, PhysicalBook};
use crate::note::{NewNote, Note};

/// Source of library listings and note mutations.
///
/// Note operations take the owning account; `None` addresses legacy notes
/// without an owner. The HTTP client implements this; tests substitute
/// in-memory stubs.
#[async_trait]
pub trait LibraryBackend: Send + Sync {
    /// Lists every digital book.
    async fn list_digital_books(&self) -> Result<Vec<DigitalBook>>;

    /// Lists the physical catalog.
    async fn list_physical_books(&self) -> Result<Vec<PhysicalBook>>;

    /// Lists notebook entries visible to `owner`.
    async fn list_notes(&self, owner: Option<&str>) -> Result<Vec<Note>>;

    async fn create_note(&self, owner: Option<&str>, note: &NewNote) -> Result<Note>;

    async fn update_note(&self, owner: Option<&str>, id: i64, note: &NewNote) -> Result<Note>;

    async fn delete_note(&self, owner: Option<&str>, id: i64) -> Result<BackendMessage>;
}
