use crate::gateway::{ApiGateway, RequestOptions};
use arca_core::Result;
use arca_core::assistant::BackendMessage;
use arca_core::library::{DigitalBook, IsbnLookup, NewPhysicalBook, PhysicalBook};

/// `/libros/digitales` endpoints.
pub struct DigitalBooksApi<'a> {
    gateway: &'a ApiGateway,
}

impl<'a> DigitalBooksApi<'a> {
    pub(super) fn new(gateway: &'a ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<DigitalBook>> {
        self.gateway
            .request_as("/libros/digitales", RequestOptions::get())
            .await
    }

    /// Starts a background scan of the server's local library folder.
    pub async fn scan(&self) -> Result<BackendMessage> {
        self.gateway
            .request_as("/libros/digitales/escanear", RequestOptions::post())
            .await
    }

    /// Starts a background synchronization with Google Drive.
    pub async fn sync_drive(&self) -> Result<BackendMessage> {
        self.gateway
            .request_as("/libros/digitales/sincronizar-drive", RequestOptions::post())
            .await
    }

    /// URL of the streaming viewer for a Drive file. No request is made.
    pub fn view_url(&self, file_id: &str) -> String {
        self.gateway
            .url_for(&format!("/libros/ver/{}", urlencoding::encode(file_id)))
    }
}

/// `/libros/fisicos` endpoints.
pub struct PhysicalBooksApi<'a> {
    gateway: &'a ApiGateway,
}

impl<'a> PhysicalBooksApi<'a> {
    pub(super) fn new(gateway: &'a ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn list(&self) -> Result<Vec<PhysicalBook>> {
        self.gateway
            .request_as("/libros/fisicos", RequestOptions::get())
            .await
    }

    /// Looks up catalog metadata for an ISBN.
    pub async fn lookup_isbn(&self, isbn: &str) -> Result<IsbnLookup> {
        self.gateway
            .request_as(&format!("/libros/fisicos/isbn/{}", isbn), RequestOptions::get())
            .await
    }

    pub async fn create(&self, book: &NewPhysicalBook) -> Result<PhysicalBook> {
        self.gateway
            .request_as("/libros/fisicos", RequestOptions::post().json(book)?)
            .await
    }
}
