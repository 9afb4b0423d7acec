use crate::gateway::{ApiGateway, RequestOptions};
use arca_core::Result;
use arca_core::assistant::BackendMessage;
use arca_core::note::{NewNote, Note};

/// `/notas` endpoints.
///
/// With an owner every request carries `?user_id=`: listings return only
/// that user's notes, new notes are stored under that user and mutations
/// are refused for notes owned by someone else. Without one the backend
/// works on legacy notes that have no owner.
pub struct NotesApi<'a> {
    gateway: &'a ApiGateway,
    owner: Option<&'a str>,
}

impl<'a> NotesApi<'a> {
    pub(super) fn new(gateway: &'a ApiGateway, owner: Option<&'a str>) -> Self {
        Self { gateway, owner }
    }

    pub fn owner(&self) -> Option<&'a str> {
        self.owner
    }

    pub async fn list(&self) -> Result<Vec<Note>> {
        self.gateway
            .request_as(&self.scoped("/notas"), RequestOptions::get())
            .await
    }

    /// Lists the notes owned by one user, regardless of this handle's owner.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Note>> {
        NotesApi::new(self.gateway, Some(user_id)).list().await
    }

    pub async fn create(&self, note: &NewNote) -> Result<Note> {
        self.gateway
            .request_as(&self.scoped("/notas"), RequestOptions::post().json(note)?)
            .await
    }

    pub async fn update(&self, id: i64, note: &NewNote) -> Result<Note> {
        let path = self.scoped(&format!("/notas/{}", id));
        self.gateway
            .request_as(&path, RequestOptions::put().json(note)?)
            .await
    }

    pub async fn delete(&self, id: i64) -> Result<BackendMessage> {
        let path = self.scoped(&format!("/notas/{}", id));
        self.gateway.request_as(&path, RequestOptions::delete()).await
    }

    fn scoped(&self, path: &str) -> String {
        match self.owner {
            Some(owner) => format!("{}?user_id={}", path, urlencoding::encode(owner)),
            None => path.to_string(),
        }
    }
}
