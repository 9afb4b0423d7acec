use crate::gateway::{ApiGateway, RequestOptions};
use arca_core::Result;
use arca_core::assistant::{
    AssistantAnswer, DEFAULT_PERSPECTIVE, Diagnostics, DictionaryEntry, ServiceStatus,
};
use serde::Serialize;

/// `/diccionario` endpoint.
pub struct DictionaryApi<'a> {
    gateway: &'a ApiGateway,
}

impl<'a> DictionaryApi<'a> {
    pub(super) fn new(gateway: &'a ApiGateway) -> Self {
        Self { gateway }
    }

    /// Defines `term` from an interpretive perspective (`reformado` when
    /// `None`). The term is percent-encoded into the path.
    pub async fn lookup(&self, term: &str, perspective: Option<&str>) -> Result<DictionaryEntry> {
        let path = dictionary_path(term, perspective.unwrap_or(DEFAULT_PERSPECTIVE));
        self.gateway.request_as(&path, RequestOptions::get()).await
    }
}

fn dictionary_path(term: &str, perspective: &str) -> String {
    format!(
        "/diccionario/{}?perspectiva={}",
        urlencoding::encode(term),
        urlencoding::encode(perspective)
    )
}

#[derive(Serialize)]
struct Question<'q> {
    pregunta: &'q str,
}

/// `/preguntar` endpoint.
pub struct AssistantApi<'a> {
    gateway: &'a ApiGateway,
}

impl<'a> AssistantApi<'a> {
    pub(super) fn new(gateway: &'a ApiGateway) -> Self {
        Self { gateway }
    }

    /// Asks the backend assistant a single question about the library.
    pub async fn ask(&self, question: &str) -> Result<AssistantAnswer> {
        let options = RequestOptions::post().json(&Question { pregunta: question })?;
        self.gateway.request_as("/preguntar", options).await
    }
}

/// Root status and `/sistema/diagnostico`.
pub struct SystemApi<'a> {
    gateway: &'a ApiGateway,
}

impl<'a> SystemApi<'a> {
    pub(super) fn new(gateway: &'a ApiGateway) -> Self {
        Self { gateway }
    }

    pub async fn status(&self) -> Result<ServiceStatus> {
        self.gateway.request_as("/", RequestOptions::get()).await
    }

    pub async fn diagnostics(&self) -> Result<Diagnostics> {
        self.gateway
            .request_as("/sistema/diagnostico", RequestOptions::get())
            .await
    }
}
