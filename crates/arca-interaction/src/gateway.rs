//! Request gateway for the El Arca backend.
//!
//! Every backend call goes through [`ApiGateway::request`]: it prefixes the
//! configured base URL, sends JSON, and folds non-success responses into
//! [`ArcaError::Backend`] using the FastAPI `detail` field when present.

use arca_core::{ArcaError, Result};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Message used when an error body is not JSON.
const UNKNOWN_ERROR_MESSAGE: &str = "Error desconocido";
/// Message used when an error body carries no usable `detail`.
const GENERIC_ERROR_MESSAGE: &str = "Error en la petición al servidor";

/// Per-request overrides. Defaults to a bodiless `GET`.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    /// Extra headers; they replace defaults with the same name
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    pub fn put() -> Self {
        Self::with_method(Method::PUT)
    }

    pub fn delete() -> Self {
        Self::with_method(Method::DELETE)
    }

    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    /// Serializes `body` as the JSON request body.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in &self.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ArcaError::config(format!("Invalid header name '{}': {}", name, e)))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| {
                    ArcaError::config(format!("Invalid value for header '{}': {}", name, e))
                })?;
            headers.insert(name, value);
        }

        Ok(headers)
    }
}

/// Thin JSON-over-HTTP wrapper bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiGateway {
    client: Client,
    base_url: String,
}

impl ApiGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for a backend path.
    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issues a request and returns the parsed JSON body unvalidated.
    ///
    /// Transport failures surface as [`ArcaError::Transport`]; they are never
    /// retried.
    pub async fn request(&self, path: &str, options: RequestOptions) -> Result<Value> {
        let headers = options.header_map()?;
        let method = options.method.clone();
        tracing::debug!(%method, path, "Backend request");

        let mut builder = self
            .client
            .request(options.method, self.url_for(path))
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ArcaError::transport(format!("{} {} failed: {}", method, path, e)))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ArcaError::transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            let message = error_message_from_body(&body);
            tracing::warn!(%method, path, status = status.as_u16(), "Backend error: {}", message);
            return Err(ArcaError::backend(status.as_u16(), message));
        }

        serde_json::from_slice(&body).map_err(|e| {
            ArcaError::unexpected_response(format!(
                "{} {} returned invalid JSON: {}",
                method, path, e
            ))
        })
    }

    /// Like [`request`](Self::request), deserializing into `T`.
    pub async fn request_as<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let value = self.request(path, options).await?;
        serde_json::from_value(value).map_err(|e| {
            ArcaError::unexpected_response(format!("Unexpected body for {}: {}", path, e))
        })
    }
}

/// Extracts a human-readable message from a FastAPI error body.
fn error_message_from_body(body: &[u8]) -> String {
    let Ok(parsed) = serde_json::from_slice::<Value>(body) else {
        return UNKNOWN_ERROR_MESSAGE.to_string();
    };

    match parsed.get("detail") {
        Some(Value::String(detail)) if !detail.is_empty() => detail.clone(),
        None | Some(Value::Null) | Some(Value::String(_)) | Some(Value::Bool(false)) => {
            GENERIC_ERROR_MESSAGE.to_string()
        }
        // Validation errors arrive as a list of objects
        Some(other) => other.to_string(),
    }
}
