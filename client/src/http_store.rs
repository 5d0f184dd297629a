//! # HTTP backend — the server-backed store variant
//!
//! [`HttpStore`] implements [`MemoryStore`] by talking to the REST surface
//! (`/api/memories`). Status codes map straight back onto the trait
//! contract: a 404 on get is `Ok(None)`, a 404 on delete is `Ok(false)`, a
//! 400 on create carries the server's per-field errors, and anything else
//! non-2xx is an opaque backend failure.
//!
//! Users are deliberately not implemented here: no route exposes them.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use store::models::{Memory, NewMemory, ValidationErrors};
use store::storage::{MemoryStore, StoreError};

/// Remote store over the gallery REST API.
#[derive(Clone, Debug)]
pub struct HttpStore {
    base: String,
    http: reqwest::Client,
}

/// Error body shape produced by the API layer.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    errors: Option<ValidationErrors>,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base = base_url.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Read an error response into a [`StoreError`], keeping field-level
    /// validation detail when the server provided it.
    async fn error_from(resp: reqwest::Response) -> StoreError {
        let status = resp.status();
        match resp.json::<ErrorBody>().await {
            Ok(ErrorBody {
                errors: Some(errors),
                ..
            }) if status == StatusCode::BAD_REQUEST => StoreError::Invalid(errors),
            Ok(body) => StoreError::Backend(format!("{status}: {}", body.message)),
            Err(_) => StoreError::Backend(status.to_string()),
        }
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl MemoryStore for HttpStore {
    async fn memories(&self) -> Result<Vec<Memory>, StoreError> {
        let resp = self
            .http
            .get(self.url("/api/memories"))
            .send()
            .await
            .map_err(transport)?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        resp.json().await.map_err(transport)
    }

    async fn memory(&self, id: i32) -> Result<Option<Memory>, StoreError> {
        let resp = self
            .http
            .get(self.url(&format!("/api/memories/{id}")))
            .send()
            .await
            .map_err(transport)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        resp.json().await.map(Some).map_err(transport)
    }

    async fn create_memory(&self, draft: NewMemory) -> Result<Memory, StoreError> {
        let resp = self
            .http
            .post(self.url("/api/memories"))
            .json(&draft)
            .send()
            .await
            .map_err(transport)?;
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        resp.json().await.map_err(transport)
    }

    async fn delete_memory(&self, id: i32) -> Result<bool, StoreError> {
        let resp = self
            .http
            .delete(self.url(&format!("/api/memories/{id}")))
            .send()
            .await
            .map_err(transport)?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(false);
        }
        if !resp.status().is_success() {
            return Err(Self::error_from(resp).await);
        }
        Ok(true)
    }
}
