//! # REST surface for the memory resource
//!
//! ```text
//! GET    /api/memories          -> 200 Memory[]
//! GET    /api/memories/:id      -> 200 Memory | 400 | 404
//! POST   /api/memories          -> 201 Memory | 400
//! DELETE /api/memories/:id      -> 200 {message} | 400 | 404
//! ```
//!
//! Handlers are written against the [`MemoryStore`] trait; the backend is
//! handed to [`router`] once, at composition time. Create payloads are
//! validated before the store is touched, and every error becomes structured
//! JSON (`message` plus per-field `errors` where applicable).

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use thiserror::Error;
use tower_http::trace::TraceLayer;

use store::models::{Memory, NewMemory, ValidationErrors};
use store::storage::{MemoryStore, StoreError};

type SharedStore = Arc<dyn MemoryStore>;

/// Build the application router around an explicitly-passed store.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route("/api/memories", get(list_memories).post(create_memory))
        .route("/api/memories/:id", get(get_memory).delete(delete_memory))
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid memory id")]
    InvalidId,

    #[error("memory not found")]
    NotFound,

    #[error("invalid memory data: {0}")]
    Invalid(ValidationErrors),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Invalid(errors) => ApiError::Invalid(errors),
            other => ApiError::Store(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::InvalidId => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "invalid memory id" }),
            ),
            ApiError::NotFound => (
                StatusCode::NOT_FOUND,
                json!({ "message": "memory not found" }),
            ),
            ApiError::Invalid(errors) => (
                StatusCode::BAD_REQUEST,
                json!({ "message": "invalid memory data", "errors": errors }),
            ),
            ApiError::Store(err) => {
                tracing::error!(error = %err, "storage operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "internal storage error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId)
}

async fn list_memories(State(store): State<SharedStore>) -> Result<Json<Vec<Memory>>, ApiError> {
    Ok(Json(store.memories().await?))
}

async fn get_memory(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Memory>, ApiError> {
    let id = parse_id(&id)?;
    match store.memory(id).await? {
        Some(memory) => Ok(Json(memory)),
        None => Err(ApiError::NotFound),
    }
}

async fn create_memory(
    State(store): State<SharedStore>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Memory>), ApiError> {
    let Json(body) = body.map_err(|_| {
        let mut errors = ValidationErrors::default();
        errors.push("body", "must be valid JSON");
        ApiError::Invalid(errors)
    })?;

    let draft = NewMemory::from_value(&body).map_err(ApiError::Invalid)?;
    let memory = store.create_memory(draft).await?;
    Ok((StatusCode::CREATED, Json(memory)))
}

async fn delete_memory(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id)?;
    if store.delete_memory(id).await? {
        Ok(Json(json!({ "message": "memory deleted" })))
    } else {
        Err(ApiError::NotFound)
    }
}
