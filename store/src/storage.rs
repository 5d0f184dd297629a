//! # Storage traits — one contract, interchangeable backends
//!
//! [`MemoryStore`] is the single interface every persistence backend
//! implements: the in-memory [`crate::MemStore`], the on-device
//! [`crate::FileStore`], the server's PostgreSQL store, and the client's HTTP
//! store. The gallery state store and the REST handlers are both written
//! against this trait, so the backend is chosen once at composition time and
//! passed in explicitly.
//!
//! [`UserStore`] carries the reserved account accessors. The local and SQL
//! backends implement it alongside [`MemoryStore`]; the HTTP backend does not,
//! because no route exposes users.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Memory, NewMemory, NewUser, User, ValidationErrors};

/// Failure from a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt store data: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Connectivity or constraint failure in the underlying store. Opaque to
    /// callers; the API layer maps it to a 500 without retrying.
    #[error("storage backend failed: {0}")]
    Backend(String),

    #[error("invalid memory data: {0}")]
    Invalid(ValidationErrors),
}

/// Async persistence contract for the `memories` table (or its local mirror).
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// All records, ascending by `id`.
    async fn memories(&self) -> Result<Vec<Memory>, StoreError>;

    /// A single record. Absence is `Ok(None)`, never an error.
    async fn memory(&self, id: i32) -> Result<Option<Memory>, StoreError>;

    /// Insert a draft. The backend assigns `id`, stamps `date` with the
    /// current UTC day, and sets `created_at`; any draft `date` is ignored.
    async fn create_memory(&self, draft: NewMemory) -> Result<Memory, StoreError>;

    /// Physically delete a record. `true` iff a record was removed, so
    /// callers can distinguish "deleted" from "already absent".
    async fn delete_memory(&self, id: i32) -> Result<bool, StoreError>;
}

/// Accessors for the reserved `users` table.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn user(&self, id: i32) -> Result<Option<User>, StoreError>;
    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError>;
}

#[async_trait]
impl<S: MemoryStore + ?Sized> MemoryStore for Arc<S> {
    async fn memories(&self) -> Result<Vec<Memory>, StoreError> {
        (**self).memories().await
    }

    async fn memory(&self, id: i32) -> Result<Option<Memory>, StoreError> {
        (**self).memory(id).await
    }

    async fn create_memory(&self, draft: NewMemory) -> Result<Memory, StoreError> {
        (**self).create_memory(draft).await
    }

    async fn delete_memory(&self, id: i32) -> Result<bool, StoreError> {
        (**self).delete_memory(id).await
    }
}

/// Stamp for new records: the current UTC day in `YYYY-MM-DD` form.
pub fn today() -> String {
    chrono::Utc::now().format("%Y-%m-%d").to_string()
}
