//! Shared storage layer for the Keepsake gallery.
//!
//! Domain models, the [`MemoryStore`]/[`UserStore`] traits, and the two
//! client-side backends: [`MemStore`] (in-memory) and [`FileStore`]
//! (on-device JSON document). The PostgreSQL and HTTP backends live in the
//! `server` and `client` crates, which depend on this one.

pub mod models;
pub mod storage;

mod memory;
pub use memory::MemStore;

mod file_store;
pub use file_store::FileStore;

pub use models::{Memory, NewMemory, NewUser, User, ValidationErrors};
pub use storage::{MemoryStore, StoreError, UserStore};
