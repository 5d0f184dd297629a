//! # File-backed store — on-device persistence
//!
//! [`FileStore`] is the offline [`MemoryStore`]/[`UserStore`] backend: the
//! whole gallery lives in one JSON document and every mutation rewrites the
//! file, mirroring how the browser build mirrors the list into local storage.
//!
//! ## Layout
//!
//! ```text
//! {
//!   "version": 1,
//!   "next_memory_id": 7,
//!   "next_user_id": 1,
//!   "memories": [ ... ],
//!   "users": [ ... ]
//! }
//! ```
//!
//! The id counters are persisted alongside the records so an id freed by a
//! delete is never handed out again, even across restarts.
//!
//! Callers obtain a platform-appropriate location from `dirs::data_dir()`;
//! this module only deals in the final file path.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{Memory, NewMemory, NewUser, User};
use crate::storage::{today, MemoryStore, StoreError, UserStore};

const DOCUMENT_VERSION: u32 = 1;

/// On-device store keeping the whole gallery in a single JSON file.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    version: u32,
    next_memory_id: i32,
    next_user_id: i32,
    memories: Vec<Memory>,
    users: Vec<User>,
}

impl Default for Document {
    fn default() -> Self {
        Self {
            version: DOCUMENT_VERSION,
            next_memory_id: 1,
            next_user_id: 1,
            memories: Vec::new(),
            users: Vec::new(),
        }
    }
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Install fixed starter records, but only into a store that has never
    /// held a memory. Ids and dates of the seeds are kept verbatim; the next
    /// id continues past the highest seeded one.
    pub fn seed_if_empty(&self, seeds: &[Memory]) -> Result<(), StoreError> {
        let mut doc = self.load()?;
        if !doc.memories.is_empty() || doc.next_memory_id > 1 {
            return Ok(());
        }
        doc.memories = seeds.to_vec();
        doc.next_memory_id = seeds.iter().map(|m| m.id).max().unwrap_or(0) + 1;
        self.save(&doc)
    }

    fn load(&self) -> Result<Document, StoreError> {
        if !self.path.exists() {
            return Ok(Document::default());
        }
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Serialize the whole document, writing to a sibling temp file first so
    /// a crash mid-write cannot truncate the gallery.
    fn save(&self, doc: &Document) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(doc)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[async_trait]
impl MemoryStore for FileStore {
    async fn memories(&self) -> Result<Vec<Memory>, StoreError> {
        let mut memories = self.load()?.memories;
        memories.sort_by_key(|m| m.id);
        Ok(memories)
    }

    async fn memory(&self, id: i32) -> Result<Option<Memory>, StoreError> {
        Ok(self.load()?.memories.into_iter().find(|m| m.id == id))
    }

    async fn create_memory(&self, draft: NewMemory) -> Result<Memory, StoreError> {
        let mut doc = self.load()?;
        let memory = Memory {
            id: doc.next_memory_id,
            title: draft.title,
            description: draft.description,
            image: draft.image,
            date: today(),
            created_at: Utc::now(),
        };
        doc.next_memory_id += 1;
        doc.memories.push(memory.clone());
        self.save(&doc)?;
        Ok(memory)
    }

    async fn delete_memory(&self, id: i32) -> Result<bool, StoreError> {
        let mut doc = self.load()?;
        let before = doc.memories.len();
        doc.memories.retain(|m| m.id != id);
        if doc.memories.len() == before {
            return Ok(false);
        }
        self.save(&doc)?;
        Ok(true)
    }
}

#[async_trait]
impl UserStore for FileStore {
    async fn user(&self, id: i32) -> Result<Option<User>, StoreError> {
        Ok(self.load()?.users.into_iter().find(|u| u.id == id))
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Ok(self
            .load()?
            .users
            .into_iter()
            .find(|u| u.username == username))
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut doc = self.load()?;
        let user = User {
            id: doc.next_user_id,
            username: new_user.username,
            password: new_user.password,
        };
        doc.next_user_id += 1;
        doc.users.push(user.clone());
        self.save(&doc)?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store(tag: &str) -> FileStore {
        let dir = std::env::temp_dir().join(format!("keepsake_test_{}_{tag}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        FileStore::new(dir.join("gallery.json"))
    }

    fn cleanup(store: &FileStore) {
        if let Some(parent) = store.path().parent() {
            let _ = std::fs::remove_dir_all(parent);
        }
    }

    fn draft(title: &str) -> NewMemory {
        NewMemory::new(title, "a description", "https://example.com/p.jpg")
    }

    #[tokio::test]
    async fn test_reopen_roundtrip() {
        let store = temp_store("roundtrip");

        let created = store.create_memory(draft("Persisted")).await.unwrap();

        // Re-open from the same path
        let reopened = FileStore::new(store.path().to_path_buf());
        let listed = reopened.memories().await.unwrap();
        assert_eq!(listed, vec![created]);

        cleanup(&store);
    }

    #[tokio::test]
    async fn test_ids_survive_restart_and_deletes() {
        let store = temp_store("ids");

        let a = store.create_memory(draft("a")).await.unwrap();
        let b = store.create_memory(draft("b")).await.unwrap();
        assert!(store.delete_memory(b.id).await.unwrap());

        let reopened = FileStore::new(store.path().to_path_buf());
        let c = reopened.create_memory(draft("c")).await.unwrap();
        assert_eq!((a.id, b.id, c.id), (1, 2, 3));

        cleanup(&store);
    }

    #[tokio::test]
    async fn test_delete_absent_leaves_file_alone() {
        let store = temp_store("absent");
        store.create_memory(draft("keep")).await.unwrap();

        assert!(!store.delete_memory(42).await.unwrap());
        assert_eq!(store.memories().await.unwrap().len(), 1);

        cleanup(&store);
    }

    #[tokio::test]
    async fn test_seed_only_once() {
        let store = temp_store("seed");
        let seeds = vec![Memory {
            id: 5,
            title: "Seeded".to_string(),
            description: "starter".to_string(),
            image: "https://example.com/s.jpg".to_string(),
            date: "2023-05-12".to_string(),
            created_at: Utc::now(),
        }];

        store.seed_if_empty(&seeds).unwrap();
        assert_eq!(store.memories().await.unwrap().len(), 1);

        // Emptying the gallery later must not resurrect the seeds
        assert!(store.delete_memory(5).await.unwrap());
        store.seed_if_empty(&seeds).unwrap();
        assert!(store.memories().await.unwrap().is_empty());

        // The seed's id stays reserved
        let next = store.create_memory(draft("after")).await.unwrap();
        assert_eq!(next.id, 6);

        cleanup(&store);
    }

    #[tokio::test]
    async fn test_user_records_persist() {
        let store = temp_store("users");
        store
            .create_user(NewUser {
                username: "sam".to_string(),
                password: "secret".to_string(),
            })
            .await
            .unwrap();

        let reopened = FileStore::new(store.path().to_path_buf());
        assert!(reopened.user_by_username("sam").await.unwrap().is_some());

        cleanup(&store);
    }
}
