use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{Memory, NewMemory, NewUser, User};
use crate::storage::{today, MemoryStore, StoreError, UserStore};

/// In-memory store for tests and as a volatile fallback.
///
/// Ids are handed out by a counter that only ever moves forward, so a deleted
/// id is never reused.
#[derive(Clone, Debug, Default)]
pub struct MemStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Debug)]
struct Inner {
    next_memory_id: i32,
    next_user_id: i32,
    memories: Vec<Memory>,
    users: Vec<User>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            next_memory_id: 1,
            next_user_id: 1,
            memories: Vec::new(),
            users: Vec::new(),
        }
    }
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemoryStore for MemStore {
    async fn memories(&self) -> Result<Vec<Memory>, StoreError> {
        // Records are appended with ascending ids, so insertion order is
        // already the required order.
        Ok(self.inner.lock().unwrap().memories.clone())
    }

    async fn memory(&self, id: i32) -> Result<Option<Memory>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.memories.iter().find(|m| m.id == id).cloned())
    }

    async fn create_memory(&self, draft: NewMemory) -> Result<Memory, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_memory_id;
        inner.next_memory_id += 1;

        let memory = Memory {
            id,
            title: draft.title,
            description: draft.description,
            image: draft.image,
            date: today(),
            created_at: Utc::now(),
        };
        inner.memories.push(memory.clone());
        Ok(memory)
    }

    async fn delete_memory(&self, id: i32) -> Result<bool, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.memories.len();
        inner.memories.retain(|m| m.id != id);
        Ok(inner.memories.len() < before)
    }
}

#[async_trait]
impl UserStore for MemStore {
    async fn user(&self, id: i32) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.id == id).cloned())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.iter().find(|u| u.username == username).cloned())
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let id = inner.next_user_id;
        inner.next_user_id += 1;

        let user = User {
            id,
            username: new_user.username,
            password: new_user.password,
        };
        inner.users.push(user.clone());
        Ok(user)
    }
}
