//! # Gallery — the client state store
//!
//! One struct owns everything the UI renders: the memory list (sourced from
//! the backend, refreshed on demand), modal visibility, the in-progress
//! upload (selected file + rendered preview), and the music-player state.
//! Mutating operations go through the backend and then re-fetch, so the list
//! always reflects what the backend persisted; the gallery itself stamps
//! nothing.

use std::path::{Path, PathBuf};

use store::models::{Memory, NewMemory};
use store::storage::MemoryStore;

use crate::preview;

#[derive(Clone, Debug, PartialEq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// A short user-visible message recorded for a create/delete outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Client state store, generic over the persistence backend.
pub struct Gallery<S: MemoryStore> {
    store: S,
    memories: Vec<Memory>,
    modal_open: bool,
    selected_image: Option<PathBuf>,
    image_preview: Option<String>,
    music_playing: bool,
    volume: u8,
    notices: Vec<Notice>,
}

impl<S: MemoryStore> Gallery<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            memories: Vec::new(),
            modal_open: false,
            selected_image: None,
            image_preview: None,
            music_playing: false,
            volume: 70,
            notices: Vec::new(),
        }
    }

    pub fn memories(&self) -> &[Memory] {
        &self.memories
    }

    pub fn modal_open(&self) -> bool {
        self.modal_open
    }

    pub fn selected_image(&self) -> Option<&Path> {
        self.selected_image.as_deref()
    }

    pub fn image_preview(&self) -> Option<&str> {
        self.image_preview.as_deref()
    }

    pub fn music_playing(&self) -> bool {
        self.music_playing
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    /// Re-fetch the list from the backend. A failure degrades to an empty
    /// list so the UI always has something defined to render; no notice is
    /// recorded.
    pub async fn refresh(&mut self) {
        match self.store.memories().await {
            Ok(memories) => self.memories = memories,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load memories");
                self.memories.clear();
            }
        }
    }

    /// Validate and submit a draft. The backend stamps `id` and `date`; on
    /// success the list is refreshed, on failure prior state stays untouched.
    pub async fn create(&mut self, draft: NewMemory) {
        if let Err(errors) = draft.validate() {
            self.notify(NoticeLevel::Error, format!("could not save memory: {errors}"));
            return;
        }

        match self.store.create_memory(draft).await {
            Ok(_) => {
                self.notify(NoticeLevel::Success, "memory saved");
                self.refresh().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to save memory");
                self.notify(NoticeLevel::Error, "could not save memory");
            }
        }
    }

    /// Delete by id and refresh. Deleting an id the backend no longer has is
    /// surfaced as a failure, not silently ignored.
    pub async fn remove(&mut self, id: i32) {
        match self.store.delete_memory(id).await {
            Ok(true) => {
                self.notify(NoticeLevel::Success, "memory deleted");
                self.refresh().await;
            }
            Ok(false) => {
                self.notify(NoticeLevel::Error, "memory was already gone");
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to delete memory");
                self.notify(NoticeLevel::Error, "could not delete memory");
            }
        }
    }

    pub fn open_modal(&mut self) {
        self.modal_open = true;
    }

    /// Closing the modal drops any pending upload so stale state never leaks
    /// into the next open.
    pub fn close_modal(&mut self) {
        self.modal_open = false;
        self.selected_image = None;
        self.image_preview = None;
    }

    /// Record a newly chosen file. The preview is cleared until
    /// [`load_preview`](Self::load_preview) completes; callers should gate
    /// preview-dependent creates on [`image_preview`](Self::image_preview).
    pub fn select_image(&mut self, path: PathBuf) {
        self.selected_image = Some(path);
        self.image_preview = None;
    }

    /// Read the selected file and render it as a `data:` URL preview.
    pub async fn load_preview(&mut self) {
        let Some(path) = self.selected_image.clone() else {
            return;
        };
        match preview::data_url_from_file(&path).await {
            Ok(url) => self.image_preview = Some(url),
            Err(err) => {
                tracing::warn!(error = %err, path = %path.display(), "failed to read image");
                self.notify(NoticeLevel::Error, "could not read the chosen image");
            }
        }
    }

    pub fn toggle_music(&mut self) {
        self.music_playing = !self.music_playing;
    }

    pub fn set_volume(&mut self, volume: u8) {
        self.volume = volume.min(100);
    }

    /// Hand pending notices to the UI, clearing them.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use store::models::NewUser;
    use store::storage::{StoreError, UserStore};
    use store::MemStore;

    fn draft(title: &str) -> NewMemory {
        NewMemory::new(title, "a description", "data:image/png;base64,AAAA")
    }

    /// Backend that fails every operation, for exercising degradation paths.
    struct FailStore;

    #[async_trait]
    impl MemoryStore for FailStore {
        async fn memories(&self) -> Result<Vec<Memory>, StoreError> {
            Err(StoreError::Backend("down".into()))
        }
        async fn memory(&self, _id: i32) -> Result<Option<Memory>, StoreError> {
            Err(StoreError::Backend("down".into()))
        }
        async fn create_memory(&self, _draft: NewMemory) -> Result<Memory, StoreError> {
            Err(StoreError::Backend("down".into()))
        }
        async fn delete_memory(&self, _id: i32) -> Result<bool, StoreError> {
            Err(StoreError::Backend("down".into()))
        }
    }

    #[tokio::test]
    async fn test_create_refreshes_from_backend() {
        let mut gallery = Gallery::new(MemStore::new());

        gallery.create(draft("First")).await;

        assert_eq!(gallery.memories().len(), 1);
        assert_eq!(gallery.memories()[0].title, "First");
        assert_eq!(gallery.memories()[0].id, 1);

        let notices = gallery.take_notices();
        assert_eq!(notices.last().unwrap().level, NoticeLevel::Success);
    }

    #[tokio::test]
    async fn test_invalid_draft_never_reaches_backend() {
        let store = MemStore::new();
        let mut gallery = Gallery::new(store.clone());

        gallery.create(NewMemory::new("", "d", "i")).await;

        assert!(store.memories().await.unwrap().is_empty());
        let notices = gallery.take_notices();
        assert_eq!(notices.last().unwrap().level, NoticeLevel::Error);
    }

    #[tokio::test]
    async fn test_remove_refreshes_and_reports_absent() {
        let mut gallery = Gallery::new(MemStore::new());
        gallery.create(draft("Only")).await;
        gallery.take_notices();

        gallery.remove(1).await;
        assert!(gallery.memories().is_empty());
        assert_eq!(
            gallery.take_notices().last().unwrap().level,
            NoticeLevel::Success
        );

        gallery.remove(1).await;
        assert_eq!(
            gallery.take_notices().last().unwrap().level,
            NoticeLevel::Error
        );
    }

    #[tokio::test]
    async fn test_refresh_failure_degrades_to_empty_list() {
        let mut gallery = Gallery::new(FailStore);
        gallery.refresh().await;

        assert!(gallery.memories().is_empty());
        // Silent degradation: a failed list fetch records no notice.
        assert!(gallery.take_notices().is_empty());
    }

    #[tokio::test]
    async fn test_create_failure_leaves_state_untouched() {
        let mut gallery = Gallery::new(FailStore);
        gallery.create(draft("doomed")).await;

        assert!(gallery.memories().is_empty());
        assert_eq!(
            gallery.take_notices().last().unwrap().level,
            NoticeLevel::Error
        );
    }

    #[tokio::test]
    async fn test_modal_close_clears_pending_upload() {
        let mut gallery = Gallery::new(MemStore::new());

        gallery.open_modal();
        gallery.select_image(PathBuf::from("/tmp/photo.png"));
        assert!(gallery.modal_open());
        assert!(gallery.selected_image().is_some());
        assert!(gallery.image_preview().is_none());

        gallery.close_modal();
        assert!(!gallery.modal_open());
        assert!(gallery.selected_image().is_none());
        assert!(gallery.image_preview().is_none());
    }

    #[tokio::test]
    async fn test_load_preview_renders_data_url() {
        let dir = std::env::temp_dir().join(format!("keepsake_preview_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("pixel.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let mut gallery = Gallery::new(MemStore::new());
        gallery.select_image(path);
        gallery.load_preview().await;

        let preview = gallery.image_preview().unwrap();
        assert!(preview.starts_with("data:image/png;base64,"));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_volume_is_clamped() {
        let mut gallery = Gallery::new(MemStore::new());
        assert_eq!(gallery.volume(), 70);

        gallery.set_volume(150);
        assert_eq!(gallery.volume(), 100);

        gallery.set_volume(0);
        assert_eq!(gallery.volume(), 0);

        assert!(!gallery.music_playing());
        gallery.toggle_music();
        assert!(gallery.music_playing());
    }

    #[tokio::test]
    async fn test_user_store_is_carried_but_unused() {
        // The reserved account entity round-trips through the same backends
        // even though no gallery operation touches it.
        let store = MemStore::new();
        store
            .create_user(NewUser {
                username: "sam".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert!(store.user_by_username("sam").await.unwrap().is_some());
    }
}
