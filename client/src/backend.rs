//! Backend composition for the client.
//!
//! One interface, two interchangeable implementations, chosen once here:
//! a configured server URL selects the remote [`HttpStore`]; without one the
//! gallery runs fully on-device against a [`FileStore`] under the platform
//! data directory, seeded with the starter records on first run.

use std::path::PathBuf;
use std::sync::Arc;

use store::storage::{MemoryStore, StoreError};
use store::FileStore;

use crate::http_store::HttpStore;
use crate::sample;

/// Client composition settings.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// Base URL of the REST API. `None` selects the on-device store.
    pub server_url: Option<String>,
    /// Override for the on-device data directory (tests, portable installs).
    pub data_dir: Option<PathBuf>,
}

/// Build the gallery's backend from its configuration.
pub fn make_store(config: &ClientConfig) -> Result<Arc<dyn MemoryStore>, StoreError> {
    match &config.server_url {
        Some(url) => Ok(Arc::new(HttpStore::new(url.clone()))),
        None => {
            let base = config.data_dir.clone().unwrap_or_else(|| {
                dirs::data_dir()
                    .unwrap_or_else(|| PathBuf::from("."))
                    .join("keepsake")
            });
            let store = FileStore::new(base.join("gallery.json"));
            store.seed_if_empty(&sample::sample_memories())?;
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::Gallery;

    #[tokio::test]
    async fn test_local_backend_is_seeded_once() {
        let dir = std::env::temp_dir().join(format!("keepsake_compose_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let config = ClientConfig {
            server_url: None,
            data_dir: Some(dir.clone()),
        };

        let store = make_store(&config).unwrap();
        let mut gallery = Gallery::new(store);
        gallery.refresh().await;
        assert_eq!(gallery.memories().len(), 6);

        // Delete one, recompose: the seed must not come back.
        gallery.remove(3).await;
        let store = make_store(&config).unwrap();
        let mut gallery = Gallery::new(store);
        gallery.refresh().await;
        assert_eq!(gallery.memories().len(), 5);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_remote_url_selects_http_store() {
        let config = ClientConfig {
            server_url: Some("http://localhost:8080".into()),
            data_dir: None,
        };
        assert!(make_store(&config).is_ok());
    }
}
