//! Client-side state store for the Keepsake gallery.
//!
//! [`Gallery`] holds everything a frontend renders (the memory list, modal
//! and upload state, and the music-player flags) and reconciles it with
//! whichever [`store::MemoryStore`] backend it was composed with:
//! [`HttpStore`] against the REST API, or the on-device [`store::FileStore`]
//! for offline use. [`make_store`] picks between them.

mod gallery;
pub use gallery::{Gallery, Notice, NoticeLevel};

mod http_store;
pub use http_store::HttpStore;

mod backend;
pub use backend::{make_store, ClientConfig};

pub mod preview;
pub mod sample;
