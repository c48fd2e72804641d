/// Persistent storage for downloaded cats
///
/// `gallery.rs` writes images into a user-visible pictures folder.
use async_trait::async_trait;
use std::path::PathBuf;

use crate::error::SaveError;

pub mod gallery;

pub use gallery::GalleryStore;

/// Somewhere image bytes can be kept
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write `bytes` as a new file with the given extension and return its path
    async fn save(&self, bytes: &[u8], extension: &str) -> Result<PathBuf, SaveError>;
}
