use async_trait::async_trait;
use chrono::Local;
use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use super::ImageStore;
use crate::error::SaveError;

/// Folder name used under the pictures directory
const APP_FOLDER: &str = "cat-fetcher";

/// How many `_N` suffixes to try before giving up on a file name
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Get the default folder for saved cats
/// Returns ~/Pictures/cat-fetcher on Linux, falling back to ~/cat-fetcher
pub fn default_save_dir() -> PathBuf {
    let mut path = dirs::picture_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."));

    path.push(APP_FOLDER);
    path
}

/// Writes each image as a new timestamped file in a user-visible folder.
/// Existing files are never overwritten.
#[derive(Debug)]
pub struct GalleryStore {
    dir: RwLock<PathBuf>,
}

impl GalleryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: RwLock::new(dir.into()),
        }
    }

    /// Folder new images are written to
    pub fn dir(&self) -> PathBuf {
        self.dir
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Point future saves at another folder
    pub fn set_dir(&self, dir: impl Into<PathBuf>) {
        let dir = dir.into();
        tracing::info!("📁 Saving cats to {}", dir.display());
        *self.dir.write().unwrap_or_else(PoisonError::into_inner) = dir;
    }
}

#[async_trait]
impl ImageStore for GalleryStore {
    async fn save(&self, bytes: &[u8], extension: &str) -> Result<PathBuf, SaveError> {
        let dir = self.dir();
        fs::create_dir_all(&dir).await?;

        let stem = format!("cat_{}", Local::now().format("%Y%m%d_%H%M%S_%3f"));

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = dir.join(file_name(&stem, attempt, extension));

            let mut file = match OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            if let Err(e) = write_all(&mut file, bytes).await {
                // Don't leave a truncated image behind
                drop(file);
                let _ = fs::remove_file(&path).await;
                return Err(e.into());
            }

            return Ok(path);
        }

        Err(io::Error::new(
            ErrorKind::AlreadyExists,
            format!("no free file name for {stem} in {}", dir.display()),
        )
        .into())
    }
}

async fn write_all(file: &mut fs::File, bytes: &[u8]) -> io::Result<()> {
    file.write_all(bytes).await?;
    file.flush().await?;
    file.sync_all().await
}

fn file_name(stem: &str, attempt: u32, extension: &str) -> String {
    if attempt == 0 {
        format!("{stem}.{extension}")
    } else {
        format!("{stem}_{attempt}.{extension}")
    }
}
