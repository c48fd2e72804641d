use bytes::Bytes;
use tokio::sync::watch;

use super::data::{Cycle, FetchedImage, ImageReference, SaveOutcome, SaveReport};
use crate::error::{FetchError, SaveError};
use crate::net::{ImageDownloader, ImageSource};
use crate::storage::ImageStore;

/// The CatController owns the two observable fields behind the screen:
/// the cat currently shown and the outcome of the last save.
///
/// Each field is a single slot (last write wins) published through a
/// `watch` channel, so any number of subscribers can follow it.
pub struct CatController<S, D, W> {
    source: S,
    downloader: D,
    store: W,
    current_image: watch::Sender<Option<ImageReference>>,
    last_save: watch::Sender<Option<SaveOutcome>>,
}

impl<S, D, W> CatController<S, D, W>
where
    S: ImageSource,
    D: ImageDownloader,
    W: ImageStore,
{
    pub fn new(source: S, downloader: D, store: W) -> Self {
        let (current_image, _) = watch::channel(None);
        let (last_save, _) = watch::channel(None);

        Self {
            source,
            downloader,
            store,
            current_image,
            last_save,
        }
    }

    /// Ask the image source for a new cat and publish it.
    ///
    /// Subscribers are only notified when the URL actually changed.
    /// On failure both fields are left alone.
    pub async fn fetch_new_image(&self) -> Result<FetchedImage, FetchError> {
        let url = match self.source.random_image_url().await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("⚠️  Could not fetch a new cat: {e}");
                return Err(e);
            }
        };

        let reference = ImageReference::new(url);
        let is_new = self.current_image.send_if_modified(|current| {
            if current.as_ref() == Some(&reference) {
                false
            } else {
                *current = Some(reference.clone());
                true
            }
        });

        if is_new {
            tracing::info!("🐱 New cat: {}", reference.url);
        } else {
            tracing::debug!(url = %reference.url, "cat service repeated the current image");
        }

        Ok(FetchedImage { reference, is_new })
    }

    /// Download the image at `url`, write it to the store and publish the outcome.
    ///
    /// Every failure collapses to `succeeded = false`; the reason only goes to the log.
    pub async fn download_and_save(&self, url: &str) -> SaveReport {
        let (bytes, result) = match self.download_image(url).await {
            Ok((bytes, extension)) => {
                let result = self.store.save(&bytes, extension).await;
                (Some(bytes), result)
            }
            Err(e) => (None, Err(e)),
        };

        let (outcome, saved_to) = match result {
            Ok(path) => {
                tracing::info!("📸 Saved cat to {}", path.display());
                (SaveOutcome::SUCCEEDED, Some(path))
            }
            Err(e) => {
                tracing::warn!("❌ Could not save {url}: {e}");
                (SaveOutcome::FAILED, None)
            }
        };

        self.last_save.send_replace(Some(outcome));

        SaveReport {
            url: url.to_string(),
            outcome,
            bytes,
            saved_to,
        }
    }

    /// Fetch a new cat, then save it if it is one we haven't seen yet
    pub async fn fetch_and_save(&self) -> Result<Cycle, FetchError> {
        let image = self.fetch_new_image().await?;

        let save = if image.is_new {
            Some(self.download_and_save(&image.reference.url).await)
        } else {
            None
        };

        Ok(Cycle { image, save })
    }

    /// Download `url` and make sure it is an image.
    /// Returns the bytes with the extension matching their format.
    async fn download_image(&self, url: &str) -> Result<(Bytes, &'static str), SaveError> {
        let bytes = self.downloader.download(url).await?;
        let format = image::guess_format(&bytes).map_err(|_| SaveError::NotAnImage)?;
        let extension = format.extensions_str().first().copied().unwrap_or("img");

        Ok((bytes, extension))
    }
}

impl<S, D, W> CatController<S, D, W> {
    /// The cat currently on screen
    pub fn current_image(&self) -> Option<ImageReference> {
        self.current_image.borrow().clone()
    }

    /// Outcome of the most recent save
    pub fn last_save(&self) -> Option<SaveOutcome> {
        *self.last_save.borrow()
    }

    pub fn subscribe_image(&self) -> watch::Receiver<Option<ImageReference>> {
        self.current_image.subscribe()
    }

    pub fn subscribe_save(&self) -> watch::Receiver<Option<SaveOutcome>> {
        self.last_save.subscribe()
    }

    pub fn store(&self) -> &W {
        &self.store
    }
}

impl<S, D, W> std::fmt::Debug for CatController<S, D, W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatController")
            .field("current_image", &*self.current_image.borrow())
            .field("last_save", &*self.last_save.borrow())
            .finish()
    }
}
