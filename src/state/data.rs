/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the controller and the UI layer.
use bytes::Bytes;
use std::path::PathBuf;

/// Location of the cat currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Where the image bytes can be downloaded from
    pub url: String,
}

impl ImageReference {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Result of the last download-and-save attempt.
/// Only the success flag is kept; no history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    pub succeeded: bool,
}

impl SaveOutcome {
    pub const SUCCEEDED: Self = Self { succeeded: true };
    pub const FAILED: Self = Self { succeeded: false };
}

/// What `fetch_new_image` produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub reference: ImageReference,
    /// False when the service handed back the URL that was already current
    pub is_new: bool,
}

/// Everything `download_and_save` learned along the way
#[derive(Debug, Clone)]
pub struct SaveReport {
    /// The URL that was downloaded
    pub url: String,
    /// The published outcome
    pub outcome: SaveOutcome,
    /// Downloaded bytes, present whenever the download itself worked
    pub bytes: Option<Bytes>,
    /// Where the file landed, if it was written
    pub saved_to: Option<PathBuf>,
}

/// One full fetch → save pass
#[derive(Debug, Clone)]
pub struct Cycle {
    pub image: FetchedImage,
    /// None when the URL did not change, so nothing was saved
    pub save: Option<SaveReport>,
}
