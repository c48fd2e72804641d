/// Network access
///
/// This module handles:
/// - Asking the cat API for a random image location (cat_api.rs)
/// - Downloading the image bytes (download.rs)
///
/// Both sit behind small traits so the controller can be driven by fakes in tests.
use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{FetchError, SaveError};

pub mod cat_api;
pub mod download;

pub use cat_api::CatApiClient;
pub use download::HttpDownloader;

/// Something that can hand out the location of a random image
#[async_trait]
pub trait ImageSource: Send + Sync {
    async fn random_image_url(&self) -> Result<String, FetchError>;
}

/// Something that can fetch raw bytes from a location
#[async_trait]
pub trait ImageDownloader: Send + Sync {
    async fn download(&self, url: &str) -> Result<Bytes, SaveError>;
}

/// Build the HTTP client shared by the API client and the downloader
pub fn build_client() -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
}
