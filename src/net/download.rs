/// Plain HTTP download of image bytes
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;

use super::ImageDownloader;
use crate::error::SaveError;

#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageDownloader for HttpDownloader {
    async fn download(&self, url: &str) -> Result<Bytes, SaveError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SaveError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SaveError::Status(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| SaveError::Network(e.to_string()))?;

        tracing::debug!(url, size = bytes.len(), "downloaded image");
        Ok(bytes)
    }
}
