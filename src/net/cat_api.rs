/// Client for the random cat image API
///
/// The API answers `GET /v1/images/search` with a JSON array of image
/// descriptions; only the `url` of the first entry is used.
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::ImageSource;
use crate::error::FetchError;

/// Default endpoint returning one random cat per request
pub const DEFAULT_API_URL: &str = "https://api.thecatapi.com/v1/images/search";

/// Header carrying the optional API key
const API_KEY_HEADER: &str = "x-api-key";

/// One entry of the search response. The API sends more fields
/// (id, width, height, breeds) that we don't need.
#[derive(Debug, Deserialize)]
struct CatImage {
    url: String,
}

#[derive(Debug, Clone)]
pub struct CatApiClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
}

impl CatApiClient {
    pub fn new(client: Client, api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            api_url: api_url.into(),
            api_key,
        }
    }
}

#[async_trait]
impl ImageSource for CatApiClient {
    async fn random_image_url(&self) -> Result<String, FetchError> {
        let mut request = self.client.get(&self.api_url);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let url = parse_search_response(&body)?;
        tracing::debug!(%url, "cat API returned image");
        Ok(url)
    }
}

/// Pull the first image URL out of a search response body
pub fn parse_search_response(body: &str) -> Result<String, FetchError> {
    let images: Vec<CatImage> =
        serde_json::from_str(body).map_err(|e| FetchError::InvalidResponse(e.to_string()))?;

    images
        .into_iter()
        .map(|image| image.url)
        .find(|url| !url.is_empty())
        .ok_or(FetchError::EmptyResponse)
}
